use clap::Parser;
use std::process::ExitCode;
use tracing::{error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use wxbill_convert::args::{Args, Command};
use wxbill_convert::{commands, Result};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.common().log_level());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Convert(convert_args) => commands::convert_file(
            convert_args.file(),
            convert_args.out_dir(),
            convert_args.note_policy(),
        )
        .await?
        .print(),

        Command::Check(check_args) => commands::check(check_args.file()).await?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
