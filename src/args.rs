//! These structs provide the CLI interface for the wxbill CLI.

use crate::convert::NotePolicy;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// wxbill: convert WeChat Pay bill exports for 一木记账.
///
/// The purpose of this program is to reformat the CSV that WeChat Pay's
/// bill export produces into the two CSV files the 一木记账 import accepts
/// (转账账单 and 收支账单), bundled into one ZIP archive next to your other
/// downloads.
///
/// Export the bill from WeChat (我 → 服务 → 钱包 → 账单 → 常见问题 →
/// 下载账单), unpack the mailed archive, then run `wxbill convert` on the
/// CSV inside.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert an exported bill CSV and package the result as a ZIP.
    Convert(ConvertArgs),
    /// Run the pre-flight checks on an exported bill CSV without converting.
    Check(CheckArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

impl Common {
    pub fn new(log_level: LevelFilter) -> Self {
        Self { log_level }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

/// Args for the `wxbill convert` command.
#[derive(Debug, Parser, Clone)]
pub struct ConvertArgs {
    /// The exported bill CSV to convert.
    #[arg(long, short = 'f')]
    file: PathBuf,

    /// Where to write the ZIP archive. Defaults to your download directory.
    #[arg(long, env = "WXBILL_OUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Which note-extraction generation to apply to transaction rows.
    #[arg(long, env = "WXBILL_NOTE_POLICY", default_value_t)]
    note_policy: NotePolicy,
}

impl ConvertArgs {
    pub fn new(file: PathBuf, out_dir: Option<PathBuf>, note_policy: NotePolicy) -> Self {
        Self {
            file,
            out_dir,
            note_policy,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn out_dir(&self) -> Option<PathBuf> {
        self.out_dir.clone()
    }

    pub fn note_policy(&self) -> NotePolicy {
        self.note_policy
    }
}

/// Args for the `wxbill check` command.
#[derive(Debug, Parser, Clone)]
pub struct CheckArgs {
    /// The exported bill CSV to check.
    #[arg(long, short = 'f')]
    file: PathBuf,
}

impl CheckArgs {
    pub fn new(file: PathBuf) -> Self {
        Self { file }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}
