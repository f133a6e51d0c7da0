//! The `wxbill convert` command: validate, convert on a background task,
//! package.

use crate::archive::{self, ArchiveSummary};
use crate::commands::Out;
use crate::convert::{NotePolicy, Progress, Stage};
use crate::error::Result;
use crate::validate;
use crate::worker::{Converter, Event};
use anyhow::{bail, Context};
use std::path::{Path, PathBuf};
use tracing::info;

/// Runs the full pipeline for one export file and returns the packaging
/// summary.
pub async fn convert_file(
    file: &Path,
    out_dir: Option<PathBuf>,
    policy: NotePolicy,
) -> Result<Out<ArchiveSummary>> {
    validate::validate_file(file)?;
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read file at {}", file.display()))?;
    validate::validate_content(&text)?;

    let mut converter = Converter::new();
    let mut task = converter.start(text, policy);
    let records = loop {
        match task.recv().await {
            Some(Event::Progress(progress)) => info!("{}", progress_message(progress)),
            Some(Event::Done(records)) => break records,
            Some(Event::Failed(err)) => return Err(err.into()),
            None => bail!("conversion task ended without a terminal event"),
        }
    };

    let out_dir = resolve_out_dir(out_dir);
    tokio::fs::create_dir_all(&out_dir)
        .await
        .with_context(|| format!("Unable to create output directory {}", out_dir.display()))?;

    let original_name = file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let summary = archive::write_archive(&records, &original_name, &out_dir)?;

    let message = format!(
        "处理完成！已生成 {}。共处理 {} 条转账记录和 {} 条交易记录。",
        summary.file_name, summary.transfer_count, summary.transaction_count
    );
    Ok(Out::new(message, summary))
}

/// The explicit output directory, or the user's download directory (where the
/// original tool delivers its archive), or the current directory.
fn resolve_out_dir(out_dir: Option<PathBuf>) -> PathBuf {
    out_dir
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn progress_message(progress: Progress) -> String {
    match progress.stage {
        Stage::Preprocessing => format!("正在预处理数据... {}%", progress.percent),
        Stage::Categorizing => format!("正在分类记录... {}%", progress.percent),
    }
}
