//! JSON rendering of result trees

use std::io::Write;

use anyhow::{Context, Result};
use post_stats::StatisticsNode;

/// Serialize `stats` as JSON followed by a newline
pub fn write_result<W: Write>(stats: &StatisticsNode, pretty: bool, mut writer: W) -> Result<()> {
    let written = if pretty {
        serde_json::to_writer_pretty(&mut writer, stats)
    } else {
        serde_json::to_writer(&mut writer, stats)
    };
    written.context("Failed to serialize statistics")?;

    writeln!(writer).context("Failed to write statistics")?;
    writer.flush().context("Failed to flush output")?;
    Ok(())
}
