//! JSON Lines post reader
//!
//! One `PostRecord` object per line. Blank lines are ignored; lines that fail
//! to parse are logged and skipped so a single bad record does not sink a run.
//! I/O failures abort the read.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::{Context, Result};
use post_stats::PostRecord;

use crate::core::InputSource;

/// Line accounting for one read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSummary {
    pub lines: u64,
    pub records: u64,
    pub skipped: u64,
}

/// Open the configured input for buffered reading
pub fn open_input(source: &InputSource) -> Result<Box<dyn BufRead>> {
    match source {
        InputSource::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
        InputSource::File(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Parse every record from `reader` and hand it to `on_post`.
///
/// An error returned by `on_post` stops the read and is propagated.
pub fn read_posts<R, F>(mut reader: R, mut on_post: F) -> Result<ReadSummary>
where
    R: BufRead,
    F: FnMut(PostRecord) -> Result<()>,
{
    let mut summary = ReadSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let line_no = summary.lines + 1;
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("Failed to read input line {}", line_no))?;
        if read == 0 {
            break;
        }
        summary.lines += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                summary.skipped += 1;
                tracing::warn!(line = line_no, error = %e, "Skipping post record with invalid UTF-8");
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<PostRecord>(line) {
            Ok(post) => {
                summary.records += 1;
                on_post(post)?;
            }
            Err(e) => {
                summary.skipped += 1;
                tracing::warn!(line = line_no, error = %e, "Skipping malformed post record");
            }
        }
    }

    tracing::debug!(
        lines = summary.lines,
        records = summary.records,
        skipped = summary.skipped,
        "Input read"
    );
    Ok(summary)
}
