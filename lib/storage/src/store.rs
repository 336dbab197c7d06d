// Line-delimited JSON record store
use anyhow::{Context, Result};
use chemrank_core::ProductRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

/// Load product records from a JSONL file.
///
/// Blank lines are skipped and malformed lines are logged and skipped. A
/// missing or unreadable file yields an empty catalog; loading never fails.
pub fn load<P: AsRef<Path>>(path: P) -> Vec<ProductRecord> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "record file not found, starting with an empty catalog");
            return Vec::new();
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "cannot open record file");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(line = line_no + 1, error = %e, "unreadable line skipped");
                skipped += 1;
                continue;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<ProductRecord>(trimmed) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(line = line_no + 1, error = %e, "malformed record skipped");
                skipped += 1;
            }
        }
    }

    tracing::info!(path = %path.display(), loaded = records.len(), skipped, "records loaded");
    records
}

/// Append records to a JSONL file, one object per line.
///
/// Creates the file and its parent directories when missing.
pub fn append<P: AsRef<Path>>(path: P, records: &[ProductRecord]) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), added = records.len(), "records appended");
    Ok(records.len())
}
