use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use treetext_format::{ArchiveEntry, ArchiveReader};

#[derive(Debug, Serialize)]
struct ListedRecord<'a> {
    path: &'a str,
    bytes: u64,
    lines: usize,
}

impl<'a> From<&'a ArchiveEntry> for ListedRecord<'a> {
    fn from(entry: &'a ArchiveEntry) -> Self {
        ListedRecord {
            path: entry.path(),
            bytes: entry.content_len() as u64,
            lines: entry.content().to_archive_text().lines().count(),
        }
    }
}

#[inline(always)]
fn format_size(bytes: u64) -> String {
    use humansize::{file_size_opts as options, FileSize};
    bytes.file_size(options::BINARY).unwrap_or_else(|e| e)
}

pub fn run(input_file: &Path, json: bool) -> Result<()> {
    let reader = ArchiveReader::open(input_file)?;
    let entries: Vec<ArchiveEntry> = reader.entries().collect();
    let records: Vec<ListedRecord<'_>> = entries.iter().map(ListedRecord::from).collect();

    if json {
        let out = serde_json::to_string_pretty(&records).context("Cannot serialize listing")?;
        println!("{}", out);
        return Ok(());
    }

    if let Some(path) = reader.path() {
        println!(
            "Archive: {} ({}, {} records)",
            path.display(),
            format_size(reader.text().len() as u64),
            records.len()
        );
    }
    println!("Length         Lines     Path");
    println!("-------------  --------  --------");
    for record in records.iter() {
        println!(
            "{:>12}   {:>8}  {}",
            format_size(record.bytes),
            record.lines,
            record.path
        );
    }

    Ok(())
}
