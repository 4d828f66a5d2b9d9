//! CSV storage for [`Record`]s.
//!
//! The first row names the fields. Empty cells are left out of the record
//! entirely rather than read as empty strings, and so are cells missing from
//! the end of a short row. Blank lines are skipped.

use arm5_hashio::{HashOpener, Mode};
use ::csv::{ReaderBuilder, WriterBuilder};
use exn::ResultExt;
use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::value::{Record, Value};

/// Read every record from CSV data.
pub fn read_from(reader: impl Read) -> Result<Vec<Record>> {
    let mut reader = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);
    let headers = reader.headers().or_raise(|| ErrorKind::Csv)?.clone();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.or_raise(|| ErrorKind::Csv)?;
        if row.is_empty() {
            continue;
        }
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .filter(|(_, value)| !value.is_empty())
            .map(|(field, value)| (field.to_string(), Value::from(value)))
            .collect();
        records.push(record);
    }
    Ok(records)
}

/// Write `records` as CSV data.
///
/// The header is every field used by any record, in the order they are
/// first seen. Absent values and missing fields become empty cells.
pub fn write_to<'a>(writer: impl Write, records: impl IntoIterator<Item = &'a Record>) -> Result<()> {
    let records: Vec<&Record> = records.into_iter().collect();
    let mut seen = HashSet::new();
    let columns: Vec<&str> = records
        .iter()
        .copied()
        .flat_map(|record| record.keys())
        .map(String::as_str)
        .filter(|field| seen.insert(*field))
        .collect();

    let mut writer = WriterBuilder::new().flexible(false).from_writer(writer);
    writer.write_record(&columns).or_raise(|| ErrorKind::Io)?;
    for record in records {
        let row = columns.iter().map(|field| record.get(*field).map(Value::to_string).unwrap_or_default());
        writer.write_record(row).or_raise(|| ErrorKind::Io)?;
    }
    writer.flush().or_raise(|| ErrorKind::Io)?;
    Ok(())
}

/// Read a CSV file, returning its records.
#[instrument(skip_all, fields(path = %path.as_ref().display(), count))]
pub fn read(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let file = File::open(path.as_ref()).or_raise(|| ErrorKind::Io)?;
    let records = read_from(file)?;
    tracing::Span::current().record("count", records.len());
    Ok(records)
}

/// Write records to a CSV file, returning its path.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write<'a>(path: impl AsRef<Path>, records: impl IntoIterator<Item = &'a Record>) -> Result<PathBuf> {
    let path = path.as_ref();
    let file = File::create(path).or_raise(|| ErrorKind::Io)?;
    write_to(file, records)?;
    Ok(path.to_path_buf())
}

/// Like [`read`], checking the file against its stored digest first.
#[instrument(skip_all, fields(path = %path.as_ref().display(), count))]
pub fn read_checked(opener: &HashOpener, path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let file = opener.open(path, Mode::READ).or_raise(|| ErrorKind::Integrity)?;
    let records = read_from(file)?;
    tracing::Span::current().record("count", records.len());
    Ok(records)
}

/// Like [`write`], storing a fresh digest alongside the file.
///
/// The digest is regenerated even if writing fails part way, so the next
/// read reflects what is actually on disk.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write_checked<'a>(
    opener: &HashOpener,
    path: impl AsRef<Path>,
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let mut file = opener.open(path, Mode::WRITE).or_raise(|| ErrorKind::Integrity)?;
    write_to(&mut file, records)?;
    file.close().or_raise(|| ErrorKind::Integrity)?;
    Ok(path.to_path_buf())
}
