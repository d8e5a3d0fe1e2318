use crate::record::Record;
use crate::view::ProgramView;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(
    value: &T,
    path: P,
) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, value).map_err(std::io::Error::other)
}

/// Write records as CSV using the field order of the first record.
///
/// Records missing one of those fields get an empty cell.
pub fn write_records_csv(writer: impl Write, records: &[Record]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let Some(first) = records.first() else {
        return wtr.flush().map_err(Into::into);
    };
    let headers: Vec<&str> = first.names().collect();
    wtr.write_record(&headers)?;
    for r in records {
        wtr.write_record(headers.iter().map(|h| r.get(h)))?;
    }
    wtr.flush().map_err(Into::into)
}

pub fn save_records_csv<P: AsRef<Path>>(path: P, records: &[Record]) -> csv::Result<()> {
    write_records_csv(std::fs::File::create(path)?, records)
}

pub fn save_records_json<P: AsRef<Path>>(path: P, records: &[Record]) -> std::io::Result<()> {
    write_json(records, path)
}

pub fn save_program_json<P: AsRef<Path>>(path: P, view: &ProgramView) -> std::io::Result<()> {
    write_json(view, path)
}
