use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::EventRecord;

const DELIMITER: char = ',';

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

pub fn write_row<W: Write>(w: &mut W, row: &[String], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", sep)?;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header row plus one row per record.
pub fn write_table<W: Write>(w: &mut W, records: &[EventRecord]) -> io::Result<()> {
    let header: Vec<String> = EventRecord::COLUMNS.iter().map(|c| c.to_string()).collect();
    write_row(w, &header, DELIMITER)?;
    for record in records {
        write_row(w, &record.to_row(), DELIMITER)?;
    }
    Ok(())
}

/// Overwrite `path` with the table, creating parent directories as needed.
pub fn write_csv(path: &Path, records: &[EventRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    write_table(&mut w, records)?;
    w.flush()?;
    Ok(())
}
