//! Transcript aggregation into a width-aligned keyword table.
//!
//! The contract is explicitly two-phase: ingest the whole transcript, then
//! render. Column widths need every record before the first row can be
//! printed, so the table keeps all records in memory; the cost is bounded
//! by the size of the input.

use std::io::{BufRead, Write};

use crate::error::{Error, Result};
use crate::extract::{card_keyword, card_value};
use crate::keyword::KeywordSet;
use crate::transcript::{is_magic_line, is_marker, marker_name};

/// Heading of the leading filename column.
const FILE_HEADING: &str = "FILE";

/// One input file (or anonymous header) and its keyword values.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// File name from the boundary marker; empty for anonymous records.
    pub filename: String,
    /// Value per requested keyword, in request order; `None` when the
    /// keyword was absent from this header.
    pub values: Vec<Option<String>>,
}

/// Aggregates transcript lines into per-file records and renders the table.
pub struct KeywordTable {
    keys: KeywordSet,
    records: Vec<FileRecord>,
    skip_next: bool,
    named: bool,
}

impl KeywordTable {
    pub fn new(keys: KeywordSet) -> Self {
        KeywordTable {
            keys,
            records: Vec::new(),
            skip_next: false,
            named: false,
        }
    }

    /// Records opened so far, in input order.
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    fn open_record(&mut self, filename: &str) {
        self.records.push(FileRecord {
            filename: String::from(filename),
            values: vec![None; self.keys.len()],
        });
    }

    /// Feed one transcript line.
    pub fn ingest_line(&mut self, line: &str) {
        if self.skip_next {
            // The line after a boundary marker repeats the magic prefix (or
            // the XTENSION card) and carries no new information.
            self.skip_next = false;
            return;
        }
        if is_marker(line) {
            self.named = true;
            self.open_record(marker_name(line));
            self.skip_next = true;
            return;
        }
        if is_magic_line(line) {
            self.open_record("");
            return;
        }
        let Some(index) = self.keys.match_keyword(card_keyword(line)) else {
            return;
        };
        // Matches before the first boundary are silently discarded.
        if let Some(record) = self.records.last_mut() {
            record.values[index] = Some(card_value(line));
        }
    }

    /// Feed every line of a transcript stream.
    pub fn ingest<R: BufRead>(&mut self, input: R) -> Result<()> {
        for line in input.split(b'\n') {
            let line = line?;
            self.ingest_line(&String::from_utf8_lossy(&line));
        }
        Ok(())
    }

    /// Render the aligned table; `with_header` controls the heading line.
    ///
    /// Fails with [`Error::NoRecords`] when no boundary line ever opened a
    /// record; nothing is written in that case. The filename column is
    /// present only when at least one record came from a `====>` marker.
    pub fn render<W: Write>(&self, out: &mut W, with_header: bool) -> Result<()> {
        if self.records.is_empty() {
            return Err(Error::NoRecords);
        }

        // Column width: the header's length or the longest present value,
        // whichever is larger.
        let name_width = self
            .records
            .iter()
            .map(|r| r.filename.len())
            .chain([FILE_HEADING.len()])
            .max()
            .unwrap_or(0);
        let mut widths: Vec<usize> = self.keys.names().map(str::len).collect();
        for record in &self.records {
            for (width, value) in widths.iter_mut().zip(&record.values) {
                if let Some(v) = value {
                    *width = (*width).max(v.len());
                }
            }
        }

        if with_header {
            if self.named {
                write!(out, "{:<name_width$}\t", FILE_HEADING)?;
            }
            for (name, &width) in self.keys.names().zip(&widths) {
                write!(out, "{:<1$}\t", name, width)?;
            }
            writeln!(out)?;
        }

        for record in &self.records {
            if self.named {
                write!(out, "{:<name_width$}\t", record.filename)?;
            }
            for (value, &width) in record.values.iter().zip(&widths) {
                write!(out, "{:<1$}\t", value.as_deref().unwrap_or(""), width)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
