//! CSV import of daily revenue/expense rows
//!
//! Expected layout, header required:
//!
//! ```text
//! date,revenue,expense
//! 2024-03-01,500,200
//! ```

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::NewFinancialRecord;
use crate::report::parse_record_date;

const EXPECTED_HEADER: [&str; 3] = ["date", "revenue", "expense"];

fn parse_amount(record: &StringRecord, index: usize, line: u64) -> Result<f64> {
    let column = EXPECTED_HEADER[index];
    let raw = record
        .get(index)
        .ok_or_else(|| Error::Import(format!("line {}: missing {}", line, column)))?;
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .map_err(|_| Error::Import(format!("line {}: invalid {} {:?}", line, column, raw)))
}

/// Parse `date,revenue,expense` rows into records ready for insertion
pub fn parse_records_csv<R: Read>(reader: R) -> Result<Vec<NewFinancialRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let header_ok = headers.len() >= EXPECTED_HEADER.len()
        && headers
            .iter()
            .zip(EXPECTED_HEADER)
            .all(|(got, want)| got.eq_ignore_ascii_case(want));
    if !header_ok {
        return Err(Error::Import(format!(
            "unexpected header {:?}, expected {}",
            headers.iter().collect::<Vec<_>>(),
            EXPECTED_HEADER.join(",")
        )));
    }

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        if row.iter().all(str::is_empty) {
            debug!(line, "Skipping blank row");
            continue;
        }

        let date_str = row
            .get(0)
            .ok_or_else(|| Error::Import(format!("line {}: missing date", line)))?;
        let date = parse_record_date(date_str)?;

        records.push(NewFinancialRecord {
            date,
            revenue: parse_amount(&row, 1, line)?,
            expense: parse_amount(&row, 2, line)?,
        });
    }

    info!(count = records.len(), "Parsed record CSV");
    Ok(records)
}
