//! CSV reading and writing for input, reference, output and error tables.
//!
//! Everything is read as strings. Output files start with a UTF-8 BOM so
//! spreadsheet tools open the Japanese headers correctly.

use std::io::{Read, Write};

use crate::error::TableError;
use crate::types::outcome::{BatchOutcome, RowRecord};
use crate::types::reference::{BrandEntry, BrandReference};
use crate::types::table::{columns, InputRow, Table};

const BOM: &str = "\u{feff}";

/// Read a CSV table with a header row. Short rows are padded with "".
pub fn read_table<R: Read>(reader: R) -> Result<Table, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| if i == 0 { h.trim_start_matches(BOM) } else { h })
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::from_records(headers, records))
}

/// Read a brand reference table.
///
/// Requires brand-name and manufacturer-name columns; code columns are
/// optional. Rows without a brand are skipped. Values are trimmed, and a
/// later row for the same brand replaces an earlier one.
pub fn read_reference<R: Read>(reader: R) -> Result<BrandReference, TableError> {
    let table = read_table(reader)?;
    table.require_columns(&columns::REFERENCE_REQUIRED)?;

    let mut reference = BrandReference::new();
    for row in table.rows() {
        let brand = row.get(columns::BRAND_NAME).trim();
        if brand.is_empty() {
            continue;
        }
        reference.insert(
            brand,
            BrandEntry {
                brand_code: row.get(columns::BRAND_CODE).trim().to_string(),
                manufacturer_code: row.get(columns::MANUFACTURER_CODE).trim().to_string(),
                manufacturer_name: row.get(columns::MANUFACTURER_NAME).trim().to_string(),
            },
        );
    }
    Ok(reference)
}

/// Write the enriched table: original columns, then the result columns.
pub fn write_output<W: Write>(mut writer: W, outcome: &BatchOutcome) -> Result<(), TableError> {
    writer.write_all(BOM.as_bytes())?;
    let mut csv_writer = csv::Writer::from_writer(writer);

    let header: Vec<&str> = outcome
        .headers
        .iter()
        .map(String::as_str)
        .chain(columns::OUTPUT_APPENDED)
        .collect();
    csv_writer.write_record(&header)?;

    for record in &outcome.records {
        csv_writer.write_record(output_row(&outcome.headers, record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the failed rows exactly as they were read.
pub fn write_errors<W: Write>(mut writer: W, outcome: &BatchOutcome) -> Result<(), TableError> {
    writer.write_all(BOM.as_bytes())?;
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(&outcome.headers)?;
    for row in &outcome.errors {
        csv_writer.write_record(original_values(&outcome.headers, row))?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn original_values<'a>(headers: &'a [String], row: &'a InputRow) -> Vec<&'a str> {
    headers.iter().map(|h| row.get(h)).collect()
}

fn output_row(headers: &[String], record: &RowRecord) -> Vec<String> {
    let result = &record.result;
    let reference = result.reference.clone().unwrap_or_default();

    let mut values: Vec<String> = original_values(headers, &record.row)
        .into_iter()
        .map(str::to_string)
        .collect();
    values.extend([
        result.query.clone(),
        result.fields.brand.clone(),
        result.fields.manufacturer.clone(),
        result.fields.rationale.clone(),
        result.evidence.summary.clone(),
        result.evidence.links_joined(),
        reference.brand_code,
        reference.manufacturer_code,
        reference.manufacturer_name,
        result
            .status
            .map(|s| s.label().to_string())
            .unwrap_or_default(),
    ]);
    values
}
