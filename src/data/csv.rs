//! CSV dataset loading
//!
//! Loads multiclass datasets from CSV where every column but the last is a
//! feature and the last column is a non-negative integer class label. A
//! header row is detected automatically; comment lines start with '#'.

use crate::core::{Dataset, Result, SvmError};
use crate::data::VecDataset;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load a multiclass dataset from a CSV file
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<VecDataset> {
    let file = File::open(path).map_err(SvmError::IoError)?;
    load_csv_from_reader(BufReader::new(file))
}

/// Load a multiclass dataset from any buffered reader
pub fn load_csv_from_reader<R: BufRead>(reader: R) -> Result<VecDataset> {
    let mut dataset = VecDataset::new();
    let mut first_data_line = true;

    for line in reader.lines() {
        let line = line.map_err(SvmError::IoError)?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if first_data_line {
            first_data_line = false;
            if is_header_line(line) {
                continue;
            }
        }

        let (features, class) = parse_data_line(line)?;
        dataset.push(features.into(), class);
    }

    if dataset.is_empty() {
        return Err(SvmError::EmptyDataset);
    }
    Ok(dataset)
}

/// Check whether a line looks like a header row
///
/// A row where most non-label fields fail to parse as numbers is treated as
/// a header.
fn is_header_line(line: &str) -> bool {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 2 {
        return false;
    }

    let non_numeric = fields
        .iter()
        .take(fields.len() - 1)
        .filter(|field| field.trim().parse::<f64>().is_err())
        .count();
    non_numeric > fields.len() / 2
}

/// Parse one data line into features and a class label
fn parse_data_line(line: &str) -> Result<(Vec<f64>, usize)> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 2 {
        return Err(SvmError::ParseError(format!(
            "line has too few fields: {line}"
        )));
    }

    let label_field = fields[fields.len() - 1];
    let class = label_field.parse::<usize>().map_err(|_| {
        SvmError::ParseError(format!(
            "class label must be a non-negative integer, got '{label_field}'"
        ))
    })?;

    let mut features = Vec::with_capacity(fields.len() - 1);
    for (column, field) in fields.iter().take(fields.len() - 1).enumerate() {
        let value = field.parse::<f64>().map_err(|_| {
            SvmError::ParseError(format!(
                "invalid feature value at column {}: '{field}'",
                column + 1
            ))
        })?;
        features.push(value);
    }

    Ok((features, class))
}
