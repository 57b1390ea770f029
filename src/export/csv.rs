//! CSV serialization of package records.
//!
//! Columns: manager, name, version, size_bytes, install_path. Fields are
//! quoted RFC-4180 style when they contain commas, quotes, or newlines.

use std::str::FromStr;

use crate::collector::PackageRecord;
use crate::managers::Manager;

/// Column header line.
const HEADER: &str = "manager,name,version,size_bytes,install_path";

/// Serialize records to CSV, header first.
pub fn to_csv(records: &[PackageRecord]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for record in records {
        let fields = [
            record.manager.as_str().to_string(),
            record.name.clone(),
            record.version.clone(),
            record.size_bytes.to_string(),
            record.install_path.clone(),
        ];
        let row: Vec<String> = fields.iter().map(|f| escape(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Parse CSV produced by [`to_csv`] back into records.
///
/// Used to round-trip exports; rows with an unknown manager or wrong column
/// count are skipped.
pub fn from_csv(csv: &str) -> Vec<PackageRecord> {
    csv.lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let fields = split_row(line);
            if fields.len() != 5 {
                return None;
            }
            Some(PackageRecord {
                manager: Manager::from_str(&fields[0]).ok()?,
                name: fields[1].clone(),
                version: fields[2].clone(),
                size_bytes: fields[3].parse().unwrap_or(0),
                install_path: fields[4].clone(),
            })
        })
        .collect()
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split one CSV row into fields, honoring quoted sections.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}
