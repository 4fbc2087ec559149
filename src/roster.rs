//! Roster upload - CSV reading and row validation.
//!
//! Uploaded spreadsheets arrive as string-keyed rows with whatever column
//! headers the admin used. Each field is looked up through a fixed list of
//! accepted spellings; the first non-blank value wins. A row missing any
//! required field is dropped whole, never partially imported.

use crate::{entities::NewStudent, errors::Result};
use std::{collections::HashMap, io::Read};
use tracing::debug;

const NAME_KEYS: &[&str] = &["name", "Name", "student_name", "Student Name"];
const PHONE_KEYS: &[&str] = &["phone", "Phone", "contact", "Contact Number", "contact_number"];
const RANK_KEYS: &[&str] = &["rank", "Rank", "eamcet_rank", "EAMCET Rank"];
const CATEGORY_KEYS: &[&str] = &["category", "Category", "caste", "Caste"];

/// Reads a CSV roster into header-keyed rows.
///
/// The first line is the header. Fields are trimmed, blank lines skipped and
/// short rows simply lack the trailing keys.
///
/// # Errors
/// Returns an error if the input is not readable CSV.
pub fn read_csv<R: Read>(input: R) -> Result<Vec<HashMap<String, String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers()?.clone();

    reader
        .records()
        .map(|record| -> Result<HashMap<String, String>> {
            let record = record?;
            Ok(headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect())
        })
        .collect()
}

/// Turns uploaded rows into students ready for [`crate::core::Repository::add_students`].
///
/// Exact spellings are tried first in precedence order (`name`, `Name`,
/// `student_name`, `Student Name`), then headers that only differ in case or
/// spacing. Values are trimmed; a rank without leading digits becomes 0.
#[must_use]
pub fn validate_rows(rows: &[HashMap<String, String>]) -> Vec<NewStudent> {
    let students: Vec<NewStudent> = rows.iter().filter_map(validate_row).collect();
    debug!(
        "Roster validation kept {} of {} rows",
        students.len(),
        rows.len()
    );
    students
}

fn validate_row(row: &HashMap<String, String>) -> Option<NewStudent> {
    Some(NewStudent {
        name: field(row, NAME_KEYS)?.to_string(),
        phone: field(row, PHONE_KEYS)?.to_string(),
        rank: parse_rank(field(row, RANK_KEYS)?),
        category: field(row, CATEGORY_KEYS)?.to_string(),
    })
}

/// First non-blank value among `aliases`, exact matches before loose ones.
fn field<'r>(row: &'r HashMap<String, String>, aliases: &[&str]) -> Option<&'r str> {
    let exact = aliases.iter().filter_map(move |alias| row.get(*alias));

    // Loose matches are ordered by alias precedence, then header text.
    let mut loose: Vec<(usize, &String)> = row
        .keys()
        .filter_map(|key| {
            let normalized = normalize_header(key);
            aliases
                .iter()
                .position(|alias| normalize_header(alias) == normalized)
                .map(|rank| (rank, key))
        })
        .collect();
    loose.sort();

    exact
        .chain(loose.into_iter().filter_map(move |(_, key)| row.get(key)))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Leading digits of `value` as a rank, 0 when there are none.
fn parse_rank(value: &str) -> u32 {
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}
