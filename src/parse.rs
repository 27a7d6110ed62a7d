//! Plain-text loaders shared by graphs and node tables.
//!
//! Every format is line oriented: comma separated fields, `#` starts a
//! comment, blank lines are skipped. Names may contain spaces.

use std::str::FromStr;

use crate::error::TableParseError;

/// A non-empty line split into trimmed fields, with its 1-based line number.
pub(crate) struct Record<'a> {
    pub(crate) line: usize,
    pub(crate) text: &'a str,
    pub(crate) fields: Vec<&'a str>,
}

pub(crate) fn records(text: &str) -> impl Iterator<Item = Record<'_>> {
    text.lines().enumerate().filter_map(|(i, raw)| {
        let text = match raw.find('#') {
            Some(comment) => &raw[..comment],
            None => raw,
        }
        .trim();
        if text.is_empty() {
            return None;
        }
        Some(Record {
            line: i + 1,
            text,
            fields: text.split(',').map(str::trim).collect(),
        })
    })
}

/// Parses `name, value` lines.
pub(crate) fn node_values<V: FromStr>(text: &str) -> Result<Vec<(String, V)>, TableParseError> {
    let mut values = vec![];
    for r in records(text) {
        let name = match r.fields.first() {
            Some(name) if !name.is_empty() => *name,
            _ => {
                return Err(TableParseError::MissingField {
                    line: r.line,
                    field: "name",
                    text: r.text.to_string(),
                });
            }
        };
        let value = r.fields.get(1).ok_or_else(|| TableParseError::MissingField {
            line: r.line,
            field: "value",
            text: r.text.to_string(),
        })?;
        let value = value.parse::<V>().map_err(|_| TableParseError::InvalidValue {
            line: r.line,
            text: value.to_string(),
        })?;
        values.push((name.to_string(), value));
    }
    Ok(values)
}

pub(crate) fn read_table<V: FromStr>(
    p: &std::path::Path,
) -> Result<Vec<(String, V)>, TableParseError> {
    let text = std::fs::read_to_string(p).map_err(|e| TableParseError::IOError {
        p: p.to_path_buf(),
        e,
    })?;
    node_values(&text)
}
