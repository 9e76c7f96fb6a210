//! Minimal comma-separated table reader.
//!
//! Fields never contain commas or quotes in the world data, so rows are split
//! on `,` directly. Missing trailing fields read as empty strings.

use std::collections::HashMap;

/// Parsed table with a header row.
#[derive(Debug)]
pub(crate) struct Table {
    headers: HashMap<String, usize>,
    rows: Vec<(usize, Vec<String>)>,
}

impl Table {
    pub(crate) fn parse(text: &str) -> Self {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());
        let headers: HashMap<String, usize> = lines
            .next()
            .map(|(_, line)| {
                line.split(',')
                    .enumerate()
                    .map(|(index, name)| (name.trim().to_owned(), index))
                    .collect()
            })
            .unwrap_or_default();
        let rows = lines
            .map(|(number, line)| {
                let fields: Vec<String> = line
                    .split(',')
                    .map(|field| field.trim().to_owned())
                    .collect();
                (number, fields)
            })
            .collect();
        Self { headers, rows }
    }

    pub(crate) fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|(line, fields)| Record {
            headers: &self.headers,
            fields,
            line: *line,
        })
    }
}

/// Single row addressed by column name.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Record<'a> {
    headers: &'a HashMap<String, usize>,
    fields: &'a [String],
    line: usize,
}

impl<'a> Record<'a> {
    /// Field value for the named column; empty when the column or field is absent.
    pub(crate) fn get(&self, column: &str) -> &'a str {
        self.headers
            .get(column)
            .and_then(|index| self.fields.get(*index))
            .map_or("", String::as_str)
    }

    /// One-based line number of the row within its file.
    pub(crate) const fn line(&self) -> usize {
        self.line
    }
}
