//! Labelled numeric tables shared by the summarizer, aggregator and renderer

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Table};
use console::style;
use serde::Serialize;

/// One labelled row of a [`StatTable`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRow {
    pub label: String,
    pub values: Vec<f64>,
}

/// A titled grid of numbers with row labels and column headers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<StatRow>,
}

impl StatTable {
    pub fn new(title: &str, columns: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. `values` must line up with the column headers.
    pub fn push_row(&mut self, label: &str, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.columns.len());
        self.rows.push(StatRow {
            label: label.to_string(),
            values,
        });
    }

    pub fn row(&self, label: &str) -> Option<&StatRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Look up a single cell by row label and column header
    pub fn value(&self, row_label: &str, column: &str) -> Option<f64> {
        let col_idx = self.columns.iter().position(|c| c == column)?;
        self.row(row_label).and_then(|r| r.values.get(col_idx).copied())
    }

    pub fn row_labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }

    /// Cell texts, row by row
    pub fn cell_texts(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| r.values.iter().map(|v| format_cell(*v)).collect())
            .collect()
    }

    /// Echo the table to the terminal
    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style(&self.title).white().bold()
        );

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);

        let mut header = vec![Cell::new("")];
        header.extend(
            self.columns
                .iter()
                .map(|c| Cell::new(c).add_attribute(Attribute::Bold)),
        );
        table.set_header(header);

        for (row, texts) in self.rows.iter().zip(self.cell_texts()) {
            let mut cells = vec![Cell::new(&row.label).add_attribute(Attribute::Bold)];
            cells.extend(
                texts
                    .into_iter()
                    .map(|t| Cell::new(t).set_alignment(CellAlignment::Right)),
            );
            table.add_row(cells);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}

/// Render a table value: whole numbers keep one decimal, others show as
/// stored (already rounded upstream), NaN reads `nan`.
pub fn format_cell(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(4.0), "4.0");
        assert_eq!(format_cell(25.5), "25.5");
        assert_eq!(format_cell(12.91), "12.91");
        assert_eq!(format_cell(f64::NAN), "nan");
        assert_eq!(format_cell(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_value_lookup() {
        let mut table = StatTable::new("t", &["A", "B"]);
        table.push_row("r1", vec![1.0, 2.0]);
        table.push_row("r2", vec![3.0, 4.0]);

        assert_eq!(table.value("r2", "B"), Some(4.0));
        assert_eq!(table.value("r3", "A"), None);
        assert_eq!(table.value("r1", "C"), None);
        assert_eq!(table.row_labels(), vec!["r1", "r2"]);
    }
}
