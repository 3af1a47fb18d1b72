//! Tabular views over dataset rows and their HTML rendering.

use std::collections::BTreeMap;

use super::record::{COL_DISEASE_NAME, NUMERIC_COLUMNS, SELECTED_COLUMNS};
use super::store::IndexedRecord;
use crate::utils::escape_html;

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Free text, left-aligned.
    Text(String),
    /// Numeric value, right-aligned.
    Number(f64),
}

impl Cell {
    /// Display text of the cell (not escaped).
    pub fn display(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(value) => format_number(*value),
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Cell::Number(_))
    }
}

/// One table row with its index label.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Row label: file position for raw rows, group position for aggregates.
    pub index: usize,
    /// Cells in header order.
    pub cells: Vec<Cell>,
}

/// Headers plus rows, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column headers, excluding the index column.
    pub headers: Vec<&'static str>,
    /// Data rows.
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, by header name.
    pub fn column(&self, header: &str) -> Option<Vec<&Cell>> {
        let position = self.headers.iter().position(|h| *h == header)?;
        Some(self.rows.iter().map(|row| &row.cells[position]).collect())
    }

    /// Render as an HTML `<table>` with an unlabeled index column.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<table>\n<thead>\n<tr><th></th>");
        for header in &self.headers {
            html.push_str(&format!("<th>{}</th>", escape_html(header)));
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");

        for row in &self.rows {
            html.push_str(&format!(
                "<tr><td style=\"text-align: right;\">{}</td>",
                row.index
            ));
            for cell in &row.cells {
                let align = if cell.is_numeric() { "right" } else { "left" };
                html.push_str(&format!(
                    "<td style=\"text-align: {};\">{}</td>",
                    align,
                    escape_html(&cell.display())
                ));
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</tbody>\n</table>");
        html
    }
}

/// Selected columns of each matching row, labelled by file position.
pub fn raw_table(rows: &[IndexedRecord<'_>]) -> Table {
    let rows = rows
        .iter()
        .map(|(index, record)| TableRow {
            index: *index,
            cells: vec![
                Cell::Text(record.country.clone()),
                Cell::Text(record.disease_name.clone()),
                Cell::Number(record.prevalence_rate),
                Cell::Number(record.mortality_rate),
                Cell::Text(record.availability.clone()),
                Cell::Number(record.healthcare_access),
                Cell::Number(record.treatment_cost),
                Cell::Number(record.recovery_rate),
            ],
        })
        .collect();

    Table {
        headers: SELECTED_COLUMNS.to_vec(),
        rows,
    }
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    sums: [f64; NUMERIC_COLUMNS.len()],
}

/// Mean of every numeric column per disease, diseases in ascending order.
pub fn aggregate_by_disease(rows: &[IndexedRecord<'_>]) -> Table {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();

    for (_, record) in rows {
        let group = groups.entry(record.disease_name.as_str()).or_default();
        group.count += 1;
        for (sum, value) in group.sums.iter_mut().zip(record.numeric_values()) {
            *sum += value;
        }
    }

    let rows = groups
        .into_iter()
        .enumerate()
        .map(|(index, (disease, group))| {
            let mut cells = Vec::with_capacity(NUMERIC_COLUMNS.len() + 1);
            cells.push(Cell::Text(disease.to_string()));
            cells.extend(
                group
                    .sums
                    .iter()
                    .map(|sum| Cell::Number(sum / group.count as f64)),
            );
            TableRow { index, cells }
        })
        .collect();

    let mut headers = vec![COL_DISEASE_NAME];
    headers.extend(NUMERIC_COLUMNS);

    Table { headers, rows }
}

/// Significant digits kept when formatting numbers.
const SIGNIFICANT_DIGITS: i32 = 6;

/// Format like printf `%g`: six significant digits, trailing zeros trimmed,
/// exponent form below `1e-4` or from `1e6` up.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // Rounding to the kept digits first settles the exponent (999999.7 -> 1e6).
    let sci = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
