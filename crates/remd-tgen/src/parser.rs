//! Parse the generator's HTML response into numbers.
//!
//! The result page carries the temperature ladder twice: once as a
//! comma-separated list right after a fixed sentence, and once in the second
//! table together with the energy statistics for each replica.

use scraper::{ElementRef, Html, Node, Selector};

use crate::params::normalize_phrase;
use crate::types::{EnergyRecord, RemdError, RemdResult};

/// Sentence that precedes the comma-separated temperature list.
pub const TEMPERATURES_MARKER: &str = "we also give the temperatures below";

/// Index of the results table among all `<table>` elements.
pub const RESULTS_TABLE_INDEX: usize = 1;

/// Extract the temperature ladder (K) from a response page.
pub fn parse_temperatures(html: &str) -> RemdResult<Vec<f64>> {
    let document = Html::parse_document(html);
    let marker = normalize_phrase(TEMPERATURES_MARKER);

    let heading = find_innermost(&document, |el| element_text(el).contains(&marker))
        .ok_or_else(|| RemdError::MarkerNotFound(TEMPERATURES_MARKER.to_string()))?;

    let list = next_sibling_text(heading).ok_or(RemdError::TemperatureListNotFound)?;
    parse_number_list(&list)
}

/// Extract the temperatures/energies table from a response page.
///
/// Each row holds every cell after the label cell; empty cells become NaN.
pub fn parse_temperature_table(html: &str) -> RemdResult<Vec<Vec<f64>>> {
    let document = Html::parse_document(html);
    let table = nth_table(&document, RESULTS_TABLE_INDEX)
        .ok_or(RemdError::TableNotFound(RESULTS_TABLE_INDEX))?;
    read_table(table)
}

/// Like [`parse_temperature_table`], keeping only full six-column rows.
///
/// Rows of any other width are logged and left out.
pub fn parse_energy_records(html: &str) -> RemdResult<Vec<EnergyRecord>> {
    let rows = parse_temperature_table(html)?;
    Ok(rows
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| match EnergyRecord::try_from(row.as_slice()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping table row {idx}: {e}");
                None
            }
        })
        .collect())
}

/// Split a comma-separated list into numbers, in source order.
pub fn parse_number_list(text: &str) -> RemdResult<Vec<f64>> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<f64>().map_err(|_| RemdError::InvalidNumber {
                value: t.to_string(),
                context: "temperature list".to_string(),
            })
        })
        .collect()
}

/// Read every data row of a table, skipping the label cell.
///
/// Rows with fewer than two `<td>` cells (headers, spacers) are ignored.
pub fn read_table(table: ElementRef<'_>) -> RemdResult<Vec<Vec<f64>>> {
    let tr = Selector::parse("tr").unwrap();
    let td = Selector::parse("td").unwrap();

    let mut rows = Vec::new();
    for (row_idx, row) in table.select(&tr).enumerate() {
        let cells: Vec<ElementRef<'_>> = row.select(&td).collect();
        if cells.len() < 2 {
            continue;
        }

        let mut values = Vec::with_capacity(cells.len() - 1);
        for (col_idx, cell) in cells.iter().enumerate().skip(1) {
            let text = cell.text().collect::<String>();
            let text = text.trim();
            if text.is_empty() {
                values.push(f64::NAN);
                continue;
            }
            let value = text.parse::<f64>().map_err(|_| RemdError::InvalidNumber {
                value: text.to_string(),
                context: format!("table row {row_idx}, column {col_idx}"),
            })?;
            values.push(value);
        }
        rows.push(values);
    }
    Ok(rows)
}

/// The `n`th `<table>` in document order (zero-based).
pub fn nth_table(document: &Html, n: usize) -> Option<ElementRef<'_>> {
    let sel = Selector::parse("table").unwrap();
    document.select(&sel).nth(n)
}

/// First element in document order matching `pred`.
pub fn find_first<'a, F>(document: &'a Html, mut pred: F) -> Option<ElementRef<'a>>
where
    F: FnMut(ElementRef<'a>) -> bool,
{
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| pred(*el))
}

/// First element matching `pred` none of whose child elements also match.
///
/// An ancestor's text contains all of its descendants' text, so a plain
/// document-order search on text content would return `<html>`.
pub fn find_innermost<'a, F>(document: &'a Html, pred: F) -> Option<ElementRef<'a>>
where
    F: Fn(ElementRef<'a>) -> bool,
{
    find_first(document, |el| {
        pred(el) && !el.children().filter_map(ElementRef::wrap).any(&pred)
    })
}

/// Text of the first meaningful node after `el`, skipping `<br>` and blanks.
fn next_sibling_text(el: ElementRef<'_>) -> Option<String> {
    for sibling in el.next_siblings() {
        let text = match sibling.value() {
            Node::Text(t) => t.trim().to_string(),
            Node::Element(e) if e.name() == "br" => continue,
            Node::Element(_) => ElementRef::wrap(sibling)?
                .text()
                .collect::<String>()
                .trim()
                .to_string(),
            _ => continue,
        };
        if !text.is_empty() {
            return Some(text);
        }
    }
    None
}

fn element_text(el: ElementRef<'_>) -> String {
    normalize_phrase(&el.text().collect::<String>())
}
