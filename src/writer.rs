//! Encoding records and rows as CSV text.

use crate::{Config, Field, Row, SortOrder};
use indexmap::IndexSet;

/// Appends `field` to `out`, doubling delimiters and wrapping when needed.
///
/// A field is wrapped in delimiters when it contains the separator, the
/// delimiter, `\n` or `\r`.
pub(crate) fn write_field(out: &mut String, field: &Field, separator: char, delimiter: char) {
    let text = field.to_string();
    let needs_wrap = text
        .chars()
        .any(|c| c == separator || c == delimiter || c == '\n' || c == '\r');

    if !needs_wrap {
        out.push_str(&text);
        return;
    }

    out.push(delimiter);
    for c in text.chars() {
        if c == delimiter {
            out.push(delimiter);
        }
        out.push(c);
    }
    out.push(delimiter);
}

fn write_record<'f, I>(out: &mut String, fields: I, separator: char, delimiter: char)
where
    I: IntoIterator<Item = &'f Field>,
{
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        write_field(out, field, separator, delimiter);
    }
    out.push('\n');
}

/// Encodes records, one line each, every line ending in `\n`.
pub(crate) fn write_arrays(records: &[Vec<Field>], config: &Config) -> String {
    let mut out = String::new();
    for record in records {
        write_record(&mut out, record, config.separator, config.delimiter);
    }
    out
}

/// Encodes rows under a header line derived from their keys.
pub(crate) fn write_objects(rows: &[Row], config: &Config) -> String {
    let rows: Vec<Row> = match &config.transform {
        Some(transform) => rows.iter().cloned().map(|row| transform(row)).collect(),
        None => rows.to_vec(),
    };
    let columns = column_order(&rows, config.sort_order, &config.manual_order);
    tracing::debug!(columns = columns.len(), rows = rows.len(), "writing objects");

    let mut out = String::new();
    if config.headers && !columns.is_empty() {
        let header: Vec<Field> = columns.iter().map(|c| Field::from(c.as_str())).collect();
        write_record(&mut out, &header, config.separator, config.delimiter);
    }

    let empty = Field::Empty;
    for row in &rows {
        let cells = columns.iter().map(|c| row.get(c).unwrap_or(&empty));
        write_record(&mut out, cells, config.separator, config.delimiter);
    }
    out
}

fn column_order(rows: &[Row], sort_order: SortOrder, manual_order: &[String]) -> Vec<String> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for row in rows {
        seen.extend(row.keys().map(String::as_str));
    }

    let mut names: Vec<&str> = seen.into_iter().collect();
    if sort_order == SortOrder::Alpha {
        names.sort_unstable();
    }

    let mut columns: IndexSet<String> = manual_order.iter().cloned().collect();
    columns.extend(names.into_iter().map(String::from));
    columns.into_iter().collect()
}

/// Returns the column names object output would use for `rows`.
///
/// The transform hook of `config` is applied first. Names are collected in
/// first-seen order (or sorted, with [`SortOrder::Alpha`]) and the manual order
/// is placed in front.
///
/// # Examples
///
/// ```rust
/// use csv_transcode::{collect_column_names, row, Config, SortOrder};
///
/// let rows = vec![row! { "name" => "Joe", "age" => 30 }, row! { "city" => "Oslo" }];
///
/// let config = Config::new();
/// assert_eq!(collect_column_names(&rows, &config), vec!["name", "age", "city"]);
///
/// let config = config.with_sort_order(SortOrder::Alpha).with_manual_order(["name"]);
/// assert_eq!(collect_column_names(&rows, &config), vec!["name", "age", "city"]);
/// ```
pub fn collect_column_names(rows: &[Row], config: &Config) -> Vec<String> {
    match &config.transform {
        Some(transform) => {
            let rows: Vec<Row> = rows.iter().cloned().map(|row| transform(row)).collect();
            column_order(&rows, config.sort_order, &config.manual_order)
        }
        None => column_order(rows, config.sort_order, &config.manual_order),
    }
}
