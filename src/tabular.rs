//! Header-keyed decoding.
//!
//! The header line is fetched and decoded on its own, then every data line in
//! the window is decoded with its own physical row number and zipped against
//! the header by column index.

use crate::hooks::HookOutcome;
use crate::lexer::TokenPattern;
use crate::lines::{split_lines, ScanMode};
use crate::{parser, Config, Field, ParsePosition, Result, Row};

pub(crate) fn parse_rows(
    pattern: &TokenPattern,
    config: &Config,
    text: &str,
    position: &mut ParsePosition,
) -> Result<Vec<Row>> {
    let mut header_position = ParsePosition::new();
    let header_lines = split_lines(
        pattern,
        text,
        Some(1),
        Some(1),
        ScanMode::StopAtEnd,
        &mut header_position,
    )?;
    let Some(header_line) = header_lines.first() else {
        return Ok(Vec::new());
    };
    let header: Vec<String> =
        parser::parse_line(pattern, &header_line.text, None, &mut ParsePosition::new())?
            .into_iter()
            .map(String::from)
            .collect();

    // The window is relative to the row the caller's position starts on.
    let offset = position.row_num.saturating_sub(1);
    let (start, end) = config.physical_window();
    let lines = split_lines(
        pattern,
        text,
        Some(start.unwrap_or(2) + offset),
        end.map(|end| end + offset),
        ScanMode::CountAll,
        position,
    )?;

    let mut rows = Vec::with_capacity(lines.len());
    for line in lines {
        let mut line_position = ParsePosition::at_row(line.row_num);
        let record = parser::parse_line(
            pattern,
            &line.text,
            config.on_parse_value.as_ref(),
            &mut line_position,
        )?;

        let record = match &config.on_parse_entry {
            Some(hook) => match hook(record, &line_position) {
                HookOutcome::Keep(record) => record,
                HookOutcome::Skip => {
                    tracing::trace!(row = line.row_num, "row skipped by hook");
                    continue;
                }
            },
            None => record,
        };

        if record.len() > header.len() {
            tracing::warn!(
                row = line.row_num,
                fields = record.len(),
                columns = header.len(),
                "dropping fields beyond the header"
            );
        }

        let mut cells = record.into_iter();
        let row: Row = header
            .iter()
            .map(|name| (name.clone(), cells.next().unwrap_or(Field::Empty)))
            .collect();

        rows.push(match &config.transform {
            Some(transform) => transform(row),
            None => row,
        });
    }

    Ok(rows)
}
