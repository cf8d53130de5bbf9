//! Column-aligned tables.

use unicode_width::UnicodeWidthStr;

use crate::config::PromptConfig;
use crate::error::Result;
use crate::terminal::TerminalIo;

const COLUMN_GAP: &str = "  ";

/// A static table: one header row, a separator and any number of rows.
///
/// ```text
/// Name   Role
/// ─────  ────────
/// Ada    engineer
/// Grace  admiral
/// ```
///
/// The header decides the column count. Short rows are padded with empty
/// cells and extra cells are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells);
        self
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = self.headers.len();
        let mut row: Vec<String> = cells.into_iter().take(columns).map(Into::into).collect();
        row.resize(columns, String::new());
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Display width of each column: the widest cell, header included.
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| row[i].width())
                    .chain(std::iter::once(header.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Header, separator and rows as unstyled lines.
    pub fn render_lines(&self) -> Vec<String> {
        let widths = self.column_widths();
        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(format_row(&self.headers, &widths));
        lines.push(separator);
        lines.extend(self.rows.iter().map(|row| format_row(row, &widths)));
        lines
    }

    /// Print through `term`, header in the prompt style and separator in
    /// the hint style of the active configuration.
    pub fn print(&self, term: &mut dyn TerminalIo) -> Result<()> {
        if self.headers.is_empty() {
            return Ok(());
        }
        let config = PromptConfig::resolve(None);
        for (i, line) in self.render_lines().iter().enumerate() {
            match i {
                0 => term.println(&(config.prompt)(line))?,
                1 => term.println(&(config.hint)(line))?,
                _ => term.println(line)?,
            }
        }
        term.flush()?;
        Ok(())
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_string()
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{cell}{}", " ".repeat(fill))
}
