//! Right-aligned column layout.
//!
//! Widths are measured on the plain cell text and colors are applied after
//! padding, so enabling colors never shifts a column.

use super::color::Color;
use std::borrow::Cow;
use std::io::{self, Write};

/// One table cell.
#[derive(Debug, Clone)]
pub(crate) struct Cell<'a> {
    text: Cow<'a, str>,
    color: Option<Color>,
}

impl<'a> Cell<'a> {
    pub(crate) fn plain(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub(crate) fn colored(text: impl Into<Cow<'a, str>>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// Rows of cells, every column right-aligned to its widest cell plus padding.
#[derive(Debug)]
pub(crate) struct Table<'a> {
    padding: usize,
    rows: Vec<Vec<Cell<'a>>>,
}

impl<'a> Table<'a> {
    pub(crate) fn new(padding: usize) -> Self {
        Self {
            padding,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, row: Vec<Cell<'a>>) {
        self.rows.push(row);
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = Vec::new();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i == widths.len() {
                    widths.push(0);
                }
                widths[i] = widths[i].max(cell.width());
            }
        }
        widths
    }

    /// Writes every row; stops at the first failed write.
    pub(crate) fn write_to<W: Write + ?Sized>(&self, out: &mut W, colors: bool) -> io::Result<()> {
        let widths = self.column_widths();
        for row in &self.rows {
            let mut line = String::new();
            for (cell, width) in row.iter().zip(&widths) {
                let pad = width + self.padding - cell.width();
                line.push_str(&" ".repeat(pad));
                match cell.color {
                    Some(color) => line.push_str(&color.paint(&cell.text, colors)),
                    None => line.push_str(&cell.text),
                }
            }
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}
