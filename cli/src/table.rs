// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// A column of a [`Table`] over rows of type `T`.
pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

/// A plain text table: a bold header, then one padded row per item.
pub struct Table<'a, T, C: TableColumn<T>> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'a str,
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: "  ",
        }
    }

    fn widths(&self, header: &[Cow<'_, str>], rows: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
        let mut widths: Vec<usize> = header.iter().map(|a| a.width()).collect();
        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }
        widths
    }
}

impl<T, C: TableColumn<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<_> = self.columns.iter().map(|c| c.name()).collect();
        let rows: Vec<Vec<_>> = self
            .data
            .iter()
            .map(|item| self.columns.iter().map(|c| c.format(item)).collect())
            .collect();
        let widths = self.widths(&header, &rows);
        let last = self.columns.len().saturating_sub(1);

        for (i, ((col, name), width)) in self.columns.iter().zip(&header).zip(&widths).enumerate() {
            let cell = pad(name, *width, col.padding_direction(), i == last);
            write!(f, "{}", cell.bold())?;
            if i < last {
                write!(f, "{}", self.separator)?;
            }
        }
        writeln!(f)?;

        for (item, row) in self.data.iter().zip(&rows) {
            for (i, ((col, cell), width)) in self.columns.iter().zip(row).zip(&widths).enumerate() {
                let cell = pad(cell, *width, col.padding_direction(), i == last);
                match col.color(item) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }
                if i < last {
                    write!(f, "{}", self.separator)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn pad(cell: &str, width: usize, direction: PaddingDirection, is_last: bool) -> String {
    // last column does not need padding if it's left-aligned
    let fill = width.saturating_sub(cell.width());
    match direction {
        PaddingDirection::Left if is_last => cell.to_string(),
        PaddingDirection::Left => format!("{cell}{}", " ".repeat(fill)),
        PaddingDirection::Right => format!("{}{cell}", " ".repeat(fill)),
    }
}
