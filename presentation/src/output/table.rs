//! Fixed-width ASCII tables
//!
//! ```text
//! +-------+--------+
//! | Name  | Passed |
//! +-------+--------+
//! | hello | true   |
//! +-------+--------+
//! ```

/// A plain-text table with one header row.
#[derive(Debug, Clone, Default)]
pub struct AsciiTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl AsciiTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Adds a row. Missing cells render empty, extra cells are dropped.
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .map(|c| single_line(&c.into()))
            .take(self.headers.len())
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        self.render_styled(|_, _, cell| cell.to_string())
    }

    /// Renders the table, passing every padded body cell through `style`
    /// as `(row, column, padded)`. Styling after padding keeps escape codes
    /// out of the width computation.
    pub fn render_styled<F>(&self, style: F) -> String
    where
        F: Fn(usize, usize, &str) -> String,
    {
        let widths = self.column_widths();
        let separator = separator_line(&widths);

        let mut out = String::new();
        out.push_str(&separator);
        out.push_str(&content_line(&self.headers, &widths, |_, padded| {
            padded.to_string()
        }));
        out.push_str(&separator);

        for (row_index, row) in self.rows.iter().enumerate() {
            out.push_str(&content_line(row, &widths, |column, padded| {
                style(row_index, column, padded)
            }));
        }

        if !self.rows.is_empty() {
            out.push_str(&separator);
        }

        out
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                self.rows
                    .iter()
                    .map(|row| row[column].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

fn separator_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn content_line<F>(cells: &[String], widths: &[usize], style: F) -> String
where
    F: Fn(usize, &str) -> String,
{
    let mut line = String::from("|");
    for (column, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let pad = width - cell.chars().count();
        let padded = format!("{}{}", cell, " ".repeat(pad));
        line.push(' ');
        line.push_str(&style(column, &padded));
        line.push_str(" |");
    }
    line.push('\n');
    line
}
