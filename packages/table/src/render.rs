//! Plain-text rendering for terminals.

use std::fmt;

use console::measure_text_width;

use crate::Table;

/// Widest cell per column, headers included, in terminal columns.
fn column_widths(table: &Table) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| measure_text_width(h)).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }
    widths
}

fn write_row<S: AsRef<str>>(f: &mut fmt::Formatter<'_>, cells: &[S], widths: &[usize]) -> fmt::Result {
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let cell = cell.as_ref();
        if i > 0 {
            f.write_str(" | ")?;
        }
        f.write_str(cell)?;
        if i + 1 < widths.len() {
            let pad = width.saturating_sub(measure_text_width(cell));
            write!(f, "{:pad$}", "")?;
        }
    }
    writeln!(f)
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = column_widths(self);
        write_row(f, &self.headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(f, &rule, &widths)?;
        for row in &self.rows {
            write_row(f, row, &widths)?;
        }
        Ok(())
    }
}

/// Renders `table` under `title`, followed by a row count.
#[must_use]
pub fn render(title: &str, table: &Table) -> String {
    format!("{title}\n\n{table}({} row(s))\n", table.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_padded_to_the_widest_cell() {
        let mut table = Table::new(&["Name", "Fare"]);
        table.push_row(vec!["Orange Travels".to_owned(), "₹ 899".to_owned()]).unwrap();
        table.push_row(vec!["A".to_owned(), "₹ 1,050".to_owned()]).unwrap();

        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name           | Fare");
        assert_eq!(lines[1], "-------------- | -------");
        assert_eq!(lines[2], "Orange Travels | ₹ 899");
        assert_eq!(lines[3], "A              | ₹ 1,050");
    }

    #[test]
    fn render_includes_title_and_count() {
        let table = Table::new(&["Train Name"]);
        let out = render("Train Details", &table);
        assert!(out.starts_with("Train Details\n"));
        assert!(out.ends_with("(0 row(s))\n"));
    }
}
