//! Table formatting utilities

use prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE;
use prettytable::{Cell, Row, Table};

/// Empty table with bold column titles
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        headers
            .iter()
            .map(|title| Cell::new(title).style_spec("b"))
            .collect(),
    ));
    table
}

/// Append one row; cells are written as given
pub fn add_table_row<I, S>(table: &mut Table, cells: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    table.add_row(Row::new(
        cells
            .into_iter()
            .map(|cell| Cell::new(cell.as_ref()))
            .collect(),
    ));
}
