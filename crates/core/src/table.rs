//! Row and column editing for table elements.
//!
//! Each helper returns an edited copy, or `None` when the element is not a
//! table or the edit would break it (removing the last row or column, or
//! addressing a cell outside the grid). A table whose grid disagrees with
//! its declared dimensions is refused as well. Rows and columns are only
//! ever removed from the tail.

use crate::types::{ElementKind, SlideElement, TableCell, TableProps};

/// Default rectangle for a newly inserted table.
const DEFAULT_TABLE_RECT: (f64, f64, f64, f64) = (10.0, 20.0, 80.0, 40.0);

/// Create a table with `rows` x `columns` empty cells (each at least 1).
pub fn new_table(rows: usize, columns: usize, header_row: bool) -> SlideElement {
    let rows = rows.max(1);
    let columns = columns.max(1);
    let mut cells = vec![vec![TableCell::default(); columns]; rows];
    if header_row {
        for cell in &mut cells[0] {
            cell.bold = true;
        }
    }
    let props = TableProps {
        rows,
        columns,
        cells,
        header_row,
        ..TableProps::default()
    };
    let (x, y, width, height) = DEFAULT_TABLE_RECT;
    SlideElement::new(ElementKind::Table(props), x, y, width, height)
}

/// An empty cell carrying the formatting of `source`.
fn formatted_like(source: Option<&TableCell>) -> TableCell {
    let default = TableCell::default();
    match source {
        Some(cell) => TableCell {
            font_size: cell.font_size,
            font_face: cell.font_face.clone(),
            color: cell.color.clone(),
            align: cell.align,
            ..default
        },
        None => default,
    }
}

/// Clone `element` and run `edit` on its table, if it has one.
fn edit_table<F>(element: &SlideElement, edit: F) -> Option<SlideElement>
where
    F: FnOnce(&mut TableProps) -> Option<()>,
{
    let mut next = element.clone();
    match &mut next.kind {
        ElementKind::Table(table) => {
            if let Err(e) = table.validate() {
                log::warn!("Refusing to edit table {}: {}", element.id, e);
                return None;
            }
            edit(table)?;
            table.rows = table.cells.len();
            table.columns = table.cells.first().map_or(0, Vec::len);
        }
        _ => return None,
    }
    Some(next)
}

/// Append a row formatted like the first row's first cell.
pub fn add_table_row(element: &SlideElement) -> Option<SlideElement> {
    edit_table(element, |table| {
        let template = formatted_like(table.cells.first().and_then(|r| r.first()));
        let columns = table.cells.first().map_or(1, Vec::len);
        table.cells.push(vec![template; columns]);
        Some(())
    })
}

/// Drop the last row. Fails on a single-row table.
pub fn remove_table_row(element: &SlideElement) -> Option<SlideElement> {
    edit_table(element, |table| {
        if table.cells.len() <= 1 {
            return None;
        }
        table.cells.pop();
        Some(())
    })
}

/// Append a column; each new cell copies its row's first-cell formatting.
pub fn add_table_column(element: &SlideElement) -> Option<SlideElement> {
    edit_table(element, |table| {
        for row in &mut table.cells {
            let cell = formatted_like(row.first());
            row.push(cell);
        }
        Some(())
    })
}

/// Drop the last column. Fails on a single-column table.
pub fn remove_table_column(element: &SlideElement) -> Option<SlideElement> {
    edit_table(element, |table| {
        if table.cells.first().map_or(0, Vec::len) <= 1 {
            return None;
        }
        for row in &mut table.cells {
            row.pop();
        }
        Some(())
    })
}

/// Replace the cell at (`row`, `column`) wholesale.
pub fn update_table_cell(
    element: &SlideElement,
    row: usize,
    column: usize,
    cell: TableCell,
) -> Option<SlideElement> {
    edit_table(element, |table| {
        let slot = table.cells.get_mut(row)?.get_mut(column)?;
        *slot = cell;
        Some(())
    })
}
