// crates/mht-layout/src/grid.rs

/// A grid cell: either an item or filler that keeps the row's cell widths
/// uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell<T> {
    Item(T),
    Placeholder,
}

impl<T> GridCell<T> {
    pub fn item(&self) -> Option<&T> {
        match self {
            GridCell::Item(item) => Some(item),
            GridCell::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, GridCell::Placeholder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow<T> {
    pub cells: Vec<GridCell<T>>,
}

impl<T> GridRow<T> {
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.cells.iter().filter_map(GridCell::item)
    }
}

/// Split `items` into rows of exactly `columns` cells, preserving input order.
/// The final row is padded with placeholders rather than stretching the
/// remaining items. Zero columns is treated as one.
pub fn pack_into_rows<T, I>(items: I, columns: usize) -> Vec<GridRow<T>>
where
    I: IntoIterator<Item = T>,
{
    let columns = columns.max(1);
    let mut rows = Vec::new();
    let mut current = Vec::with_capacity(columns);

    for item in items {
        current.push(GridCell::Item(item));
        if current.len() == columns {
            rows.push(GridRow {
                cells: std::mem::replace(&mut current, Vec::with_capacity(columns)),
            });
        }
    }

    if !current.is_empty() {
        current.resize_with(columns, || GridCell::Placeholder);
        rows.push(GridRow { cells: current });
    }

    rows
}

/// Width of one cell when `columns` cells share `available` width with
/// `spacing` between neighbours.
pub fn cell_width(available: f32, columns: usize, spacing: f32) -> f32 {
    let columns = columns.max(1) as f32;
    ((available - spacing * (columns - 1.0)) / columns).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use GridCell::{Item, Placeholder};

    #[test]
    fn test_five_items_two_columns() {
        let rows = pack_into_rows(['A', 'B', 'C', 'D', 'E'], 2);
        let cells: Vec<Vec<GridCell<char>>> = rows.into_iter().map(|row| row.cells).collect();
        assert_eq!(
            cells,
            vec![
                vec![Item('A'), Item('B')],
                vec![Item('C'), Item('D')],
                vec![Item('E'), Placeholder],
            ]
        );
    }

    #[test]
    fn test_exact_fit_has_no_placeholders() {
        let rows = pack_into_rows(1..=6, 3);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.cells.iter().all(|cell| !cell.is_placeholder())));
    }

    #[test]
    fn test_order_preserved() {
        let rows = pack_into_rows(0..7, 3);
        let flattened: Vec<i32> = rows.iter().flat_map(|row| row.items().copied()).collect();
        assert_eq!(flattened, (0..7).collect::<Vec<_>>());
        assert_eq!(rows[2].cells, vec![Item(6), Placeholder, Placeholder]);
    }

    #[test]
    fn test_empty_and_zero_columns() {
        assert!(pack_into_rows(Vec::<u8>::new(), 3).is_empty());
        let rows = pack_into_rows([1, 2], 0);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_cell_width() {
        assert_eq!(cell_width(640.0, 3, 20.0), 200.0);
        assert_eq!(cell_width(300.0, 1, 16.0), 300.0);
        assert_eq!(cell_width(10.0, 3, 20.0), 0.0);
    }
}
