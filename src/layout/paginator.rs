use super::{
    config::LayoutConfig,
    geometry::{Point, Rect, Size},
};
use crate::error::{Error, Result};

/// Fixed grid of equally sized cells on a physical page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub page_size: Size,
    pub columns: u32,
    pub rows: u32,
}

impl GridSpec {
    pub fn new(page_size: Size, columns: u32, rows: u32) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(Error::Validation(format!(
                "label grid needs at least one cell, got {columns}x{rows}"
            )));
        }
        Ok(Self {
            page_size,
            columns,
            rows,
        })
    }

    pub fn capacity(&self) -> u32 {
        self.columns * self.rows
    }

    pub fn cell_size(&self) -> Size {
        Size::new(
            self.page_size.width / self.columns as f32,
            self.page_size.height / self.rows as f32,
        )
    }
}

impl TryFrom<&LayoutConfig> for GridSpec {
    type Error = Error;

    fn try_from(config: &LayoutConfig) -> Result<Self> {
        GridSpec::new(config.page_size, config.columns, config.rows)
    }
}

/// Where one label of a run lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPlacement {
    /// 0-based running index within the run
    pub index: u32,
    /// 0-based page number
    pub page: u32,
    /// 0 is the top row
    pub row: u32,
    pub column: u32,
    /// Bottom-left corner in page coordinates
    pub origin: Point,
    pub size: Size,
    /// The previous page is full and this cell opens a new one
    pub starts_new_page: bool,
}

impl CellPlacement {
    pub fn rect(&self) -> Rect {
        Rect {
            origin: self.origin,
            size: self.size,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    grid: GridSpec,
}

impl Paginator {
    pub fn new(grid: GridSpec) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn page_count(&self, total: u32) -> u32 {
        total.div_ceil(self.grid.capacity())
    }

    pub fn place(&self, index: u32) -> CellPlacement {
        let capacity = self.grid.capacity();
        let slot = index % capacity;
        let row = slot / self.grid.columns;
        let column = slot % self.grid.columns;
        let size = self.grid.cell_size();

        // PDF y grows upward, so row 0 sits against the top edge.
        let origin = Point::new(
            column as f32 * size.width,
            self.grid.page_size.height - (row + 1) as f32 * size.height,
        );

        CellPlacement {
            index,
            page: index / capacity,
            row,
            column,
            origin,
            size,
            starts_new_page: slot == 0 && index != 0,
        }
    }

    /// Placements for a run of `total` labels, in print order.
    pub fn cells(&self, total: u32) -> impl Iterator<Item = CellPlacement> + '_ {
        (0..total).map(move |index| self.place(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator() -> Paginator {
        Paginator::new(GridSpec::try_from(&LayoutConfig::default()).unwrap())
    }

    #[test]
    fn empty_grid_is_rejected() {
        let config = LayoutConfig {
            columns: 0,
            ..LayoutConfig::default()
        };
        assert!(matches!(GridSpec::try_from(&config), Err(Error::Validation(_))));
        assert!(GridSpec::new(config.page_size, 2, 0).is_err());
    }

    #[test]
    fn page_boundary_only_after_a_full_page() {
        let p = paginator();
        let breaks: Vec<u32> = p
            .cells(25)
            .filter(|c| c.starts_new_page)
            .map(|c| c.index)
            .collect();
        assert_eq!(breaks, [8, 16, 24]);
        assert!(!p.place(0).starts_new_page);
    }

    #[test]
    fn page_count_rounds_up() {
        let p = paginator();
        assert_eq!(p.page_count(1), 1);
        assert_eq!(p.page_count(8), 1);
        assert_eq!(p.page_count(9), 2);
        assert_eq!(p.page_count(10), 2);
        assert_eq!(p.page_count(16), 2);
        assert_eq!(p.page_count(17), 3);
    }

    #[test]
    fn cells_fill_rows_left_to_right_from_the_top() {
        let p = paginator();
        let page_height = p.grid().page_size.height;
        let cell = p.grid().cell_size();

        let first = p.place(0);
        assert_eq!((first.row, first.column), (0, 0));
        assert!((first.rect().top() - page_height).abs() < 1e-3);

        let second = p.place(1);
        assert_eq!((second.row, second.column), (0, 1));
        assert!((second.origin.x - cell.width).abs() < 1e-3);

        let last = p.place(7);
        assert_eq!((last.row, last.column, last.page), (3, 1, 0));
        assert!(last.origin.y.abs() < 1e-3);

        let wrapped = p.place(9);
        assert_eq!((wrapped.page, wrapped.row, wrapped.column), (1, 0, 1));
    }

    #[test]
    fn cells_tile_the_page_exactly() {
        let p = paginator();
        let page = Rect {
            origin: Point::new(0.0, 0.0),
            size: p.grid().page_size,
        };
        let area: f32 = p
            .cells(8)
            .map(|c| {
                assert!(page.contains_rect(&c.rect()));
                c.size.width * c.size.height
            })
            .sum();
        let page_area = page.size.width * page.size.height;
        assert!((area - page_area).abs() / page_area < 1e-4);
    }
}
