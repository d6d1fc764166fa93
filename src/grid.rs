use crate::canvas::{Canvas, CellColor};
use crate::config::{COL_NUM, ROW_NUM};
use crate::point::Point;

/// Backdrop of `rows` x `cols` cells. Holds no gameplay state.
pub struct Grid {
    rows: i32,
    cols: i32,
}

impl Grid {
    pub fn new() -> Self {
        Grid::with_size(ROW_NUM, COL_NUM)
    }

    pub fn with_size(rows: i32, cols: i32) -> Self {
        Grid { rows, cols }
    }

    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| Point::new(x, y)))
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        for cell in self.cells() {
            canvas.draw_cell(cell, CellColor::Red);
        }
    }
}
