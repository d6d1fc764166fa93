use crate::point::Point;

/// The four palette slots. The names are slots, not literal colors: `Red` is
/// the grid backdrop and shows up as teal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellColor {
    Red,
    Black,
    Green,
    White,
}

/// Immediate-mode drawing surface the game renders onto each frame.
pub trait Canvas {
    /// Fill the whole canvas with a grey level.
    fn background(&mut self, shade: u8);

    /// Paint one grid cell. Cells off the canvas are silently clipped.
    fn draw_cell(&mut self, pos: Point, color: CellColor);
}
