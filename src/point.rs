use std::ops::Add;

use rand::Rng;
use Direction::*;

/// A grid cell coordinate. Not clamped to the grid, the snake may walk off it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub const DIRECTIONS: [Direction; 4] = [Right, Left, Up, Down];

impl Direction {
    /// Unit vector in grid space, y grows downwards.
    pub fn delta(&self) -> Point {
        match self {
            Up => Point::new(0, -1),
            Down => Point::new(0, 1),
            Left => Point::new(-1, 0),
            Right => Point::new(1, 0),
        }
    }

    /// Uniform over all four, the current heading is not excluded.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())]
    }
}
