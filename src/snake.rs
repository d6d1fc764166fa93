use rand::Rng;

use crate::canvas::{Canvas, CellColor};
use crate::point::{Direction, Point};

const INITIAL_SEGMENTS: [(i32, i32); 4] = [(0, 2), (0, 3), (0, 4), (0, 5)];

/// Segments are stored head first. There is always at least one.
pub struct Snake {
    segments: Vec<Point>,
    direction: Direction,
}

impl Snake {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut snake = Snake { segments: vec![], direction: Direction::Right };
        snake.init(rng);
        snake
    }

    #[cfg(test)]
    pub fn from_segments(segments: Vec<Point>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");
        Snake { segments, direction }
    }

    /// Resets to the four starting cells, heading somewhere random.
    pub fn init<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.direction = Direction::random(rng);
        self.segments = INITIAL_SEGMENTS.iter().map(|&p| Point::from(p)).collect();
    }

    pub fn segments(&self) -> &[Point] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn head(&self) -> Point {
        *self.segments.first().expect("snake has no segments")
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Step one cell forward, dropping the tail.
    pub fn move_step(&mut self) {
        let new_head = self.next_head();
        self.segments.pop();
        self.segments.insert(0, new_head);
    }

    /// Step one cell forward keeping the tail.
    pub fn increase(&mut self) {
        let new_head = self.next_head();
        self.segments.insert(0, new_head);
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        for segment in &self.segments {
            canvas.draw_cell(*segment, CellColor::White);
        }
    }

    fn next_head(&self) -> Point {
        self.head() + self.direction.delta()
    }
}
