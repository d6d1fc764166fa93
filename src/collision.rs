use crate::point::Point;
use crate::snake::Snake;

/// True when `point` lies on any segment of the snake, not only the head.
pub fn collides(snake: &Snake, point: Point) -> bool {
    body_contains(snake.segments(), point)
}

fn body_contains(segments: &[Point], point: Point) -> bool {
    segments.iter().any(|segment| *segment == point)
}
