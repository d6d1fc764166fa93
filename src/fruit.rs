use log::debug;
use rand::Rng;

use crate::canvas::{Canvas, CellColor};
use crate::collision::collides;
use crate::config::{COL_NUM, ROW_NUM};
use crate::point::Point;
use crate::snake::Snake;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fruit {
    pos: Point,
    destroyed: bool,
}

impl Fruit {
    pub fn new(pos: Point) -> Self {
        Fruit { pos, destroyed: false }
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        let color = if self.is_destroyed() { CellColor::Black } else { CellColor::Green };
        canvas.draw_cell(self.pos(), color);
    }
}

/// Every fruit currently on the board, eaten ones included until the next
/// removal pass.
pub struct FruitRegistry {
    fruits: Vec<Fruit>,
}

impl FruitRegistry {
    pub fn new() -> Self {
        FruitRegistry { fruits: vec![] }
    }

    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    pub fn len(&self) -> usize {
        self.fruits.len()
    }

    pub fn active_count(&self) -> usize {
        self.fruits.iter().filter(|f| !f.destroyed).count()
    }

    #[cfg(test)]
    pub fn push(&mut self, fruit: Fruit) {
        self.fruits.push(fruit);
    }

    /// Spawns one fruit on a random grid cell. The cell may already hold the
    /// snake or another fruit.
    pub fn add_fruit<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Point {
        let pos = Point::new(rng.gen_range(0..ROW_NUM), rng.gen_range(0..COL_NUM));
        self.fruits.push(Fruit::new(pos));
        debug!("fruit spawned at ({}, {})", pos.x, pos.y);
        pos
    }

    /// Indices of the fruit still eligible for collision this tick.
    pub fn candidates(&self) -> Vec<usize> {
        self.fruits
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.destroyed)
            .map(|(i, _)| i)
            .collect()
    }

    /// Marks every candidate lying anywhere on the snake as destroyed and
    /// grows the snake once for each. Returns how many were eaten.
    pub fn destroy_fruits(&mut self, candidates: &[usize], snake: &mut Snake) -> usize {
        let mut eaten = 0;

        for &idx in candidates {
            let fruit = &mut self.fruits[idx];
            if fruit.destroyed || !collides(snake, fruit.pos) {
                continue;
            }

            snake.increase();
            fruit.destroyed = true;
            eaten += 1;
            debug!("fruit eaten at ({}, {}), snake length {}", fruit.pos.x, fruit.pos.y, snake.len());
        }

        eaten
    }

    /// Evicts every destroyed fruit and spawns one replacement for each.
    pub fn remove_fruits<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let before = self.fruits.len();
        self.fruits.retain(|f| !f.destroyed);
        let removed = before - self.fruits.len();

        for _ in 0..removed {
            self.add_fruit(rng);
        }

        removed
    }

    /// Adds a single fruit when the registry holds fewer than `floor`.
    pub fn top_up<R: Rng + ?Sized>(&mut self, floor: usize, rng: &mut R) -> bool {
        if self.fruits.len() >= floor {
            return false;
        }

        self.add_fruit(rng);
        true
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        for fruit in self.fruits() {
            fruit.draw(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::RecordingCanvas;
    use crate::point::Direction::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn start_snake() -> Snake {
        Snake::from_segments(
            vec![Point::new(0, 2), Point::new(0, 3), Point::new(0, 4), Point::new(0, 5)],
            Right,
        )
    }

    #[test]
    fn test_add_fruit_in_grid() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut registry = FruitRegistry::new();

        for _ in 0..500 {
            let pos = registry.add_fruit(&mut rng);
            assert!(pos.x >= 0 && pos.x < ROW_NUM);
            assert!(pos.y >= 0 && pos.y < COL_NUM);
        }

        assert_eq!(registry.len(), 500);
        assert_eq!(registry.active_count(), 500);
    }

    #[test]
    fn test_fruit_under_body_is_eaten() {
        let mut snake = start_snake();
        let mut registry = FruitRegistry::new();
        registry.push(Fruit::new(Point::new(0, 4)));

        let candidates = registry.candidates();
        let eaten = registry.destroy_fruits(&candidates, &mut snake);

        assert_eq!(eaten, 1);
        assert!(registry.fruits()[0].is_destroyed());
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head(), Point::new(1, 2));
    }

    #[test]
    fn test_fruit_elsewhere_is_left_alone() {
        let mut snake = start_snake();
        let mut registry = FruitRegistry::new();
        registry.push(Fruit::new(Point::new(7, 7)));

        let candidates = registry.candidates();
        assert_eq!(registry.destroy_fruits(&candidates, &mut snake), 0);
        assert!(!registry.fruits()[0].is_destroyed());
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_one_growth_per_fruit() {
        let mut snake = start_snake();
        let mut registry = FruitRegistry::new();
        registry.push(Fruit::new(Point::new(0, 3)));
        registry.push(Fruit::new(Point::new(0, 3)));
        registry.push(Fruit::new(Point::new(0, 5)));

        let candidates = registry.candidates();
        assert_eq!(registry.destroy_fruits(&candidates, &mut snake), 3);
        assert_eq!(snake.len(), 7);
    }

    #[test]
    fn test_destroyed_fruit_is_not_a_candidate() {
        let mut snake = start_snake();
        let mut registry = FruitRegistry::new();
        registry.push(Fruit::new(Point::new(0, 2)));
        registry.push(Fruit::new(Point::new(8, 8)));

        let candidates = registry.candidates();
        registry.destroy_fruits(&candidates, &mut snake);
        assert_eq!(registry.candidates(), vec![1]);

        // a second pass over stale indices must not eat it twice
        registry.destroy_fruits(&candidates, &mut snake);
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn test_remove_pairs_each_eviction_with_a_spawn() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut snake = start_snake();
        let mut registry = FruitRegistry::new();
        // adjacent destroyed entries must both go
        registry.push(Fruit::new(Point::new(0, 2)));
        registry.push(Fruit::new(Point::new(0, 3)));
        registry.push(Fruit::new(Point::new(9, 9)));
        registry.push(Fruit::new(Point::new(0, 5)));

        let candidates = registry.candidates();
        registry.destroy_fruits(&candidates, &mut snake);
        let len_before = registry.len();
        let active_before = registry.active_count();

        let removed = registry.remove_fruits(&mut rng);

        assert_eq!(removed, 3);
        assert_eq!(registry.len(), len_before);
        assert!(registry.fruits().iter().all(|f| !f.is_destroyed()));
        assert_eq!(registry.fruits()[0].pos(), Point::new(9, 9));
        assert_eq!(registry.active_count(), active_before + removed);
    }

    #[test]
    fn test_remove_without_destroyed_is_noop() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut registry = FruitRegistry::new();
        registry.push(Fruit::new(Point::new(1, 1)));

        assert_eq!(registry.remove_fruits(&mut rng), 0);
        assert_eq!(registry.fruits(), &[Fruit::new(Point::new(1, 1))]);
    }

    #[test]
    fn test_top_up_below_floor() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut registry = FruitRegistry::new();
        for _ in 0..4 {
            registry.add_fruit(&mut rng);
        }

        assert!(registry.top_up(5, &mut rng));
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_top_up_at_floor() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut registry = FruitRegistry::new();
        for _ in 0..5 {
            registry.add_fruit(&mut rng);
        }

        assert!(!registry.top_up(5, &mut rng));
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_draw_uses_consumed_slot() {
        let mut snake = start_snake();
        let mut registry = FruitRegistry::new();
        registry.push(Fruit::new(Point::new(0, 2)));
        registry.push(Fruit::new(Point::new(3, 3)));
        let candidates = registry.candidates();
        registry.destroy_fruits(&candidates, &mut snake);

        let mut canvas = RecordingCanvas::default();
        registry.draw(&mut canvas);

        assert_eq!(canvas.cells_of(CellColor::Black), vec![Point::new(0, 2)]);
        assert_eq!(canvas.cells_of(CellColor::Green), vec![Point::new(3, 3)]);
    }
}
