use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::canvas::Canvas;
use crate::config::GameConfig;
use crate::fruit::FruitRegistry;
use crate::grid::Grid;
use crate::point::Direction;
use crate::snake::Snake;

const BACKGROUND_SHADE: u8 = 20;

/// All game state, owned in one place and handed to each phase of a tick.
pub struct World {
    grid: Grid,
    snake: Snake,
    fruits: FruitRegistry,
    fruit_floor: usize,
    rng: StdRng,
}

impl World {
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        World::with_rng(config, rng)
    }

    /// Grid, a fresh snake and a single fruit.
    pub fn with_rng(config: &GameConfig, mut rng: StdRng) -> Self {
        let grid = Grid::new();
        let snake = Snake::new(&mut rng);
        let mut fruits = FruitRegistry::new();
        fruits.add_fruit(&mut rng);

        World { grid, snake, fruits, fruit_floor: config.fruit_floor, rng }
    }

    #[cfg(test)]
    pub fn from_parts(snake: Snake, fruits: FruitRegistry, rng: StdRng) -> Self {
        World { grid: Grid::new(), snake, fruits, fruit_floor: crate::config::FRUIT_FLOOR, rng }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruits(&self) -> &FruitRegistry {
        &self.fruits
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if direction != self.snake.direction() {
            debug!("direction {:?} -> {:?}", self.snake.direction(), direction);
        }
        self.snake.set_direction(direction);
    }

    /// One frame. Eaten fruit is drawn in the consumed slot before it is
    /// evicted, so it stays visible for exactly this frame.
    pub fn tick(&mut self, canvas: &mut impl Canvas) {
        canvas.background(BACKGROUND_SHADE);

        let candidates = self.fruits.candidates();
        self.fruits.destroy_fruits(&candidates, &mut self.snake);

        self.grid.draw(canvas);
        self.fruits.draw(canvas);
        self.fruits.remove_fruits(&mut self.rng);

        self.snake.move_step();
        self.snake.draw(canvas);

        let head = self.snake.head();
        trace!("tick: head ({}, {}), length {}", head.x, head.y, self.snake.len());
    }

    /// Timer task, runs between ticks only.
    pub fn top_up(&mut self) -> bool {
        let added = self.fruits.top_up(self.fruit_floor, &mut self.rng);
        if added {
            debug!("top-up: {} fruit on the board", self.fruits.active_count());
        }
        added
    }
}
