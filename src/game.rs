use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::KeyEvent;
use log::{debug, info};

use crate::clock::Interval;
use crate::config::GameConfig;
use crate::input::{command_for, Command};
use crate::term::TermManager;
use crate::world::World;

/// Upper bound on how long one loop iteration blocks waiting for input.
const MAX_POLL_WAIT: Duration = Duration::from_millis(5);

pub struct SnakeGame {
    config: GameConfig,
    paused: bool,
    term: TermManager,
}

/// What the loop should do after handling queued input.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Self {
        SnakeGame { config, paused: false, term: TermManager::new() }
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()?;
        self.term.clear()?;
        self.term.draw_borders()
    }

    /// Returns false if the player quit from the intro screen.
    pub fn show_intro(&mut self) -> Result<bool> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "q or CTRL+C to quit",
            "",
            "Press any key to begin",
        ];

        self.term.show_message(lines)?;
        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;

        Ok(command_for(&key) != Some(Command::Quit))
    }

    /// Runs until the player quits. There is no game over.
    pub fn play(&mut self) -> Result<()> {
        let mut world = World::new(&self.config);

        let start = Instant::now();
        let mut frame = Interval::new(self.config.frame_interval(), start);
        let mut top_up = Interval::new(self.config.top_up_interval, start);

        info!(
            "playing at {} fps, top-up every {:?}",
            self.config.frame_rate, self.config.top_up_interval
        );

        loop {
            // Input, then the frame, then the top-up: a direction change is
            // always seen by the next move, and the top-up never lands mid-tick.
            let wait = if self.paused {
                MAX_POLL_WAIT
            } else {
                frame.until_next(Instant::now()).min(MAX_POLL_WAIT)
            };
            let events = self.term.read_key_events_queue(wait)?;

            let was_paused = self.paused;
            if self.apply_input(&events, &mut world)? == Flow::Quit {
                info!(
                    "quit requested, snake length {}, {} fruit on the board",
                    world.snake().len(),
                    world.fruits().len()
                );
                return Ok(());
            }

            if self.paused {
                continue;
            }

            let now = Instant::now();
            if was_paused {
                frame.reset(now);
                top_up.reset(now);
            }

            if frame.fire(now) {
                world.tick(&mut self.term);
                self.term.flush()?;
            }

            if top_up.fire(now) {
                world.top_up();
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn apply_input(&mut self, events: &[KeyEvent], world: &mut World) -> Result<Flow> {
        for ev in events {
            match command_for(ev) {
                Some(Command::Quit) => return Ok(Flow::Quit),
                Some(Command::TogglePause) => self.toggle_pause()?,
                Some(Command::Turn(dir)) if !self.paused => world.set_direction(dir),
                _ => {}
            }
        }

        Ok(Flow::Continue)
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or q to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        debug!("paused: {}", self.paused);
        Ok(())
    }

    pub fn shutdown(&mut self) {
        self.term.restore();
    }
}
