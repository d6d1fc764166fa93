use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};
use log::error;

use crate::canvas::{Canvas, CellColor};
use crate::config::{CANVAS_COLS, CANVAS_ROWS};
use crate::point::Point;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

/// Terminal columns per grid cell, keeps cells roughly square.
const CELL_CHARS: &str = "  ";
const CELL_CHAR_WIDTH: TermInt = 2;
/// Top left corner of the canvas, inside the border.
const ORIGIN: Coords = (1, 1);

pub struct TermManager {
    stdout: Stdout,
    current_msg: Option<Message>,
    draw_error: Option<anyhow::Error>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

/// Terminal size needed for the bordered canvas.
pub fn required_size() -> Coords {
    let width = CANVAS_COLS as TermInt * CELL_CHAR_WIDTH + 2;
    let height = CANVAS_ROWS as TermInt + 2;
    (width, height)
}

pub fn term_color(color: CellColor) -> Color {
    match color {
        CellColor::Red => Color::DarkCyan,
        CellColor::Black => Color::Black,
        CellColor::Green => Color::DarkGreen,
        CellColor::White => Color::White,
    }
}

/// Terminal position of a grid cell, `None` when it falls off the canvas.
pub fn cell_origin(pos: Point) -> Option<Coords> {
    if pos.x < 0 || pos.y < 0 || pos.x >= CANVAS_COLS || pos.y >= CANVAS_ROWS {
        return None;
    }

    let x = ORIGIN.0 + pos.x as TermInt * CELL_CHAR_WIDTH;
    let y = ORIGIN.1 + pos.y as TermInt;
    Some((x, y))
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), current_msg: None, draw_error: None }
    }

    pub fn setup(&mut self) -> Result<()> {
        let (w, h) = terminal::size().context("failed to read terminal size")?;
        let (need_w, need_h) = required_size();
        if w < need_w || h < need_h {
            bail!("terminal is {}x{}, need at least {}x{}", w, h, need_w, need_h);
        }

        execute!(self.stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
            .context("failed to hide cursor")?;
        Ok(())
    }

    /// Best effort, failures are logged since this also runs on the error path.
    pub fn restore(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            error!("failed to disable raw mode: {}", err);
        }
        if let Err(err) = execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking) {
            error!("failed to restore cursor: {}", err);
        }
        if let Err(err) = execute!(self.stdout, LeaveAlternateScreen) {
            error!("failed to leave alternate screen: {}", err);
        }
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read().context("failed to read event")? {
                return Ok(ev);
            }
        }
    }

    /// Drains whatever key events are queued, waiting at most `timeout` for the first.
    pub fn read_key_events_queue(&self, timeout: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];
        let mut wait = timeout;

        while poll(wait).context("failed to poll events")? {
            if let Event::Key(ev) = read().context("failed to read event")? {
                events.push(ev);
            }
            wait = Duration::from_millis(0);
        }

        Ok(events)
    }

    pub fn draw_borders(&mut self) -> Result<()> {
        let (width, height) = required_size();
        let end_x = width - 1;
        let end_y = height - 1;

        queue!(self.stdout, ResetColor)?;
        for x in 0..width {
            let ch = if x == 0 || x == end_x { '+' } else { '-' };
            self.print_at((x, 0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let (canvas_w, canvas_h) = required_size();
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.len()).max().unwrap_or(0) + 2) as TermInt;
        let center = (canvas_w / 2, canvas_h / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        queue!(self.stdout, ResetColor)?;

        // Top and bottom padding
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    /// Blanks the message area, the next frame paints over it.
    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        queue!(self.stdout, ResetColor)?;
        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                self.print_at((top_left.0 + x_diff, top_left.1 + y_diff), ' ')?;
            }
        }

        self.flush()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, ResetColor, terminal::Clear(ClearType::All))
            .context("failed to clear terminal")?;
        Ok(())
    }

    /// Pushes the queued frame out, surfacing any error hit while drawing it.
    pub fn flush(&mut self) -> Result<()> {
        if let Some(err) = self.draw_error.take() {
            return Err(err);
        }
        self.stdout.flush().context("failed to flush stdout")
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), Print(ch))?;
        Ok(())
    }

    fn paint(&mut self, pos: Coords, color: Color) {
        if self.draw_error.is_some() {
            return;
        }

        let res = queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            SetBackgroundColor(color),
            Print(CELL_CHARS)
        );
        if let Err(err) = res {
            self.draw_error = Some(anyhow!(err).context("failed to draw cell"));
        }
    }
}

impl Canvas for TermManager {
    fn background(&mut self, shade: u8) {
        let color = Color::Rgb { r: shade, g: shade, b: shade };
        for y in 0..CANVAS_ROWS {
            for x in 0..CANVAS_COLS {
                if let Some(pos) = cell_origin(Point::new(x, y)) {
                    self.paint(pos, color);
                }
            }
        }
    }

    fn draw_cell(&mut self, pos: Point, color: CellColor) {
        if let Some(origin) = cell_origin(pos) {
            self.paint(origin, term_color(color));
        }
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: Coords) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> Coords {
        self.top_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_size() {
        assert_eq!(required_size(), (34, 14));
    }

    #[test]
    fn test_cell_origin_maps_inside_border() {
        assert_eq!(cell_origin(Point::new(0, 0)), Some((1, 1)));
        assert_eq!(cell_origin(Point::new(3, 2)), Some((7, 3)));
        assert_eq!(cell_origin(Point::new(15, 11)), Some((31, 12)));
    }

    #[test]
    fn test_cell_origin_clips_off_canvas() {
        assert_eq!(cell_origin(Point::new(-1, 0)), None);
        assert_eq!(cell_origin(Point::new(0, -1)), None);
        assert_eq!(cell_origin(Point::new(16, 0)), None);
        // the grid is 16 rows but only 12 fit on the canvas
        assert_eq!(cell_origin(Point::new(0, 12)), None);
        assert_eq!(cell_origin(Point::new(0, 15)), None);
    }

    #[test]
    fn test_palette_slots() {
        assert_eq!(term_color(CellColor::Red), Color::DarkCyan);
        assert_eq!(term_color(CellColor::Black), Color::Black);
        assert_eq!(term_color(CellColor::Green), Color::DarkGreen);
        assert_eq!(term_color(CellColor::White), Color::White);
    }
}
