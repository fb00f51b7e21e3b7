use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

pub use crossterm::style::Color;

/// Terminal abstraction for rendering: raw mode, alternate screen, mouse
/// capture, and a cell back buffer flushed once per frame.
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
}

/// A single cell in the back buffer.
#[derive(Clone)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self { ch: ' ', fg: None, bold: false }
    }
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;

        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide, EnableMouseCapture)?;

        let buffer = vec![vec![Cell::default(); width as usize]; height as usize];
        Ok(Self { width, height, buffer })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Adopt new dimensions after a resize event.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = vec![vec![Cell::default(); width as usize]; height as usize];
    }

    /// Clear the back buffer.
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            for cell in row {
                *cell = Cell::default();
            }
        }
    }

    /// Clear the actual terminal.
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))
    }

    /// Set a character at position with optional color.
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg, bold };
        }
    }

    /// Set a string starting at position.
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    /// Flush the back buffer to the screen.
    pub fn present(&self) -> io::Result<()> {
        let mut out = stdout();
        for (y, row) in self.buffer.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;
            for cell in row {
                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                if let Some(color) = cell.fg {
                    queue!(out, SetForegroundColor(color), Print(cell.ch), ResetColor)?;
                } else {
                    queue!(out, Print(cell.ch))?;
                }
                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                }
            }
        }
        out.flush()
    }

    /// Drain one pending input event without blocking.
    pub fn poll_event(&self) -> io::Result<Option<Event>> {
        if poll(Duration::from_millis(0))? {
            return read().map(Some);
        }
        Ok(None)
    }

    /// Wait up to `timeout_ms` for an input event.
    pub fn wait_event(&self, timeout_ms: u64) -> io::Result<Option<Event>> {
        if poll(Duration::from_millis(timeout_ms))? {
            return read().map(Some);
        }
        Ok(None)
    }

    pub fn sleep(&self, seconds: f32) {
        std::thread::sleep(Duration::from_secs_f32(seconds));
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
