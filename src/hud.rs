//! Heads-up display: the scrubber line at the bottom of the screen, the
//! magnitude legend, and the help overlay.

use crate::playback::Scheduler;
use crate::scale::{self, ColorRamp};
use crate::terminal::{Color, Terminal};
use chrono::{DateTime, Utc};
use crossterm::event::{Event, KeyCode};
use std::io;

/// Rows at the bottom reserved for the scrubber.
pub const HUD_ROWS: u16 = 2;

const HELP: &str = "\
QUAKEGLOBE
─────────────────────
space  Pause/resume
←/→    Scrub timeline
h/l    Rotate
j/k    Tilt
+/-    Zoom in/out
0      Reset view
drag   Rotate (mouse)
wheel  Zoom (mouse)
?      Close help
q      Quit";

/// Draw the scrubber line and magnitude legend over the current frame.
pub fn draw(
    term: &mut Terminal,
    width: u16,
    height: u16,
    sched: &Scheduler,
    ramp: &ColorRamp,
    event_count: usize,
) {
    draw_legend(term, width, ramp);
    draw_scrubber(term, width, height, sched);

    if height >= 2 {
        let counter = format!("{event_count} events");
        term.set_str(1, height as i32 - 2, &counter, Some(Color::DarkGrey), false);
    }
}

fn draw_scrubber(term: &mut Terminal, width: u16, height: u16, sched: &Scheduler) {
    if height < 1 {
        return;
    }
    let y = height as i32 - 1;

    let date = DateTime::<Utc>::from_timestamp_millis(sched.current_ms())
        .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| String::from("----"));
    term.set_str(1, y, &date, Some(Color::White), true);

    let pct = sched.percent();
    let status = if sched.is_paused() {
        " paused"
    } else if sched.finished() {
        " end"
    } else {
        ""
    };
    let label = format!("{pct:3.0}%{status}");

    let bar_x = 2 + date.chars().count() as i32;
    let bar_end = width as i32 - label.chars().count() as i32 - 2;
    let bar_w = (bar_end - bar_x - 2) as i64;
    if bar_w >= 4 {
        let bar_w = bar_w as usize;
        let filled = (pct / 100.0 * bar_w as f64).round() as usize;
        term.set(bar_x, y, '[', Some(Color::DarkGrey), false);
        for i in 0..bar_w {
            let (ch, color) = if i < filled {
                ('█', Color::Cyan)
            } else {
                ('·', Color::DarkGrey)
            };
            term.set(bar_x + 1 + i as i32, y, ch, Some(color), false);
        }
        term.set(bar_x + 1 + bar_w as i32, y, ']', Some(Color::DarkGrey), false);
    }
    let label_color = if sched.is_paused() { Color::Yellow } else { Color::Grey };
    term.set_str(bar_end, y, &label, Some(label_color), false);
}

/// Magnitude key down the right edge, one tick per legend bucket.
fn draw_legend(term: &mut Terminal, width: u16, ramp: &ColorRamp) {
    for (i, mag) in scale::ticks(2.0, 10.0, 9).iter().enumerate() {
        let label = format!("M{:>2}", *mag as i64);
        let (r, g, b) = ramp.apply(*mag);
        term.set_str(
            width as i32 - label.len() as i32 - 1,
            i as i32 + 1,
            &label,
            Some(Color::Rgb { r, g, b }),
            false,
        );
    }
}

/// Show the key bindings in a centered box until dismissed. Returns true
/// if the user asked to quit from inside the overlay.
pub fn help_modal(term: &mut Terminal) -> io::Result<bool> {
    let (width, height) = term.size();
    draw_overlay(term, width, height, HELP);
    term.present()?;

    loop {
        if let Some(Event::Key(key)) = term.wait_event(50)? {
            match key.code {
                KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char(' ') => return Ok(false),
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                _ => {}
            }
        }
    }
}

/// Render a centered bordered box with the provided text into the back
/// buffer.
fn draw_overlay(term: &mut Terminal, width: u16, height: u16, text: &str) {
    let lines: Vec<&str> = text.lines().collect();
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4;
    let box_height = lines.len() + 2;

    let x0 = (width as usize).saturating_sub(box_width) / 2;
    let y0 = (height as usize).saturating_sub(box_height) / 2;

    let border = Color::White;
    let body = Color::Grey;

    term.set(x0 as i32, y0 as i32, '┌', Some(border), false);
    for x in 1..box_width - 1 {
        term.set((x0 + x) as i32, y0 as i32, '─', Some(border), false);
    }
    term.set((x0 + box_width - 1) as i32, y0 as i32, '┐', Some(border), false);

    for (i, line) in lines.iter().enumerate() {
        let y = (y0 + 1 + i) as i32;
        term.set(x0 as i32, y, '│', Some(border), false);
        let padding = max_width.saturating_sub(line.chars().count());
        let padded = format!(" {}{} ", line, " ".repeat(padding));
        for (j, ch) in padded.chars().enumerate() {
            term.set((x0 + 1 + j) as i32, y, ch, Some(body), false);
        }
        term.set((x0 + box_width - 1) as i32, y, '│', Some(border), false);
    }

    let y1 = (y0 + box_height - 1) as i32;
    term.set(x0 as i32, y1, '└', Some(border), false);
    for x in 1..box_width - 1 {
        term.set((x0 + x) as i32, y1, '─', Some(border), false);
    }
    term.set((x0 + box_width - 1) as i32, y1, '┘', Some(border), false);
}
