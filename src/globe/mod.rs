//! The globe frame loop: input, autorotation, playback, and braille
//! compositing.

mod coastlines;
pub mod ping;
pub mod projection;
pub mod view;

use crate::config::PlayConfig;
use crate::hud;
use crate::playback::Scheduler;
use crate::quakes::Catalog;
use crate::scale::{ColorRamp, Pow};
use crate::terminal::{Color, Terminal};
use coastlines::COASTLINES;
use crossterm::event::{Event, KeyCode, MouseButton, MouseEventKind};
use ping::Ping;
use projection::{shortest_delta, wrap_longitude, Projection};
use std::io;
use std::time::Instant;
use view::View;

// Raster classes, highest wins per dot. Pings occupy CLASS_PING + bucket.
pub(crate) const CLASS_GRID: u8 = 1;
pub(crate) const CLASS_COAST: u8 = 2;
pub(crate) const CLASS_PING: u8 = 3;

const SCRUB_STEP_PERCENT: f64 = 1.0;
const NUDGE_DEGREES: f64 = 3.0;
const COAST_STEPS: usize = 16;

/// Run the playback session until the user quits.
pub fn run(catalog: Catalog, config: &PlayConfig) -> io::Result<()> {
    // magnitude -> ping ring size in degrees
    let angles = Pow::new(2.0, vec![2.5, 10.0], vec![0.5, 15.0]);
    // magnitude -> ping color, pale yellow through deep red
    let ramp = ColorRamp::new(
        2.0,
        vec![2.0, 6.0, 10.0],
        vec![(255, 255, 204), (253, 141, 60), (128, 0, 38)],
    );

    let (start, end) = catalog.span();
    let mut sched = Scheduler::new(start, end, config.minutes);
    sched.set_paused(config.start_paused);
    let mut view = View::new(config.lon, config.tilt, config.rotate);

    let mut term = Terminal::new()?;
    let (mut width, mut height) = term.size();
    let mut raster = Raster::new(width, height.saturating_sub(hud::HUD_ROWS));

    let mut pings: Vec<Ping> = Vec::new();
    let epoch = Instant::now();
    let mut last_frame = Instant::now();
    let mut drag_from: Option<(u16, u16)> = None;

    loop {
        let now_ms = epoch.elapsed().as_millis() as u64;
        let radius = raster.fitted_radius() * view.zoom;

        while let Some(event) = term.poll_event()? {
            match event {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') => sched.toggle_paused(),
                    KeyCode::Char('?') => {
                        if hud::help_modal(&mut term)? {
                            return Ok(());
                        }
                    }
                    KeyCode::Left => {
                        sched.scrub_to_percent(sched.percent() - SCRUB_STEP_PERCENT, now_ms);
                    }
                    KeyCode::Right => {
                        sched.scrub_to_percent(sched.percent() + SCRUB_STEP_PERCENT, now_ms);
                    }
                    KeyCode::Char('h') => view.nudge(NUDGE_DEGREES, 0.0),
                    KeyCode::Char('l') => view.nudge(-NUDGE_DEGREES, 0.0),
                    KeyCode::Char('k') | KeyCode::Up => view.nudge(0.0, -NUDGE_DEGREES),
                    KeyCode::Char('j') | KeyCode::Down => view.nudge(0.0, NUDGE_DEGREES),
                    KeyCode::Char('+') | KeyCode::Char('=') => view.zoom_in(),
                    KeyCode::Char('-') | KeyCode::Char('_') => view.zoom_out(),
                    KeyCode::Char('0') => view.reset(),
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        drag_from = Some((mouse.column, mouse.row));
                        view.set_dragging(true);
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        if let Some((px, py)) = drag_from {
                            // cell deltas to braille dot deltas
                            let dx = (mouse.column as f64 - px as f64) * 2.0;
                            let dy = (mouse.row as f64 - py as f64) * 4.0;
                            view.drag(dx, dy, radius);
                        }
                        drag_from = Some((mouse.column, mouse.row));
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        drag_from = None;
                        view.set_dragging(false);
                    }
                    MouseEventKind::ScrollUp => view.zoom_in(),
                    MouseEventKind::ScrollDown => view.zoom_out(),
                    _ => {}
                },
                Event::Resize(w, h) => {
                    width = w;
                    height = h;
                    term.resize(w, h);
                    term.clear_screen()?;
                    raster = Raster::new(w, h.saturating_sub(hud::HUD_ROWS));
                }
                _ => {}
            }
        }

        let dt = last_frame.elapsed().as_secs_f64();
        last_frame = Instant::now();

        view.autorotate(dt);

        let (t0, t1) = sched.tick(now_ms);
        for quake in catalog.between(t0, t1) {
            pings.push(Ping::spawn(quake, angles.apply(quake.mag)));
        }
        pings.retain_mut(|p| p.update(dt));

        let proj = Projection {
            rotation: view.rotation,
            tilt: view.tilt,
            radius: raster.fitted_radius() * view.zoom,
            center_x: raster.dot_w as f64 / 2.0,
            center_y: raster.dot_h as f64 / 2.0,
        };

        raster.clear();
        draw_graticule(&mut raster, &proj);
        draw_coastlines(&mut raster, &proj);
        for ping in &pings {
            ping.draw(&mut raster, &proj);
        }

        term.clear();
        blit(&raster, &mut term, &ramp);
        hud::draw(&mut term, width, height, &sched, &ramp, catalog.len());
        term.present()?;
        term.sleep(config.time_step);
    }
}

/// Sub-cell drawing surface: 2x4 braille dots per terminal cell, one class
/// byte per dot.
pub(crate) struct Raster {
    dot_w: usize,
    dot_h: usize,
    dots: Vec<u8>,
}

impl Raster {
    fn new(cols: u16, rows: u16) -> Self {
        let dot_w = cols as usize * 2;
        let dot_h = rows as usize * 4;
        Self { dot_w, dot_h, dots: vec![0; dot_w * dot_h] }
    }

    fn clear(&mut self) {
        self.dots.fill(0);
    }

    pub(crate) fn set(&mut self, x: i32, y: i32, class: u8) {
        if x >= 0 && (x as usize) < self.dot_w && y >= 0 && (y as usize) < self.dot_h {
            let idx = y as usize * self.dot_w + x as usize;
            if class > self.dots[idx] {
                self.dots[idx] = class;
            }
        }
    }

    /// Globe radius in dots that fills the drawable area with a small
    /// margin, recomputed every frame so window resizes recenter and
    /// rescale automatically.
    fn fitted_radius(&self) -> f64 {
        (self.dot_w.min(self.dot_h) as f64 / 2.0 - 2.0).max(4.0)
    }
}

fn draw_graticule(raster: &mut Raster, proj: &Projection) {
    for lat_deg in (-60..=60).step_by(30) {
        for lon_deg in -180..180 {
            if let Some((x, y)) = proj.project(lat_deg as f64, lon_deg as f64) {
                raster.set(x, y, CLASS_GRID);
            }
        }
    }
    for lon_deg in (-180..180).step_by(30) {
        for lat_deg in -90..=90 {
            if let Some((x, y)) = proj.project(lat_deg as f64, lon_deg as f64) {
                raster.set(x, y, CLASS_GRID);
            }
        }
    }
}

fn draw_coastlines(raster: &mut Raster, proj: &Projection) {
    for outline in COASTLINES {
        for pair in outline.windows(2) {
            let (lat1, lon1) = pair[0];
            let (lat2, lon2) = pair[1];
            let dlon = shortest_delta(lon1, lon2);
            for t in 0..=COAST_STEPS {
                let f = t as f64 / COAST_STEPS as f64;
                let lat = lat1 + (lat2 - lat1) * f;
                let lon = wrap_longitude(lon1 + dlon * f);
                if let Some((x, y)) = proj.project(lat, lon) {
                    raster.set(x, y, CLASS_COAST);
                }
            }
        }
    }
}

/// Collapse each 2x4 dot block into a braille character; the highest class
/// in the block picks the cell color.
fn blit(raster: &Raster, term: &mut Terminal, ramp: &ColorRamp) {
    const DOT_BITS: [u8; 8] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80];

    let cols = raster.dot_w / 2;
    let rows = raster.dot_h / 4;
    for cy in 0..rows {
        let by = cy * 4;
        for cx in 0..cols {
            let bx = cx * 2;
            let positions = [
                (by, bx),
                (by + 1, bx),
                (by + 2, bx),
                (by, bx + 1),
                (by + 1, bx + 1),
                (by + 2, bx + 1),
                (by + 3, bx),
                (by + 3, bx + 1),
            ];

            let mut bits = 0u8;
            let mut class = 0u8;
            for (i, &(py, px)) in positions.iter().enumerate() {
                let v = raster.dots[py * raster.dot_w + px];
                if v > 0 {
                    bits |= DOT_BITS[i];
                    class = class.max(v);
                }
            }

            if bits > 0 {
                let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
                let (color, bold) = class_style(class, ramp);
                term.set(cx as i32, cy as i32, ch, Some(color), bold);
            }
        }
    }
}

fn class_style(class: u8, ramp: &ColorRamp) -> (Color, bool) {
    if class >= CLASS_PING {
        let mag = 2.0 + (class - CLASS_PING) as f64;
        let (r, g, b) = ramp.apply(mag);
        (Color::Rgb { r, g, b }, true)
    } else if class == CLASS_COAST {
        (Color::Rgb { r: 24, g: 96, b: 148 }, false)
    } else {
        (Color::DarkGrey, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ColorRamp;

    fn ramp() -> ColorRamp {
        ColorRamp::new(
            2.0,
            vec![2.0, 6.0, 10.0],
            vec![(255, 255, 204), (253, 141, 60), (128, 0, 38)],
        )
    }

    #[test]
    fn raster_keeps_the_highest_class() {
        let mut r = Raster::new(10, 10);
        r.set(3, 3, CLASS_COAST);
        r.set(3, 3, CLASS_GRID);
        assert_eq!(r.dots[3 * r.dot_w + 3], CLASS_COAST);
        r.set(3, 3, CLASS_PING + 4);
        assert_eq!(r.dots[3 * r.dot_w + 3], CLASS_PING + 4);
    }

    #[test]
    fn raster_ignores_out_of_bounds_dots() {
        let mut r = Raster::new(4, 4);
        r.set(-1, 0, CLASS_GRID);
        r.set(0, -1, CLASS_GRID);
        r.set(8, 0, CLASS_GRID);
        r.set(0, 16, CLASS_GRID);
        assert!(r.dots.iter().all(|&d| d == 0));
    }

    #[test]
    fn ping_classes_map_to_legend_colors() {
        let ramp = ramp();
        let (low, _) = class_style(CLASS_PING, &ramp);
        let (high, _) = class_style(CLASS_PING + 8, &ramp);
        assert_eq!(low, Color::Rgb { r: 255, g: 255, b: 204 });
        assert_eq!(high, Color::Rgb { r: 128, g: 0, b: 38 });
    }

    #[test]
    fn fitted_radius_tracks_the_smaller_dimension() {
        let wide = Raster::new(100, 20);
        assert_eq!(wide.fitted_radius(), 20.0 * 4.0 / 2.0 - 2.0);
        let tall = Raster::new(10, 50);
        assert_eq!(tall.fitted_radius(), 10.0 * 2.0 / 2.0 - 2.0);
    }
}
