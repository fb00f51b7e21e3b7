//! View state: autorotation, drag, zoom, and the interactions between them.

use crate::scale::Linear;

use super::projection::{clamp_tilt, wrap_longitude};

const MIN_ZOOM: f64 = 0.3;
const MAX_ZOOM: f64 = 3.0;
const ZOOM_STEP: f64 = 1.2;

/// Seconds autorotation stays held after a keyboard nudge.
const NUDGE_HOLD_SECS: f64 = 1.0;

pub struct View {
    pub rotation: f64,
    pub tilt: f64,
    pub zoom: f64,
    rate: f64,
    home_tilt: f64,
    hold_secs: f64,
    dragging: bool,
}

impl View {
    /// `rotation`/`tilt` in degrees, `rate` in degrees of autorotation per
    /// second.
    pub fn new(rotation: f64, tilt: f64, rate: f64) -> Self {
        Self {
            rotation,
            tilt: clamp_tilt(tilt),
            zoom: 1.0,
            rate,
            home_tilt: clamp_tilt(tilt),
            hold_secs: 0.0,
            dragging: false,
        }
    }

    /// Advance autorotation by one frame. Held while the user is dragging
    /// or shortly after a keyboard nudge.
    pub fn autorotate(&mut self, dt_secs: f64) {
        if self.dragging {
            return;
        }
        if self.hold_secs > 0.0 {
            self.hold_secs = (self.hold_secs - dt_secs).max(0.0);
            return;
        }
        self.rotation = wrap_longitude(self.rotation + self.rate * dt_secs);
    }

    /// Keyboard rotation/tilt. Pauses autorotation briefly so the globe
    /// does not fight the user.
    pub fn nudge(&mut self, dlon: f64, dlat: f64) {
        self.rotation = wrap_longitude(self.rotation + dlon);
        self.tilt = clamp_tilt(self.tilt + dlat);
        self.hold_secs = NUDGE_HOLD_SECS;
    }

    /// Mouse drag in braille dots. Dragging from the center of the globe to
    /// its limb rotates 90 degrees.
    pub fn drag(&mut self, dx_dots: f64, dy_dots: f64, radius_dots: f64) {
        if radius_dots <= 0.0 {
            return;
        }
        let degrees = Linear::new((-radius_dots, radius_dots), (-90.0, 90.0));
        self.rotation = wrap_longitude(self.rotation + degrees.apply(dx_dots));
        self.tilt = clamp_tilt(self.tilt - degrees.apply(dy_dots));
    }

    /// Mouse button state: autorotation stops on press, resumes on release.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Back to the default zoom and initial tilt.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.tilt = self.home_tilt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autorotate_advances_at_rate() {
        let mut v = View::new(0.0, 0.0, 5.0);
        v.autorotate(2.0);
        assert!((v.rotation - 10.0).abs() < 1e-9);
    }

    #[test]
    fn autorotate_wraps_at_the_dateline() {
        let mut v = View::new(179.0, 0.0, 5.0);
        v.autorotate(1.0);
        assert!((v.rotation - (-176.0)).abs() < 1e-9);
    }

    #[test]
    fn dragging_suspends_autorotation() {
        let mut v = View::new(0.0, 0.0, 5.0);
        v.set_dragging(true);
        v.autorotate(1.0);
        assert_eq!(v.rotation, 0.0);
        v.set_dragging(false);
        v.autorotate(1.0);
        assert!((v.rotation - 5.0).abs() < 1e-9);
    }

    #[test]
    fn nudges_hold_autorotation_briefly() {
        let mut v = View::new(0.0, 0.0, 5.0);
        v.nudge(2.0, 0.0);
        v.autorotate(0.5); // still held
        assert!((v.rotation - 2.0).abs() < 1e-9);
        v.autorotate(0.5); // hold drains to zero on this frame
        assert!((v.rotation - 2.0).abs() < 1e-9);
        v.autorotate(1.0); // resumed
        assert!((v.rotation - 7.0).abs() < 1e-9);
    }

    #[test]
    fn center_to_limb_drag_is_ninety_degrees() {
        let mut v = View::new(0.0, 0.0, 0.0);
        v.drag(40.0, 0.0, 40.0);
        assert!((v.rotation - 90.0).abs() < 1e-9);
    }

    #[test]
    fn drag_tilt_clamps_at_the_poles() {
        let mut v = View::new(0.0, 80.0, 0.0);
        v.drag(0.0, -40.0, 40.0);
        assert_eq!(v.tilt, 90.0);
        v.drag(0.0, 200.0, 40.0);
        assert_eq!(v.tilt, -90.0);
    }

    #[test]
    fn zoom_clamps_to_its_extent() {
        let mut v = View::new(0.0, 0.0, 0.0);
        for _ in 0..20 {
            v.zoom_in();
        }
        assert!(v.zoom <= 3.0 + 1e-9);
        for _ in 0..40 {
            v.zoom_out();
        }
        assert!(v.zoom >= 0.3 - 1e-9);
    }

    #[test]
    fn reset_restores_zoom_and_tilt() {
        let mut v = View::new(100.0, -10.0, 5.0);
        v.zoom_in();
        v.nudge(0.0, 30.0);
        v.reset();
        assert_eq!(v.zoom, 1.0);
        assert_eq!(v.tilt, -10.0);
    }
}
