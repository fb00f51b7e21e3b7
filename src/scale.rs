//! Numeric scales for mapping data values onto visual properties.
//!
//! Playback uses linear scales (percent <-> timestamp, real elapsed time ->
//! data time) and pings use power scales (magnitude -> ring size, magnitude
//! -> color) with clamping at the domain edges.

/// A two-point linear scale with inversion.
#[derive(Clone, Copy, Debug)]
pub struct Linear {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl Linear {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 }
    }

    /// Map a domain value into the range. Does not clamp.
    pub fn apply(&self, x: f64) -> f64 {
        if self.d1 == self.d0 {
            return self.r0;
        }
        self.r0 + (x - self.d0) / (self.d1 - self.d0) * (self.r1 - self.r0)
    }

    /// Map a range value back into the domain.
    pub fn invert(&self, y: f64) -> f64 {
        if self.r1 == self.r0 {
            return self.d0;
        }
        self.d0 + (y - self.r0) / (self.r1 - self.r0) * (self.d1 - self.d0)
    }
}

/// Locate `x` within an ascending multi-stop domain after raising both to
/// `exponent`. Returns the segment index and the position within it (0..1).
/// Input is clamped to the domain endpoints.
fn segment_position(exponent: f64, domain: &[f64], x: f64) -> (usize, f64) {
    let first = domain[0];
    let last = domain[domain.len() - 1];
    let x = x.clamp(first, last);

    let mut i = 0;
    while i + 2 < domain.len() && x > domain[i + 1] {
        i += 1;
    }

    let lo = domain[i].powf(exponent);
    let hi = domain[i + 1].powf(exponent);
    if hi == lo {
        return (i, 0.0);
    }
    (i, ((x.powf(exponent) - lo) / (hi - lo)).clamp(0.0, 1.0))
}

/// A clamped power scale over an ascending multi-stop domain.
#[derive(Clone, Debug)]
pub struct Pow {
    exponent: f64,
    domain: Vec<f64>,
    range: Vec<f64>,
}

impl Pow {
    /// `domain` and `range` must have the same length, at least two stops,
    /// with `domain` ascending and non-negative.
    pub fn new(exponent: f64, domain: Vec<f64>, range: Vec<f64>) -> Self {
        debug_assert!(domain.len() >= 2 && domain.len() == range.len());
        Self { exponent, domain, range }
    }

    pub fn apply(&self, x: f64) -> f64 {
        let (i, t) = segment_position(self.exponent, &self.domain, x);
        self.range[i] + t * (self.range[i + 1] - self.range[i])
    }
}

/// A clamped power scale producing RGB colors from multi-stop ramps.
#[derive(Clone, Debug)]
pub struct ColorRamp {
    exponent: f64,
    domain: Vec<f64>,
    stops: Vec<(u8, u8, u8)>,
}

impl ColorRamp {
    pub fn new(exponent: f64, domain: Vec<f64>, stops: Vec<(u8, u8, u8)>) -> Self {
        debug_assert!(domain.len() >= 2 && domain.len() == stops.len());
        Self { exponent, domain, stops }
    }

    pub fn apply(&self, x: f64) -> (u8, u8, u8) {
        let (i, t) = segment_position(self.exponent, &self.domain, x);
        let (r0, g0, b0) = self.stops[i];
        let (r1, g1, b1) = self.stops[i + 1];
        let lerp = |a: u8, b: u8| (a as f64 + t * (b as f64 - a as f64)).round() as u8;
        (lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }
}

/// Round, human-friendly tick values covering `[start, stop]`, aiming for
/// roughly `count` ticks. Step sizes are powers of ten times 1, 2 or 5.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !(stop > start) || count == 0 {
        return vec![start];
    }
    let step = tick_step(start, stop, count);
    let lo = (start / step).ceil() as i64;
    let hi = (stop / step).floor() as i64;
    (lo..=hi).map(|i| i as f64 * step).collect()
}

fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start) / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let err = raw / power;
    let factor = if err >= 50f64.sqrt() {
        10.0
    } else if err >= 10f64.sqrt() {
        5.0
    } else if err >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    power * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_maps_and_inverts() {
        let s = Linear::new((0.0, 100.0), (1000.0, 2000.0));
        assert_eq!(s.apply(0.0), 1000.0);
        assert_eq!(s.apply(50.0), 1500.0);
        assert_eq!(s.apply(100.0), 2000.0);
        assert_eq!(s.invert(1500.0), 50.0);
        // not clamped
        assert_eq!(s.apply(150.0), 2500.0);
    }

    #[test]
    fn linear_degenerate_domain_is_constant() {
        let s = Linear::new((5.0, 5.0), (0.0, 10.0));
        assert_eq!(s.apply(5.0), 0.0);
        assert_eq!(s.apply(99.0), 0.0);
        let flat = Linear::new((0.0, 100.0), (7.0, 7.0));
        assert_eq!(flat.invert(7.0), 0.0);
    }

    #[test]
    fn pow_scale_clamps_at_domain_edges() {
        let angles = Pow::new(2.0, vec![2.5, 10.0], vec![0.5, 15.0]);
        assert!((angles.apply(2.5) - 0.5).abs() < 1e-9);
        assert!((angles.apply(10.0) - 15.0).abs() < 1e-9);
        assert!((angles.apply(1.0) - 0.5).abs() < 1e-9);
        assert!((angles.apply(12.0) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn pow_scale_is_monotonic_and_superlinear() {
        let angles = Pow::new(2.0, vec![2.5, 10.0], vec![0.5, 15.0]);
        let a = angles.apply(4.0);
        let b = angles.apply(7.0);
        assert!(a < b);
        // exponent 2 grows faster than linear interpolation between stops
        let linear_mid = 0.5 + (6.25 - 2.5) / 7.5 * 14.5;
        assert!(angles.apply(6.25) < linear_mid);
    }

    #[test]
    fn color_ramp_hits_its_stops() {
        let ramp = ColorRamp::new(
            2.0,
            vec![2.0, 6.0, 10.0],
            vec![(255, 255, 204), (253, 141, 60), (128, 0, 38)],
        );
        assert_eq!(ramp.apply(2.0), (255, 255, 204));
        assert_eq!(ramp.apply(6.0), (253, 141, 60));
        assert_eq!(ramp.apply(10.0), (128, 0, 38));
        // clamped below and above
        assert_eq!(ramp.apply(0.0), (255, 255, 204));
        assert_eq!(ramp.apply(11.0), (128, 0, 38));
    }

    #[test]
    fn color_ramp_interpolates_between_stops() {
        let ramp = ColorRamp::new(
            2.0,
            vec![2.0, 6.0, 10.0],
            vec![(255, 255, 204), (253, 141, 60), (128, 0, 38)],
        );
        let (r, g, b) = ramp.apply(4.0);
        assert!(r <= 255 && r >= 253);
        assert!(g < 255 && g > 141);
        assert!(b < 204 && b > 60);
    }

    #[test]
    fn magnitude_legend_ticks() {
        let t = ticks(2.0, 10.0, 9);
        assert_eq!(t, vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
    }

    #[test]
    fn ticks_pick_round_steps() {
        assert_eq!(ticks(0.0, 100.0, 4), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(ticks(0.0, 10.0, 2), vec![0.0, 5.0, 10.0]);
    }
}
