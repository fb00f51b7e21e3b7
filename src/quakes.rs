//! Earthquake catalog loading and time-window queries.
//!
//! A catalog is a JSON array of `{mag, lng, lat, time}` objects ordered by
//! `time` (epoch milliseconds), earliest first. The loader rejects files
//! that break that contract instead of rendering garbage.

use rand::prelude::*;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// One earthquake event.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Quake {
    pub mag: f64,
    pub lng: f64,
    pub lat: f64,
    /// Epoch milliseconds.
    pub time: i64,
}

/// A validated, time-ordered list of quake events.
#[derive(Debug)]
pub struct Catalog {
    events: Vec<Quake>,
}

impl Catalog {
    /// Load and validate a catalog from a JSON file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let events: Vec<Quake> = serde_json::from_str(&text).map_err(|err| {
            invalid(format!("{} is not a quake catalog: {err}", path.display()))
        })?;
        Self::from_events(events)
    }

    pub fn from_events(events: Vec<Quake>) -> io::Result<Self> {
        if events.is_empty() {
            return Err(invalid("catalog contains no events".into()));
        }
        for (i, q) in events.iter().enumerate() {
            if !q.mag.is_finite() || !q.lat.is_finite() || !q.lng.is_finite() {
                return Err(invalid(format!("event {i} has a non-finite field")));
            }
            if q.lat < -90.0 || q.lat > 90.0 {
                return Err(invalid(format!("event {i} latitude {} out of range", q.lat)));
            }
            if q.lng < -180.0 || q.lng > 180.0 {
                return Err(invalid(format!("event {i} longitude {} out of range", q.lng)));
            }
            if i > 0 && q.time < events[i - 1].time {
                return Err(invalid(format!("event {i} is out of time order")));
            }
        }
        Ok(Self { events })
    }

    /// First and last timestamps in the catalog.
    pub fn span(&self) -> (i64, i64) {
        (self.events[0].time, self.events[self.events.len() - 1].time)
    }

    /// Events in the half-open window `(t0, t1]`.
    pub fn between(&self, t0: i64, t1: i64) -> &[Quake] {
        let lo = self.events.partition_point(|q| q.time <= t0);
        let hi = self.events.partition_point(|q| q.time <= t1);
        &self.events[lo..hi.max(lo)]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Quake] {
        &self.events
    }

    /// Generate a synthetic catalog for demo mode: events scattered along
    /// seismic belts with a Gutenberg-Richter-ish magnitude distribution,
    /// spread over roughly a year.
    pub fn synthetic(count: usize, rng: &mut StdRng) -> Self {
        let count = count.max(1);
        let start = 1_704_067_200_000i64; // 2024-01-01T00:00:00Z
        let span = 365 * 24 * 3_600_000i64;
        let mean_gap = (span / count as i64).max(1);

        let mut t = start;
        let mut events = Vec::with_capacity(count);
        for _ in 0..count {
            let (blat, blng) = BELTS[rng.gen_range(0..BELTS.len())];
            let lat = (blat + rng.gen_range(-6.0..6.0)).clamp(-89.0, 89.0);
            let lng = (blng + rng.gen_range(-8.0..8.0) + 180.0).rem_euclid(360.0) - 180.0;
            // b-value ~1: each magnitude step is ~10x rarer
            let mag = (2.5 - rng.gen_range(1e-6..1.0f64).log10()).min(9.5);
            t += rng.gen_range(1..=mean_gap * 2);
            events.push(Quake { mag, lng, lat, time: t });
        }
        Self { events }
    }
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Anchor points along the major seismic belts (ring of fire, mid-Atlantic
/// ridge, Alpide belt), as (lat, lon) degrees.
const BELTS: &[(f64, f64)] = &[
    (52.0, -169.0),  // Aleutians
    (60.0, -150.0),  // Alaska
    (49.0, -128.0),  // Cascadia
    (36.0, -120.0),  // California
    (17.0, -100.0),  // Mexico
    (12.0, -87.0),   // Central America
    (-12.0, -77.0),  // Peru
    (-33.0, -72.0),  // Chile
    (-56.0, -27.0),  // South Sandwich
    (64.0, -18.0),   // Iceland
    (0.0, -25.0),    // Mid-Atlantic ridge
    (38.0, 23.0),    // Greece
    (39.0, 35.0),    // Anatolia
    (34.0, 70.0),    // Hindu Kush
    (28.0, 86.0),    // Himalaya
    (-2.0, 99.0),    // Sumatra
    (-8.0, 118.0),   // Indonesia
    (8.0, 126.0),    // Philippines
    (24.0, 122.0),   // Taiwan
    (36.0, 140.0),   // Japan
    (52.0, 158.0),   // Kamchatka
    (-18.0, -174.0), // Tonga
    (-38.0, 177.0),  // New Zealand
    (-6.0, 147.0),   // New Guinea
];
