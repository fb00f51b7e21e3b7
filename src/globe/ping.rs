//! Ping lifecycle: each replayed quake becomes an expanding ring on the
//! globe that dies out after a couple of seconds.

use crate::quakes::Quake;

use super::projection::{wrap_longitude, Projection};
use super::{Raster, CLASS_PING};

/// Seconds a ping stays on the globe.
pub const LIFETIME_SECS: f64 = 2.0;

const RING_POINTS: usize = 48;

pub struct Ping {
    lat: f64,
    lon: f64,
    /// Full angular radius of the ring in degrees, from the magnitude scale.
    angle: f64,
    bucket: u8,
    age: f64,
}

impl Ping {
    pub fn spawn(quake: &Quake, angle: f64) -> Self {
        Self {
            lat: quake.lat,
            lon: quake.lng,
            angle,
            bucket: magnitude_bucket(quake.mag),
            age: 0.0,
        }
    }

    /// Age the ping; returns false once it has expired.
    pub fn update(&mut self, dt_secs: f64) -> bool {
        self.age += dt_secs;
        self.age < LIFETIME_SECS
    }

    /// Rasterize the ping: a dot at the epicenter while young, and a ring
    /// that expands toward the full angular radius over the lifetime.
    pub fn draw(&self, raster: &mut Raster, proj: &Projection) {
        let frac = (self.age / LIFETIME_SECS).clamp(0.0, 1.0);
        let class = CLASS_PING + self.bucket;

        if frac < 0.25 {
            if let Some((x, y)) = proj.project(self.lat, self.lon) {
                raster.set(x, y, class);
                raster.set(x + 1, y, class);
                raster.set(x, y + 1, class);
            }
        }

        let reach = (self.angle * frac).to_radians();
        if reach <= 0.0 {
            return;
        }
        for i in 0..RING_POINTS {
            let bearing = i as f64 / RING_POINTS as f64 * std::f64::consts::TAU;
            let (lat, lon) = destination(self.lat, self.lon, bearing, reach);
            if let Some((x, y)) = proj.project(lat, lon) {
                raster.set(x, y, class);
            }
        }
    }
}

/// Legend bucket for a magnitude: 0 for M2 up through 8 for M10.
pub fn magnitude_bucket(mag: f64) -> u8 {
    (mag.clamp(2.0, 10.0) - 2.0).round() as u8
}

/// Great-circle destination from (lat, lon) along `bearing` for an angular
/// distance `dist`, both in radians. Returns degrees.
fn destination(lat_deg: f64, lon_deg: f64, bearing: f64, dist: f64) -> (f64, f64) {
    let lat1 = lat_deg.to_radians();
    let lon1 = lon_deg.to_radians();

    let lat2 = (lat1.sin() * dist.cos() + lat1.cos() * dist.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * dist.sin() * lat1.cos())
            .atan2(dist.cos() - lat1.sin() * lat2.sin());

    (lat2.to_degrees(), wrap_longitude(lon2.to_degrees()))
}
