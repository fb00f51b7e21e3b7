//! Orthographic projection of (lat, lon) onto the braille dot grid.

/// Points slightly past the limb are still drawn so coastlines do not pop
/// in and out at the edge of the disc.
const LIMB_TOLERANCE: f64 = 0.1;

/// Projection parameters for one frame. `rotation` is the longitude offset
/// applied before projecting (autorotation plus drag), `tilt` rotates the
/// sphere about the screen x axis, and `radius`/`center_*` are in braille
/// dot units.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub rotation: f64,
    pub tilt: f64,
    pub radius: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Projection {
    /// Project a point, returning braille dot coordinates, or `None` when
    /// the point is on the far side of the globe.
    pub fn project(&self, lat_deg: f64, lon_deg: f64) -> Option<(i32, i32)> {
        let lat = lat_deg.to_radians();
        let lon = (lon_deg + self.rotation).to_radians();

        let x = lat.cos() * lon.sin();
        let y = lat.cos() * lon.cos();
        let z = lat.sin();

        let (sin_t, cos_t) = self.tilt.to_radians().sin_cos();
        let depth = y * cos_t - z * sin_t;
        if depth < -LIMB_TOLERANCE {
            return None;
        }
        let up = y * sin_t + z * cos_t;

        let sx = self.center_x + x * self.radius;
        let sy = self.center_y - up * self.radius;
        Some((sx.round() as i32, sy.round() as i32))
    }
}

/// Wrap a longitude-like angle into [-180, 180).
pub fn wrap_longitude(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Tilt never goes past the poles.
pub fn clamp_tilt(deg: f64) -> f64 {
    deg.clamp(-90.0, 90.0)
}

/// Shortest signed angular difference from `from` to `to`, in degrees.
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    wrap_longitude(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> Projection {
        Projection { rotation: 0.0, tilt: 0.0, radius: 40.0, center_x: 80.0, center_y: 48.0 }
    }

    #[test]
    fn facing_point_projects_to_center() {
        let (x, y) = projection().project(0.0, 0.0).unwrap();
        assert_eq!((x, y), (80, 48));
    }

    #[test]
    fn antipode_is_culled() {
        assert!(projection().project(0.0, 180.0).is_none());
        assert!(projection().project(0.0, -180.0).is_none());
    }

    #[test]
    fn rotation_brings_the_far_side_around() {
        let mut p = projection();
        p.rotation = 180.0;
        assert!(p.project(0.0, 180.0).is_some());
        assert!(p.project(0.0, 0.0).is_none());
    }

    #[test]
    fn north_is_up() {
        let (_, y_pole) = projection().project(89.0, 0.0).unwrap();
        let (_, y_eq) = projection().project(0.0, 0.0).unwrap();
        assert!(y_pole < y_eq);
    }

    #[test]
    fn east_is_right() {
        let (x_east, _) = projection().project(0.0, 45.0).unwrap();
        let (x_center, _) = projection().project(0.0, 0.0).unwrap();
        assert!(x_east > x_center);
    }

    #[test]
    fn tilt_reveals_the_pole() {
        let mut p = projection();
        // negative tilt looks down on the north pole
        p.tilt = -90.0;
        let (x, y) = p.project(90.0, 0.0).unwrap();
        assert_eq!((x, y), (80, 48));
        // and the south pole is hidden
        assert!(p.project(-90.0, 0.0).is_none());
    }

    #[test]
    fn longitude_wraps() {
        assert_eq!(wrap_longitude(180.0), -180.0);
        assert_eq!(wrap_longitude(-180.0), -180.0);
        assert_eq!(wrap_longitude(540.0), -180.0);
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(45.0), 45.0);
    }

    #[test]
    fn tilt_clamps_at_the_poles() {
        assert_eq!(clamp_tilt(120.0), 90.0);
        assert_eq!(clamp_tilt(-95.0), -90.0);
        assert_eq!(clamp_tilt(10.0), 10.0);
    }

    #[test]
    fn shortest_delta_crosses_the_dateline() {
        assert_eq!(shortest_delta(170.0, -170.0), 20.0);
        assert_eq!(shortest_delta(-170.0, 170.0), -20.0);
    }
}
