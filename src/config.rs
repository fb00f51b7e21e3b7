/// Resolved playback parameters, after merging CLI flags over the config
/// file over the defaults.
#[derive(Clone, Copy)]
pub struct PlayConfig {
    /// Real minutes the full catalog span plays back over.
    pub minutes: f64,
    /// Autorotation rate in degrees per second.
    pub rotate: f64,
    /// Initial tilt in degrees.
    pub tilt: f64,
    /// Initial longitude under the center of the view.
    pub lon: f64,
    /// Seconds to sleep between frames.
    pub time_step: f32,
    /// Start with playback paused.
    pub start_paused: bool,
}
