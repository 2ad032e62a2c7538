use geo::Point;
use shadewalk_core::TimeBucket;
use shadewalk_core::routing::DEFAULT_SHADE_PENALTY;

/// Longest single step a session accepts, in meters.
pub const DEFAULT_MAX_STEP_M: f64 = 120.0;
/// Arrival radius around the snapped goal, in meters.
pub const DEFAULT_GOAL_RADIUS_M: f64 = 25.0;
/// Sampling radius for shade estimates along the trail, in meters.
pub const DEFAULT_SAMPLE_RADIUS_M: f64 = 60.0;

/// Parameters for a walk session.
///
/// [`SessionConfig::new`] fills in walking-scale defaults; fields are public
/// so callers can adjust individual knobs before starting the session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Time of day the shade values are read for
    pub bucket: TimeBucket,
    /// Requested start coordinate, snapped to the network on session start
    pub start: Point<f64>,
    /// Requested goal coordinate, snapped to the network on session start
    pub end: Point<f64>,
    pub max_step_m: f64,
    pub goal_radius_m: f64,
    pub shade_sample_radius_m: f64,
    /// Sun exposure penalty used for the shadiest reference route
    pub shade_penalty: f64,
}

impl SessionConfig {
    pub fn new(start: Point<f64>, end: Point<f64>) -> Self {
        Self {
            bucket: TimeBucket::default(),
            start,
            end,
            max_step_m: DEFAULT_MAX_STEP_M,
            goal_radius_m: DEFAULT_GOAL_RADIUS_M,
            shade_sample_radius_m: DEFAULT_SAMPLE_RADIUS_M,
            shade_penalty: DEFAULT_SHADE_PENALTY,
        }
    }
}
