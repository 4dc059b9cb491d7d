/// Size of the anatomical vocabulary (COCO 17-keypoint layout).
pub const JOINT_COUNT: usize = 17;

pub const MAX_SCORE: f64 = 100.0;
pub const MIN_SCORE: f64 = 0.0;

/// Lower bounds of the qualitative feedback bands.
pub const BAND_EXCELLENT: f64 = 90.0;
pub const BAND_GOOD: f64 = 80.0;
pub const BAND_FAIR: f64 = 70.0;

/// Decimal places kept in reported scores and timestamps.
pub const REPORT_PRECISION: i32 = 2;
