use crate::map::models::LatLng;

pub const MARKER_ICON: &str = "marker";
pub const MARKER_SIZE: f64 = 30.0;

pub const BADGE_DIAMETER: f64 = 20.0;
pub const BADGE_OFFSET_Y: f64 = -30.0;
pub const BADGE_FILL: &str = "white";
pub const LABEL_COLOR: &str = "black";

pub const INITIAL_CENTER: LatLng = LatLng {
    lat: -41.35249807015349,
    lng: 173.07275377115386,
};
pub const INITIAL_SCALE: f64 = 12_000_000.0;

pub const FOCUS_SCALE: f64 = 100_000.0;
pub const PAN_DURATION_SECS: f32 = 1.5;

pub const ZOOM_IN_FACTOR: f64 = 0.8;
pub const ZOOM_OUT_FACTOR: f64 = 1.2;
