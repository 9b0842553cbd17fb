use crate::map::consts::{
    FOCUS_SCALE, INITIAL_CENTER, INITIAL_SCALE, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR,
};
use crate::map::models::LatLng;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Viewpoint {
    pub center: LatLng,
    pub scale: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationCurve {
    EaseInOutCubic,
}

impl Viewpoint {
    pub fn initial() -> Self {
        Self {
            center: INITIAL_CENTER,
            scale: INITIAL_SCALE,
        }
    }

    /// Close-up on a single marker.
    pub fn focused_on(center: LatLng) -> Self {
        Self {
            center,
            scale: FOCUS_SCALE,
        }
    }

    pub fn zoomed(&self, magnify: bool) -> Self {
        let factor = if magnify {
            ZOOM_IN_FACTOR
        } else {
            ZOOM_OUT_FACTOR
        };
        Self {
            center: self.center,
            scale: self.scale * factor,
        }
    }
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self::initial()
    }
}
