use crate::map::markers::Graphic;
use crate::map::viewpoint::{AnimationCurve, Viewpoint};
use serde::{Deserialize, Serialize};

/// Everything the map surface can ask the session to do.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum SessionEvent {
    Search { text: String },
    PageRequested { page: usize },
    MoreRequested,
    /// `None` when the click hit no marker.
    MarkerClicked { id: Option<usize> },
    StepRequested { forward: bool },
    PageProbe { forward: bool },
    ZoomRequested { magnify: bool },
}

impl SessionEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Search { .. } => "search",
            Self::PageRequested { .. } => "pageRequested",
            Self::MoreRequested => "moreRequested",
            Self::MarkerClicked { .. } => "markerClicked",
            Self::StepRequested { .. } => "stepRequested",
            Self::PageProbe { .. } => "pageProbe",
            Self::ZoomRequested { .. } => "zoomRequested",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum SurfaceCommand {
    ReplaceGraphics {
        graphics: Vec<Graphic>,
    },
    #[serde(rename_all = "camelCase")]
    PanTo {
        viewpoint: Viewpoint,
        duration_secs: f32,
        curve: AnimationCurve,
    },
    SetViewpoint {
        viewpoint: Viewpoint,
    },
    SetScale {
        scale: f64,
    },
    PageAvailability {
        forward: bool,
        /// `None` when there is no such page.
        page: Option<usize>,
    },
}
