use crate::map::consts::{
    BADGE_DIAMETER, BADGE_FILL, BADGE_OFFSET_Y, LABEL_COLOR, MARKER_ICON, MARKER_SIZE,
};
use crate::map::models::{DisplayPoint, LatLng};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Graphic {
    /// Clickable marker; `id` is the index of the point it was built from.
    Icon {
        id: usize,
        position: LatLng,
        image: &'static str,
        width: f64,
        height: f64,
    },
    #[serde(rename_all = "camelCase")]
    Badge {
        position: LatLng,
        diameter: f64,
        fill: &'static str,
        offset_y: f64,
    },
    #[serde(rename_all = "camelCase")]
    Label {
        position: LatLng,
        text: String,
        color: &'static str,
        bold: bool,
        offset_y: f64,
    },
}

impl Graphic {
    pub fn marker_id(&self) -> Option<usize> {
        match self {
            Self::Icon { id, .. } => Some(*id),
            _ => None,
        }
    }
}

pub fn layout_markers(points: &[DisplayPoint]) -> Vec<Graphic> {
    let mut graphics = Vec::with_capacity(points.len());
    for (id, point) in points.iter().enumerate() {
        graphics.push(Graphic::Icon {
            id,
            position: point.position,
            image: MARKER_ICON,
            width: MARKER_SIZE,
            height: MARKER_SIZE,
        });
        if point.occurrences > 1 {
            graphics.push(Graphic::Badge {
                position: point.position,
                diameter: BADGE_DIAMETER,
                fill: BADGE_FILL,
                offset_y: BADGE_OFFSET_Y,
            });
            graphics.push(Graphic::Label {
                position: point.position,
                text: point.occurrences.to_string(),
                color: LABEL_COLOR,
                bold: true,
                offset_y: BADGE_OFFSET_Y,
            });
        }
    }
    graphics
}
