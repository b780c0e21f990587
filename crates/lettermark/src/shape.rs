// Imports
use crate::ext::AabbExt;
use kurbo::Shape as _;
use p2d::bounding_volume::Aabb;
use serde::{Deserialize, Serialize};

/// Flattening tolerance for converting shapes to bezier paths.
const PATH_TOLERANCE: f64 = 0.25;

/// The shape of a drawable, inscribed into its render-time bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename = "shape")]
pub enum Shape {
    /// An axis-aligned rectangle filling the bounds.
    #[serde(rename = "rect")]
    Rect,
    /// An ellipse inscribed into the bounds.
    #[serde(rename = "oval")]
    Oval,
    /// A rounded rectangle filling the bounds.
    #[serde(rename = "rounded_rect")]
    RoundedRect {
        /// The corner radius, non-negative.
        #[serde(rename = "radius", with = "crate::serialize::f64_dp3")]
        radius: f64,
    },
}

impl Default for Shape {
    fn default() -> Self {
        Self::Rect
    }
}

impl Shape {
    /// The path of the filled shape, covering the full bounds.
    pub fn fill_path(&self, bounds: Aabb) -> kurbo::BezPath {
        self.path_in_rect(bounds.to_kurbo_rect())
    }

    /// The path of the shape outline, inset from the bounds on all sides.
    ///
    /// Pass `inset = thickness / 2` to stroke centered on the shape edge.
    /// A rounded rectangle keeps the corner radius of the fill, an oval strokes
    /// as the ellipse inscribed into the inset bounds.
    pub fn outline_path(&self, bounds: Aabb, inset: f64) -> kurbo::BezPath {
        self.path_in_rect(bounds.to_kurbo_rect().inset(-inset))
    }

    /// The corner radius, zero for shapes without one.
    pub fn corner_radius(&self) -> f64 {
        match self {
            Self::Rect | Self::Oval => 0.0,
            Self::RoundedRect { radius } => *radius,
        }
    }

    fn path_in_rect(&self, rect: kurbo::Rect) -> kurbo::BezPath {
        match self {
            Self::Rect => rect.to_path(PATH_TOLERANCE),
            Self::Oval => kurbo::Ellipse::from_rect(rect).to_path(PATH_TOLERANCE),
            Self::RoundedRect { radius } => {
                kurbo::RoundedRect::from_rect(rect, *radius).to_path(PATH_TOLERANCE)
            }
        }
    }
}
