// Imports
use p2d::bounding_volume::Aabb;

/// Extension trait for [`na::Vector2<f64>`].
pub trait Vector2Ext
where
    Self: Sized,
{
    /// Converts to kurbo::Point
    fn to_kurbo_point(&self) -> kurbo::Point;
}

impl Vector2Ext for na::Vector2<f64> {
    fn to_kurbo_point(&self) -> kurbo::Point {
        kurbo::Point::new(self[0], self[1])
    }
}

/// Extension trait for [p2d::bounding_volume::Aabb].
pub trait AabbExt
where
    Self: Sized,
{
    /// Converts a Aabb to a kurbo Rectangle
    fn to_kurbo_rect(&self) -> kurbo::Rect;
    /// Converts a kurbo Rectangle to Aabb
    fn from_kurbo_rect(rect: kurbo::Rect) -> Self;
}

impl AabbExt for Aabb {
    fn to_kurbo_rect(&self) -> kurbo::Rect {
        kurbo::Rect::from_points(
            self.mins.coords.to_kurbo_point(),
            self.maxs.coords.to_kurbo_point(),
        )
    }

    fn from_kurbo_rect(rect: kurbo::Rect) -> Self {
        Aabb::new(na::point![rect.x0, rect.y0], na::point![rect.x1, rect.y1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_kurbo_rect_conversions() {
        let aabb = Aabb::new(na::point![1.0, 2.0], na::point![4.0, 8.0]);
        let rect = aabb.to_kurbo_rect();

        assert_eq!(rect, kurbo::Rect::new(1.0, 2.0, 4.0, 8.0));
        assert_eq!(Aabb::from_kurbo_rect(rect), aabb);
    }
}
