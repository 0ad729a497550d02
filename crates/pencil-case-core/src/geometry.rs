//! Percentage-space geometry for the pencil-case surface.
//!
//! All region data is authored in percent of the rendered image, so the same
//! coordinates stay valid however large the image is drawn. Pointer events
//! arrive in pixels and are normalized here before any hit test runs.

use serde::{Deserialize, Serialize};

/// Percentage of the surface width/height covered by 100 units.
pub const PERCENT_SCALE: f32 = 100.0;

/// Error type for coordinate conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// The surface has not been laid out yet (or is collapsed).
    #[error("surface has degenerate size {width}x{height}")]
    DegenerateSurface { width: f32, height: f32 },
}

/// A point in percentage-of-surface coordinates.
///
/// Values are nominally within `[0, 100]`, but pointer positions outside the
/// image produce out-of-range values which simply miss every region.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Rounds both components to one decimal place.
    pub fn rounded(self) -> Self {
        Self {
            x: round_tenth(self.x),
            y: round_tenth(self.y),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f32; 2]> for Point {
    fn from(value: [f32; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Axis-aligned rectangle in percentage coordinates, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Smallest rectangle enclosing all points, or `None` for an empty slice.
    pub fn bounding(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min, mut max) = (*first, *first);
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

/// On-screen bounding box of the surface, in pixels.
///
/// Owned by whatever renders the image; mirrors `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns an error unless both dimensions are strictly positive.
    pub fn ensure_laid_out(&self) -> Result<(), GeometryError> {
        // `!(x > 0)` also rejects NaN.
        if !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(GeometryError::DegenerateSurface {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Converts a client pixel position into percentage coordinates of `surface`.
pub fn pixel_to_percent(px: f32, py: f32, surface: &SurfaceRect) -> Result<Point, GeometryError> {
    surface.ensure_laid_out()?;
    Ok(Point::new(
        (px - surface.left) / surface.width * PERCENT_SCALE,
        (py - surface.top) / surface.height * PERCENT_SCALE,
    ))
}

/// Converts percentage coordinates back into a client pixel position.
pub fn percent_to_pixel(point: Point, surface: &SurfaceRect) -> (f32, f32) {
    (
        surface.left + point.x / PERCENT_SCALE * surface.width,
        surface.top + point.y / PERCENT_SCALE * surface.height,
    )
}

/// Inclusive containment test on all four edges.
pub fn point_in_rectangle(point: Point, rect: &Rect) -> bool {
    point.x >= rect.x
        && point.x <= rect.x + rect.width
        && point.y >= rect.y
        && point.y <= rect.y + rect.height
}

/// Even-odd ray casting, closing edge included.
///
/// Polygons with fewer than three vertices contain nothing. Points lying
/// exactly on an edge may land on either side.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        // The first condition guarantees pi.y != pj.y, so the division is safe.
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Vertex average of a polygon. Used as the anchor for hover labels.
#[allow(clippy::cast_precision_loss)]
pub fn polygon_centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f32;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(10.0, 10.0),
            Point::new(30.0, 10.0),
            Point::new(30.0, 30.0),
            Point::new(10.0, 30.0),
        ]
    }

    #[test]
    fn test_pixel_to_percent() {
        let surface = SurfaceRect::new(100.0, 50.0, 800.0, 400.0);
        let p = pixel_to_percent(500.0, 250.0, &surface).unwrap();
        assert!((p.x - 50.0).abs() < 1e-4);
        assert!((p.y - 50.0).abs() < 1e-4);

        // Outside the image is allowed and yields out-of-range values.
        let p = pixel_to_percent(0.0, 0.0, &surface).unwrap();
        assert!(p.x < 0.0 && p.y < 0.0);
    }

    #[test]
    fn test_degenerate_surface() {
        for surface in [
            SurfaceRect::new(0.0, 0.0, 0.0, 300.0),
            SurfaceRect::new(0.0, 0.0, 300.0, 0.0),
            SurfaceRect::new(0.0, 0.0, f32::NAN, 300.0),
            SurfaceRect::new(0.0, 0.0, -10.0, 300.0),
        ] {
            assert!(matches!(
                pixel_to_percent(10.0, 10.0, &surface),
                Err(GeometryError::DegenerateSurface { .. })
            ));
        }
    }

    #[test]
    fn test_pixel_round_trip() {
        let surface = SurfaceRect::new(37.0, 112.5, 793.0, 611.0);
        for (px, py) in [
            (37.0, 112.5),
            (420.3, 301.9),
            (829.9, 723.4),
            (512.0, 640.0),
        ] {
            let p = pixel_to_percent(px, py, &surface).unwrap();
            let (bx, by) = percent_to_pixel(p, &surface);
            assert!((bx - px).abs() < 0.1, "x: {bx} vs {px}");
            assert!((by - py).abs() < 0.1, "y: {by} vs {py}");

            // Rounding to a tenth of a percent stays within a tenth of the box.
            let (rx, ry) = percent_to_pixel(p.rounded(), &surface);
            assert!((rx - px).abs() <= surface.width * 0.001);
            assert!((ry - py).abs() <= surface.height * 0.001);
        }
    }

    #[test]
    fn test_rounded() {
        let p = Point::new(43.94, 9.05).rounded();
        assert!((p.x - 43.9).abs() < 1e-4);
        assert!((p.y - 9.1).abs() < 1e-4);
    }

    #[test]
    fn test_rectangle_inclusive_edges() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(point_in_rectangle(Point::new(10.0, 10.0), &rect));
        assert!(point_in_rectangle(Point::new(30.0, 30.0), &rect));
        assert!(point_in_rectangle(Point::new(30.0, 10.0), &rect));
        assert!(point_in_rectangle(Point::new(15.0, 15.0), &rect));
        assert!(!point_in_rectangle(Point::new(30.1, 15.0), &rect));
        assert!(!point_in_rectangle(Point::new(15.0, 9.9), &rect));
    }

    #[test]
    fn test_polygon_contains_centroid() {
        let polygons = [
            square(),
            vec![
                Point::new(50.0, 5.0),
                Point::new(90.0, 80.0),
                Point::new(10.0, 80.0),
            ],
            vec![
                Point::new(43.9, 9.1),
                Point::new(55.9, 9.0),
                Point::new(56.3, 33.9),
                Point::new(44.0, 33.8),
            ],
        ];
        for polygon in &polygons {
            let c = polygon_centroid(polygon).unwrap();
            assert!(point_in_polygon(c, polygon), "centroid {c:?} of {polygon:?}");
            assert!(!point_in_polygon(Point::new(500.0, 500.0), polygon));
            assert!(!point_in_polygon(Point::new(-50.0, 20.0), polygon));
        }
    }

    #[test]
    fn test_polygon_concave() {
        // U shape: the notch between the arms is outside.
        let u = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 20.0),
            Point::new(20.0, 20.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 30.0),
            Point::new(0.0, 30.0),
        ];
        assert!(point_in_polygon(Point::new(5.0, 10.0), &u));
        assert!(point_in_polygon(Point::new(25.0, 10.0), &u));
        assert!(!point_in_polygon(Point::new(15.0, 10.0), &u));
        assert!(point_in_polygon(Point::new(15.0, 25.0), &u));
    }

    #[test]
    fn test_degenerate_polygon() {
        assert!(!point_in_polygon(Point::new(0.0, 0.0), &[]));
        let line = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        assert!(!point_in_polygon(Point::new(5.0, 5.0), &line));
    }

    #[test]
    fn test_bounding_rect() {
        assert!(Rect::bounding(&[]).is_none());
        let r = Rect::bounding(&square()).unwrap();
        assert_eq!(r, Rect::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(r.center(), Point::new(20.0, 20.0));
    }
}
