//! Named clickable regions over the pencil-case surface.
//!
//! A [`RegionRegistry`] is built once from authored data and never mutated
//! afterwards. Lookup walks the regions in registration order, so when two
//! regions overlap the one registered first wins.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Point, Rect};

/// Unique identifier of a region.
pub type RegionId = String;

/// Error type for region validation.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    #[error("invalid region `{id}`: {reason}")]
    InvalidRegion { id: RegionId, reason: String },
    #[error("malformed region data: {0}")]
    Json(#[from] serde_json::Error),
}

impl RegionError {
    pub(crate) fn invalid(id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRegion {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

/// Region outline in percentage coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Rectangle {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Vertices in drawing order; the last one connects back to the first.
    Polygon { points: Vec<Point> },
}

impl Shape {
    pub fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::Rectangle {
            x,
            y,
            width,
            height,
        }
    }

    pub fn polygon(points: impl IntoIterator<Item = [f32; 2]>) -> Self {
        Self::Polygon {
            points: points.into_iter().map(Point::from).collect(),
        }
    }

    /// Returns true if the point lies inside the shape.
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Self::Rectangle {
                x,
                y,
                width,
                height,
            } => geometry::point_in_rectangle(point, &Rect::new(*x, *y, *width, *height)),
            Self::Polygon { points } => geometry::point_in_polygon(point, points),
        }
    }

    /// Where the hover label for this shape is drawn.
    pub fn label_anchor(&self) -> Point {
        match self {
            Self::Rectangle {
                x,
                y,
                width,
                height,
            } => Rect::new(*x, *y, *width, *height).center(),
            Self::Polygon { points } => {
                geometry::polygon_centroid(points).unwrap_or(Point::new(50.0, 50.0))
            }
        }
    }

    fn validate(&self, id: &str) -> Result<(), RegionError> {
        match self {
            Self::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                if ![x, y, width, height].iter().all(|v| v.is_finite()) {
                    return Err(RegionError::invalid(id, "rectangle has non-finite bounds"));
                }
                if *width < 0.0 || *height < 0.0 {
                    return Err(RegionError::invalid(
                        id,
                        format!("rectangle has negative size {width}x{height}"),
                    ));
                }
            }
            Self::Polygon { points } => {
                if points.len() < 3 {
                    return Err(RegionError::invalid(
                        id,
                        format!("polygon needs at least 3 points, got {}", points.len()),
                    ));
                }
                if !points.iter().all(Point::is_finite) {
                    return Err(RegionError::invalid(id, "polygon has non-finite vertices"));
                }
            }
        }
        Ok(())
    }
}

/// A named clickable area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    pub shape: Shape,
}

impl Region {
    pub fn new(id: impl Into<RegionId>, shape: Shape) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            emoji: String::new(),
            shape,
        }
    }

    /// Attaches display metadata.
    #[must_use]
    pub fn with_label(mut self, name: impl Into<String>, emoji: impl Into<String>) -> Self {
        self.name = name.into();
        self.emoji = emoji.into();
        self
    }

    pub fn contains(&self, point: Point) -> bool {
        self.shape.contains(point)
    }
}

/// Ordered region list. Order only matters for overlaps.
pub type RegionSet = Vec<Region>;

/// Validated, immutable set of regions.
#[derive(Debug, Clone, Default)]
pub struct RegionRegistry {
    regions: RegionSet,
}

impl RegionRegistry {
    /// Validates every region and builds the registry.
    ///
    /// Rejects polygons with fewer than three points, rectangles with a
    /// negative size, non-finite coordinates, and duplicate ids.
    pub fn new(regions: RegionSet) -> Result<Self, RegionError> {
        let mut seen = HashSet::with_capacity(regions.len());
        for region in &regions {
            if region.id.is_empty() {
                return Err(RegionError::invalid("", "region id is empty"));
            }
            if !seen.insert(region.id.as_str()) {
                return Err(RegionError::invalid(&region.id, "duplicate region id"));
            }
            region.shape.validate(&region.id)?;
        }
        tracing::debug!("[region] registered {} regions", regions.len());
        Ok(Self { regions })
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// First region, in registration order, whose shape contains the point.
    pub fn find_region_containing(&self, point: Point) -> Option<&Region> {
        self.regions.iter().find(|r| r.contains(point))
    }
}
