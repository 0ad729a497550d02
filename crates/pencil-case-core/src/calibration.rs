//! Coordinate calibration recorder.
//!
//! Development tool for authoring region data: the operator clicks around an
//! item on the artwork, and the recorder turns those clicks into polygon or
//! rectangle regions ready to paste into the surface configuration. It is
//! never on the runtime hit-testing path.

use std::collections::HashSet;

use serde::Serialize;

use crate::geometry::{Point, Rect};
use crate::region::{Region, RegionSet, Shape};

/// Minimum number of clicks for a polygon.
pub const MIN_POLYGON_POINTS: usize = 3;
/// Minimum number of clicks for a rectangle (two opposite corners).
pub const MIN_RECTANGLE_POINTS: usize = 2;

/// Error type for calibration actions.
#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    #[error("need at least {required} points, have {actual}")]
    InsufficientPoints { required: usize, actual: usize },
    #[error("region needs a name and an emoji")]
    MissingLabel,
    #[error("failed to export regions: {0}")]
    Json(#[from] serde_json::Error),
}

/// A region sealed by the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibratedRegion {
    /// Recorder-local id (`item-1`, `item-2`, ...).
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub shape: Shape,
}

/// Records operator clicks into region definitions.
#[derive(Debug, Clone)]
pub struct CalibrationRecorder {
    pending: Vec<Point>,
    completed: Vec<CalibratedRegion>,
    next_id: u32,
}

impl Default for CalibrationRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationRecorder {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            completed: Vec::new(),
            next_id: 1,
        }
    }

    /// Points of the shape being drawn.
    pub fn pending(&self) -> &[Point] {
        &self.pending
    }

    pub fn completed(&self) -> &[CalibratedRegion] {
        &self.completed
    }

    /// Appends a click, rounded to a tenth of a percent.
    pub fn add_point(&mut self, point: Point) {
        self.pending.push(point.rounded());
    }

    /// Removes the most recent click, if any.
    pub fn undo_last_point(&mut self) -> Option<Point> {
        self.pending.pop()
    }

    /// Discards the shape being drawn.
    pub fn cancel(&mut self) {
        self.pending.clear();
    }

    /// Seals the pending clicks into a polygon region.
    pub fn complete_polygon(
        &mut self,
        name: &str,
        emoji: &str,
    ) -> Result<&CalibratedRegion, CalibrationError> {
        self.ensure_ready(MIN_POLYGON_POINTS, name, emoji)?;
        let points = std::mem::take(&mut self.pending);
        Ok(self.seal(name, emoji, Shape::Polygon { points }))
    }

    /// Seals the bounding box of the pending clicks into a rectangle region.
    pub fn complete_rectangle(
        &mut self,
        name: &str,
        emoji: &str,
    ) -> Result<&CalibratedRegion, CalibrationError> {
        self.ensure_ready(MIN_RECTANGLE_POINTS, name, emoji)?;
        let points = std::mem::take(&mut self.pending);
        let Some(rect) = Rect::bounding(&points) else {
            return Err(CalibrationError::InsufficientPoints {
                required: MIN_RECTANGLE_POINTS,
                actual: 0,
            });
        };
        // Corners are already rounded; this only strips subtraction noise.
        let size = Point::new(rect.width, rect.height).rounded();
        Ok(self.seal(
            name,
            emoji,
            Shape::rectangle(rect.x, rect.y, size.x, size.y),
        ))
    }

    /// Deletes a completed region. Returns false if the id is unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.completed.len();
        self.completed.retain(|r| r.id != id);
        before != self.completed.len()
    }

    /// Drops the pending shape and every completed region.
    pub fn clear_all(&mut self) {
        self.pending.clear();
        self.completed.clear();
    }

    /// Completed regions with ids derived from their names.
    ///
    /// Names that slugify to an id already taken get `-2`, `-3`, ... suffixes,
    /// skipping any suffix another name already produced. Names without a
    /// usable slug fall back to the recorder id.
    pub fn to_region_set(&self) -> RegionSet {
        let mut taken: HashSet<String> = HashSet::new();
        self.completed
            .iter()
            .map(|r| {
                let mut base = slug::slugify(&r.name);
                if base.is_empty() {
                    base.clone_from(&r.id);
                }
                let id = unique_id(&base, &taken);
                taken.insert(id.clone());
                Region {
                    id,
                    name: r.name.clone(),
                    emoji: r.emoji.clone(),
                    shape: r.shape.clone(),
                }
            })
            .collect()
    }

    /// Pretty JSON of [`Self::to_region_set`], in the `items` format of the
    /// surface configuration.
    pub fn export_json(&self) -> Result<String, CalibrationError> {
        #[derive(Serialize)]
        struct Export<'a> {
            items: &'a RegionSet,
        }
        let items = self.to_region_set();
        Ok(serde_json::to_string_pretty(&Export { items: &items })?)
    }

    fn ensure_ready(
        &self,
        required: usize,
        name: &str,
        emoji: &str,
    ) -> Result<(), CalibrationError> {
        if self.pending.len() < required {
            return Err(CalibrationError::InsufficientPoints {
                required,
                actual: self.pending.len(),
            });
        }
        if name.trim().is_empty() || emoji.trim().is_empty() {
            return Err(CalibrationError::MissingLabel);
        }
        Ok(())
    }

    fn seal(&mut self, name: &str, emoji: &str, shape: Shape) -> &CalibratedRegion {
        let region = CalibratedRegion {
            id: format!("item-{}", self.next_id),
            name: name.trim().to_string(),
            emoji: emoji.trim().to_string(),
            shape,
        };
        self.next_id += 1;
        tracing::info!("[calibration] completed {} ({})", region.id, region.name);
        self.completed.push(region);
        &self.completed[self.completed.len() - 1]
    }
}

fn unique_id(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}
