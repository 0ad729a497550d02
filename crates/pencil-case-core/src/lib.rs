//! Pencil-Case Core Library
//!
//! Hit-testing and hover tracking for the interactive pencil-case page.
//! Pointer positions on the scaled artwork are normalized to percentage
//! coordinates, resolved against item regions and the hidden easter-egg
//! zone, and fed through a pure interaction state machine.
//!
//! The crate is UI-framework agnostic: the page subscribes an
//! [`InteractionObserver`] and forwards pointer events to a
//! [`PencilCaseSession`]. DOM helpers live behind the `web` feature.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod calibration;
pub mod collectible;
pub mod config;
pub mod geometry;
pub mod interaction;
pub mod region;
pub mod session;

#[cfg(feature = "web")]
pub mod web;

pub use calibration::{CalibratedRegion, CalibrationError, CalibrationRecorder};
pub use collectible::{Collectible, CollectibleKind, CollectiblePool};
pub use config::{PencilCaseConfig, SurfaceMeta, SurfaceParts};
pub use geometry::{GeometryError, Point, Rect, SurfaceRect};
pub use hit_test::{EasterEggZone, HitTarget, ZoneHalf};
pub use interaction::{Effect, HitContext, InteractionEvent, InteractionState, Transition};
pub use region::{Region, RegionError, RegionId, RegionRegistry, RegionSet, Shape};
pub use session::{InteractionObserver, LidState, PencilCaseSession};
