//! Pencil-case surface configuration.
//!
//! Item regions, the easter-egg zone and the collectible pool are authored
//! data rather than code. They are loaded from JSON (the calibration
//! recorder emits the same format) and validated once at startup.

use serde::{Deserialize, Serialize};

use crate::collectible::{Collectible, CollectiblePool};
use crate::geometry::Point;
use crate::hit_test::EasterEggZone;
use crate::region::{RegionError, RegionRegistry, RegionSet};

/// Id reported in errors about the easter-egg zone.
pub const EASTER_EGG_ID: &str = "easter_egg";

/// Surface metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceMeta {
    pub name: String,
}

/// Complete surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PencilCaseConfig {
    pub meta: SurfaceMeta,
    pub items: RegionSet,
    /// Missing means the surface has no hidden zone.
    #[serde(default = "EasterEggZone::disabled")]
    pub easter_egg: EasterEggZone,
    #[serde(default)]
    pub collectibles: Vec<Collectible>,
}

/// Validated runtime pieces built from a [`PencilCaseConfig`].
#[derive(Debug, Clone)]
pub struct SurfaceParts {
    pub registry: RegionRegistry,
    pub easter_egg: EasterEggZone,
    pub collectibles: CollectiblePool,
}

impl PencilCaseConfig {
    /// Loads a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the configuration to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The 1990s pencil case shipped with the page.
    /// Loaded from config/default.json at compile time.
    pub fn default_pencil_case() -> Self {
        const DEFAULT_CONFIG_JSON: &str = include_str!("../config/default.json");
        Self::from_json(DEFAULT_CONFIG_JSON).expect("Failed to parse default pencil case JSON")
    }

    /// Validates the configuration and splits it into runtime parts.
    ///
    /// `seed` drives collectible draws.
    pub fn into_parts(self, seed: u64) -> Result<SurfaceParts, RegionError> {
        let zone = &self.easter_egg.points;
        if !zone.is_empty() && zone.len() < 3 {
            return Err(RegionError::invalid(
                EASTER_EGG_ID,
                format!("zone needs 0 or at least 3 points, got {}", zone.len()),
            ));
        }
        if !zone.iter().all(Point::is_finite) {
            return Err(RegionError::invalid(EASTER_EGG_ID, "zone has non-finite vertices"));
        }

        let registry = RegionRegistry::new(self.items)?;
        tracing::info!(
            "[config] loaded `{}`: {} items, {} collectibles",
            self.meta.name,
            registry.len(),
            self.collectibles.len()
        );

        Ok(SurfaceParts {
            registry,
            easter_egg: self.easter_egg,
            collectibles: CollectiblePool::new(self.collectibles, seed),
        })
    }
}
