//! A single page session: owns the surface data and the interaction state,
//! turns pixel pointer events into transitions, and forwards effects to
//! observers.

use crate::collectible::{Collectible, CollectiblePool};
use crate::config::{PencilCaseConfig, SurfaceParts};
use crate::geometry::{self, GeometryError, SurfaceRect};
use crate::hit_test::EasterEggZone;
use crate::interaction::{Effect, HitContext, InteractionEvent, InteractionState};
use crate::region::{Region, RegionError, RegionRegistry};

/// Receives interaction output. All methods default to no-ops.
pub trait InteractionObserver {
    fn on_hover_change(&mut self, _region: Option<&str>) {}
    fn on_item_select(&mut self, _region: Option<&str>) {}
    fn on_easter_egg_triggered(&mut self, _collectible: &Collectible) {}
    fn on_empty_area_hover(&mut self, _active: bool) {}
}

/// Lid of the pencil case. Pointer input is only live when fully open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LidState {
    #[default]
    Closed,
    /// Opening animation running.
    Opening,
    Open,
}

pub struct PencilCaseSession {
    registry: RegionRegistry,
    easter_egg: EasterEggZone,
    collectibles: CollectiblePool,
    state: InteractionState,
    lid: LidState,
    /// Last pointer position relative to the surface, in pixels.
    pointer_px: Option<(f32, f32)>,
    observers: Vec<Box<dyn InteractionObserver>>,
}

impl std::fmt::Debug for PencilCaseSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PencilCaseSession")
            .field("regions", &self.registry.len())
            .field("state", &self.state)
            .field("lid", &self.lid)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl PencilCaseSession {
    pub fn new(parts: SurfaceParts) -> Self {
        Self {
            registry: parts.registry,
            easter_egg: parts.easter_egg,
            collectibles: parts.collectibles,
            state: InteractionState::new(),
            lid: LidState::Closed,
            pointer_px: None,
            observers: Vec::new(),
        }
    }

    /// Validates `config` and starts a closed session.
    pub fn from_config(config: PencilCaseConfig, seed: u64) -> Result<Self, RegionError> {
        Ok(Self::new(config.into_parts(seed)?))
    }

    pub fn subscribe(&mut self, observer: Box<dyn InteractionObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn lid(&self) -> LidState {
        self.lid
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    pub fn hovered_region(&self) -> Option<&Region> {
        self.state.hovered.as_deref().and_then(|id| self.registry.get(id))
    }

    pub fn selected_region(&self) -> Option<&Region> {
        self.state.selected.as_deref().and_then(|id| self.registry.get(id))
    }

    pub fn pointer_px(&self) -> Option<(f32, f32)> {
        self.pointer_px
    }

    /// Starts the opening animation. Only valid from `Closed`.
    pub fn open(&mut self) -> bool {
        if self.lid != LidState::Closed {
            return false;
        }
        self.lid = LidState::Opening;
        true
    }

    /// Marks the opening animation as finished.
    pub fn finish_opening(&mut self) -> bool {
        if self.lid != LidState::Opening {
            return false;
        }
        tracing::info!("[session] pencil case opened");
        self.lid = LidState::Open;
        true
    }

    pub fn is_interactive(&self) -> bool {
        self.lid == LidState::Open
    }

    /// Handles a pointer move at client pixel `(px, py)`.
    ///
    /// A degenerate surface is reported back and the event is skipped.
    pub fn pointer_move(
        &mut self,
        px: f32,
        py: f32,
        surface: &SurfaceRect,
    ) -> Result<(), GeometryError> {
        if !self.is_interactive() {
            return Ok(());
        }
        let point = geometry::pixel_to_percent(px, py, surface)?;
        self.pointer_px = Some((px - surface.left, py - surface.top));
        self.dispatch(InteractionEvent::PointerMove(point));
        Ok(())
    }

    /// Handles a click at client pixel `(px, py)`.
    pub fn click(&mut self, px: f32, py: f32, surface: &SurfaceRect) -> Result<(), GeometryError> {
        if !self.is_interactive() {
            tracing::debug!("[session] click ignored, lid is {:?}", self.lid);
            return Ok(());
        }
        let point = geometry::pixel_to_percent(px, py, surface)?;
        self.dispatch(InteractionEvent::Click(point));
        Ok(())
    }

    pub fn pointer_leave(&mut self) {
        self.pointer_px = None;
        self.dispatch(InteractionEvent::PointerLeave);
    }

    pub fn clear_selection(&mut self) {
        self.dispatch(InteractionEvent::ClearSelection);
    }

    /// Applies one event and notifies observers of every effect.
    pub fn dispatch(&mut self, event: InteractionEvent) {
        let ctx = HitContext::new(&self.registry, &self.easter_egg);
        let transition = self.state.apply(&event, &ctx);
        self.state = transition.state;

        for effect in transition.effects {
            match effect {
                Effect::HoverChanged(id) => {
                    for observer in &mut self.observers {
                        observer.on_hover_change(id.as_deref());
                    }
                }
                Effect::ItemSelected(id) => {
                    for observer in &mut self.observers {
                        observer.on_item_select(id.as_deref());
                    }
                }
                Effect::EmptyAreaHover(active) => {
                    for observer in &mut self.observers {
                        observer.on_empty_area_hover(active);
                    }
                }
                Effect::EasterEggTriggered(half) => {
                    let Some(collectible) = self.collectibles.draw() else {
                        tracing::warn!(
                            "[session] {half:?} half triggered but collectible pool is empty"
                        );
                        continue;
                    };
                    tracing::info!("[session] awarded collectible {}", collectible.id);
                    for observer in &mut self.observers {
                        observer.on_easter_egg_triggered(collectible);
                    }
                }
            }
        }
    }
}
