//! Interaction state machine for the opened pencil case.
//!
//! Transitions are pure: [`InteractionState::apply`] takes the previous
//! state and one event and returns the next state plus the effects the UI
//! should react to. Nothing here touches the DOM or draws collectibles; the
//! session layer does that with the emitted [`Effect`]s.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::hit_test::{EasterEggZone, HitTarget, ZoneHalf, resolve_target};
use crate::region::{RegionId, RegionRegistry};

/// Input event in percentage coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionEvent {
    PointerMove(Point),
    PointerLeave,
    Click(Point),
    /// The item detail view was dismissed.
    ClearSelection,
}

/// Side effect of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    HoverChanged(Option<RegionId>),
    ItemSelected(Option<RegionId>),
    EasterEggTriggered(ZoneHalf),
    /// Pointer is over an untriggered part of the egg zone (and no item).
    EmptyAreaHover(bool),
}

/// Regions consulted by every transition.
#[derive(Debug, Clone, Copy)]
pub struct HitContext<'a> {
    pub registry: &'a RegionRegistry,
    pub easter_egg: &'a EasterEggZone,
}

impl<'a> HitContext<'a> {
    pub fn new(registry: &'a RegionRegistry, easter_egg: &'a EasterEggZone) -> Self {
        Self {
            registry,
            easter_egg,
        }
    }

    fn target(&self, point: Point) -> HitTarget {
        resolve_target(point, self.registry, self.easter_egg)
    }
}

/// Per-session interaction state. Starts empty and is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionState {
    pub hovered: Option<RegionId>,
    pub selected: Option<RegionId>,
    pub upper_zone_triggered: bool,
    pub lower_zone_triggered: bool,
    pub hovering_trigger_area: bool,
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: InteractionState,
    pub effects: Vec<Effect>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_triggered(&self, half: ZoneHalf) -> bool {
        match half {
            ZoneHalf::Upper => self.upper_zone_triggered,
            ZoneHalf::Lower => self.lower_zone_triggered,
        }
    }

    fn set_triggered(&mut self, half: ZoneHalf) {
        match half {
            ZoneHalf::Upper => self.upper_zone_triggered = true,
            ZoneHalf::Lower => self.lower_zone_triggered = true,
        }
    }

    /// Computes the next state for `event`.
    pub fn apply(&self, event: &InteractionEvent, ctx: &HitContext<'_>) -> Transition {
        let mut next = self.clone();
        let mut effects = Vec::new();

        match *event {
            InteractionEvent::PointerMove(point) => {
                let target = ctx.target(point);
                let hovered = target.item().map(str::to_string);
                let over_trigger =
                    matches!(target, HitTarget::EasterEgg(half) if !self.is_triggered(half));
                next.update_hover(hovered, over_trigger, &mut effects);
            }
            InteractionEvent::PointerLeave => {
                next.update_hover(None, false, &mut effects);
            }
            InteractionEvent::Click(point) => match ctx.target(point) {
                HitTarget::Item(id) => {
                    tracing::debug!("[interaction] selected {id}");
                    next.selected = Some(id.clone());
                    effects.push(Effect::ItemSelected(Some(id)));
                }
                HitTarget::EasterEgg(half) if !self.is_triggered(half) => {
                    tracing::info!("[interaction] easter egg triggered ({half:?} half)");
                    next.set_triggered(half);
                    effects.push(Effect::EasterEggTriggered(half));
                    // The half under the pointer is spent now.
                    let hovered = next.hovered.clone();
                    next.update_hover(hovered, false, &mut effects);
                }
                HitTarget::EasterEgg(half) => {
                    tracing::debug!("[interaction] {half:?} half already triggered");
                }
                HitTarget::Empty => {}
            },
            InteractionEvent::ClearSelection => {
                if next.selected.take().is_some() {
                    effects.push(Effect::ItemSelected(None));
                }
            }
        }

        Transition {
            state: next,
            effects,
        }
    }

    fn update_hover(
        &mut self,
        hovered: Option<RegionId>,
        over_trigger: bool,
        effects: &mut Vec<Effect>,
    ) {
        if hovered != self.hovered {
            tracing::debug!("[interaction] hover changed to {hovered:?}");
            self.hovered.clone_from(&hovered);
            effects.push(Effect::HoverChanged(hovered));
        }
        if over_trigger != self.hovering_trigger_area {
            self.hovering_trigger_area = over_trigger;
            effects.push(Effect::EmptyAreaHover(over_trigger));
        }
    }
}
