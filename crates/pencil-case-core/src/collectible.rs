//! Collectible cards awarded by the easter-egg zone.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// What kind of keepsake a collectible is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleKind {
    Note,
    Photo,
    Card,
    Secret,
}

/// A keepsake hidden in the lining of the pencil case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: CollectibleKind,
    #[serde(default)]
    pub emoji: String,
}

/// Awardable collectibles with a seeded RNG.
///
/// Draws are uniform and with replacement: the two halves of the zone may
/// award the same card.
#[derive(Debug, Clone)]
pub struct CollectiblePool {
    items: Vec<Collectible>,
    rng: ChaCha8Rng,
    seed: u64,
}

impl CollectiblePool {
    pub fn new(items: Vec<Collectible>, seed: u64) -> Self {
        Self {
            items,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn items(&self) -> &[Collectible] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restarts the draw sequence from the original seed.
    pub fn reseed(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }

    /// Picks a random collectible, or `None` if the pool is empty.
    pub fn draw(&mut self) -> Option<&Collectible> {
        if self.items.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..self.items.len());
        self.items.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<Collectible> {
        ["note", "photo", "card", "secret", "playlist"]
            .iter()
            .map(|id| Collectible {
                id: (*id).to_string(),
                name: id.to_uppercase(),
                description: String::new(),
                kind: CollectibleKind::Card,
                emoji: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_draw_is_deterministic() {
        let mut a = CollectiblePool::new(cards(), 7);
        let mut b = CollectiblePool::new(cards(), 7);
        for _ in 0..20 {
            let x = a.draw().map(|c| c.id.clone());
            let y = b.draw().map(|c| c.id.clone());
            assert_eq!(x, y);
            assert!(x.is_some());
        }
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut pool = CollectiblePool::new(cards(), 99);
        let first: Vec<_> = (0..5).map(|_| pool.draw().unwrap().id.clone()).collect();
        pool.reseed();
        let again: Vec<_> = (0..5).map(|_| pool.draw().unwrap().id.clone()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_empty_pool() {
        let mut pool = CollectiblePool::new(Vec::new(), 1);
        assert!(pool.is_empty());
        assert!(pool.draw().is_none());
    }

    #[test]
    fn test_kind_json() {
        let c: Collectible = serde_json::from_str(
            r#"{ "id": "cheat-sheet", "name": "Cheat codes", "kind": "secret" }"#,
        )
        .unwrap();
        assert_eq!(c.kind, CollectibleKind::Secret);
        assert!(c.emoji.is_empty());
    }
}
