//! Card instance identity.
//!
//! Every physical card in a duel (deck cards, extra deck cards, tokens)
//! gets a unique `EntityId` when it is spawned into the `GameState`.
//! Zone containers, materials, equipment and queued continuations all
//! refer to cards by id; the live `CardInstance` is always looked up in
//! the central store.
//!
//! ```
//! use exodia_drytron::core::EntityId;
//!
//! let id = EntityId::new(7);
//! assert_eq!(id.raw(), 7);
//! assert_eq!(id.to_string(), "Entity(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
///
/// Ids are never reused within a duel, so a stale id simply fails to
/// resolve once its card (e.g. a token) has left the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Source of steps no card is responsible for (setup draws, phase
    /// changes). Never allocated to an instance.
    pub const SYSTEM: EntityId = EntityId(u32::MAX);

    /// Create an entity id from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
