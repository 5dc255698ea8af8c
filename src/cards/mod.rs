//! Card system: definitions, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data (`CardKind`, stats, effect hooks)
//! - `CardInstance`: Runtime card state (location, position, buffs, attachments)
//! - `CardRegistry`: Card definition lookup by id or name

pub mod attributes;
pub mod definition;
pub mod instance;
pub mod registry;

pub use attributes::{Element, LinkArrow, Location, Position, Race, SummonType};
pub use definition::{
    CardDefinition, CardId, CardKind, MaterialCondition, MaterialFilter, MaterialRules, MonsterStats,
    MonsterType, SpellKind, TrapKind,
};
pub use instance::{Buff, CardInstance};
pub use registry::CardRegistry;
