//! Playable duels.
//!
//! Each submodule registers its card catalog and builds a ready
//! `GameState`.

pub mod drytron_exodia;
