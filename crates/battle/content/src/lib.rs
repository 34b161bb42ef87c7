//! Data-driven battle inputs.
//!
//! Provides loaders for the files a battle is built from:
//! - Battle rules (data-driven via TOML)
//! - Battle scenarios: players, ship designs and fleets (data-driven via RON)
//!
//! All loaders deserialize straight into battle-core types.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{LoadResult, RulesLoader, ScenarioFile, ScenarioLoader};
