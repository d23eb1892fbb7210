//! Data-driven content definitions and loaders.
//!
//! This crate turns the data directory into the values arena-core consumes:
//! - Realm, equipment, passive and spiritual root catalogs (RON)
//! - Skills, trial zones and guild tier bonuses (TOML)
//! - Combat tuning (TOML)
//!
//! Loaders build one immutable [`arena_core::GameData`] snapshot; reloading
//! means loading a fresh snapshot and swapping it in.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, ContentFactory, LoadResult, TablesLoader, tables::Tables,
};
