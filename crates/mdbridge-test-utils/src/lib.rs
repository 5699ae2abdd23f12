//! Shared test fixtures for the mdbridge workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`trees`]: [`SyncFixture`], a temporary Hugo tree, Obsidian vault and
//!   state file

pub mod trees;

pub use trees::SyncFixture;
