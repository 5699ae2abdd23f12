//! Change detection and reconciliation engine for mdbridge
//!
//! Keeps a Hugo content tree and an Obsidian vault in step:
//!
//! - **Scanner**: maps every markdown document to a stable [`DocumentId`],
//!   collapsing single-file and directory-form layouts onto one id
//! - **State**: per-side fingerprints and per-document shape hints from the
//!   previous run
//! - **Classification**: one [`SyncAction`] per document per run
//! - **Executor**: writes the winning side onto the other, converting markup
//!   and keeping the document's layout sticky across round trips
//! - **Engine / Session**: drives a full pass and rewrites the state once
//!
//! # Architecture
//!
//! ```text
//!                mdbridge-cli
//!                     |
//!               mdbridge-core
//!                /          \
//!       mdbridge-fs    mdbridge-convert
//! ```

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod id;
pub mod layout;
pub mod report;
pub mod resolver;
pub mod scanner;
pub mod session;
pub mod side;
pub mod state;
pub mod transform;

pub use action::{SyncAction, classify};
pub use config::{SyncConfig, SyncDirection, SyncOptions};
pub use engine::{PlannedAction, Snapshot, SyncEngine};
pub use error::{Error, Result};
pub use executor::Executor;
pub use id::DocumentId;
pub use layout::Layout;
pub use report::{Outcome, ReportEntry, SkipReason, SyncReport};
pub use resolver::{Conflict, ConflictResolver, ForcedResolver, Resolution};
pub use scanner::{DocumentMap, detect_layout, identify, scan};
pub use session::SyncSession;
pub use side::Side;
pub use state::SyncState;
pub use transform::{MarkupTransform, Transform};

pub use mdbridge_convert::Direction;
