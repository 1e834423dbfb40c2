//! # Confsync - Configuration Tree Reconciliation
//!
//! Confsync decides whether a managed device's *current* configuration
//! already satisfies a *desired* configuration, before any mutating command
//! is issued. It is the idempotence check at the heart of a configuration
//! orchestrator driving devices whose state is exchanged as semi-structured
//! documents (JSON-bodied NXAPI/YANG payloads, YAML intent files).
//!
//! ## Core Concepts
//!
//! - **ConfigTree**: the parsed form of a configuration document - scalars,
//!   sequences, string-keyed mappings, and an explicit presence marker
//! - **Merge mode**: "is my subset already present?" - extra keys and
//!   elements on the device are fine; the check before an additive apply
//! - **Replace mode**: "is the current state exactly this?" - nothing extra
//!   may exist; the check before a destructive full-replace apply
//! - **Presence marker**: `[null]` in a desired document means "this item
//!   must exist with some value", for feature blocks that can only be
//!   toggled on or off
//! - **Delta**: add/remove command sets for flat value lists (route targets,
//!   VLAN membership) that reconcile as sets rather than trees
//!
//! Element order in sequences and key order in mappings carry no meaning for
//! comparison, because the underlying configuration protocol guarantees
//! neither.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Orchestration Caller                      │
//! │   (owns device transport and user intent - out of scope)  │
//! └──────────────────────────────────────────────────────────┘
//!            │ "should" document        │ "is" document
//!            ▼                          ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Document Ingestion (tree)                 │
//! │     JSON / YAML -> ConfigTree, depth-guarded, [null]      │
//! │             normalized to a presence marker               │
//! └──────────────────────────────────────────────────────────┘
//!            │                          │
//!            ▼                          ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │               Reconciler (reconcile, delta)               │
//! │      in_sync_for_merge / in_sync_for_replace / delta      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust
//! use confsync::prelude::*;
//!
//! fn main() -> confsync::Result<()> {
//!     // Desired: the BGP address family carries these two route targets.
//!     let should = ConfigTree::from_json_str(
//!         r#"{"bgp": {"asn": 65001, "route-targets": ["1:1", "2:2"]}}"#,
//!     )?;
//!     // Current state fetched from the device.
//!     let is = ConfigTree::from_json_str(
//!         r#"{"bgp": {"asn": 65001, "route-targets": ["2:2", "1:1", "3:3"],
//!             "log-neighbor-changes": true}}"#,
//!     )?;
//!
//!     // The subset is present: an additive apply would be a no-op.
//!     assert!(in_sync_for_merge(Some(&should), Some(&is)));
//!     // But a full replace would remove the extras, so it is needed.
//!     assert!(!in_sync_for_replace(Some(&should), Some(&is)));
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod delta;
pub mod error;
pub mod reconcile;
pub mod tree;

pub use delta::{delta_add_remove, Delta};
pub use error::{Error, Result};
pub use reconcile::{
    in_sync, in_sync_for_merge, in_sync_for_merge_json, in_sync_for_replace,
    in_sync_for_replace_json, needs_update, Mode,
};
pub use tree::{ConfigTree, Scalar, MAX_DEPTH};

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of commonly used types and functions.

    pub use crate::delta::{delta_add_remove, Delta};
    pub use crate::error::{Error, Result};
    pub use crate::reconcile::{
        in_sync, in_sync_for_merge, in_sync_for_replace, needs_update, Mode,
    };
    pub use crate::tree::{ConfigTree, Scalar};
}
