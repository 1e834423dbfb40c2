//! Tree reconciliation comparator.
//!
//! Before a configuration orchestrator issues any mutating command to a
//! managed device, it needs to know whether the device's *current*
//! configuration already satisfies the *desired* one. This module answers
//! that question for two apply semantics:
//!
//! - [`Mode::Merge`]: the desired tree is a required sub-structure. Extra
//!   keys and elements on the device are fine. This is the idempotence check
//!   before an additive apply.
//! - [`Mode::Replace`]: the desired tree must match the device state exactly,
//!   in both directions. This is the idempotence check before a destructive
//!   full-replace apply.
//!
//! Both modes ignore element order in sequences and key order in mappings,
//! because the underlying configuration protocol guarantees neither. A
//! [`ConfigTree::Required`] node in the desired tree matches any non-null
//! current value ("the feature block must exist, values are inside").
//!
//! The comparison is a pure recursive function over borrowed trees: no
//! cloning, no shared state, no I/O. It always returns a boolean; divergence
//! is an answer, not an error. Sequence matching scans the current elements
//! for each desired element, so the worst case is quadratic in sequence
//! length.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Result;
use crate::tree::ConfigTree;

// ============================================================================
// Reconciliation mode
// ============================================================================

/// How a desired configuration is going to be applied, and therefore how
/// strictly the current state must match it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Desired state is merged into current state; extras are untouched
    Merge,
    /// Desired state fully replaces current state; extras would be removed
    Replace,
}

impl Mode {
    /// Short name used in log output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Merge => "merge",
            Mode::Replace => "replace",
        }
    }
}

// ============================================================================
// Public entry points
// ============================================================================

/// Check whether `is` already satisfies `should` under the given mode.
///
/// Absent (`None`) or null inputs coerce to an empty mapping. A desired tree
/// that requires nothing is satisfied by any current state under
/// [`Mode::Merge`]; under [`Mode::Replace`] it requires the current state to
/// be equally empty.
#[must_use]
pub fn in_sync(mode: Mode, should: Option<&ConfigTree>, is: Option<&ConfigTree>) -> bool {
    let empty = ConfigTree::empty();
    let should = coerce(should, &empty);
    let is = coerce(is, &empty);

    let result = if should.is_vacuous() {
        match mode {
            Mode::Merge => true,
            Mode::Replace => is.is_vacuous(),
        }
    } else {
        equivalent(mode, should, is)
    };

    debug!(
        mode = mode.as_str(),
        in_sync = result,
        "compared desired configuration against current state"
    );
    result
}

/// True iff `should`, treated as a required sub-structure, is already present
/// within `is`. Extra keys and elements in `is` are permitted.
#[must_use]
pub fn in_sync_for_merge(should: Option<&ConfigTree>, is: Option<&ConfigTree>) -> bool {
    in_sync(Mode::Merge, should, is)
}

/// True iff `should` and `is` are structurally equivalent as whole trees;
/// anything present in `is` must also appear in `should`.
#[must_use]
pub fn in_sync_for_replace(should: Option<&ConfigTree>, is: Option<&ConfigTree>) -> bool {
    in_sync(Mode::Replace, should, is)
}

/// Whether an apply is needed at all: the negation of [`in_sync`].
#[must_use]
pub fn needs_update(mode: Mode, should: Option<&ConfigTree>, is: Option<&ConfigTree>) -> bool {
    !in_sync(mode, should, is)
}

/// Parse two JSON documents and compare them under [`Mode::Merge`].
///
/// Blank documents coerce to an empty mapping, matching what a device returns
/// for an unconfigured feature block.
///
/// # Errors
///
/// Returns a parse error if either document is malformed.
pub fn in_sync_for_merge_json(should: &str, is: &str) -> Result<bool> {
    let should = ConfigTree::from_json_str(should)?;
    let is = ConfigTree::from_json_str(is)?;
    Ok(in_sync_for_merge(Some(&should), Some(&is)))
}

/// Parse two JSON documents and compare them under [`Mode::Replace`].
///
/// # Errors
///
/// Returns a parse error if either document is malformed.
pub fn in_sync_for_replace_json(should: &str, is: &str) -> Result<bool> {
    let should = ConfigTree::from_json_str(should)?;
    let is = ConfigTree::from_json_str(is)?;
    Ok(in_sync_for_replace(Some(&should), Some(&is)))
}

/// Coerce an absent or null document to the empty mapping.
fn coerce<'a>(tree: Option<&'a ConfigTree>, empty: &'a ConfigTree) -> &'a ConfigTree {
    match tree {
        Some(tree) if !tree.is_null() => tree,
        _ => empty,
    }
}

// ============================================================================
// Core comparison
// ============================================================================

/// The single comparator both public operations delegate to.
fn equivalent(mode: Mode, should: &ConfigTree, is: &ConfigTree) -> bool {
    match (should, is) {
        // A presence marker is satisfied by any non-null current value
        (ConfigTree::Required, _) => !is.is_null(),
        (ConfigTree::Mapping(should), ConfigTree::Mapping(is)) => {
            mapping_equivalent(mode, should, is)
        }
        (ConfigTree::Sequence(should), ConfigTree::Sequence(is)) => {
            sequence_equivalent(mode, should, is)
        }
        // Leaf vs leaf, and any cross-kind pairing: plain equality. A mapping
        // never unifies with a sequence or a scalar.
        _ => should == is,
    }
}

fn mapping_equivalent(
    mode: Mode,
    should: &indexmap::IndexMap<String, ConfigTree>,
    is: &indexmap::IndexMap<String, ConfigTree>,
) -> bool {
    // Replace permits no extra keys on the current side
    if mode == Mode::Replace && should.len() != is.len() {
        trace!(
            should_keys = should.len(),
            is_keys = is.len(),
            "replace mode key count mismatch"
        );
        return false;
    }
    for (key, should_value) in should {
        match is.get(key) {
            None => {
                // A missing key satisfies a null requirement and nothing else;
                // in particular a presence marker fails here.
                if !should_value.is_null() {
                    trace!(key = %key, "required key missing from current state");
                    return false;
                }
            }
            Some(is_value) => {
                if !equivalent(mode, should_value, is_value) {
                    trace!(key = %key, "value mismatch under key");
                    return false;
                }
            }
        }
    }
    true
}

fn sequence_equivalent(mode: Mode, should: &[ConfigTree], is: &[ConfigTree]) -> bool {
    if mode == Mode::Replace && should.len() != is.len() {
        trace!(
            should_len = should.len(),
            is_len = is.len(),
            "replace mode sequence length mismatch"
        );
        return false;
    }
    for should_item in should {
        // Order-free containment: any current element may satisfy this one.
        // Elements are not consumed by a match.
        let matched = is.iter().any(|is_item| equivalent(mode, should_item, is_item));
        if !matched && !should_item.is_null() {
            trace!("sequence element has no match in current state");
            return false;
        }
    }
    true
}

// ============================================================================
// Tests
// ============================================================================
