//! Set-delta helper for flat value lists.
//!
//! Many device configuration items are flat sets expressed as CLI lists:
//! route targets, VLAN membership, community members. Reconciling those does
//! not need the tree comparator; it needs the two command sets "what to add"
//! and "what to remove". This module computes them from a desired and a
//! current list, honoring the same merge/replace semantics as
//! [`crate::reconcile`]: merge never removes anything.

use serde::Serialize;

use crate::reconcile::Mode;

/// The add/remove command sets produced by [`delta_add_remove`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Delta<T> {
    /// Values present in the desired list but not on the device
    pub add: Vec<T>,
    /// Values present on the device but not in the desired list
    pub remove: Vec<T>,
}

impl<T> Delta<T> {
    /// True when no commands need to be issued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// Compute the add/remove sets between a desired and a current value list.
///
/// Duplicates collapse; output order follows first appearance in the
/// corresponding input list. Under [`Mode::Merge`] the remove set is always
/// empty, since a merge apply leaves unlisted values in place.
pub fn delta_add_remove<T>(mode: Mode, should: &[T], current: &[T]) -> Delta<T>
where
    T: Clone + PartialEq,
{
    let mut delta = Delta {
        add: Vec::new(),
        remove: Vec::new(),
    };
    for value in should {
        if !current.contains(value) && !delta.add.contains(value) {
            delta.add.push(value.clone());
        }
    }
    if mode == Mode::Replace {
        for value in current {
            if !should.contains(value) && !delta.remove.contains(value) {
                delta.remove.push(value.clone());
            }
        }
    }
    delta
}
