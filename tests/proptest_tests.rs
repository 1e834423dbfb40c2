//! Property-based tests for Confsync using proptest.
//!
//! Random configuration documents exercise the algebraic properties of the
//! reconciler that the example-based tests can only spot-check:
//! - Reflexivity of both modes
//! - Order independence for sequences and mappings
//! - Merge monotonicity under extension of the current state
//! - Replace non-monotonicity under the same extension
//! - Ingestion round-tripping through the JSON form

use confsync::prelude::*;
use proptest::prelude::*;

// ============================================================================
// Strategies for generating configuration documents
// ============================================================================

/// Strategy for scalar leaf values
fn scalar_value() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i64>().prop_map(|n| serde_json::Value::Number(n.into())),
        "[a-zA-Z0-9_.:-]{0,12}".prop_map(serde_json::Value::String),
    ]
}

/// Strategy for arbitrary nested configuration values.
///
/// Single-element `[null]` arrays come out of this generator too, which is
/// intentional: the presence marker must obey the same properties as any
/// other node.
fn config_value() -> impl Strategy<Value = serde_json::Value> {
    scalar_value().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|entries| serde_json::Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// Strategy for whole documents (mapping at the root, like device payloads)
fn config_document() -> impl Strategy<Value = serde_json::Value> {
    prop::collection::btree_map("[a-z]{1,6}", config_value(), 0..5)
        .prop_map(|entries| serde_json::Value::Object(entries.into_iter().collect()))
}

/// Recursively reverse sequence element order and mapping entry order.
fn reordered(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().rev().map(reordered).collect())
        }
        serde_json::Value::Object(entries) => {
            let mut out = serde_json::Map::new();
            for (key, entry) in entries.iter().rev() {
                out.insert(key.clone(), reordered(entry));
            }
            serde_json::Value::Object(out)
        }
        other => other.clone(),
    }
}

fn tree_of(value: serde_json::Value) -> ConfigTree {
    ConfigTree::try_from(value).expect("generated document is within depth bounds")
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_reflexivity(doc in config_document()) {
        let tree = tree_of(doc);
        prop_assert!(in_sync_for_merge(Some(&tree), Some(&tree)));
        prop_assert!(in_sync_for_replace(Some(&tree), Some(&tree)));
    }

    #[test]
    fn prop_order_independence(doc in config_document()) {
        let forward = tree_of(doc.clone());
        let backward = tree_of(reordered(&doc));
        prop_assert!(in_sync_for_merge(Some(&forward), Some(&backward)));
        prop_assert!(in_sync_for_replace(Some(&forward), Some(&backward)));
    }

    #[test]
    fn prop_merge_monotonic_under_extension(doc in config_document(), extra in config_value()) {
        let should = tree_of(doc.clone());

        // Extend the current state with a key the generator cannot produce
        let serde_json::Value::Object(mut extended) = doc else {
            unreachable!("document strategy yields objects");
        };
        extended.insert("zz9extra".to_string(), extra);
        let is = tree_of(serde_json::Value::Object(extended));

        // The subset is still present after extension
        prop_assert!(in_sync_for_merge(Some(&should), Some(&is)));
        // An exact replace is no longer a no-op
        prop_assert!(!in_sync_for_replace(Some(&should), Some(&is)));
    }

    #[test]
    fn prop_needs_update_negates_in_sync(
        should in config_document(),
        is in config_document(),
    ) {
        let should = tree_of(should);
        let is = tree_of(is);
        for mode in [Mode::Merge, Mode::Replace] {
            prop_assert_eq!(
                needs_update(mode, Some(&should), Some(&is)),
                !in_sync(mode, Some(&should), Some(&is))
            );
        }
    }

    #[test]
    fn prop_json_round_trip_preserves_tree(doc in config_document()) {
        let tree = tree_of(doc);
        let reparsed = ConfigTree::from_json_str(&tree.to_json_string()).unwrap();
        prop_assert_eq!(&reparsed, &tree);
    }

    #[test]
    fn prop_merge_delta_never_removes(
        should in prop::collection::vec("[a-z0-9:]{1,8}", 0..8),
        current in prop::collection::vec("[a-z0-9:]{1,8}", 0..8),
    ) {
        let delta = delta_add_remove(Mode::Merge, &should, &current);
        prop_assert!(delta.remove.is_empty());
        // Everything added was genuinely missing
        for value in &delta.add {
            prop_assert!(should.contains(value));
            prop_assert!(!current.contains(value));
        }
    }
}
