//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check both cache variants against a plain `HashMap` model.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::cache::{ExclusiveCache, KeyValueCache, SharedCache};

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = u32> {
    0u32..1000
}

/// A single cache operation applied to both the cache and the model
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: u32 },
    Delete { key: String },
    SetDefault { key: String, value: u32 },
    GetOrSet { key: String, value: u32 },
    GetOrSetWith { key: String, value: u32 },
    Flush,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::SetDefault { key, value }),
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::GetOrSet { key, value }),
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::GetOrSetWith { key, value }),
        Just(CacheOp::Flush),
    ]
}

// == Model Check ==
/// Applies `ops` to `cache` and a model map, asserting they agree after each step.
fn check_against_model<C: KeyValueCache<u32>>(
    cache: &C,
    ops: Vec<CacheOp>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, u32> = HashMap::new();

    for op in ops {
        match op {
            CacheOp::Set { key, value } => {
                cache.set(key.clone(), value);
                model.insert(key, value);
            }
            CacheOp::Delete { key } => {
                cache.delete(&key);
                model.remove(&key);
            }
            CacheOp::SetDefault { key, value } => {
                cache.set_default(key.clone(), value);
                model.entry(key).or_insert(value);
            }
            CacheOp::GetOrSet { key, value } => {
                let returned = cache.get_or_set(&key, value);
                let expected = *model.entry(key).or_insert(value);
                prop_assert_eq!(returned, expected);
            }
            CacheOp::GetOrSetWith { key, value } => {
                let hit = model.contains_key(&key);
                let mut calls = 0;
                let returned = cache.get_or_set_with(&key, || {
                    calls += 1;
                    value
                });
                let expected = *model.entry(key).or_insert(value);
                prop_assert_eq!(returned, expected);
                prop_assert_eq!(calls, if hit { 0 } else { 1 });
            }
            CacheOp::Flush => {
                cache.flush();
                model.clear();
            }
        }

        prop_assert_eq!(cache.len(), model.len());
    }

    let mut keys = cache.keys();
    keys.sort();
    let mut expected_keys: Vec<String> = model.keys().cloned().collect();
    expected_keys.sort();
    prop_assert_eq!(keys, expected_keys);

    for (key, value) in &model {
        prop_assert_eq!(cache.get(key), Some(*value));
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any operation sequence leaves the exclusive cache equal to the model.
    #[test]
    fn prop_exclusive_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let cache = ExclusiveCache::new();
        check_against_model(&cache, ops)?;
    }

    // Any operation sequence leaves the shared cache equal to the model.
    #[test]
    fn prop_shared_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let cache = SharedCache::new();
        check_against_model(&cache, ops)?;
    }

    // The first value stored through get_or_set wins over later ones.
    #[test]
    fn prop_get_or_set_keeps_first_value(
        key in key_strategy(),
        first in value_strategy(),
        second in value_strategy()
    ) {
        let cache = SharedCache::new();

        prop_assert_eq!(cache.get_or_set(&key, first), first);
        prop_assert_eq!(cache.get_or_set(&key, second), first);
        prop_assert_eq!(cache.get(&key), Some(first));
    }

    // get_default never stores its fallback.
    #[test]
    fn prop_get_default_is_read_only(key in key_strategy(), fallback in value_strategy()) {
        let cache = ExclusiveCache::new();

        prop_assert_eq!(cache.get_default(&key, fallback), fallback);
        prop_assert!(!cache.has(&key));
        prop_assert!(cache.is_empty());
    }

    // A values snapshot survives a later flush untouched.
    #[test]
    fn prop_values_snapshot_survives_flush(
        entries in prop::collection::hash_map(key_strategy(), value_strategy(), 0..10)
    ) {
        let cache = ExclusiveCache::new();
        for (key, value) in &entries {
            cache.set(key.clone(), *value);
        }

        let mut snapshot = cache.values();
        cache.flush();

        let mut expected: Vec<u32> = entries.values().copied().collect();
        snapshot.sort();
        expected.sort();
        prop_assert_eq!(snapshot, expected);
        prop_assert_eq!(cache.len(), 0);
        prop_assert!(cache.keys().is_empty());
    }
}
