//! Static tag tables consumed by the enhancer nodes.
//!
//! Each component owns one table set, embedded as YAML under `data/` and
//! parsed once on first use. A table set can also be built from external YAML
//! (`from_yaml`) so the content can be edited without touching logic; every
//! constructor validates the invariants the resolvers rely on, so lookups
//! never have to handle a malformed table at call time.

pub mod camera;
pub mod color;
pub mod lighting;
pub mod product;
pub mod sizing;

use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use tracing::warn;

/// Sentinel option key requesting context-driven selection.
pub const AUTO: &str = "auto";
/// Sentinel option key disabling an optional category.
pub const NONE: &str = "none";

/// Option key → non-empty list of candidate tags.
///
/// Invariant (validated at load): an `auto` bucket exists and no bucket is
/// empty, so resolution can always degrade to `auto` and a draw always
/// yields a tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct TagBuckets(HashMap<String, Vec<String>>);

impl TagBuckets {
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Declared option keys, for hosts that build their option lists from
    /// the table content. Unordered.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Uniform draw from the bucket under `key`, degrading to the `auto`
    /// bucket (with a warning) when the key is unknown.
    pub fn choose<'a>(&'a self, table_name: &str, key: &str, rng: &mut impl Rng) -> &'a str {
        let bucket = match self.0.get(key) {
            Some(bucket) => bucket,
            None => {
                warn!("Unknown {table_name} option '{key}', falling back to '{AUTO}'");
                self.0
                    .get(AUTO)
                    .expect("bucket tables are validated to contain an auto bucket")
            }
        };
        bucket
            .choose(rng)
            .map(String::as_str)
            .expect("bucket tables are validated to have no empty buckets")
    }

    pub(crate) fn validate(&self, table_name: &str) -> Result<()> {
        if !self.contains(AUTO) {
            bail!("table '{table_name}' is missing its '{AUTO}' bucket");
        }
        for (key, bucket) in &self.0 {
            if bucket.is_empty() {
                bail!("table '{table_name}' has an empty bucket '{key}'");
            }
        }
        Ok(())
    }
}

/// Looks up `key` in a record table, degrading to `fallback_key` (with a
/// warning) when the key is unknown. Fallback keys are validated at load.
pub(crate) fn lookup_or<'a, T>(
    table: &'a HashMap<String, T>,
    table_name: &str,
    key: &str,
    fallback_key: &str,
) -> &'a T {
    if let Some(value) = table.get(key) {
        return value;
    }
    warn!("Unknown {table_name} option '{key}', using '{fallback_key}'");
    table
        .get(fallback_key)
        .expect("fallback keys are validated at load")
}

pub(crate) fn require_key<T>(
    table: &HashMap<String, T>,
    table_name: &str,
    key: &str,
) -> Result<()> {
    table
        .get(key)
        .map(|_| ())
        .ok_or_else(|| anyhow!("table '{table_name}' is missing its '{key}' entry"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_buckets() -> TagBuckets {
        serde_yaml::from_str(
            "auto: [plain_shot]\nclose_up: [close_up, head_shot]\n",
        )
        .expect("sample yaml parses")
    }

    #[test]
    fn choose_draws_from_the_named_bucket() {
        let buckets = sample_buckets();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            let tag = buckets.choose("shots", "close_up", &mut rng);
            assert!(["close_up", "head_shot"].contains(&tag));
        }
    }

    #[test]
    fn unknown_keys_degrade_to_the_auto_bucket() {
        let buckets = sample_buckets();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(buckets.choose("shots", "no_such_key", &mut rng), "plain_shot");
    }

    #[test]
    fn validation_rejects_missing_auto_and_empty_buckets() {
        let missing_auto: TagBuckets =
            serde_yaml::from_str("close_up: [close_up]\n").expect("parses");
        assert!(missing_auto.validate("shots").is_err());

        let empty_bucket: TagBuckets =
            serde_yaml::from_str("auto: [ok]\nclose_up: []\n").expect("parses");
        assert!(empty_bucket.validate("shots").is_err());
    }
}
