use serde::{Deserialize, Serialize};

/// how the [`super::KeyManager`] moves between keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPolicy {
    /// keep using the current key until it reaches the usage limit
    #[default]
    Sticky,
    /// move to the next key after every pick, skipping exhausted keys
    RoundRobin,
}
