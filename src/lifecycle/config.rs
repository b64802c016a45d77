//! Runtime configuration for [`DeliverySystem`](super::DeliverySystem).

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::delivery_actor::DEFAULT_BUFFER_SIZE;

pub const ENV_STORE_PATH: &str = "DELIVERY_STORE_PATH";
pub const ENV_CHANNEL_CAPACITY: &str = "DELIVERY_CHANNEL_CAPACITY";
pub const ENV_SEED_SAMPLE_DATA: &str = "DELIVERY_SEED_SAMPLE_DATA";

/// Delivery tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Capacity of the actor's request channel
    pub channel_capacity: usize,

    /// JSON snapshot file; `None` keeps deliveries in memory only
    pub store_path: Option<PathBuf>,

    /// Load the demo deliveries when the store starts empty
    pub seed_sample_data: bool,
}

impl TrackerConfig {
    /// Reads `DELIVERY_*` environment variables over the defaults.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`TrackerConfig::from_env`], reading from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_STORE_PATH).filter(|p| !p.trim().is_empty()) {
            config.store_path = Some(PathBuf::from(path.trim()));
        }
        if let Some(capacity) = parse_var::<usize>(&lookup, ENV_CHANNEL_CAPACITY) {
            if capacity == 0 {
                warn!(key = ENV_CHANNEL_CAPACITY, "Channel capacity must be positive, using default");
            } else {
                config.channel_capacity = capacity;
            }
        }
        if let Some(seed) = parse_var::<bool>(&lookup, ENV_SEED_SAMPLE_DATA) {
            config.seed_sample_data = seed;
        }
        config
    }

    /// Persist deliveries to a JSON file
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(path.into());
        self
    }

    /// Set the request channel capacity
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Seed demo deliveries into an empty store
    pub fn with_sample_data(mut self, seed: bool) -> Self {
        self.seed_sample_data = seed;
        self
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_BUFFER_SIZE,
            store_path: None,
            seed_sample_data: false,
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable setting");
            None
        }
    }
}
