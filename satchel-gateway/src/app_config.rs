use satchel_split::capacity::CapacityTable;
use satchel_split::presets::{PresetTable, ShippingPreset};
use satchel_split::splitter::SplitRules;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub splitting: SplittingConfig,
    pub capacity: HashMap<String, u32>,
    pub presets: HashMap<String, ShippingPreset>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct SplittingConfig {
    pub pouch_threshold: u32,
    pub special_handling_sku: String,
    pub special_handling_tag: String,
    pub bill_to_account: Option<String>,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_concurrency() -> usize {
    8
}

impl SplittingConfig {
    pub fn rules(&self) -> SplitRules {
        SplitRules {
            pouch_threshold: self.pouch_threshold,
            special_handling_sku: self.special_handling_sku.clone(),
            special_handling_tag: self.special_handling_tag.clone(),
            bill_to_account: self.bill_to_account.clone(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of SATCHEL)
            .add_source(config::Environment::with_prefix("SATCHEL").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Capacity table from the [capacity] section
    pub fn capacity_table(&self) -> CapacityTable {
        CapacityTable::new(self.capacity.clone())
    }

    /// Preset table from the [presets] section; keys are pouch totals
    pub fn preset_table(&self) -> Result<PresetTable, config::ConfigError> {
        let mut by_total = HashMap::new();
        for (key, preset) in &self.presets {
            let total: u32 = key.parse().map_err(|_| {
                config::ConfigError::Message(format!("preset key '{}' is not a pouch total", key))
            })?;
            by_total.insert(total, preset.clone());
        }
        Ok(PresetTable::new(by_total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_core::models::Weight;

    fn preset() -> ShippingPreset {
        ShippingPreset {
            weight: Weight {
                value: 12.0,
                units: "ounces".to_string(),
            },
            dimensions: None,
            carrier_code: None,
            service_code: None,
            package_code: None,
            confirmation: None,
        }
    }

    fn config_with_preset_key(key: &str) -> Config {
        Config {
            server: ServerConfig { port: 8080 },
            upstream: UpstreamConfig {
                base_url: "https://orders.example.com".to_string(),
                api_key: "key".to_string(),
                api_secret: "secret".to_string(),
                timeout_seconds: 30,
            },
            splitting: SplittingConfig {
                pouch_threshold: 9,
                special_handling_sku: "STK-PACK".to_string(),
                special_handling_tag: "STK".to_string(),
                bill_to_account: None,
                concurrency: 8,
            },
            capacity: HashMap::new(),
            presets: HashMap::from([(key.to_string(), preset())]),
        }
    }

    #[test]
    fn test_preset_table_parses_numeric_keys() {
        let table = config_with_preset_key("3").preset_table().unwrap();
        assert!(table.resolve(3).is_ok());
    }

    #[test]
    fn test_preset_table_rejects_non_numeric_keys() {
        assert!(config_with_preset_key("three").preset_table().is_err());
    }
}
