use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use wirehack_core::HackConfig;

/// Best results for one puzzle size
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SizeRecord {
    pub hacks: usize,
    pub fast_hacks: usize,
    pub best_secs: Option<f32>,
    pub total_moves: usize,
}

/// Persistent per-size records, keyed by "rows x columns x wires"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsManager {
    pub by_size: HashMap<String, SizeRecord>,
}

impl StatsManager {
    fn save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wirehack_stats.json")
    }

    /// Load stats from file; a missing or corrupt file starts fresh
    pub fn load() -> Self {
        match fs::read_to_string(Self::save_path()) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save stats to file
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = fs::write(Self::save_path(), json);
        }
    }

    pub fn size_key(config: HackConfig) -> String {
        format!(
            "{}x{}x{}",
            config.rows(),
            config.columns(),
            config.wires()
        )
    }

    /// Record a completed hack, returning the updated record for display
    pub fn record_hack(
        &mut self,
        config: HackConfig,
        secs: f32,
        fast: bool,
        moves: usize,
    ) -> &SizeRecord {
        let key = Self::size_key(config);
        let record = self.by_size.entry(key.clone()).or_default();
        record.hacks += 1;
        record.total_moves += moves;
        if fast {
            record.fast_hacks += 1;
        }
        record.best_secs = Some(match record.best_secs {
            Some(best) => best.min(secs),
            None => secs,
        });
        self.save();
        &self.by_size[&key]
    }

    pub fn best_for(&self, config: HackConfig) -> Option<f32> {
        self.by_size
            .get(&Self::size_key(config))
            .and_then(|r| r.best_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tracks_best_time() {
        let mut stats = StatsManager::default();
        let config = HackConfig::new(2, 5, 3);
        stats.record_hack(config, 12.5, false, 9);
        stats.record_hack(config, 8.0, true, 6);
        stats.record_hack(config, 20.0, false, 14);

        let record = &stats.by_size[&StatsManager::size_key(config)];
        assert_eq!(record.hacks, 3);
        assert_eq!(record.fast_hacks, 1);
        assert_eq!(record.best_secs, Some(8.0));
        assert_eq!(stats.best_for(config), Some(8.0));
    }

    #[test]
    fn test_sizes_are_tracked_separately() {
        let mut stats = StatsManager::default();
        stats.record_hack(HackConfig::new(2, 5, 3), 10.0, false, 5);
        stats.record_hack(HackConfig::new(1, 8, 1), 3.0, true, 2);
        assert_eq!(stats.by_size.len(), 2);
        assert_eq!(stats.best_for(HackConfig::new(1, 8, 1)), Some(3.0));
    }
}
