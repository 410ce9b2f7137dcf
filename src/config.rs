use serde::{Deserialize, Serialize};
use std::path::Path;

/// Box dimensions and spacing for the layered layout. Distances are in the
/// renderer's pixel space; every node gets the same box.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    /// Separation between node boxes within the same rank.
    pub node_spacing: f32,
    /// Separation between adjacent ranks.
    pub rank_spacing: f32,
    /// Crossing-reduction sweeps over the rank ordering.
    pub order_passes: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            node_height: 120.0,
            node_spacing: 100.0,
            rank_spacing: 50.0,
            order_passes: 2,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Flow direction token ("TB" or "LR"); the CLI flag wins over this.
    pub direction: Option<String>,
    pub layout: LayoutConfig,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    let config: Config = json5::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_constants() {
        let config = LayoutConfig::default();
        assert_eq!(config.node_width, 200.0);
        assert_eq!(config.node_height, 120.0);
        assert_eq!(config.node_spacing, 100.0);
        assert_eq!(config.rank_spacing, 50.0);
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        // JSON5: comments and bare keys are fine in config files.
        let config: Config = json5::from_str(
            "{ direction: 'TB', layout: { node_spacing: 80 /* tighter */ } }",
        )
        .unwrap();
        assert_eq!(config.direction.as_deref(), Some("TB"));
        assert_eq!(config.layout.node_spacing, 80.0);
        assert_eq!(config.layout.rank_spacing, 50.0);
    }
}
