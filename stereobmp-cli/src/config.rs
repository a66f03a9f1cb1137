//! JSON configuration for the driver.

use serde::Deserialize;
use stereobmp::{BufferKind, ContrastMode, EdgeParams, MatchConfig, Matcher, HIGHLIGHT};

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ContrastModeConfig {
    #[default]
    Truncated,
    Linear,
}

impl From<&ContrastModeConfig> for ContrastMode {
    fn from(value: &ContrastModeConfig) -> Self {
        match value {
            ContrastModeConfig::Truncated => ContrastMode::Truncated,
            ContrastModeConfig::Linear => ContrastMode::Linear,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum BufferKindConfig {
    Current,
    Original,
}

impl From<BufferKindConfig> for BufferKind {
    fn from(value: BufferKindConfig) -> Self {
        match value {
            BufferKindConfig::Current => BufferKind::Current,
            BufferKindConfig::Original => BufferKind::Original,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ContrastConfigJson {
    pub(crate) enabled: bool,
    pub(crate) mode: ContrastModeConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct EdgeConfigJson {
    pub(crate) threshold: u8,
    pub(crate) padding: usize,
    pub(crate) skip: usize,
    pub(crate) mark: bool,
    /// Rows to scan; every padded row when absent.
    pub(crate) rows: Option<Vec<usize>>,
}

impl Default for EdgeConfigJson {
    fn default() -> Self {
        let params = EdgeParams::default();
        Self {
            threshold: params.threshold,
            padding: params.padding,
            skip: params.skip,
            mark: params.mark,
            rows: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct MatchConfigJson {
    pub(crate) row_offset: isize,
    pub(crate) patch_radius: usize,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        Self {
            row_offset: 0,
            patch_radius: MatchConfig::default().patch_radius,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) left: String,
    pub(crate) right: String,
    pub(crate) output_path: Option<String>,
    pub(crate) grayscale_right: bool,
    pub(crate) contrast: ContrastConfigJson,
    pub(crate) edges: EdgeConfigJson,
    #[serde(rename = "match")]
    pub(crate) match_cfg: MatchConfigJson,
    pub(crate) write_left: Option<BufferKindConfig>,
    pub(crate) write_right: Option<BufferKindConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            left: String::new(),
            right: String::new(),
            output_path: None,
            grayscale_right: false,
            contrast: ContrastConfigJson::default(),
            edges: EdgeConfigJson::default(),
            match_cfg: MatchConfigJson::default(),
            write_left: None,
            write_right: Some(BufferKindConfig::Current),
        }
    }
}

impl Config {
    /// Parses a config and checks that both inputs are named.
    pub(crate) fn from_json(text: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = serde_json::from_str(text)?;
        if config.left.is_empty() || config.right.is_empty() {
            return Err("left and right must be set in the config".into());
        }
        Ok(config)
    }

    pub(crate) fn edge_params(&self) -> EdgeParams {
        EdgeParams {
            threshold: self.edges.threshold,
            padding: self.edges.padding,
            skip: self.edges.skip,
            mark: self.edges.mark,
            marker_color: HIGHLIGHT,
        }
    }

    pub(crate) fn matcher(&self) -> Matcher {
        Matcher::new().with_config(MatchConfig {
            patch_radius: self.match_cfg.patch_radius,
            ..MatchConfig::default()
        })
    }
}
