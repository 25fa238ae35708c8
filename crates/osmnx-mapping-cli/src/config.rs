//! Optional TOML configuration.
//!
//! ```toml
//! [render]
//! colormap = "viridis"
//! edge_line_width = 1.0
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use osmnx_mapping_viz::RenderOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::RenderArgs;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub render: RenderOptions,
}

impl AppConfig {
    /// Applies command-line overrides on top of the configured render options.
    pub fn render_options(&self, args: &RenderArgs) -> RenderOptions {
        let mut options = self.render.clone();
        if let Some(colormap) = &args.colormap {
            options.colormap = colormap.clone();
        }
        if let Some(width) = args.edge_line_width {
            options.edge_line_width = width;
        }
        if let Some(size) = args.node_size {
            options.node_size = size;
        }
        if let Some(color) = &args.missing_value_color {
            options.missing_value_color = color.clone();
        }
        if let Some(label) = &args.colorbar_label {
            options.colorbar_label = label.clone();
        }
        options
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("osmnx-mapping").join("config.toml"))
}

/// Loads an explicitly given file, or the default file if it exists.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(AppConfig::default()),
        },
    };
    debug!(path = %path.display(), "loading configuration");
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("parsing config {}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    Ok(toml::from_str(contents)?)
}
