use clap::{Args, Parser, Subcommand, ValueHint};
use osmnx_mapping_viz::Target;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "osmnx-mapping", version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    // Acted on before parsing by `debug::debug_info_requested`.
    /// Print debug information
    #[arg(long)]
    pub debug_info: bool,

    /// TOML configuration file (defaults to <config dir>/osmnx-mapping/config.toml)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a street network colored by an attribute column
    Render(RenderArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Node table (CSV with an `osmid` column, optional `x`/`y`)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub nodes: PathBuf,

    /// Edge table (CSV with `u`, `v`, optional `key` and `geometry`)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub edges: PathBuf,

    /// Attribute column to color by
    #[arg(long = "column", required = true)]
    pub columns: Vec<String>,

    /// Which entities to color: edges, nodes or both
    #[arg(long, default_value = "edges")]
    pub target: Target,

    /// Colormap name, `_r` suffix reverses it
    #[arg(long)]
    pub colormap: Option<String>,

    /// Edge stroke width in points
    #[arg(long)]
    pub edge_line_width: Option<f64>,

    /// Node marker area in points squared
    #[arg(long)]
    pub node_size: Option<f64>,

    /// Color for entities without a value
    #[arg(long)]
    pub missing_value_color: Option<String>,

    /// Colorbar label
    #[arg(long)]
    pub colorbar_label: Option<String>,

    /// Raster scale factor for PNG output
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,

    /// Output file; `.svg` or `.png`
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub out: PathBuf,
}
