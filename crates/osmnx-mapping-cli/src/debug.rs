//! Environment report printed by `--debug-info`.

use std::env;
use std::io::Write;

use anyhow::Result;
use tabwriter::TabWriter;

pub const BINARY_NAME: &str = "osmnx-mapping";

/// Environment variables worth reporting, by exact name or prefix.
const ENV_EXACT: &[&str] = &["RUST_LOG", "RUST_BACKTRACE"];
const ENV_PREFIX: &str = "OSMNX_MAPPING_";

pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugInfo {
    pub os: String,
    pub arch: String,
    pub executable: String,
    pub env_vars: Vec<(String, String)>,
    pub components: Vec<(&'static str, &'static str)>,
}

impl DebugInfo {
    pub fn collect() -> Self {
        let executable = env::current_exe()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        Self {
            os: env::consts::OS.to_string(),
            arch: env::consts::ARCH.to_string(),
            executable,
            env_vars: collect_env_vars(env::vars()),
            components: vec![
                (BINARY_NAME, get_version()),
                ("osmnx-mapping-core", osmnx_mapping_core::VERSION),
                ("osmnx-mapping-viz", osmnx_mapping_viz::VERSION),
            ],
        }
    }

    pub fn render(&self) -> Result<String> {
        let mut writer = TabWriter::new(Vec::new()).padding(2);
        writeln!(writer, "- __System__: {} ({})", self.os, self.arch)?;
        writeln!(writer, "- __Executable__: {}", self.executable)?;
        writeln!(writer, "- __Environment variables__:")?;
        if self.env_vars.is_empty() {
            writeln!(writer, "  (none)")?;
        }
        for (name, value) in &self.env_vars {
            writeln!(writer, "  {name}\t{value}")?;
        }
        writeln!(writer, "- __Components__:")?;
        for (name, version) in &self.components {
            writeln!(writer, "  {name}\t{version}")?;
        }
        writer.flush()?;
        Ok(String::from_utf8(writer.into_inner()?)?)
    }
}

fn collect_env_vars(vars: impl Iterator<Item = (String, String)>) -> Vec<(String, String)> {
    let mut selected: Vec<(String, String)> = vars
        .filter(|(name, _)| ENV_EXACT.contains(&name.as_str()) || name.starts_with(ENV_PREFIX))
        .collect();
    selected.sort();
    selected
}

pub fn print_debug_info() -> Result<()> {
    print!("{}", DebugInfo::collect().render()?);
    Ok(())
}

/// Whether `--debug-info` appears on the command line before any flag that
/// would make the parser exit on its own (`--version`, `--help`).
pub fn debug_info_requested<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    for arg in args.into_iter().skip(1) {
        match arg.as_ref().to_str() {
            Some("--debug-info") => return true,
            Some("-V" | "--version" | "-h" | "--help" | "--") => return false,
            _ => {}
        }
    }
    false
}
