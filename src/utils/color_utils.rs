//! Colour specification parsing
//!
//! Accepts `#RRGGBB`, `#RGB`, `rgb(r, g, b)` and the colour names listed in
//! `color_names.toml`.

use std::collections::HashMap;

use lazy_static::lazy_static;
use log::warn;

use crate::bitmap::RgbColor;
use crate::errors::{TerrainError, TerrainResult};

lazy_static! {
    // Parsed once from the embedded name table
    static ref NAMED_COLORS: HashMap<String, RgbColor> = {
        let content = include_str!("../../color_names.toml");
        parse_color_names(content).unwrap_or_else(|e| {
            warn!("Failed to parse color name table: {}", e);
            HashMap::new()
        })
    };
}

/// Parse the `[colors]` table of a name file
fn parse_color_names(content: &str) -> TerrainResult<HashMap<String, RgbColor>> {
    let toml_value: toml::Value = content
        .parse()
        .map_err(|e| TerrainError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

    let mut names = HashMap::new();
    if let Some(table) = toml_value.get("colors").and_then(|v| v.as_table()) {
        for (name, value) in table {
            if let Some(hex) = value.as_str() {
                names.insert(name.to_lowercase(), RgbColor::from_hex(hex)?);
            }
        }
    }
    Ok(names)
}

/// Parse a colour given on the command line or in a config file
pub fn parse_color(spec: &str) -> TerrainResult<RgbColor> {
    let spec = spec.trim();

    if spec.starts_with('#') {
        return RgbColor::from_hex(spec);
    }

    let lower = spec.to_lowercase();
    if let Some(args) = lower.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        return parse_rgb_function(args, spec);
    }

    NAMED_COLORS
        .get(&lower)
        .copied()
        .ok_or_else(|| TerrainError::InvalidColor(format!("unknown color specifier: {}", spec)))
}

fn parse_rgb_function(args: &str, spec: &str) -> TerrainResult<RgbColor> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(TerrainError::InvalidColor(format!("{} - rgb() takes 3 components", spec)));
    }

    let mut components = [0u8; 3];
    for (component, part) in components.iter_mut().zip(&parts) {
        *component = part
            .parse::<u8>()
            .map_err(|_| TerrainError::InvalidColor(format!("{} - components must be 0-255", spec)))?;
    }
    Ok(RgbColor::new(components[0], components[1], components[2]))
}
