//! Run configuration
//!
//! Settings come from three layers: built-in defaults, an optional TOML
//! file, and command-line flags. Later layers win.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::debug;

use crate::converter::ConversionOptions;
use crate::errors::{TerrainError, TerrainResult};
use crate::utils::color_utils::parse_color;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "terrainkit.toml";

/// Fully resolved settings of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Terrain sheet to convert
    pub input: PathBuf,
    /// Directory with templates and auxiliary assets
    pub data_dir: PathBuf,
    /// Directory receiving the terrain files
    pub output_dir: PathBuf,
    /// Colour for palette slot 0, as given by the user
    pub transparency_color: String,
    /// Align `.img` crops to dimensions divisible by 4
    pub align: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input: PathBuf::from("input.png"),
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            transparency_color: "#FF00FF".to_string(),
            align: true,
        }
    }
}

impl Settings {
    /// Resolve settings from CLI arguments and the config file they point at
    pub fn from_args(args: &ArgMatches) -> TerrainResult<Self> {
        let mut settings = Settings::default();

        match args.get_one::<String>("config") {
            Some(path) => settings.apply_file(Path::new(path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                settings.apply_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {}
        }

        if let Some(input) = args.get_one::<String>("input") {
            settings.input = PathBuf::from(input);
        }
        if let Some(data) = args.get_one::<String>("data") {
            settings.data_dir = PathBuf::from(data);
        }
        if let Some(output) = args.get_one::<String>("output") {
            settings.output_dir = PathBuf::from(output);
        }
        if let Some(color) = args.get_one::<String>("transparencycolor") {
            settings.transparency_color = color.clone();
        }
        if args.get_flag("noalign") {
            settings.align = false;
        }

        Ok(settings)
    }

    /// Overlay the values found in a TOML config file
    pub fn apply_file(&mut self, path: &Path) -> TerrainResult<()> {
        debug!("Reading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        self.apply_toml(&content)
    }

    /// Overlay the values found in TOML text
    pub fn apply_toml(&mut self, content: &str) -> TerrainResult<()> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| TerrainError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        if let Some(input) = string_key(&toml_value, "input")? {
            self.input = PathBuf::from(input);
        }
        if let Some(data) = string_key(&toml_value, "data")? {
            self.data_dir = PathBuf::from(data);
        }
        if let Some(output) = string_key(&toml_value, "output")? {
            self.output_dir = PathBuf::from(output);
        }
        if let Some(color) = string_key(&toml_value, "transparency_color")? {
            self.transparency_color = color;
        }
        if let Some(value) = toml_value.get("align") {
            self.align = value
                .as_bool()
                .ok_or_else(|| TerrainError::ConfigError("'align' must be a boolean".to_string()))?;
        }
        Ok(())
    }

    /// Conversion options with the colour parsed
    pub fn conversion_options(&self) -> TerrainResult<ConversionOptions> {
        Ok(ConversionOptions {
            transparency_color: parse_color(&self.transparency_color)?,
            align: self.align,
        })
    }
}

fn string_key(value: &toml::Value, key: &str) -> TerrainResult<Option<String>> {
    match value.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| TerrainError::ConfigError(format!("'{}' must be a string", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::RgbColor;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.input, PathBuf::from("input.png"));
        assert!(settings.align);
        assert_eq!(
            settings.conversion_options().unwrap().transparency_color,
            RgbColor::new(255, 0, 255)
        );
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let mut settings = Settings::default();
        settings
            .apply_toml("input = \"sheet.png\"\noutput = \"out\"\ntransparency_color = \"#000000\"\nalign = false\n")
            .unwrap();

        assert_eq!(settings.input, PathBuf::from("sheet.png"));
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert!(!settings.align);
        assert_eq!(settings.conversion_options().unwrap().transparency_color, RgbColor::new(0, 0, 0));
    }

    #[test]
    fn test_toml_type_errors() {
        let mut settings = Settings::default();
        assert!(matches!(settings.apply_toml("align = \"no\""), Err(TerrainError::ConfigError(_))));
        assert!(matches!(settings.apply_toml("input = 3"), Err(TerrainError::ConfigError(_))));
        assert!(matches!(settings.apply_toml("input = "), Err(TerrainError::ConfigError(_))));
    }

    #[test]
    fn test_bad_color_is_reported_when_resolving_options() {
        let settings = Settings { transparency_color: "#12".to_string(), ..Settings::default() };
        assert!(matches!(settings.conversion_options(), Err(TerrainError::InvalidColor(_))));
    }
}
