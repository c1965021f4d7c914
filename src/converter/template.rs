//! Per-region metadata templates
//!
//! `.inf` and `.spd` files are plain text with `{width}` and `{height}`
//! placeholders, filled from the dimensions of the extracted bitmap.

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};

use crate::catalog::{RegionDescriptor, TemplateKind};
use crate::errors::TerrainResult;

lazy_static! {
    // Escaped braces, or a `{name}` placeholder
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{|\}\}|\{(\w+)\}").expect("placeholder pattern is valid");
}

/// What happened to a region's metadata file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOutcome {
    /// The region has no template
    NotConfigured,
    /// The template source does not exist; nothing was written
    Missing(PathBuf),
    /// The filled template was written
    Written {
        /// File name inside the output directory
        file_name: String,
        /// File name without its final extension
        stem: String,
    },
}

/// Replace `{key}` placeholders with their values
///
/// `{{` and `}}` become literal braces; placeholders without a value are
/// left as they are.
pub fn fill_template(text: &str, values: &[(&str, String)]) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| match &caps[0] {
            "{{" => "{".to_string(),
            "}}" => "}".to_string(),
            whole => values
                .iter()
                .find(|(key, _)| caps.get(1).map(|m| m.as_str()) == Some(*key))
                .map(|(_, value)| value.clone())
                .unwrap_or_else(|| whole.to_string()),
        })
        .into_owned()
}

/// Source and destination of a region's template, if it has one
pub fn template_paths(region: &RegionDescriptor, data_dir: &Path, output_dir: &Path) -> Option<(PathBuf, PathBuf)> {
    match region.template.as_ref()? {
        TemplateKind::SharedInf { group } => Some((
            data_dir.join(format!("{}.inf", group)),
            output_dir.join(format!("{}.inf", region.name)),
        )),
        TemplateKind::RegionSpd => {
            let file_name = format!("{}.spd", region.output_name());
            Some((data_dir.join(&file_name), output_dir.join(file_name)))
        }
    }
}

/// Fill and write the metadata file for an extracted region
pub fn render_region_template(
    region: &RegionDescriptor,
    width: u32,
    height: u32,
    data_dir: &Path,
    output_dir: &Path,
) -> TerrainResult<TemplateOutcome> {
    let Some((source, target)) = template_paths(region, data_dir, output_dir) else {
        return Ok(TemplateOutcome::NotConfigured);
    };
    if !source.is_file() {
        return Ok(TemplateOutcome::Missing(source));
    }

    let text = fs::read_to_string(&source)?;
    let filled = fill_template(&text, &[("width", width.to_string()), ("height", height.to_string())]);
    fs::write(&target, filled)?;
    debug!("\tWrote {}", target.display());

    Ok(TemplateOutcome::Written {
        file_name: file_name_of(&target),
        stem: target
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    })
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Vec<(&'static str, String)> {
        vec![("width", "32".to_string()), ("height", "48".to_string())]
    }

    #[test]
    fn test_fill_known_placeholders() {
        let filled = fill_template("w={width}\nh={height}\n", &dims());
        assert_eq!(filled, "w=32\nh=48\n");
    }

    #[test]
    fn test_fill_escapes_and_unknown_keys() {
        let filled = fill_template("{{width}} {depth} {width}}}", &dims());
        assert_eq!(filled, "{width} {depth} 32}");
    }

    #[test]
    fn test_shared_inf_paths() {
        let region = RegionDescriptor::image("floor00", 0, 0, 1, 1)
            .with_template(TemplateKind::SharedInf { group: "floor".to_string() });
        let (source, target) = template_paths(&region, Path::new("data"), Path::new("out")).unwrap();
        assert_eq!(source, Path::new("data").join("floor.inf"));
        assert_eq!(target, Path::new("out").join("floor00.inf"));
    }

    #[test]
    fn test_region_spd_paths() {
        let region = RegionDescriptor::sprite("back", 0, 0, 1, 1).with_template(TemplateKind::RegionSpd);
        let (source, target) = template_paths(&region, Path::new("data"), Path::new("out")).unwrap();
        assert_eq!(source, Path::new("data").join("back.spr.spd"));
        assert_eq!(target, Path::new("out").join("back.spr.spd"));
    }

    #[test]
    fn test_render_missing_and_written() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let region = RegionDescriptor::sprite("front", 0, 0, 1, 1).with_template(TemplateKind::RegionSpd);

        let outcome = render_region_template(&region, 10, 20, data.path(), out.path()).unwrap();
        assert_eq!(outcome, TemplateOutcome::Missing(data.path().join("front.spr.spd")));
        assert!(!out.path().join("front.spr.spd").exists());

        fs::write(data.path().join("front.spr.spd"), "size {width}x{height}").unwrap();
        let outcome = render_region_template(&region, 10, 20, data.path(), out.path()).unwrap();
        assert_eq!(
            outcome,
            TemplateOutcome::Written { file_name: "front.spr.spd".to_string(), stem: "front.spr".to_string() }
        );
        assert_eq!(fs::read_to_string(out.path().join("front.spr.spd")).unwrap(), "size 10x20");
    }

    #[test]
    fn test_region_without_template() {
        let region = RegionDescriptor::image("text", 0, 0, 1, 1);
        let outcome = render_region_template(&region, 1, 1, Path::new("data"), Path::new("out")).unwrap();
        assert_eq!(outcome, TemplateOutcome::NotConfigured);
    }
}
