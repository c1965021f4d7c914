//! Region descriptors
//!
//! A descriptor names one rectangle of the terrain sheet and says how it is
//! cropped, how a missing copy is judged and which metadata file goes with it.

use std::fmt;

use crate::geometry::Rect;

/// Output flavour of a region; decides the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Single image (`.img`)
    Image,
    /// Sprite collection (`.spr`)
    Sprite,
}

impl RegionKind {
    pub fn extension(&self) -> &'static str {
        match self {
            RegionKind::Image => "img",
            RegionKind::Sprite => "spr",
        }
    }
}

/// How serious it is when a region turns out to be empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The game may crash without it
    Required,
    /// Silently skipped when absent
    Optional,
    /// One of the two back layers; only both missing is a problem
    BackPairMember,
}

/// Metadata file rendered next to an extracted region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateKind {
    /// `<group>.inf` shared by a family of regions, written as `<name>.inf`
    SharedInf { group: String },
    /// `<outputName>.spd` owned by one region, written under the same name
    RegionSpd,
}

/// One entry of the region catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDescriptor {
    /// Output stem
    pub name: String,
    pub kind: RegionKind,
    pub classification: Classification,
    /// Source rectangle on the terrain sheet
    pub rect: Rect,
    /// Trim to the bounding box of visible pixels
    pub crop_to_content: bool,
    /// List the rendered `.inf` in the manifest and in `index.txt`
    pub add_to_index: bool,
    pub template: Option<TemplateKind>,
}

impl RegionDescriptor {
    /// Create a required, uncropped descriptor without metadata
    pub fn new(name: &str, kind: RegionKind, rect: Rect) -> Self {
        RegionDescriptor {
            name: name.to_string(),
            kind,
            classification: Classification::Required,
            rect,
            crop_to_content: false,
            add_to_index: false,
            template: None,
        }
    }

    /// Shorthand for an `.img` region
    pub fn image(name: &str, x: u32, y: u32, width: u32, height: u32) -> Self {
        RegionDescriptor::new(name, RegionKind::Image, Rect::new(x, y, width, height))
    }

    /// Shorthand for a `.spr` region
    pub fn sprite(name: &str, x: u32, y: u32, width: u32, height: u32) -> Self {
        RegionDescriptor::new(name, RegionKind::Sprite, Rect::new(x, y, width, height))
    }

    pub fn classified(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    pub fn cropped(mut self) -> Self {
        self.crop_to_content = true;
        self
    }

    pub fn indexed(mut self) -> Self {
        self.add_to_index = true;
        self
    }

    pub fn with_template(mut self, template: TemplateKind) -> Self {
        self.template = Some(template);
        self
    }

    /// File stem of the produced bitmap, e.g. `back.spr`
    pub fn output_name(&self) -> String {
        format!("{}.{}", self.name, self.kind.extension())
    }
}

impl fmt::Display for RegionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {},{} {}x{}",
            self.output_name(),
            self.rect.x,
            self.rect.y,
            self.rect.width,
            self.rect.height
        )
    }
}
