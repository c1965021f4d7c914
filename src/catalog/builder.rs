//! The terrain sheet layout
//!
//! Fixed regions are listed literally; the tile grid is generated from its
//! object type, row and column so that changing a dimension moves every
//! tile with it.

use super::descriptor::{Classification, RegionDescriptor, TemplateKind};

/// Name of the region whose 1 pixel guard border is trimmed after extraction
pub const DEBRIS_REGION_NAME: &str = "debris";

/// Number of regions in the back pair
pub const BACK_PAIR_SIZE: usize = 2;

/// Height kept off the debris column, measured from the sheet height
const DEBRIS_HEIGHT_MARGIN: u32 = 256;

/// Layout of the generated tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    /// X of the first column
    pub origin_x: u32,
    /// Tile edge length
    pub tile_size: u32,
    /// Spacing between neighbouring tiles
    pub gap: u32,
    pub rows: u32,
    pub columns: u32,
}

impl TileGrid {
    /// Distance between the origins of neighbouring tiles
    pub fn step(&self) -> u32 {
        self.tile_size + self.gap
    }
}

/// Grid used by terrain sheets
pub const TILE_GRID: TileGrid = TileGrid {
    origin_x: 1280,
    tile_size: 512,
    gap: 64,
    rows: 3,
    columns: 10,
};

/// Object types of the tile grid and the Y of their first row
pub const TILE_GROUPS: [(&str, u32); 3] = [("floor", 64), ("side", 1920), ("roof", 3776)];

/// Build the catalog for a terrain sheet `image_height` pixels tall
///
/// The order of the returned descriptors is the manifest order.
pub fn standard_catalog(image_height: u32) -> Vec<RegionDescriptor> {
    let mut regions = fixed_regions(image_height);
    regions.extend(tile_regions(&TILE_GRID, &TILE_GROUPS));
    regions
}

fn fixed_regions(image_height: u32) -> Vec<RegionDescriptor> {
    use Classification::{BackPairMember, Optional};

    let layer = |name: &str, y: u32| {
        RegionDescriptor::sprite(name, 64, y, 1024, 1024)
            .cropped()
            .with_template(TemplateKind::RegionSpd)
    };

    vec![
        RegionDescriptor::image("text", 64, 64, 256, 256),
        RegionDescriptor::image("soil", 384, 64, 256, 256),
        RegionDescriptor::image("bridge-l", 64, 384, 128, 128).cropped(),
        RegionDescriptor::image("bridge", 256, 384, 128, 128).cropped(),
        RegionDescriptor::image("bridge-r", 448, 384, 128, 128).cropped(),
        RegionDescriptor::image("grass", 64, 576, 192, 128).cropped(),
        layer("back", 896).classified(BackPairMember),
        layer("_back", 2112).classified(BackPairMember),
        layer("back2", 3328).classified(Optional),
        layer("front", 4544).classified(Optional),
        RegionDescriptor::sprite(
            DEBRIS_REGION_NAME,
            7168,
            192,
            192,
            image_height.saturating_sub(DEBRIS_HEIGHT_MARGIN),
        )
        .cropped()
        .with_template(TemplateKind::RegionSpd),
    ]
}

/// Generate `<group><row><column>` tiles, group by group, row-major
pub fn tile_regions(grid: &TileGrid, groups: &[(&str, u32)]) -> Vec<RegionDescriptor> {
    let mut regions = Vec::with_capacity(groups.len() * (grid.rows * grid.columns) as usize);

    for &(group, first_y) in groups {
        for row in 0..grid.rows {
            let y = first_y + row * grid.step();
            for column in 0..grid.columns {
                let x = grid.origin_x + column * grid.step();
                let name = format!("{}{}{}", group, row, column);
                regions.push(
                    RegionDescriptor::image(&name, x, y, grid.tile_size, grid.tile_size)
                        .cropped()
                        .indexed()
                        .with_template(TemplateKind::SharedInf { group: group.to_string() }),
                );
            }
        }
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RegionKind;
    use crate::geometry::Rect;

    #[test]
    fn test_catalog_size_and_order() {
        let catalog = standard_catalog(5632);
        assert_eq!(catalog.len(), 11 + 90);

        let names: Vec<String> = catalog.iter().take(11).map(|r| r.output_name()).collect();
        assert_eq!(
            names,
            [
                "text.img", "soil.img", "bridge-l.img", "bridge.img", "bridge-r.img", "grass.img",
                "back.spr", "_back.spr", "back2.spr", "front.spr", "debris.spr",
            ]
        );
        assert_eq!(catalog[11].name, "floor00");
        assert_eq!(catalog[12].name, "floor01");
        assert_eq!(catalog[21].name, "floor10");
        assert_eq!(catalog[41].name, "side00");
        assert_eq!(catalog[100].name, "roof29");
    }

    #[test]
    fn test_back_pair_and_optional_layers() {
        let catalog = standard_catalog(5632);
        let back_pair: Vec<&str> = catalog
            .iter()
            .filter(|r| r.classification == Classification::BackPairMember)
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(back_pair, ["back", "_back"]);
        assert_eq!(back_pair.len(), BACK_PAIR_SIZE);

        let optional: Vec<&str> = catalog
            .iter()
            .filter(|r| r.classification == Classification::Optional)
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(optional, ["back2", "front"]);
    }

    #[test]
    fn test_debris_height_follows_image_height() {
        let catalog = standard_catalog(5632);
        let debris = catalog.iter().find(|r| r.name == DEBRIS_REGION_NAME).unwrap();
        assert_eq!(debris.rect, Rect::new(7168, 192, 192, 5376));
        assert_eq!(debris.kind, RegionKind::Sprite);
        assert_eq!(debris.template, Some(TemplateKind::RegionSpd));

        let short = standard_catalog(100);
        let debris = short.iter().find(|r| r.name == DEBRIS_REGION_NAME).unwrap();
        assert_eq!(debris.rect.height, 0);
    }

    #[test]
    fn test_tile_positions() {
        let catalog = standard_catalog(5632);
        let find = |name: &str| catalog.iter().find(|r| r.name == name).unwrap().clone();

        assert_eq!(find("floor00").rect, Rect::new(1280, 64, 512, 512));
        assert_eq!(find("floor09").rect, Rect::new(1280 + 9 * 576, 64, 512, 512));
        assert_eq!(find("floor20").rect, Rect::new(1280, 64 + 2 * 576, 512, 512));
        assert_eq!(find("side13").rect, Rect::new(1280 + 3 * 576, 1920 + 576, 512, 512));
        assert_eq!(find("roof29").rect, Rect::new(1280 + 9 * 576, 3776 + 2 * 576, 512, 512));

        let tile = find("side13");
        assert_eq!(tile.classification, Classification::Required);
        assert!(tile.crop_to_content && tile.add_to_index);
        assert_eq!(tile.template, Some(TemplateKind::SharedInf { group: "side".to_string() }));
    }

    #[test]
    fn test_fixed_images_have_no_templates() {
        let catalog = standard_catalog(5632);
        for region in catalog.iter().take(6) {
            assert_eq!(region.template, None, "{}", region);
            assert_eq!(region.classification, Classification::Required);
        }
        assert!(!catalog[0].crop_to_content);
        assert!(catalog[2].crop_to_content);
    }
}
