//! Terrain debug visualization renderers: cross-sections, heightmaps, and palettes.

use strata_voxel::{CHUNK_HEIGHT, CHUNK_WIDTH, ChunkAccess, ChunkPos, MAX_Y, MaterialRegistry};

use super::image::DebugImage;
use crate::heightmap::BaseTerrain;
use crate::palette::{LayerPalette, PALETTE_LEN};

/// Which vertical plane of a chunk a cross-section cuts along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliceAxis {
    /// The plane at a fixed local x; pixel columns run along z.
    X,
    /// The plane at a fixed local z; pixel columns run along x.
    Z,
}

/// Render a vertical slice through a chunk, one pixel per cell.
///
/// The image is `16 × 256` with world height increasing upward. Air is left
/// transparent; every other cell takes its material's display color.
pub fn render_cross_section<C: ChunkAccess + ?Sized>(
    chunk: &C,
    registry: &MaterialRegistry,
    axis: SliceAxis,
    index: i32,
) -> DebugImage {
    let mut image = DebugImage::new(CHUNK_WIDTH as u32, CHUNK_HEIGHT as u32);

    for px in 0..CHUNK_WIDTH as i32 {
        let (x, z) = match axis {
            SliceAxis::X => (index, px),
            SliceAxis::Z => (px, index),
        };
        for y in 0..=MAX_Y {
            let material = chunk.material(x, y, z);
            if registry.is_air(material) {
                continue;
            }
            let [r, g, b] = registry.get(material).color;
            image.set_pixel(px as u32, (MAX_Y - y) as u32, r, g, b, 255);
        }
    }

    image
}

/// Map a column height to an RGB color relative to sea level.
///
/// Submerged columns shade from dark to light blue, dry land from green
/// through brown to white.
pub fn height_to_color(height: i32, sea_level: i32) -> (u8, u8, u8) {
    if height < sea_level {
        let t = (f64::from(height) / f64::from(sea_level.max(1))).clamp(0.0, 1.0);
        (0, (40.0 + t * 80.0) as u8, (120.0 + t * 100.0) as u8)
    } else if height < sea_level + 2 {
        // Beach: sandy yellow
        (220, 200, 130)
    } else {
        let span = f64::from((MAX_Y - sea_level).max(1));
        let t = (f64::from(height - sea_level) / span).clamp(0.0, 1.0);
        if t < 0.3 {
            let k = t / 0.3;
            ((30.0 + k * 100.0) as u8, (160.0 - k * 60.0) as u8, (40.0 + k * 20.0) as u8)
        } else if t < 0.6 {
            (130, 100, 60)
        } else {
            // Peaks: snow
            (240, 240, 245)
        }
    }
}

/// Render base terrain heights for a square block of chunks centred on `center`.
///
/// One pixel per world column, `radius` chunks out on each side.
pub fn render_height_map(terrain: &BaseTerrain, center: ChunkPos, radius: i32) -> DebugImage {
    let side = (2 * radius + 1) as u32 * CHUNK_WIDTH as u32;
    let mut image = DebugImage::new(side, side);
    let (origin_x, origin_z) = ChunkPos::new(center.x - radius, center.z - radius).origin();

    for pz in 0..side {
        for px in 0..side {
            let height = terrain.column_height(origin_x + px as i32, origin_z + pz as i32);
            let (r, g, b) = height_to_color(height, terrain.sea_level());
            image.set_pixel(px, pz, r, g, b, 255);
        }
    }

    image
}

/// Render a band palette as a `width × 64` strip, band 0 at the bottom.
pub fn render_palette_strip(
    palette: &LayerPalette,
    registry: &MaterialRegistry,
    width: u32,
) -> DebugImage {
    let mut image = DebugImage::new(width, PALETTE_LEN as u32);
    for (band, &material) in palette.bands().iter().enumerate() {
        let [r, g, b] = registry.get(material).color;
        let row = (PALETTE_LEN - 1 - band) as u32;
        for px in 0..width {
            image.set_pixel(px, row, r, g, b, 255);
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use strata_voxel::Chunk;
    use strata_voxel::builtin::{BEDROCK, GRASS_BLOCK, STONE, WATER};

    use super::*;
    use crate::heightmap::{HeightmapParams, HeightmapSampler};

    fn color(registry: &MaterialRegistry, material: strata_voxel::MaterialId) -> (u8, u8, u8, u8) {
        let [r, g, b] = registry.get(material).color;
        (r, g, b, 255)
    }

    #[test]
    fn test_cross_section_dimensions_and_orientation() {
        let registry = MaterialRegistry::new();
        let mut chunk = Chunk::new();
        chunk.fill_column(3, 5, 0, 0, BEDROCK);
        chunk.fill_column(3, 5, 1, 60, STONE);
        chunk.set(3, 61, 5, GRASS_BLOCK);

        let image = render_cross_section(&chunk, &registry, SliceAxis::X, 3);
        assert_eq!(image.dimensions(), (16, 256));
        // Pixel row 255 is y = 0.
        assert_eq!(image.get_pixel(5, 255), color(&registry, BEDROCK));
        assert_eq!(image.get_pixel(5, (MAX_Y - 61) as u32), color(&registry, GRASS_BLOCK));
        assert_eq!(image.get_pixel(5, (MAX_Y - 62) as u32).3, 0);
        assert_eq!(image.get_pixel(4, 255).3, 0);
    }

    #[test]
    fn test_cross_section_axis_selects_plane() {
        let registry = MaterialRegistry::new();
        let mut chunk = Chunk::new();
        chunk.set(2, 10, 9, WATER);

        let along_z = render_cross_section(&chunk, &registry, SliceAxis::X, 2);
        assert_eq!(along_z.get_pixel(9, (MAX_Y - 10) as u32), color(&registry, WATER));

        let along_x = render_cross_section(&chunk, &registry, SliceAxis::Z, 9);
        assert_eq!(along_x.get_pixel(2, (MAX_Y - 10) as u32), color(&registry, WATER));

        let elsewhere = render_cross_section(&chunk, &registry, SliceAxis::Z, 8);
        assert_eq!(elsewhere.unique_color_count(), 1);
    }

    #[test]
    fn test_height_to_color_covers_full_range() {
        let sea = 63;
        assert_eq!(height_to_color(sea, sea), (220, 200, 130));
        assert_eq!(height_to_color(MAX_Y, sea), (240, 240, 245));
        let deep = height_to_color(5, sea);
        let shallow = height_to_color(60, sea);
        assert!(shallow.2 > deep.2, "shallow water should be lighter");
        assert_eq!(height_to_color(150, sea), (130, 100, 60));
    }

    #[test]
    fn test_height_map_has_multiple_colors() {
        let sampler = HeightmapSampler::new(HeightmapParams {
            seed: 42,
            amplitude: 60.0,
            ..Default::default()
        });
        let terrain = BaseTerrain::new(sampler, 64, 63);
        let image = render_height_map(&terrain, ChunkPos::new(0, 0), 2);
        assert_eq!(image.dimensions(), (80, 80));
        assert!(image.unique_color_count() > 3);
    }

    #[test]
    fn test_palette_strip_matches_bands() {
        let registry = MaterialRegistry::new();
        let palette = LayerPalette::from_seed(7);
        let image = render_palette_strip(&palette, &registry, 4);
        assert_eq!(image.dimensions(), (4, 64));
        assert_eq!(image.get_pixel(0, 63), color(&registry, palette.bands()[0]));
        assert_eq!(image.get_pixel(3, 0), color(&registry, palette.bands()[63]));
    }
}
