//! Terrain debug visualization: 2D images of generated chunks.
//!
//! Provides [`DebugImage`] and renderers for vertical cross-sections, the
//! base heightmap, and the badlands band palette. The CLI writes these to
//! disk to diagnose generation issues.

mod image;
mod renderers;

pub use self::image::{DebugImage, DebugImageError};
pub use renderers::{
    SliceAxis, height_to_color, render_cross_section, render_height_map, render_palette_strip,
};
