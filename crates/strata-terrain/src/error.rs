//! Errors raised by terrain generation.

/// Errors produced by terrain passes and probes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TerrainError {
    /// A probed column had no surface anywhere in its range, which means the
    /// region has not been generated yet.
    #[error("no surface in column ({x}, {z}); region not generated")]
    UnresolvedAltitude {
        /// Chunk-local X of the failing column.
        x: i32,
        /// Chunk-local Z of the failing column.
        z: i32,
    },
    /// A surface variant name did not match any known variant.
    #[error("unknown surface variant: {0}")]
    UnknownSurfaceVariant(String),
    /// A material name did not resolve in the material registry.
    #[error("unknown material: {0}")]
    UnknownMaterial(String),
}
