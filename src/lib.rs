//! # shapegen
//!
//! Procedural mesh primitives with full tangent-space attributes, plus
//! seeded tileable value-noise rasters.
//!
//! ```
//! use shapegen::shape::generators::create_sphere;
//!
//! let sphere = create_sphere(1.0, 32).unwrap();
//! assert!(sphere.number_vertices() > 0);
//! let bytes = sphere.attribute_bytes(); // ready for vertex-buffer upload
//! assert!(!bytes.is_empty());
//! ```

pub mod math;
pub mod noise;
pub mod shape;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
