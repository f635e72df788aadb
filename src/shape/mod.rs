//! Procedural shape primitives.
//!
//! The [`generators`] functions build canonical meshes (planes, grids, discs,
//! cubes, spheres, domes, tori, cylinders, cones) as [`Shape`] values with
//! positions, normals, tangents, bitangents and texture coordinates, ready
//! for vertex-buffer upload via [`Shape::attribute_bytes`].

mod data;
mod error;
pub mod generators;
mod tangent;

pub use data::{PrimitiveMode, Shape, ALL_ATTRIBUTES_STRIDE, MAX_INDICES, MAX_VERTICES};
pub use error::ShapeError;
pub use tangent::calculate_tangent_bitangent;
