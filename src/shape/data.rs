//! CPU-side shape data and lifecycle.
//!
//! A [`Shape`] is one mesh: homogeneous positions plus normal, tangent,
//! bitangent and texture-coordinate arrays, an index list, and an optional
//! interleaved copy of everything built by [`Shape::finalize`].

use crate::math::Vec3;

use super::error::ShapeError;

/// Maximum number of vertices a generator may produce.
pub const MAX_VERTICES: u64 = 1_048_576;

/// Maximum number of indices a generator may produce.
pub const MAX_INDICES: u64 = 5_242_880;

/// Floats per vertex in the interleaved attribute buffer:
/// position (4) + normal (3) + tangent (3) + bitangent (3) + texcoord (2).
pub const ALL_ATTRIBUTES_STRIDE: usize = 4 + 3 + 3 + 3 + 2;

/// Primitive topology of a shape's index list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveMode {
    /// Every three indices form a triangle.
    #[default]
    Triangles,
    /// Each index after the first two forms a triangle with the previous two.
    TriangleStrip,
}

impl PrimitiveMode {
    /// Get the number of vertices per primitive (for non-strip topology).
    pub fn vertices_per_primitive(&self) -> Option<u32> {
        match self {
            Self::Triangles => Some(3),
            Self::TriangleStrip => None, // Variable
        }
    }
}

/// One generated mesh with full per-vertex tangent-space attributes.
///
/// Shapes are produced by the generator functions in
/// [`generators`](super::generators), deep-copied with [`Clone`], and reset
/// with [`Shape::clear`]. Attribute arrays use an empty `Vec` to mean
/// "absent".
#[derive(Debug, Clone, Default)]
pub struct Shape {
    pub(crate) mode: PrimitiveMode,
    pub(crate) number_vertices: u32,
    pub(crate) number_indices: u32,
    /// 4 floats per vertex (x, y, z, w).
    pub(crate) vertices: Vec<f32>,
    /// 3 floats per vertex.
    pub(crate) normals: Vec<f32>,
    /// 3 floats per vertex.
    pub(crate) tangents: Vec<f32>,
    /// 3 floats per vertex. Synthesized by finalize.
    pub(crate) bitangents: Vec<f32>,
    /// 2 floats per vertex.
    pub(crate) tex_coords: Vec<f32>,
    pub(crate) indices: Vec<u32>,
    /// Interleaved buffer, [`ALL_ATTRIBUTES_STRIDE`] floats per vertex.
    pub(crate) all_attributes: Vec<f32>,
}

impl Shape {
    /// Allocate the five core attribute arrays for the given counts.
    ///
    /// Callers must have validated the counts against [`MAX_VERTICES`] and
    /// [`MAX_INDICES`] via [`check_mesh_size`] first.
    pub(crate) fn allocate(number_vertices: u32, number_indices: u32) -> Self {
        let nv = number_vertices as usize;
        Self {
            mode: PrimitiveMode::Triangles,
            number_vertices,
            number_indices,
            vertices: vec![0.0; 4 * nv],
            normals: vec![0.0; 3 * nv],
            tangents: vec![0.0; 3 * nv],
            bitangents: Vec::new(),
            tex_coords: vec![0.0; 2 * nv],
            indices: vec![0; number_indices as usize],
            all_attributes: Vec::new(),
        }
    }

    /// Get the primitive topology.
    pub fn mode(&self) -> PrimitiveMode {
        self.mode
    }

    /// Get the number of vertices.
    pub fn number_vertices(&self) -> u32 {
        self.number_vertices
    }

    /// Get the number of indices.
    pub fn number_indices(&self) -> u32 {
        self.number_indices
    }

    /// Homogeneous positions, 4 floats per vertex.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Normals, 3 floats per vertex.
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Tangents, 3 floats per vertex.
    pub fn tangents(&self) -> &[f32] {
        &self.tangents
    }

    /// Bitangents, 3 floats per vertex. Empty until finalized.
    pub fn bitangents(&self) -> &[f32] {
        &self.bitangents
    }

    /// Texture coordinates, 2 floats per vertex.
    pub fn tex_coords(&self) -> &[f32] {
        &self.tex_coords
    }

    /// Index list.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Interleaved attribute buffer, [`ALL_ATTRIBUTES_STRIDE`] floats per
    /// vertex. Empty until finalized.
    pub fn all_attributes(&self) -> &[f32] {
        &self.all_attributes
    }

    /// Raw bytes of the interleaved attribute buffer, for vertex-buffer
    /// upload.
    pub fn attribute_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.all_attributes)
    }

    /// Raw bytes of the index list, for index-buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Synthesize bitangents and rebuild the interleaved attribute buffer.
    ///
    /// Bitangents are recomputed as `cross(normal, tangent)` per vertex,
    /// overwriting any prior values. The interleaved buffer is only
    /// consistent with the attribute arrays as of this call; after mutating
    /// tangents (e.g. via
    /// [`calculate_tangent_bitangent`](super::calculate_tangent_bitangent))
    /// call `finalize` again.
    pub fn finalize(&mut self) {
        let nv = self.number_vertices as usize;

        self.bitangents.clear();
        self.bitangents.resize(3 * nv, 0.0);
        for i in 0..nv {
            let normal = Vec3::new(
                self.normals[i * 3],
                self.normals[i * 3 + 1],
                self.normals[i * 3 + 2],
            );
            let tangent = Vec3::new(
                self.tangents[i * 3],
                self.tangents[i * 3 + 1],
                self.tangents[i * 3 + 2],
            );
            let bitangent = normal.cross(&tangent);
            self.bitangents[i * 3..i * 3 + 3].copy_from_slice(bitangent.as_slice());
        }

        let stride = ALL_ATTRIBUTES_STRIDE;
        self.all_attributes.clear();
        self.all_attributes.resize(stride * nv, 0.0);
        for i in 0..nv {
            let out = &mut self.all_attributes[i * stride..(i + 1) * stride];
            out[0..4].copy_from_slice(&self.vertices[i * 4..i * 4 + 4]);
            out[4..7].copy_from_slice(&self.normals[i * 3..i * 3 + 3]);
            out[7..10].copy_from_slice(&self.tangents[i * 3..i * 3 + 3]);
            out[10..13].copy_from_slice(&self.bitangents[i * 3..i * 3 + 3]);
            out[13..15].copy_from_slice(&self.tex_coords[i * 2..i * 2 + 2]);
        }
    }

    /// Release every attribute array and reset counts and mode.
    ///
    /// Idempotent: clearing an already-cleared or default shape is a no-op.
    pub fn clear(&mut self) {
        self.vertices = Vec::new();
        self.normals = Vec::new();
        self.tangents = Vec::new();
        self.bitangents = Vec::new();
        self.tex_coords = Vec::new();
        self.indices = Vec::new();
        self.all_attributes = Vec::new();
        self.number_vertices = 0;
        self.number_indices = 0;
        self.mode = PrimitiveMode::Triangles;
    }
}

/// Validate computed mesh counts against the implementation limits.
pub(crate) fn check_mesh_size(vertices: u64, indices: u64) -> Result<(), ShapeError> {
    if vertices > MAX_VERTICES || indices > MAX_INDICES {
        return Err(ShapeError::TooLarge { vertices, indices });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_vertices_per_primitive() {
        assert_eq!(PrimitiveMode::Triangles.vertices_per_primitive(), Some(3));
        assert_eq!(PrimitiveMode::TriangleStrip.vertices_per_primitive(), None);
    }

    #[test]
    fn finalize_interleaves_in_fixed_order() {
        let mut shape = Shape::allocate(1, 3);
        shape.vertices.copy_from_slice(&[1.0, 2.0, 3.0, 1.0]);
        shape.normals.copy_from_slice(&[0.0, 0.0, 1.0]);
        shape.tangents.copy_from_slice(&[1.0, 0.0, 0.0]);
        shape.tex_coords.copy_from_slice(&[0.25, 0.75]);
        shape.finalize();

        // cross((0,0,1), (1,0,0)) = (0,1,0)
        assert_eq!(shape.bitangents(), &[0.0, 1.0, 0.0]);
        assert_eq!(
            shape.all_attributes(),
            &[1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.25, 0.75]
        );
    }

    #[test]
    fn finalize_overwrites_prior_bitangents() {
        let mut shape = Shape::allocate(1, 3);
        shape.normals.copy_from_slice(&[0.0, 1.0, 0.0]);
        shape.tangents.copy_from_slice(&[0.0, 0.0, 1.0]);
        shape.bitangents = vec![9.0, 9.0, 9.0];
        shape.finalize();
        assert_eq!(shape.bitangents(), &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let mut source = Shape::allocate(1, 3);
        source.vertices.copy_from_slice(&[1.0, 2.0, 3.0, 1.0]);
        source.normals.copy_from_slice(&[0.0, 0.0, 1.0]);
        source.tangents.copy_from_slice(&[1.0, 0.0, 0.0]);
        source.tex_coords.copy_from_slice(&[0.5, 0.5]);
        source.finalize();

        let copy = source.clone();
        let expected_attributes = source.all_attributes().to_vec();

        // Clearing the source must not disturb the copy.
        source.clear();
        assert_eq!(copy.number_vertices(), 1);
        assert_eq!(copy.vertices(), &[1.0, 2.0, 3.0, 1.0]);
        assert_eq!(copy.all_attributes(), expected_attributes.as_slice());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut shape = Shape::allocate(4, 6);
        shape.finalize();
        shape.clear();
        assert_eq!(shape.number_vertices(), 0);
        assert_eq!(shape.number_indices(), 0);
        assert!(shape.vertices().is_empty());
        assert!(shape.all_attributes().is_empty());

        // Second clear must be a no-op.
        shape.clear();
        assert_eq!(shape.number_vertices(), 0);
        assert_eq!(shape.mode(), PrimitiveMode::Triangles);
    }

    #[test]
    fn byte_views_match_float_data() {
        let mut shape = Shape::allocate(1, 3);
        shape.indices.copy_from_slice(&[0, 0, 0]);
        shape.finalize();
        assert_eq!(
            shape.attribute_bytes().len(),
            shape.all_attributes().len() * 4
        );
        assert_eq!(shape.index_bytes().len(), shape.indices().len() * 4);
    }

    #[test]
    fn size_check_rejects_oversized_meshes() {
        assert!(check_mesh_size(MAX_VERTICES, MAX_INDICES).is_ok());
        assert!(check_mesh_size(MAX_VERTICES + 1, 0).is_err());
        assert!(check_mesh_size(0, MAX_INDICES + 1).is_err());
    }
}
