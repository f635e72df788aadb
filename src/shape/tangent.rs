//! Tangent-space recomputation from texture-coordinate gradients.

use crate::math::Vec3;

use super::data::{PrimitiveMode, Shape};
use super::error::ShapeError;

/// Recompute per-vertex tangents and bitangents from the UV gradients of each
/// triangle.
///
/// For every triangle, the tangent is the object-space direction of
/// increasing `u` and the bitangent of increasing `v`, solved from the
/// triangle's edge and texture-coordinate deltas. Per-face vectors are
/// normalized, accumulated into every referenced vertex and the per-vertex
/// sums normalized again, so vertices shared by several triangles get the
/// averaged direction.
///
/// Indexed shapes walk the index list; non-indexed shapes treat every three
/// consecutive vertices as a triangle (a trailing remainder of one or two
/// vertices receives no face contribution). Degenerate UV mappings (zero-area
/// triangles in texture space) and vertices with no contribution produce
/// non-finite components which propagate unchanged.
///
/// Only triangle lists are supported. The interleaved attribute buffer is not
/// touched; call [`Shape::finalize`] afterwards to rebuild it. On error the
/// shape is left unmodified.
pub fn calculate_tangent_bitangent(shape: &mut Shape) -> Result<(), ShapeError> {
    if shape.vertices.is_empty() {
        return Err(ShapeError::MissingAttributes("vertices"));
    }
    if shape.tex_coords.is_empty() {
        return Err(ShapeError::MissingAttributes("texture coordinates"));
    }
    if shape.mode != PrimitiveMode::Triangles {
        return Err(ShapeError::UnsupportedMode);
    }

    let nv = shape.number_vertices as usize;
    shape.tangents.clear();
    shape.tangents.resize(3 * nv, 0.0);
    shape.bitangents.clear();
    shape.bitangents.resize(3 * nv, 0.0);

    if shape.number_indices > 0 {
        for tri in 0..shape.number_indices as usize / 3 {
            let i0 = shape.indices[tri * 3] as usize;
            let i1 = shape.indices[tri * 3 + 1] as usize;
            let i2 = shape.indices[tri * 3 + 2] as usize;
            accumulate_triangle(shape, i0, i1, i2);
        }
    } else {
        for tri in 0..nv / 3 {
            accumulate_triangle(shape, tri * 3, tri * 3 + 1, tri * 3 + 2);
        }
    }

    // Normalize, as several triangles may have contributed to a vertex
    for i in 0..nv {
        normalize_in_place(&mut shape.tangents[i * 3..i * 3 + 3]);
        normalize_in_place(&mut shape.bitangents[i * 3..i * 3 + 3]);
    }

    log::debug!(
        "recomputed tangent space for {} vertices ({} indices)",
        shape.number_vertices,
        shape.number_indices
    );
    Ok(())
}

/// Solve the UV-gradient tangent frame of one triangle and add it to the
/// tangent/bitangent sums of its three vertices.
fn accumulate_triangle(shape: &mut Shape, i0: usize, i1: usize, i2: usize) {
    let s1 = shape.tex_coords[2 * i1] - shape.tex_coords[2 * i0];
    let t1 = shape.tex_coords[2 * i1 + 1] - shape.tex_coords[2 * i0 + 1];
    let s2 = shape.tex_coords[2 * i2] - shape.tex_coords[2 * i0];
    let t2 = shape.tex_coords[2 * i2 + 1] - shape.tex_coords[2 * i0 + 1];

    let scalar = 1.0 / (s1 * t2 - s2 * t1);

    let q1 = Vec3::new(
        shape.vertices[4 * i1] - shape.vertices[4 * i0],
        shape.vertices[4 * i1 + 1] - shape.vertices[4 * i0 + 1],
        shape.vertices[4 * i1 + 2] - shape.vertices[4 * i0 + 2],
    );
    let q2 = Vec3::new(
        shape.vertices[4 * i2] - shape.vertices[4 * i0],
        shape.vertices[4 * i2 + 1] - shape.vertices[4 * i0 + 1],
        shape.vertices[4 * i2 + 2] - shape.vertices[4 * i0 + 2],
    );

    let tangent = (scalar * (t2 * q1 - t1 * q2)).normalize();
    let bitangent = (scalar * (-s2 * q1 + s1 * q2)).normalize();

    for &i in &[i0, i1, i2] {
        shape.tangents[3 * i] += tangent.x;
        shape.tangents[3 * i + 1] += tangent.y;
        shape.tangents[3 * i + 2] += tangent.z;

        shape.bitangents[3 * i] += bitangent.x;
        shape.bitangents[3 * i + 1] += bitangent.y;
        shape.bitangents[3 * i + 2] += bitangent.z;
    }
}

fn normalize_in_place(v: &mut [f32]) {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    v[0] /= length;
    v[1] /= length;
    v[2] /= length;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::generators::{create_cube, create_rectangular_grid_plane};

    fn tangent_at(shape: &Shape, i: usize) -> Vec3 {
        Vec3::new(
            shape.tangents()[i * 3],
            shape.tangents()[i * 3 + 1],
            shape.tangents()[i * 3 + 2],
        )
    }

    fn bitangent_at(shape: &Shape, i: usize) -> Vec3 {
        Vec3::new(
            shape.bitangents()[i * 3],
            shape.bitangents()[i * 3 + 1],
            shape.bitangents()[i * 3 + 2],
        )
    }

    #[test]
    fn cube_tangents_are_reproduced_from_uvs() {
        let cube = create_cube(1.0).unwrap();
        let authored = cube.tangents().to_vec();

        let mut recomputed = cube.clone();
        calculate_tangent_bitangent(&mut recomputed).unwrap();

        // The cube's authored tangents are exactly the UV gradients of their
        // faces, so the recomputation reproduces them on all 24 vertices.
        for (i, (a, b)) in authored.iter().zip(recomputed.tangents()).enumerate() {
            assert!((a - b).abs() < 1e-4, "component {i} tangent mismatch: {a} vs {b}");
        }
    }

    #[test]
    fn plane_gradient_directions() {
        // The grid plane's UVs grow with +x and +y, so the tangent must come
        // out as +x and the bitangent as +y.
        let mut plane = create_rectangular_grid_plane(2.0, 2.0, 2, 2, false).unwrap();
        calculate_tangent_bitangent(&mut plane).unwrap();

        for i in 0..plane.number_vertices() as usize {
            let tangent = tangent_at(&plane, i);
            assert!((tangent - Vec3::new(1.0, 0.0, 0.0)).norm() < 1e-4);
            let bitangent = bitangent_at(&plane, i);
            assert!((bitangent - Vec3::new(0.0, 1.0, 0.0)).norm() < 1e-4);
        }
    }

    #[test]
    fn recomputed_tangents_are_unit_length() {
        let mut cube = create_cube(1.0).unwrap();
        calculate_tangent_bitangent(&mut cube).unwrap();
        for i in 0..cube.number_vertices() as usize {
            assert!((tangent_at(&cube, i).norm() - 1.0).abs() < 1e-4);
            assert!((bitangent_at(&cube, i).norm() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn strip_mode_fails_without_mutation() {
        let mut strip = create_rectangular_grid_plane(1.0, 1.0, 2, 2, true).unwrap();
        let tangents_before = strip.tangents().to_vec();
        assert_eq!(
            calculate_tangent_bitangent(&mut strip),
            Err(ShapeError::UnsupportedMode)
        );
        assert_eq!(strip.tangents(), tangents_before.as_slice());
    }

    #[test]
    fn missing_tex_coords_fail_without_mutation() {
        let mut cube = create_cube(1.0).unwrap();
        cube.tex_coords = Vec::new();
        let tangents_before = cube.tangents().to_vec();
        assert_eq!(
            calculate_tangent_bitangent(&mut cube),
            Err(ShapeError::MissingAttributes("texture coordinates"))
        );
        assert_eq!(cube.tangents(), tangents_before.as_slice());
    }

    #[test]
    fn cleared_shape_fails_without_mutation() {
        let mut shape = create_cube(1.0).unwrap();
        shape.clear();
        assert_eq!(
            calculate_tangent_bitangent(&mut shape),
            Err(ShapeError::MissingAttributes("vertices"))
        );
        assert!(shape.tangents().is_empty());
    }

    #[test]
    fn non_indexed_remainder_gets_no_face_contribution() {
        // Two full triangles plus one leftover vertex, no index list. Both
        // triangles lie in the XY plane with UVs equal to (x, y).
        let corners = [
            (0.0, 0.0),
            (1.0, 0.0),
            (0.0, 1.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (2.0, 2.0),
        ];
        let mut shape = Shape::allocate(7, 0);
        for (i, (u, v)) in corners.iter().enumerate() {
            shape.vertices[i * 4] = *u;
            shape.vertices[i * 4 + 1] = *v;
            shape.vertices[i * 4 + 3] = 1.0;
            shape.tex_coords[i * 2] = *u;
            shape.tex_coords[i * 2 + 1] = *v;
        }
        calculate_tangent_bitangent(&mut shape).unwrap();

        // The six triangle vertices get the UV-gradient tangent +x.
        for i in 0..6 {
            assert!((tangent_at(&shape, i) - Vec3::new(1.0, 0.0, 0.0)).norm() < 1e-4);
        }
        // The leftover vertex got no contribution; normalizing its zero sum
        // yields non-finite components.
        assert!(!tangent_at(&shape, 6).x.is_finite());
    }
}
