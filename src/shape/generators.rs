//! Shape generators for canonical primitives.
//!
//! Every generator validates its parameters, builds the full attribute set
//! (position, normal, tangent, texture coordinate, indices) and finalizes the
//! shape (bitangents + interleaved buffer) before returning it. All
//! generators are deterministic.

use std::f32::consts::PI;

use crate::math::{mat4_transform_vec3, quat_from_rotation_y, quat_from_rotation_z, quat_to_mat4, Vec3};

use super::data::{check_mesh_size, PrimitiveMode, Shape};
use super::error::ShapeError;

/// Create a square on the XY plane facing +Z.
///
/// 4 vertices, 6 indices, tangent +X, UV corners (0,0)-(1,1). The unit quad
/// is scaled uniformly by `half_extent`.
pub fn create_plane(half_extent: f32) -> Result<Shape, ShapeError> {
    create_rectangular_plane(half_extent, half_extent)
}

/// Create a rectangle on the XY plane facing +Z.
///
/// Like [`create_plane`] but with independent horizontal and vertical
/// half-extents.
pub fn create_rectangular_plane(
    horizontal_extent: f32,
    vertical_extent: f32,
) -> Result<Shape, ShapeError> {
    const XY_VERTICES: [f32; 16] = [
        -1.0, -1.0, 0.0, 1.0, //
        1.0, -1.0, 0.0, 1.0, //
        -1.0, 1.0, 0.0, 1.0, //
        1.0, 1.0, 0.0, 1.0,
    ];
    const XY_NORMALS: [f32; 12] = [
        0.0, 0.0, 1.0, //
        0.0, 0.0, 1.0, //
        0.0, 0.0, 1.0, //
        0.0, 0.0, 1.0,
    ];
    const XY_TANGENTS: [f32; 12] = [
        1.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        1.0, 0.0, 0.0,
    ];
    const XY_TEX_COORDS: [f32; 8] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
    const XY_INDICES: [u32; 6] = [0, 1, 2, 1, 3, 2];

    let mut shape = Shape::allocate(4, 6);

    shape.vertices.copy_from_slice(&XY_VERTICES);
    for i in 0..4 {
        shape.vertices[i * 4] *= horizontal_extent;
        shape.vertices[i * 4 + 1] *= vertical_extent;
    }
    shape.normals.copy_from_slice(&XY_NORMALS);
    shape.tangents.copy_from_slice(&XY_TANGENTS);
    shape.tex_coords.copy_from_slice(&XY_TEX_COORDS);
    shape.indices.copy_from_slice(&XY_INDICES);

    shape.finalize();
    log::debug!(
        "created rectangular plane: {} vertices, {} indices",
        shape.number_vertices,
        shape.number_indices
    );
    Ok(shape)
}

/// Create a subdivided rectangle on the XY plane facing +Z.
///
/// Builds a `(rows + 1) x (columns + 1)` vertex grid spanning
/// `[-h/2, h/2] x [-v/2, v/2]` with UVs linear in `[0, 1]^2`. With
/// `triangle_strip` the index list is a single boustrophedon strip
/// (alternating row direction), otherwise two CCW triangles per cell.
pub fn create_rectangular_grid_plane(
    horizontal_extent: f32,
    vertical_extent: f32,
    rows: u32,
    columns: u32,
    triangle_strip: bool,
) -> Result<Shape, ShapeError> {
    if rows < 1 || columns < 1 {
        return Err(ShapeError::InvalidArgument {
            what: "grid plane requires rows >= 1 and columns >= 1",
        });
    }

    let number_vertices = (rows as u64 + 1) * (columns as u64 + 1);
    let number_indices = if triangle_strip {
        rows as u64 * 2 * (columns as u64 + 1)
    } else {
        rows as u64 * 6 * columns as u64
    };
    check_mesh_size(number_vertices, number_indices)?;

    let mut shape = Shape::allocate(number_vertices as u32, number_indices as u32);
    if triangle_strip {
        shape.mode = PrimitiveMode::TriangleStrip;
    }

    for i in 0..number_vertices as usize {
        let x = (i as u32 % (columns + 1)) as f32 / columns as f32;
        let y = 1.0 - (i as u32 / (columns + 1)) as f32 / rows as f32;

        shape.vertices[i * 4] = horizontal_extent * (x - 0.5);
        shape.vertices[i * 4 + 1] = vertical_extent * (y - 0.5);
        shape.vertices[i * 4 + 2] = 0.0;
        shape.vertices[i * 4 + 3] = 1.0;

        shape.normals[i * 3] = 0.0;
        shape.normals[i * 3 + 1] = 0.0;
        shape.normals[i * 3 + 2] = 1.0;

        shape.tangents[i * 3] = 1.0;
        shape.tangents[i * 3 + 1] = 0.0;
        shape.tangents[i * 3 + 2] = 0.0;

        shape.tex_coords[i * 2] = x;
        shape.tex_coords[i * 2 + 1] = y;
    }

    if triangle_strip {
        for i in 0..(rows * (columns + 1)) as usize {
            let current_column = i as u32 % (columns + 1);
            let current_row = i as u32 / (columns + 1);

            if current_row == 0 {
                // Left to right, top to bottom
                shape.indices[i * 2] = current_column + current_row * (columns + 1);
                shape.indices[i * 2 + 1] = current_column + (current_row + 1) * (columns + 1);
            } else {
                // Right to left, bottom to up
                shape.indices[i * 2] = (columns - current_column) + (current_row + 1) * (columns + 1);
                shape.indices[i * 2 + 1] = (columns - current_column) + current_row * (columns + 1);
            }
        }
    } else {
        for i in 0..(rows * columns) as usize {
            let current_column = i as u32 % columns;
            let current_row = i as u32 / columns;

            shape.indices[i * 6] = current_column + current_row * (columns + 1);
            shape.indices[i * 6 + 1] = current_column + (current_row + 1) * (columns + 1);
            shape.indices[i * 6 + 2] = (current_column + 1) + (current_row + 1) * (columns + 1);

            shape.indices[i * 6 + 3] = (current_column + 1) + (current_row + 1) * (columns + 1);
            shape.indices[i * 6 + 4] = (current_column + 1) + current_row * (columns + 1);
            shape.indices[i * 6 + 5] = current_column + current_row * (columns + 1);
        }
    }

    shape.finalize();
    log::debug!(
        "created grid plane ({rows}x{columns}, strip={triangle_strip}): {} vertices, {} indices",
        shape.number_vertices,
        shape.number_indices
    );
    Ok(shape)
}

/// Create a disc on the XY plane facing +Z.
///
/// Fan topology: one center vertex plus `sectors + 1` rim vertices (the seam
/// vertex is duplicated so texture coordinates wrap). Fails if `sectors < 3`.
pub fn create_disc(radius: f32, sectors: u32) -> Result<Shape, ShapeError> {
    if sectors < 3 {
        return Err(ShapeError::InvalidArgument {
            what: "disc requires at least 3 sectors",
        });
    }

    let number_vertices = sectors as u64 + 2;
    let number_indices = sectors as u64 * 3;
    check_mesh_size(number_vertices, number_indices)?;

    let angle_step = (2.0 * PI) / sectors as f32;

    let mut shape = Shape::allocate(number_vertices as u32, number_indices as u32);
    let mut vertex_counter = 0usize;

    // Center
    shape.vertices[0] = 0.0;
    shape.vertices[1] = 0.0;
    shape.vertices[2] = 0.0;
    shape.vertices[3] = 1.0;
    shape.normals[0] = 0.0;
    shape.normals[1] = 0.0;
    shape.normals[2] = 1.0;
    shape.tangents[0] = 1.0;
    shape.tangents[1] = 0.0;
    shape.tangents[2] = 0.0;
    shape.tex_coords[0] = 0.5;
    shape.tex_coords[1] = 0.5;
    vertex_counter += 1;

    for i in 0..=sectors {
        let current_angle = angle_step * i as f32;

        shape.vertices[vertex_counter * 4] = current_angle.cos() * radius;
        shape.vertices[vertex_counter * 4 + 1] = current_angle.sin() * radius;
        shape.vertices[vertex_counter * 4 + 2] = 0.0;
        shape.vertices[vertex_counter * 4 + 3] = 1.0;

        shape.normals[vertex_counter * 3] = 0.0;
        shape.normals[vertex_counter * 3 + 1] = 0.0;
        shape.normals[vertex_counter * 3 + 2] = 1.0;

        shape.tangents[vertex_counter * 3] = 1.0;
        shape.tangents[vertex_counter * 3 + 1] = 0.0;
        shape.tangents[vertex_counter * 3 + 2] = 0.0;

        // Historical double scaling, kept for compatibility with existing
        // content authored against it.
        shape.tex_coords[vertex_counter * 2] = 0.5 * current_angle.cos() * 0.5;
        shape.tex_coords[vertex_counter * 2 + 1] = 0.5 * current_angle.sin() * 0.5;

        vertex_counter += 1;
    }

    let mut index_indices = 0usize;
    let mut index_counter = 1u32;
    for _ in 0..sectors {
        shape.indices[index_indices] = 0;
        shape.indices[index_indices + 1] = index_counter;
        shape.indices[index_indices + 2] = index_counter + 1;
        index_indices += 3;
        index_counter += 1;
    }

    shape.finalize();
    log::debug!(
        "created disc ({sectors} sectors): {} vertices, {} indices",
        shape.number_vertices,
        shape.number_indices
    );
    Ok(shape)
}

/// Create an axis-aligned cube centered at the origin.
///
/// 24 vertices (4 per face, unshared so each face keeps its own normal,
/// tangent and UVs) and 36 indices, scaled uniformly by `half_extent`.
pub fn create_cube(half_extent: f32) -> Result<Shape, ShapeError> {
    #[rustfmt::skip]
    const CUBE_VERTICES: [f32; 96] = [
        // -Y face
        -1.0, -1.0, -1.0, 1.0,   -1.0, -1.0,  1.0, 1.0,    1.0, -1.0,  1.0, 1.0,    1.0, -1.0, -1.0, 1.0,
        // +Y face
        -1.0,  1.0, -1.0, 1.0,   -1.0,  1.0,  1.0, 1.0,    1.0,  1.0,  1.0, 1.0,    1.0,  1.0, -1.0, 1.0,
        // -Z face
        -1.0, -1.0, -1.0, 1.0,   -1.0,  1.0, -1.0, 1.0,    1.0,  1.0, -1.0, 1.0,    1.0, -1.0, -1.0, 1.0,
        // +Z face
        -1.0, -1.0,  1.0, 1.0,   -1.0,  1.0,  1.0, 1.0,    1.0,  1.0,  1.0, 1.0,    1.0, -1.0,  1.0, 1.0,
        // -X face
        -1.0, -1.0, -1.0, 1.0,   -1.0, -1.0,  1.0, 1.0,   -1.0,  1.0,  1.0, 1.0,   -1.0,  1.0, -1.0, 1.0,
        // +X face
         1.0, -1.0, -1.0, 1.0,    1.0, -1.0,  1.0, 1.0,    1.0,  1.0,  1.0, 1.0,    1.0,  1.0, -1.0, 1.0,
    ];

    #[rustfmt::skip]
    const CUBE_NORMALS: [f32; 72] = [
         0.0, -1.0,  0.0,    0.0, -1.0,  0.0,    0.0, -1.0,  0.0,    0.0, -1.0,  0.0,
         0.0,  1.0,  0.0,    0.0,  1.0,  0.0,    0.0,  1.0,  0.0,    0.0,  1.0,  0.0,
         0.0,  0.0, -1.0,    0.0,  0.0, -1.0,    0.0,  0.0, -1.0,    0.0,  0.0, -1.0,
         0.0,  0.0,  1.0,    0.0,  0.0,  1.0,    0.0,  0.0,  1.0,    0.0,  0.0,  1.0,
        -1.0,  0.0,  0.0,   -1.0,  0.0,  0.0,   -1.0,  0.0,  0.0,   -1.0,  0.0,  0.0,
         1.0,  0.0,  0.0,    1.0,  0.0,  0.0,    1.0,  0.0,  0.0,    1.0,  0.0,  0.0,
    ];

    #[rustfmt::skip]
    const CUBE_TANGENTS: [f32; 72] = [
         1.0,  0.0,  0.0,    1.0,  0.0,  0.0,    1.0,  0.0,  0.0,    1.0,  0.0,  0.0,
         1.0,  0.0,  0.0,    1.0,  0.0,  0.0,    1.0,  0.0,  0.0,    1.0,  0.0,  0.0,
        -1.0,  0.0,  0.0,   -1.0,  0.0,  0.0,   -1.0,  0.0,  0.0,   -1.0,  0.0,  0.0,
         1.0,  0.0,  0.0,    1.0,  0.0,  0.0,    1.0,  0.0,  0.0,    1.0,  0.0,  0.0,
         0.0,  0.0,  1.0,    0.0,  0.0,  1.0,    0.0,  0.0,  1.0,    0.0,  0.0,  1.0,
         0.0,  0.0, -1.0,    0.0,  0.0, -1.0,    0.0,  0.0, -1.0,    0.0,  0.0, -1.0,
    ];

    #[rustfmt::skip]
    const CUBE_TEX_COORDS: [f32; 48] = [
        0.0, 0.0,   0.0, 1.0,   1.0, 1.0,   1.0, 0.0,
        0.0, 1.0,   0.0, 0.0,   1.0, 0.0,   1.0, 1.0,
        1.0, 0.0,   1.0, 1.0,   0.0, 1.0,   0.0, 0.0,
        0.0, 0.0,   0.0, 1.0,   1.0, 1.0,   1.0, 0.0,
        0.0, 0.0,   1.0, 0.0,   1.0, 1.0,   0.0, 1.0,
        1.0, 0.0,   0.0, 0.0,   0.0, 1.0,   1.0, 1.0,
    ];

    #[rustfmt::skip]
    const CUBE_INDICES: [u32; 36] = [
         0,  2,  1,    0,  3,  2,
         4,  5,  6,    4,  6,  7,
         8,  9, 10,    8, 10, 11,
        12, 15, 14,   12, 14, 13,
        16, 17, 18,   16, 18, 19,
        20, 23, 22,   20, 22, 21,
    ];

    let mut shape = Shape::allocate(24, 36);

    shape.vertices.copy_from_slice(&CUBE_VERTICES);
    for i in 0..24 {
        shape.vertices[i * 4] *= half_extent;
        shape.vertices[i * 4 + 1] *= half_extent;
        shape.vertices[i * 4 + 2] *= half_extent;
    }
    shape.normals.copy_from_slice(&CUBE_NORMALS);
    shape.tangents.copy_from_slice(&CUBE_TANGENTS);
    shape.tex_coords.copy_from_slice(&CUBE_TEX_COORDS);
    shape.indices.copy_from_slice(&CUBE_INDICES);

    shape.finalize();
    log::debug!(
        "created cube: {} vertices, {} indices",
        shape.number_vertices,
        shape.number_indices
    );
    Ok(shape)
}

/// Shared latitude/longitude shell used by the sphere and dome generators.
///
/// Tangents track longitude: the reference direction (1,0,0) is rotated about
/// the Y axis by `360 degrees * u` through a quaternion-derived matrix.
fn build_lat_long_shell(radius: f32, slices: u32, number_parallels: u32) -> Shape {
    let number_vertices = (number_parallels + 1) * (slices + 1);
    let number_indices = number_parallels * slices * 6;
    let angle_step = (2.0 * PI) / slices as f32;

    let help_vector = Vec3::new(1.0, 0.0, 0.0);

    let mut shape = Shape::allocate(number_vertices, number_indices);

    for i in 0..=number_parallels {
        for j in 0..=slices {
            let vertex_index = ((i * (slices + 1) + j) * 4) as usize;
            let normal_index = ((i * (slices + 1) + j) * 3) as usize;
            let tangent_index = ((i * (slices + 1) + j) * 3) as usize;
            let tex_coords_index = ((i * (slices + 1) + j) * 2) as usize;

            let theta = angle_step * i as f32;
            let phi = angle_step * j as f32;

            shape.vertices[vertex_index] = radius * theta.sin() * phi.sin();
            shape.vertices[vertex_index + 1] = radius * theta.cos();
            shape.vertices[vertex_index + 2] = radius * theta.sin() * phi.cos();
            shape.vertices[vertex_index + 3] = 1.0;

            shape.normals[normal_index] = shape.vertices[vertex_index] / radius;
            shape.normals[normal_index + 1] = shape.vertices[vertex_index + 1] / radius;
            shape.normals[normal_index + 2] = shape.vertices[vertex_index + 2] / radius;

            let s = j as f32 / slices as f32;
            shape.tex_coords[tex_coords_index] = s;
            shape.tex_coords[tex_coords_index + 1] = 1.0 - i as f32 / number_parallels as f32;

            let rotation = quat_to_mat4(quat_from_rotation_y((360.0 * s).to_radians()));
            let tangent = mat4_transform_vec3(&rotation, &help_vector);
            shape.tangents[tangent_index..tangent_index + 3].copy_from_slice(tangent.as_slice());
        }
    }

    let mut index_indices = 0usize;
    for i in 0..number_parallels {
        for j in 0..slices {
            shape.indices[index_indices] = i * (slices + 1) + j;
            shape.indices[index_indices + 1] = (i + 1) * (slices + 1) + j;
            shape.indices[index_indices + 2] = (i + 1) * (slices + 1) + (j + 1);

            shape.indices[index_indices + 3] = i * (slices + 1) + j;
            shape.indices[index_indices + 4] = (i + 1) * (slices + 1) + (j + 1);
            shape.indices[index_indices + 5] = i * (slices + 1) + (j + 1);
            index_indices += 6;
        }
    }

    shape.finalize();
    shape
}

/// Create a UV sphere.
///
/// `slices / 2` parallels, `(parallels + 1) * (slices + 1)` vertices with the
/// longitude seam duplicated for texture wrap. Fails if `slices < 3`.
pub fn create_sphere(radius: f32, slices: u32) -> Result<Shape, ShapeError> {
    if slices < 3 {
        return Err(ShapeError::InvalidArgument {
            what: "sphere requires at least 3 slices",
        });
    }

    let number_parallels = slices / 2;
    let number_vertices = (number_parallels as u64 + 1) * (slices as u64 + 1);
    let number_indices = number_parallels as u64 * slices as u64 * 6;
    check_mesh_size(number_vertices, number_indices)?;

    let shape = build_lat_long_shell(radius, slices, number_parallels);
    log::debug!(
        "created sphere ({slices} slices): {} vertices, {} indices",
        shape.number_vertices,
        shape.number_indices
    );
    Ok(shape)
}

/// Create a dome (upper hemisphere cap).
///
/// Identical parametrization to [`create_sphere`] but with `slices / 4`
/// parallels, covering exactly the upper quarter of the latitude range.
/// Fails if `slices < 3`.
pub fn create_dome(radius: f32, slices: u32) -> Result<Shape, ShapeError> {
    if slices < 3 {
        return Err(ShapeError::InvalidArgument {
            what: "dome requires at least 3 slices",
        });
    }

    let number_parallels = slices / 4;
    let number_vertices = (number_parallels as u64 + 1) * (slices as u64 + 1);
    let number_indices = number_parallels as u64 * slices as u64 * 6;
    check_mesh_size(number_vertices, number_indices)?;

    let shape = build_lat_long_shell(radius, slices, number_parallels);
    log::debug!(
        "created dome ({slices} slices): {} vertices, {} indices",
        shape.number_vertices,
        shape.number_indices
    );
    Ok(shape)
}

/// Create a torus around the Z axis.
///
/// `inner_radius` is the distance from the center to the inner rim,
/// `outer_radius` to the outer rim; the tube radius is half their difference.
/// Tangents track the main ring: the reference direction (0,1,0) rotated
/// about Z by `360 degrees * s`. Fails if `slices < 3` or `stacks < 3`.
pub fn create_torus(
    inner_radius: f32,
    outer_radius: f32,
    slices: u32,
    stacks: u32,
) -> Result<Shape, ShapeError> {
    if slices < 3 || stacks < 3 {
        return Err(ShapeError::InvalidArgument {
            what: "torus requires at least 3 slices and 3 stacks",
        });
    }

    let number_vertices = (stacks as u64 + 1) * (slices as u64 + 1);
    // 2 triangles per face * 3 indices per triangle
    let number_indices = stacks as u64 * slices as u64 * 6;
    check_mesh_size(number_vertices, number_indices)?;

    let torus_radius = (outer_radius - inner_radius) / 2.0;
    let center_radius = outer_radius - torus_radius;

    let s_incr = 1.0 / slices as f32;
    let t_incr = 1.0 / stacks as f32;

    let help_vector = Vec3::new(0.0, 1.0, 0.0);

    let mut shape = Shape::allocate(number_vertices as u32, number_indices as u32);

    // s runs around the main ring, t around the tube cross-section.
    for side_count in 0..=slices {
        let s = side_count as f32 * s_incr;
        let cos_2pi_s = (2.0 * PI * s).cos();
        let sin_2pi_s = (2.0 * PI * s).sin();

        for face_count in 0..=stacks {
            let t = face_count as f32 * t_incr;
            let cos_2pi_t = (2.0 * PI * t).cos();
            let sin_2pi_t = (2.0 * PI * t).sin();

            let base = (side_count * (stacks + 1) + face_count) as usize;

            shape.vertices[base * 4] = (center_radius + torus_radius * cos_2pi_t) * cos_2pi_s;
            shape.vertices[base * 4 + 1] = (center_radius + torus_radius * cos_2pi_t) * sin_2pi_s;
            shape.vertices[base * 4 + 2] = torus_radius * sin_2pi_t;
            shape.vertices[base * 4 + 3] = 1.0;

            shape.normals[base * 3] = cos_2pi_s * cos_2pi_t;
            shape.normals[base * 3 + 1] = sin_2pi_s * cos_2pi_t;
            shape.normals[base * 3 + 2] = sin_2pi_t;

            shape.tex_coords[base * 2] = s;
            shape.tex_coords[base * 2 + 1] = t;

            let rotation = quat_to_mat4(quat_from_rotation_z((360.0 * s).to_radians()));
            let tangent = mat4_transform_vec3(&rotation, &help_vector);
            shape.tangents[base * 3..base * 3 + 3].copy_from_slice(tangent.as_slice());
        }
    }

    let mut index_indices = 0usize;
    for side_count in 0..slices {
        for face_count in 0..stacks {
            let v0 = side_count * (stacks + 1) + face_count;
            let v1 = (side_count + 1) * (stacks + 1) + face_count;
            let v2 = (side_count + 1) * (stacks + 1) + (face_count + 1);
            let v3 = side_count * (stacks + 1) + (face_count + 1);

            // Two CCW triangles per face
            shape.indices[index_indices] = v0;
            shape.indices[index_indices + 1] = v1;
            shape.indices[index_indices + 2] = v2;

            shape.indices[index_indices + 3] = v0;
            shape.indices[index_indices + 4] = v2;
            shape.indices[index_indices + 5] = v3;
            index_indices += 6;
        }
    }

    shape.finalize();
    log::debug!(
        "created torus ({slices} slices, {stacks} stacks): {} vertices, {} indices",
        shape.number_vertices,
        shape.number_indices
    );
    Ok(shape)
}

/// Create a cylinder along the Y axis.
///
/// Bottom cap fan, top cap fan, and a side band whose rim vertices are
/// duplicated per cap plane so side normals stay radial while cap normals
/// stay axial. Fails if `slices < 3`.
pub fn create_cylinder(half_extent: f32, radius: f32, slices: u32) -> Result<Shape, ShapeError> {
    if slices < 3 {
        return Err(ShapeError::InvalidArgument {
            what: "cylinder requires at least 3 slices",
        });
    }

    let number_vertices = (slices as u64 + 2) * 2 + (slices as u64 + 1) * 2;
    let number_indices = slices as u64 * 3 * 2 + slices as u64 * 6;
    check_mesh_size(number_vertices, number_indices)?;

    let angle_step = (2.0 * PI) / slices as f32;

    let mut shape = Shape::allocate(number_vertices as u32, number_indices as u32);
    let mut vc = 0usize; // vertex counter

    let write_vertex =
        |shape: &mut Shape, vc: usize, p: [f32; 4], n: [f32; 3], t: [f32; 3], uv: [f32; 2]| {
            shape.vertices[vc * 4..vc * 4 + 4].copy_from_slice(&p);
            shape.normals[vc * 3..vc * 3 + 3].copy_from_slice(&n);
            shape.tangents[vc * 3..vc * 3 + 3].copy_from_slice(&t);
            shape.tex_coords[vc * 2..vc * 2 + 2].copy_from_slice(&uv);
        };

    // Center bottom
    write_vertex(
        &mut shape,
        vc,
        [0.0, -half_extent, 0.0, 1.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0],
    );
    vc += 1;

    // Bottom rim
    for i in 0..=slices {
        let a = angle_step * i as f32;
        write_vertex(
            &mut shape,
            vc,
            [a.cos() * radius, -half_extent, -a.sin() * radius, 1.0],
            [0.0, -1.0, 0.0],
            [a.sin(), 0.0, a.cos()],
            [0.0, 0.0],
        );
        vc += 1;
    }

    // Center top
    write_vertex(
        &mut shape,
        vc,
        [0.0, half_extent, 0.0, 1.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, -1.0],
        [1.0, 1.0],
    );
    vc += 1;

    // Top rim
    for i in 0..=slices {
        let a = angle_step * i as f32;
        write_vertex(
            &mut shape,
            vc,
            [a.cos() * radius, half_extent, -a.sin() * radius, 1.0],
            [0.0, 1.0, 0.0],
            [-a.sin(), 0.0, -a.cos()],
            [1.0, 1.0],
        );
        vc += 1;
    }

    // Side band: one bottom and one top vertex per slice edge, radial normals
    for i in 0..=slices {
        let a = angle_step * i as f32;
        let mut sign = -1.0f32;
        for _ in 0..2 {
            write_vertex(
                &mut shape,
                vc,
                [a.cos() * radius, half_extent * sign, -a.sin() * radius, 1.0],
                [a.cos(), 0.0, -a.sin()],
                [-a.sin(), 0.0, -a.cos()],
                [i as f32 / slices as f32, (sign + 1.0) / 2.0],
            );
            vc += 1;
            sign = 1.0;
        }
    }

    let mut ii = 0usize; // index into the index list

    // Bottom cap, wound to face -Y
    let mut index_counter = 1u32;
    for _ in 0..slices {
        shape.indices[ii] = 0;
        shape.indices[ii + 1] = index_counter + 1;
        shape.indices[ii + 2] = index_counter;
        ii += 3;
        index_counter += 1;
    }
    index_counter += 1;

    // Top cap, wound to face +Y
    let center_index = index_counter;
    index_counter += 1;
    for _ in 0..slices {
        shape.indices[ii] = center_index;
        shape.indices[ii + 1] = index_counter;
        shape.indices[ii + 2] = index_counter + 1;
        ii += 3;
        index_counter += 1;
    }
    index_counter += 1;

    // Sides
    for _ in 0..slices {
        shape.indices[ii] = index_counter;
        shape.indices[ii + 1] = index_counter + 2;
        shape.indices[ii + 2] = index_counter + 1;

        shape.indices[ii + 3] = index_counter + 2;
        shape.indices[ii + 4] = index_counter + 3;
        shape.indices[ii + 5] = index_counter + 1;
        ii += 6;
        index_counter += 2;
    }

    shape.finalize();
    log::debug!(
        "created cylinder ({slices} slices): {} vertices, {} indices",
        shape.number_vertices,
        shape.number_indices
    );
    Ok(shape)
}

/// Create a cone along the Y axis with its apex at `+half_extent`.
///
/// Bottom cap fan plus a ruled side surface subdivided into `stacks` bands;
/// the side normal is the constant cone-surface normal. Fails if `slices < 3`
/// or `stacks < 1`.
pub fn create_cone(
    half_extent: f32,
    radius: f32,
    slices: u32,
    stacks: u32,
) -> Result<Shape, ShapeError> {
    if slices < 3 || stacks < 1 {
        return Err(ShapeError::InvalidArgument {
            what: "cone requires at least 3 slices and 1 stack",
        });
    }

    let number_vertices = (slices as u64 + 2) + (slices as u64 + 1) * (stacks as u64 + 1);
    let number_indices = slices as u64 * 3 + slices as u64 * 6 * stacks as u64;
    check_mesh_size(number_vertices, number_indices)?;

    let angle_step = (2.0 * PI) / slices as f32;

    let h = 2.0 * half_extent;
    let r = radius;
    let l = (h * h + r * r).sqrt();

    let mut shape = Shape::allocate(number_vertices as u32, number_indices as u32);
    let mut vc = 0usize;

    let write_vertex =
        |shape: &mut Shape, vc: usize, p: [f32; 4], n: [f32; 3], t: [f32; 3], uv: [f32; 2]| {
            shape.vertices[vc * 4..vc * 4 + 4].copy_from_slice(&p);
            shape.normals[vc * 3..vc * 3 + 3].copy_from_slice(&n);
            shape.tangents[vc * 3..vc * 3 + 3].copy_from_slice(&t);
            shape.tex_coords[vc * 2..vc * 2 + 2].copy_from_slice(&uv);
        };

    // Center bottom
    write_vertex(
        &mut shape,
        vc,
        [0.0, -half_extent, 0.0, 1.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0],
    );
    vc += 1;

    // Bottom rim
    for i in 0..=slices {
        let a = angle_step * i as f32;
        write_vertex(
            &mut shape,
            vc,
            [a.cos() * radius, -half_extent, -a.sin() * radius, 1.0],
            [0.0, -1.0, 0.0],
            [a.sin(), 0.0, a.cos()],
            [0.0, 0.0],
        );
        vc += 1;
    }

    // Side rings, base to apex
    for j in 0..=stacks {
        let level = j as f32 / stacks as f32;

        for i in 0..=slices {
            let a = angle_step * i as f32;
            write_vertex(
                &mut shape,
                vc,
                [
                    a.cos() * radius * (1.0 - level),
                    -half_extent + 2.0 * half_extent * level,
                    -a.sin() * radius * (1.0 - level),
                    1.0,
                ],
                [h / l * a.cos(), r / l, h / l * -a.sin()],
                [-a.sin(), 0.0, -a.cos()],
                [i as f32 / slices as f32, level],
            );
            vc += 1;
        }
    }

    let mut ii = 0usize;

    // Bottom cap, wound to face -Y
    let mut index_counter = 1u32;
    for _ in 0..slices {
        shape.indices[ii] = 0;
        shape.indices[ii + 1] = index_counter + 1;
        shape.indices[ii + 2] = index_counter;
        ii += 3;
        index_counter += 1;
    }
    index_counter += 1;

    // Sides
    for _ in 0..stacks {
        for _ in 0..slices {
            shape.indices[ii] = index_counter;
            shape.indices[ii + 1] = index_counter + 1;
            shape.indices[ii + 2] = index_counter + slices + 1;

            shape.indices[ii + 3] = index_counter + 1;
            shape.indices[ii + 4] = index_counter + slices + 2;
            shape.indices[ii + 5] = index_counter + slices + 1;
            ii += 6;
            index_counter += 1;
        }
        index_counter += 1;
    }

    shape.finalize();
    log::debug!(
        "created cone ({slices} slices, {stacks} stacks): {} vertices, {} indices",
        shape.number_vertices,
        shape.number_indices
    );
    Ok(shape)
}
