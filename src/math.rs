//! Math type aliases and helper functions.
//!
//! Thin f32 aliases over [`nalgebra`] plus the small set of rotation helpers
//! the shape generators need (axis rotations expressed as quaternions, and
//! quaternion-to-matrix conversion for deriving tangent directions).

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Quaternion (f32). Stored as `[x, y, z, w]` in memory.
pub type Quat = nalgebra::Quaternion<f32>;

/// Create a quaternion from rotation around the Y axis (angle in radians).
pub fn quat_from_rotation_y(angle: f32) -> Quat {
    nalgebra::UnitQuaternion::from_axis_angle(&nalgebra::Vector3::y_axis(), angle).into_inner()
}

/// Create a quaternion from rotation around the Z axis (angle in radians).
pub fn quat_from_rotation_z(angle: f32) -> Quat {
    nalgebra::UnitQuaternion::from_axis_angle(&nalgebra::Vector3::z_axis(), angle).into_inner()
}

/// Convert a unit quaternion to a 4x4 rotation matrix.
pub fn quat_to_mat4(q: Quat) -> Mat4 {
    nalgebra::UnitQuaternion::new_unchecked(q).to_homogeneous()
}

/// Transform a direction vector by the rotational part of a 4x4 matrix.
pub fn mat4_transform_vec3(m: &Mat4, v: &Vec3) -> Vec3 {
    m.transform_vector(v)
}

/// Rotate a vector by a quaternion.
pub fn quat_rotate_vec3(q: Quat, v: Vec3) -> Vec3 {
    nalgebra::UnitQuaternion::new_unchecked(q) * v
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn rotation_y_90() {
        let q = quat_from_rotation_y(FRAC_PI_2);
        let v = quat_rotate_vec3(q, Vec3::new(1.0, 0.0, 0.0));
        assert!((v.x - 0.0).abs() < 1e-5);
        assert!((v.z - (-1.0)).abs() < 1e-5);
    }

    #[test]
    fn rotation_z_90() {
        let q = quat_from_rotation_z(FRAC_PI_2);
        let v = quat_rotate_vec3(q, Vec3::new(0.0, 1.0, 0.0));
        assert!((v.x - (-1.0)).abs() < 1e-5);
        assert!((v.y - 0.0).abs() < 1e-5);
    }

    #[test]
    fn quat_to_mat4_matches_direct_rotation() {
        let q = quat_from_rotation_y(0.7);
        let m = quat_to_mat4(q);
        let v = Vec3::new(1.0, 0.0, 0.0);
        let a = mat4_transform_vec3(&m, &v);
        let b = quat_rotate_vec3(q, v);
        assert!((a - b).norm() < 1e-6);
    }
}
