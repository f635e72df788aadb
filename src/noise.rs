//! Seeded value-noise rasters.
//!
//! Octave-summed, cosine-interpolated value noise over a seeded integer
//! lattice, producing single-channel byte rasters suitable for texture
//! upload. The lattice wraps in every dimension, so the rasters tile.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Errors from the noise raster constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseError {
    /// A parameter violates a constructor precondition.
    InvalidArgument {
        /// Which precondition failed.
        what: &'static str,
    },
}

impl std::fmt::Display for NoiseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { what } => write!(f, "invalid argument: {what}"),
        }
    }
}

impl std::error::Error for NoiseError {}

/// Maximum extent of a noise raster along any axis.
///
/// Raster extents are 16-bit quantities; the cap also keeps the value count
/// (`width * height * depth`) comfortably inside every index computation.
pub const MAX_RASTER_EXTENT: u32 = 65_535;

/// A single-channel noise raster of up to three dimensions.
///
/// Lower-dimensional rasters keep the unused extents at 1. Values are stored
/// in x-major order: `data[x + y * width + z * width * height]`.
#[derive(Debug, Clone)]
pub struct NoiseRaster {
    width: u32,
    height: u32,
    depth: u32,
    data: Vec<u8>,
}

impl NoiseRaster {
    /// Extent along x.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Extent along y (1 for 1D rasters).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Extent along z (1 for 1D and 2D rasters).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Raster values in x-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the raster, keeping only the value buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Seeded random integer lattice with wrap-around addressing.
struct Lattice {
    width: i64,
    height: i64,
    depth: i64,
    values: Vec<i64>,
}

impl Lattice {
    fn new(width: u32, height: u32, depth: u32, seed: u64) -> Self {
        let len = width as usize * height as usize * depth as usize;
        let mut rng = StdRng::seed_from_u64(seed);
        let values = (0..len).map(|_| rng.gen_range(0..i32::MAX as i64)).collect();
        Self {
            width: width as i64,
            height: height as i64,
            depth: depth as i64,
            values,
        }
    }

    /// Lattice value at the wrapped coordinate, reduced modulo the octave
    /// amplitude.
    fn value(&self, x: i64, y: i64, z: i64, modulus: i64) -> f32 {
        let x = x.rem_euclid(self.width);
        let y = y.rem_euclid(self.height);
        let z = z.rem_euclid(self.depth);
        let index = (x + y * self.width + z * self.width * self.height) as usize;
        (self.values[index] % modulus.max(1)) as f32
    }
}

/// Cosine interpolation between two values, `t` in `[0, 1]`.
fn interpolate(value0: f32, value1: f32, t: f32) -> f32 {
    let ft = (1.0 - (t * std::f32::consts::PI).cos()) / 2.0;
    value0 * (1.0 - ft) + value1 * ft
}

fn check_parameters(persistence: f32, dims: &[u32]) -> Result<(), NoiseError> {
    if persistence <= 0.0 {
        return Err(NoiseError::InvalidArgument {
            what: "persistence must be positive",
        });
    }
    if dims.iter().any(|&d| d < 1) {
        return Err(NoiseError::InvalidArgument {
            what: "raster extents must be at least 1",
        });
    }
    if dims.iter().any(|&d| d > MAX_RASTER_EXTENT) {
        return Err(NoiseError::InvalidArgument {
            what: "raster extents must be at most 65535",
        });
    }
    Ok(())
}

/// Create a 1D noise raster of `width` values.
///
/// `frequency` sets the base wavelength (`width / frequency`), each octave
/// doubles it; `amplitude` scales the first octave and `persistence` the
/// falloff between octaves. The same seed always yields the same raster.
pub fn create_noise_1d(
    width: u32,
    seed: u64,
    frequency: f32,
    amplitude: f32,
    persistence: f32,
    octaves: u32,
) -> Result<NoiseRaster, NoiseError> {
    check_parameters(persistence, &[width])?;
    Ok(render_noise(width, 1, 1, seed, frequency, amplitude, persistence, octaves))
}

/// Create a 2D noise raster of `width * height` values.
///
/// See [`create_noise_1d`] for the meaning of the shared parameters.
pub fn create_noise_2d(
    width: u32,
    height: u32,
    seed: u64,
    frequency: f32,
    amplitude: f32,
    persistence: f32,
    octaves: u32,
) -> Result<NoiseRaster, NoiseError> {
    check_parameters(persistence, &[width, height])?;
    Ok(render_noise(width, height, 1, seed, frequency, amplitude, persistence, octaves))
}

/// Create a 3D noise raster of `width * height * depth` values.
///
/// See [`create_noise_1d`] for the meaning of the shared parameters.
#[allow(clippy::too_many_arguments)]
pub fn create_noise_3d(
    width: u32,
    height: u32,
    depth: u32,
    seed: u64,
    frequency: f32,
    amplitude: f32,
    persistence: f32,
    octaves: u32,
) -> Result<NoiseRaster, NoiseError> {
    check_parameters(persistence, &[width, height, depth])?;
    Ok(render_noise(width, height, depth, seed, frequency, amplitude, persistence, octaves))
}

/// Octave-summed value noise over a fresh seeded lattice.
///
/// A dimension of extent 1 degenerates cleanly: its wavelength clamps to 1
/// and the interpolation along it always samples at t = 0, so the 1D and 2D
/// constructors are exact slices of this.
#[allow(clippy::too_many_arguments)]
fn render_noise(
    width: u32,
    height: u32,
    depth: u32,
    seed: u64,
    frequency: f32,
    amplitude: f32,
    persistence: f32,
    octaves: u32,
) -> NoiseRaster {
    let (w, h, d) = (width as i64, height as i64, depth as i64);
    let lattice = Lattice::new(width, height, depth, seed);

    let mut data = vec![0.0f32; (w * h * d) as usize];

    let mut frequency_factor = 1.0f32;
    let mut amplitude_factor = 1.0f32 / persistence;

    for _ in 0..octaves {
        let current_frequency = (frequency * frequency_factor).max(1.0);
        let current_amplitude = amplitude / amplitude_factor;
        let modulus = current_amplitude as i64;

        let wave_x = (w / current_frequency as i64).max(1);
        let wave_y = (h / current_frequency as i64).max(1);
        let wave_z = (d / current_frequency as i64).max(1);

        // Render per wavelength cell
        let mut z = 0i64;
        while z < d {
            let mut y = 0i64;
            while y < h {
                let mut x = 0i64;
                while x < w {
                    let (xr, yr, zr) = (x / wave_x, y / wave_y, z / wave_z);

                    // Lattice values at the cell's corners
                    let p000 = lattice.value(xr, yr, zr, modulus);
                    let p100 = lattice.value(xr + 1, yr, zr, modulus);
                    let p010 = lattice.value(xr, yr + 1, zr, modulus);
                    let p110 = lattice.value(xr + 1, yr + 1, zr, modulus);
                    let p001 = lattice.value(xr, yr, zr + 1, modulus);
                    let p101 = lattice.value(xr + 1, yr, zr + 1, modulus);
                    let p011 = lattice.value(xr, yr + 1, zr + 1, modulus);
                    let p111 = lattice.value(xr + 1, yr + 1, zr + 1, modulus);

                    for zi in 0..wave_z.min(d - z) {
                        let tz = zi as f32 / wave_z as f32;
                        for yi in 0..wave_y.min(h - y) {
                            let ty = yi as f32 / wave_y as f32;
                            for xi in 0..wave_x.min(w - x) {
                                let tx = xi as f32 / wave_x as f32;

                                let x0 = interpolate(p000, p100, tx);
                                let x1 = interpolate(p010, p110, tx);
                                let x2 = interpolate(p001, p101, tx);
                                let x3 = interpolate(p011, p111, tx);

                                let y0 = interpolate(x0, x1, ty);
                                let y1 = interpolate(x2, x3, ty);

                                let index =
                                    ((z + zi) * h * w + (y + yi) * w + (x + xi)) as usize;
                                data[index] += interpolate(y0, y1, tz);
                            }
                        }
                    }

                    x += wave_x;
                }
                y += wave_y;
            }
            z += wave_z;
        }

        frequency_factor *= 2.0;
        amplitude_factor *= 1.0 / persistence;
    }

    log::debug!("rendered {width}x{height}x{depth} noise raster, {octaves} octaves");

    NoiseRaster {
        width,
        height,
        depth,
        data: data.into_iter().map(|v| v as u8).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_is_deterministic() {
        let a = create_noise_2d(32, 32, 42, 4.0, 128.0, 0.5, 4).unwrap();
        let b = create_noise_2d(32, 32, 42, 4.0, 128.0, 0.5, 4).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn different_seeds_differ() {
        let a = create_noise_2d(32, 32, 1, 4.0, 128.0, 0.5, 4).unwrap();
        let b = create_noise_2d(32, 32, 2, 4.0, 128.0, 0.5, 4).unwrap();
        assert_ne!(a.data(), b.data());
    }

    #[test]
    fn raster_dimensions() {
        let raster = create_noise_1d(64, 0, 2.0, 64.0, 0.5, 3).unwrap();
        assert_eq!(raster.width(), 64);
        assert_eq!(raster.height(), 1);
        assert_eq!(raster.depth(), 1);
        assert_eq!(raster.data().len(), 64);

        let raster = create_noise_3d(8, 4, 2, 0, 2.0, 64.0, 0.5, 3).unwrap();
        assert_eq!(raster.data().len(), 8 * 4 * 2);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(matches!(
            create_noise_1d(0, 0, 2.0, 64.0, 0.5, 3),
            Err(NoiseError::InvalidArgument { .. })
        ));
        assert!(matches!(
            create_noise_2d(16, 16, 0, 2.0, 64.0, 0.0, 3),
            Err(NoiseError::InvalidArgument { .. })
        ));
        assert!(create_noise_3d(8, 0, 8, 0, 2.0, 64.0, 0.5, 3).is_err());
    }

    #[test]
    fn rejects_oversized_extents() {
        assert!(matches!(
            create_noise_1d(MAX_RASTER_EXTENT + 1, 0, 2.0, 64.0, 0.5, 3),
            Err(NoiseError::InvalidArgument { .. })
        ));
        assert!(create_noise_3d(MAX_RASTER_EXTENT + 1, 8, 8, 0, 2.0, 64.0, 0.5, 3).is_err());
    }

    #[test]
    fn one_dimension_is_a_slice_of_two() {
        // A 2D raster of height 1 must equal the 1D raster of the same seed.
        let one = create_noise_1d(64, 7, 4.0, 128.0, 0.5, 4).unwrap();
        let two = create_noise_2d(64, 1, 7, 4.0, 128.0, 0.5, 4).unwrap();
        assert_eq!(one.data(), two.data());
    }

    #[test]
    fn zero_octaves_is_flat() {
        let raster = create_noise_2d(16, 16, 3, 4.0, 128.0, 0.5, 0).unwrap();
        assert!(raster.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn single_pixel_raster() {
        let raster = create_noise_1d(1, 5, 2.0, 64.0, 0.5, 2).unwrap();
        assert_eq!(raster.data().len(), 1);
    }
}
