// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and the window of the complex plane named by a `FractalParams`.
use num::Complex;

use crate::errors::{MandelError, Result};
use crate::params::FractalParams;

/// Describes the width and height of an integral plane that is assumed
/// to start at 0,0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y of a pixel in an image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of the integral plane onto points of the complex plane.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The extent of the integral cartesian plane.
    pub integral_plane: IntegralPlane,
    /// The window of the complex plane.
    pub params: FractalParams,
}

impl PlaneMapper {
    /// Constructor.  Takes the image dimensions and the (already
    /// validated) window.  An image without pixels is rejected.
    pub fn new(width: usize, height: usize, params: &FractalParams) -> Result<PlaneMapper> {
        if width == 0 || height == 0 {
            return Err(MandelError::EmptyImage { width, height });
        }
        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            params: *params,
        })
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Whether a pixel lies inside the integral plane.
    pub fn contains(&self, pixel: &Pixel) -> bool {
        pixel.0 < self.integral_plane.0 && pixel.1 < self.integral_plane.1
    }

    /// Given a pixel on the integral cartesian plane, return the
    /// complex number at the corresponding location of the window.
    /// Each axis is normalized to [0, 1) and interpolated on its own.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let x_norm = (pixel.0 as f64) / (self.integral_plane.0 as f64);
        let y_norm = (pixel.1 as f64) / (self.integral_plane.1 as f64);
        Complex::new(
            x_norm * (self.params.x_max - self.params.x_min) + self.params.x_min,
            y_norm * (self.params.y_max - self.params.y_min) + self.params.y_min,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> FractalParams {
        FractalParams::new(x_min, x_max, y_min, y_max, 10).unwrap()
    }

    #[test]
    fn planemapper_fails_on_empty_image() {
        let p = params(-1.0, 1.0, -1.0, 1.0);
        assert!(PlaneMapper::new(0, 4, &p).is_err());
        assert!(PlaneMapper::new(4, 0, &p).is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4, &params(-1.0, 1.0, -1.0, 1.0)).unwrap();
        assert_eq!(pm.len(), 16);
        assert!(!pm.is_empty());
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = PlaneMapper::new(5, 5, &params(0.0, 5.0, 0.0, 5.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 4.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let pm = PlaneMapper::new(4, 4, &params(-2.0, 2.0, -2.0, 2.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(1.0, -1.0));
    }

    #[test]
    fn origin_pixel_maps_to_window_minimum() {
        let pm = PlaneMapper::new(7, 3, &params(-2.0, 1.0, -1.5, 1.5)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -1.5));
    }

    #[test]
    fn last_pixel_approaches_window_maximum() {
        let p = params(-2.0, 1.0, -1.5, 1.5);
        for &size in &[8usize, 64, 640, 4096] {
            let pm = PlaneMapper::new(size, size, &p).unwrap();
            let last = pm.pixel_to_point(&Pixel(size - 1, size - 1));
            let step_x = p.width() / size as f64;
            let step_y = p.height() / size as f64;
            assert!((p.x_max - last.re - step_x).abs() < 1e-9);
            assert!((p.y_max - last.im - step_y).abs() < 1e-9);
            assert!(last.re < p.x_max && last.im < p.y_max);
        }
    }

    #[test]
    fn contains_respects_bounds() {
        let pm = PlaneMapper::new(10, 4, &params(-1.0, 1.0, -1.0, 1.0)).unwrap();
        assert!(pm.contains(&Pixel(9, 3)));
        assert!(!pm.contains(&Pixel(10, 3)));
        assert!(!pm.contains(&Pixel(0, 4)));
    }
}
