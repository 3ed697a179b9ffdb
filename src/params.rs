// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parameters of a single generation pass: the rectangular window
//! of the complex plane being rendered and the iteration cap.  A
//! `FractalParams` is a `Copy` snapshot, so nothing can change it
//! while a pass is reading it.

use num::Complex;

use crate::errors::{MandelError, Result};

/// Describes the window of the complex plane and the maximum number of
/// iterations to perform per point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FractalParams {
    /// Real value of the left edge.
    pub x_min: f64,
    /// Real value of the right edge.
    pub x_max: f64,
    /// Imaginary value of the first row.
    pub y_min: f64,
    /// Imaginary value past the last row.
    pub y_max: f64,
    /// The iteration cap; a point surviving this many steps is in the set.
    pub max_iterations: u32,
}

impl FractalParams {
    /// Constructor.  Rejects windows that are empty or inverted on
    /// either axis, and an iteration cap of zero.
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        max_iterations: u32,
    ) -> Result<FractalParams> {
        let params = FractalParams {
            x_min,
            x_max,
            y_min,
            y_max,
            max_iterations,
        };
        params.validate()?;
        Ok(params)
    }

    /// Builds the parameters from the left-lower and right-upper
    /// corners of the window, treating the real part of each as x and
    /// the imaginary part as y.
    pub fn from_corners(
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
        max_iterations: u32,
    ) -> Result<FractalParams> {
        FractalParams::new(
            leftlower.re,
            rightupper.re,
            leftlower.im,
            rightupper.im,
            max_iterations,
        )
    }

    /// Checks the invariants.  The comparisons are written so that a
    /// NaN bound fails them.
    pub fn validate(&self) -> Result<()> {
        if !(self.x_min < self.x_max) {
            return Err(MandelError::InvalidBounds {
                axis: "x",
                min: self.x_min,
                max: self.x_max,
            });
        }
        if !(self.y_min < self.y_max) {
            return Err(MandelError::InvalidBounds {
                axis: "y",
                min: self.y_min,
                max: self.y_max,
            });
        }
        if self.max_iterations == 0 {
            return Err(MandelError::InvalidIterations);
        }
        Ok(())
    }

    /// Width of the window on the real axis.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the window on the imaginary axis.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// A square window described by its center and half-extent.  This is
/// the form a navigating caller usually holds; `to_params` turns it into
/// the snapshot a pass consumes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Center of the window.
    pub center: Complex<f64>,
    /// Half the edge length of the window.
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            center: Complex::new(0.0, 0.0),
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Constructor.
    pub fn new(center: Complex<f64>, zoom: f64) -> Viewport {
        Viewport { center, zoom }
    }

    /// Produces validated parameters.  A zoom that is not a positive,
    /// finite number collapses or inverts the window and is rejected.
    pub fn to_params(&self, max_iterations: u32) -> Result<FractalParams> {
        FractalParams::new(
            self.center.re - self.zoom,
            self.center.re + self.zoom,
            self.center.im - self.zoom,
            self.center.im + self.zoom,
            max_iterations,
        )
    }
}
