#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points c on the complex plane for
//! which the orbit of zero under z = z² + c stays bounded.  For every
//! pixel of the output image we map the pixel to a point of a chosen
//! window of the plane, count how many iterations its orbit survives
//! before leaving a radius of 2, and turn that count into a color.
//! Points that survive the whole iteration budget are painted black.
//!
//! Every pixel is independent of every other, so the work is split
//! into tiles and spread over a pool of threads.  The finished image is
//! then drawn onto a target surface by a small display pass that
//! samples it through a full-screen quad.

#[macro_use]
extern crate log;

pub mod color;
pub mod dispatch;
pub mod display;
pub mod errors;
pub mod escape;
pub mod grid;
pub mod params;
pub mod pipeline;
pub mod planes;

pub use color::{color_for, ColorSample};
pub use dispatch::{render_single, Dispatcher};
pub use display::{DisplayPass, Frame};
pub use errors::{MandelError, Result};
pub use escape::escape_time;
pub use grid::{Grid, OutputImage};
pub use params::{FractalParams, Viewport};
pub use pipeline::Pipeline;
pub use planes::{Pixel, PlaneMapper};
