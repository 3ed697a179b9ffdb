// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type shared by every stage of the renderer.

use failure::Fail;

/// Everything that can stop a generation pass before it starts.  The
/// per-pixel computation itself cannot fail.
#[derive(Debug, Fail, PartialEq)]
pub enum MandelError {
    /// One axis of the complex window is empty, inverted, or NaN.
    #[fail(display = "invalid {} bounds: min {} must be less than max {}", axis, min, max)]
    InvalidBounds {
        /// "x" or "y"
        axis: &'static str,
        /// The offending lower bound.
        min: f64,
        /// The offending upper bound.
        max: f64,
    },

    /// The iteration cap must be at least one.
    #[fail(display = "max_iterations must be greater than zero")]
    InvalidIterations,

    /// An image with no pixels cannot be generated or displayed.
    #[fail(display = "image dimensions {}x{} contain no pixels", width, height)]
    EmptyImage {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Tiles must have a non-zero edge.
    #[fail(display = "tile size {}x{} is invalid", _0, _1)]
    InvalidTile(u32, u32),

    /// A worker thread panicked; the pass produced no image.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MandelError>;
