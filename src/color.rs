// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns iteration counts into colors.

/// One RGBA color, each channel in [0, 1].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ColorSample {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl ColorSample {
    /// Constructor.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> ColorSample {
        ColorSample { r, g, b, a }
    }

    /// Quantizes to 8 bits per channel, the way an unorm texture stores it.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            unorm8(self.r),
            unorm8(self.g),
            unorm8(self.b),
            unorm8(self.a),
        ]
    }
}

#[inline]
fn unorm8(c: f32) -> u8 {
    (num::clamp(c, 0.0, 1.0) * 255.0).round() as u8
}

#[inline]
fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// The six-segment HSV to RGB conversion.  Hue wraps at 1.0.
pub fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let [h, s, v] = hsv;
    let k = [1.0_f32, 2.0 / 3.0, 1.0 / 3.0];
    let mut rgb = [0.0_f32; 3];
    for (channel, offset) in rgb.iter_mut().zip(k.iter()) {
        let p = (fract(h + offset) * 6.0 - 3.0).abs();
        *channel = v * mix(1.0, num::clamp(p - 1.0, 0.0, 1.0), s);
    }
    rgb
}

/// Maps an iteration count to a color.  The hue follows the square
/// root of the normalized count; points that never escaped are black.
pub fn color_for(n: u32, max_iterations: u32) -> ColorSample {
    let normalized = if max_iterations == 0 {
        1.0
    } else {
        n as f32 / max_iterations as f32
    };
    let val = normalized.sqrt();
    let brightness = if n >= max_iterations { 0.0 } else { 1.0 };
    emit(hsv_to_rgb([val, 0.5, brightness]))
}

/// Green is dropped; both green and blue carry the computed blue.
#[inline]
fn emit(rgb: [f32; 3]) -> ColorSample {
    ColorSample::new(rgb[0], rgb[2], rgb[2], 1.0)
}
