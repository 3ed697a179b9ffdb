// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The display pass.  Takes a finished image and draws it onto a
//! target surface through a textured full-screen quad: a vertex stage
//! that passes geometry straight through, a small rasterizer, and a
//! fragment stage that samples the image.

use crate::color::ColorSample;
use crate::errors::{MandelError, Result};
use crate::grid::{Grid, OutputImage};
use crate::planes::Pixel;

/// A vertex of the display geometry, already in clip space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    /// Clip-space position.
    pub position: [f32; 3],
    /// Texture coordinate; (0, 0) is the top-left of the image.
    pub tex_coords: [f32; 2],
}

/// A quad covering the whole target surface.
pub const QUAD_VERTICES: &[Vertex] = &[
    Vertex {
        position: [-1.0, 1.0, 0.0],
        tex_coords: [0.0, 0.0],
    },
    Vertex {
        position: [-1.0, -1.0, 0.0],
        tex_coords: [0.0, 1.0],
    },
    Vertex {
        position: [1.0, -1.0, 0.0],
        tex_coords: [1.0, 1.0],
    },
    Vertex {
        position: [1.0, 1.0, 0.0],
        tex_coords: [1.0, 0.0],
    },
];

/// Two counter-clockwise triangles over `QUAD_VERTICES`.
pub const QUAD_INDICES: &[u16] = &[0, 1, 2, 2, 3, 0];

/// What the vertex stage hands to the rasterizer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClipVertex {
    /// Homogeneous clip-space position.
    pub clip: [f32; 4],
    /// Texture coordinate, unchanged.
    pub tex_coords: [f32; 2],
}

/// Forwards the position and texture coordinate unchanged.  No
/// transform is applied.
pub fn vertex_stage(vertex: &Vertex) -> ClipVertex {
    let [x, y, z] = vertex.position;
    ClipVertex {
        clip: [x, y, z, 1.0],
        tex_coords: vertex.tex_coords,
    }
}

/// How texture coordinates outside [0, 1] are resolved.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AddressMode {
    /// Wrap around.
    Repeat,
    /// Stick to the nearest edge texel.
    ClampToEdge,
}

/// A nearest-texel sampler.
#[derive(Copy, Clone, Debug)]
pub struct Sampler {
    /// Addressing along u.
    pub address_u: AddressMode,
    /// Addressing along v.
    pub address_v: AddressMode,
}

impl Default for Sampler {
    fn default() -> Self {
        Sampler {
            address_u: AddressMode::Repeat,
            address_v: AddressMode::Repeat,
        }
    }
}

fn texel(coord: f32, size: usize, mode: AddressMode) -> usize {
    let t = match mode {
        AddressMode::Repeat => coord - coord.floor(),
        AddressMode::ClampToEdge => num::clamp(coord, 0.0, 1.0),
    };
    ((t * size as f32).floor() as usize).min(size - 1)
}

impl Sampler {
    /// The texel of `image` nearest to `uv`.  An empty image samples as
    /// transparent black.
    pub fn sample(&self, image: &OutputImage, uv: [f32; 2]) -> ColorSample {
        if image.is_empty() {
            return ColorSample::default();
        }
        let pixel = Pixel(
            texel(uv[0], image.width(), self.address_u),
            texel(uv[1], image.height(), self.address_v),
        );
        image.get(&pixel).cloned().unwrap_or_default()
    }
}

/// Samples the image and emits the color with its red channel forced
/// to full.
pub fn fragment_stage(sampler: &Sampler, image: &OutputImage, uv: [f32; 2]) -> ColorSample {
    let mut color = sampler.sample(image, uv);
    color.r = 1.0;
    color
}

/// The presented surface.
pub type Frame = Grid<ColorSample>;

#[inline]
fn edge(a: [f32; 2], b: [f32; 2], p: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

/// Draws an image onto a surface through some clip-space geometry.
#[derive(Clone, Debug)]
pub struct DisplayPass {
    sampler: Sampler,
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

impl Default for DisplayPass {
    fn default() -> Self {
        DisplayPass::new(QUAD_VERTICES.to_vec(), QUAD_INDICES.to_vec(), Sampler::default())
    }
}

impl DisplayPass {
    /// Constructor.  `indices` is read as a triangle list; a trailing
    /// partial triangle is ignored.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u16>, sampler: Sampler) -> DisplayPass {
        DisplayPass {
            sampler,
            vertices,
            indices,
        }
    }

    /// Renders `image` onto a `width × height` surface.  Surface pixels
    /// not covered by any front-facing triangle stay at the default,
    /// fully transparent color.
    pub fn present(&self, image: &OutputImage, width: usize, height: usize) -> Result<Frame> {
        if image.is_empty() {
            return Err(MandelError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }
        if width == 0 || height == 0 {
            return Err(MandelError::EmptyImage { width, height });
        }

        let clipped: Vec<ClipVertex> = self.vertices.iter().map(vertex_stage).collect();
        let mut frame = Grid::new(width, height);
        for triangle in self.indices.chunks_exact(3) {
            let corners = (
                clipped.get(triangle[0] as usize),
                clipped.get(triangle[1] as usize),
                clipped.get(triangle[2] as usize),
            );
            match corners {
                (Some(a), Some(b), Some(c)) => self.rasterize(&[*a, *b, *c], image, &mut frame),
                _ => warn!("skipping triangle {:?} with an out-of-range index", triangle),
            }
        }
        Ok(frame)
    }

    /// Fills the pixels whose centers fall inside a counter-clockwise
    /// triangle.  Clockwise and degenerate triangles are culled.
    fn rasterize(&self, triangle: &[ClipVertex; 3], image: &OutputImage, frame: &mut Frame) {
        let ndc: Vec<[f32; 2]> = triangle
            .iter()
            .map(|v| [v.clip[0] / v.clip[3], v.clip[1] / v.clip[3]])
            .collect();
        let area = edge(ndc[0], ndc[1], ndc[2]);
        if !(area > 0.0) {
            trace!("culled back-facing triangle {:?}", ndc);
            return;
        }

        let (width, height) = (frame.width() as f32, frame.height() as f32);
        let min_x = ndc.iter().map(|p| p[0]).fold(std::f32::INFINITY, f32::min);
        let max_x = ndc.iter().map(|p| p[0]).fold(std::f32::NEG_INFINITY, f32::max);
        let min_y = ndc.iter().map(|p| p[1]).fold(std::f32::INFINITY, f32::min);
        let max_y = ndc.iter().map(|p| p[1]).fold(std::f32::NEG_INFINITY, f32::max);

        // Clip-space y points up, surface rows run down.
        let left = ((min_x + 1.0) / 2.0 * width).floor().max(0.0) as usize;
        let right = ((max_x + 1.0) / 2.0 * width).ceil().min(width) as usize;
        let top = ((1.0 - max_y) / 2.0 * height).floor().max(0.0) as usize;
        let bottom = ((1.0 - min_y) / 2.0 * height).ceil().min(height) as usize;

        for row in top..bottom {
            for column in left..right {
                let p = [
                    (column as f32 + 0.5) / width * 2.0 - 1.0,
                    1.0 - (row as f32 + 0.5) / height * 2.0,
                ];
                let weights = [
                    edge(ndc[1], ndc[2], p) / area,
                    edge(ndc[2], ndc[0], p) / area,
                    edge(ndc[0], ndc[1], p) / area,
                ];
                if weights.iter().any(|&w| w < 0.0) {
                    continue;
                }
                let mut uv = [0.0_f32; 2];
                for (vertex, weight) in triangle.iter().zip(weights.iter()) {
                    uv[0] += vertex.tex_coords[0] * weight;
                    uv[1] += vertex.tex_coords[1] * weight;
                }
                frame.set(
                    &Pixel(column, row),
                    fragment_stage(&self.sampler, image, uv),
                );
            }
        }
    }
}
