// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A row-major `width × height` buffer, used for both the iteration
//! counts and the colored image a pass produces.

use image::RgbaImage;

use crate::color::ColorSample;
use crate::planes::Pixel;

/// A rectangular buffer of values, stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// The image written by a generation pass.
pub type OutputImage = Grid<ColorSample>;

impl<T: Copy + Default> Grid<T> {
    /// A grid filled with `T::default()`.
    pub fn new(width: usize, height: usize) -> Grid<T> {
        Grid {
            width,
            height,
            cells: vec![T::default(); width * height],
        }
    }
}

impl<T> Grid<T> {
    /// Width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn offset(&self, pixel: &Pixel) -> Option<usize> {
        if pixel.0 < self.width && pixel.1 < self.height {
            Some(pixel.1 * self.width + pixel.0)
        } else {
            None
        }
    }

    /// The value at a pixel, or None outside the grid.
    pub fn get(&self, pixel: &Pixel) -> Option<&T> {
        self.offset(pixel).map(|o| &self.cells[o])
    }

    /// Stores a value.  Returns false, and writes nothing, when the
    /// pixel is outside the grid.
    pub fn set(&mut self, pixel: &Pixel, value: T) -> bool {
        match self.offset(pixel) {
            Some(o) => {
                self.cells[o] = value;
                true
            }
            None => false,
        }
    }

    /// Iterates over the rows, top first.
    pub fn rows(&self) -> std::slice::Chunks<T> {
        self.cells.chunks(self.width.max(1))
    }

    /// The raw cells in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }
}

impl Grid<ColorSample> {
    /// Quantizes the grid into 8-bit RGBA bytes, row by row.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.cells.iter().flat_map(|c| c.to_rgba8().to_vec()).collect()
    }

    /// Quantizes the grid into an 8-bit RGBA image.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width as u32, self.height as u32, self.to_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_default_filled() {
        let g: Grid<u32> = Grid::new(3, 2);
        assert_eq!(g.len(), 6);
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 2);
        assert!(g.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn set_and_get_are_row_major() {
        let mut g: Grid<u32> = Grid::new(3, 2);
        assert!(g.set(&Pixel(2, 1), 7));
        assert_eq!(g.get(&Pixel(2, 1)), Some(&7));
        assert_eq!(g.as_slice()[5], 7);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut g: Grid<u32> = Grid::new(3, 2);
        assert!(!g.set(&Pixel(3, 0), 1));
        assert!(!g.set(&Pixel(0, 2), 1));
        assert_eq!(g.get(&Pixel(3, 0)), None);
        assert!(g.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn rows_split_by_width() {
        let g: Grid<u8> = Grid::new(4, 3);
        let rows: Vec<&[u8]> = g.rows().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 4));
    }

    #[test]
    fn rgba_export_matches_samples() {
        let mut g: OutputImage = Grid::new(2, 1);
        g.set(&Pixel(1, 0), ColorSample::new(1.0, 0.0, 0.0, 1.0));
        let img = g.to_rgba_image().unwrap();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.into_raw(), vec![0, 0, 0, 0, 255, 0, 0, 255]);
    }
}
