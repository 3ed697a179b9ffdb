// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Runs the per-pixel computation over a whole image.
//!
//! The image is cut into fixed-size tiles.  Worker threads pull tiles
//! off a shared queue until it runs dry, compute every pixel of each
//! tile, and hand the results back when they are joined.  Only the
//! dispatcher ever writes to the output grid, and it does so after
//! every worker has finished, so no partially written image is ever
//! visible.
//!
//! Because tiles have a fixed size, the grid of work units is padded
//! out to a whole number of tiles.  Work units that land in the
//! padding are skipped without touching anything.

use std::ops::Range;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crossbeam::thread::ScopedJoinHandle;
use itertools::iproduct;

use crate::color::{color_for, ColorSample};
use crate::errors::{MandelError, Result};
use crate::escape::escape_time;
use crate::grid::{Grid, OutputImage};
use crate::params::FractalParams;
use crate::planes::{IntegralPlane, Pixel, PlaneMapper};

/// Edge of the square tiles used when no other size is asked for.
pub const DEFAULT_TILE: usize = 16;

type TileQueue = Arc<Mutex<itertools::Product<Range<usize>, Range<usize>>>>;

/// Computes the color of a single pixel: map it into the complex
/// plane, run the escape-time test, and color the count.
#[inline]
pub fn shade(plane: &PlaneMapper, pixel: &Pixel) -> ColorSample {
    let max = plane.params.max_iterations;
    color_for(escape_time(plane.pixel_to_point(pixel), max), max)
}

/// Runs one work unit.  Units outside the image return None at once,
/// without calling `unit`.
#[inline]
pub fn guarded<T, F>(bounds: IntegralPlane, pixel: &Pixel, unit: F) -> Option<T>
where
    F: Fn(&Pixel) -> T,
{
    if pixel.0 >= bounds.0 || pixel.1 >= bounds.1 {
        return None;
    }
    Some(unit(pixel))
}

/// Holds the tile geometry and the number of workers.  Once built it is
/// never mutated, and one dispatcher can serve any number of passes.
#[derive(Copy, Clone, Debug)]
pub struct Dispatcher {
    tile: (usize, usize),
    threads: usize,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher {
            tile: (DEFAULT_TILE, DEFAULT_TILE),
            threads: num_cpus::get(),
        }
    }
}

impl Dispatcher {
    /// Constructor.  Tiles need a non-zero edge; a thread count of zero
    /// is taken to mean one.
    pub fn new(tile_width: usize, tile_height: usize, threads: usize) -> Result<Dispatcher> {
        if tile_width == 0 || tile_height == 0 {
            return Err(MandelError::InvalidTile(tile_width as u32, tile_height as u32));
        }
        Ok(Dispatcher {
            tile: (tile_width, tile_height),
            threads: threads.max(1),
        })
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Tile width and height.
    pub fn tile(&self) -> (usize, usize) {
        self.tile
    }

    /// The number of tile columns and rows needed to cover an image.
    pub fn tile_counts(&self, width: usize, height: usize) -> (usize, usize) {
        (
            (width + self.tile.0 - 1) / self.tile.0,
            (height + self.tile.1 - 1) / self.tile.1,
        )
    }

    /// The padded grid of work units that covers an image.
    pub fn work_grid(&self, width: usize, height: usize) -> IntegralPlane {
        let (columns, rows) = self.tile_counts(width, height);
        IntegralPlane(columns * self.tile.0, rows * self.tile.1)
    }

    /// Applies `unit` to every pixel of a `width × height` image and
    /// gathers the results into a grid.  `unit` must be pure; pixels
    /// are visited in no particular order.
    pub fn run<T, F>(&self, width: usize, height: usize, unit: F) -> Result<Grid<T>>
    where
        T: Copy + Default + Send,
        F: Fn(&Pixel) -> T + Sync,
    {
        if width == 0 || height == 0 {
            return Err(MandelError::EmptyImage { width, height });
        }
        let (columns, rows) = self.tile_counts(width, height);
        let tiles: TileQueue = Arc::new(Mutex::new(iproduct!(0..rows, 0..columns)));
        let bounds = IntegralPlane(width, height);
        let (tile_width, tile_height) = self.tile;
        let unit = &unit;

        let finished = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Vec<(Pixel, T)>>> = (0..self.threads)
                .map(|worker| {
                    let tiles = tiles.clone();
                    spawner.spawn(move |_| {
                        let mut results: Vec<(Pixel, T)> = vec![];
                        let mut taken = 0;
                        loop {
                            let tile = match tiles.lock() {
                                Ok(mut queue) => queue.next(),
                                Err(_) => None,
                            };
                            match tile {
                                Some((row, column)) => {
                                    taken += 1;
                                    for (y, x) in iproduct!(0..tile_height, 0..tile_width) {
                                        let pixel =
                                            Pixel(column * tile_width + x, row * tile_height + y);
                                        if let Some(value) = guarded(bounds, &pixel, unit) {
                                            results.push((pixel, value));
                                        }
                                    }
                                }
                                None => {
                                    break;
                                }
                            }
                        }
                        debug!("worker {} finished {} tiles", worker, taken);
                        results
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<std::thread::Result<Vec<Vec<(Pixel, T)>>>>()
        })
        .map_err(|_| MandelError::WorkerPanicked)?
        .map_err(|_| MandelError::WorkerPanicked)?;

        let mut grid = Grid::new(width, height);
        for (pixel, value) in finished.into_iter().flatten() {
            grid.set(&pixel, value);
        }
        Ok(grid)
    }

    /// The escape-time count of every pixel.
    pub fn render_iterations(
        &self,
        params: &FractalParams,
        width: usize,
        height: usize,
    ) -> Result<Grid<u32>> {
        params.validate()?;
        let plane = PlaneMapper::new(width, height, params)?;
        let max = params.max_iterations;
        self.run(width, height, |pixel| {
            escape_time(plane.pixel_to_point(pixel), max)
        })
    }

    /// The colored image for one set of parameters.  Invalid parameters
    /// are rejected before any work is dispatched.
    pub fn render(&self, params: &FractalParams, width: usize, height: usize) -> Result<OutputImage> {
        params.validate()?;
        let plane = PlaneMapper::new(width, height, params)?;
        let (columns, rows) = self.tile_counts(width, height);
        info!(
            "rendering {}x{} in {} tiles on {} threads",
            width,
            height,
            columns * rows,
            self.threads
        );
        let start = Instant::now();
        let image = self.run(width, height, |pixel| shade(&plane, pixel))?;
        info!("render finished in {:?}", start.elapsed());
        Ok(image)
    }
}

/// Single-threaded rendering.  Produces exactly the image that
/// `Dispatcher::render` does.
pub fn render_single(params: &FractalParams, width: usize, height: usize) -> Result<OutputImage> {
    params.validate()?;
    let plane = PlaneMapper::new(width, height, params)?;
    let mut image = Grid::new(width, height);
    for row in 0..height {
        for column in 0..width {
            let pixel = Pixel(column, row);
            image.set(&pixel, shade(&plane, &pixel));
        }
    }
    Ok(image)
}
