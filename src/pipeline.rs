// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Ties a generation pass to the display pass.  Each call to
//! `generate` builds a whole new image; `present` only ever sees an
//! image whose pass has completed.

use crate::display::{DisplayPass, Frame};
use crate::dispatch::Dispatcher;
use crate::errors::Result;
use crate::grid::OutputImage;
use crate::params::FractalParams;

/// Holds the most recently completed image.
#[derive(Debug, Default)]
pub struct Pipeline {
    dispatcher: Dispatcher,
    display: DisplayPass,
    current: Option<OutputImage>,
}

impl Pipeline {
    /// Constructor.
    pub fn new(dispatcher: Dispatcher, display: DisplayPass) -> Pipeline {
        Pipeline {
            dispatcher,
            display,
            current: None,
        }
    }

    /// Runs a full generation pass.  On error nothing is replaced and
    /// the previous image, if any, remains current.
    pub fn generate(
        &mut self,
        params: &FractalParams,
        width: usize,
        height: usize,
    ) -> Result<&OutputImage> {
        let image = self.dispatcher.render(params, width, height)?;
        Ok(&*self.current.insert(image))
    }

    /// The most recently completed image.
    pub fn current(&self) -> Option<&OutputImage> {
        self.current.as_ref()
    }

    /// Draws the current image onto a `width × height` surface.  Returns
    /// None before the first successful pass.
    pub fn present(&self, width: usize, height: usize) -> Option<Result<Frame>> {
        self.current
            .as_ref()
            .map(|image| self.display.present(image, width, height))
    }
}
