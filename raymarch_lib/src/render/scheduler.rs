//! Distribution of pixels among rays.

use crossbeam::channel;
use parking_lot::Mutex;

use crate::{color::RGBA, error::Result, volumetric::Convolution};

use super::{Image, RayMarcher, RenderContext};

/// Walks over all pixels exactly once.
///
/// Row index moves fastest, when it reaches the end it wraps to 0 and the
/// column index advances.
#[derive(Debug, Clone)]
pub struct PixelCursor {
    rows: usize,
    cols: usize,
    row: usize,
    col: usize,
}

impl PixelCursor {
    pub fn new(rows: usize, cols: usize) -> PixelCursor {
        PixelCursor {
            rows,
            cols,
            row: 0,
            col: 0,
        }
    }

    /// Pixels not handed out yet.
    pub fn remaining(&self) -> usize {
        if self.rows == 0 || self.col >= self.cols {
            return 0;
        }
        (self.cols - self.col) * self.rows - self.row
    }
}

impl Iterator for PixelCursor {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.rows == 0 || self.col >= self.cols {
            return None;
        }
        let pixel = (self.row, self.col);
        self.row += 1;
        if self.row == self.rows {
            self.row = 0;
            self.col += 1;
        }
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

/// Render every pixel on the calling thread.
pub fn render_serial(ctx: &RenderContext, image: &mut Image) {
    let (rows, cols) = image.dims();
    let mut ray = RayMarcher::new();
    let mut convolution = Convolution::new(ctx.kernel);

    for (row, col) in PixelCursor::new(rows, cols) {
        let rgba = ray.go(row, col, &mut convolution, ctx);
        image.set(row, col, rgba);
    }
}

/// Render with `threads` workers pulling pixels from a shared cursor.
///
/// Workers send finished pixels back over a channel, only the calling thread
/// writes into `image`. A panic in a worker is resumed on the calling thread.
pub fn render_parallel(ctx: &RenderContext, image: &mut Image, threads: usize) -> Result<()> {
    let (rows, cols) = image.dims();
    let cursor = Mutex::new(PixelCursor::new(rows, cols));

    // Scope assures workers are joined before returning
    let outcome = crossbeam::scope(|s| -> Result<()> {
        let (sender, receiver) = channel::unbounded::<(usize, usize, RGBA)>();

        for id in 0..threads {
            let sender = sender.clone();
            let cursor = &cursor;
            let ctx = *ctx;

            s.builder()
                .name(format!("Ren{id}"))
                .spawn(move |_| {
                    log::debug!("Renderer {id} started");

                    let mut ray = RayMarcher::new();
                    let mut convolution = Convolution::new(ctx.kernel);
                    let mut rendered = 0_usize;
                    loop {
                        // lock is released before the ray is marched
                        let next = cursor.lock().next();
                        let (row, col) = match next {
                            Some(pixel) => pixel,
                            None => break,
                        };

                        let rgba = ray.go(row, col, &mut convolution, &ctx);
                        if sender.send((row, col, rgba)).is_err() {
                            // collector is gone, nobody wants the rest
                            break;
                        }
                        rendered += 1;
                    }

                    log::debug!("Renderer {id} done, {rendered} pixels");
                })?;
        }
        drop(sender);

        for (row, col, rgba) in receiver {
            image.set(row, col, rgba);
        }
        Ok(())
    });

    match outcome {
        Ok(res) => res,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
