//! Classification of samples.

use crate::{
    color::RGBA,
    common::ValueRange,
    error::{RenderError, Result},
};

/// Lookup table mapping sample values to colour and opacity.
///
/// Table entries split `domain` into equally wide bins.
#[derive(Debug, Clone)]
pub struct TransferFunction {
    table: Vec<RGBA>,
    domain: ValueRange,
    /// Step length the table opacities were designed for
    unit_step: f32,
    /// Ray terminates once accumulated opacity exceeds this value
    alpha_near_one: f32,
}

impl TransferFunction {
    pub fn new(
        table: Vec<RGBA>,
        domain: impl Into<ValueRange>,
        unit_step: f32,
        alpha_near_one: f32,
    ) -> Result<TransferFunction> {
        if table.is_empty() {
            return Err(RenderError::EmptyTransferFunction);
        }

        let domain = domain.into();
        if !domain.is_valid() {
            return Err(RenderError::InvalidDomain {
                low: domain.low,
                high: domain.high,
            });
        }

        if !(unit_step.is_finite() && unit_step > 0.0) {
            return Err(RenderError::InvalidParameter(format!(
                "unit step must be positive, got {unit_step}"
            )));
        }

        Ok(TransferFunction {
            table,
            domain,
            unit_step,
            alpha_near_one,
        })
    }

    /// Tabulate `tf` at the centres of `bins` bins spanning `domain`.
    pub fn from_fn<F>(
        bins: usize,
        domain: impl Into<ValueRange>,
        unit_step: f32,
        alpha_near_one: f32,
        tf: F,
    ) -> Result<TransferFunction>
    where
        F: Fn(f32) -> RGBA,
    {
        let domain = domain.into();
        let bin_width = domain.width() / bins as f32;
        let table = (0..bins)
            .map(|i| tf(domain.low + (i as f32 + 0.5) * bin_width))
            .collect();
        TransferFunction::new(table, domain, unit_step, alpha_near_one)
    }

    /// Index of the table entry for `value`.
    pub fn quantize(&self, value: f32) -> usize {
        let len = self.table.len();
        if value <= self.domain.low {
            return 0;
        }
        if value >= self.domain.high {
            return len - 1;
        }
        let bin_width = self.domain.width() / len as f32;
        let index = ((value - self.domain.low) / bin_width).floor() as usize;
        // rounding can land exactly on len
        index.min(len - 1)
    }

    /// Colour and raw opacity for `value`.
    pub fn lookup(&self, value: f32) -> RGBA {
        self.table[self.quantize(value)]
    }

    /// Opacity adjusted for marching with steps of `step_len` instead of `unit_step`.
    ///
    /// Input and result are clamped to `[0, 1]`.
    pub fn correct_opacity(&self, opacity: f32, step_len: f32) -> f32 {
        let clamped = opacity.clamp(0.0, 1.0);
        let corrected = 1.0 - (1.0 - clamped).powf(step_len / self.unit_step);
        corrected.clamp(0.0, 1.0)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn domain(&self) -> ValueRange {
        self.domain
    }

    pub fn unit_step(&self) -> f32 {
        self.unit_step
    }

    pub fn alpha_near_one(&self) -> f32 {
        self.alpha_near_one
    }
}
