use crate::{
    color::{self, RGBA},
    error::{RenderError, Result},
};

/// Parameters of the march itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Distance between samples along the viewing axis
    pub plane_sep: f32,
    /// Pixel value when no sample of the ray hit the volume
    pub outside_val: RGBA,
    /// Number of worker threads, 0 renders on the calling thread
    pub num_threads: usize,
}

impl RenderOptions {
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::default()
    }
}

/// Builder of [`RenderOptions`].
#[derive(Debug, Default)]
pub struct RenderOptionsBuilder {
    plane_sep: Option<f32>,
    outside_val: Option<RGBA>,
    num_threads: Option<usize>,
}

impl RenderOptionsBuilder {
    pub fn plane_sep(mut self, plane_sep: f32) -> Self {
        self.plane_sep = Some(plane_sep);
        self
    }

    pub fn outside_val(mut self, outside_val: RGBA) -> Self {
        self.outside_val = Some(outside_val);
        self
    }

    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Validate and build.
    /// Step defaults to 1, fill value to transparent black, single thread.
    pub fn build(self) -> Result<RenderOptions> {
        let options = self.build_unchecked();
        if !(options.plane_sep.is_finite() && options.plane_sep > 0.0) {
            return Err(RenderError::InvalidParameter(format!(
                "plane separation must be positive, got {}",
                options.plane_sep
            )));
        }
        Ok(options)
    }

    /// Build without validation.
    pub fn build_unchecked(self) -> RenderOptions {
        RenderOptions {
            plane_sep: self.plane_sep.unwrap_or(1.0),
            outside_val: self.outside_val.unwrap_or_else(color::zero),
            num_threads: self.num_threads.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn defaults() {
        let options = RenderOptions::builder().build().unwrap();
        assert_eq!(options.plane_sep, 1.0);
        assert_eq!(options.outside_val, color::zero());
        assert_eq!(options.num_threads, 0);
    }

    #[test]
    fn rejects_bad_step() {
        for step in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let res = RenderOptions::builder().plane_sep(step).build();
            assert!(matches!(res, Err(RenderError::InvalidParameter(_))));
        }
    }

    #[test]
    fn unchecked_keeps_values() {
        let options = RenderOptions::builder()
            .plane_sep(-2.0)
            .num_threads(3)
            .build_unchecked();
        assert_eq!(options.plane_sep, -2.0);
        assert_eq!(options.num_threads, 3);
    }
}
