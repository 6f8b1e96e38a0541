use std::time::Instant;

use crate::error::{RenderError, Result};

use super::{scheduler, Image, RenderContext};

/// Renders whole images from a [`RenderContext`].
pub struct Renderer<'a> {
    ctx: RenderContext<'a>,
}

impl<'a> Renderer<'a> {
    pub fn new(ctx: RenderContext<'a>) -> Renderer<'a> {
        Renderer { ctx }
    }

    pub fn context(&self) -> &RenderContext<'a> {
        &self.ctx
    }

    /// Render into a new image sized after the camera.
    pub fn render(&self) -> Result<Image> {
        let (rows, cols) = self.ctx.camera.pixel_dims();
        let mut image = Image::new(rows, cols, self.ctx.outside_val);
        self.render_into(&mut image)?;
        Ok(image)
    }

    /// Render into `image`, which must match the camera's pixel dimensions.
    ///
    /// Every pixel is overwritten.
    pub fn render_into(&self, image: &mut Image) -> Result<()> {
        let dims = self.ctx.camera.pixel_dims();
        if image.dims() != dims {
            return Err(RenderError::InvalidParameter(format!(
                "image is {:?}, camera expects {:?}",
                image.dims(),
                dims
            )));
        }

        let start = Instant::now();
        let threads = self.ctx.num_threads;
        if threads == 0 {
            scheduler::render_serial(&self.ctx, image);
        } else {
            scheduler::render_parallel(&self.ctx, image, threads)?;
        }

        log::info!(
            "Rendered {}x{} image on {} thread(s) in {:?}",
            dims.0,
            dims.1,
            threads.max(1),
            start.elapsed()
        );
        Ok(())
    }
}

#[cfg(test)]
mod test {

    use nalgebra::point;

    use super::*;
    use crate::{
        camera::Projection,
        color,
        kernel::CubicBSpline,
        light::{LightParams, LightSet},
        render::RenderOptions,
        test_helpers,
    };

    #[test]
    fn wrong_image_size() {
        let camera = test_helpers::axis_camera(point![1.5, 1.5, 1.5], (4, 4), Projection::Orthographic);
        let volume = test_helpers::uniform_volume(4, 5.0);
        let tf = test_helpers::red_tf(1.0);
        let lights = LightSet::new(vec![], LightParams::ambient_only());
        let options = RenderOptions::builder().build().unwrap();
        let ctx = RenderContext::new(&camera, &volume, &CubicBSpline, &tf, &lights, &options).unwrap();

        let renderer = Renderer::new(ctx);
        let mut image = Image::new(3, 4, color::zero());
        assert!(matches!(
            renderer.render_into(&mut image),
            Err(RenderError::InvalidParameter(_))
        ));

        let image = renderer.render().unwrap();
        assert_eq!(image.dims(), (4, 4));
    }
}
