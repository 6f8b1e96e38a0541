use crate::color::RGBA;

/// Rendered image, four channels per pixel.
///
/// Stored channel-major as `(4, rows, cols)`, `rows` is the horizontal pixel count.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Image {
    /// Image with every pixel set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: RGBA) -> Image {
        let plane = rows * cols;
        let mut data = Vec::with_capacity(4 * plane);
        for channel in 0..4 {
            data.extend(std::iter::repeat(fill[channel]).take(plane));
        }
        Image { rows, cols, data }
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<RGBA> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let plane = self.rows * self.cols;
        let off = self.offset(row, col);
        Some(RGBA::new(
            self.data[off],
            self.data[plane + off],
            self.data[2 * plane + off],
            self.data[3 * plane + off],
        ))
    }

    /// Write pixel `(row, col)`, out of range pixels are ignored.
    pub fn set(&mut self, row: usize, col: usize, rgba: RGBA) {
        if row >= self.rows || col >= self.cols {
            log::warn!(
                "Pixel ({row}, {col}) outside of {}x{} image",
                self.rows,
                self.cols
            );
            return;
        }
        let plane = self.rows * self.cols;
        let off = self.offset(row, col);
        for channel in 0..4 {
            self.data[channel * plane + off] = rgba[channel];
        }
    }

    /// `(rows, cols)`
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Raw channel-major samples.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// 8-bit RGBA in scanline order, top line first.
    ///
    /// Channels are clamped to `[0, 1]` before conversion.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                if let Some(px) = self.get(row, col) {
                    out.extend(px.iter().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::color;

    #[test]
    fn filled() {
        let img = Image::new(3, 2, color::new(0.1, 0.2, 0.3, 0.4));
        assert_eq!(img.dims(), (3, 2));
        assert_eq!(img.as_slice().len(), 24);
        assert_eq!(img.get(2, 1), Some(color::new(0.1, 0.2, 0.3, 0.4)));
        assert_eq!(img.get(3, 0), None);
        assert_eq!(img.get(0, 2), None);
    }

    #[test]
    fn channel_major_layout() {
        let mut img = Image::new(2, 3, color::zero());
        img.set(1, 2, color::new(1.0, 2.0, 3.0, 4.0));

        let data = img.as_slice();
        // 6 pixels per channel plane, pixel (1, 2) at offset 5
        assert_eq!(data[5], 1.0);
        assert_eq!(data[11], 2.0);
        assert_eq!(data[17], 3.0);
        assert_eq!(data[23], 4.0);
        assert_eq!(data.iter().filter(|&&v| v != 0.0).count(), 4);
    }

    #[test]
    fn set_out_of_range_ignored() {
        let mut img = Image::new(2, 2, color::zero());
        img.set(2, 0, color::mono(1.0, 1.0));
        assert!(img.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn rgba8_scanlines() {
        let mut img = Image::new(2, 2, color::zero());
        img.set(1, 0, color::new(2.0, -1.0, 0.5, 1.0));
        img.set(0, 1, color::mono(1.0, 1.0));

        let bytes = img.to_rgba8();
        assert_eq!(bytes.len(), 16);
        // first scanline: (0, 0), (1, 0)
        assert_eq!(&bytes[0..4], &[0, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[255, 0, 128, 255]);
        // second scanline starts with (0, 1)
        assert_eq!(&bytes[8..12], &[255, 255, 255, 255]);
    }
}
