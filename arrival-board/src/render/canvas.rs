//! 1-bit framebuffer.

use std::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// A monochrome framebuffer the size of the panel.
///
/// `BinaryColor::On` is ink. Pixels drawn outside the canvas are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: Vec<bool>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(size: Size) -> Self {
        Self {
            pixels: vec![false; size.width as usize * size.height as usize],
            width: size.width,
            height: size.height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at `(x, y)` is inked. Out of range reads as blank.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        self.index(Point::new(x as i32, y as i32))
            .is_some_and(|i| self.pixels[i])
    }

    /// Number of inked pixels.
    pub fn ink(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// Inked pixels inside the rows `top..bottom`.
    pub fn ink_in_rows(&self, top: u32, bottom: u32) -> usize {
        let bottom = bottom.min(self.height);
        (top..bottom)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.pixel(x, y))
            .count()
    }

    /// Grayscale copy with ink black on white paper.
    pub fn to_gray_image(&self) -> image::GrayImage {
        image::GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.pixel(x, y) {
                image::Luma([0])
            } else {
                image::Luma([255])
            }
        })
    }

    fn index(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let (x, y) = (p.x as u32, p.y as u32);
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if let Some(i) = self.index(p) {
                self.pixels[i] = color.is_on();
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color.is_on());
        Ok(())
    }
}
