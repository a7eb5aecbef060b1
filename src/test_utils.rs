//! Draw targets for checking renderers on the host.

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::PixelColor, prelude::*, primitives::Rectangle};

/// Keeps every `fill_solid` call instead of drawing it.
pub struct Recorder<C> {
    size: Size,
    fills: Vec<(Rectangle, C)>,
}

impl<C: PixelColor> Recorder<C> {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            fills: Vec::new(),
        }
    }

    pub fn rects(&self) -> Vec<Rectangle> {
        self.fills.iter().map(|(rect, _)| *rect).collect()
    }
}

impl<C> OriginDimensions for Recorder<C> {
    fn size(&self) -> Size {
        self.size
    }
}

impl<C: PixelColor> DrawTarget for Recorder<C> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.fills.push((*area, color));
        Ok(())
    }
}

/// Plain framebuffer; pixels outside the canvas are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas<C> {
    size: Size,
    pixels: Vec<C>,
}

impl<C: PixelColor> Canvas<C> {
    pub fn new(size: Size, background: C) -> Self {
        Self {
            size,
            pixels: vec![background; (size.width * size.height) as usize],
        }
    }

    pub fn pixel(&self, point: Point) -> C {
        self.pixels[self.index(point).expect("point outside canvas")]
    }

    pub fn count(&self, color: C) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    fn index(&self, point: Point) -> Option<usize> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        (x < self.size.width && y < self.size.height).then(|| (y * self.size.width + x) as usize)
    }
}

impl<C> OriginDimensions for Canvas<C> {
    fn size(&self) -> Size {
        self.size
    }
}

impl<C: PixelColor> DrawTarget for Canvas<C> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(index) = self.index(point) {
                self.pixels[index] = color;
            }
        }
        Ok(())
    }
}

/// Whether `point` lies on the full outline of `area` with the given stroke.
pub fn outline_contains(area: &Rectangle, stroke_width: u32, point: Point) -> bool {
    if !area.contains(point) {
        return false;
    }
    let sw = stroke_width as i32;
    let x = point.x - area.top_left.x;
    let y = point.y - area.top_left.y;
    let w = area.size.width as i32;
    let h = area.size.height as i32;
    x < sw || y < sw || x >= w - sw || y >= h - sw
}
