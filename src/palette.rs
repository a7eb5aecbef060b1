use embedded_graphics::pixelcolor::{BinaryColor, PixelColor, Rgb565, Rgb888};

use crate::display::Unit;

pub const RICH_BRILLIANT_LAVENDER: Rgb888 = Rgb888::new(0xFF, 0xAA, 0xFF);
pub const VIVID_VIOLET: Rgb888 = Rgb888::new(0xAA, 0x00, 0xFF);
pub const BLUE_MOON: Rgb888 = Rgb888::new(0x00, 0x55, 0xFF);

/// Ring colors, one per time unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette<C> {
    pub seconds: C,
    pub minutes: C,
    pub hours: C,
}

impl<C: PixelColor> Palette<C> {
    pub const fn new(seconds: C, minutes: C, hours: C) -> Self {
        Self {
            seconds,
            minutes,
            hours,
        }
    }

    pub fn color(&self, unit: Unit) -> C {
        match unit {
            Unit::Seconds => self.seconds,
            Unit::Minutes => self.minutes,
            Unit::Hours => self.hours,
        }
    }

    pub fn map<D, F>(self, f: F) -> Palette<D>
    where
        D: PixelColor,
        F: Fn(C) -> D,
    {
        Palette::new(f(self.seconds), f(self.minutes), f(self.hours))
    }
}

impl Default for Palette<Rgb888> {
    fn default() -> Self {
        Self::new(RICH_BRILLIANT_LAVENDER, VIVID_VIOLET, BLUE_MOON)
    }
}

impl Default for Palette<Rgb565> {
    fn default() -> Self {
        Palette::<Rgb888>::default().map(Rgb565::from)
    }
}

/// Monochrome panels draw every ring in the foreground color.
impl Default for Palette<BinaryColor> {
    fn default() -> Self {
        Self::new(BinaryColor::On, BinaryColor::On, BinaryColor::On)
    }
}
