//! Ring geometry per time unit and the render state of the face.

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    pixelcolor::PixelColor,
    primitives::Rectangle,
};

use crate::{border::draw_border, clock::TimeOfDay, error::LayoutError, palette::Palette};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Unit {
    Seconds,
    Minutes,
    Hours,
}

impl Unit {
    /// Drawing order, outermost ring first.
    pub const ALL: [Unit; 3] = [Unit::Seconds, Unit::Minutes, Unit::Hours];

    /// Progress segment shown for `value` of this unit.
    ///
    /// Seconds and minutes count 1..=60 so the ring closes on the last
    /// second or minute. Hours show the 12-hour dial value with no offset,
    /// midnight and noon both closing the ring.
    pub fn segment(self, value: u8) -> u32 {
        match self {
            Unit::Seconds | Unit::Minutes => u32::from(value) + 1,
            Unit::Hours => match value % 12 {
                0 => 12,
                hour => u32::from(hour),
            },
        }
    }
}

/// Placement of one ring inside the face bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Ring {
    /// Inset from every side of the face bounds.
    pub padding: u32,
    pub stroke_width: u32,
    pub total_segments: u32,
}

impl Ring {
    pub const SECONDS: Ring = Ring {
        padding: 0,
        stroke_width: 14,
        total_segments: 60,
    };
    pub const MINUTES: Ring = Ring {
        padding: 20,
        stroke_width: 14,
        total_segments: 60,
    };
    pub const HOURS: Ring = Ring {
        padding: 40,
        stroke_width: 14,
        total_segments: 12,
    };

    /// `bounds` shrunk by the padding on every side.
    pub fn area(&self, bounds: &Rectangle) -> Rectangle {
        let pad = i32::try_from(self.padding).unwrap_or(i32::MAX);
        let inset = self.padding.saturating_mul(2);
        Rectangle::new(
            Point::new(
                bounds.top_left.x.saturating_add(pad),
                bounds.top_left.y.saturating_add(pad),
            ),
            Size::new(
                bounds.size.width.saturating_sub(inset),
                bounds.size.height.saturating_sub(inset),
            ),
        )
    }

    pub fn draw<D>(
        &self,
        target: &mut D,
        bounds: &Rectangle,
        segment: u32,
        color: D::Color,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget + ?Sized,
    {
        draw_border(
            target,
            &self.area(bounds),
            self.stroke_width,
            segment,
            self.total_segments,
            color,
        )
    }
}

/// The three rings of the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Layout {
    pub seconds: Ring,
    pub minutes: Ring,
    pub hours: Ring,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            seconds: Ring::SECONDS,
            minutes: Ring::MINUTES,
            hours: Ring::HOURS,
        }
    }
}

impl Layout {
    pub fn ring(&self, unit: Unit) -> &Ring {
        match unit {
            Unit::Seconds => &self.seconds,
            Unit::Minutes => &self.minutes,
            Unit::Hours => &self.hours,
        }
    }

    /// Checks that every ring leaves room for its stroke on both sides.
    ///
    /// Rendering does not depend on this; a failing layout still draws,
    /// just not as a closed set of rings.
    pub fn validate(&self, bounds: &Rectangle) -> Result<(), LayoutError> {
        for unit in Unit::ALL {
            let ring = self.ring(unit);
            let area = ring.area(bounds);
            let double_stroke = ring.stroke_width.saturating_mul(2);
            if area.size.width <= double_stroke || area.size.height <= double_stroke {
                return Err(LayoutError::RingTooSmall {
                    unit,
                    width: area.size.width,
                    height: area.size.height,
                    stroke_width: ring.stroke_width,
                });
            }
        }
        Ok(())
    }

    /// Draws the ring of `unit` showing `value` (a second, minute or hour).
    pub fn draw_unit<D>(
        &self,
        unit: Unit,
        target: &mut D,
        bounds: &Rectangle,
        value: u8,
        color: D::Color,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget + ?Sized,
    {
        self.ring(unit)
            .draw(target, bounds, unit.segment(value), color)
    }

    pub fn draw_seconds<D>(
        &self,
        target: &mut D,
        bounds: &Rectangle,
        seconds: u8,
        color: D::Color,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget + ?Sized,
    {
        self.draw_unit(Unit::Seconds, target, bounds, seconds, color)
    }

    pub fn draw_minutes<D>(
        &self,
        target: &mut D,
        bounds: &Rectangle,
        minutes: u8,
        color: D::Color,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget + ?Sized,
    {
        self.draw_unit(Unit::Minutes, target, bounds, minutes, color)
    }

    pub fn draw_hours<D>(
        &self,
        target: &mut D,
        bounds: &Rectangle,
        hours: u8,
        color: D::Color,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget + ?Sized,
    {
        self.draw_unit(Unit::Hours, target, bounds, hours, color)
    }
}

/// Everything needed to draw a frame: layout, colors and the last time seen.
///
/// The owner of the display surface keeps one of these for as long as the
/// surface lives, feeds it with [`on_tick`](Self::on_tick) and draws it with
/// [`render`](Self::render).
pub struct WatchFace<C> {
    layout: Layout,
    palette: Palette<C>,
    background: C,
    time: TimeOfDay,
}

impl<C: PixelColor> WatchFace<C> {
    pub fn new(palette: Palette<C>, background: C) -> Self {
        Self {
            layout: Layout::default(),
            palette,
            background,
            time: TimeOfDay::default(),
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn palette(&self) -> &Palette<C> {
        &self.palette
    }

    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    /// Stores the current wall-clock time. Returns true if the face needs a
    /// redraw.
    pub fn on_tick(&mut self, hour: u8, minute: u8, second: u8) -> bool {
        let time = TimeOfDay {
            hour,
            minute,
            second,
        };
        if time == self.time {
            return false;
        }
        trace!("tick {=u8}:{=u8}:{=u8}", hour, minute, second);
        self.time = time;
        true
    }

    /// Clears `target` and draws the seconds, minutes and hours rings.
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let bounds = target.bounding_box();
        target.clear(self.background)?;

        let TimeOfDay {
            hour,
            minute,
            second,
        } = self.time;
        self.layout
            .draw_seconds(target, &bounds, second, self.palette.seconds)?;
        self.layout
            .draw_minutes(target, &bounds, minute, self.palette.minutes)?;
        self.layout
            .draw_hours(target, &bounds, hour, self.palette.hours)
    }
}
