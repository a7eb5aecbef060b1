//! Progress-border watchface.
//!
//! Three nested rectangular rings trace the seconds, minutes and hours
//! clockwise from the middle of their top edge. Drawing goes through the
//! `embedded-graphics` [`DrawTarget`](embedded_graphics::draw_target::DrawTarget)
//! trait, so the same code runs on the panel and in host tests.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod border;
pub mod clock;
pub mod display;
pub mod error;
pub mod palette;

#[cfg(test)]
mod test_utils;

pub use border::{draw_border, Perimeter};
pub use clock::{ClockState, TimeOfDay};
pub use display::{Layout, Ring, Unit, WatchFace};
pub use error::LayoutError;
pub use palette::Palette;
