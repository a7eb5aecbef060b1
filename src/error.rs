use crate::display::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum LayoutError {
    /// The padded area of a ring cannot hold two strokes side by side.
    #[error("{unit:?} ring area is {width}x{height}, too small for a {stroke_width}px stroke")]
    RingTooSmall {
        unit: Unit,
        width: u32,
        height: u32,
        stroke_width: u32,
    },
}
