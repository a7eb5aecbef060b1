//! Partial rectangular outlines.
//!
//! A border is traced clockwise starting at the middle of the top edge. The
//! traced length is `segment / total_segments` of the outline, with the four
//! corner squares counted once.

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    primitives::Rectangle,
};

/// Traceable outline of a rectangle for a given stroke width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Perimeter {
    /// Outline length, `2(w + h) - 4·stroke`.
    pub max: i64,
    /// Distance from the start point to the top-right, bottom-right,
    /// bottom-left and top-left corners.
    pub corners: [i64; 4],
}

impl Perimeter {
    pub fn new(size: Size, stroke_width: u32) -> Self {
        let w = i64::from(size.width);
        let h = i64::from(size.height);
        let sw = i64::from(stroke_width);

        let c1 = w / 2;
        let c2 = c1 + h - sw;
        let c3 = c2 + w - sw;
        let c4 = c3 + h - sw;

        Self {
            max: 2 * (w + h) - 4 * sw,
            corners: [c1, c2, c3, c4],
        }
    }

    /// Traced length for `segment` of `total_segments`, always in `0..=max`.
    ///
    /// The fraction is truncated, so a total that does not divide `max`
    /// gives slightly quantized steps.
    pub fn position(&self, segment: u32, total_segments: u32) -> i64 {
        if total_segments == 0 {
            return 0;
        }
        let max = self.max.max(0);
        let pos = i128::from(segment) * i128::from(max) / i128::from(total_segments);
        // Clamped into `0..=max`, so the narrowing cannot fail.
        i64::try_from(pos.min(i128::from(max))).unwrap_or(max)
    }
}

/// Fills the first `segment / total_segments` of the outline of `area`.
///
/// Completed sides are filled whole before the side currently being traced,
/// so the pixels covered for a given segment do not depend on what was drawn
/// before. Geometry where the stroke does not fit inside `area` draws
/// garbage but never panics.
pub fn draw_border<D>(
    target: &mut D,
    area: &Rectangle,
    stroke_width: u32,
    segment: u32,
    total_segments: u32,
    color: D::Color,
) -> Result<(), D::Error>
where
    D: DrawTarget + ?Sized,
{
    let perimeter = Perimeter::new(area.size, stroke_width);
    let [c1, c2, c3, c4] = perimeter.corners;
    let pos = perimeter.position(segment, total_segments);

    let w = i64::from(area.size.width);
    let h = i64::from(area.size.height);
    let sw = i64::from(stroke_width);
    let half = w / 2;

    let mut fill = |dx: i64, dy: i64, width: i64, height: i64| -> Result<(), D::Error> {
        match span(area, dx, dy, width, height) {
            Some(rect) => target.fill_solid(&rect, color),
            None => Ok(()),
        }
    };

    // Completed sides
    if pos > c1 {
        fill(half, 0, half, sw)?;
    }
    if pos > c2 {
        fill(w - sw, sw, sw, h - sw)?;
    }
    if pos > c3 {
        fill(0, h - sw, w - sw, sw)?;
    }
    if pos > c4 {
        fill(0, 0, sw, h - sw)?;
    }

    // Side being traced
    if pos >= c4 {
        // top-left to top-middle
        fill(sw, 0, pos - c4, sw)
    } else if pos <= c1 {
        // top-middle to top-right
        fill(half, 0, pos, sw)
    } else if pos <= c2 {
        // top-right to bottom-right
        fill(w - sw, sw, sw, pos - c1)
    } else if pos <= c3 {
        // bottom-right to bottom-left
        fill(w - sw - (pos - c2), h - sw, pos - c2, sw)
    } else {
        // bottom-left to top-left
        fill(0, h - sw - (pos - c3), sw, pos - c3)
    }
}

/// Rectangle at offset (`dx`, `dy`) from the top-left of `area`, or `None`
/// when it has no area or does not fit the coordinate space.
fn span(area: &Rectangle, dx: i64, dy: i64, width: i64, height: i64) -> Option<Rectangle> {
    if width <= 0 || height <= 0 {
        return None;
    }
    let x = i32::try_from(i64::from(area.top_left.x) + dx).ok()?;
    let y = i32::try_from(i64::from(area.top_left.y) + dy).ok()?;
    let size = Size::new(u32::try_from(width).ok()?, u32::try_from(height).ok()?);
    Some(Rectangle::new(Point::new(x, y), size))
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

    use super::*;
    use crate::test_utils::{outline_contains, Canvas, Recorder};

    const SQUARE: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(180, 180));
    const WATCH: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(144, 168));

    fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn perimeter_of_square() {
        let perimeter = Perimeter::new(SQUARE.size, 14);
        assert_eq!(perimeter.max, 664);
        assert_eq!(perimeter.corners, [90, 256, 422, 588]);
        assert_eq!(perimeter.position(30, 60), 332);
        assert_eq!(perimeter.position(60, 60), 664);
        assert_eq!(perimeter.position(0, 60), 0);
    }

    #[test]
    fn position_stays_on_perimeter() {
        for width in [30, 57, 144, 180] {
            for height in [30, 88, 168] {
                for stroke_width in [1, 7, 14] {
                    let perimeter = Perimeter::new(Size::new(width, height), stroke_width);
                    for total in [1, 7, 12, 60] {
                        for segment in 0..=total + 5 {
                            let pos = perimeter.position(segment, total);
                            assert!(
                                (0..=perimeter.max).contains(&pos),
                                "{width}x{height} sw={stroke_width} {segment}/{total} -> {pos}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn position_of_huge_outline_is_clamped() {
        let perimeter = Perimeter::new(Size::new(u32::MAX, u32::MAX), 0);
        assert_eq!(perimeter.max, 4 * i64::from(u32::MAX));
        assert_eq!(perimeter.position(u32::MAX, 1), perimeter.max);
        assert_eq!(perimeter.position(u32::MAX, u32::MAX), perimeter.max);
        assert_eq!(perimeter.position(1, u32::MAX), 4);
    }

    #[test]
    fn huge_geometry_draws_without_panicking() {
        let huge = Rectangle::new(Point::new(i32::MAX, i32::MIN), Size::new(u32::MAX, u32::MAX));
        let mut recorder = Recorder::new(Size::new(64, 64));
        for (stroke_width, segment, total) in [
            (0, u32::MAX, 1),
            (u32::MAX, u32::MAX, u32::MAX),
            (14, u32::MAX / 2, u32::MAX),
            (u32::MAX, 1, 2),
        ] {
            draw_border(&mut recorder, &huge, stroke_width, segment, total, BinaryColor::On)
                .unwrap();
        }
    }

    #[test]
    fn position_truncates() {
        // 31 * 408 / 60 = 210.8
        let perimeter = Perimeter::new(Size::new(104, 128), 14);
        assert_eq!(perimeter.max, 408);
        assert_eq!(perimeter.position(31, 60), 210);
    }

    #[test]
    fn half_way_round_square() {
        let mut recorder = Recorder::new(SQUARE.size);
        draw_border(&mut recorder, &SQUARE, 14, 30, 60, BinaryColor::On).unwrap();

        assert_eq!(
            recorder.rects(),
            vec![
                rect(90, 0, 90, 14),
                rect(166, 14, 14, 166),
                rect(90, 166, 76, 14),
            ]
        );
    }

    #[test]
    fn zero_segment_fills_nothing() {
        let mut recorder = Recorder::new(SQUARE.size);
        draw_border(&mut recorder, &SQUARE, 14, 0, 60, BinaryColor::On).unwrap();
        assert!(recorder.rects().is_empty());
    }

    #[test]
    fn zero_total_fills_nothing() {
        let mut recorder = Recorder::new(SQUARE.size);
        draw_border(&mut recorder, &SQUARE, 14, 5, 0, BinaryColor::On).unwrap();
        assert!(recorder.rects().is_empty());
    }

    #[test]
    fn full_segment_closes_outline() {
        for (area, canvas_size) in [
            (SQUARE, SQUARE.size),
            (WATCH, WATCH.size),
            (rect(10, 6, 124, 148), Size::new(144, 168)),
        ] {
            let mut canvas = Canvas::new(canvas_size, BinaryColor::Off);
            draw_border(&mut canvas, &area, 14, 12, 12, BinaryColor::On).unwrap();

            for point in canvas.bounding_box().points() {
                let expected = if outline_contains(&area, 14, point) {
                    BinaryColor::On
                } else {
                    BinaryColor::Off
                };
                assert_eq!(canvas.pixel(point), expected, "{area:?} at {point:?}");
            }
        }
    }

    #[test]
    fn first_segment_starts_at_top_middle() {
        let mut recorder = Recorder::new(WATCH.size);
        draw_border(&mut recorder, &WATCH, 14, 1, 60, BinaryColor::On).unwrap();
        // (2 * 312 - 56) / 60 = 9
        assert_eq!(recorder.rects(), vec![rect(72, 0, 9, 14)]);
    }

    #[test]
    fn last_side_runs_back_to_top_middle() {
        let mut recorder = Recorder::new(WATCH.size);
        draw_border(&mut recorder, &WATCH, 14, 59, 60, BinaryColor::On).unwrap();

        let perimeter = Perimeter::new(WATCH.size, 14);
        let pos = perimeter.position(59, 60);
        assert!(pos > perimeter.corners[3]);
        let rects = recorder.rects();
        assert_eq!(rects.len(), 5);
        assert_eq!(
            rects[4],
            rect(14, 0, (pos - perimeter.corners[3]) as u32, 14)
        );
    }

    #[test]
    fn fill_is_monotonic() {
        for total in [12, 60] {
            let mut accumulated = Canvas::new(WATCH.size, BinaryColor::Off);
            for segment in 0..=total {
                draw_border(&mut accumulated, &WATCH, 14, segment, total, BinaryColor::On).unwrap();

                let mut single = Canvas::new(WATCH.size, BinaryColor::Off);
                draw_border(&mut single, &WATCH, 14, segment, total, BinaryColor::On).unwrap();

                assert_eq!(single, accumulated, "segment {segment} of {total}");
            }
        }
    }

    #[test]
    fn offset_area_is_translated() {
        let mut at_origin = Recorder::new(Size::new(200, 200));
        let mut shifted = Recorder::new(Size::new(200, 200));
        let moved = SQUARE.translate(Point::new(7, 11));

        draw_border(&mut at_origin, &SQUARE, 14, 45, 60, BinaryColor::On).unwrap();
        draw_border(&mut shifted, &moved, 14, 45, 60, BinaryColor::On).unwrap();

        let expected: Vec<_> = at_origin
            .rects()
            .into_iter()
            .map(|r| r.translate(Point::new(7, 11)))
            .collect();
        assert_eq!(shifted.rects(), expected);
    }

    #[test]
    fn malformed_geometry_does_not_panic() {
        let mut canvas = Canvas::new(Size::new(40, 40), BinaryColor::Off);
        for area in [rect(0, 0, 20, 20), rect(0, 0, 0, 0), rect(5, 5, 1, 30)] {
            for segment in 0..=61 {
                draw_border(&mut canvas, &area, 14, segment, 60, BinaryColor::On).unwrap();
            }
        }
    }
}
