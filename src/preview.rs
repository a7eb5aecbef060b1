//! Terminal preview of the face for machines without a panel attached.

use core::convert::Infallible;

use border_watch::{Palette, WatchFace};
use chrono::{NaiveTime, Timelike};
use clap::Parser;
use embedded_graphics::{
    pixelcolor::{raw::RawU8, PixelColor},
    prelude::*,
};

/// Longest face side the preview accepts.
const MAX_SIDE: u32 = 4096;

/// Print one frame of the border watchface as text
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Time to show as HH:MM:SS [default: local time]
    #[arg(value_parser = parse_time)]
    time: Option<NaiveTime>,

    /// Face width in pixels
    #[arg(long, default_value_t = 144, value_parser = clap::value_parser!(u32).range(1..=MAX_SIDE as i64))]
    width: u32,

    /// Face height in pixels
    #[arg(long, default_value_t = 168, value_parser = clap::value_parser!(u32).range(1..=MAX_SIDE as i64))]
    height: u32,

    /// Pixels per character column; rows cover twice as many
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,
}

fn parse_time(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
}

/// A pixel is the character printed for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyph(char);

impl PixelColor for Glyph {
    type Raw = RawU8;
}

const BACKGROUND: Glyph = Glyph('.');
const PALETTE: Palette<Glyph> = Palette::new(Glyph('#'), Glyph('='), Glyph('+'));

struct TextCanvas {
    size: Size,
    cells: Vec<Glyph>,
}

impl TextCanvas {
    fn new(size: Size) -> Self {
        Self {
            size,
            cells: vec![BACKGROUND; size.width as usize * size.height as usize],
        }
    }

    fn lines(&self, scale: u32) -> impl Iterator<Item = String> + '_ {
        let width = self.size.width as usize;
        self.cells
            .chunks(width)
            .step_by(2 * scale as usize)
            .map(move |row| row.iter().step_by(scale as usize).map(|g| g.0).collect())
    }
}

impl OriginDimensions for TextCanvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for TextCanvas {
    type Color = Glyph;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, glyph) in pixels {
            if let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) {
                if x < self.size.width && y < self.size.height {
                    self.cells[y as usize * self.size.width as usize + x as usize] = glyph;
                }
            }
        }
        Ok(())
    }
}

pub fn run() {
    let args = Args::parse();
    let time = args.time.unwrap_or_else(|| chrono::Local::now().time());

    let mut canvas = TextCanvas::new(Size::new(args.width, args.height));
    let mut face = WatchFace::new(PALETTE, BACKGROUND);
    if let Err(err) = face.layout().validate(&canvas.bounding_box()) {
        eprintln!("warning: {err}");
    }

    face.on_tick(time.hour() as u8, time.minute() as u8, time.second() as u8);
    match face.render(&mut canvas) {
        Ok(()) => {}
        Err(never) => match never {},
    }

    println!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second());
    for line in canvas.lines(args.scale) {
        println!("{line}");
    }
}
