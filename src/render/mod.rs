//! Module level rendering of a [Symbol](crate::Symbol).
//!
//! This is a thin consumer of the low level codeword grid: every codeword
//! expands to its bars (set) and spaces (unset), rows are stretched
//! vertically by the row ratio and the whole symbol is surrounded by a quiet
//! zone.

use core::iter;

use crate::layout::Symbol;

mod bitfield;
pub use bitfield::{Bitfield, Bits};

/// Default width in pixels of a module.
pub const DEFAULT_SCALE: u16 = 3;
/// Default height of a row, in module widths.
pub const DEFAULT_RATIO: u16 = 3;
/// Default quiet zone around the symbol, in pixels.
pub const DEFAULT_PADDING: u16 = 20;

#[derive(Debug, Clone)]
pub struct Render<'a> {
    symbol: &'a Symbol,
    scale: u16,
    ratio: u16,
    padding: u16,
    inverted: bool,
}

impl Symbol {
    /// Prepares the rendering of this symbol with the default scale, ratio
    /// and quiet zone.
    pub const fn render(&self) -> Render<'_> {
        Render {
            symbol: self,
            scale: DEFAULT_SCALE,
            ratio: DEFAULT_RATIO,
            padding: DEFAULT_PADDING,
            inverted: false,
        }
    }

    /// Number of modules in a row (every row has the same width).
    pub fn modules_per_row(&self) -> usize {
        self.row(0).map_or(0, |row| row.iter().map(|&cw| Bitfield::of(cw).size() as usize).sum())
    }
}

impl<'a> Render<'a> {
    /// Width of the image in pixels, quiet zone included.
    pub fn width(&self) -> u32 {
        self.symbol.modules_per_row() as u32 * self.scale as u32 + 2 * self.padding as u32
    }

    /// Height of the image in pixels, quiet zone included.
    pub const fn height(&self) -> u32 {
        self.symbol.rows() as u32 * self.row_height() + 2 * self.padding as u32
    }

    const fn row_height(&self) -> u32 {
        self.scale as u32 * self.ratio as u32
    }

    /// Returns the width of a module in pixels.
    pub const fn scale(&self) -> u16 {
        self.scale
    }

    /// Sets the width of a module in pixels.
    pub const fn set_scale(mut self, scale: u16) -> Self {
        self.scale = scale;
        self
    }

    pub const fn ratio(&self) -> u16 {
        self.ratio
    }

    /// Sets the height of a row as a multiple of the module width.
    pub const fn set_ratio(mut self, ratio: u16) -> Self {
        self.ratio = ratio;
        self
    }

    pub const fn padding(&self) -> u16 {
        self.padding
    }

    /// Sets the quiet zone (in pixels) on every side of the symbol.
    pub const fn set_padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    /// Returns if the PDF417 is set to be rendered with inverted colors.
    pub const fn inverted(&self) -> bool {
        self.inverted
    }

    /// Marks whether this PDF417 should be rendered with pixel values inverted.
    pub const fn set_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Pixels of the image, row-major. A set pixel is a bar.
    pub fn bits(&self) -> impl Iterator<Item = bool> + 'a {
        let scale = self.scale as usize;
        let row_height = self.row_height() as usize;
        let padding = self.padding as usize;
        let invert = self.inverted;

        let quiet_zone = iter::repeat(false).take(padding * self.width() as usize);
        let rows = self.symbol.iter_rows().flat_map(move |row| {
            let line: Vec<bool> = iter::repeat(false).take(padding)
                .chain(row.iter()
                    .flat_map(|&cw| Bitfield::of(cw))
                    .flat_map(|bit| iter::repeat(bit).take(scale)))
                .chain(iter::repeat(false).take(padding))
                .collect();
            iter::repeat(line).take(row_height).flatten()
        });

        quiet_zone.clone()
            .chain(rows)
            .chain(quiet_zone)
            .map(move |bit| bit ^ invert)
    }

    /// Writes `on` for bars and `off` for spaces into `target`, which must
    /// hold at least `width() * height()` pixels.
    pub fn fill<P: Clone>(&self, target: &mut [P], on: &P, off: &P) {
        for (pixel, bit) in target.iter_mut().zip(self.bits()) {
            *pixel = if bit { on.clone() } else { off.clone() };
        }
    }

    pub fn fill_bits(&self, target: &mut [bool]) {
        self.fill(target, &true, &false);
    }

    /// Packs the pixels into `target`, 8 per byte, most significant bit
    /// first. `target` must hold `(width() * height()).div_ceil(8)` bytes.
    pub fn fill_bitmap(&self, target: &mut [u8]) {
        target.fill(0);
        for (i, bit) in self.bits().enumerate() {
            if bit {
                target[i / 8] |= 0x80 >> (i % 8);
            }
        }
    }
}

#[cfg(feature = "embedded-graphics")]
mod graphics {
    use embedded_graphics::{
        Drawable, Pixel,
        draw_target::DrawTarget,
        geometry::{OriginDimensions, Point, Size},
        pixelcolor::BinaryColor,
    };

    use super::Render;

    impl OriginDimensions for Render<'_> {
        fn size(&self) -> Size {
            Size::new(self.width(), self.height())
        }
    }

    impl Drawable for Render<'_> {
        type Color = BinaryColor;
        type Output = ();

        fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
        where
            D: DrawTarget<Color = Self::Color>,
        {
            let width = self.width() as usize;
            target.draw_iter(self.bits().enumerate().map(|(i, bit)| {
                Pixel(Point::new((i % width) as i32, (i / width) as i32), BinaryColor::from(bit))
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::layout;
    use crate::tables::{START, STOP};

    use super::Bitfield;

    fn hello_world(truncate: bool) -> crate::Symbol {
        layout(vec![214, 341, 446, 674, 521, 119], 6, 2, truncate).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let symbol = hello_world(false);
        assert_eq!(symbol.modules_per_row(), 17 * 9 + 18);

        let render = symbol.render().set_scale(1).set_ratio(1).set_padding(0);
        assert_eq!((render.width(), render.height()), (171, 3));
        assert_eq!(render.bits().count(), 171 * 3);

        let render = symbol.render();
        assert_eq!((render.width(), render.height()), (171 * 3 + 40, 3 * 9 + 40));
        assert_eq!(render.bits().count(), (render.width() * render.height()) as usize);
    }

    #[test]
    fn test_truncated_width() {
        assert_eq!(hello_world(true).modules_per_row(), 17 * 9 + 8);
    }

    #[test]
    fn test_row_pixels() {
        let symbol = hello_world(false);
        let render = symbol.render().set_scale(1).set_ratio(1).set_padding(0);
        let bits: Vec<bool> = render.bits().take(171).collect();

        let start: Vec<bool> = Bitfield::of(START).into_iter().collect();
        let stop: Vec<bool> = Bitfield::of(STOP).into_iter().collect();
        assert_eq!(bits[..17], start);
        assert_eq!(bits[171 - 18..], stop);
    }

    #[test]
    fn test_quiet_zone_and_inversion() {
        let symbol = hello_world(false);
        let render = symbol.render().set_scale(2).set_ratio(2).set_padding(4);
        let width = render.width() as usize;
        let bits: Vec<bool> = render.bits().collect();

        assert!(bits[..4 * width].iter().all(|&b| !b));
        assert!(bits[bits.len() - 4 * width..].iter().all(|&b| !b));
        // first bar of the start pattern, after the left quiet zone
        assert!(bits[4 * width + 4]);

        let inverted: Vec<bool> = render.clone().set_inverted(true).bits().collect();
        assert!(bits.iter().zip(&inverted).all(|(a, b)| a != b));
    }

    #[test]
    fn test_fill_bitmap() {
        let symbol = hello_world(false);
        let render = symbol.render().set_scale(1).set_ratio(1).set_padding(0);
        let len = (render.width() * render.height()) as usize;

        let mut bools = vec![false; len];
        render.fill_bits(&mut bools);
        let mut bitmap = vec![0u8; len.div_ceil(8)];
        render.fill_bitmap(&mut bitmap);

        for (i, &bit) in bools.iter().enumerate() {
            assert_eq!(bitmap[i / 8] & (0x80 >> (i % 8)) != 0, bit);
        }
    }
}
