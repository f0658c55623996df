use pdf417_encoder::*;

mod utils;

const SCALE: u16 = 2;
const RATIO: u16 = 3;

fn main() -> Result<()> {
    let symbol = encode(b"Test", &Options::new().with_columns(2).with_security_level(1))?;

    let render = symbol.render()
        .set_scale(SCALE)
        .set_ratio(RATIO)
        .set_padding(2 * SCALE);
    let (w, h) = (render.width() as usize, render.height() as usize);

    let mut storage = vec![0u8; (w * h).div_ceil(8)];
    render.fill_bitmap(&mut storage);

    utils::display_bitmap(w, h, &storage);
    Ok(())
}
