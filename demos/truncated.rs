use pdf417_encoder::*;

mod utils;

fn main() -> Result<()> {
    const S: &str = "Truncated PDF417";
    let options = Options::new()
        .with_columns(3)
        .with_security_level(1)
        .with_truncate(true);
    let symbol = encode_text(S, &options)?;

    for row in symbol.iter_rows() {
        println!("{row:05x?}");
    }

    let render = symbol.render().set_scale(1).set_ratio(2).set_padding(4);
    let mut storage = vec![false; (render.width() * render.height()) as usize];
    render.fill_bits(&mut storage);

    utils::display_bits(render.width() as usize, &storage);
    Ok(())
}
