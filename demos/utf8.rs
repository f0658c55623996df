use pdf417_encoder::*;

mod utils;

fn main() -> Result<()> {
    const S: &str = "💛 ワンピース";
    let symbol = encode_text(S, &Options::new().with_columns(4).with_security_level(1))?;
    println!("{:?}", symbol.codewords());

    // ISO 8859-1 can not carry these characters
    if let Err(err) = encode_text(S, &Options::new().with_encoding(TextEncoding::Latin1)) {
        println!("{err}");
    }

    let render = symbol.render().set_scale(1).set_ratio(1).set_padding(4);
    let mut storage = vec![false; (render.width() * render.height()) as usize];
    render.fill_bits(&mut storage);

    utils::display_bits(render.width() as usize, &storage);
    Ok(())
}
