use pdf417_encoder::*;

mod utils;

fn main() -> Result<()> {
    let options = Options::new().with_columns(4).with_security_level(2);
    let symbol = encode(b"Hello, world from rust *PDF417* !", &options)?;
    println!("{} rows x {} columns, {} codewords", symbol.rows(), symbol.columns(), symbol.codewords().len());

    let render = symbol.render().set_scale(1).set_ratio(2).set_padding(4);
    let mut storage = vec![false; (render.width() * render.height()) as usize];
    render.fill_bits(&mut storage);

    utils::display_bits(render.width() as usize, &storage);
    Ok(())
}
