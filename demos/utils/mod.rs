#![allow(dead_code)]

const WHITE: &str = "\x1B[38;2;255;255;255m█";
const BLACK: &str = "\x1B[38;2;0;0;0m█";

pub fn display_bits(width: usize, bits: &[bool]) {
    for chunk in bits.chunks(width) {
        for &on in chunk { print!("{}", if on { BLACK } else { WHITE }); }
        println!();
    }
    print!("\x1B[0m");
}

pub fn display_bitmap(width: usize, height: usize, bitmap: &[u8]) {
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let on = bitmap[i / 8] & (0x80 >> (i % 8)) != 0;
            print!("{}", if on { BLACK } else { WHITE });
        }
        println!();
    }
    print!("\x1B[0m");
}
