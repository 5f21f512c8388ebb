//! The fixed display palette. Classes map onto nine named colors by index.

use image::Rgb;

pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const GREEN: Rgb<u8> = Rgb([0, 128, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
pub const ORANGE: Rgb<u8> = Rgb([255, 165, 0]);
pub const PINK: Rgb<u8> = Rgb([255, 192, 203]);
pub const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
pub const PURPLE: Rgb<u8> = Rgb([128, 0, 128]);
pub const CYAN: Rgb<u8> = Rgb([0, 255, 255]);
pub const CHARTREUSE: Rgb<u8> = Rgb([127, 255, 0]);

pub const PALETTE: [Rgb<u8>; 9] = [
    RED, GREEN, BLUE, ORANGE, PINK, YELLOW, PURPLE, CYAN, CHARTREUSE,
];

#[derive(Debug, thiserror::Error)]
#[error("class index {0} is outside the {n}-color palette", n = PALETTE.len())]
pub struct PaletteRangeError(pub u32);

/// Display color for a class index. Indices past the palette are an error
/// rather than an undefined color.
pub fn color_for(class_index: u32) -> Result<Rgb<u8>, PaletteRangeError> {
    PALETTE
        .get(class_index as usize)
        .copied()
        .ok_or(PaletteRangeError(class_index))
}
