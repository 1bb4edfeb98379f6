//! Advance widths of the standard PDF fonts, in thousandths of the font size,
//! as published in Adobe's AFM files.
//! Only printable ASCII is covered; other characters count as an average glyph.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

const DEFAULT_WIDTH: u16 = 556;

/// Characters 32 (space) to 126 (tilde).
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_width(font: Font, character: char) -> u16 {
    let widths = match font {
        Font::Helvetica | Font::HelveticaOblique => &HELVETICA_WIDTHS,
        Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
    };
    (character as usize)
        .checked_sub(32)
        .and_then(|index| widths.get(index))
        .copied()
        .unwrap_or(DEFAULT_WIDTH)
}

/// Width, in points, of `text` once drawn with `font` at `size`.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|character| u32::from(char_width(font, character)))
        .sum();
    units as f32 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized::{ide, parameterized};

    ide!();

    #[parameterized(
        text = {"", " ", "A", "AAA", "Wi", "é"},
        font = {Font::Helvetica, Font::Helvetica, Font::Helvetica, Font::HelveticaBold, Font::HelveticaBold, Font::Helvetica},
        size = {12.0, 10.0, 10.0, 10.0, 1000.0, 1.0},
        expected_width = {0.0, 2.78, 6.67, 21.66, 1222.0, 0.556}
    )]
    fn should_compute_text_width(text: &str, font: Font, size: f32, expected_width: f32) {
        let width = text_width(text, font, size);
        assert!(
            (expected_width - width).abs() < 0.001,
            "expected {expected_width}, got {width}"
        );
    }

    #[test]
    fn should_use_regular_widths_for_oblique() {
        let text = "\"Our Voice, Our Strength\"";
        assert_eq!(
            text_width(text, Font::Helvetica, 14.0),
            text_width(text, Font::HelveticaOblique, 14.0)
        );
    }

    #[test]
    fn bold_text_is_wider() {
        let text = "NATIONAL PEOPLE'S VOICE";
        assert!(text_width(text, Font::HelveticaBold, 32.0) > text_width(text, Font::Helvetica, 32.0));
    }
}
