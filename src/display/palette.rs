// NES Color Palette - RGBA conversions for all 64 palette entries
//
// The NES has a master palette of 64 colors (indexed 0x00-0x3F).
// This includes 52 unique colors plus some duplicates and unused entries.
//
// Indices $0D, $1D, $2D, $3D are problematic blacks on real hardware and
// the remaining $xE-$xF entries are unused; all of them render as black.

/// Ricoh 2C02 master palette (64 colors) as RGBA bytes.
///
/// Each entry is `[R, G, B, A]` with alpha fixed at 0xFF. The values
/// approximate the NTSC composite output of the 2C02.
pub const NES_PALETTE: [[u8; 4]; 64] = [
    // $00-$0F
    [0x62, 0x62, 0x62, 0xFF],
    [0x00, 0x1F, 0xB2, 0xFF],
    [0x24, 0x04, 0xC8, 0xFF],
    [0x52, 0x00, 0xB2, 0xFF],
    [0x73, 0x00, 0x76, 0xFF],
    [0x80, 0x00, 0x24, 0xFF],
    [0x73, 0x0B, 0x00, 0xFF],
    [0x52, 0x28, 0x00, 0xFF],
    [0x24, 0x44, 0x00, 0xFF],
    [0x00, 0x57, 0x00, 0xFF],
    [0x00, 0x5C, 0x00, 0xFF],
    [0x00, 0x53, 0x24, 0xFF],
    [0x00, 0x3C, 0x76, 0xFF],
    [0x00, 0x00, 0x00, 0xFF],
    [0x00, 0x00, 0x00, 0xFF],
    [0x00, 0x00, 0x00, 0xFF],
    // $10-$1F
    [0xAB, 0xAB, 0xAB, 0xFF],
    [0x0D, 0x57, 0xFF, 0xFF],
    [0x4B, 0x30, 0xFF, 0xFF],
    [0x8A, 0x13, 0xFF, 0xFF],
    [0xBC, 0x08, 0xD6, 0xFF],
    [0xD2, 0x12, 0x69, 0xFF],
    [0xC7, 0x2E, 0x00, 0xFF],
    [0x9D, 0x54, 0x00, 0xFF],
    [0x60, 0x7B, 0x00, 0xFF],
    [0x20, 0x98, 0x00, 0xFF],
    [0x00, 0xA3, 0x00, 0xFF],
    [0x00, 0x99, 0x42, 0xFF],
    [0x00, 0x7D, 0xB4, 0xFF],
    [0x00, 0x00, 0x00, 0xFF],
    [0x00, 0x00, 0x00, 0xFF],
    [0x00, 0x00, 0x00, 0xFF],
    // $20-$2F
    [0xFF, 0xFF, 0xFF, 0xFF],
    [0x53, 0xAE, 0xFF, 0xFF],
    [0x90, 0x85, 0xFF, 0xFF],
    [0xD3, 0x65, 0xFF, 0xFF],
    [0xFF, 0x57, 0xFF, 0xFF],
    [0xFF, 0x5D, 0xCF, 0xFF],
    [0xFF, 0x77, 0x57, 0xFF],
    [0xFA, 0x9E, 0x00, 0xFF],
    [0xBD, 0xC7, 0x00, 0xFF],
    [0x7A, 0xE7, 0x00, 0xFF],
    [0x43, 0xF6, 0x11, 0xFF],
    [0x26, 0xEF, 0x7E, 0xFF],
    [0x2C, 0xD5, 0xF6, 0xFF],
    [0x4E, 0x4E, 0x4E, 0xFF],
    [0x00, 0x00, 0x00, 0xFF],
    [0x00, 0x00, 0x00, 0xFF],
    // $30-$3F
    [0xFF, 0xFF, 0xFF, 0xFF],
    [0xB6, 0xE1, 0xFF, 0xFF],
    [0xCE, 0xD1, 0xFF, 0xFF],
    [0xE9, 0xC3, 0xFF, 0xFF],
    [0xFF, 0xBC, 0xFF, 0xFF],
    [0xFF, 0xBD, 0xF4, 0xFF],
    [0xFF, 0xC6, 0xC3, 0xFF],
    [0xFF, 0xD5, 0x9A, 0xFF],
    [0xE9, 0xE6, 0x81, 0xFF],
    [0xCE, 0xF4, 0x81, 0xFF],
    [0xB6, 0xFB, 0x9A, 0xFF],
    [0xA9, 0xFA, 0xC3, 0xFF],
    [0xA9, 0xF0, 0xF4, 0xFF],
    [0xB8, 0xB8, 0xB8, 0xFF],
    [0x00, 0x00, 0x00, 0xFF],
    [0x00, 0x00, 0x00, 0xFF],
];

/// Convert a NES palette index to RGBA bytes.
///
/// # Arguments
/// * `index` - Palette index; masked to 0x00-0x3F
///
/// # Returns
/// `[R, G, B, A]` bytes for the indexed color
#[inline]
pub fn palette_rgba(index: u8) -> [u8; 4] {
    NES_PALETTE[(index & 0x3F) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_size() {
        assert_eq!(NES_PALETTE.len(), 64);
    }

    #[test]
    fn test_palette_rgba() {
        // First color (dark gray)
        assert_eq!(palette_rgba(0x00), [0x62, 0x62, 0x62, 0xFF]);

        // A known color (white)
        assert_eq!(palette_rgba(0x20), [0xFF, 0xFF, 0xFF, 0xFF]);

        // Index >= 64 wraps
        assert_eq!(palette_rgba(0x40), palette_rgba(0x00));
    }

    #[test]
    fn test_palette_opaque() {
        for index in 0..64 {
            assert_eq!(palette_rgba(index)[3], 0xFF, "all entries are opaque");
        }
    }
}
