// src/ui/color.rs
// Colours are packed 0x00RRGGBB, the layout softbuffer presents.

/// Accepts "#rgb" or "#rrggbb" (or without '#').
/// Panics on invalid input; use only with trusted literals.
pub const fn rgb_hex(s: &str) -> u32 {
    const fn nib(b: u8) -> u32 {
        match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'a'..=b'f' => (10 + (b - b'a')) as u32,
            b'A'..=b'F' => (10 + (b - b'A')) as u32,
            _ => panic!("invalid hex digit"),
        }
    }
    const fn byte2(h: u8, l: u8) -> u32 { (nib(h) << 4) | nib(l) }
    const fn rep(n: u8) -> u32 { (nib(n) << 4) | nib(n) }

    let b = s.as_bytes();
    let off = if !b.is_empty() && b[0] == b'#' { 1 } else { 0 };

    let (r, g, bl) = match b.len() - off {
        3 => (rep(b[off]), rep(b[off + 1]), rep(b[off + 2])),
        6 => (byte2(b[off], b[off + 1]), byte2(b[off + 2], b[off + 3]), byte2(b[off + 4], b[off + 5])),
        _ => panic!("hex must be 3/6 digits"),
    };
    pack(r as u8, g as u8, bl as u8)
}

#[inline(always)]
pub const fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

pub const BLACK: u32 = rgb_hex("#000");
pub const WHITE: u32 = rgb_hex("#fff");
pub const RED: u32 = rgb_hex("#ff2828");
pub const GREEN: u32 = rgb_hex("#28ff28");
pub const BLUE: u32 = rgb_hex("#2828ff");
pub const METER_EMPTY: u32 = rgb_hex("#1e282f");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_forms() {
        assert_eq!(rgb_hex("#fff"), 0x00FF_FFFF);
        assert_eq!(rgb_hex("28ff28"), 0x0028_FF28);
        assert_eq!(rgb_hex("#1E282F"), 0x001E_282F);
        assert_eq!(pack(0x12, 0x34, 0x56), 0x0012_3456);
    }

    #[test]
    #[should_panic]
    fn rejects_bad_length() {
        rgb_hex("#12345");
    }
}
