//! RGB color and its packed RGBA8888 pixel word.

/// Opaque RGB color. Packs into the pixel format the display surface expects.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const MAGENTA: Color = Color::new(255, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBBFF`: red in the most significant byte, alpha fixed at 255.
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | 0xFF
    }

    /// Inverse of [`Color::to_packed`]; the alpha byte is ignored.
    pub const fn from_packed(word: u32) -> Self {
        Self {
            r: (word >> 24) as u8,
            g: (word >> 16) as u8,
            b: (word >> 8) as u8,
        }
    }

    /// Subtract `amount` from every channel, stopping at zero.
    pub fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
        }
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_packed()
    }
}

impl From<u32> for Color {
    fn from(word: u32) -> Self {
        Color::from_packed(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_black() {
        assert_eq!(Color::default(), Color::BLACK);
    }

    #[test]
    fn packs_red_into_high_byte() {
        assert_eq!(Color::RED.to_packed(), 0xFF00_00FF);
        assert_eq!(Color::new(0x12, 0x34, 0x56).to_packed(), 0x1234_56FF);
        assert_eq!(u32::from(Color::BLACK), 0x0000_00FF);
        assert_eq!(u32::from(Color::WHITE), 0xFFFF_FFFF);
    }

    #[test]
    fn unpack_discards_alpha() {
        assert_eq!(Color::from_packed(0x1234_5600), Color::new(0x12, 0x34, 0x56));
        assert_eq!(Color::from(0xABCD_EF7F), Color::new(0xAB, 0xCD, 0xEF));
    }

    #[test]
    fn darken_saturates_at_zero() {
        let c = Color::new(1, 2, 200).darken(2);
        assert_eq!(c, Color::new(0, 0, 198));
    }

    proptest! {
        #[test]
        fn pack_round_trips_rgb(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let color = Color::new(r, g, b);
            let packed = color.to_packed();
            prop_assert_eq!(packed & 0xFF, 0xFF);
            prop_assert_eq!(Color::from_packed(packed), color);
        }
    }
}
