use serde::Deserialize;

/// An 8-bit RGB colour. All arithmetic happens in `f32` and is clamped back to `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "[i32; 3]")]
pub struct Colour {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour::new(0, 0, 0);
    pub const WHITE: Colour = Colour::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Builds a colour from unbounded channel values, clamping each to `[0, 255]`.
    pub fn from_f32(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red: clamp_channel(red),
            green: clamp_channel(green),
            blue: clamp_channel(blue),
        }
    }

    /// Converts MTL-style `[0, 1]` floats (`Kd 0.7 0.1 0.1`) to channels.
    pub fn from_unit(rgb: [f32; 3]) -> Self {
        Self::from_f32(
            (rgb[0] * 255.0).round(),
            (rgb[1] * 255.0).round(),
            (rgb[2] * 255.0).round(),
        )
    }

    /// Multiplies every channel by `brightness`. Overflow saturates at 255.
    pub fn scaled(self, brightness: f32) -> Self {
        Self::from_f32(
            self.red as f32 * brightness,
            self.green as f32 * brightness,
            self.blue as f32 * brightness,
        )
    }

    /// `self * (1 - k) + other * k`.
    pub fn blend(self, other: Colour, k: f32) -> Self {
        let mix = |a: u8, b: u8| a as f32 * (1.0 - k) + b as f32 * k;
        Self::from_f32(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
        )
    }

    /// Packs as `0xAARRGGBB` with alpha fixed at 255.
    #[inline]
    pub fn to_argb(self) -> u32 {
        (255 << 24) | ((self.red as u32) << 16) | ((self.green as u32) << 8) | self.blue as u32
    }

    #[inline]
    pub fn from_argb(packed: u32) -> Self {
        Self {
            red: ((packed >> 16) & 0xFF) as u8,
            green: ((packed >> 8) & 0xFF) as u8,
            blue: (packed & 0xFF) as u8,
        }
    }
}

impl From<[i32; 3]> for Colour {
    fn from(rgb: [i32; 3]) -> Self {
        Self::from_f32(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32)
    }
}

#[inline]
fn clamp_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_alpha_red_green_blue() {
        let packed = Colour::new(0x12, 0x34, 0x56).to_argb();
        assert_eq!(packed, 0xFF12_3456);
        assert_eq!(Colour::from_argb(packed), Colour::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn scaling_saturates_instead_of_wrapping() {
        let c = Colour::new(200, 100, 0).scaled(1.7);
        assert_eq!(c, Colour::new(255, 170, 0));
        assert_eq!(Colour::new(10, 10, 10).scaled(-1.0), Colour::BLACK);
        assert_eq!(Colour::WHITE.scaled(f32::NAN), Colour::BLACK);
    }

    #[test]
    fn blend_weights_second_colour_by_k() {
        let base = Colour::new(100, 0, 200);
        let other = Colour::new(200, 40, 0);
        assert_eq!(base.blend(other, 0.0), base);
        assert_eq!(base.blend(other, 1.0), other);
        assert_eq!(base.blend(other, 0.75), Colour::new(175, 30, 50));
    }

    #[test]
    fn unit_floats_round_to_nearest_channel() {
        assert_eq!(Colour::from_unit([0.5, 0.2, 1.2]), Colour::new(128, 51, 255));
    }
}
