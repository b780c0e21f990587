// Imports
use palette::convert::{FromColorUnclamped, IntoColorUnclamped};
use serde::{Deserialize, Serialize};

/// A rgba color
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    palette::convert::FromColorUnclamped,
    palette::WithAlpha,
)]
#[palette(
    skip_derives(Rgb),
    component = "f64",
    rgb_standard = "palette::encoding::Srgb"
)]
#[serde(default, rename = "color")]
pub struct Color {
    /// Red, ranging [0.0, 1.0].
    #[serde(rename = "r", with = "crate::serialize::f64_dp3")]
    pub r: f64,
    /// Green, ranging [0.0, 1.0].
    #[serde(rename = "g", with = "crate::serialize::f64_dp3")]
    pub g: f64,
    /// Blue, ranging [0.0, 1.0].
    #[serde(rename = "b", with = "crate::serialize::f64_dp3")]
    pub b: f64,
    /// Alpha, ranging [0.0, 1.0].
    #[palette(alpha)]
    #[serde(rename = "a", with = "crate::serialize::f64_dp3")]
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    /// The factor each rgb channel gets multiplied with when deriving a darker shade.
    pub const SHADE_FACTOR: f64 = 0.9;

    /// Transparent color with r,g,b set to 0.0.
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Black color.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// White color.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Mid gray color.
    pub const GRAY: Self = Self {
        r: 136.0 / 255.0,
        g: 136.0 / 255.0,
        b: 136.0 / 255.0,
        a: 1.0,
    };

    /// Red color.
    pub const RED: Self = Self {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Green color.
    pub const GREEN: Self = Self {
        r: 0.0,
        g: 1.0,
        b: 0.0,
        a: 1.0,
    };

    /// Blue color.
    pub const BLUE: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 1.0,
        a: 1.0,
    };

    /// A new color from rgba values.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Approximate equality.
    pub fn approx_eq(self, other: Self) -> bool {
        approx::relative_eq!(self.r, other.r)
            && approx::relative_eq!(self.g, other.g)
            && approx::relative_eq!(self.b, other.b)
            && approx::relative_eq!(self.a, other.a)
    }

    /// Derive a darker shade of the color, used as the default border tone.
    ///
    /// Each 8-bit r,g,b channel is multiplied by [Self::SHADE_FACTOR] and truncated
    /// toward zero. Alpha stays unchanged. Repeated application is per-channel
    /// non-increasing and never wraps.
    pub fn to_darker_shade(self) -> Self {
        fn shade(channel: f64) -> f64 {
            ((channel * 255.0).round() * Color::SHADE_FACTOR).floor() / 255.0
        }

        Self {
            r: shade(self.r),
            g: shade(self.g),
            b: shade(self.b),
            a: self.a,
        }
    }
}

impl From<piet::Color> for Color {
    fn from(piet_color: piet::Color) -> Self {
        let piet_rgba = piet_color.as_rgba();
        Self {
            r: piet_rgba.0,
            g: piet_rgba.1,
            b: piet_rgba.2,
            a: piet_rgba.3,
        }
    }
}

impl From<Color> for piet::Color {
    fn from(color: Color) -> Self {
        piet::Color::rgba(color.r, color.g, color.b, color.a)
    }
}

impl From<(f64, f64, f64, f64)> for Color {
    fn from(tuple: (f64, f64, f64, f64)) -> Self {
        Self {
            r: tuple.0,
            g: tuple.1,
            b: tuple.2,
            a: tuple.3,
        }
    }
}

impl From<Color> for (f64, f64, f64, f64) {
    fn from(color: Color) -> Self {
        (color.r, color.g, color.b, color.a)
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self {
            r: f64::from((value >> 24) & 0xff) / 255.0,
            g: f64::from((value >> 16) & 0xff) / 255.0,
            b: f64::from((value >> 8) & 0xff) / 255.0,
            a: f64::from((value) & 0xff) / 255.0,
        }
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        ((((color.r * 255.0).round() as u32) & 0xff) << 24)
            | ((((color.g * 255.0).round() as u32) & 0xff) << 16)
            | ((((color.b * 255.0).round() as u32) & 0xff) << 8)
            | (((color.a * 255.0).round() as u32) & 0xff)
    }
}

// Conversion function for (opaque) RGB to Color. `impl_default_conversions` take care of preserving the transparency.
impl<S> palette::convert::FromColorUnclamped<palette::rgb::Rgb<S, f64>> for Color
where
    palette::Srgb<f64>: FromColorUnclamped<palette::rgb::Rgb<S, f64>>,
{
    fn from_color_unclamped(color: palette::rgb::Rgb<S, f64>) -> Color {
        let srgb = palette::Srgb::from_color_unclamped(color).into_format();

        Color {
            r: srgb.red,
            g: srgb.green,
            b: srgb.blue,
            a: 1.0,
        }
    }
}

// Conversion function for Color to (opaque) RGB. `impl_default_conversions` take care of preserving the transparency.
impl<S> palette::convert::FromColorUnclamped<Color> for palette::rgb::Rgb<S, f64>
where
    palette::Srgb<f64>: IntoColorUnclamped<palette::rgb::Rgb<S, f64>>,
{
    fn from_color_unclamped(color: Color) -> palette::rgb::Rgb<S, f64> {
        palette::Srgb::new(color.r, color.g, color.b)
            .into_format()
            .into_color_unclamped()
    }
}

impl palette::Clamp for Color {
    fn clamp(self) -> Self {
        // The constructor clamps components to [0.0, 1.0].
        Color::new(self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn shade_darkens_rgb_channels() {
        // floor(0.9 * 255) = 229
        let shaded = Color::WHITE.to_darker_shade();

        assert_relative_eq!(shaded.r, 229.0 / 255.0);
        assert_relative_eq!(shaded.g, 229.0 / 255.0);
        assert_relative_eq!(shaded.b, 229.0 / 255.0);
        assert_relative_eq!(shaded.a, 1.0);
    }

    #[test]
    fn shade_keeps_alpha() {
        let color = Color::new(0.5, 0.25, 0.75, 0.5);
        assert_relative_eq!(color.to_darker_shade().a, 0.5);
    }

    #[test]
    fn shade_of_green() {
        // opaque green in rgba byte order
        let shaded = Color::from(0x00ff00ff).to_darker_shade();

        assert_eq!(u32::from(shaded), 0x00e500ff);
    }

    #[test]
    fn repeated_shading_never_wraps() {
        let mut color = Color::from(0x102030ff);

        for _ in 0..64 {
            let next = color.to_darker_shade();
            assert!(next.r <= color.r && next.g <= color.g && next.b <= color.b);
            assert!(next.r >= 0.0 && next.g >= 0.0 && next.b >= 0.0);
            color = next;
        }

        assert_eq!(u32::from(color), 0x000000ff);
    }

    #[test]
    fn u32_conversion_roundtrip() {
        let value = 0x8845a1ff_u32;
        assert_eq!(u32::from(Color::from(value)), value);
    }
}
