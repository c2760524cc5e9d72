// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Palettes turn an iteration count into something you can look at.
//!
//! Every palette is a pure function of `(count, max_iterations)`.
//! The hue ramps produce HSB colors; the grayscale palette produces
//! RGB directly.  Either way `Color::to_rgb()` gets you bytes.

use num::clamp;
use std::str::FromStr;

use error::RenderError;

/// Which way the hue ramp runs as the iteration count climbs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RampDirection {
    /// hue = (1 - k/N) · 360: fast escapers are red, slower ones run
    /// backward through magenta and blue.
    Direct,
    /// hue = k/N · 360.
    Inverted,
}

/// The available coloring policies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Hue follows the escape velocity, saturation rises with it, and
    /// the set itself is black.
    HueRamp(RampDirection),
    /// Gray level is the count modulo 256 and the set itself is white.
    Grayscale,
}

impl Default for Palette {
    fn default() -> Self {
        Palette::HueRamp(RampDirection::Direct)
    }
}

impl Palette {
    /// Maps an iteration count to a color.  `max_iterations` must be
    /// positive, and a count equal to it means the point is in the set.
    pub fn color_for(&self, count: u32, max_iterations: u32) -> Color {
        let in_set = count >= max_iterations;
        match *self {
            Palette::HueRamp(direction) => {
                if in_set {
                    return Color::Hsb(Hsb::BLACK);
                }
                let ratio = f64::from(count) / f64::from(max_iterations);
                let hue = match direction {
                    RampDirection::Direct => (1.0 - ratio) * 360.0,
                    RampDirection::Inverted => ratio * 360.0,
                };
                Color::Hsb(Hsb {
                    hue,
                    saturation: ratio,
                    brightness: 1.0,
                })
            }
            Palette::Grayscale => {
                let level = if in_set {
                    255
                } else {
                    clamp(count % 256, 0, 255) as u8
                };
                Color::Rgb(Rgb(level, level, level))
            }
        }
    }
}

impl FromStr for Palette {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Palette, RenderError> {
        match s.trim().to_lowercase().as_str() {
            "hue" | "direct" => Ok(Palette::HueRamp(RampDirection::Direct)),
            "hue-inverted" | "inverted" => Ok(Palette::HueRamp(RampDirection::Inverted)),
            "grayscale" | "gray" | "grey" => Ok(Palette::Grayscale),
            _ => Err(RenderError::ParseFailure(s.to_string())),
        }
    }
}

/// A color in hue/saturation/brightness space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsb {
    /// Degrees, 0..=360.
    pub hue: f64,
    /// 0..=1.
    pub saturation: f64,
    /// 0..=1.
    pub brightness: f64,
}

impl Hsb {
    /// No hue, no saturation, no light.
    pub const BLACK: Hsb = Hsb {
        hue: 0.0,
        saturation: 0.0,
        brightness: 0.0,
    };

    /// Standard sextant conversion to 8-bit RGB.
    pub fn to_rgb(&self) -> Rgb {
        let h = self.hue % 360.0;
        let c = self.brightness * self.saturation;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = self.brightness - c;

        let (r, g, b) = if h < 60.0 {
            (c, x, 0.0)
        } else if h < 120.0 {
            (x, c, 0.0)
        } else if h < 180.0 {
            (0.0, c, x)
        } else if h < 240.0 {
            (0.0, x, c)
        } else if h < 300.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        let byte = |v: f64| clamp((v + m) * 255.0, 0.0, 255.0).round() as u8;
        Rgb(byte(r), byte(g), byte(b))
    }
}

/// An 8-bit-per-channel RGB color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// What a palette hands back for a single pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Color {
    /// From the hue ramps.
    Hsb(Hsb),
    /// From the grayscale palette.
    Rgb(Rgb),
}

impl Default for Color {
    fn default() -> Self {
        Color::Rgb(Rgb::default())
    }
}

impl Color {
    /// The color as bytes, ready for an image buffer.
    pub fn to_rgb(&self) -> Rgb {
        match *self {
            Color::Hsb(ref hsb) => hsb.to_rgb(),
            Color::Rgb(rgb) => rgb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_ramp_paints_the_set_black() {
        for palette in &[
            Palette::HueRamp(RampDirection::Direct),
            Palette::HueRamp(RampDirection::Inverted),
        ] {
            assert_eq!(palette.color_for(50, 50), Color::Hsb(Hsb::BLACK));
            assert_eq!(palette.color_for(50, 50).to_rgb(), Rgb(0, 0, 0));
        }
    }

    #[test]
    fn direct_ramp_follows_the_formula() {
        let palette = Palette::HueRamp(RampDirection::Direct);
        assert_eq!(
            palette.color_for(0, 80),
            Color::Hsb(Hsb {
                hue: 360.0,
                saturation: 0.0,
                brightness: 1.0
            })
        );
        assert_eq!(
            palette.color_for(20, 80),
            Color::Hsb(Hsb {
                hue: 270.0,
                saturation: 0.25,
                brightness: 1.0
            })
        );
    }

    #[test]
    fn inverted_ramp_follows_the_formula() {
        let palette = Palette::HueRamp(RampDirection::Inverted);
        assert_eq!(
            palette.color_for(20, 80),
            Color::Hsb(Hsb {
                hue: 90.0,
                saturation: 0.25,
                brightness: 1.0
            })
        );
    }

    #[test]
    fn grayscale_wraps_and_paints_the_set_white() {
        let palette = Palette::Grayscale;
        assert_eq!(palette.color_for(0, 1000), Color::Rgb(Rgb(0, 0, 0)));
        assert_eq!(palette.color_for(17, 1000), Color::Rgb(Rgb(17, 17, 17)));
        assert_eq!(palette.color_for(255, 1000), Color::Rgb(Rgb(255, 255, 255)));
        assert_eq!(palette.color_for(256, 1000), Color::Rgb(Rgb(0, 0, 0)));
        assert_eq!(palette.color_for(300, 1000), Color::Rgb(Rgb(44, 44, 44)));
        assert_eq!(palette.color_for(1000, 1000), Color::Rgb(Rgb(255, 255, 255)));
    }

    #[test]
    fn palettes_are_pure() {
        for palette in &[
            Palette::HueRamp(RampDirection::Direct),
            Palette::HueRamp(RampDirection::Inverted),
            Palette::Grayscale,
        ] {
            for k in 0..=64 {
                assert_eq!(palette.color_for(k, 64), palette.color_for(k, 64));
            }
        }
    }

    #[test]
    fn hsb_converts_to_rgb() {
        let hsb = |hue, saturation, brightness| Hsb {
            hue,
            saturation,
            brightness,
        };
        assert_eq!(hsb(0.0, 1.0, 1.0).to_rgb(), Rgb(255, 0, 0));
        assert_eq!(hsb(120.0, 1.0, 1.0).to_rgb(), Rgb(0, 255, 0));
        assert_eq!(hsb(240.0, 1.0, 1.0).to_rgb(), Rgb(0, 0, 255));
        assert_eq!(hsb(360.0, 1.0, 1.0).to_rgb(), Rgb(255, 0, 0));
        assert_eq!(hsb(200.0, 0.0, 1.0).to_rgb(), Rgb(255, 255, 255));
        assert_eq!(hsb(60.0, 1.0, 0.5).to_rgb(), Rgb(128, 128, 0));
    }

    #[test]
    fn palettes_parse_by_name() {
        assert_eq!(
            "hue".parse::<Palette>().unwrap(),
            Palette::HueRamp(RampDirection::Direct)
        );
        assert_eq!(
            "Hue-Inverted".parse::<Palette>().unwrap(),
            Palette::HueRamp(RampDirection::Inverted)
        );
        assert_eq!("grayscale".parse::<Palette>().unwrap(), Palette::Grayscale);
        assert!("plaid".parse::<Palette>().is_err());
        assert_eq!(Palette::default(), Palette::HueRamp(RampDirection::Direct));
    }
}
