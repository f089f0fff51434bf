//! Colour parsing for story data.
//!
//! Saved stories store colours as `{ "r": 0-255, "g": 0-255, "b": 0-255, "a": 0-1 }` objects, while
//! text runs carry CSS strings inside inline `style` attributes. Both land in [`Rgba8`].

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct Repr {
            r: u8,
            g: u8,
            b: u8,
            a: f64,
        }

        Repr {
            r: self.r,
            g: self.g,
            b: self.b,
            a: (f64::from(self.a) / 255.0 * 1000.0).round() / 1000.0,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => parse_css_color(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid css color \"{s}\""))),
            Repr::RgbaObj { r, g, b, a } => Ok(from_channels(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(from_channels(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(from_channels(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn from_channels(r: f64, g: f64, b: f64, a: f64) -> Rgba8 {
    Rgba8::new(channel(r), channel(g), channel(b), unit_to_u8(a))
}

/// Parse a CSS colour value: `#rgb[a]`, `#rrggbb[aa]`, `rgb()`, `rgba()`, `hsl()`, `hsla()`, or a
/// basic named colour.
pub fn parse_css_color(value: &str) -> Option<Rgba8> {
    let s = value.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = function_args(&s, &["rgba", "rgb"]) {
        return parse_rgb_args(&args);
    }
    if let Some(args) = function_args(&s, &["hsla", "hsl"]) {
        return parse_hsl_args(&args);
    }
    named_color(&s)
}

fn parse_hex(hex: &str) -> Option<Rgba8> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba8::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba8::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Rgba8::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba8::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

/// Split `name(a, b, c / d)` into its arguments when `name` is one of `names`.
fn function_args(s: &str, names: &[&str]) -> Option<Vec<String>> {
    let (name, rest) = s.split_once('(')?;
    if !names.contains(&name.trim()) {
        return None;
    }
    let inner = rest.trim_end().strip_suffix(')')?;
    let args = inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect::<Vec<_>>();
    Some(args)
}

/// Parse a number or percentage; percentages are scaled to `full`.
fn number_or_percent(arg: &str, full: f64) -> Option<f64> {
    match arg.strip_suffix('%') {
        Some(p) => p.parse::<f64>().ok().map(|v| v / 100.0 * full),
        None => arg.parse::<f64>().ok(),
    }
    .filter(|v| v.is_finite())
}

fn alpha_arg(args: &[String]) -> Option<f64> {
    match args.get(3) {
        Some(a) => number_or_percent(a, 1.0),
        None => Some(1.0),
    }
}

fn parse_rgb_args(args: &[String]) -> Option<Rgba8> {
    if !(3..=4).contains(&args.len()) {
        return None;
    }
    let r = number_or_percent(&args[0], 255.0)?;
    let g = number_or_percent(&args[1], 255.0)?;
    let b = number_or_percent(&args[2], 255.0)?;
    Some(from_channels(r, g, b, alpha_arg(args)?))
}

fn parse_hsl_args(args: &[String]) -> Option<Rgba8> {
    if !(3..=4).contains(&args.len()) {
        return None;
    }
    let h = args[0].trim_end_matches("deg").parse::<f64>().ok()?;
    let s = number_or_percent(&args[1], 1.0)?;
    let l = number_or_percent(&args[2], 1.0)?;
    let (r, g, b) = hsl_to_rgb(h, s, l);
    Some(Rgba8::new(
        unit_to_u8(r),
        unit_to_u8(g),
        unit_to_u8(b),
        unit_to_u8(alpha_arg(args)?),
    ))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return (l, l, l);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

fn named_color(name: &str) -> Option<Rgba8> {
    let (r, g, b) = match name {
        "transparent" => return Some(Rgba8::new(0, 0, 0, 0)),
        "white" => (255, 255, 255),
        "black" => (0, 0, 0),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "lime" => (0, 255, 0),
        "aqua" | "cyan" => (0, 255, 255),
        "teal" => (0, 128, 128),
        "navy" => (0, 0, 128),
        "fuchsia" | "magenta" => (255, 0, 255),
        "purple" => (128, 0, 128),
        "orange" => (255, 165, 0),
        _ => return None,
    };
    Some(Rgba8::opaque(r, g, b))
}

#[cfg(test)]
#[path = "../../tests/unit/story/color.rs"]
mod tests;
