//! Color parsing and arithmetic for animation rendering.

/// A fully resolved RGBA color.
///
/// Channels are 0-255 integers; alpha is a 0.0-1.0 float, matching the
/// precision the layered gradient rendering works in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha, clamped to 0.0-1.0.
    pub a: f32,
}

impl Rgba {
    /// Fallback color for unrecognized input.
    pub const FALLBACK: Self = Self::new(0, 115, 170, 1.0);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);

    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 1.0);

    /// Create a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a color specification. Total: unrecognized input yields
    /// [`Rgba::FALLBACK`], never an error.
    ///
    /// Recognized grammars, tried in order: `transparent`,
    /// `rgb()`/`rgba()`, 8-digit hex (`#RRGGBBAA`), 6-digit hex
    /// (`#RRGGBB`). The leading `#` is optional and matching is
    /// case-insensitive and whitespace-tolerant.
    pub fn parse(input: &str) -> Self {
        let color = input.trim();
        if color.eq_ignore_ascii_case("transparent") {
            return Self::TRANSPARENT;
        }
        if let Some(parsed) = parse_rgb_func(color) {
            return parsed;
        }
        let hex = color.strip_prefix('#').unwrap_or(color);
        match hex.len() {
            8 => parse_hex(hex, true).unwrap_or(Self::FALLBACK),
            6 => parse_hex(hex, false).unwrap_or(Self::FALLBACK),
            _ => Self::FALLBACK,
        }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// Add a signed offset to every channel, clamped to 0-255.
    pub fn shift(self, delta: i16) -> Self {
        let apply = |c: u8| (c as i16 + delta).clamp(0, 255) as u8;
        Self { r: apply(self.r), g: apply(self.g), b: apply(self.b), a: self.a }
    }

    /// Linear blend of the RGB channels toward `other` (`t` = 0 keeps
    /// self, `t` = 1 yields `other`). Alpha is kept from self.
    pub fn mix(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
            a: self.a,
        }
    }
}

/// Parse `rgb(r, g, b)` / `rgba(r, g, b, a)`. Returns `None` when the
/// input is not in functional notation at all; malformed component lists
/// inside the parentheses fall back like any other unrecognized input.
fn parse_rgb_func(color: &str) -> Option<Rgba> {
    let rest = strip_prefix_ignore_case(color, "rgba")
        .or_else(|| strip_prefix_ignore_case(color, "rgb"))?;
    let body = rest.trim().strip_prefix('(')?.strip_suffix(')')?;

    let mut parts = body.split(',').map(str::trim);
    let r = channel(parts.next())?;
    let g = channel(parts.next())?;
    let b = channel(parts.next())?;
    let a = match parts.next() {
        Some(raw) => raw.parse::<f32>().ok().map(|a| a.clamp(0.0, 1.0))?,
        None => 1.0,
    };
    if parts.next().is_some() {
        return Some(Rgba::FALLBACK);
    }
    Some(Rgba::new(r, g, b, a))
}

/// Parse one 0-255 channel, clamping values above 255.
fn channel(part: Option<&str>) -> Option<u8> {
    let value: u32 = part?.parse().ok()?;
    Some(value.min(255) as u8)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

fn parse_hex(hex: &str, with_alpha: bool) -> Option<Rgba> {
    let byte = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    let r = byte(0..2)?;
    let g = byte(2..4)?;
    let b = byte(4..6)?;
    let a = if with_alpha { byte(6..8)? as f32 / 255.0 } else { 1.0 };
    Some(Rgba::new(r, g, b, a))
}
