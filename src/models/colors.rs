use serde::{Deserialize, Serialize};

/// An RGB color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RgbColor {
    /// The red component of the color, from 0.0 to 1.0.
    pub red: Option<f32>,
    /// The green component of the color, from 0.0 to 1.0.
    pub green: Option<f32>,
    /// The blue component of the color, from 0.0 to 1.0.
    pub blue: Option<f32>,
}

impl RgbColor {
    /// Parses `#RRGGBB` or `RRGGBB`. Returns `None` for anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .ok()
                .map(|v| f32::from(v) / 255.0)
        };
        Some(Self {
            red: Some(channel(0..2)?),
            green: Some(channel(2..4)?),
            blue: Some(channel(4..6)?),
        })
    }

    pub fn to_hex(&self) -> String {
        let r = (self.red.unwrap_or(0.0) * 255.0).round() as u8;
        let g = (self.green.unwrap_or(0.0) * 255.0).round() as u8;
        let b = (self.blue.unwrap_or(0.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Theme color types. Only the ones the layout engine can emit are listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThemeColorType {
    ThemeColorTypeUnspecified,
    Dark1,
    Light1,
    Accent1,
    Hyperlink,
    Text1,
}

/// A themeable solid color value. Contains either an RGB color or a theme color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpaqueColorContent {
    /// An opaque RGB color.
    RgbColor(RgbColor),
    /// An opaque theme color.
    ThemeColor(ThemeColorType),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueColor {
    #[serde(flatten)]
    pub color_kind: OpaqueColorContent,
}

/// A color that can either be fully opaque or fully transparent.
/// If opaque, the `opaque_color` field is set. If transparent, the field is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalColor {
    pub opaque_color: Option<OpaqueColor>,
}

impl OptionalColor {
    pub fn rgb(color: RgbColor) -> Self {
        Self {
            opaque_color: Some(OpaqueColor {
                color_kind: OpaqueColorContent::RgbColor(color),
            }),
        }
    }

    /// The RGB value if this is an opaque RGB color.
    pub fn as_rgb(&self) -> Option<&RgbColor> {
        match self.opaque_color.as_ref().map(|c| &c.color_kind) {
            Some(OpaqueColorContent::RgbColor(rgb)) => Some(rgb),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_with_or_without_hash() {
        let a = RgbColor::from_hex("#FF8000").unwrap();
        let b = RgbColor::from_hex("ff8000").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_hex(), "#ff8000");
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(RgbColor::from_hex("#fff").is_none());
        assert!(RgbColor::from_hex("zzzzzz").is_none());
        assert!(RgbColor::from_hex("").is_none());
    }
}
