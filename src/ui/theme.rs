use ratatui::style::Color;

use crate::domain::air_quality::SeverityTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Basic16,
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub muted_text: Color,
    pub border: Color,
    pub accent: Color,
    pub danger: Color,
    pub pm25: Color,
    pub ozone: Color,
    pub capability: ColorCapability,
}

impl Theme {
    #[must_use]
    pub fn detect() -> Self {
        Self::for_capability(detect_color_capability())
    }

    #[must_use]
    pub fn for_capability(capability: ColorCapability) -> Self {
        Self {
            text: Color::White,
            muted_text: Color::Gray,
            border: Color::DarkGray,
            accent: Color::Cyan,
            danger: Color::LightRed,
            pm25: Color::LightMagenta,
            ozone: Color::LightBlue,
            capability,
        }
    }

    #[must_use]
    pub fn tier_color(&self, tier: SeverityTier) -> Color {
        match self.capability {
            ColorCapability::TrueColor => hex_color(tier.color()).unwrap_or(Color::White),
            ColorCapability::Basic16 => match tier {
                SeverityTier::Good => Color::Green,
                SeverityTier::Moderate => Color::Yellow,
                SeverityTier::UnhealthySensitive => Color::LightRed,
                SeverityTier::Unhealthy => Color::Red,
                SeverityTier::VeryUnhealthy => Color::Magenta,
                SeverityTier::Hazardous => Color::LightMagenta,
            },
        }
    }
}

pub fn detect_color_capability() -> ColorCapability {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorCapability::Basic16;
    }

    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        ColorCapability::TrueColor
    } else {
        ColorCapability::Basic16
    }
}

/// Parses `#rrggbb`.
#[must_use]
pub fn hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_parses_tier_palette() {
        for tier in SeverityTier::ALL {
            assert!(hex_color(tier.color()).is_some(), "{tier:?}");
        }
        assert_eq!(hex_color("#00e400"), Some(Color::Rgb(0, 228, 0)));
        assert_eq!(hex_color("00e400"), None);
        assert_eq!(hex_color("#zzzzzz"), None);
    }

    #[test]
    fn basic_palette_distinguishes_tiers() {
        let theme = Theme::for_capability(ColorCapability::Basic16);
        assert_eq!(theme.tier_color(SeverityTier::Good), Color::Green);
        assert_eq!(theme.tier_color(SeverityTier::Unhealthy), Color::Red);
    }
}
