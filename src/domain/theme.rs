use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::domain::color::{GradientPair, HexColor};

/// Light/dark flag, persisted as `"dark"` or `"light"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    const DARK_BASE: HexColor = HexColor::new(0x18, 0x18, 0x20);
    const LIGHT_BASE: HexColor = HexColor::new(0xf4, 0xf4, 0xf6);

    /// Interpret a persisted value. Missing or unknown values mean dark.
    pub fn from_persisted(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or_default()
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_light(self) -> bool {
        self == Theme::Light
    }

    /// The gradient is painted on the page background only in dark mode.
    pub fn paints_background(self) -> bool {
        self == Theme::Dark
    }

    pub fn base(self) -> HexColor {
        match self {
            Theme::Dark => Self::DARK_BASE,
            Theme::Light => Self::LIGHT_BASE,
        }
    }

    /// Foreground color that stays readable over this theme's surfaces.
    pub fn text(self) -> HexColor {
        match self {
            Theme::Dark => HexColor::new(0xf5, 0xf5, 0xf5),
            Theme::Light => HexColor::new(0x22, 0x22, 0x2a),
        }
    }

    fn card_alpha(self) -> u8 {
        match self {
            Theme::Dark => 0xcc,
            Theme::Light => 0x22,
        }
    }

    fn panel_alpha(self) -> u8 {
        0x22
    }
}

/// Accent colors of the surfaces that follow the gradient: the main card
/// and the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceTints {
    pub card: GradientPair,
    pub panel: GradientPair,
}

impl Default for SurfaceTints {
    fn default() -> Self {
        Self::derive(GradientPair::default(), Theme::default())
    }
}

impl SurfaceTints {
    pub fn derive(pair: GradientPair, theme: Theme) -> Self {
        let tint = |alpha: u8| {
            GradientPair::new(
                pair.start().blend_over(theme.base(), alpha),
                pair.end().blend_over(theme.base(), alpha),
            )
        };
        Self {
            card: tint(theme.card_alpha()),
            panel: tint(theme.panel_alpha()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case(None, Theme::Dark)]
    #[case(Some("dark"), Theme::Dark)]
    #[case(Some("light"), Theme::Light)]
    #[case(Some("sepia"), Theme::Dark)]
    #[case(Some(""), Theme::Dark)]
    fn test_from_persisted(#[case] value: Option<&str>, #[case] expected: Theme) {
        assert_eq!(Theme::from_persisted(value), expected);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn test_display_matches_persisted_form() {
        assert_eq!(Theme::Dark.to_string(), "dark");
        assert_eq!(Theme::Light.to_string(), "light");
    }

    #[test]
    fn test_dark_card_is_stronger_than_panel() {
        let pair = GradientPair::default();
        let tints = SurfaceTints::derive(pair, Theme::Dark);
        let base = Theme::Dark.base();

        assert_eq!(tints.card.start(), pair.start().blend_over(base, 0xcc));
        assert_eq!(tints.panel.start(), pair.start().blend_over(base, 0x22));
        assert_ne!(tints.card, tints.panel);
    }

    #[test]
    fn test_light_surfaces_share_low_opacity() {
        let pair = GradientPair::default();
        let tints = SurfaceTints::derive(pair, Theme::Light);
        assert_eq!(tints.card, tints.panel);
        assert!(tints.card.start().luminance() > 0.8);
    }
}
