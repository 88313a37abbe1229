use std::{collections::HashMap, str::FromStr};

use derive_deref::{Deref, DerefMut};
use ratatui::style::{Color, Modifier, Style};
use serde::{de::Error as _, Deserialize, Deserializer};

/// Named styles used by the dashboard widgets, e.g. `"clock"` or `"hint"`
#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct Styles(pub HashMap<String, Style>);

impl<'de> Deserialize<'de> for Styles {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed_map = HashMap::<String, String>::deserialize(deserializer)?;

        let styles = parsed_map
            .into_iter()
            .map(|(name, raw)| {
                parse_style(&raw)
                    .map(|style| (name, style))
                    .map_err(D::Error::custom)
            })
            .collect::<Result<_, _>>()?;

        Ok(Styles(styles))
    }
}

impl Styles {
    /// Style registered under `name`, or the empty style.
    pub fn get_or_default(&self, name: &str) -> Style {
        self.get(name).copied().unwrap_or_default()
    }
}

/// Parse a whitespace separated style description such as
/// `bold fg:lightgreen bg:#202020`.
pub fn parse_style(line: &str) -> Result<Style, String> {
    let mut style = Style::default();
    for word in line.split_whitespace() {
        let lower = word.to_ascii_lowercase();
        if let Some(color) = lower.strip_prefix("fg:") {
            style = style.fg(parse_color(color)?);
        } else if let Some(color) = lower.strip_prefix("bg:") {
            style = style.bg(parse_color(color)?);
        } else {
            style = style.add_modifier(parse_modifier(&lower)?);
        }
    }
    Ok(style)
}

fn parse_modifier(word: &str) -> Result<Modifier, String> {
    match word {
        "bold" => Ok(Modifier::BOLD),
        "dim" => Ok(Modifier::DIM),
        "italic" => Ok(Modifier::ITALIC),
        "underline" | "underlined" => Ok(Modifier::UNDERLINED),
        "blink" => Ok(Modifier::SLOW_BLINK),
        "reverse" | "reversed" => Ok(Modifier::REVERSED),
        "hidden" => Ok(Modifier::HIDDEN),
        "crossed" | "crossed_out" => Ok(Modifier::CROSSED_OUT),
        _ => Err(format!("Unknown style modifier `{word}`")),
    }
}

fn parse_color(s: &str) -> Result<Color, String> {
    Color::from_str(s).map_err(|_| format!("Unknown color `{s}`"))
}
