//! Millimeter-based layout configuration and the paper/card presets.

use crate::geometry::Size;
use serde::{de, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Card, spacing, margin and paper dimensions, all in millimeters.
///
/// Values are never validated. Degenerate or overflowing configurations
/// produce a visually broken layout, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub card_width: f32,
    pub card_height: f32,
    pub gap: f32,
    pub margin_top: f32,
    pub margin_left: f32,
    pub paper_width: f32,
    pub paper_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let card = CardPreset::Ygo.size();
        let paper = PaperSize::A4.dimensions_mm();
        Self {
            card_width: card.width,
            card_height: card.height,
            gap: 4.0,
            margin_top: 15.0,
            margin_left: 12.0,
            paper_width: paper.width,
            paper_height: paper.height,
        }
    }
}

impl LayoutConfig {
    pub fn card_size(&self) -> Size {
        Size::new(self.card_width, self.card_height)
    }

    pub fn paper_size(&self) -> Size {
        Size::new(self.paper_width, self.paper_height)
    }

    pub fn with_card_preset(mut self, preset: CardPreset) -> Self {
        self.set_card_preset(preset);
        self
    }

    pub fn with_paper(mut self, paper: PaperSize) -> Self {
        self.set_paper(paper);
        self
    }

    pub fn set_card_preset(&mut self, preset: CardPreset) {
        let size = preset.size();
        self.card_width = size.width;
        self.card_height = size.height;
    }

    pub fn set_paper(&mut self, paper: PaperSize) {
        let size = paper.dimensions_mm();
        self.paper_width = size.width;
        self.paper_height = size.height;
    }
}

/// Paper sizes offered by the layout, in portrait orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PaperSize {
    #[default]
    A4,
    A3,
    Letter,
    Custom { width: f32, height: f32 },
}

impl PaperSize {
    pub fn dimensions_mm(&self) -> Size {
        match self {
            PaperSize::A4 => Size::new(210.0, 297.0),
            PaperSize::A3 => Size::new(297.0, 420.0),
            PaperSize::Letter => Size::new(215.9, 279.4),
            PaperSize::Custom { width, height } => Size::new(*width, *height),
        }
    }

    /// Parses a named size (`A4`, `a3`, `letter`) or `<width>x<height>` in millimeters.
    pub fn parse(s: &str) -> Result<Self, String> {
        let value = s.trim();
        match value.to_ascii_lowercase().as_str() {
            "a4" => Ok(PaperSize::A4),
            "a3" => Ok(PaperSize::A3),
            "letter" => Ok(PaperSize::Letter),
            other => {
                let (w, h) = other
                    .split_once('x')
                    .ok_or_else(|| format!("Unknown paper size: '{}'", value))?;
                let width = w.trim().parse::<f32>().map_err(|e| format!("Invalid paper width '{}': {}", w, e))?;
                let height = h.trim().parse::<f32>().map_err(|e| format!("Invalid paper height '{}': {}", h, e))?;
                Ok(PaperSize::Custom { width, height })
            }
        }
    }
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaperSize::A4 => f.write_str("A4"),
            PaperSize::A3 => f.write_str("A3"),
            PaperSize::Letter => f.write_str("Letter"),
            PaperSize::Custom { width, height } => write!(f, "{}x{}", width, height),
        }
    }
}

impl Serialize for PaperSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PaperSize::Custom { width, height } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("width", width)?;
                map.serialize_entry("height", height)?;
                map.end()
            }
            named => serializer.serialize_str(&named.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for PaperSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PaperSizeDef {
            Str(String),
            Map { width: f32, height: f32 },
        }

        match PaperSizeDef::deserialize(deserializer)? {
            PaperSizeDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            PaperSizeDef::Map { width, height } => Ok(PaperSize::Custom { width, height }),
        }
    }
}

/// Common trading card formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardPreset {
    /// Vanguard / Yu-Gi-Oh!, 59 x 86 mm.
    Ygo,
    /// Pokemon / Magic: The Gathering, 63 x 88 mm.
    Mtg,
}

impl CardPreset {
    pub const ALL: [CardPreset; 2] = [CardPreset::Ygo, CardPreset::Mtg];

    pub fn size(self) -> Size {
        match self {
            CardPreset::Ygo => Size::new(59.0, 86.0),
            CardPreset::Mtg => Size::new(63.0, 88.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CardPreset::Ygo => "Vanguard/YGO (59x86)",
            CardPreset::Mtg => "Pokemon/MTG (63x88)",
        }
    }
}

impl FromStr for CardPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ygo" | "yugioh" | "vanguard" => Ok(CardPreset::Ygo),
            "mtg" | "magic" | "pokemon" => Ok(CardPreset::Mtg),
            other => Err(format!("Unknown card preset: '{}'", other)),
        }
    }
}
