//! JSON persistence for layout sessions.
//!
//! ```json
//! {
//!   "layout": { "cardWidth": 63, "cardHeight": 88, "gap": 4 },
//!   "paper": "letter",
//!   "slots": { "13": "cards/blue-eyes.png" },
//!   "images": ["cards/a.png", "cards/b.png"]
//! }
//! ```
//!
//! `slots` pins images to global indices. `images` are auto-placed after the
//! pinned slots, in order. Paths are stored as written; relative paths are
//! resolved by whichever resource provider the exporter uses.

use crate::error::SessionError;
use cardgrid_layout::LayoutSession;
use cardgrid_traits::ImageReference;
use cardgrid_types::{CardPreset, LayoutConfig, PaperSize, SlotIndex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionFile {
    pub layout: LayoutConfig,
    /// Overrides the paper dimensions of `layout`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper: Option<PaperSize>,
    /// Overrides the card dimensions of `layout`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardPreset>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub slots: BTreeMap<usize, PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<PathBuf>,
}

impl SessionFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    pub fn from_json(source: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SessionError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The layout with the paper and card overrides applied.
    pub fn effective_layout(&self) -> LayoutConfig {
        let mut layout = self.layout;
        if let Some(paper) = self.paper {
            layout.set_paper(paper);
        }
        if let Some(card) = self.card {
            layout.set_card_preset(card);
        }
        layout
    }

    /// Builds a live session: pinned slots first, then auto-placed images.
    pub fn into_session(self) -> LayoutSession {
        let mut session = LayoutSession::with_config(self.effective_layout());
        for (index, path) in self.slots {
            session.assign(SlotIndex::new(index), ImageReference::Path(path));
        }
        session.auto_place_all(self.images.into_iter().map(ImageReference::Path));
        log::debug!(
            "Loaded session with {} images over {} pages",
            session.len(),
            session.max_page_reached() + 1
        );
        session
    }

    /// Captures every path-backed slot of `session`.
    ///
    /// In-memory images have nothing to write to disk and are left out.
    pub fn from_session(session: &LayoutSession) -> Self {
        let mut slots = BTreeMap::new();
        for (index, reference) in session.slots() {
            match reference.as_path() {
                Some(path) => {
                    slots.insert(index.get(), path.to_path_buf());
                }
                None => log::warn!("Slot {} holds an in-memory image and is not saved", index),
            }
        }
        Self {
            layout: *session.config(),
            slots,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let file = SessionFile::from_json(r#"{ "images": ["a.png", "b.png"] }"#).unwrap();
        assert_eq!(file.layout, LayoutConfig::default());
        let session = file.into_session();
        assert_eq!(session.len(), 2);
        assert_eq!(session.get(SlotIndex::new(1)), Some(&ImageReference::path("b.png")));
    }

    #[test]
    fn test_pinned_slots_come_before_auto_placement() {
        let file = SessionFile::from_json(
            r#"{ "slots": { "0": "pinned.png", "13": "late.png" }, "images": ["x.png"] }"#,
        )
        .unwrap();
        let session = file.into_session();
        assert_eq!(session.get(SlotIndex::new(13)), Some(&ImageReference::path("late.png")));
        assert_eq!(session.get(SlotIndex::new(1)), Some(&ImageReference::path("x.png")));
        assert_eq!(session.max_page_reached(), 1);
    }

    #[test]
    fn test_presets_override_layout() {
        let file = SessionFile::from_json(
            r#"{ "layout": { "gap": 2, "paperWidth": 100 }, "paper": "A3", "card": "mtg" }"#,
        )
        .unwrap();
        let layout = file.effective_layout();
        assert_eq!(layout.gap, 2.0);
        assert_eq!((layout.paper_width, layout.paper_height), (297.0, 420.0));
        assert_eq!((layout.card_width, layout.card_height), (63.0, 88.0));
    }

    #[test]
    fn test_from_session_round_trip() {
        let mut session = LayoutSession::with_config(LayoutConfig::default().with_paper(PaperSize::Letter));
        session.assign(SlotIndex::new(4), ImageReference::path("cards/a.png"));
        session.assign(SlotIndex::new(20), ImageReference::path("cards/b.png"));
        session.assign(SlotIndex::new(5), ImageReference::from_bytes("clipboard", vec![1, 2, 3]));

        let file = SessionFile::from_session(&session);
        assert_eq!(file.slots.len(), 2);

        let reloaded = SessionFile::from_json(&file.to_json().unwrap()).unwrap();
        assert_eq!(reloaded, file);
        let restored = reloaded.into_session();
        assert_eq!(restored.get(SlotIndex::new(20)), Some(&ImageReference::path("cards/b.png")));
        assert_eq!(restored.config().paper_width, 215.9);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        assert!(matches!(
            SessionFile::from_json("{ \"slots\": { \"x\": 1 } }"),
            Err(SessionError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SessionFile::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
    }
}
