use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;

/// A card record as supplied by the card-data layer.
///
/// Multi-faced cards carry their faces in `card_faces`; print attributes that a
/// face leaves unset are taken from the parent by [`Card::faces`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub layout: String,
    pub type_line: Option<String>,
    pub mana_cost: Option<String>,
    pub oracle_text: Option<String>,
    pub flavor_text: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub loyalty: Option<String>,
    pub artist: Option<String>,
    pub collector_number: Option<String>,
    pub set: Option<String>,
    pub rarity: Option<String>,
    pub side: Option<Side>,
    #[serde(default)]
    pub card_faces: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Front => "FRONT",
            Side::Back => "BACK",
        }
    }
}

/// Read-only view of one printable face.
///
/// Built once per face; the parent's artist, collector number, set and rarity
/// fill the face's gaps and nothing flows back the other way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceView {
    pub name: String,
    pub type_line: String,
    pub mana_cost: String,
    pub oracle_text: String,
    pub flavor_text: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub loyalty: Option<String>,
    pub artist: Option<String>,
    pub collector_number: Option<String>,
    pub set: Option<String>,
    pub rarity: Option<String>,
    pub side: Option<Side>,
}

impl FaceView {
    /// Types before the em dash, e.g. `["Legendary", "Planeswalker"]`.
    pub fn card_types(&self) -> Vec<&str> {
        card_types(&self.type_line)
    }

    pub fn is_planeswalker(&self) -> bool {
        self.card_types().contains(&"Planeswalker")
    }
}

/// Splits a type line at the em dash and returns the supertypes and types.
pub fn card_types(type_line: &str) -> Vec<&str> {
    type_line
        .split('—')
        .next()
        .unwrap_or_default()
        .split_whitespace()
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Layout classification
// ────────────────────────────────────────────────────────────────────────────

/// Physical layouts the print templates know how to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardLayout {
    Normal,
    Class,
    Saga,
    Leveler,
    Token,
    Emblem,
    ModalDfc,
    Transform,
    Meld,
    DoubleFacedToken,
    Split,
    Flip,
    Adventure,
    ReversibleCard,
}

impl CardLayout {
    pub fn parse(layout: &str) -> Result<Self, LayoutError> {
        let parsed = match layout {
            "normal" | "" => CardLayout::Normal,
            "class" => CardLayout::Class,
            "saga" => CardLayout::Saga,
            "leveler" => CardLayout::Leveler,
            "token" => CardLayout::Token,
            "emblem" => CardLayout::Emblem,
            "modal_dfc" => CardLayout::ModalDfc,
            "transform" => CardLayout::Transform,
            "meld" => CardLayout::Meld,
            "double_faced_token" => CardLayout::DoubleFacedToken,
            "split" => CardLayout::Split,
            "flip" => CardLayout::Flip,
            "adventure" => CardLayout::Adventure,
            "reversible_card" => CardLayout::ReversibleCard,
            other => return Err(LayoutError::UnsupportedLayout(other.to_string())),
        };
        Ok(parsed)
    }

    /// Layouts printed front and back with a modal banner linking the faces.
    pub fn is_double_sided(&self) -> bool {
        matches!(
            self,
            CardLayout::ModalDfc
                | CardLayout::Transform
                | CardLayout::Meld
                | CardLayout::DoubleFacedToken
        )
    }

    /// Label shown at the start of the modal banner.
    pub fn banner_label(&self) -> Option<&'static str> {
        match self {
            CardLayout::ModalDfc => Some("MODAL"),
            CardLayout::Transform => Some("TRANSFORM"),
            CardLayout::Meld => Some("MELD"),
            CardLayout::DoubleFacedToken => Some("FLIP"),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Face inheritance
// ────────────────────────────────────────────────────────────────────────────

impl Card {
    pub fn layout_kind(&self) -> Result<CardLayout, LayoutError> {
        CardLayout::parse(&self.layout)
    }

    /// Returns the printable faces of this card.
    ///
    /// Single-faced cards yield one view of the card itself. For multi-faced
    /// cards each face inherits unset print attributes from this card, and
    /// double-sided layouts tag the faces `front` and `back` in order.
    pub fn faces(&self) -> Result<Vec<FaceView>, LayoutError> {
        if self.card_faces.is_empty() {
            return Ok(vec![self.view(None)?]);
        }

        let double_sided = CardLayout::parse(&self.layout)
            .map(|l| l.is_double_sided())
            .unwrap_or(false);

        self.card_faces
            .iter()
            .enumerate()
            .map(|(i, face)| {
                let side = if double_sided {
                    Some(if i == 0 { Side::Front } else { Side::Back })
                } else {
                    face.side
                };
                let mut view = face.view(Some(self))?;
                view.side = side;
                Ok(view)
            })
            .collect()
    }

    fn view(&self, parent: Option<&Card>) -> Result<FaceView, LayoutError> {
        let inherit = |own: &Option<String>, pick: fn(&Card) -> &Option<String>| {
            own.clone().or_else(|| parent.and_then(|p| pick(p).clone()))
        };

        let type_line = self
            .type_line
            .clone()
            .ok_or(LayoutError::MissingField("type_line"))?;

        Ok(FaceView {
            name: self.name.clone(),
            type_line,
            mana_cost: self.mana_cost.clone().unwrap_or_default(),
            oracle_text: self.oracle_text.clone().unwrap_or_default(),
            flavor_text: self.flavor_text.clone().filter(|f| !f.is_empty()),
            power: self.power.clone(),
            toughness: self.toughness.clone(),
            loyalty: self.loyalty.clone(),
            artist: inherit(&self.artist, |c| &c.artist),
            collector_number: inherit(&self.collector_number, |c| &c.collector_number),
            set: inherit(&self.set, |c| &c.set),
            rarity: inherit(&self.rarity, |c| &c.rarity),
            side: self.side,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_face(name: &str, type_line: &str) -> Card {
        Card {
            name: name.to_string(),
            type_line: Some(type_line.to_string()),
            ..Default::default()
        }
    }

    fn make_transform_card() -> Card {
        let mut front = make_face("Delver of Secrets", "Creature — Human Wizard");
        front.artist = Some("Face Artist".to_string());
        let back = make_face("Insectile Aberration", "Creature — Human Insect");

        Card {
            name: "Delver of Secrets // Insectile Aberration".to_string(),
            layout: "transform".to_string(),
            artist: Some("Parent Artist".to_string()),
            collector_number: Some("51".to_string()),
            set: Some("isd".to_string()),
            rarity: Some("common".to_string()),
            card_faces: vec![front, back],
            ..Default::default()
        }
    }

    // ── faces ───────────────────────────────────────────────────────────────

    #[test]
    fn test_single_faced_card_yields_itself() {
        let mut card = make_face("Ornithopter", "Artifact Creature — Thopter");
        card.layout = "normal".to_string();
        let faces = card.faces().unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].name, "Ornithopter");
        assert_eq!(faces[0].side, None);
    }

    #[test]
    fn test_face_inherits_only_unset_attributes() {
        let faces = make_transform_card().faces().unwrap();
        assert_eq!(faces[0].artist.as_deref(), Some("Face Artist"));
        assert_eq!(faces[1].artist.as_deref(), Some("Parent Artist"));
        assert_eq!(faces[1].collector_number.as_deref(), Some("51"));
        assert_eq!(faces[1].set.as_deref(), Some("isd"));
        assert_eq!(faces[1].rarity.as_deref(), Some("common"));
    }

    #[test]
    fn test_inheritance_does_not_mutate_parent() {
        let card = make_transform_card();
        let _ = card.faces().unwrap();
        assert_eq!(card.card_faces[1].artist, None);
    }

    #[test]
    fn test_double_sided_faces_get_sides() {
        let faces = make_transform_card().faces().unwrap();
        assert_eq!(faces[0].side, Some(Side::Front));
        assert_eq!(faces[1].side, Some(Side::Back));
    }

    #[test]
    fn test_split_faces_have_no_side() {
        let mut card = make_transform_card();
        card.layout = "split".to_string();
        let faces = card.faces().unwrap();
        assert!(faces.iter().all(|f| f.side.is_none()));
    }

    #[test]
    fn test_missing_type_line_is_reported() {
        let card = Card {
            name: "Nameless".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            card.faces(),
            Err(LayoutError::MissingField("type_line"))
        ));
    }

    // ── layout / types ──────────────────────────────────────────────────────

    #[test]
    fn test_parse_unknown_layout_is_unsupported() {
        let err = CardLayout::parse("art_series").unwrap_err();
        assert!(matches!(err, LayoutError::UnsupportedLayout(ref l) if l == "art_series"));
    }

    #[test]
    fn test_banner_labels() {
        assert_eq!(CardLayout::ModalDfc.banner_label(), Some("MODAL"));
        assert_eq!(CardLayout::DoubleFacedToken.banner_label(), Some("FLIP"));
        assert_eq!(CardLayout::Split.banner_label(), None);
    }

    #[test]
    fn test_card_types_stop_at_em_dash() {
        assert_eq!(
            card_types("Legendary Planeswalker — Jace"),
            vec!["Legendary", "Planeswalker"]
        );
        assert_eq!(card_types("Instant"), vec!["Instant"]);
    }

    #[test]
    fn test_card_deserializes_from_scryfall_shape() {
        let json = r#"{
            "name": "Llanowar Elves",
            "layout": "normal",
            "type_line": "Creature — Elf Druid",
            "mana_cost": "{G}",
            "oracle_text": "{T}: Add {G}.",
            "power": "1",
            "toughness": "1",
            "artist": "Chris Rahn",
            "collector_number": "168",
            "set": "m19",
            "rarity": "common"
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.layout_kind().unwrap(), CardLayout::Normal);
        assert!(card.card_faces.is_empty());
        assert_eq!(card.faces().unwrap()[0].oracle_text, "{T}: Add {G}.");
    }
}
