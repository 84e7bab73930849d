//! Board description — the human-authored scene format.
//!
//! Lists the elements that exist and the groups they start in. `Board::from_source`
//! replays it through the regular construction API, so a loaded board is
//! indistinguishable from one built in code.

use serde::Deserialize;

use crate::error::Result;
use crate::group::{GroupAttributes, create_group};
use crate::types::{CoordSystem, Style, Vec2};

use super::Board;

#[derive(Debug, Clone, Deserialize)]
pub struct SourceBoard {
    #[serde(default = "default_board_id")]
    pub id: String,
    pub width: u16,
    pub height: u16,
    #[serde(default)]
    pub coords: CoordSystem,
    pub elements: Vec<SourceElement>,
    #[serde(default)]
    pub groups: Vec<SourceGroup>,
}

fn default_board_id() -> String {
    "board".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceElement {
    Point {
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(deserialize_with = "deserialize_vec2_compat")]
        at: Vec2,
        #[serde(default)]
        fixed: bool,
        #[serde(default)]
        style: Style,
    },
    Glider {
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(deserialize_with = "deserialize_vec2_compat")]
        at: Vec2,
        on: String,
        #[serde(default)]
        fixed: bool,
        #[serde(default)]
        style: Style,
    },
    Segment {
        id: String,
        #[serde(default)]
        name: Option<String>,
        from: String,
        to: String,
        #[serde(default)]
        style: Style,
    },
    Circle {
        id: String,
        #[serde(default)]
        name: Option<String>,
        center: String,
        radius: f64,
        #[serde(default)]
        style: Style,
    },
    Text {
        #[serde(default)]
        id: Option<String>,
        #[serde(deserialize_with = "deserialize_vec2_compat")]
        at: Vec2,
        text: String,
        #[serde(default)]
        style: Style,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceGroup {
    #[serde(flatten)]
    pub attributes: GroupAttributes,
    pub members: Vec<String>,
}

/// Serde deserializer that accepts either `[x, y]` or `{"x": .., "y": ..}`.
pub fn deserialize_vec2_compat<'de, D>(d: D) -> Result<Vec2, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, MapAccess, SeqAccess, Visitor};
    use std::fmt;

    struct Vec2Visitor;

    impl<'de> Visitor<'de> for Vec2Visitor {
        type Value = Vec2;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an [x, y] pair or an {x, y} object")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec2, A::Error> {
            let x = seq.next_element()?.ok_or_else(|| A::Error::invalid_length(0, &self))?;
            let y = seq.next_element()?.ok_or_else(|| A::Error::invalid_length(1, &self))?;
            Ok(Vec2::new(x, y))
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Vec2, A::Error> {
            Vec2::deserialize(serde::de::value::MapAccessDeserializer::new(map))
        }
    }

    d.deserialize_any(Vec2Visitor)
}

impl Board {
    /// Build a board from its description. Elements are created in order,
    /// so segments, circles and gliders must come after what they refer to.
    pub fn from_source(source: &SourceBoard) -> Result<Board> {
        let mut board = Board::new(source.id.clone(), source.coords);

        for element in &source.elements {
            let (id, fixed, style) = match element {
                SourceElement::Point { id, name, at, fixed, style } => {
                    (board.add_point(Some(id.as_str()), name.as_deref(), *at)?, *fixed, style)
                }
                SourceElement::Glider { id, name, at, on, fixed, style } => (
                    board.add_glider(Some(id.as_str()), name.as_deref(), *at, on)?,
                    *fixed,
                    style,
                ),
                SourceElement::Segment { id, name, from, to, style } => {
                    (board.add_segment(Some(id.as_str()), name.as_deref(), from, to)?, false, style)
                }
                SourceElement::Circle { id, name, center, radius, style } => (
                    board.add_circle(Some(id.as_str()), name.as_deref(), center, *radius)?,
                    false,
                    style,
                ),
                SourceElement::Text { id, at, text, style } => {
                    (board.add_text(id.as_deref(), *at, text)?, false, style)
                }
            };
            if let Some(el) = board.element_mut(&id) {
                el.fixed = fixed;
                el.style = style.clone();
            }
        }

        for group in &source.groups {
            create_group(&mut board, &group.members, &group.attributes)?;
        }

        log::debug!(
            "loaded board `{}`: {} element(s), {} group(s)",
            board.id,
            source.elements.len(),
            source.groups.len()
        );
        Ok(board)
    }
}
