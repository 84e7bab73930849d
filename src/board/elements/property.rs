use serde_json::{Map, Value};

use crate::error::PropertyError;
use crate::types::Color;

use super::{Element, Shape};

/// Attribute map accepted by `set_property`, e.g. `{"fg": "red", "bold": true}`.
pub type Attributes = Map<String, Value>;

enum Change {
    Fixed(bool),
    Visible(bool),
    Name(String),
    Fg(Option<Color>),
    Bg(Option<Color>),
    Bold(bool),
    Dim(bool),
    Face(char),
}

/// Validate every attribute, then apply them all. An element either takes
/// the whole map or none of it.
pub(super) fn apply(el: &mut Element, attributes: &Attributes) -> Result<(), PropertyError> {
    let changes = attributes
        .iter()
        .map(|(key, value)| parse(key, value))
        .collect::<Result<Vec<_>, _>>()?;
    if changes.iter().any(|c| matches!(c, Change::Face(_))) && !matches!(el.shape, Shape::Point(_)) {
        return Err(PropertyError::UnsupportedOption("face".to_string()));
    }

    for change in changes {
        match change {
            Change::Fixed(v) => el.fixed = v,
            Change::Visible(v) => el.visible = v,
            Change::Name(v) => el.name = v,
            Change::Fg(c) => el.style.fg = c,
            Change::Bg(c) => el.style.bg = c,
            Change::Bold(v) => el.style.bold = v,
            Change::Dim(v) => el.style.dim = v,
            Change::Face(ch) => {
                if let Shape::Point(p) = &mut el.shape {
                    p.face = ch;
                }
            }
        }
    }
    Ok(())
}

fn parse(key: &str, value: &Value) -> Result<Change, PropertyError> {
    match key {
        "fixed" => bool_value(key, value).map(Change::Fixed),
        "visible" => bool_value(key, value).map(Change::Visible),
        "bold" => bool_value(key, value).map(Change::Bold),
        "dim" => bool_value(key, value).map(Change::Dim),
        "name" => value
            .as_str()
            .map(|s| Change::Name(s.to_string()))
            .ok_or_else(|| invalid(key, "a string")),
        "face" => face_value(key, value).map(Change::Face),
        "fg" => color_value(key, value).map(Change::Fg),
        "bg" => color_value(key, value).map(Change::Bg),
        other => Err(PropertyError::UnsupportedOption(other.to_string())),
    }
}

fn bool_value(key: &str, value: &Value) -> Result<bool, PropertyError> {
    value.as_bool().ok_or_else(|| invalid(key, "a boolean"))
}

/// A single character; only points have a face.
fn face_value(key: &str, value: &Value) -> Result<char, PropertyError> {
    let mut chars = value.as_str().map(str::chars).ok_or_else(|| invalid(key, "a single character"))?;
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(invalid(key, "a single character")),
    }
}

/// `null` clears the color.
fn color_value(key: &str, value: &Value) -> Result<Option<Color>, PropertyError> {
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value.clone())
        .map(Some)
        .map_err(|_| invalid(key, "a color name or {r, g, b}"))
}

fn invalid(key: &str, expected: &'static str) -> PropertyError {
    PropertyError::InvalidValue {
        key: key.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::board::elements::{Point, Text};
    use crate::types::{NamedColor, Vec2};

    fn attrs(v: Value) -> Attributes {
        match v {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn point() -> Element {
        Element::new("A", "A", Vec2::ZERO, Shape::Point(Point::default()))
    }

    #[test]
    fn test_applies_style_and_flags() {
        let mut el = point();
        let result = el.set_property(&attrs(json!({
            "fg": "red",
            "bg": {"r": 1, "g": 2, "b": 3},
            "bold": true,
            "visible": false,
            "name": "P"
        })));
        assert_eq!(result, Ok(()));
        assert_eq!(el.style.fg, Some(Color::Named(NamedColor::Red)));
        assert_eq!(el.style.bg, Some(Color::Rgb { r: 1, g: 2, b: 3 }));
        assert!(el.style.bold);
        assert!(!el.visible);
        assert_eq!(el.name, "P");
    }

    #[test]
    fn test_unsupported_option_leaves_element_untouched() {
        let mut el = point();
        let result = el.set_property(&attrs(json!({"bold": true, "opacity": 0.5})));
        assert_eq!(
            result,
            Err(PropertyError::UnsupportedOption("opacity".into()))
        );
        assert!(!el.style.bold);
    }

    #[test]
    fn test_wrong_type_is_invalid_value() {
        let mut el = point();
        let result = el.set_property(&attrs(json!({"fixed": "yes"})));
        assert!(matches!(result, Err(PropertyError::InvalidValue { ref key, .. }) if key == "fixed"));
    }

    #[test]
    fn test_null_clears_color() {
        let mut el = point();
        el.style.fg = Some(Color::Named(NamedColor::Blue));
        assert_eq!(el.set_property(&attrs(json!({"fg": null}))), Ok(()));
        assert_eq!(el.style.fg, None);
    }

    #[test]
    fn test_face_is_point_only() {
        let mut el = point();
        assert_eq!(el.set_property(&attrs(json!({"face": "x"}))), Ok(()));
        assert!(matches!(&el.shape, Shape::Point(p) if p.face == 'x'));

        let mut text = Element::new("T", "T", Vec2::ZERO, Shape::Text(Text::new("hi")));
        assert_eq!(
            text.set_property(&attrs(json!({"face": "x", "bold": true}))),
            Err(PropertyError::UnsupportedOption("face".into()))
        );
        assert!(!text.style.bold);
        assert!(matches!(
            el.set_property(&attrs(json!({"face": "xy"}))),
            Err(PropertyError::InvalidValue { .. })
        ));
    }
}
