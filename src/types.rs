//! Shared primitives for the board and its groups.
//!
//! - Geometry: `Vec2` and the `CoordSystem` mapping screen space to user space
//! - Style: the attributes a group can broadcast to its members

use std::ops::{Add, AddAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn scale(self, k: f64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Maps between screen space (device cells, y pointing down) and user space
/// (board units, y pointing up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordSystem {
    /// Screen position of the user-space origin.
    pub origin: Vec2,
    /// Screen units per user unit along x.
    #[serde(default = "default_unit")]
    pub unit_x: f64,
    /// Screen units per user unit along y.
    #[serde(default = "default_unit")]
    pub unit_y: f64,
}

fn default_unit() -> f64 {
    1.0
}

impl Default for CoordSystem {
    fn default() -> Self {
        CoordSystem {
            origin: Vec2::ZERO,
            unit_x: 1.0,
            unit_y: 1.0,
        }
    }
}

impl CoordSystem {
    pub fn to_user(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            (screen.x - self.origin.x) / self.unit_x,
            (self.origin.y - screen.y) / self.unit_y,
        )
    }

    pub fn to_screen(&self, user: Vec2) -> Vec2 {
        Vec2::new(
            self.origin.x + user.x * self.unit_x,
            self.origin.y - user.y * self.unit_y,
        )
    }
}

// ---------------------------------------------------------------------------
// Style primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(NamedColor),
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl NamedColor {
    pub const ALL: [NamedColor; 8] = [
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Yellow,
        NamedColor::Blue,
        NamedColor::Magenta,
        NamedColor::Cyan,
        NamedColor::White,
    ];
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<Color>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dim: bool,
}

impl Style {
    pub fn is_default(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && !self.bold && !self.dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_system_round_trip_flips_y() {
        let cs = CoordSystem {
            origin: Vec2::new(40.0, 12.0),
            unit_x: 4.0,
            unit_y: 2.0,
        };
        let user = cs.to_user(Vec2::new(48.0, 8.0));
        assert_eq!(user, Vec2::new(2.0, 2.0));
        assert_eq!(cs.to_screen(user), Vec2::new(48.0, 8.0));
    }

    #[test]
    fn test_vec2_arithmetic() {
        let mut v = Vec2::new(1.0, 2.0);
        v += Vec2::new(0.5, -2.0);
        assert_eq!(v, Vec2::new(1.5, 0.0));
        assert_eq!(v - Vec2::new(1.5, 0.0), Vec2::ZERO);
        assert!((Vec2::new(3.0, 4.0).length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_style_default_detection() {
        assert!(Style::default().is_default());
        let s = Style {
            bold: true,
            ..Default::default()
        };
        assert!(!s.is_default());
    }
}
