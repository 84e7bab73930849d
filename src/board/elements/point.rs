use serde::{Deserialize, Serialize};

/// A free point. Its position is whatever the board or a group sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default = "default_face")]
    pub face: char,
}

fn default_face() -> char {
    'o'
}

impl Default for Point {
    fn default() -> Self {
        Point { face: default_face() }
    }
}
