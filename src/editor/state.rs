use anyhow::{Context, Result};

use crate::board::Board;
use crate::board::source::SourceBoard;
use crate::types::Vec2;

use super::config::Config;

/// A mouse drag in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub element: String,
    /// Last pointer position, in canvas cells.
    pub last: Vec2,
}

pub struct EditorState {
    pub board: Board,
    pub width: u16,
    pub height: u16,
    pub file_path: String,
    pub config: Config,
    /// Element under the keyboard cursor.
    pub selected: Option<String>,
    /// Elements marked for the next group, in marking order.
    pub marked: Vec<String>,
    pub drag: Option<DragState>,
    pub status_message: Option<String>,
    /// Index into the style palette used by `cycle_style`.
    pub style_cursor: usize,
}

impl EditorState {
    pub fn open(path: &str) -> Result<Self> {
        let json =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
        let source: SourceBoard =
            serde_json::from_str(&json).with_context(|| format!("Failed to parse {path}"))?;
        Self::from_source(&source, path, Config::load())
    }

    pub fn from_source(source: &SourceBoard, path: &str, config: Config) -> Result<Self> {
        let board = Board::from_source(source)
            .with_context(|| format!("Failed to build board from {path}"))?
            .with_policy(config.groups);
        let mut state = EditorState {
            board,
            width: source.width,
            height: source.height,
            file_path: path.to_string(),
            config,
            selected: None,
            marked: Vec::new(),
            drag: None,
            status_message: None,
            style_cursor: 0,
        };
        state.selected = state.selectable().into_iter().next();
        Ok(state)
    }

    /// Ids of point-like elements, sorted, for keyboard cycling.
    pub fn selectable(&self) -> Vec<String> {
        let mut ids: Vec<_> = self
            .board
            .elements()
            .iter()
            .filter(|el| el.kind().is_point_like())
            .map(|el| el.id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Move the keyboard cursor `step` places through `selectable()`.
    pub fn cycle_selection(&mut self, step: isize) {
        let ids = self.selectable();
        if ids.is_empty() {
            self.selected = None;
            return;
        }
        let current = self
            .selected
            .as_ref()
            .and_then(|s| ids.iter().position(|id| id == s))
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(ids.len() as isize) as usize;
        self.selected = Some(ids[next].clone());
    }

    /// The point-like element closest to `cell`, within one cell.
    pub fn element_at(&self, cell: Vec2) -> Option<String> {
        self.board
            .elements()
            .iter()
            .filter(|el| el.kind().is_point_like() && el.visible)
            .map(|el| (el, (el.screen - cell).length()))
            .filter(|(_, d)| *d <= 1.0)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(el, _)| el.id.clone())
    }

    pub fn toggle_mark(&mut self, id: &str) {
        if let Some(pos) = self.marked.iter().position(|m| m == id) {
            self.marked.remove(pos);
        } else {
            self.marked.push(id.to_string());
        }
    }

    /// Members of the selected element's active group, for highlighting.
    pub fn focus_group_members(&self) -> Vec<String> {
        self.selected
            .as_deref()
            .and_then(|id| self.board.active_group(id))
            .map(|g| g.members().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> EditorState {
        let source: SourceBoard = serde_json::from_str(
            r#"{"width": 40, "height": 10, "elements": [
                {"type": "point", "id": "A", "at": [2, 2]},
                {"type": "point", "id": "B", "at": [8, 2]},
                {"type": "text", "id": "T", "at": [2, 3], "text": "hi"}
            ]}"#,
        )
        .unwrap();
        EditorState::from_source(&source, "scene.json", Config::default()).unwrap()
    }

    #[test]
    fn test_selection_cycles_point_like_only() {
        let mut s = state();
        assert_eq!(s.selected.as_deref(), Some("A"));
        s.cycle_selection(1);
        assert_eq!(s.selected.as_deref(), Some("B"));
        s.cycle_selection(1);
        assert_eq!(s.selected.as_deref(), Some("A"));
        s.cycle_selection(-1);
        assert_eq!(s.selected.as_deref(), Some("B"));
    }

    #[test]
    fn test_element_at_picks_nearby_point() {
        let s = state();
        assert_eq!(s.element_at(Vec2::new(8.0, 3.0)).as_deref(), Some("B"));
        assert_eq!(s.element_at(Vec2::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_toggle_mark() {
        let mut s = state();
        s.toggle_mark("A");
        s.toggle_mark("B");
        s.toggle_mark("A");
        assert_eq!(s.marked, vec!["B".to_string()]);
    }
}
