use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use serde_json::{Map, Value};

use crate::types::{NamedColor, Vec2};

use super::config::matches_binding;
use super::state::{DragState, EditorState};
use super::ui::CANVAS_OFFSET;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Continue,
    Redraw,
    Quit,
}

pub fn handle_event(state: &mut EditorState, event: Event) -> Action {
    match event {
        Event::Key(key) => handle_key(state, key),
        Event::Mouse(mouse) => handle_mouse(state, mouse),
        Event::Resize(_, _) => Action::Redraw,
        _ => Action::Continue,
    }
}

fn handle_key(state: &mut EditorState, key: KeyEvent) -> Action {
    let bindings = state.config.key_bindings.clone();

    if matches_binding(&bindings.quit, &key) {
        return Action::Quit;
    }
    if matches_binding(&bindings.next_element, &key) {
        state.cycle_selection(1);
        state.status_message = None;
        return Action::Redraw;
    }
    if matches_binding(&bindings.prev_element, &key) {
        state.cycle_selection(-1);
        state.status_message = None;
        return Action::Redraw;
    }
    if matches_binding(&bindings.cancel, &key) {
        state.marked.clear();
        state.drag = None;
        state.status_message = None;
        return Action::Redraw;
    }

    let nudges = [
        (&bindings.nudge_left, Vec2::new(-1.0, 0.0)),
        (&bindings.nudge_right, Vec2::new(1.0, 0.0)),
        (&bindings.nudge_up, Vec2::new(0.0, -1.0)),
        (&bindings.nudge_down, Vec2::new(0.0, 1.0)),
    ];
    for (binding, delta) in nudges {
        if matches_binding(binding, &key) {
            if let Some(id) = state.selected.clone() {
                drag_by(state, &id, delta);
            }
            return Action::Redraw;
        }
    }

    let Some(selected) = state.selected.clone() else {
        return Action::Continue;
    };

    if matches_binding(&bindings.mark, &key) {
        state.toggle_mark(&selected);
        state.status_message = Some(format!("{} marked", state.marked.len()));
        return Action::Redraw;
    }
    if matches_binding(&bindings.group_marked, &key) {
        group_marked(state);
        return Action::Redraw;
    }
    if matches_binding(&bindings.ungroup, &key) {
        ungroup_selected(state, &selected);
        return Action::Redraw;
    }
    if matches_binding(&bindings.toggle_fixed, &key) {
        toggle_fixed(state, &selected);
        return Action::Redraw;
    }
    if matches_binding(&bindings.cycle_style, &key) {
        cycle_group_style(state, &selected);
        return Action::Redraw;
    }
    Action::Continue
}

fn handle_mouse(state: &mut EditorState, mouse: MouseEvent) -> Action {
    // Pointer position in canvas cells; the menu bar sits above the canvas.
    let Some(row) = mouse.row.checked_sub(CANVAS_OFFSET) else {
        return Action::Continue;
    };
    let cell = Vec2::new(f64::from(mouse.column), f64::from(row));

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(id) = state.element_at(cell) else {
                return Action::Continue;
            };
            state.selected = Some(id.clone());
            state.drag = Some(DragState { element: id, last: cell });
            Action::Redraw
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(drag) = state.drag.clone() else {
                return Action::Continue;
            };
            let delta = cell - drag.last;
            if delta.is_zero() {
                return Action::Continue;
            }
            drag_by(state, &drag.element, delta);
            if let Some(d) = state.drag.as_mut() {
                d.last = cell;
            }
            Action::Redraw
        }
        MouseEventKind::Up(MouseButton::Left) => {
            state.drag = None;
            Action::Continue
        }
        _ => Action::Continue,
    }
}

fn drag_by(state: &mut EditorState, id: &str, delta: Vec2) {
    if let Err(e) = state.board.drag(id, delta) {
        state.status_message = Some(format!("Drag failed: {e}"));
    }
}

fn group_marked(state: &mut EditorState) {
    if state.marked.is_empty() {
        state.status_message = Some("Nothing marked".into());
        return;
    }
    let seeds = std::mem::take(&mut state.marked);
    state.status_message = Some(match state.board.create_group(None, None, &seeds) {
        Ok(id) => {
            let len = state.board.group(&id).map_or(0, |g| g.len());
            format!("Created {id} with {len} member(s)")
        }
        Err(e) => format!("Group failed: {e}"),
    });
}

fn ungroup_selected(state: &mut EditorState, selected: &str) {
    let Some(group_id) = state.board.active_group(selected).map(|g| g.id.clone()) else {
        state.status_message = Some(format!("{selected} is not grouped"));
        return;
    };
    state.status_message = Some(match state.board.ungroup(&group_id) {
        Ok(()) => format!("Ungrouped {group_id}"),
        Err(e) => format!("Ungroup failed: {e}"),
    });
}

fn toggle_fixed(state: &mut EditorState, selected: &str) {
    let Some(el) = state.board.element_mut(selected) else {
        return;
    };
    let mut attributes = Map::new();
    attributes.insert("fixed".into(), Value::Bool(!el.fixed));
    state.status_message = Some(match el.set_property(&attributes) {
        Ok(()) if el.fixed => format!("{selected} fixed"),
        Ok(()) => format!("{selected} free"),
        Err(e) => format!("{selected}: {e}"),
    });
}

/// Paint the selected element's active group with the next palette color.
fn cycle_group_style(state: &mut EditorState, selected: &str) {
    let Some(group_id) = state.board.active_group(selected).map(|g| g.id.clone()) else {
        state.status_message = Some(format!("{selected} is not grouped"));
        return;
    };
    state.style_cursor = (state.style_cursor + 1) % NamedColor::ALL.len();
    let color = NamedColor::ALL[state.style_cursor];

    let mut attributes = Map::new();
    attributes.insert("fg".into(), serde_json::to_value(color).unwrap_or(Value::Null));
    state.status_message = Some(match state.board.set_group_property(&group_id, &attributes) {
        Ok(()) => format!("Styled {group_id}"),
        Err(e) => format!("Style failed: {e}"),
    });
}
