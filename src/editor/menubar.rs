use std::io;

use crossterm::{cursor, queue, style, terminal};

use super::state::EditorState;
use super::ui::Layout;

fn menu_items(state: &EditorState) -> Vec<&'static str> {
    let mut items = vec!["[drag] move", "[Tab] select", "[←→↑↓] nudge", "[Space] mark"];
    if !state.marked.is_empty() {
        items.push("[g]roup");
    }
    items.extend(["[u]ngroup", "[f]ix", "[c]olor group", "[Esc] clear", "[q]uit"]);
    items
}

pub fn render_menubar(stdout: &mut io::Stdout, layout: &Layout, state: &EditorState) -> anyhow::Result<()> {
    queue!(
        stdout,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(" "),
    )?;

    let mut x: u16 = 1;
    for (i, item) in menu_items(state).iter().enumerate() {
        let item_w = item.chars().count() as u16;
        let sep = if i > 0 { 2 } else { 0 };
        if x + sep + item_w > layout.term_width {
            break;
        }
        if sep > 0 {
            queue!(stdout, style::Print("  "))?;
        }
        print_menu_item(stdout, item)?;
        x += sep + item_w;
    }
    Ok(())
}

/// Bottom line: the selected element, its group stack, and the last message.
pub fn render_status(stdout: &mut io::Stdout, layout: &Layout, state: &EditorState) -> anyhow::Result<()> {
    queue!(
        stdout,
        cursor::MoveTo(0, layout.status_y),
        terminal::Clear(terminal::ClearType::CurrentLine),
    )?;

    let mut line = match state.selected.as_deref().and_then(|id| state.board.element(id)) {
        Some(el) => {
            let stack: Vec<&str> = el.groups.iter().collect();
            format!(
                " {} ({:.1}, {:.1}){} groups: [{}]",
                el.name,
                el.user.x,
                el.user.y,
                if el.fixed { " fixed" } else { "" },
                stack.join(" > "),
            )
        }
        None => " (nothing selected)".to_string(),
    };
    if let Some(msg) = &state.status_message {
        line.push_str("  | ");
        line.push_str(msg);
    }
    let visible: String = line.chars().take(layout.term_width as usize).collect();
    queue!(
        stdout,
        style::SetAttribute(style::Attribute::Reverse),
        style::Print(visible),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    Ok(())
}

/// Print a menu item string, bolding any text inside `[...]` brackets.
/// Text outside brackets is printed dim.
pub fn print_menu_item(stdout: &mut io::Stdout, item: &str) -> anyhow::Result<()> {
    let mut rest = item;
    while !rest.is_empty() {
        if let Some(open) = rest.find('[') {
            if open > 0 {
                queue!(
                    stdout,
                    style::SetAttribute(style::Attribute::Dim),
                    style::Print(&rest[..open]),
                    style::SetAttribute(style::Attribute::Reset),
                )?;
            }
            rest = &rest[open..];
            if let Some(close) = rest.find(']') {
                queue!(
                    stdout,
                    style::SetAttribute(style::Attribute::Bold),
                    style::Print(&rest[..=close]),
                    style::SetAttribute(style::Attribute::Reset),
                )?;
                rest = &rest[close + 1..];
            } else {
                queue!(stdout, style::Print(rest))?;
                break;
            }
        } else {
            queue!(
                stdout,
                style::SetAttribute(style::Attribute::Dim),
                style::Print(rest),
                style::SetAttribute(style::Attribute::Reset),
            )?;
            break;
        }
    }
    Ok(())
}
