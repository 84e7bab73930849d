use std::io;

use crossterm::{cursor, queue, style};

use crate::board::elements::{Element, ElementStore, Shape};
use crate::types::{Color, NamedColor, Style, Vec2};

use super::state::EditorState;
use super::ui::Layout;

/// One character to paint, in canvas cells. Later cells win on overlap.
struct Glyph {
    x: i64,
    y: i64,
    ch: char,
    style: Style,
}

/// Draw every visible element, then highlight the selection and the
/// selected element's active group.
pub fn render_canvas(stdout: &mut io::Stdout, layout: &Layout, state: &EditorState) -> anyhow::Result<()> {
    for y in 0..layout.canvas_height {
        queue!(
            stdout,
            cursor::MoveTo(0, layout.canvas_y + y),
            style::Print(" ".repeat(layout.canvas_width as usize)),
        )?;
    }

    let focus = state.focus_group_members();
    let store = state.board.elements();

    // Curves first so points paint over them.
    let mut elements: Vec<&Element> = store.iter().filter(|el| el.visible).collect();
    elements.sort_by_key(|el| (el.kind().is_point_like(), el.id.clone()));

    let mut glyphs = Vec::new();
    for el in elements {
        let mut style = el.style.clone();
        if focus.iter().any(|m| *m == el.id) {
            style.bold = true;
        }
        if state.marked.iter().any(|m| *m == el.id) {
            style.bg = Some(Color::Named(NamedColor::Blue));
        }
        if state.selected.as_deref() == Some(el.id.as_str()) {
            style.fg = Some(Color::Named(NamedColor::Yellow));
            style.bold = true;
        }
        glyphs_for(el, store, style, &mut glyphs);
    }

    for g in glyphs {
        if !layout.contains(g.x, g.y) {
            continue;
        }
        queue!(
            stdout,
            cursor::MoveTo(g.x as u16, layout.canvas_y + g.y as u16),
            style::PrintStyledContent(style::StyledContent::new(to_content_style(&g.style), g.ch)),
        )?;
    }
    Ok(())
}

fn cell(v: Vec2) -> (i64, i64) {
    (v.x.round() as i64, v.y.round() as i64)
}

fn glyphs_for(el: &Element, store: &ElementStore, style: Style, out: &mut Vec<Glyph>) {
    match &el.shape {
        Shape::Point(p) => {
            let (x, y) = cell(el.screen);
            out.push(Glyph { x, y, ch: p.face, style });
        }
        Shape::Glider(_) => {
            let (x, y) = cell(el.screen);
            out.push(Glyph { x, y, ch: '●', style });
        }
        Shape::Segment(s) => {
            if let Some((a, b)) = s.endpoints(store) {
                let steps = (b - a).length().ceil().max(1.0) as usize;
                for i in 0..=steps {
                    let (x, y) = cell(a + (b - a).scale(i as f64 / steps as f64));
                    out.push(Glyph { x, y, ch: '·', style: style.clone() });
                }
            }
        }
        Shape::Circle(c) => {
            if let Some(center) = c.center(store) {
                let steps = (c.radius * std::f64::consts::TAU).ceil().max(8.0) as usize;
                for i in 0..steps {
                    let t = i as f64 / steps as f64 * std::f64::consts::TAU;
                    let (x, y) = cell(center + Vec2::new(t.cos(), t.sin()).scale(c.radius));
                    out.push(Glyph { x, y, ch: '∘', style: style.clone() });
                }
            }
        }
        Shape::Text(t) => {
            let (x, y) = cell(el.screen);
            for (i, ch) in t.text.chars().enumerate() {
                out.push(Glyph { x: x + i as i64, y, ch, style: style.clone() });
            }
        }
    }
}

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    if let Some(fg) = &s.fg {
        cs.foreground_color = Some(to_ct_color(fg));
    }
    if let Some(bg) = &s.bg {
        cs.background_color = Some(to_ct_color(bg));
    }
    if s.bold {
        cs.attributes.set(style::Attribute::Bold);
    }
    if s.dim {
        cs.attributes.set(style::Attribute::Dim);
    }
    cs
}

pub fn to_ct_color(c: &Color) -> style::Color {
    match c {
        Color::Named(n) => match n {
            NamedColor::Black => style::Color::Black,
            NamedColor::Red => style::Color::Red,
            NamedColor::Green => style::Color::Green,
            NamedColor::Yellow => style::Color::Yellow,
            NamedColor::Blue => style::Color::Blue,
            NamedColor::Magenta => style::Color::Magenta,
            NamedColor::Cyan => style::Color::Cyan,
            NamedColor::White => style::Color::White,
        },
        Color::Rgb { r, g, b } => style::Color::Rgb {
            r: *r,
            g: *g,
            b: *b,
        },
    }
}
