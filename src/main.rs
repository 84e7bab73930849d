use std::{fs, process};

use anyhow::{Context, Result, bail};

use point_groups::{
    board::{Board, source::SourceBoard},
    editor::{Editor, config::Config},
    types::Vec2,
};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const DRAG_USAGE: &str = "point-groups drag <scene.json> <element> <dx> <dy>";
const EDIT_USAGE: &str = "point-groups edit <scene.json>";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("drag") => {
            let path = args.next().context(DRAG_USAGE)?;
            let element = args.next().context(DRAG_USAGE)?;
            let dx = parse_offset(args.next(), "dx")?;
            let dy = parse_offset(args.next(), "dy")?;
            drag(&path, &element, Vec2::new(dx, dy))
        }
        Some("edit") => {
            let path = args.next().context(EDIT_USAGE)?;
            edit(&path)
        }
        _ => bail!(
            "point-groups — rigid point groups on a terminal board\n\nUsage:\n  {DRAG_USAGE}\n  {EDIT_USAGE}"
        ),
    }
}

fn parse_offset(arg: Option<String>, what: &str) -> Result<f64> {
    let raw = arg.context(DRAG_USAGE)?;
    raw.parse()
        .with_context(|| format!("Invalid {what} `{raw}`"))
}

fn load(path: &str) -> Result<Board> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let source: SourceBoard =
        serde_json::from_str(&json).with_context(|| format!("Failed to parse {path}"))?;
    let board = Board::from_source(&source)
        .with_context(|| format!("Failed to build board from {path}"))?;
    Ok(board.with_policy(Config::load().groups))
}

fn drag(path: &str, element: &str, delta: Vec2) -> Result<()> {
    let mut board = load(path)?;
    board
        .drag(element, delta)
        .with_context(|| format!("Failed to drag {element}"))?;

    let output = serde_json::to_string_pretty(&board.snapshot())?;
    println!("{output}");
    Ok(())
}

fn edit(path: &str) -> Result<()> {
    let mut editor = Editor::open(path)?;
    editor.run()
}
