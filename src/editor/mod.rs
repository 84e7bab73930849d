//! Interactive board: drag points with the mouse and watch their groups
//! follow.

pub mod config;
mod canvas;
mod input;
mod menubar;
pub mod state;
mod ui;

use std::io::{self, Write};

use anyhow::{Result, bail};
use crossterm::{cursor, event, execute, terminal};

use input::Action;
use state::EditorState;
use ui::Layout;

pub struct Editor {
    state: EditorState,
}

impl Editor {
    pub fn open(path: &str) -> Result<Self> {
        let state = EditorState::open(path)?;
        Ok(Editor { state })
    }

    /// Run the editor in the terminal.
    ///
    /// Sets up raw mode and mouse capture, and restores the terminal on exit
    /// (even on error).
    pub fn run(&mut self) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        if term_w < 20 || term_h < 4 {
            bail!("Terminal too small: have {term_w}x{term_h}");
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.main_loop(&mut stdout);

        let _ = execute!(
            stdout,
            cursor::Show,
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();

        result
    }

    fn main_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        self.full_redraw(stdout)?;

        loop {
            let event = event::read()?;
            match input::handle_event(&mut self.state, event) {
                Action::Continue => {}
                Action::Redraw => self.full_redraw(stdout)?,
                Action::Quit => break,
            }
        }

        log::debug!("leaving editor for {}", self.state.file_path);
        Ok(())
    }

    fn full_redraw(&self, stdout: &mut io::Stdout) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        let layout = Layout::compute(term_w, term_h, self.state.width, self.state.height);

        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
        menubar::render_menubar(stdout, &layout, &self.state)?;
        canvas::render_canvas(stdout, &layout, &self.state)?;
        menubar::render_status(stdout, &layout, &self.state)?;

        stdout.flush()?;
        Ok(())
    }
}
