use std::io::{BufRead, Write};

use anyhow::Context;
use roster_core::{update, AppState, Category, Msg, StoreSettings};
use roster_logging::roster_info;

use crate::command::{parse_command, to_msg, Command, HELP};
use crate::effects::EffectRunner;
use crate::render::render;

/// Line-driven stand-in for the touch UI. Owns the state and processes one
/// message at a time.
pub struct Shell<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(settings: StoreSettings, runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::with_settings(settings),
            runner,
            out,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn run(&mut self, input: impl BufRead, start: Category) -> anyhow::Result<()> {
        self.open(start)?;

        for line in input.lines() {
            let line = line.context("reading command")?;
            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => writeln!(self.out, "{HELP}")?,
                Ok(Command::Show) => self.render()?,
                Ok(command) => {
                    let view = self.state.view();
                    match to_msg(&command, &view) {
                        Ok(Some(msg)) => self.dispatch_and_settle(msg)?,
                        Ok(None) => {}
                        Err(reason) => writeln!(self.out, "{reason}")?,
                    }
                }
                Err(reason) => writeln!(self.out, "{reason}")?,
            }
        }

        roster_info!("shell closed");
        Ok(())
    }

    /// Shows `start` and waits for its first page.
    pub fn open(&mut self, start: Category) -> anyhow::Result<()> {
        let msg = if start == self.state.active() {
            Msg::PaneActivated(start)
        } else {
            Msg::CategorySelected(start)
        };
        self.dispatch_and_settle(msg)?;
        self.render()
    }

    /// Dispatches `msg`, then feeds completions back until no fetch is
    /// outstanding, and re-renders if anything changed.
    pub fn dispatch_and_settle(&mut self, msg: Msg) -> anyhow::Result<()> {
        self.dispatch(msg);
        while let Some(loaded) = self.runner.next_msg() {
            self.dispatch(loaded);
        }
        if self.state.consume_dirty() {
            self.render()?;
        }
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let view = self.state.view();
        let text = render(&view, self.runner.updated_at(view.active));
        write!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }
}
