use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use std::io::{self, stdout, BufRead, IsTerminal, Write};

use crate::completion::{common_prefix, Completer};

/// Width used when the terminal can't tell us
const FALLBACK_WIDTH: usize = 80;

/// What a single prompt produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D or end of input
    Eof,
}

/// Reads one line of input, offering completions from `completer`
pub trait LineEditor {
    fn read_line(&mut self, prompt: &str, completer: &dyn Completer) -> Result<ReadOutcome>;
}

/// What pressing Tab should do with the current input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabAction {
    /// Replace the input with this longer text
    Extend(String),
    /// Several names fit and the input can't grow; list them
    ShowMatches,
    Nothing,
}

#[must_use]
pub fn tab_action(line: &str, completer: &dyn Completer) -> TabAction {
    let matches = completer.matches(line);

    match matches.as_slice() {
        [] => TabAction::Nothing,
        [only] if *only == line => TabAction::Nothing,
        [only] => TabAction::Extend((*only).to_string()),
        many => {
            let prefix = common_prefix(many);
            if prefix.len() > line.len() {
                TabAction::Extend(prefix.to_string())
            } else {
                TabAction::ShowMatches
            }
        }
    }
}

/// Terminal width for laying out matches
#[must_use]
pub fn terminal_width() -> usize {
    terminal::size()
        .ok()
        .map(|(width, _)| usize::from(width))
        .filter(|width| *width > 0)
        .or_else(|| {
            std::env::var("COLUMNS")
                .ok()
                .and_then(|columns| columns.trim().parse().ok())
        })
        .unwrap_or(FALLBACK_WIDTH)
}

/// Apply Tab to `line`, echoing the result to `out`. A match listing is
/// followed by the prompt and the current input so editing can continue.
pub fn press_tab<W: Write>(
    out: &mut W,
    prompt: &str,
    line: &mut String,
    completer: &dyn Completer,
    width: usize,
) -> io::Result<()> {
    match tab_action(line, completer) {
        TabAction::Extend(extended) => {
            queue!(out, Print(&extended[line.len()..]))?;
            *line = extended;
        }
        TabAction::ShowMatches => {
            queue!(out, Print("\r\n"))?;
            for row in completer.render_matches(line, width) {
                queue!(out, Print(row), Print("\r\n"))?;
            }
            queue!(out, Print(prompt), Print(line.as_str()))?;
        }
        TabAction::Nothing => {
            queue!(out, Print('\x07'))?;
        }
    }

    Ok(())
}

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Prompt on the controlling terminal, with Tab completion when stdin is a tty
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn read_plain(prompt: &str) -> Result<ReadOutcome> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            println!();
            return Ok(ReadOutcome::Eof);
        }

        Ok(ReadOutcome::Line(input.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn read_raw(prompt: &str, completer: &dyn Completer) -> Result<ReadOutcome> {
        let mut stdout = stdout();
        enable_raw_mode()?;
        let _raw_mode_guard = RawModeGuard; // restores cooked mode on every return path

        let mut line = String::new();
        queue!(stdout, Print(prompt))?;
        stdout.flush()?;

        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            match key.code {
                KeyCode::Char('c') if ctrl => {
                    queue!(stdout, Print("\r\n"))?;
                    stdout.flush()?;
                    return Ok(ReadOutcome::Interrupted);
                }
                KeyCode::Char('d') if ctrl => {
                    if line.is_empty() {
                        queue!(stdout, Print("\r\n"))?;
                        stdout.flush()?;
                        return Ok(ReadOutcome::Eof);
                    }
                }
                KeyCode::Enter => {
                    queue!(stdout, Print("\r\n"))?;
                    stdout.flush()?;
                    return Ok(ReadOutcome::Line(line));
                }
                KeyCode::Backspace => {
                    if line.pop().is_some() {
                        queue!(stdout, Print("\x08 \x08"))?;
                    }
                }
                KeyCode::Tab => {
                    press_tab(&mut stdout, prompt, &mut line, completer, terminal_width())?;
                }
                KeyCode::Char(c) if !ctrl => {
                    line.push(c);
                    queue!(stdout, Print(c))?;
                }
                _ => {}
            }

            stdout.flush()?;
        }
    }
}

impl LineEditor for TerminalPrompt {
    fn read_line(&mut self, prompt: &str, completer: &dyn Completer) -> Result<ReadOutcome> {
        if io::stdin().is_terminal() && io::stdout().is_terminal() {
            Self::read_raw(prompt, completer)
        } else {
            Self::read_plain(prompt)
        }
    }
}
