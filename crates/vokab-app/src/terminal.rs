use std::io::{self, BufRead, Stdout, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, queue, style::Print, terminal};
use vokab_core::classify::{DecisionSource, PROMPT, Prompter};
use vokab_core::error::ClassifyError;
use vokab_types::{Decision, WordEntry};

/// Arrow keys decide, Ctrl+C stops; every other key is ignored
pub fn decision_for(key: &KeyEvent) -> Option<Decision> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(Decision::Known),
        KeyCode::Right => Some(Decision::Unknown),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Decision::Interrupt)
        }
        _ => None,
    }
}

/// Block on stdin until the user presses Enter
pub fn wait_for_enter() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\nPress Enter to continue")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

/// Raw mode on an alternate screen, restored on drop
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Decisions read from terminal key events
pub struct KeyInput;

impl DecisionSource for KeyInput {
    fn next_decision(&mut self) -> Result<Decision, ClassifyError> {
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if let Some(decision) = decision_for(&key) {
                return Ok(decision);
            }
        }
    }
}

/// Draws one word per screen. Lines end in `\r\n` since raw mode
/// does no newline translation.
pub struct Screen<W: Write> {
    out: W,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Prompter for Screen<W> {
    fn show(&mut self, ordinal: usize, total: usize, entry: &WordEntry) -> Result<(), ClassifyError> {
        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            Print(format!("{} from {}\r\n", ordinal, total)),
            Print(format!("{} = {}\r\n", entry.word, entry.sentence)),
            Print(format!("\r\n\r\n{}\r\n", PROMPT)),
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn notice(&mut self, message: &str) -> Result<(), ClassifyError> {
        queue!(self.out, Print(format!("\r\n{}\r\n", message)))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Everything the review loop needs from a real terminal
pub struct ReviewTerminal {
    pub input: KeyInput,
    pub screen: Screen<Stdout>,
    _raw: RawModeGuard,
}

impl ReviewTerminal {
    pub fn open() -> io::Result<Self> {
        Ok(Self {
            _raw: RawModeGuard::enable()?,
            input: KeyInput,
            screen: Screen::new(io::stdout()),
        })
    }
}
