//! Demo terminal host for the code field control.
//!
//! Wires crossterm input into the control's key-label vocabulary and paints
//! the control's regions (language tag, gutter, fenced code) as plain text.
//! The terminal obviously has no highlighting primitive; the point of the
//! binary is an end-to-end host integration: click to focus, type, Ctrl+V to
//! paste the demo clipboard, Ctrl+Q to quit.

use anyhow::Result;
use clap::Parser;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseEventKind,
};
use crossterm::style::Print;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};
use field_config::load_from;
use field_control::CodeField;
use field_events::{KeyEvent as FieldKeyEvent, Modifiers};
use field_host::{CodeStyle, LabelStyle, StaticClipboard, Surface};
use std::fs;
use std::io::{Write, stdout};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const DEMO_CLIPBOARD: &str = "for i in range(3):\n    print(i)\n";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "codefield", version, about = "Editable code field demo")]
struct Args {
    /// Optional file whose contents seed the field.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `codefield.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(".", "codefield.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        // Global subscriber already installed; drop the guard so the writer
        // shuts down.
        Err(_err) => None,
    }
}

/// RAII terminal setup: raw mode, alternate screen, mouse capture.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Plain-text realization of the control's paint surface. Each paint call
/// updates one region and redraws the whole screen; the screen is small and
/// the control paints at most three regions per mutation.
#[derive(Default)]
struct TerminalSurface {
    code_lines: Vec<String>,
    gutter: Vec<String>,
    language: Option<String>,
    border_color: Option<String>,
}

const GUTTER_WIDTH: u16 = 5;

impl TerminalSurface {
    fn redraw(&self) {
        if let Err(err) = self.try_redraw() {
            warn!(target: "host.terminal", error = %err, "redraw_failed");
        }
    }

    fn try_redraw(&self) -> Result<()> {
        let mut out = stdout();
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        let header = match (&self.language, &self.border_color) {
            (Some(lang), Some(color)) => format!("{lang}  [focused:{color}]"),
            (Some(lang), None) => format!("{lang}  (click to focus, Ctrl+Q quits)"),
            (None, Some(color)) => format!("[focused:{color}]"),
            (None, None) => "(click to focus, Ctrl+Q quits)".to_string(),
        };
        queue!(out, Print(header))?;
        for (i, line) in self.code_lines.iter().enumerate() {
            let row = i as u16 + 1;
            // Gutter labels number the fence body, which starts one line
            // below the opening fence.
            if i >= 1 {
                if let Some(label) = self.gutter.get(i - 1) {
                    queue!(out, MoveTo(0, row), Print(label))?;
                }
            }
            queue!(out, MoveTo(GUTTER_WIDTH, row), Print(line))?;
        }
        out.flush()?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn paint_code(&mut self, fenced: &str, _style: &CodeStyle) {
        self.code_lines = fenced.lines().map(str::to_string).collect();
        self.redraw();
    }

    fn paint_line_numbers(&mut self, labels: &[String], _style: &LabelStyle) {
        self.gutter = labels.to_vec();
        self.redraw();
    }

    fn paint_language(&mut self, label: &str, _style: &LabelStyle) {
        self.language = Some(label.to_string());
        self.redraw();
    }

    fn set_focus_border(&mut self, color: Option<&str>) {
        self.border_color = color.map(str::to_string);
        self.redraw();
    }
}

/// Map a crossterm key press to the control's label vocabulary. Letter labels
/// arrive uppercased, exactly as the control expects from its host.
fn to_field_event(key: event::KeyEvent) -> Option<FieldKeyEvent> {
    let mut mods = Modifiers::empty();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        mods |= Modifiers::CTRL;
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        mods |= Modifiers::SHIFT;
    }
    let label = match key.code {
        KeyCode::Char(c) => {
            if c.is_ascii_alphabetic() {
                c.to_ascii_uppercase().to_string()
            } else {
                c.to_string()
            }
        }
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::CapsLock => "Caps Lock".to_string(),
        KeyCode::Left => "Arrow Left".to_string(),
        KeyCode::Right => "Arrow Right".to_string(),
        KeyCode::Up => "Arrow Up".to_string(),
        KeyCode::Down => "Arrow Down".to_string(),
        _ => return None,
    };
    Some(FieldKeyEvent::new(label, mods))
}

fn run_event_loop(field: &mut CodeField) -> Result<()> {
    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
                {
                    info!(target: "runtime", "quit_requested");
                    return Ok(());
                }
                if let Some(ev) = to_field_event(key) {
                    field.handle_key(&ev);
                }
            }
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                field.handle_click();
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();

    let mut config = load_from(args.config.clone())?;
    if let Some(path) = &args.path {
        match fs::read_to_string(path) {
            Ok(text) => config.text = text,
            Err(err) => {
                warn!(target: "runtime", path = %path.display(), error = %err, "seed_file_unreadable")
            }
        }
    }
    info!(
        target: "runtime",
        language = config.language.as_str(),
        config_override = args.config.is_some(),
        "startup"
    );

    let _guard = TerminalGuard::enter()?;
    let mut field = CodeField::new(
        config,
        Box::new(TerminalSurface::default()),
        Box::new(StaticClipboard::new(DEMO_CLIPBOARD)),
    );
    field.on_change(|text| {
        tracing::trace!(target: "runtime", text_len = text.len(), "text_changed");
    });
    field.mount();
    run_event_loop(&mut field)
}
