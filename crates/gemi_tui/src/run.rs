//! TUI run loop: terminal setup, event handling, draw.
//!
//! Key events are read in a dedicated thread so the main loop never blocks on
//! terminal input; runtime events and log lines are drained every iteration.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use gemi_core::{DisplayEvent, UiCommand};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc as tokio_mpsc;

use crate::runtime_events::apply_display_event;
use crate::state::{Screen, TuiState};
use crate::theme::Appearance;
use crate::utils::{PAGE_SCROLL_LINES, WHEEL_SCROLL_LINES};
use crate::view;

const STATUS_TIMEOUT: Duration = Duration::from_secs(5);
const FRAME_INTERVAL: Duration = Duration::from_millis(50);
const RUNTIME_STOPPED: &str = "Runtime stopped";

/// Channels tying the TUI to the runtime.
pub struct TuiChannels {
    /// Display events from the controller and renderer.
    pub events: tokio_mpsc::UnboundedReceiver<DisplayEvent>,
    /// Commands for the runtime (submit, clear, save).
    pub commands: tokio_mpsc::UnboundedSender<UiCommand>,
    /// Formatted log lines for the debug screen (Ctrl+D).
    pub logs: Option<tokio_mpsc::UnboundedReceiver<String>>,
}

/// Run the TUI until the user quits: alternate screen, raw mode, event loop.
/// Returns when q/Ctrl+C is pressed or the runtime side hangs up.
pub fn run_tui(channels: TuiChannels, appearance: Appearance) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut state = TuiState::with_appearance(appearance);
    state.push_trace_line("[log] TUI started. Runtime logs show here.".to_string());
    let result = run_loop(&mut terminal, &mut state, channels);

    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    disable_raw_mode()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut TuiState,
    mut channels: TuiChannels,
) -> anyhow::Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    let (key_tx, key_rx) = mpsc::channel();
    let reader_stop = Arc::clone(&stop);
    let reader = std::thread::spawn(move || {
        while !reader_stop.load(Ordering::Relaxed) {
            if event::poll(FRAME_INTERVAL).unwrap_or(false)
                && let Ok(ev) = event::read()
                && key_tx.send(ev).is_err()
            {
                break;
            }
        }
    });

    let result = loop {
        if let Some(rx) = channels.logs.as_mut() {
            while let Ok(line) = rx.try_recv() {
                for l in line.split('\n') {
                    state.push_trace_line(l.to_string());
                }
            }
        }
        loop {
            match channels.events.try_recv() {
                Ok(event) => apply_display_event(state, event),
                Err(tokio_mpsc::error::TryRecvError::Empty) => break,
                Err(tokio_mpsc::error::TryRecvError::Disconnected) => {
                    if state.status != RUNTIME_STOPPED {
                        state.set_status(RUNTIME_STOPPED);
                    }
                    break;
                }
            }
        }

        if let Some(set_at) = state.status_set_at
            && set_at.elapsed() > STATUS_TIMEOUT
        {
            state.clear_status();
        }

        if state.needs_redraw || state.is_animating() {
            state.frame_count = state.frame_count.wrapping_add(1);
            if let Err(e) = terminal.draw(|f| view::draw(f, state, f.area())) {
                break Err(e.into());
            }
            state.needs_redraw = false;
        }

        match key_rx.recv_timeout(FRAME_INTERVAL) {
            Ok(Event::Key(key)) => {
                if handle_key(state, key, &channels.commands) == KeyOutcome::Quit {
                    break Ok(());
                }
            }
            Ok(Event::Mouse(me)) => match me.kind {
                MouseEventKind::ScrollUp => scroll(state, true, WHEEL_SCROLL_LINES),
                MouseEventKind::ScrollDown => scroll(state, false, WHEEL_SCROLL_LINES),
                _ => {}
            },
            Ok(Event::Resize(_, _)) => {
                state.cache_dirty = true;
                state.needs_redraw = true;
            }
            Ok(_) | Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break Err(anyhow::anyhow!("terminal input closed")),
        }
    };

    stop.store(true, Ordering::Relaxed);
    let _ = reader.join();
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

fn scroll(state: &mut TuiState, up: bool, lines: usize) {
    match (state.screen, up) {
        (Screen::Main, true) => state.scroll_up(lines),
        (Screen::Main, false) => state.scroll_down(lines),
        (Screen::DebugTraces, true) => state.trace_scroll_up(lines),
        (Screen::DebugTraces, false) => state.trace_scroll_down(lines),
    }
}

fn send(state: &mut TuiState, commands: &tokio_mpsc::UnboundedSender<UiCommand>, command: UiCommand) {
    if commands.send(command).is_err() {
        state.set_status(RUNTIME_STOPPED);
    }
}

/// Apply one key press. Enter does not clear the input: the runtime clears it
/// once it accepts the message, so a rejected submit leaves the text in place.
pub fn handle_key(
    state: &mut TuiState,
    key: KeyEvent,
    commands: &tokio_mpsc::UnboundedSender<UiCommand>,
) -> KeyOutcome {
    if key.kind != KeyEventKind::Press {
        return KeyOutcome::Continue;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let main = state.screen == Screen::Main;

    match key.code {
        KeyCode::Char('c') if ctrl => return KeyOutcome::Quit,
        KeyCode::Char('d') if ctrl => state.toggle_screen(),
        KeyCode::Esc if !main => state.toggle_screen(),
        KeyCode::Esc if state.input_buffer.is_empty() => return KeyOutcome::Quit,
        KeyCode::Up => scroll(state, true, 1),
        KeyCode::Down => scroll(state, false, 1),
        KeyCode::PageUp => scroll(state, true, PAGE_SCROLL_LINES),
        KeyCode::PageDown => scroll(state, false, PAGE_SCROLL_LINES),
        _ if !main => {}
        KeyCode::Enter => {
            if !state.input_buffer.trim().is_empty() {
                let text = state.input_buffer.clone();
                send(state, commands, UiCommand::Submit { text });
            }
        }
        KeyCode::Char('l') if ctrl => {
            state.clear_messages();
            send(state, commands, UiCommand::ClearChat);
        }
        KeyCode::Char('y') if ctrl => copy_last_reply(state),
        KeyCode::Char('s') if ctrl => match state.last_media().cloned() {
            Some(media) => {
                state.set_status(format!("Saving {}…", media.file_name));
                send(
                    state,
                    commands,
                    UiCommand::SaveMedia {
                        url: media.url,
                        file_name: media.file_name,
                    },
                );
            }
            None => state.set_status("No image to save"),
        },
        KeyCode::Char('u') if ctrl => state.input_clear_line(),
        KeyCode::Char('k') if ctrl => state.input_kill_to_end(),
        KeyCode::Char(_) if ctrl => {}
        KeyCode::Char(c) => state.input_insert(c),
        KeyCode::Backspace => state.input_backspace(),
        KeyCode::Delete => state.input_delete(),
        KeyCode::Left => state.input_cursor_left(),
        KeyCode::Right => state.input_cursor_right(),
        KeyCode::Home => state.input_cursor_home(),
        KeyCode::End => state.input_cursor_end(),
        _ => {}
    }
    KeyOutcome::Continue
}

/// Copy the newest assistant reply to the system clipboard (Ctrl+Y).
fn copy_last_reply(state: &mut TuiState) {
    let Some(text) = state.last_reply_text() else {
        state.set_status("Nothing to copy yet");
        return;
    };
    match cli_clipboard::set_contents(text) {
        Ok(()) => state.set_status("Copied to clipboard"),
        Err(e) => state.set_status(format!("Clipboard unavailable: {}", e)),
    }
}
