//! `gemi ask`: one exchange, revealed on stdout.
//!
//! The streaming path runs the same [`Controller`] as the TUI, with a
//! [`TerminalSink`] in place of the chat view: a spinner stands in for the
//! typing placeholder and reveal updates are printed as they grow. On a
//! terminal the raw streamed text is replaced by the formatted reply once it
//! settles. `--no-stream` and `--output json` skip the reveal and print the
//! finished reply only.

use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow, bail};
use console::{Term, measure_text_width, style};
use indicatif::ProgressBar;
use serde::Serialize;

use gemi_client::{Backend, Reply};
use gemi_constant::defaults;
use gemi_core::{
    DisplayEvent, EndpointKind, MediaAttachment, Markup, MessageContent, MessageId, Outcome,
    RenderStage, Segment, SessionId, translate,
};
use gemi_observability::record_error;
use gemi_runtime::{AppContext, Controller, Delivery, DisplaySink, RuntimeConfig, SubmitOutcome, route};
use gemi_tui::Activity;

use crate::output;

const NOTHING_TO_SEND: &str = "Nothing to send";

pub async fn handle(text: String, base_url: Option<String>, no_stream: bool) -> Result<()> {
    let backend: Arc<dyn Backend> = Arc::new(super::build_backend(base_url)?);
    let session = super::load_session()?;

    if no_stream || output::is_json() {
        return ask_once(backend.as_ref(), &session, &text).await;
    }

    let config = RuntimeConfig::from_env()?;
    let sink = Arc::new(TerminalSink::new(Term::stdout()));
    let controller = Controller::new(AppContext::new(sink.clone(), backend, session, config));

    match controller.submit(&text).await {
        SubmitOutcome::Ignored => bail!(NOTHING_TO_SEND),
        SubmitOutcome::Rejected => bail!("Another request is still pending"),
        SubmitOutcome::Completed(exchange) => {
            sink.finish();
            match exchange.outcome {
                Outcome::Failure { error } => Err(anyhow!(sink.error().unwrap_or(error))),
                _ => Ok(()),
            }
        }
    }
}

async fn ask_once(backend: &dyn Backend, session: &SessionId, text: &str) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        bail!(NOTHING_TO_SEND);
    }

    let route = route(text);
    let spinner = output::spinner(waiting_label(route.endpoint));
    let result = backend.send(route.endpoint, &route.prompt, Some(session)).await;
    spinner.finish_and_clear();

    let reply = result.map_err(|e| {
        record_error(&e);
        tracing::warn!(endpoint = %route.endpoint, error = %e, "ask failed");
        anyhow!(e.user_message())
    })?;

    let answer = Answer::new(route.endpoint, session, reply);
    output::data("reply", &answer, &answer.to_text(Term::stdout().is_term()));
    Ok(())
}

fn waiting_label(endpoint: EndpointKind) -> &'static str {
    Activity::Pending(endpoint).label()
}

/// Finished reply, as printed by `--no-stream` and `--output json`.
#[derive(Debug, Serialize)]
struct Answer {
    endpoint: EndpointKind,
    session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<MediaAttachment>,
}

impl Answer {
    fn new(endpoint: EndpointKind, session: &SessionId, reply: Reply) -> Self {
        let (reply, media) = match reply {
            Reply::Text(text) => (Some(text), None),
            Reply::Media(url) => (None, Some(MediaAttachment::new(defaults::IMAGE_CAPTION, url))),
        };
        Self {
            endpoint,
            session_id: session.as_str().to_string(),
            reply,
            media,
        }
    }

    /// Formatted on a terminal; raw reply text when piped.
    fn to_text(&self, formatted: bool) -> String {
        if let Some(media) = &self.media {
            return media_text(media);
        }
        let reply = self.reply.as_deref().unwrap_or_default();
        if formatted {
            styled_markup(&translate(reply))
        } else {
            reply.to_string()
        }
    }
}

fn media_text(media: &MediaAttachment) -> String {
    format!(
        "{}\n🖼 {}",
        media.caption,
        style(&media.url).underlined().blue()
    )
}

/// Markup as ANSI-styled text. A line break right after a code block is
/// dropped, since the block already ends its own line.
pub(crate) fn styled_markup(markup: &Markup) -> String {
    let mut out = String::new();
    let mut after_block = false;
    for segment in &markup.segments {
        match segment {
            Segment::LineBreak if after_block => {}
            Segment::LineBreak => out.push('\n'),
            Segment::Text { text } => out.push_str(text),
            Segment::Bold { text } => out.push_str(&style(text).bold().to_string()),
            Segment::Italic { text } => out.push_str(&style(text).italic().to_string()),
            Segment::InlineCode { code } => out.push_str(&style(code).cyan().to_string()),
            Segment::CodeBlock { code, .. } => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                let lines: Vec<&str> = code.lines().collect();
                let number_width = lines.len().max(1).to_string().len();
                for (i, line) in lines.iter().enumerate() {
                    let gutter = format!("{:>number_width$} │", i + 1);
                    out.push_str(&format!("{} {}\n", style(gutter).dim(), style(line).yellow()));
                }
            }
        }
        after_block = matches!(segment, Segment::CodeBlock { .. });
    }
    let trimmed = out.trim_end_matches('\n').len();
    out.truncate(trimmed);
    out
}

/// Terminal rows `text` occupies when printed from column 0 at `width` columns.
fn rows_used(text: &str, width: usize) -> usize {
    let width = width.max(1);
    text.split('\n')
        .map(|line| measure_text_width(line).div_ceil(width).max(1))
        .sum()
}

/// The part of `visible` not printed yet. A prefix that does not extend what
/// was printed (never expected) yields everything.
fn unprinted<'a>(printed: &str, visible: &'a str) -> &'a str {
    visible.strip_prefix(printed).unwrap_or(visible)
}

#[derive(Default)]
struct SinkState {
    endpoint: Option<EndpointKind>,
    spinner: Option<ProgressBar>,
    typing: Option<MessageId>,
    revealing: Option<MessageId>,
    streamed: String,
    /// A line is open on stdout and needs a newline before exit
    open_line: bool,
    error: Option<String>,
}

/// [`DisplaySink`] over stdout for a single exchange.
pub(crate) struct TerminalSink {
    term: Term,
    formatted: bool,
    state: Mutex<SinkState>,
}

impl TerminalSink {
    pub(crate) fn new(term: Term) -> Self {
        let formatted = term.is_term();
        Self {
            term,
            formatted,
            state: Mutex::new(SinkState::default()),
        }
    }

    /// Error text shown for a failed exchange.
    pub(crate) fn error(&self) -> Option<String> {
        self.state.lock().ok().and_then(|state| state.error.clone())
    }

    /// Close the output line and drop any spinner left behind.
    pub(crate) fn finish(&self) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        if let Some(spinner) = state.spinner.take() {
            spinner.finish_and_clear();
        }
        if state.open_line {
            let _ = self.term.write_line("");
            state.open_line = false;
        }
    }

    fn write(&self, text: &str) -> Delivery {
        match self.term.write_str(text).and_then(|_| self.term.flush()) {
            Ok(()) => Delivery::Delivered,
            Err(e) => {
                tracing::debug!(error = %e, "stdout closed");
                Delivery::Detached
            }
        }
    }

    /// Remove the raw streamed text, leaving the cursor where it began.
    fn erase(&self, streamed: &str) -> std::io::Result<()> {
        let (_, cols) = self.term.size();
        let rows = rows_used(streamed, cols as usize);
        self.term.clear_line()?;
        if rows > 1 {
            self.term.clear_last_lines(rows - 1)?;
        }
        Ok(())
    }

    fn apply(&self, state: &mut SinkState, event: DisplayEvent) -> Delivery {
        match event {
            DisplayEvent::ExchangeStarted { endpoint } => {
                state.endpoint = Some(endpoint);
                Delivery::Delivered
            }
            DisplayEvent::Show { message } => match message.content {
                MessageContent::Typing => {
                    let endpoint = state.endpoint.unwrap_or(EndpointKind::Chat);
                    state.spinner = Some(output::spinner(waiting_label(endpoint)));
                    state.typing = Some(message.id);
                    Delivery::Delivered
                }
                MessageContent::Text { .. } if message.stage == RenderStage::Revealing => {
                    state.revealing = Some(message.id);
                    state.streamed.clear();
                    Delivery::Delivered
                }
                MessageContent::Media { media } => self.write(&format!("{}\n", media_text(&media))),
                MessageContent::Error { error } => {
                    state.error = Some(error);
                    Delivery::Delivered
                }
                _ => Delivery::Delivered,
            },
            DisplayEvent::Remove { id } if state.typing == Some(id) => {
                state.typing = None;
                if let Some(spinner) = state.spinner.take() {
                    spinner.finish_and_clear();
                }
                Delivery::Delivered
            }
            DisplayEvent::Reveal { id, visible } if state.revealing == Some(id) => {
                let suffix = unprinted(&state.streamed, &visible);
                let delivery = if suffix.is_empty() {
                    Delivery::Delivered
                } else {
                    state.open_line = true;
                    self.write(suffix)
                };
                state.streamed = visible;
                delivery
            }
            DisplayEvent::Settle { id, markup } if state.revealing == Some(id) => {
                state.revealing = None;
                if self.formatted {
                    if let Err(e) = self.erase(&state.streamed) {
                        tracing::debug!(error = %e, "could not erase streamed text");
                    }
                    state.open_line = true;
                    self.write(&styled_markup(&markup))
                } else {
                    Delivery::Delivered
                }
            }
            DisplayEvent::Status { message } => {
                tracing::info!(status = %message, "status");
                Delivery::Delivered
            }
            DisplayEvent::Reveal { .. } | DisplayEvent::Settle { .. } | DisplayEvent::Remove { .. } => {
                Delivery::Detached
            }
            DisplayEvent::ClearInput | DisplayEvent::ExchangeFinished { .. } => Delivery::Delivered,
        }
    }
}

impl DisplaySink for TerminalSink {
    fn emit(&self, event: DisplayEvent) -> Delivery {
        match self.state.lock() {
            Ok(mut state) => self.apply(&mut state, event),
            Err(_) => Delivery::Detached,
        }
    }
}
