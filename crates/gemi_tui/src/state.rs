//! TUI state: the display list, input line, scroll and header activity.
//!
//! [TuiState] holds everything the view needs to render. [ChatItem] wraps the
//! per-kind message types from [crate::messages] so the list is one `Vec`,
//! addressed by [MessageId] the same way the runtime addresses it.

use std::time::Instant;

use gemi_core::{EndpointKind, Markup, MediaAttachment, Message, MessageContent, MessageId, Origin};

use crate::animation::Shimmer;
use crate::layouts::HeaderDot;
use crate::messages::assistant::{AssistantBody, AssistantMessage};
use crate::messages::error::ErrorMessage;
use crate::messages::media::MediaMessage;
use crate::messages::user::UserMessage;
use crate::theme::{Appearance, GemiPalette};

/// Which screen is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    DebugTraces,
}

/// Max trace lines to keep (older lines dropped).
const MAX_TRACE_LINES: usize = 2000;

#[derive(Debug, Clone)]
pub enum ChatItem {
    User(UserMessage),
    Assistant(AssistantMessage),
    Typing(MessageId),
    Media(MediaMessage),
    Error(ErrorMessage),
}

impl ChatItem {
    pub fn id(&self) -> MessageId {
        match self {
            ChatItem::User(m) => m.id,
            ChatItem::Assistant(m) => m.id,
            ChatItem::Typing(id) => *id,
            ChatItem::Media(m) => m.id,
            ChatItem::Error(m) => m.id,
        }
    }

    pub fn from_message(message: Message) -> Self {
        let id = message.id;
        let timestamp = Some(
            message
                .created_at
                .with_timezone(&chrono::Local)
                .format("%H:%M")
                .to_string(),
        );
        match (message.origin, message.content) {
            (_, MessageContent::Typing) => ChatItem::Typing(id),
            (_, MessageContent::Error { error }) => ChatItem::Error(ErrorMessage {
                id,
                text: error,
                timestamp,
            }),
            (_, MessageContent::Media { media }) => ChatItem::Media(MediaMessage { id, media, timestamp }),
            (Origin::User, content) => ChatItem::User(UserMessage {
                id,
                text: content.plain_text(),
                timestamp,
            }),
            (Origin::Assistant, MessageContent::Text { text }) => ChatItem::Assistant(AssistantMessage {
                id,
                body: AssistantBody::Revealing(text),
                timestamp,
            }),
            (Origin::Assistant, MessageContent::Markup { markup }) => ChatItem::Assistant(AssistantMessage {
                id,
                body: AssistantBody::Settled(markup),
                timestamp,
            }),
        }
    }
}

/// What the header dot reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    Pending(EndpointKind),
    /// The last exchange failed; cleared by the next one.
    Failed,
}

impl Activity {
    pub fn is_pending(self) -> bool {
        matches!(self, Activity::Pending(_))
    }

    pub fn dot(self) -> HeaderDot {
        match self {
            Activity::Idle => HeaderDot::Idle,
            Activity::Pending(_) => HeaderDot::Pending,
            Activity::Failed => HeaderDot::Failed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Activity::Idle => "Ready",
            Activity::Pending(EndpointKind::Chat) => "Thinking…",
            Activity::Pending(EndpointKind::Image) => "Drawing…",
            Activity::Pending(EndpointKind::Search) => "Searching…",
            Activity::Failed => "Last request failed",
        }
    }
}

#[derive(Debug)]
pub struct TuiState {
    /// Display list, oldest first.
    pub messages: Vec<ChatItem>,
    pub input_buffer: String,
    /// Byte offset within input_buffer (0..=len), always on a char boundary.
    pub input_cursor: usize,
    /// Lines scrolled up from the bottom.
    pub scroll: usize,
    /// When true, keep scroll at bottom on new content; false once the user scrolls up.
    pub auto_scroll: bool,
    pub palette: GemiPalette,
    /// Transient notice shown in the header instead of the activity label.
    pub status: String,
    pub status_set_at: Option<Instant>,
    pub activity: Activity,
    /// Incremented each draw, for cursor blink.
    pub frame_count: u64,
    /// When true, the next loop iteration draws; cleared after draw.
    pub needs_redraw: bool,
    /// Cached line list; invalidated by any display list change or resize.
    pub cached_lines: Vec<ratatui::text::Line<'static>>,
    pub cache_dirty: bool,
    pub last_content_height: usize,
    pub last_viewport_height: usize,
    /// Ticked while a typing placeholder is shown.
    pub typing_shimmer: Option<Shimmer>,
    pub screen: Screen,
    /// Log lines for the debug screen. Newest at end.
    pub trace_lines: Vec<String>,
    pub trace_scroll: usize,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            input_buffer: String::new(),
            input_cursor: 0,
            scroll: 0,
            auto_scroll: true,
            palette: GemiPalette::gemi_dark(),
            status: String::new(),
            status_set_at: None,
            activity: Activity::Idle,
            frame_count: 0,
            needs_redraw: true,
            cached_lines: Vec::new(),
            cache_dirty: true,
            last_content_height: 0,
            last_viewport_height: 0,
            typing_shimmer: None,
            screen: Screen::Main,
            trace_lines: Vec::new(),
            trace_scroll: 0,
        }
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_appearance(appearance: Appearance) -> Self {
        Self {
            palette: GemiPalette::for_appearance(appearance),
            ..Self::default()
        }
    }

    fn touch(&mut self) {
        self.cache_dirty = true;
        self.needs_redraw = true;
        if self.auto_scroll {
            self.scroll = 0;
        }
    }

    fn position(&self, id: MessageId) -> Option<usize> {
        self.messages.iter().position(|m| m.id() == id)
    }

    /// Append a message to the display list.
    pub fn show_message(&mut self, message: Message) {
        self.messages.push(ChatItem::from_message(message));
        self.touch();
    }

    /// Replace the visible prefix of a revealing assistant message. False when `id` is unknown
    /// or no longer revealing.
    pub fn reveal(&mut self, id: MessageId, visible: String) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        match &mut self.messages[idx] {
            ChatItem::Assistant(m) if m.is_revealing() => {
                m.body = AssistantBody::Revealing(visible);
                self.touch();
                true
            }
            _ => false,
        }
    }

    pub fn settle(&mut self, id: MessageId, markup: Markup) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        match &mut self.messages[idx] {
            ChatItem::Assistant(m) => {
                m.body = AssistantBody::Settled(markup);
                self.touch();
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: MessageId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        self.messages.remove(idx);
        self.touch();
        true
    }

    /// Tear down the display list (Ctrl+L).
    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.typing_shimmer = None;
        self.auto_scroll = true;
        self.touch();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_set_at = Some(Instant::now());
        self.needs_redraw = true;
    }

    pub fn clear_status(&mut self) {
        self.status.clear();
        self.status_set_at = None;
        self.needs_redraw = true;
    }

    pub fn set_activity(&mut self, activity: Activity) {
        self.activity = activity;
        self.needs_redraw = true;
    }

    /// Header text and dot: a transient notice wins over the activity label.
    pub fn header_status(&self) -> (&str, HeaderDot) {
        let text = if self.status.is_empty() {
            self.activity.label()
        } else {
            self.status.as_str()
        };
        (text, self.activity.dot())
    }

    pub fn has_typing(&self) -> bool {
        self.messages.iter().any(|m| matches!(m, ChatItem::Typing(_)))
    }

    pub fn has_revealing(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m, ChatItem::Assistant(a) if a.is_revealing()))
    }

    /// Something on screen changes every frame (cursor blink, shimmer).
    pub fn is_animating(&self) -> bool {
        self.has_typing() || self.has_revealing()
    }

    /// Text of the newest assistant reply, if any.
    pub fn last_reply_text(&self) -> Option<String> {
        self.messages.iter().rev().find_map(|m| match m {
            ChatItem::Assistant(a) => Some(a.plain_text()).filter(|t| !t.is_empty()),
            _ => None,
        })
    }

    pub fn last_media(&self) -> Option<&MediaAttachment> {
        self.messages.iter().rev().find_map(|m| match m {
            ChatItem::Media(media) => Some(&media.media),
            _ => None,
        })
    }

    /// Insert a character at the cursor.
    pub fn input_insert(&mut self, c: char) {
        self.input_buffer.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
        self.needs_redraw = true;
    }

    fn prev_boundary(&self) -> usize {
        self.input_buffer[..self.input_cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.input_buffer[self.input_cursor..]
            .chars()
            .next()
            .map_or(self.input_cursor, |c| self.input_cursor + c.len_utf8())
    }

    /// Delete the character before the cursor.
    pub fn input_backspace(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        let start = self.prev_boundary();
        self.input_buffer.drain(start..self.input_cursor);
        self.input_cursor = start;
        self.needs_redraw = true;
    }

    /// Delete the character at the cursor.
    pub fn input_delete(&mut self) {
        let end = self.next_boundary();
        if end == self.input_cursor {
            return;
        }
        self.input_buffer.drain(self.input_cursor..end);
        self.needs_redraw = true;
    }

    pub fn input_cursor_left(&mut self) {
        self.input_cursor = self.prev_boundary();
        self.needs_redraw = true;
    }

    pub fn input_cursor_right(&mut self) {
        self.input_cursor = self.next_boundary();
        self.needs_redraw = true;
    }

    pub fn input_cursor_home(&mut self) {
        self.input_cursor = 0;
        self.needs_redraw = true;
    }

    /// Cursor to end; on an empty line this also jumps back to the newest message.
    pub fn input_cursor_end(&mut self) {
        self.input_cursor = self.input_buffer.len();
        if self.input_buffer.is_empty() {
            self.auto_scroll = true;
            self.scroll = 0;
        }
        self.needs_redraw = true;
    }

    /// Ctrl+U, and the runtime's ClearInput.
    pub fn input_clear_line(&mut self) {
        self.input_buffer.clear();
        self.input_cursor = 0;
        self.needs_redraw = true;
    }

    /// Ctrl+K
    pub fn input_kill_to_end(&mut self) {
        self.input_buffer.truncate(self.input_cursor);
        self.needs_redraw = true;
    }

    pub fn scroll_up(&mut self, delta: usize) {
        self.auto_scroll = false;
        self.scroll = self.scroll.saturating_add(delta);
        self.needs_redraw = true;
    }

    pub fn scroll_down(&mut self, delta: usize) {
        self.scroll = self.scroll.saturating_sub(delta);
        if self.scroll == 0 {
            self.auto_scroll = true;
        }
        self.needs_redraw = true;
    }

    /// Append a debug line, dropping the oldest past capacity.
    pub fn push_trace_line(&mut self, line: String) {
        self.trace_lines.push(line);
        if self.trace_lines.len() > MAX_TRACE_LINES {
            self.trace_lines.drain(0..self.trace_lines.len() - MAX_TRACE_LINES);
        }
        if self.screen == Screen::DebugTraces {
            self.needs_redraw = true;
        }
    }

    pub fn trace_scroll_up(&mut self, delta: usize) {
        self.trace_scroll = self.trace_scroll.saturating_add(delta);
        self.needs_redraw = true;
    }

    pub fn trace_scroll_down(&mut self, delta: usize) {
        self.trace_scroll = self.trace_scroll.saturating_sub(delta);
        self.needs_redraw = true;
    }

    pub fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Main => Screen::DebugTraces,
            Screen::DebugTraces => Screen::Main,
        };
        self.cache_dirty = true;
        self.needs_redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use gemi_core::translate;

    use super::*;

    #[test]
    fn input_insert_utf8() {
        let mut s = TuiState::new();
        s.input_insert('é');
        s.input_insert('🎉');
        assert_eq!(s.input_buffer, "é🎉");
        assert_eq!(s.input_cursor, "é🎉".len());
    }

    #[test]
    fn backspace_and_delete_respect_char_boundaries() {
        let mut s = TuiState::new();
        for c in "añb".chars() {
            s.input_insert(c);
        }
        s.input_cursor_left();
        s.input_backspace();
        assert_eq!(s.input_buffer, "ab");
        assert_eq!(s.input_cursor, 1);
        s.input_delete();
        assert_eq!(s.input_buffer, "a");
        s.input_delete();
        assert_eq!(s.input_buffer, "a");
    }

    #[test]
    fn backspace_at_zero_is_noop() {
        let mut s = TuiState::new();
        s.input_insert('x');
        s.input_cursor_home();
        s.input_backspace();
        assert_eq!(s.input_buffer, "x");
    }

    #[test]
    fn kill_to_end_and_clear_line() {
        let mut s = TuiState::new();
        for c in "hello world".chars() {
            s.input_insert(c);
        }
        s.input_cursor = 5;
        s.input_kill_to_end();
        assert_eq!(s.input_buffer, "hello");
        s.input_clear_line();
        assert!(s.input_buffer.is_empty());
        assert_eq!(s.input_cursor, 0);
    }

    #[test]
    fn show_reveal_settle_by_id() {
        let mut s = TuiState::new();
        let message = Message::revealing();
        let id = message.id;
        s.show_message(message);

        assert!(s.reveal(id, "Hi *yo".into()));
        assert!(s.has_revealing());
        assert_eq!(s.last_reply_text().as_deref(), Some("Hi *yo"));

        assert!(s.settle(id, translate("Hi *you*")));
        assert!(!s.has_revealing());
        assert!(!s.reveal(id, "late".into()));
        assert_eq!(s.last_reply_text().as_deref(), Some("Hi you"));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut s = TuiState::new();
        let stray = MessageId::new();
        assert!(!s.reveal(stray, "x".into()));
        assert!(!s.settle(stray, translate("x")));
        assert!(!s.remove(stray));
        assert!(s.messages.is_empty());
    }

    #[test]
    fn typing_placeholder_comes_and_goes() {
        let mut s = TuiState::new();
        let typing = Message::typing();
        let id = typing.id;
        s.show_message(typing);
        assert!(s.has_typing());
        assert!(s.is_animating());
        assert!(s.remove(id));
        assert!(!s.has_typing());
    }

    #[test]
    fn messages_map_to_items() {
        let mut s = TuiState::new();
        s.show_message(Message::user("hi"));
        s.show_message(Message::error("nope"));
        s.show_message(Message::media(MediaAttachment::new("cap", "/img/a.png")));
        assert!(matches!(&s.messages[0], ChatItem::User(m) if m.text == "hi"));
        assert!(matches!(&s.messages[1], ChatItem::Error(m) if m.text == "nope"));
        assert_eq!(s.last_media().map(|m| m.file_name.as_str()), Some("a.png"));
    }

    #[test]
    fn clear_messages_empties_list() {
        let mut s = TuiState::new();
        s.show_message(Message::user("hi"));
        s.scroll_up(3);
        s.clear_messages();
        assert!(s.messages.is_empty());
        assert!(s.auto_scroll);
        assert_eq!(s.scroll, 0);
        assert!(s.last_reply_text().is_none());
    }

    #[test]
    fn header_prefers_status_then_activity() {
        let mut s = TuiState::new();
        assert_eq!(s.header_status(), ("Ready", HeaderDot::Idle));
        s.set_activity(Activity::Pending(EndpointKind::Image));
        assert_eq!(s.header_status(), ("Drawing…", HeaderDot::Pending));
        s.set_status("Copied to clipboard");
        assert_eq!(s.header_status(), ("Copied to clipboard", HeaderDot::Pending));
        s.clear_status();
        s.set_activity(Activity::Failed);
        assert_eq!(s.header_status().1, HeaderDot::Failed);
    }

    #[test]
    fn scroll_up_disables_auto_scroll() {
        let mut s = TuiState::new();
        s.scroll_up(5);
        assert!(!s.auto_scroll);
        assert_eq!(s.scroll, 5);
        s.scroll_down(5);
        assert!(s.auto_scroll);
    }

    #[test]
    fn new_content_keeps_scroll_when_user_scrolled_up() {
        let mut s = TuiState::new();
        s.scroll_up(4);
        s.show_message(Message::user("more"));
        assert_eq!(s.scroll, 4);
    }

    #[test]
    fn end_on_empty_input_returns_to_bottom() {
        let mut s = TuiState::new();
        s.scroll_up(10);
        s.input_cursor_end();
        assert!(s.auto_scroll);
        assert_eq!(s.scroll, 0);
    }

    #[test]
    fn trace_lines_are_capped() {
        let mut s = TuiState::new();
        for i in 0..(MAX_TRACE_LINES + 10) {
            s.push_trace_line(format!("line {}", i));
        }
        assert_eq!(s.trace_lines.len(), MAX_TRACE_LINES);
        assert_eq!(s.trace_lines[0], "line 10");
    }

    #[test]
    fn toggle_screen_round_trips() {
        let mut s = TuiState::new();
        s.toggle_screen();
        assert_eq!(s.screen, Screen::DebugTraces);
        s.toggle_screen();
        assert_eq!(s.screen, Screen::Main);
    }
}
