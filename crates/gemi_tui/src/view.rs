//! TUI view: header (fixed top), scrollable chat body, input + shortcut hint (fixed bottom).

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::layouts::{
    CHAT_MESSAGE_SPACING, ChatsLayout, HEADER_TITLE, INPUT_ICON, INPUT_PLACEHOLDER, background_style,
    block_for_input_bordered, border_style, chat_scroll_offset, main_splits, render_header, shortcut_inner_rect,
    shortcut_line, text_muted_style, text_style, vertical_split,
};
use crate::messages::{assistant, error, media, typing, user};
use crate::state::{ChatItem, Screen, TuiState};

/// Cursor blink half-period, in frames.
const BLINK_FRAMES: u64 = 5;

pub fn draw(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    match state.screen {
        Screen::DebugTraces => draw_debug_traces(frame, state, area),
        Screen::Main => draw_main(frame, state, area),
    }
}

/// Runtime log screen. Ctrl+D or Esc closes it.
fn draw_debug_traces(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    let palette = &state.palette;
    let block = Block::default()
        .title(" Runtime logs (Ctrl+D to close) ")
        .borders(Borders::ALL)
        .border_style(border_style(palette.border))
        .style(background_style(palette.background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let viewport_height = inner.height as usize;
    let max_scroll = state.trace_lines.len().saturating_sub(viewport_height);
    state.trace_scroll = state.trace_scroll.min(max_scroll);
    // trace_scroll counts lines up from the newest
    let offset = max_scroll - state.trace_scroll;

    let lines: Vec<Line> = state
        .trace_lines
        .iter()
        .skip(offset)
        .take(viewport_height)
        .map(|s| Line::from(Span::styled(s.clone(), text_muted_style(palette.text_muted))))
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Every display list item as lines, separated by blank lines.
pub fn chat_lines(state: &TuiState, width: usize) -> Vec<Line<'static>> {
    let palette = &state.palette;
    let cursor_visible = (state.frame_count / BLINK_FRAMES).is_multiple_of(2);
    let mut lines: Vec<Line<'static>> = Vec::new();
    for item in &state.messages {
        if !lines.is_empty() {
            lines.extend(std::iter::repeat_n(Line::default(), CHAT_MESSAGE_SPACING));
        }
        match item {
            ChatItem::User(m) => lines.extend(user::user_message_lines(m, palette, width)),
            ChatItem::Assistant(m) => {
                lines.extend(assistant::assistant_message_lines(m, palette, width, cursor_visible))
            }
            ChatItem::Typing(_) => lines.push(typing::typing_line(state.typing_shimmer.as_ref(), palette)),
            ChatItem::Media(m) => lines.extend(media::media_message_lines(m, palette, width)),
            ChatItem::Error(m) => lines.extend(error::error_message_lines(m, palette, width)),
        }
    }
    lines
}

fn draw_main(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    let splits = main_splits(area);

    let (status, dot) = state.header_status();
    render_header(frame, splits.header, &state.palette, status, dot);

    // ---- Body ----
    let chat = ChatsLayout::new(splits.body);
    let width = chat.inner.width as usize;
    let viewport_height = chat.inner.height as usize;

    if let Some(shimmer) = state.typing_shimmer.as_mut() {
        shimmer.tick();
    }
    if state.cache_dirty || state.is_animating() {
        state.cached_lines = chat_lines(state, width);
        state.cache_dirty = false;
    }
    let content_height = state.cached_lines.len();

    // state.scroll counts lines up from the bottom
    let max_scroll = chat_scroll_offset(usize::MAX, content_height, viewport_height);
    state.scroll = state.scroll.min(max_scroll);
    state.last_content_height = content_height;
    state.last_viewport_height = viewport_height;
    let offset_from_top = max_scroll - state.scroll;

    let palette = &state.palette;
    if state.messages.is_empty() {
        let welcome = vec![
            Line::default(),
            Line::from(Span::styled(HEADER_TITLE, text_style(palette.text))),
            Line::default(),
            Line::from(Span::styled(
                "Type a message to begin. Try \"draw a lighthouse\" or \"search: rust 2024 edition\".",
                text_muted_style(palette.text_muted),
            )),
        ];
        frame.render_widget(
            Paragraph::new(welcome)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            chat.inner,
        );
    } else {
        let visible: Vec<Line> = state
            .cached_lines
            .iter()
            .skip(offset_from_top)
            .take(viewport_height)
            .cloned()
            .collect();
        frame.render_widget(Paragraph::new(visible).wrap(Wrap { trim: false }), chat.inner);
    }

    if content_height > viewport_height && viewport_height > 0 {
        let track = chat.scrollbar();
        let thumb_height = ((viewport_height * viewport_height).div_ceil(content_height)).max(1) as u16;
        let ratio = if max_scroll == 0 {
            1.0
        } else {
            offset_from_top as f64 / max_scroll as f64
        };
        let thumb_y = (ratio * (track.height.saturating_sub(thumb_height)) as f64).round() as u16;
        frame.render_widget(Block::default().style(background_style(palette.scrollbar_track)), track);
        frame.render_widget(
            Block::default().style(background_style(palette.scrollbar_thumb)),
            Rect {
                y: track.y + thumb_y,
                height: thumb_height.min(track.height),
                ..track
            },
        );
    }

    // ---- Footer: input block + shortcut ----
    let (input_rect, shortcut_rect) = vertical_split(splits.footer, 3);
    let block = block_for_input_bordered(palette, true);
    let inner = block.inner(input_rect);
    frame.render_widget(block, input_rect);

    let (icon_style, content, content_style) = if state.input_buffer.is_empty() {
        (text_style(palette.accent), INPUT_PLACEHOLDER.to_string(), text_style(palette.text_placeholder))
    } else {
        (text_style(palette.success), state.input_buffer.clone(), text_style(palette.text))
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(INPUT_ICON, icon_style),
            Span::styled(content, content_style),
        ])),
        inner,
    );

    let before_cursor = &state.input_buffer[..state.input_cursor.min(state.input_buffer.len())];
    let cursor_col = (inner.x as usize + INPUT_ICON.width() + before_cursor.width())
        .min((inner.x + inner.width) as usize) as u16;
    frame.set_cursor_position((cursor_col, inner.y));

    frame.render_widget(
        Paragraph::new(shortcut_line(
            palette,
            state.activity.is_pending(),
            !state.input_buffer.is_empty(),
            state.last_media().is_some(),
        )),
        shortcut_inner_rect(shortcut_rect),
    );
}
