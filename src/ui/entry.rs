use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryView {
    pub engine_label: String,
    pub text: String,
    /// Cursor position in chars.
    pub cursor: usize,
    pub placeholder: String,
    pub enabled: bool,
}

pub fn draw_entry(frame: &mut Frame<'_>, area: Rect, view: &EntryView) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let border = if view.enabled {
        Color::Gray
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let line = build_entry_line(view, inner.width as usize);
    frame.render_widget(Paragraph::new(line), inner);
}

/// Width of the engine selector including brackets and the trailing gap.
pub fn selector_width(view: &EntryView) -> u16 {
    let label = selector_label(view);
    u16::try_from(label.width() + 1).unwrap_or(u16::MAX)
}

fn selector_label(view: &EntryView) -> String {
    if view.enabled {
        format!("[{} ▾]", view.engine_label)
    } else {
        "[no engines]".to_string()
    }
}

fn build_entry_line(view: &EntryView, width: usize) -> Line<'static> {
    let label = selector_label(view);
    let label_style = if view.enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let prefix_width = label.width() + 1;
    let mut spans = vec![Span::styled(label, label_style), Span::raw(" ")];

    let max_text_width = width.saturating_sub(prefix_width).max(1);
    if !view.enabled {
        return Line::from(spans);
    }

    if view.text.is_empty() {
        spans.push(Span::styled(" ".to_string(), Style::default().reversed()));
        let hint: String = truncate_to_width(&view.placeholder, max_text_width.saturating_sub(1));
        spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        return Line::from(spans);
    }

    spans.extend(field_spans(&view.text, view.cursor, max_text_width));
    Line::from(spans)
}

/// Visible slice of the field with a software caret, scrolled so the caret
/// stays inside `max_width` columns.
fn field_spans(text: &str, cursor: usize, max_width: usize) -> Vec<Span<'static>> {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());

    let mut start = 0usize;
    while start < cursor && columns(&chars[start..cursor]) + 1 > max_width {
        start += 1;
    }

    let mut spans = Vec::new();
    let mut used = 0usize;
    for (idx, ch) in chars.iter().enumerate().skip(start) {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > max_width {
            break;
        }
        used += ch_width;
        if idx == cursor {
            spans.push(Span::styled(ch.to_string(), Style::default().reversed()));
        } else {
            spans.push(Span::raw(ch.to_string()));
        }
    }
    if cursor == chars.len() && used < max_width {
        spans.push(Span::styled(" ".to_string(), Style::default().reversed()));
    }
    spans
}

fn columns(chars: &[char]) -> usize {
    chars.iter().map(|ch| ch.width().unwrap_or(0)).sum()
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut used = 0usize;
    text.chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= max_width
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::style::{Color, Modifier};

    use super::{EntryView, build_entry_line, draw_entry, field_spans, selector_width};

    fn view(text: &str, cursor: usize) -> EntryView {
        EntryView {
            engine_label: "DuckDuckGo".to_string(),
            text: text.to_string(),
            cursor,
            placeholder: "Search Using DuckDuckGo".to_string(),
            enabled: true,
        }
    }

    #[test]
    fn empty_field_shows_placeholder_dimmed() {
        let line = build_entry_line(&view("", 0), 60);
        let last = line.spans.last().expect("placeholder span");
        assert_eq!(last.content.as_ref(), "Search Using DuckDuckGo");
        assert_eq!(last.style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn caret_highlights_character_under_cursor() {
        let spans = field_spans("abc", 1, 10);
        assert_eq!(spans[1].content.as_ref(), "b");
        assert!(spans[1].style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn caret_at_end_is_a_trailing_space() {
        let spans = field_spans("abc", 3, 10);
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[3].content.as_ref(), " ");
    }

    #[test]
    fn long_text_scrolls_to_keep_caret_visible() {
        let spans = field_spans("abcdefghij", 10, 4);
        let visible: String = spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(visible, "hij ");
    }

    #[test]
    fn wide_characters_count_two_columns() {
        let spans = field_spans("あいう", 0, 4);
        let visible: String = spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(visible, "あい");
    }

    #[test]
    fn selector_width_counts_display_columns() {
        assert_eq!(selector_width(&view("", 0)), 15);
    }

    #[test]
    fn disabled_entry_draws_without_panic() {
        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).expect("test terminal should initialize");
        let disabled = EntryView::default();
        terminal
            .draw(|frame| draw_entry(frame, Rect::new(0, 0, 30, 3), &disabled))
            .expect("draw should pass");
    }
}
