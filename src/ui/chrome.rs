use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusView {
    pub mode: &'static str,
    pub message: String,
    pub suggestions: bool,
    pub modified: bool,
}

pub fn draw_status(frame: &mut Frame<'_>, area: Rect, view: &StatusView) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    frame.render_widget(Paragraph::new(status_line(view)), area);
}

fn status_line(view: &StatusView) -> Line<'static> {
    let suggest = if view.suggestions {
        "suggest:on"
    } else {
        "suggest:off"
    };
    let mut spans = vec![
        Span::styled(
            format!(" {} ", view.mode),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ),
        Span::raw(format!(" {suggest} ")),
    ];
    if view.modified {
        spans.push(Span::styled("[+] ", Style::default().fg(Color::Yellow)));
    }
    if !view.message.is_empty() {
        spans.push(Span::raw(format!("| {}", view.message)));
    }
    Line::from(spans)
}
