use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::ChartKind, ui::theme::Theme};

/// Renders the chart selector, numbered the same way as the `1`-`3` keys.
pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, active: ChartKind, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];

    for (i, kind) in ChartKind::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }

        let label = format!("{} {}", i + 1, kind.label());
        if *kind == active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn tab_shortcuts(theme: &Theme) -> Vec<Span<'static>> {
    vec![
        Span::styled("1", Style::default().fg(theme.accent)),
        Span::raw("-"),
        Span::styled("3", Style::default().fg(theme.accent)),
        Span::raw("/"),
        Span::styled("Tab", Style::default().fg(theme.accent)),
        Span::raw(" chart"),
    ]
}
