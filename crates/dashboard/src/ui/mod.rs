pub mod components;
pub mod keymap;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::{
    app::AppState,
    charts::DashboardView,
    ui::components::{card::StatCard, chart::render_chart_spec, tabs},
};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    match &state.dashboard {
        Some(view) => render_dashboard(frame, layout[1], state, view, &theme),
        None => render_empty(frame, layout[1], &theme),
    }
    render_bottom_bar(frame, layout[2], &theme);
}

fn render_dashboard(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    view: &DashboardView,
    theme: &Theme,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Value cards
            Constraint::Length(1), // Chart tabs
            Constraint::Min(0),    // Chart
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[0]);
    let period = format!("em {}", view.summary.date);
    StatCard::new("Valor Bruto Atual", &view.summary.gross, theme)
        .color(theme.accent)
        .subtitle(period.clone())
        .render(frame, cards[0]);
    StatCard::new("Valor Líquido Atual", &view.summary.net, theme)
        .color(theme.positive)
        .subtitle(period)
        .render(frame, cards[1]);

    tabs::render_tabs(frame, layout[1], state.selected, theme);
    render_chart_spec(
        frame,
        layout[2],
        state.selected.label(),
        state.selected.spec(&view.charts),
        theme,
    );
}

fn render_empty(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled("No data.", Style::default().fg(theme.text_muted))),
        Line::from(Span::styled(
            "Press r to reload.",
            Style::default().fg(theme.dim),
        )),
    ];
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), middle);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    // Load failures only reach the log; the bar stays neutral without data.
    let (status, status_style) = if state.dashboard.is_some() {
        ("OK", Style::default().fg(theme.positive))
    } else {
        ("-", Style::default().fg(theme.dim))
    };

    let line = Line::from(vec![
        Span::styled("Source", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.source)),
        Span::styled("Currency", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.currency)),
        Span::styled("Refresh", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let mut parts = tabs::tab_shortcuts(theme);
    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("r", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" reload"));
    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
