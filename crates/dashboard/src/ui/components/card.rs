use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::theme::Theme;

/// Rounded, titled container used for every dashboard panel.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self { title, theme }
    }

    pub fn block(&self) -> Block<'a> {
        Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.surface))
    }

    /// Returns the inner area after accounting for borders.
    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    pub fn render_frame(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(self.block(), area);
    }
}

/// One display slot: a title and a single emphasized value.
pub struct StatCard<'a> {
    title: &'a str,
    value: &'a str,
    color: Color,
    subtitle: Option<String>,
    theme: &'a Theme,
}

impl<'a> StatCard<'a> {
    pub fn new(title: &'a str, value: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            value,
            color: theme.text,
            subtitle: None,
            theme,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let card = Card::new(self.title, self.theme);
        let inner = card.inner(area);
        card.render_frame(frame, area);

        let mut lines = vec![Line::from(Span::styled(
            self.value,
            Style::default()
                .fg(self.color)
                .add_modifier(Modifier::BOLD),
        ))];
        if let Some(sub) = &self.subtitle {
            lines.push(Line::from(Span::styled(
                sub.as_str(),
                Style::default().fg(self.theme.dim),
            )));
        }

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }
}
