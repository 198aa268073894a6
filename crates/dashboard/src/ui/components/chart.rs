use api_types::chart::{ChartSpec, ChartType};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
};

use crate::ui::{components::card::Card, theme::Theme};

/// Draws a Chart.js spec in the terminal.
///
/// Bar specs become vertical bars from zero, datasets side by side around
/// each label; line specs connect the points of each dataset. `null` values
/// are skipped.
pub fn render_chart_spec(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    spec: &ChartSpec,
    theme: &Theme,
) {
    let card = Card::new(title, theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if spec.data.labels.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Not enough dates to chart.",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let points = plot_points(spec);
    let background = rgb_of(theme.surface);
    let (graph_type, marker) = match spec.kind {
        ChartType::Bar => (GraphType::Bar, Marker::HalfBlock),
        ChartType::Line => (GraphType::Line, Marker::Braille),
    };

    let datasets: Vec<Dataset<'_>> = spec
        .data
        .datasets
        .iter()
        .zip(&points)
        .map(|(dataset, data)| {
            let css = match spec.kind {
                ChartType::Line => dataset
                    .border_color
                    .as_deref()
                    .unwrap_or(dataset.background_color.as_str()),
                ChartType::Bar => dataset.background_color.as_str(),
            };
            let color = parse_css_color(css, background).unwrap_or(theme.accent);
            Dataset::default()
                .name(dataset.label.clone())
                .marker(marker)
                .graph_type(graph_type)
                .style(Style::default().fg(color))
                .data(data)
        })
        .collect();

    let begin_at_zero = spec
        .options
        .scales
        .y
        .as_ref()
        .and_then(|axis| axis.begin_at_zero)
        .unwrap_or(false);
    let y_title = spec
        .options
        .scales
        .y
        .as_ref()
        .and_then(|axis| axis.title.as_ref())
        .map(|title| title.text.clone())
        .unwrap_or_default();
    let [y_min, y_max] = y_bounds(&points, begin_at_zero || spec.kind == ChartType::Bar);
    let y_labels = [y_min, (y_min + y_max) / 2.0, y_max]
        .into_iter()
        .map(|value| format!("{value:.0}"))
        .collect::<Vec<_>>();

    let label_count = spec.data.labels.len();
    let axis_style = Style::default().fg(theme.dim);
    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([-0.5, label_count as f64 - 0.5])
                .labels(x_labels(&spec.data.labels)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(y_title, Style::default().fg(theme.text_muted)))
                .style(axis_style)
                .bounds([y_min, y_max])
                .labels(y_labels),
        )
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

    frame.render_widget(chart, inner);
}

/// One point list per dataset; bar datasets are spread around their label.
fn plot_points(spec: &ChartSpec) -> Vec<Vec<(f64, f64)>> {
    let count = spec.data.datasets.len();
    spec.data
        .datasets
        .iter()
        .enumerate()
        .map(|(index, dataset)| {
            let offset = match spec.kind {
                ChartType::Bar => bar_offset(index, count),
                ChartType::Line => 0.0,
            };
            dataset
                .data
                .iter()
                .enumerate()
                .filter_map(|(x, value)| value.map(|y| (x as f64 + offset, y)))
                .collect()
        })
        .collect()
}

fn bar_offset(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    -0.4 + 0.8 * index as f64 / (count - 1) as f64
}

fn y_bounds(points: &[Vec<(f64, f64)>], include_zero: bool) -> [f64; 2] {
    let (mut min, mut max) = points
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });
    if !min.is_finite() {
        return [0.0, 1.0];
    }
    if include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    let pad = (max - min).max(1.0) / 20.0;
    [if min < 0.0 { min - pad } else { min }, max + pad]
}

fn x_labels(labels: &[String]) -> Vec<String> {
    if labels.len() <= 6 {
        return labels.to_vec();
    }
    let middle = labels.len() / 2;
    [0, middle, labels.len() - 1]
        .into_iter()
        .map(|index| labels[index].clone())
        .collect()
}

fn rgb_of(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => (0, 0, 0),
    }
}

/// Parses `#RRGGBB`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
///
/// Translucent colors are blended over `background` since the terminal has
/// no alpha channel.
pub fn parse_css_color(value: &str, background: (u8, u8, u8)) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |at: usize| u8::from_str_radix(hex.get(at..at + 2)?, 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }

    let inner = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let (r, g, b, alpha) = match parts.as_slice() {
        [r, g, b] => (r, g, b, 1.0),
        [r, g, b, a] => (r, g, b, a.parse::<f64>().ok()?.clamp(0.0, 1.0)),
        _ => return None,
    };
    let blend = |fg: &str, bg: u8| -> Option<u8> {
        let fg = f64::from(fg.parse::<u8>().ok()?);
        Some((fg * alpha + f64::from(bg) * (1.0 - alpha)).round() as u8)
    };
    Some(Color::Rgb(
        blend(r, background.0)?,
        blend(g, background.1)?,
        blend(b, background.2)?,
    ))
}

#[cfg(test)]
mod tests {
    use api_types::chart::{ChartData, ChartDataset, ChartOptions, Scales};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn spec(kind: ChartType, datasets: Vec<Vec<Option<f64>>>) -> ChartSpec {
        ChartSpec {
            kind,
            data: ChartData {
                labels: vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
                datasets: datasets
                    .into_iter()
                    .enumerate()
                    .map(|(i, data)| ChartDataset {
                        label: format!("Series {i}"),
                        data,
                        background_color: "#E4572E".to_string(),
                        border_color: None,
                        tension: None,
                    })
                    .collect(),
            },
            options: ChartOptions {
                responsive: true,
                scales: Scales::default(),
                plugins: None,
            },
        }
    }

    #[test]
    fn parses_hex_and_rgba() {
        assert_eq!(
            parse_css_color("#E4572E", (0, 0, 0)),
            Some(Color::Rgb(228, 87, 46))
        );
        assert_eq!(
            parse_css_color("rgba(200, 100, 0, 0.5)", (0, 0, 0)),
            Some(Color::Rgb(100, 50, 0))
        );
        assert_eq!(
            parse_css_color("rgb(1, 2, 3)", (9, 9, 9)),
            Some(Color::Rgb(1, 2, 3))
        );
        assert_eq!(parse_css_color("red", (0, 0, 0)), None);
        assert_eq!(parse_css_color("#12345", (0, 0, 0)), None);
    }

    #[test]
    fn bar_points_spread_around_labels_and_skip_gaps() {
        let points = plot_points(&spec(
            ChartType::Bar,
            vec![vec![Some(1.0), None], vec![Some(2.0), Some(3.0)]],
        ));
        assert_eq!(points[0], [(-0.4, 1.0)]);
        let xs: Vec<f64> = points[1].iter().map(|&(x, _)| x).collect();
        let ys: Vec<f64> = points[1].iter().map(|&(_, y)| y).collect();
        assert!((xs[0] - 0.4).abs() < 1e-9 && (xs[1] - 1.4).abs() < 1e-9);
        assert_eq!(ys, [2.0, 3.0]);
    }

    #[test]
    fn line_points_sit_on_labels() {
        let points = plot_points(&spec(ChartType::Line, vec![vec![Some(5.0), Some(7.0)]]));
        assert_eq!(points[0], [(0.0, 5.0), (1.0, 7.0)]);
    }

    #[test]
    fn y_bounds_include_zero_for_bars() {
        let points = vec![vec![(0.0, 100.0), (1.0, 200.0)]];
        assert_eq!(y_bounds(&points, true), [0.0, 210.0]);
        assert_eq!(y_bounds(&points, false), [100.0, 205.0]);
        assert_eq!(y_bounds(&[], true), [0.0, 1.0]);
    }

    #[test]
    fn long_label_lists_are_thinned() {
        let labels: Vec<String> = (1..=9).map(|d| format!("2024-01-0{d}")).collect();
        assert_eq!(
            x_labels(&labels),
            ["2024-01-01", "2024-01-05", "2024-01-09"]
        );
    }

    #[test]
    fn renders_title_into_buffer() {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        let spec = spec(ChartType::Line, vec![vec![Some(5.0), Some(7.0)]]);
        terminal
            .draw(|frame| {
                render_chart_spec(frame, frame.area(), "Totais", &spec, &Theme::default())
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Totais"));
    }
}
