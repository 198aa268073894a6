//! Maps [`DerivedSeries`] onto Chart.js specifications.
//!
//! Label order is always the ascending date order and series order follows
//! category discovery (gross before net), so a category gets the same color
//! in every chart built from the same data.

use api_types::chart::{
    Axis, AxisTitle, ChartData, ChartDataset, ChartOptions, ChartSpec, ChartType, Plugins, Scales,
    Tooltip, TooltipMode,
};
use engine::{Currency, DerivedSeries, Money};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn rgba(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }
}

/// Category colors, assigned by discovery index and reused cyclically.
pub const BASE_COLORS: [Rgb; 5] = [
    Rgb::new(0xE4, 0x57, 0x2E),
    Rgb::new(0x3D, 0x61, 0x9A),
    Rgb::new(0x3C, 0x88, 0x7E),
    Rgb::new(0xC2, 0xB8, 0x93),
    Rgb::new(0x7A, 0x65, 0x63),
];

const NET_TINT_ALPHA: f64 = 0.6;
const TOTAL_FILL_ALPHA: f64 = 0.5;
const GAIN_FILL_ALPHA: f64 = 0.7;
const LINE_TENSION: f64 = 0.1;

pub const GROSS_COLOR: Rgb = Rgb::new(0, 123, 255);
pub const NET_COLOR: Rgb = Rgb::new(40, 167, 69);

pub fn category_color(index: usize) -> Rgb {
    BASE_COLORS[index % BASE_COLORS.len()]
}

fn amounts(values: &[Option<Money>]) -> Vec<Option<f64>> {
    values.iter().map(|value| value.map(Money::to_major)).collect()
}

fn totals(values: impl Iterator<Item = Money>) -> Vec<Option<f64>> {
    values.map(|value| Some(value.to_major())).collect()
}

fn y_axis(title: &str, begin_at_zero: bool, stacked: Option<bool>) -> Axis {
    Axis {
        stacked,
        begin_at_zero: Some(begin_at_zero),
        title: Some(AxisTitle {
            display: true,
            text: title.to_string(),
        }),
    }
}

/// Two bars per category and date: gross in the base color, net in a
/// translucent tint of it.
pub fn bar_chart(series: &DerivedSeries) -> ChartSpec {
    let datasets = series
        .category_series
        .iter()
        .enumerate()
        .flat_map(|(index, category)| {
            let color = category_color(index);
            [
                ChartDataset {
                    label: format!("{} (Bruto)", category.name),
                    data: amounts(&category.gross),
                    background_color: color.hex(),
                    border_color: None,
                    tension: None,
                },
                ChartDataset {
                    label: format!("{} (Líquido)", category.name),
                    data: amounts(&category.net),
                    background_color: color.rgba(NET_TINT_ALPHA),
                    border_color: None,
                    tension: None,
                },
            ]
        })
        .collect();

    ChartSpec {
        kind: ChartType::Bar,
        data: ChartData {
            labels: series.dates.clone(),
            datasets,
        },
        options: ChartOptions {
            responsive: true,
            scales: Scales {
                x: Some(Axis {
                    stacked: Some(false),
                    ..Axis::default()
                }),
                y: Some(y_axis("Valor (R$)", false, Some(false))),
            },
            plugins: Some(Plugins {
                tooltip: Tooltip {
                    mode: TooltipMode::Index,
                    intersect: false,
                },
            }),
        },
    }
}

/// Gross and net totals per date.
pub fn line_chart(series: &DerivedSeries) -> ChartSpec {
    let line = |label: &str, color: Rgb, data| ChartDataset {
        label: label.to_string(),
        data,
        background_color: color.rgba(TOTAL_FILL_ALPHA),
        border_color: Some(color.hex()),
        tension: Some(LINE_TENSION),
    };

    ChartSpec {
        kind: ChartType::Line,
        data: ChartData {
            labels: series.dates.clone(),
            datasets: vec![
                line("Total Bruto", GROSS_COLOR, totals(series.gross_totals())),
                line("Total Líquido", NET_COLOR, totals(series.net_totals())),
            ],
        },
        options: ChartOptions {
            responsive: true,
            scales: Scales {
                x: None,
                y: Some(y_axis("Valor (R$)", false, None)),
            },
            plugins: None,
        },
    }
}

/// Day-over-day change of the totals; the first date has no bar.
pub fn gain_chart(series: &DerivedSeries) -> ChartSpec {
    let bar = |label: &str, color: Rgb, data| ChartDataset {
        label: label.to_string(),
        data,
        background_color: color.rgba(GAIN_FILL_ALPHA),
        border_color: None,
        tension: None,
    };

    ChartSpec {
        kind: ChartType::Bar,
        data: ChartData {
            labels: series.deltas.iter().map(|delta| delta.date.clone()).collect(),
            datasets: vec![
                bar(
                    "Rendimento Bruto por Data",
                    GROSS_COLOR,
                    totals(series.deltas.iter().map(|delta| delta.gross)),
                ),
                bar(
                    "Rendimento Líquido por Data",
                    NET_COLOR,
                    totals(series.deltas.iter().map(|delta| delta.net)),
                ),
            ],
        },
        options: ChartOptions {
            responsive: true,
            scales: Scales {
                x: None,
                y: Some(y_axis("Rendimento (R$)", true, None)),
            },
            plugins: None,
        },
    }
}

/// The three charts, keyed by the canvas they are drawn on.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSet {
    pub bar_chart: ChartSpec,
    pub line_chart: ChartSpec,
    pub gain_chart: ChartSpec,
}

impl ChartSet {
    pub fn from_series(series: &DerivedSeries) -> Self {
        Self {
            bar_chart: bar_chart(series),
            line_chart: line_chart(series),
            gain_chart: gain_chart(series),
        }
    }
}

/// Latest-period totals, formatted for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub date: String,
    pub gross: String,
    pub net: String,
}

impl Summary {
    pub fn from_series(series: &DerivedSeries, currency: Currency) -> Self {
        Self {
            date: series.latest.date.clone(),
            gross: series.latest.totals.gross.format(currency),
            net: series.latest.totals.net.format(currency),
        }
    }
}

/// Everything a display needs: the two formatted totals and the charts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardView {
    pub summary: Summary,
    pub charts: ChartSet,
}

impl DashboardView {
    pub fn new(series: &DerivedSeries, currency: Currency) -> Self {
        Self {
            summary: Summary::from_series(series, currency),
            charts: ChartSet::from_series(series),
        }
    }
}

#[cfg(test)]
mod tests {
    use engine::{IncomeDataset, IncomeRecord, aggregate};

    use super::*;

    fn series() -> DerivedSeries {
        let dataset = IncomeDataset::from_entries([
            (
                "2024-01-02",
                vec![IncomeRecord::from_major("Salary", 1200.0, 950.0).unwrap()],
            ),
            (
                "2024-01-01",
                vec![
                    IncomeRecord::from_major("Salary", 1000.0, 800.0).unwrap(),
                    IncomeRecord::from_major("Freelance", 300.0, 250.5).unwrap(),
                ],
            ),
        ])
        .unwrap();
        aggregate(&dataset).unwrap()
    }

    #[test]
    fn colors_render_as_css() {
        assert_eq!(BASE_COLORS[0].hex(), "#E4572E");
        assert_eq!(BASE_COLORS[0].rgba(0.6), "rgba(228, 87, 46, 0.6)");
        assert_eq!(category_color(5), BASE_COLORS[0]);
    }

    #[test]
    fn bar_chart_pairs_gross_and_net_per_category() {
        let spec = bar_chart(&series());
        assert_eq!(spec.kind, ChartType::Bar);
        assert_eq!(spec.data.labels, ["2024-01-01", "2024-01-02"]);

        let labels: Vec<_> = spec.data.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Salary (Bruto)",
                "Salary (Líquido)",
                "Freelance (Bruto)",
                "Freelance (Líquido)",
            ]
        );

        let freelance_net = &spec.data.datasets[3];
        assert_eq!(freelance_net.data, [Some(250.5), None]);
        assert_eq!(freelance_net.background_color, "rgba(61, 97, 154, 0.6)");
        assert_eq!(spec.data.datasets[2].background_color, "#3D619A");
    }

    #[test]
    fn category_colors_match_across_builds() {
        let first = bar_chart(&series());
        let second = bar_chart(&series());
        let colors = |spec: &ChartSpec| {
            spec.data
                .datasets
                .iter()
                .map(|d| d.background_color.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(colors(&first), colors(&second));
    }

    #[test]
    fn line_chart_has_totals() {
        let spec = line_chart(&series());
        assert_eq!(spec.kind, ChartType::Line);
        assert_eq!(spec.data.datasets[0].label, "Total Bruto");
        assert_eq!(spec.data.datasets[0].data, [Some(1300.0), Some(1200.0)]);
        assert_eq!(spec.data.datasets[1].data, [Some(1050.5), Some(950.0)]);
        assert_eq!(spec.data.datasets[0].border_color.as_deref(), Some("#007BFF"));
    }

    #[test]
    fn gain_chart_skips_first_date() {
        let spec = gain_chart(&series());
        assert_eq!(spec.data.labels, ["2024-01-02"]);
        assert_eq!(spec.data.datasets[0].data, [Some(-100.0)]);
        assert_eq!(spec.data.datasets[1].data, [Some(-100.5)]);
        assert_eq!(
            spec.options.scales.y.as_ref().and_then(|y| y.begin_at_zero),
            Some(true)
        );
    }

    #[test]
    fn summary_formats_latest_totals() {
        let summary = Summary::from_series(&series(), Currency::Brl);
        assert_eq!(
            summary,
            Summary {
                date: "2024-01-02".to_string(),
                gross: "R$ 1.200,00".to_string(),
                net: "R$ 950,00".to_string(),
            }
        );
    }

    #[test]
    fn chart_set_serializes_by_canvas_id() {
        let view = DashboardView::new(&series(), Currency::Brl);
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["charts"]["barChart"]["type"], "bar");
        assert_eq!(value["charts"]["lineChart"]["type"], "line");
        assert_eq!(value["charts"]["gainChart"]["data"]["labels"][0], "2024-01-02");
        assert_eq!(value["summary"]["gross"], "R$ 1.200,00");
    }
}
