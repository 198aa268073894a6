use serde::{Deserialize, Serialize};

pub mod income {
    use std::{collections::HashMap, fmt};

    use serde::{
        Deserializer,
        de::{MapAccess, Visitor},
    };

    use super::*;

    /// One income source on a given date, as stored in `income.json`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct IncomeRecord {
        #[serde(rename = "nome")]
        pub name: String,
        /// Gross amount in major units.
        #[serde(rename = "bruto")]
        pub gross: f64,
        /// Net amount in major units.
        #[serde(rename = "liquido")]
        pub net: f64,
    }

    #[derive(Clone, Debug, PartialEq)]
    pub struct DateRecords {
        pub date: String,
        pub records: Vec<IncomeRecord>,
    }

    /// The whole input document: date keys mapped to their records.
    ///
    /// Keys keep the order they have in the document. A key repeated in the
    /// document keeps its first position and takes the last value, like
    /// `JSON.parse` does.
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct IncomeDocument {
        pub dates: Vec<DateRecords>,
    }

    struct DocumentVisitor;

    impl<'de> Visitor<'de> for DocumentVisitor {
        type Value = IncomeDocument;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping dates to income record lists")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut dates: Vec<DateRecords> = Vec::with_capacity(access.size_hint().unwrap_or(0));
            let mut positions: HashMap<String, usize> = HashMap::with_capacity(dates.capacity());
            while let Some((date, records)) =
                access.next_entry::<String, Vec<IncomeRecord>>()?
            {
                match positions.get(&date) {
                    Some(&index) => dates[index].records = records,
                    None => {
                        positions.insert(date.clone(), dates.len());
                        dates.push(DateRecords { date, records });
                    }
                }
            }
            Ok(IncomeDocument { dates })
        }
    }

    impl<'de> Deserialize<'de> for IncomeDocument {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(DocumentVisitor)
        }
    }
}

/// Chart.js-shaped configuration objects.
///
/// Field names serialize to what Chart.js expects (`backgroundColor`,
/// `beginAtZero`, ...) so a spec can be handed to `new Chart(canvas, spec)`
/// as is.
pub mod chart {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum ChartType {
        Bar,
        Line,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ChartSpec {
        #[serde(rename = "type")]
        pub kind: ChartType,
        pub data: ChartData,
        pub options: ChartOptions,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ChartData {
        pub labels: Vec<String>,
        pub datasets: Vec<ChartDataset>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ChartDataset {
        pub label: String,
        /// One value per label; `None` renders as a gap.
        pub data: Vec<Option<f64>>,
        pub background_color: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub border_color: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub tension: Option<f64>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ChartOptions {
        pub responsive: bool,
        pub scales: Scales,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub plugins: Option<Plugins>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct Scales {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub x: Option<Axis>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub y: Option<Axis>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Axis {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub stacked: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub begin_at_zero: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub title: Option<AxisTitle>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct AxisTitle {
        pub display: bool,
        pub text: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Plugins {
        pub tooltip: Tooltip,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum TooltipMode {
        Index,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Tooltip {
        pub mode: TooltipMode,
        pub intersect: bool,
    }
}
