//! Static outputs of the dashboard: a JSON document and a self-contained
//! HTML page that draws the charts with Chart.js.

use crate::{charts::DashboardView, error::Result};

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js";

const STYLE: &str = "
    body { font-family: sans-serif; margin: 2rem; background: #f5f6f8; color: #222; }
    .summary { display: flex; gap: 1rem; margin-bottom: 2rem; }
    .card { background: #fff; border-radius: 8px; padding: 1rem 1.5rem; box-shadow: 0 1px 3px rgba(0, 0, 0, 0.15); }
    .card h2 { font-size: 1rem; margin: 0 0 0.5rem; color: #666; }
    .card p { font-size: 1.6rem; margin: 0; font-weight: bold; }
    .chart { background: #fff; border-radius: 8px; padding: 1rem; margin-bottom: 2rem; }
";

const BOOT_SCRIPT: &str = "
      for (const [id, spec] of Object.entries(charts)) {
        new Chart(document.getElementById(id), spec);
      }
";

pub fn to_json(view: &DashboardView) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}

/// Renders the dashboard page.
///
/// The formatted totals land in `#current-gross-value` and
/// `#current-net-value`; each chart spec is bound to the canvas with the same
/// id (`barChart`, `lineChart`, `gainChart`).
pub fn render_html(view: &DashboardView) -> Result<String> {
    let charts = script_safe(&serde_json::to_string(&view.charts)?);
    let summary = &view.summary;

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n");
    page.push_str("  <meta charset=\"utf-8\">\n");
    page.push_str("  <title>Rendimentos</title>\n");
    page.push_str(&format!("  <script src=\"{CHART_JS_URL}\"></script>\n"));
    page.push_str(&format!("  <style>{STYLE}  </style>\n"));
    page.push_str("</head>\n<body>\n");
    page.push_str(&format!(
        "  <p class=\"period\">Último período: {}</p>\n",
        escape_html(&summary.date)
    ));
    page.push_str("  <section class=\"summary\">\n");
    page.push_str(&format!(
        "    <div class=\"card\"><h2>Valor Bruto Atual</h2><p id=\"current-gross-value\">{}</p></div>\n",
        escape_html(&summary.gross)
    ));
    page.push_str(&format!(
        "    <div class=\"card\"><h2>Valor Líquido Atual</h2><p id=\"current-net-value\">{}</p></div>\n",
        escape_html(&summary.net)
    ));
    page.push_str("  </section>\n");
    for id in ["barChart", "lineChart", "gainChart"] {
        page.push_str(&format!(
            "  <div class=\"chart\"><canvas id=\"{id}\"></canvas></div>\n"
        ));
    }
    page.push_str("  <script>\n");
    page.push_str(&format!("      const charts = {charts};\n"));
    page.push_str(BOOT_SCRIPT);
    page.push_str("  </script>\n</body>\n</html>\n");

    Ok(page)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Makes serialized JSON safe to inline in a `<script>` element.
///
/// `<`, `>` and `&` only occur inside JSON strings, where the `\u` escapes
/// decode to the same characters.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

#[cfg(test)]
mod tests {
    use engine::{Currency, IncomeDataset, IncomeRecord, aggregate};

    use super::*;

    fn view(category: &str) -> DashboardView {
        let dataset = IncomeDataset::from_entries([(
            "2024-01-01",
            vec![IncomeRecord::from_major(category, 1200.0, 950.0).unwrap()],
        )])
        .unwrap();
        DashboardView::new(&aggregate(&dataset).unwrap(), Currency::Brl)
    }

    #[test]
    fn page_fills_value_slots_and_canvases() {
        let page = render_html(&view("Salary")).unwrap();
        assert!(page.contains("<p id=\"current-gross-value\">R$ 1.200,00</p>"));
        assert!(page.contains("<p id=\"current-net-value\">R$ 950,00</p>"));
        for id in ["barChart", "lineChart", "gainChart"] {
            assert!(page.contains(&format!("<canvas id=\"{id}\"></canvas>")));
        }
        assert!(page.contains("\"Salary (Bruto)\""));
    }

    #[test]
    fn category_names_cannot_close_the_script() {
        let page = render_html(&view("</script><b>")).unwrap();
        assert!(!page.contains("</script><b>"));
        assert!(page.contains("\\u003c/script\\u003e\\u003cb\\u003e (Bruto)"));
    }

    #[test]
    fn json_round_trips_through_serde() {
        let json = to_json(&view("Salary")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["net"], "R$ 950,00");
        assert_eq!(
            value["charts"]["barChart"]["data"]["datasets"][1]["label"],
            "Salary (Líquido)"
        );
    }

    #[test]
    fn escapes_markup_in_text() {
        assert_eq!(escape_html("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
