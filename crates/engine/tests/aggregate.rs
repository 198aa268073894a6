use engine::{
    Currency, EngineError, IncomeDataset, IncomeRecord, Money, Totals, aggregate,
};

/// Builds `dates` consecutive days with `categories` records each.
///
/// Category `c` on day `d` earns `1000 * (c + 1) + d` gross and 80% of that
/// net, all whole reais.
fn generated(dates: usize, categories: usize) -> IncomeDataset {
    let entries = (0..dates).rev().map(|day| {
        let key = format!("2024-01-{:02}", day + 1);
        let records = (0..categories)
            .map(|category| {
                let gross = (1000 * (category + 1) + day) as f64;
                IncomeRecord::from_major(format!("Category {category}"), gross, gross * 0.8)
                    .unwrap()
            })
            .collect();
        (key, records)
    });
    IncomeDataset::from_entries(entries).unwrap()
}

fn expected_gross(day: usize, categories: usize) -> Money {
    let reais: usize = (0..categories).map(|c| 1000 * (c + 1) + day).sum();
    Money::from_cents(reais as i64 * 100)
}

#[test]
fn generated_dataset_sums_exactly() {
    let (dates, categories) = (28, 4);
    let series = aggregate(&generated(dates, categories)).unwrap();

    assert_eq!(series.dates.len(), dates);
    assert_eq!(series.dates.first().unwrap(), "2024-01-01");
    assert_eq!(series.dates.last().unwrap(), "2024-01-28");
    assert_eq!(series.categories.len(), categories);

    for (day, totals) in series.totals.iter().enumerate() {
        assert_eq!(totals.gross, expected_gross(day, categories));
    }

    assert_eq!(series.deltas.len(), dates - 1);
    for delta in &series.deltas {
        assert_eq!(delta.gross, Money::from_cents(categories as i64 * 100));
    }

    assert_eq!(
        series.latest.totals,
        *series.totals.last().unwrap(),
    );
}

#[test]
fn deltas_match_consecutive_totals() {
    let series = aggregate(&generated(10, 3)).unwrap();
    for (i, delta) in series.deltas.iter().enumerate() {
        assert_eq!(delta.date, series.dates[i + 1]);
        let change = series.totals[i + 1].change_since(series.totals[i]).unwrap();
        assert_eq!(delta.gross, change.gross);
        assert_eq!(delta.net, change.net);
    }
}

#[test]
fn salary_example() {
    let dataset = IncomeDataset::from_entries([
        (
            "2024-01-02",
            vec![IncomeRecord::from_major("Salary", 1200.0, 950.0).unwrap()],
        ),
        (
            "2024-01-01",
            vec![IncomeRecord::from_major("Salary", 1000.0, 800.0).unwrap()],
        ),
    ])
    .unwrap();

    let series = aggregate(&dataset).unwrap();

    assert_eq!(series.dates, ["2024-01-01", "2024-01-02"]);
    let gross: Vec<f64> = series.gross_totals().map(Money::to_major).collect();
    assert_eq!(gross, [1000.0, 1200.0]);
    assert_eq!(series.deltas.len(), 1);
    assert_eq!(series.deltas[0].gross.to_major(), 200.0);
    assert_eq!(series.deltas[0].net.to_major(), 150.0);
    assert_eq!(
        series.latest.totals,
        Totals {
            gross: Money::from_cents(1200_00),
            net: Money::from_cents(950_00),
        }
    );
    assert_eq!(
        series.latest.totals.gross.format(Currency::Brl),
        "R$ 1.200,00"
    );
}

#[test]
fn category_gaps_are_none() {
    let dataset = IncomeDataset::from_entries([
        (
            "2024-01-01",
            vec![
                IncomeRecord::from_major("Salary", 1000.0, 800.0).unwrap(),
                IncomeRecord::from_major("Freelance", 300.0, 250.0).unwrap(),
            ],
        ),
        (
            "2024-01-02",
            vec![IncomeRecord::from_major("Salary", 1000.0, 800.0).unwrap()],
        ),
    ])
    .unwrap();

    let series = aggregate(&dataset).unwrap();
    let freelance = series
        .category_series
        .iter()
        .find(|s| s.name == "Freelance")
        .unwrap();
    assert_eq!(freelance.gross, [Some(Money::from_cents(300_00)), None]);
}

#[test]
fn sub_cent_amounts_round_only_when_formatted() {
    let records = (0..3)
        .map(|_| IncomeRecord::from_major("Juros", 0.004, 0.003).unwrap())
        .collect();
    let dataset = IncomeDataset::from_entries([("2024-01", records)]).unwrap();

    let series = aggregate(&dataset).unwrap();
    assert_eq!(series.latest.totals.gross.format(Currency::Brl), "R$ 0,01");
    assert_eq!(series.latest.totals.net.format(Currency::Brl), "R$ 0,01");
    assert_eq!(series.gross_totals().next().map(Money::to_major), Some(0.012));
}

#[test]
fn huge_amounts_overflow_into_an_error() {
    let dataset = IncomeDataset::from_entries([(
        "2024-01-01",
        vec![
            IncomeRecord::from_major("Fundo", 6e12, 1.0).unwrap(),
            IncomeRecord::from_major("Fundo", 6e12, 1.0).unwrap(),
        ],
    )])
    .unwrap();
    assert!(matches!(aggregate(&dataset), Err(EngineError::Overflow(_))));
}

#[test]
fn empty_dataset_reports_error() {
    let dataset = IncomeDataset::from_entries(Vec::<(String, Vec<IncomeRecord>)>::new()).unwrap();
    assert_eq!(aggregate(&dataset).unwrap_err(), EngineError::EmptyDataset);
}
