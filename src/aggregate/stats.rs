//! Derived aggregates for the simple charts and the summary header.
//!
//! Everything here is a plain pass over the record set; rollup order always
//! follows first appearance so results are deterministic.

use chrono::Datelike;

use crate::data::{AgeBracket, Gender, Transaction};

/// Headline figures for the stat cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub transactions: usize,
    pub total_revenue: f64,
    /// None for a zero-record dataset — an explicit "no data" state instead
    /// of a NaN average.
    pub average_purchase: Option<f64>,
    pub top_category: Option<String>,
}

pub fn summarize(records: &[Transaction]) -> Summary {
    let total_revenue: f64 = records.iter().map(|t| t.line_value()).sum();
    let average_purchase = if records.is_empty() {
        None
    } else {
        Some(total_revenue / records.len() as f64)
    };

    let by_category = rollup(records, |t| t.category.clone());
    let top_category = by_category
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name.clone());

    Summary {
        transactions: records.len(),
        total_revenue,
        average_purchase,
        top_category,
    }
}

/// Revenue per gender in first-appearance order (bar chart input).
pub fn revenue_by_gender(records: &[Transaction]) -> Vec<(Gender, f64)> {
    rollup(records, |t| t.gender)
}

/// Categories in first-appearance order.
pub fn category_list(records: &[Transaction]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for tx in records {
        if !categories.contains(&tx.category) {
            categories.push(tx.category.clone());
        }
    }
    categories
}

/// Age bracket × category revenue matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGrid {
    pub categories: Vec<String>,
    /// Bracket-major: `cells[bracket_index * categories.len() + category_index]`.
    pub cells: Vec<f64>,
    pub max: f64,
}

impl HeatmapGrid {
    pub fn cell(&self, bracket_index: usize, category_index: usize) -> f64 {
        self.cells[bracket_index * self.categories.len() + category_index]
    }
}

pub fn heatmap(records: &[Transaction]) -> HeatmapGrid {
    let categories = category_list(records);
    let mut cells = vec![0.0; AgeBracket::ALL.len() * categories.len()];

    for tx in records {
        let bracket_index = AgeBracket::ALL
            .iter()
            .position(|b| *b == tx.bracket())
            .unwrap_or(0);
        if let Some(category_index) = categories.iter().position(|c| *c == tx.category) {
            cells[bracket_index * categories.len() + category_index] += tx.line_value();
        }
    }

    let max = cells.iter().copied().fold(0.0, f64::max);
    HeatmapGrid {
        categories,
        cells,
        max,
    }
}

/// Revenue per calendar month, optionally restricted to one year.
pub fn monthly_revenue(records: &[Transaction], year: Option<i32>) -> [f64; 12] {
    let mut months = [0.0; 12];
    for tx in records {
        if let Some(y) = year {
            if tx.date.year() != y {
                continue;
            }
        }
        months[tx.date.month0() as usize] += tx.line_value();
    }
    months
}

/// Distinct years present in the data, ascending (trend-chart selector).
pub fn years(records: &[Transaction]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(|t| t.date.year()).collect();
    years.sort_unstable();
    years.dedup();
    years
}

fn rollup<K: PartialEq + Clone>(
    records: &[Transaction],
    key: impl Fn(&Transaction) -> K,
) -> Vec<(K, f64)> {
    let mut groups: Vec<(K, f64)> = Vec::new();
    for tx in records {
        let k = key(tx);
        match groups.iter_mut().find(|(g, _)| *g == k) {
            Some((_, v)) => *v += tx.line_value(),
            None => groups.push((k, tx.line_value())),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(gender: Gender, age: u32, category: &str, quantity: u32, price: f64, date: (i32, u32, u32)) -> Transaction {
        Transaction {
            gender,
            age,
            category: category.to_string(),
            quantity,
            unit_price: price,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(Gender::Male, 25, "Shoes", 2, 50.0, (2022, 8, 5)),
            tx(Gender::Male, 25, "Shoes", 1, 30.0, (2022, 8, 20)),
            tx(Gender::Female, 45, "Books", 3, 10.0, (2021, 12, 12)),
        ]
    }

    #[test]
    fn summary_matches_concrete_scenario() {
        let summary = summarize(&sample());
        assert_eq!(summary.transactions, 3);
        assert_eq!(summary.total_revenue, 160.0);
        assert_eq!(summary.average_purchase, Some(160.0 / 3.0));
        assert_eq!(summary.top_category.as_deref(), Some("Shoes"));
    }

    #[test]
    fn empty_dataset_reports_no_data() {
        let summary = summarize(&[]);
        assert_eq!(summary.transactions, 0);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.average_purchase, None);
        assert_eq!(summary.top_category, None);
    }

    #[test]
    fn gender_rollup_keeps_first_appearance_order() {
        let by_gender = revenue_by_gender(&sample());
        assert_eq!(by_gender, vec![(Gender::Male, 130.0), (Gender::Female, 30.0)]);
    }

    #[test]
    fn heatmap_places_revenue_in_the_right_cell() {
        let grid = heatmap(&sample());
        assert_eq!(grid.categories, vec!["Shoes".to_string(), "Books".to_string()]);
        // 20-29 is bracket index 1, 40-49 is index 3.
        assert_eq!(grid.cell(1, 0), 130.0);
        assert_eq!(grid.cell(3, 1), 30.0);
        assert_eq!(grid.cell(0, 0), 0.0);
        assert_eq!(grid.max, 130.0);
    }

    #[test]
    fn monthly_revenue_respects_year_filter() {
        let records = sample();
        let all = monthly_revenue(&records, None);
        assert_eq!(all[7], 130.0); // August
        assert_eq!(all[11], 30.0); // December

        let only_2021 = monthly_revenue(&records, Some(2021));
        assert_eq!(only_2021[7], 0.0);
        assert_eq!(only_2021[11], 30.0);

        assert_eq!(years(&records), vec![2021, 2022]);
    }
}
