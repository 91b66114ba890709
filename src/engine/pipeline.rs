//! The dashboard load pipeline: Read CSV → Validate → Aggregate → Derive.
//!
//! One call produces everything the UI consumes; after it returns, the data
//! is read-only and no further I/O happens for the lifetime of the session.

use std::path::Path;

use crate::aggregate::stats::{self, HeatmapGrid, Summary};
use crate::aggregate::{build_tree, AggTree};
use crate::data::loader::{self, LoadReport};
use crate::data::{Gender, Transaction};

/// Everything the dashboard renders, produced by one load.
pub struct DashboardData {
    pub records: Vec<Transaction>,
    pub report: LoadReport,
    pub tree: AggTree,
    pub summary: Summary,
    pub gender_revenue: Vec<(Gender, f64)>,
    pub heatmap: HeatmapGrid,
    pub years: Vec<i32>,
}

/// Error during dashboard loading.
pub struct LoadError {
    pub message: String,
    pub phase: &'static str,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

/// The load pipeline.
pub struct DashboardEngine;

impl DashboardEngine {
    pub fn new() -> Self {
        DashboardEngine
    }

    /// Load the dataset file and derive every aggregate in one pass.
    pub fn load(&self, path: &Path) -> Result<DashboardData, LoadError> {
        let (records, report) = loader::load_records(path).map_err(|e| LoadError {
            message: e.message,
            phase: "read",
        })?;

        Ok(self.from_records(records, report))
    }

    /// Derive aggregates from already-validated records (also the test seam).
    pub fn from_records(&self, records: Vec<Transaction>, report: LoadReport) -> DashboardData {
        let tree = build_tree(&records);
        let summary = stats::summarize(&records);
        let gender_revenue = stats::revenue_by_gender(&records);
        let heatmap = stats::heatmap(&records);
        let years = stats::years(&records);

        DashboardData {
            records,
            report,
            tree,
            summary,
            gender_revenue,
            heatmap,
            years,
        }
    }
}

impl Default for DashboardEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::ROOT;
    use crate::data::loader::read_records;

    const CSV: &str = "\
invoice_no,customer_id,gender,age,category,quantity,price,payment_method,invoice_date,shopping_mall
I1,C1,Male,25,Shoes,2,50.0,Cash,5/8/2022,Kanyon
I2,C2,Male,25,Shoes,1,30.0,Cash,6/8/2022,Kanyon
I3,C3,Female,45,Books,3,10.0,Credit Card,12/12/2021,Forum Istanbul
I4,C4,Female,N/A,Books,1,10.0,Cash,1/1/2022,Forum Istanbul
";

    #[test]
    fn pipeline_wires_loader_into_aggregates() {
        let (records, report) = read_records(CSV.as_bytes());
        let data = DashboardEngine::new().from_records(records, report);

        assert_eq!(data.report.rows_skipped(), 1);
        assert_eq!(data.report.bad_age, 1);
        assert_eq!(data.summary.transactions, 3);
        assert_eq!(data.summary.total_revenue, 160.0);
        // Skipped row shrinks the average's denominator.
        assert_eq!(data.summary.average_purchase, Some(160.0 / 3.0));
        assert_eq!(data.tree.node(ROOT).value, 160.0);
        assert_eq!(data.summary.top_category.as_deref(), Some("Shoes"));
        assert_eq!(data.years, vec![2021, 2022]);
    }

    #[test]
    fn missing_file_reports_read_phase() {
        let err = DashboardEngine::new()
            .load(Path::new("no/such/file.csv"))
            .err()
            .unwrap();
        assert_eq!(err.phase, "read");
        assert!(err.to_string().starts_with("[read]"));
    }
}
