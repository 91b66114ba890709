//! CSV loading with explicit per-field validation.
//!
//! Every field the core uses (gender, age, category, quantity, price, date)
//! is parsed from its string form and checked; a row failing any check is
//! skipped and counted per field in [`LoadReport`], never silently coerced
//! and never fatal. Only a missing or unreadable file aborts the load.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use super::{Gender, Transaction};

/// Raw row as it appears in the CSV. Everything is a string until validated.
///
/// Columns not listed here (invoice_no, customer_id, payment_method,
/// shopping_mall) are ignored by the core and skipped by header name.
#[derive(Debug, Deserialize)]
struct RawRow {
    gender: String,
    age: String,
    category: String,
    quantity: String,
    price: String,
    invoice_date: String,
}

/// Per-field skip accounting for one load.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_total: usize,
    pub rows_loaded: usize,
    /// Rows the CSV reader could not decode at all (wrong shape, bad UTF-8).
    pub malformed: usize,
    pub bad_gender: usize,
    pub bad_age: usize,
    pub bad_quantity: usize,
    pub bad_price: usize,
    pub bad_date: usize,
}

impl LoadReport {
    pub fn rows_skipped(&self) -> usize {
        self.malformed
            + self.bad_gender
            + self.bad_age
            + self.bad_quantity
            + self.bad_price
            + self.bad_date
    }
}

/// Error opening or reading the dataset file. Fatal: without data there is
/// no dashboard to render.
pub struct ReadError {
    pub message: String,
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// First field (in column order) that failed validation for a row.
enum RowDefect {
    Gender,
    Age,
    Quantity,
    Price,
    Date,
}

fn validate_row(raw: &RawRow) -> Result<Transaction, RowDefect> {
    let gender = Gender::parse(&raw.gender).ok_or(RowDefect::Gender)?;
    let age: u32 = raw.age.trim().parse().map_err(|_| RowDefect::Age)?;
    let quantity: u32 = raw.quantity.trim().parse().map_err(|_| RowDefect::Quantity)?;
    let unit_price: f64 = raw.price.trim().parse().map_err(|_| RowDefect::Price)?;
    if !unit_price.is_finite() || unit_price < 0.0 {
        return Err(RowDefect::Price);
    }
    let date = NaiveDate::parse_from_str(raw.invoice_date.trim(), "%d/%m/%Y")
        .map_err(|_| RowDefect::Date)?;

    Ok(Transaction {
        gender,
        age,
        category: raw.category.trim().to_string(),
        quantity,
        unit_price,
        date,
    })
}

/// Read and validate transactions from any CSV source. Header row required.
pub fn read_records<R: Read>(reader: R) -> (Vec<Transaction>, LoadReport) {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    let mut report = LoadReport::default();

    for row in csv_reader.deserialize::<RawRow>() {
        report.rows_total += 1;
        let raw = match row {
            Ok(raw) => raw,
            Err(_) => {
                report.malformed += 1;
                continue;
            }
        };
        match validate_row(&raw) {
            Ok(tx) => {
                records.push(tx);
                report.rows_loaded += 1;
            }
            Err(RowDefect::Gender) => report.bad_gender += 1,
            Err(RowDefect::Age) => report.bad_age += 1,
            Err(RowDefect::Quantity) => report.bad_quantity += 1,
            Err(RowDefect::Price) => report.bad_price += 1,
            Err(RowDefect::Date) => report.bad_date += 1,
        }
    }

    (records, report)
}

/// Load the dataset file from disk.
pub fn load_records(path: &Path) -> Result<(Vec<Transaction>, LoadReport), ReadError> {
    let file = std::fs::File::open(path).map_err(|e| ReadError {
        message: format!("Cannot open {}: {}", path.display(), e),
    })?;

    let (records, report) = read_records(file);
    if report.rows_skipped() > 0 {
        log::warn!(
            "Skipped {} of {} rows during load: {:?}",
            report.rows_skipped(),
            report.rows_total,
            report
        );
    }
    log::info!("Loaded {} transactions from {}", records.len(), path.display());

    Ok((records, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "invoice_no,customer_id,gender,age,category,quantity,price,payment_method,invoice_date,shopping_mall\n";

    fn load(rows: &str) -> (Vec<Transaction>, LoadReport) {
        let csv = format!("{}{}", HEADER, rows);
        read_records(csv.as_bytes())
    }

    #[test]
    fn loads_valid_rows() {
        let (records, report) = load(
            "I1,C1,Male,25,Shoes,2,50.0,Cash,5/8/2022,Kanyon\n\
             I2,C2,Female,45,Books,3,10.0,Credit Card,12/12/2021,Mall of Istanbul\n",
        );
        assert_eq!(records.len(), 2);
        assert_eq!(report.rows_total, 2);
        assert_eq!(report.rows_loaded, 2);
        assert_eq!(report.rows_skipped(), 0);
        assert_eq!(records[0].gender, Gender::Male);
        assert_eq!(records[0].line_value(), 100.0);
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2021, 12, 12).unwrap());
    }

    #[test]
    fn unparseable_age_is_skipped_and_counted_once() {
        let (records, report) = load(
            "I1,C1,Male,N/A,Shoes,2,50.0,Cash,5/8/2022,Kanyon\n\
             I2,C2,Male,25,Shoes,1,30.0,Cash,5/8/2022,Kanyon\n",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(report.rows_total, 2);
        assert_eq!(report.rows_loaded, 1);
        assert_eq!(report.bad_age, 1);
        assert_eq!(report.rows_skipped(), 1);
    }

    #[test]
    fn bad_numeric_fields_are_counted_per_field() {
        let (records, report) = load(
            "I1,C1,Male,25,Shoes,two,50.0,Cash,5/8/2022,Kanyon\n\
             I2,C2,Male,25,Shoes,2,-1.0,Cash,5/8/2022,Kanyon\n\
             I3,C3,Unknown,25,Shoes,2,50.0,Cash,5/8/2022,Kanyon\n\
             I4,C4,Male,25,Shoes,2,50.0,Cash,not-a-date,Kanyon\n",
        );
        assert!(records.is_empty());
        assert_eq!(report.bad_quantity, 1);
        assert_eq!(report.bad_price, 1);
        assert_eq!(report.bad_gender, 1);
        assert_eq!(report.bad_date, 1);
        assert_eq!(report.rows_skipped(), 4);
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_records(Path::new("definitely/not/here.csv")).err();
        assert!(err.is_some());
    }
}
