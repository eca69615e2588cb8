//! Trends Report
//!
//! Per-category spending over every month that appears in the ledger.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use crate::display::report::separator;
use crate::error::{TallyError, TallyResult};
use crate::models::{Category, Money, Month, Transaction};
use crate::storage::Storage;

/// Trends Report
#[derive(Debug, Clone, Default)]
pub struct TrendsReport {
    /// Distinct ledger months, ascending
    pub months: Vec<Month>,
    /// One value per entry of `months` for each built-in category and any
    /// other category found in the ledger
    pub series: BTreeMap<Category, Vec<Money>>,
}

impl TrendsReport {
    /// Generate the report from the ledger on disk
    pub fn generate(storage: &Storage) -> TallyResult<Self> {
        let transactions = storage.ledger.load()?;
        Ok(Self::from_transactions(&transactions))
    }

    /// Build the report from loaded transactions
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let months: Vec<Month> = transactions
            .iter()
            .map(Transaction::month)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut series: BTreeMap<Category, Vec<Money>> = Category::ALL
            .into_iter()
            .map(|category| (category, vec![Money::zero(); months.len()]))
            .collect();

        for txn in transactions {
            let Ok(idx) = months.binary_search(&txn.month()) else {
                continue;
            };
            let values = series
                .entry(txn.category.clone())
                .or_insert_with(|| vec![Money::zero(); months.len()]);
            values[idx] += txn.amount;
        }

        Self { months, series }
    }

    /// The per-month totals for one category
    pub fn series(&self, category: &Category) -> &[Money] {
        self.series.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Spending Trends\n");
        if self.is_empty() {
            output.push_str("No transactions recorded.\n");
            return output;
        }

        output.push_str(&format!("{:<9}", "Month"));
        for category in self.series.keys() {
            output.push_str(&format!(" {:>12}", category.as_str()));
        }
        output.push('\n');
        output.push_str(&separator(9 + 13 * self.series.len()));
        output.push('\n');

        for (idx, month) in self.months.iter().enumerate() {
            output.push_str(&format!("{:<9}", month.to_string()));
            for values in self.series.values() {
                let value = values.get(idx).copied().unwrap_or_default();
                output.push_str(&format!(" {:>12}", value));
            }
            output.push('\n');
        }

        output
    }

    /// Export the report to CSV format, one row per month
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> TallyResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        let io_err = |e: csv::Error| TallyError::Io(e.to_string());

        let mut header = vec!["Month".to_string()];
        header.extend(self.series.keys().map(|c| c.to_string()));
        wtr.write_record(&header).map_err(io_err)?;

        for (idx, month) in self.months.iter().enumerate() {
            let mut record = vec![month.to_string()];
            for values in self.series.values() {
                let value = values.get(idx).copied().unwrap_or_default();
                record.push(value.to_string());
            }
            wtr.write_record(&record).map_err(io_err)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(date: &str, category: Category, cents: i64) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category,
            "Misc",
            Money::from_cents(cents),
        )
    }

    fn sample() -> TrendsReport {
        TrendsReport::from_transactions(&[
            txn("2025-03-10", Category::Shopping, 2000),
            txn("2025-01-05", Category::Shopping, 1000),
            txn("2025-01-20", Category::Shopping, 550),
            txn("2025-03-01", Category::Earnings, 300000),
        ])
    }

    #[test]
    fn test_months_are_distinct_and_sorted() {
        let report = sample();
        let months: Vec<String> = report.months.iter().map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["2025-01", "2025-03"]);
    }

    #[test]
    fn test_series_fill_gaps_with_zero() {
        let report = sample();
        assert_eq!(
            report.series(&Category::Shopping),
            &[Money::from_cents(1550), Money::from_units(20)]
        );
        assert_eq!(
            report.series(&Category::Earnings),
            &[Money::zero(), Money::from_units(3000)]
        );
        assert_eq!(report.series(&Category::Home), &[Money::zero(), Money::zero()]);
    }

    #[test]
    fn test_empty_ledger() {
        let report = TrendsReport::from_transactions(&[]);
        assert!(report.is_empty());
        assert!(report.series(&Category::Home).is_empty());
        assert!(report.format_terminal().contains("No transactions recorded."));
    }

    #[test]
    fn test_export_csv() {
        let mut buf = Vec::new();
        sample().export_csv(&mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let rows: Vec<&str> = csv.lines().collect();

        assert_eq!(rows[0], "Month,Shopping,Utilities,Home,Earnings");
        assert_eq!(rows[1], "2025-01,15.50,0.00,0.00,0.00");
        assert_eq!(rows[2], "2025-03,20.00,0.00,0.00,3000.00");
    }

    #[test]
    fn test_unrecognised_category_gets_a_column() {
        let report = TrendsReport::from_transactions(&[
            txn("2025-01-05", Category::Home, 90000),
            txn("2025-02-07", Category::from_name("Travel"), 2000),
        ]);

        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let rows: Vec<&str> = csv.lines().collect();

        assert_eq!(rows[0], "Month,Shopping,Utilities,Home,Earnings,Travel");
        assert_eq!(rows[1], "2025-01,0.00,0.00,900.00,0.00,0.00");
        assert_eq!(rows[2], "2025-02,0.00,0.00,0.00,0.00,20.00");
    }

    #[test]
    fn test_format_terminal() {
        let output = sample().format_terminal();
        assert!(output.contains("Spending Trends"));
        assert!(output.contains("2025-03"));
        assert!(output.contains("3000.00"));
    }
}
