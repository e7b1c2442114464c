//! Console and JSON rendering of a projection run

use crate::errors::EconomicsError;
use crate::metrics::{Projection, ProjectionRow};
use crate::summary::KeyMetrics;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Rows printed by default (the first year)
pub const DEFAULT_REPORT_ROWS: usize = 12;

pub const TOKEN_SYMBOL: &str = "$INK";

const TABLE_COLUMNS: [&str; 5] = [
    "month",
    "active_users",
    "models_processed",
    "network_revenue",
    "market_cap",
];

/// Leading rows of a projection plus its key metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub rows: Vec<ProjectionRow>,
    pub summary: KeyMetrics,
}

impl Report {
    pub fn new(projection: &Projection, rows: usize) -> Self {
        Self {
            rows: projection.head(rows),
            summary: KeyMetrics::from_projection(projection),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, EconomicsError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EconomicsError::Serialization(format!("Failed to render report: {}", e)))
    }

    fn title(&self) -> String {
        match self.rows.len() {
            DEFAULT_REPORT_ROWS => "Monthly Projections (First Year):".to_string(),
            1 => "Monthly Projections (First Month):".to_string(),
            n => format!("Monthly Projections (First {} Months):", n),
        }
    }

    /// Right-aligned table of the selected columns
    pub fn render_table(&self) -> String {
        TableBlock(self).to_string()
    }

    pub fn render_summary(&self) -> String {
        SummaryBlock(&self.summary).to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}\n{}", TableBlock(self), SummaryBlock(&self.summary))
    }
}

struct TableBlock<'a>(&'a Report);

impl fmt::Display for TableBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body: Vec<[String; 5]> = self
            .0
            .rows
            .iter()
            .map(|r| {
                [
                    r.month.to_string(),
                    format_thousands(r.active_users, 2),
                    format_thousands(r.models_processed, 2),
                    format_thousands(r.network_revenue, 2),
                    format_thousands(r.market_cap, 2),
                ]
            })
            .collect();

        let mut widths = TABLE_COLUMNS.map(str::len);
        for row in &body {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        writeln!(f, "{}", self.0.title())?;
        write_line(f, &TABLE_COLUMNS, &widths)?;
        for row in &body {
            write_line(f, row, &widths)?;
        }
        Ok(())
    }
}

fn write_line<S: AsRef<str>>(
    f: &mut fmt::Formatter<'_>,
    cells: &[S],
    widths: &[usize],
) -> fmt::Result {
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            f.write_str("  ")?;
        }
        write!(f, "{:>w$}", cell.as_ref(), w = *width)?;
    }
    writeln!(f)
}

struct SummaryBlock<'a>(&'a KeyMetrics);

impl fmt::Display for SummaryBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "Key Token Metrics:")?;
        writeln!(
            f,
            "Initial Circulating Supply: {} {}",
            format_thousands(s.initial_circulating_supply, 0),
            TOKEN_SYMBOL
        )?;
        writeln!(
            f,
            "Initial Market Cap: ${}",
            format_thousands(s.initial_market_cap, 2)
        )?;
        writeln!(f, "Total Raise: ${}", format_thousands(s.total_raise, 2))?;
        writeln!(
            f,
            "Fully Diluted Valuation: ${}",
            format_thousands(s.fully_diluted_valuation, 2)
        )
    }
}

/// Round to `dp` places and group the integer part with commas: `1,234.50`
pub fn format_thousands(value: Decimal, dp: u32) -> String {
    let text = format!("{:.*}", dp as usize, value.round_dp(dp));
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::calculate_token_metrics;

    fn default_report(rows: usize) -> Report {
        let projection =
            calculate_token_metrics(Decimal::from(1_000_000_000), Decimal::new(8, 2)).unwrap();
        Report::new(&projection, rows)
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(Decimal::from(0), 0), "0");
        assert_eq!(format_thousands(Decimal::from(999), 0), "999");
        assert_eq!(format_thousands(Decimal::from(1_000), 0), "1,000");
        assert_eq!(format_thousands(Decimal::new(22_600_000, 0), 2), "22,600,000.00");
        assert_eq!(format_thousands(Decimal::new(-123_456_789, 3), 2), "-123,456.79");
        assert_eq!(format_thousands(Decimal::new(1_234_5, 1), 1), "1,234.5");
    }

    #[test]
    fn summary_block_matches_default_launch() {
        let summary = default_report(DEFAULT_REPORT_ROWS).render_summary();
        assert!(summary.contains("Initial Circulating Supply: 50,694,444 $INK"));
        assert!(summary.contains("Initial Market Cap: $4,055,555.56"));
        assert!(summary.contains("Total Raise: $22,600,000.00"));
        assert!(summary.contains("Fully Diluted Valuation: $80,000,000.00"));
    }

    #[test]
    fn table_has_header_and_one_line_per_row() {
        let table = default_report(DEFAULT_REPORT_ROWS).render_table();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Monthly Projections (First Year):");
        assert!(lines[1].contains("active_users"));
        assert!(lines[1].contains("market_cap"));
        assert_eq!(lines.len(), 2 + 12);
        assert!(lines[2].contains("6,000.00"));
        assert!(lines[2].contains("27,000.00"));
        // every line is padded to the same width
        assert!(lines[1..].iter().all(|l| l.len() == lines[1].len()));
    }

    #[test]
    fn display_joins_table_and_summary() {
        let report = default_report(2);
        assert_eq!(
            report.to_string(),
            format!("\n{}\n{}", report.render_table(), report.render_summary())
        );
    }

    #[test]
    fn short_report_title() {
        assert_eq!(
            default_report(3).render_table().lines().next(),
            Some("Monthly Projections (First 3 Months):")
        );
    }

    #[test]
    fn json_report_contains_rows_and_summary() {
        let json = default_report(2).to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["rows"].as_array().unwrap().len(), 2);
        assert_eq!(value["rows"][1]["month"], 1);
        assert!(value["summary"]["total_raise"].is_string());
    }
}
