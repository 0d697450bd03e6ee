//! Text rendering of cashflow summaries and portfolio roll-ups.

use std::fmt::Write;

use cashflow_config::Config;
use cashflow_core::{CashflowSummary, PointKind, PortfolioSummary};
use cashflow_domain::{Account, Displayable};
use colored::Colorize;

use crate::format::{
    format_currency, format_date, format_share, NumberLocale, Table, TableColumn,
};

/// Formatting state shared by one command invocation.
pub struct Renderer {
    currency: String,
    locale: NumberLocale,
    color: bool,
    past_limit: usize,
    upcoming_limit: Option<usize>,
}

impl Renderer {
    pub fn new(config: &Config, plain: bool) -> Self {
        Self {
            currency: config.currency.clone(),
            locale: NumberLocale::from_tag(&config.locale),
            color: config.ui_color_enabled && !plain,
            past_limit: config.projection.past_display_limit,
            upcoming_limit: config.projection.upcoming_display_limit,
        }
    }

    fn plain(&self) -> bool {
        !self.color
    }

    fn heading(&self, title: &str) -> String {
        let text = format!("=== {title} ===");
        if self.color {
            text.bold().to_string()
        } else {
            text
        }
    }

    fn amount(&self, value: f64) -> String {
        let text = format_currency(value, &self.currency, &self.locale);
        match (self.color, value < 0.0) {
            (false, _) => text,
            (true, true) => text.red().to_string(),
            (true, false) => text.green().to_string(),
        }
    }

    fn muted(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn summary(&self, account: &Account, summary: &CashflowSummary) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.heading(&account.display_label()));
        let _ = writeln!(out, "Balance: {}", self.amount(account.balance()));

        let _ = writeln!(out, "\nPast movements");
        if summary.past.is_empty() {
            let _ = writeln!(out, "{}", self.muted("No movements yet."));
        } else {
            let mut table = Table::new(
                vec![
                    TableColumn::left("Date"),
                    TableColumn::left("Cadence"),
                    TableColumn::right("Amount"),
                ],
                self.plain(),
            );
            for entry in summary.past.iter().take(self.past_limit) {
                table.push_row(vec![
                    format_date(entry.occurred_at),
                    entry.cadence.label().to_string(),
                    self.amount(entry.amount),
                ]);
            }
            let _ = writeln!(out, "{}", table.render());
            let hidden = summary.past.len().saturating_sub(self.past_limit);
            if hidden > 0 {
                let _ = writeln!(out, "{}", self.muted(&format!("… {hidden} older")));
            }
        }

        let _ = writeln!(out, "\nUpcoming");
        let upcoming_limit = self.upcoming_limit.unwrap_or(usize::MAX);
        if summary.upcoming.is_empty() {
            let _ = writeln!(out, "{}", self.muted("Nothing scheduled."));
        } else {
            let mut table = Table::new(
                vec![
                    TableColumn::left("Next"),
                    TableColumn::left("Cadence"),
                    TableColumn::right("Amount"),
                ],
                self.plain(),
            );
            for entry in summary.upcoming.iter().take(upcoming_limit) {
                table.push_row(vec![
                    format_date(entry.next_at),
                    entry.cadence.label().to_string(),
                    self.amount(entry.amount),
                ]);
            }
            let _ = writeln!(out, "{}", table.render());
        }

        let _ = writeln!(out, "\nProjection");
        let mut table = Table::new(
            vec![
                TableColumn::left("Date"),
                TableColumn::right("Balance"),
                TableColumn::left("Kind"),
            ],
            self.plain(),
        );
        for point in &summary.projection {
            let kind = match point.kind {
                PointKind::Historical => "historical".to_string(),
                PointKind::Projected => self.muted("projected"),
            };
            table.push_row(vec![format_date(point.at), self.amount(point.value), kind]);
        }
        out.push_str(&table.render());
        out
    }

    pub fn portfolio(&self, portfolio: &PortfolioSummary) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.heading("Portfolio"));
        let _ = writeln!(out, "Total balance: {}", self.amount(portfolio.total_balance));
        if !portfolio.by_kind.is_empty() {
            let mut table = Table::new(
                vec![
                    TableColumn::left("Type"),
                    TableColumn::right("Balance"),
                    TableColumn::right("Movements"),
                    TableColumn::right("Share"),
                ],
                self.plain(),
            );
            for totals in &portfolio.by_kind {
                table.push_row(vec![
                    totals.kind.to_string(),
                    self.amount(totals.balance),
                    totals.movements.to_string(),
                    format_share(totals.share),
                ]);
            }
            let _ = writeln!(out, "\n{}\n", table.render());
        }
        let _ = writeln!(out, "Recurring movements: {}", portfolio.recurring_count);
        let _ = write!(out, "One-off movements: {}", portfolio.non_recurring_count);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashflow_core::{summarize, ProjectionSettings};
    use cashflow_domain::{AccountKind, Cadence, Movement};
    use chrono::{TimeZone, Utc};

    fn plain_renderer() -> Renderer {
        Renderer::new(&Config::default(), true)
    }

    #[test]
    fn summary_lists_sections() {
        let opened = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let account = Account::new("Everyday", AccountKind::Bank, opened).with_movements([
            Movement::new(1000.0, Cadence::None, opened),
            Movement::new(-50.0, Cadence::Monthly, opened),
        ]);
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let summary = summarize(&account, now, &ProjectionSettings::default());
        let text = plain_renderer().summary(&account, &summary);

        assert!(text.starts_with("=== Everyday (Bank) ==="));
        assert!(text.contains("Balance: €950.00"));
        assert!(text.contains("Mar 15, 2024"));
        assert!(text.contains("-€50.00"));
        assert!(text.contains("projected"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn past_rows_respect_display_limit() {
        let mut config = Config::default();
        config.projection.past_display_limit = 2;
        let opened = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let account = Account::new("Wallet", AccountKind::Cash, opened).with_movements(
            (0..5).map(|day| {
                Movement::new(1.0, Cadence::None, opened + chrono::Duration::days(day))
            }),
        );
        let summary = summarize(
            &account,
            opened + chrono::Duration::days(10),
            &ProjectionSettings::default(),
        );
        let text = Renderer::new(&config, true).summary(&account, &summary);
        assert!(text.contains("… 3 older"));
    }

    #[test]
    fn empty_portfolio_renders_totals_only() {
        let text = plain_renderer().portfolio(&PortfolioSummary::default());
        assert_eq!(
            text,
            "=== Portfolio ===\nTotal balance: €0.00\nRecurring movements: 0\nOne-off movements: 0"
        );
    }
}
