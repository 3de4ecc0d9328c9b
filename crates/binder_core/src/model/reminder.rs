//! Periodic reminder entries and due-date arithmetic.
//!
//! # Responsibility
//! - Model one reminder row as stored in a record's period table.
//! - Compute the derived next-due date and the attention predicate.
//!
//! # Invariants
//! - A month is a fixed 30 days here. Persisted period tables depend on
//!   this approximation; do not switch to calendar-month arithmetic.
//! - Malformed or missing inputs degrade to "undefined" / `false`, never
//!   to an error.

use time::macros::format_description;
use time::{Date, Duration};

/// Fixed-length month used for all reminder arithmetic.
pub const DAYS_PER_MONTH: i64 = 30;

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// One reminder row. Inputs are kept as the raw text the caller entered;
/// parsing happens at computation time so bad input stays visible instead
/// of being rejected or silently rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderEntry {
    pub title: String,
    /// Repeat interval in months, as entered.
    pub interval_months: String,
    /// How many months before the due date the entry should start flagging.
    pub lead_months: String,
    /// Date the task was last carried out, `YYYY-MM-DD`.
    pub last_executed: String,
    /// Derived display cell; recomputed from the inputs on every save.
    pub next_due: String,
}

impl ReminderEntry {
    /// Computes the next due date, or `None` when the interval or the last
    /// execution date is missing or unparseable.
    pub fn next_due_date(&self) -> Option<Date> {
        let interval = parse_months(&self.interval_months)?;
        let last = parse_date(&self.last_executed)?;
        last.checked_add(Duration::days(interval * DAYS_PER_MONTH))
    }

    /// Whether this entry should be flagged on `today`.
    ///
    /// True when the lead is parseable, the next due date is defined, and
    /// `today >= next_due - lead * 30 days`.
    pub fn is_due_for_attention(&self, today: Date) -> bool {
        let Some(lead) = parse_months(&self.lead_months) else {
            return false;
        };
        let Some(next_due) = self.next_due_date() else {
            return false;
        };
        match next_due.checked_sub(Duration::days(lead * DAYS_PER_MONTH)) {
            Some(window_start) => today >= window_start,
            None => false,
        }
    }

    /// Rewrites the derived `next_due` cell from the current inputs.
    /// Undefined results clear the cell.
    pub fn refresh_next_due(&mut self) {
        self.next_due = self
            .next_due_date()
            .and_then(|date| date.format(DATE_FORMAT).ok())
            .unwrap_or_default();
    }
}

/// Parses a `YYYY-MM-DD` calendar date, `None` on malformed input.
pub fn parse_date(text: &str) -> Option<Date> {
    Date::parse(text.trim(), DATE_FORMAT).ok()
}

/// Formats a date back into the persisted `YYYY-MM-DD` shape.
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_default()
}

fn parse_months(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}
