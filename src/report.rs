// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Period reports over the transaction journal.
//!
//! A report is a full scan of the journal filtered to a window anchored at
//! "now", plus the running sum of the matching totals. Reports only consume
//! the journal's read interface; they never touch the product store.

use crate::error::LedgerError;
use crate::journal::TransactionJournal;
use crate::transaction::Transaction;
use chrono::{Datelike, Local, NaiveDateTime};
use std::fmt;

/// Reporting window, always anchored at "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Same calendar date as now.
    Daily,
    /// Trailing seven calendar days, today included.
    Weekly,
    /// Same calendar month and year as now.
    Monthly,
}

impl ReportPeriod {
    /// Whether `timestamp` falls inside the window anchored at `now`.
    ///
    /// Weekly is a wall-clock day difference: a row from six days ago is in,
    /// one from exactly seven days ago is out.
    fn contains(self, now: NaiveDateTime, timestamp: NaiveDateTime) -> bool {
        match self {
            Self::Daily => timestamp.date() == now.date(),
            Self::Weekly => {
                now.date()
                    .signed_duration_since(timestamp.date())
                    .num_days()
                    < 7
            }
            Self::Monthly => {
                timestamp.month() == now.month() && timestamp.year() == now.year()
            }
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "Daily"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
        }
    }
}

/// Result of one report run: the matching rows, oldest first, and the sum of
/// their totals. An absent or empty journal simply yields an empty report.
/// `grand_total` saturates at `u64::MAX` rather than wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub period: ReportPeriod,
    pub rows: Vec<Transaction>,
    pub grand_total: u64,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Generates a report for the window ending now (local wall clock).
pub fn generate(
    journal: &TransactionJournal,
    period: ReportPeriod,
) -> Result<Report, LedgerError> {
    generate_at(journal, period, Local::now().naive_local())
}

/// Generates a report anchored at an explicit `now`.
///
/// Malformed journal rows never reach this point; the journal already skips
/// them on read.
pub fn generate_at(
    journal: &TransactionJournal,
    period: ReportPeriod,
    now: NaiveDateTime,
) -> Result<Report, LedgerError> {
    let mut rows = Vec::new();
    let mut grand_total: u64 = 0;
    for transaction in journal.read_all()? {
        if period.contains(now, transaction.timestamp) {
            // The sum over an unbounded journal can exceed u64; cap it
            // rather than panic over historical data.
            grand_total = grand_total.saturating_add(transaction.total);
            rows.push(transaction);
        }
    }
    Ok(Report {
        period,
        rows,
        grand_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TIMESTAMP_FORMAT;

    fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn daily_matches_the_calendar_date_only() {
        let now = at("2025-08-30 23:59:59");
        assert!(ReportPeriod::Daily.contains(now, at("2025-08-30 00:00:00")));
        assert!(!ReportPeriod::Daily.contains(now, at("2025-08-29 23:59:59")));
    }

    #[test]
    fn weekly_is_a_trailing_seven_day_window() {
        let now = at("2025-08-30 12:00:00");
        // Six days back is in, regardless of time of day.
        assert!(ReportPeriod::Weekly.contains(now, at("2025-08-24 06:00:00")));
        // Exactly seven days back is out.
        assert!(!ReportPeriod::Weekly.contains(now, at("2025-08-23 12:00:00")));
        // Eight days back is out.
        assert!(!ReportPeriod::Weekly.contains(now, at("2025-08-22 12:00:00")));
        assert!(ReportPeriod::Weekly.contains(now, at("2025-08-30 18:00:00")));
    }

    #[test]
    fn monthly_matches_calendar_month_and_year() {
        let now = at("2025-08-30 12:00:00");
        assert!(ReportPeriod::Monthly.contains(now, at("2025-08-01 00:00:00")));
        assert!(!ReportPeriod::Monthly.contains(now, at("2025-07-31 23:59:59")));
        assert!(!ReportPeriod::Monthly.contains(now, at("2024-08-15 12:00:00")));
    }
}
