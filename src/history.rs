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

//! Bounded in-memory history of recent transactions.

use crate::transaction::Transaction;
use std::collections::VecDeque;

/// Ring of the most recently committed transactions, oldest first.
///
/// Purely in-memory: every process starts with an empty history, and nothing
/// here is ever persisted. The engine pushes each transaction after it has
/// been journaled, so the ring only ever holds fully committed records.
#[derive(Debug, Default)]
pub struct RecentHistory {
    entries: VecDeque<Transaction>,
}

impl RecentHistory {
    /// Maximum number of transactions retained.
    pub const CAPACITY: usize = 5;

    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(Self::CAPACITY),
        }
    }

    /// Appends a transaction, silently evicting the oldest entry when the
    /// ring is at capacity.
    pub fn push(&mut self, transaction: Transaction) {
        if self.entries.len() == Self::CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(transaction);
    }

    /// All retained transactions, oldest first.
    pub fn all(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{ProductId, TransactionId};
    use crate::transaction::{TIMESTAMP_FORMAT, TransactionKind};
    use chrono::NaiveDateTime;

    fn sale(id: &str) -> Transaction {
        Transaction {
            transaction_id: TransactionId::from(id),
            timestamp: NaiveDateTime::parse_from_str("2025-08-30 10:00:00", TIMESTAMP_FORMAT)
                .unwrap(),
            kind: TransactionKind::Sale,
            product_id: ProductId::from("J1"),
            quantity: 1,
            total: 150_000,
        }
    }

    #[test]
    fn starts_empty() {
        let history = RecentHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.all().count(), 0);
    }

    #[test]
    fn keeps_insertion_order_below_capacity() {
        let mut history = RecentHistory::new();
        for id in ["T1", "T2", "T3"] {
            history.push(sale(id));
        }

        let ids: Vec<_> = history.all().map(|t| t.transaction_id.as_str()).collect();
        assert_eq!(ids, ["T1", "T2", "T3"]);
    }

    #[test]
    fn seven_pushes_leave_the_last_five_in_order() {
        let mut history = RecentHistory::new();
        for i in 1..=7 {
            history.push(sale(&format!("T{i}")));
        }

        assert_eq!(history.len(), RecentHistory::CAPACITY);
        let ids: Vec<_> = history.all().map(|t| t.transaction_id.as_str()).collect();
        assert_eq!(ids, ["T3", "T4", "T5", "T6", "T7"]);
    }
}
