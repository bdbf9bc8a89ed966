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

//! Append-only transaction journal.
//!
//! Committed transactions land in a single CSV file, one row per transaction,
//! oldest first. Rows are never rewritten or reordered; the header row is
//! written once when the file is created (or found empty).
//!
//! Reading is tolerant: a row with a bad timestamp or missing fields is
//! skipped with a warning instead of failing the whole read, so a damaged
//! row never takes the reports down with it.

use crate::error::LedgerError;
use crate::transaction::Transaction;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::warn;

/// Column order of the journal file.
const HEADER: [&str; 6] = [
    "transaction_id",
    "timestamp",
    "kind",
    "product_id",
    "quantity",
    "total",
];

/// CSV-backed, append-only log of committed transactions.
#[derive(Debug)]
pub struct TransactionJournal {
    path: PathBuf,
}

impl TransactionJournal {
    /// Opens a journal over the given file path. The file itself is created
    /// by the first [`append`](Self::append).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Appends one committed transaction to the end of the journal, creating
    /// the file (with its header row) on first write.
    pub fn append(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        let needs_header = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            wtr.write_record(HEADER)?;
        }
        wtr.serialize(transaction)?;
        wtr.flush()?;
        Ok(())
    }

    /// Reads the full journal, oldest record first.
    ///
    /// A journal that does not exist yet reads as empty. Malformed rows are
    /// skipped with a warning; everything that parses is returned in file
    /// order.
    pub fn read_all(&self) -> Result<Vec<Transaction>, LedgerError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(file);
        let mut transactions = Vec::new();
        for record in rdr.deserialize::<Transaction>() {
            match record {
                Ok(transaction) => transactions.push(transaction),
                Err(e) => warn!("skipping malformed journal row: {e}"),
            }
        }
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{ProductId, TransactionId};
    use crate::transaction::{TIMESTAMP_FORMAT, TransactionKind};
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    fn journal() -> (TempDir, TransactionJournal) {
        let dir = TempDir::new().unwrap();
        let journal = TransactionJournal::open(dir.path().join("transactions.csv"));
        (dir, journal)
    }

    fn sale(id: &str, quantity: u64, total: u64) -> Transaction {
        Transaction {
            transaction_id: TransactionId::from(id),
            timestamp: NaiveDateTime::parse_from_str("2025-08-30 10:00:00", TIMESTAMP_FORMAT)
                .unwrap(),
            kind: TransactionKind::Sale,
            product_id: ProductId::from("J1"),
            quantity,
            total,
        }
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let (_dir, journal) = journal();
        assert!(journal.read_all().unwrap().is_empty());
    }

    #[test]
    fn appends_read_back_in_order() {
        let (_dir, journal) = journal();
        let recorded: Vec<_> = (1..=4)
            .map(|i| sale(&format!("T{i}"), i, i * 150_000))
            .collect();
        for transaction in &recorded {
            journal.append(transaction).unwrap();
        }

        assert_eq!(journal.read_all().unwrap(), recorded);
    }

    #[test]
    fn header_is_written_exactly_once() {
        let (dir, journal) = journal();
        journal.append(&sale("T1", 1, 150_000)).unwrap();
        journal.append(&sale("T2", 2, 300_000)).unwrap();

        let raw = std::fs::read_to_string(dir.path().join("transactions.csv")).unwrap();
        let header_rows = raw
            .lines()
            .filter(|line| line.starts_with("transaction_id,"))
            .count();
        assert_eq!(header_rows, 1);
        assert!(raw.starts_with("transaction_id,timestamp,kind,product_id,quantity,total\n"));
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let (dir, journal) = journal();
        journal.append(&sale("T1", 1, 150_000)).unwrap();

        // Hand-damage the file: a truncated row and a row with a bad date.
        let path = dir.path().join("transactions.csv");
        let mut raw = std::fs::read_to_string(&path).unwrap();
        raw.push_str("T2,not-a-date,jual,J1,2,300000\n");
        raw.push_str("T3,2025-08-30 11:00:00\n");
        std::fs::write(&path, raw).unwrap();

        journal.append(&sale("T4", 4, 600_000)).unwrap();

        let transactions = journal.read_all().unwrap();
        let ids: Vec<_> = transactions
            .iter()
            .map(|t| t.transaction_id.as_str())
            .collect();
        assert_eq!(ids, ["T1", "T4"]);
    }
}
