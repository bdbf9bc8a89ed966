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

//! Immutable transaction records and their wire format.
//!
//! A [`Transaction`] is created once by the engine, appended to the journal,
//! and never mutated afterwards. The journal row layout is
//! `transaction_id,timestamp,kind,product_id,quantity,total` with the kind
//! written as `"jual"` (sale) or `"beli"` (purchase).

use crate::base::{ProductId, TransactionId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire format for transaction timestamps (`2025-01-31 14:05:09`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Decreases stock; `"jual"` on the wire.
    #[serde(rename = "jual")]
    Sale,
    /// Increases stock (restock from a supplier); `"beli"` on the wire.
    #[serde(rename = "beli")]
    Purchase,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sale => write!(f, "Sale"),
            Self::Purchase => write!(f, "Purchase"),
        }
    }
}

/// One committed buy-or-sell event.
///
/// `total` is `quantity * unit_price` with the price captured at the moment
/// the transaction was executed; later price edits never change it. The
/// `product_id` is not revalidated against the store on read, so rows may
/// reference products that were deleted later — that is accepted behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
    pub kind: TransactionKind,
    pub product_id: ProductId,
    pub quantity: u64,
    pub total: u64,
}

/// Serde adapter for the `YYYY-MM-DD HH:MM:SS` timestamp column.
pub(crate) mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            transaction_id: TransactionId::from("T1735648000-ab12"),
            timestamp: NaiveDateTime::parse_from_str("2025-08-30 14:05:09", TIMESTAMP_FORMAT)
                .unwrap(),
            kind: TransactionKind::Sale,
            product_id: ProductId::from("J1"),
            quantity: 3,
            total: 450_000,
        }
    }

    #[test]
    fn serializes_to_the_journal_row_layout() {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.serialize(sample()).unwrap();
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

        assert!(out.starts_with("transaction_id,timestamp,kind,product_id,quantity,total\n"));
        assert!(out.contains("T1735648000-ab12,2025-08-30 14:05:09,jual,J1,3,450000"));
    }

    #[test]
    fn deserializes_both_kinds() {
        let rows = "transaction_id,timestamp,kind,product_id,quantity,total\n\
                    T1,2025-08-30 14:05:09,jual,J1,3,450000\n\
                    T2,2025-08-30 14:06:00,beli,J1,5,750000\n";
        let mut rdr = csv::Reader::from_reader(rows.as_bytes());
        let parsed: Vec<Transaction> = rdr.deserialize().map(Result::unwrap).collect();

        assert_eq!(parsed[0].kind, TransactionKind::Sale);
        assert_eq!(parsed[1].kind, TransactionKind::Purchase);
        assert_eq!(parsed[1].total, 750_000);
    }

    #[test]
    fn rejects_out_of_format_timestamps() {
        let rows = "transaction_id,timestamp,kind,product_id,quantity,total\n\
                    T1,30/08/2025 14:05,jual,J1,3,450000\n";
        let mut rdr = csv::Reader::from_reader(rows.as_bytes());
        let parsed: Result<Vec<Transaction>, _> = rdr.deserialize().collect();

        assert!(parsed.is_err());
    }
}
