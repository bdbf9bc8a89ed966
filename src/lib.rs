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

//! # Toko Ledger
//!
//! Inventory and sales ledger for a small, single-operator retail shop.
//! Products live in a CSV-backed store, every committed transaction goes to
//! an append-only CSV journal, and a bounded in-memory ring keeps the most
//! recent transactions around for quick review at the terminal.
//!
//! ## Core Components
//!
//! - [`Engine`]: executes buy/sell operations as one logical unit
//! - [`ProductStore`] / [`TransactionJournal`]: durable CSV persistence
//! - [`RecentHistory`]: bounded in-memory view of the latest transactions
//! - [`report`]: daily/weekly/monthly aggregation over the journal
//!
//! ## Example
//!
//! ```no_run
//! use toko_ledger::{Engine, Product, ProductId, TransactionKind};
//!
//! let mut engine = Engine::new(".");
//!
//! engine.add_product(Product {
//!     id: ProductId::from("J1"),
//!     name: "Alpine Shell".into(),
//!     stock: 10,
//!     price: 150_000,
//!     description: "3-layer waterproof, size M".into(),
//! }).unwrap();
//!
//! // Sell three: stock drops to 7, the transaction is journaled, and the
//! // receipt carries the post-transaction snapshot.
//! let receipt = engine.execute(TransactionKind::Sale, "J1", 3).unwrap();
//! assert_eq!(receipt.transaction.total, 450_000);
//! assert_eq!(receipt.product.stock, 7);
//! ```
//!
//! ## Consistency
//!
//! A failed operation is a strict no-op, and on success the stock write
//! always lands before the journal append. See [`Engine::execute`].
//!
//! ## Concurrency
//!
//! There is none: the crate is single-threaded and synchronous by design,
//! sized for one person operating one terminal session. Only one process is
//! assumed to touch the backing files at a time.

pub mod base;
mod engine;
pub mod error;
mod history;
mod journal;
mod money;
mod product;
pub mod report;
mod store;
mod transaction;

pub use base::{ProductId, TransactionId};
pub use engine::{Engine, Receipt};
pub use error::LedgerError;
pub use history::RecentHistory;
pub use journal::TransactionJournal;
pub use money::format_rupiah;
pub use product::{Product, ProductUpdate};
pub use report::{Report, ReportPeriod};
pub use store::ProductStore;
pub use transaction::{TIMESTAMP_FORMAT, Transaction, TransactionKind};
