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

//! Inventory-transaction engine.
//!
//! The [`Engine`] is the central component: it validates a buy-or-sell
//! request against the product store, adjusts stock, persists the product
//! set, appends the immutable transaction record to the journal, and pushes
//! it onto the recent-history ring as one logical unit.
//!
//! # Consistency
//!
//! Every domain check runs before any state is touched, so a failed
//! operation is a strict no-op: no stock change, no journal row, no history
//! entry. On success the updated product set is persisted *before* the
//! journal append; a crash between the two reads as "stock updated,
//! transaction not recorded", never as a journal row that claims a stock
//! change that did not happen. This is a best-effort ordering guarantee, not
//! a transactional one.

use crate::base::TransactionId;
use crate::error::LedgerError;
use crate::history::RecentHistory;
use crate::journal::TransactionJournal;
use crate::product::{Product, ProductUpdate};
use crate::report::{self, Report, ReportPeriod};
use crate::store::ProductStore;
use crate::transaction::{Transaction, TransactionKind};
use chrono::Local;
use std::path::Path;
use tracing::debug;

/// A committed transaction together with the post-transaction product
/// snapshot, for receipt rendering.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub transaction: Transaction,
    pub product: Product,
}

/// Inventory-transaction engine over one product store and one journal.
///
/// # Invariants
///
/// - `stock >= 0` for every product after any committed transaction.
/// - Journal records are immutable once appended.
/// - The recent-history ring only ever holds fully committed transactions
///   (stock persisted and journal row written).
#[derive(Debug)]
pub struct Engine {
    store: ProductStore,
    journal: TransactionJournal,
    history: RecentHistory,
}

impl Engine {
    /// File name of the product table inside the data directory.
    pub const PRODUCTS_FILE: &'static str = "products.csv";
    /// File name of the transaction journal inside the data directory.
    pub const TRANSACTIONS_FILE: &'static str = "transactions.csv";

    /// Creates an engine over `data_dir`, with an empty recent history.
    ///
    /// The backing files are created lazily on first write; a directory
    /// without them reads as an empty shop.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Engine {
            store: ProductStore::open(data_dir.join(Self::PRODUCTS_FILE)),
            journal: TransactionJournal::open(data_dir.join(Self::TRANSACTIONS_FILE)),
            history: RecentHistory::new(),
        }
    }

    /// Executes one buy-or-sell operation as a single logical unit.
    ///
    /// The committed total is `quantity * price` with the price read at this
    /// moment; later price edits never change a recorded total.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidQuantity`] - `quantity` is zero, or so large
    ///   that the resulting stock or total would not fit in a `u64`.
    /// - [`LedgerError::ProductNotFound`] - no product with `product_id`.
    /// - [`LedgerError::InsufficientStock`] - sale quantity exceeds stock.
    ///
    /// All of these are detected before any mutation: on failure nothing is
    /// persisted, journaled, or pushed to history.
    pub fn execute(
        &mut self,
        kind: TransactionKind,
        product_id: &str,
        quantity: u64,
    ) -> Result<Receipt, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }

        let mut products = self.store.load_all()?;
        let product = products
            .get_mut(product_id)
            .ok_or(LedgerError::ProductNotFound)?;

        let stock = match kind {
            TransactionKind::Sale => product
                .stock
                .checked_sub(quantity)
                .ok_or(LedgerError::InsufficientStock)?,
            // Purchases have no business upper bound; only the u64 range
            // caps them, and a quantity past it is rejected up front.
            TransactionKind::Purchase => product
                .stock
                .checked_add(quantity)
                .ok_or(LedgerError::InvalidQuantity)?,
        };

        // The total must never wrap: a quantity large enough to overflow
        // `quantity * price` is rejected before any state is touched.
        let total = quantity
            .checked_mul(product.price)
            .ok_or(LedgerError::InvalidQuantity)?;
        product.stock = stock;
        let snapshot = product.clone();

        // Stock must hit disk before the journal claims the transaction.
        self.store.save_all(&products)?;

        let transaction = Transaction {
            transaction_id: TransactionId::generate(),
            timestamp: Local::now().naive_local(),
            kind,
            product_id: snapshot.id.clone(),
            quantity,
            total,
        };
        self.journal.append(&transaction)?;
        self.history.push(transaction.clone());

        debug!(id = %transaction.transaction_id, %kind, quantity, total, "transaction committed");

        Ok(Receipt {
            transaction,
            product: snapshot,
        })
    }

    /// Adds a new product to the store.
    ///
    /// # Errors
    ///
    /// [`LedgerError::DuplicateId`] if a product with the same id already
    /// exists; nothing is written in that case.
    pub fn add_product(&self, product: Product) -> Result<(), LedgerError> {
        let mut products = self.store.load_all()?;
        if products.contains_key(product.id.as_str()) {
            return Err(LedgerError::DuplicateId);
        }
        products.insert(product.id.clone(), product);
        self.store.save_all(&products)
    }

    /// All products, ordered by id.
    pub fn products(&self) -> Result<Vec<Product>, LedgerError> {
        Ok(self.store.load_all()?.into_values().collect())
    }

    /// Looks up one product by id.
    pub fn product(&self, product_id: &str) -> Result<Option<Product>, LedgerError> {
        Ok(self.store.load_all()?.remove(product_id))
    }

    /// Edits an existing product; update fields left as `None` keep their
    /// current value. Returns the product as persisted.
    ///
    /// # Errors
    ///
    /// [`LedgerError::ProductNotFound`] if the id is absent.
    pub fn update_product(
        &self,
        product_id: &str,
        update: ProductUpdate,
    ) -> Result<Product, LedgerError> {
        let mut products = self.store.load_all()?;
        let product = products
            .get_mut(product_id)
            .ok_or(LedgerError::ProductNotFound)?;
        product.apply(update);
        let updated = product.clone();
        self.store.save_all(&products)?;
        Ok(updated)
    }

    /// Deletes a product from the store.
    ///
    /// Journal rows that reference it are kept as-is; orphaned historical
    /// records are accepted behavior.
    ///
    /// # Errors
    ///
    /// [`LedgerError::ProductNotFound`] if the id is absent.
    pub fn remove_product(&self, product_id: &str) -> Result<(), LedgerError> {
        let mut products = self.store.load_all()?;
        if products.remove(product_id).is_none() {
            return Err(LedgerError::ProductNotFound);
        }
        self.store.save_all(&products)
    }

    /// The most recent committed transactions, oldest first, capped at
    /// [`RecentHistory::CAPACITY`]. Empty at every process start.
    pub fn recent(&self) -> impl Iterator<Item = &Transaction> {
        self.history.all()
    }

    /// Runs a period report over the full journal.
    pub fn report(&self, period: ReportPeriod) -> Result<Report, LedgerError> {
        report::generate(&self.journal, period)
    }
}
