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

//! Durable product storage.
//!
//! Products live in a single CSV file with the header
//! `id,name,stock,price,description` and one product per row. Loading
//! tolerates a missing file (first run); saving always rewrites the whole
//! file. Only one process is assumed to touch the file at a time.

use crate::base::ProductId;
use crate::error::LedgerError;
use crate::product::Product;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Column order of the product file.
const HEADER: [&str; 5] = ["id", "name", "stock", "price", "description"];

/// CSV-backed product table keyed by product id.
#[derive(Debug)]
pub struct ProductStore {
    path: PathBuf,
}

impl ProductStore {
    /// Opens a store over the given file path. The file itself is created
    /// lazily by the first [`save_all`](Self::save_all).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads every persisted product.
    ///
    /// A store file that does not exist yet is "no data yet", not an error:
    /// the result is an empty map.
    pub fn load_all(&self) -> Result<BTreeMap<ProductId, Product>, LedgerError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        let mut rdr = csv::Reader::from_reader(file);
        let mut products = BTreeMap::new();
        for record in rdr.deserialize::<Product>() {
            let product = record?;
            products.insert(product.id.clone(), product);
        }
        Ok(products)
    }

    /// Replaces the entire persisted product set with `products`.
    ///
    /// This is a full rewrite, not a patch: every record is written out again,
    /// including unchanged ones. The header row is always present, even for an
    /// empty set.
    pub fn save_all(&self, products: &BTreeMap<ProductId, Product>) -> Result<(), LedgerError> {
        // The header is written by hand so it is present even when the
        // product set is empty; automatic headers stay off.
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        wtr.write_record(HEADER)?;
        for product in products.values() {
            wtr.serialize(product)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
