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

//! Product records and edit semantics.

use crate::base::ProductId;
use serde::{Deserialize, Serialize};

/// A single product as persisted in the store.
///
/// `price` is a whole number of the smallest currency unit (no decimals).
/// `stock` is the quantity on hand; the engine never lets it go negative.
/// Field order matches the CSV column order `id,name,stock,price,description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub stock: u64,
    pub price: u64,
    pub description: String,
}

/// Field-wise changes for a product edit.
///
/// `None` keeps the existing value, mirroring the interactive edit flow where
/// an empty input leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub stock: Option<u64>,
    pub price: Option<u64>,
    pub description: Option<String>,
}

impl Product {
    /// Applies an update in place; fields the update leaves unset keep their
    /// current value. The id is never changed by an edit.
    pub fn apply(&mut self, update: ProductUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jacket() -> Product {
        Product {
            id: ProductId::from("J1"),
            name: "Alpine Shell".to_string(),
            stock: 10,
            price: 150_000,
            description: "3-layer waterproof".to_string(),
        }
    }

    #[test]
    fn empty_update_keeps_all_fields() {
        let mut product = jacket();
        product.apply(ProductUpdate::default());
        assert_eq!(product, jacket());
    }

    #[test]
    fn partial_update_touches_only_set_fields() {
        let mut product = jacket();
        product.apply(ProductUpdate {
            price: Some(175_000),
            ..Default::default()
        });

        assert_eq!(product.price, 175_000);
        assert_eq!(product.name, "Alpine Shell");
        assert_eq!(product.stock, 10);
    }

    #[test]
    fn full_update_replaces_everything_but_id() {
        let mut product = jacket();
        product.apply(ProductUpdate {
            name: Some("Trail Windbreaker".to_string()),
            stock: Some(3),
            price: Some(90_000),
            description: Some("packable".to_string()),
        });

        assert_eq!(product.id, ProductId::from("J1"));
        assert_eq!(product.name, "Trail Windbreaker");
        assert_eq!(product.stock, 3);
        assert_eq!(product.price, 90_000);
        assert_eq!(product.description, "packable");
    }
}
