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

//! Core identifier types for products and transactions.

use rand::{Rng, distr::Alphanumeric};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Number of random characters appended to generated identifiers.
///
/// The timestamp part of an identifier only has second granularity, so the
/// suffix is what keeps two identifiers generated within the same second
/// distinct.
const ID_SUFFIX_LEN: usize = 4;

/// Builds a human-readable identifier: type prefix, unix-seconds timestamp,
/// and a random alphanumeric suffix (e.g. `T1735648000-x7Qk`).
fn generate_id(prefix: &str) -> String {
    let seconds = chrono::Local::now().timestamp();
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(ID_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{prefix}{seconds}-{suffix}")
}

/// Unique, stable identifier for a product.
///
/// Either supplied by the user when the product is added, or generated with
/// the `"J"` prefix when the user leaves the field empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    const PREFIX: &'static str = "J";

    /// Generates a fresh product identifier.
    pub fn generate() -> Self {
        Self(generate_id(Self::PREFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Lets `BTreeMap<ProductId, Product>` be queried with a plain `&str`.
impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for ProductId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a committed transaction.
///
/// Generated by the engine at commit time with the `"T"` prefix. Never reused
/// and never changed once the transaction is journaled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl TransactionId {
    const PREFIX: &'static str = "T";

    /// Generates a fresh transaction identifier.
    pub fn generate() -> Self {
        Self(generate_id(Self::PREFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
