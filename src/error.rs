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

//! Error types for ledger operations.

use thiserror::Error;

/// Ledger operation errors.
///
/// The domain variants (`ProductNotFound`, `InvalidQuantity`,
/// `InsufficientStock`, `DuplicateId`) are all detected before any state is
/// touched, so an operation that fails with one of them is a strict no-op.
/// The `Io` and `Csv` variants wrap failures of the backing files.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Referenced product id is absent from the store
    #[error("product not found")]
    ProductNotFound,

    /// Quantity is zero or could not be read as a positive integer
    #[error("invalid quantity (must be a positive integer)")]
    InvalidQuantity,

    /// Sale quantity exceeds the stock on hand
    #[error("insufficient stock")]
    InsufficientStock,

    /// Product id supplied for a new product already exists
    #[error("product id already exists")]
    DuplicateId,

    /// Backing file could not be read or written
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted data could not be encoded or decoded
    #[error("storage format error: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::LedgerError;

    #[test]
    fn error_display_messages() {
        assert_eq!(LedgerError::ProductNotFound.to_string(), "product not found");
        assert_eq!(
            LedgerError::InvalidQuantity.to_string(),
            "invalid quantity (must be a positive integer)"
        );
        assert_eq!(LedgerError::InsufficientStock.to_string(), "insufficient stock");
        assert_eq!(LedgerError::DuplicateId.to_string(), "product id already exists");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LedgerError::from(io);
        assert!(matches!(err, LedgerError::Io(_)));
        assert!(err.to_string().starts_with("storage I/O error"));
    }
}
