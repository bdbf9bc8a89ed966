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

//! Menu-driven shell over the ledger engine.
//!
//! Thin I/O glue: nested text menus, line-based prompts, and human-readable
//! output. All domain rules live in the library; a failure here prints a
//! short message and drops back to the calling menu. Data files
//! (`products.csv`, `transactions.csv`) live in the current directory.

use chrono::Local;
use std::io::{self, BufRead, Write};
use std::process;
use toko_ledger::{
    Engine, LedgerError, Product, ProductId, ProductUpdate, Receipt, ReportPeriod,
    TIMESTAMP_FORMAT, TransactionKind, format_rupiah,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut engine = Engine::new(".");
    if let Err(e) = run(&mut engine) {
        // Only prompt-level I/O (stdin gone, stdout closed) lands here.
        eprintln!("terminal error: {e}");
        process::exit(1);
    }
}

fn run(engine: &mut Engine) -> io::Result<()> {
    println!("Welcome to Toko Ledger");
    loop {
        println!("\nMain Menu");
        println!("[1] Manage products");
        println!("[2] Transactions");
        println!("[3] Reports");
        println!("[4] Exit");
        match prompt("Choose an option: ")?.as_str() {
            "1" => product_menu(engine)?,
            "2" => transaction_menu(engine)?,
            "3" => report_menu(engine)?,
            "4" => {
                println!("Goodbye!");
                return Ok(());
            }
            _ => println!("Invalid choice."),
        }
    }
}

/// Prints `label`, then reads one trimmed line from stdin.
fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(line.trim().to_string())
}

fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Sale => "Sale",
        TransactionKind::Purchase => "Purchase",
    }
}

// === Product management ===

fn product_menu(engine: &Engine) -> io::Result<()> {
    loop {
        println!("\nProduct Menu");
        println!("[1] Add product");
        println!("[2] List products");
        println!("[3] Edit product");
        println!("[4] Delete product");
        println!("[5] Back");
        match prompt("Choose an option: ")?.as_str() {
            "1" => add_product(engine)?,
            "2" => list_products(engine),
            "3" => edit_product(engine)?,
            "4" => delete_product(engine)?,
            "5" => return Ok(()),
            _ => println!("Invalid choice."),
        }
    }
}

fn add_product(engine: &Engine) -> io::Result<()> {
    let raw_id = prompt("Product ID (leave empty to auto-generate): ")?;
    let id = if raw_id.is_empty() {
        ProductId::generate()
    } else {
        ProductId::from(raw_id)
    };
    let name = prompt("Name: ")?;
    let Ok(stock) = prompt("Stock: ")?.parse::<u64>() else {
        println!("Invalid stock value.");
        return Ok(());
    };
    let Ok(price) = prompt("Price: ")?.parse::<u64>() else {
        println!("Invalid price value.");
        return Ok(());
    };
    let description = prompt("Description (material, features, size): ")?;

    match engine.add_product(Product {
        id,
        name,
        stock,
        price,
        description,
    }) {
        Ok(()) => println!("Product added."),
        Err(e) => println!("Error: {e}"),
    }
    Ok(())
}

fn list_products(engine: &Engine) {
    let products = match engine.products() {
        Ok(products) => products,
        Err(e) => {
            println!("Error: {e}");
            return;
        }
    };

    println!("\nProducts:");
    println!("{}", "-".repeat(60));
    if products.is_empty() {
        println!("(no products yet)");
    }
    for product in products {
        println!(
            "{} | {} | stock: {} | {} | {}",
            product.id,
            product.name,
            product.stock,
            format_rupiah(product.price),
            product.description
        );
    }
    println!("{}", "-".repeat(60));
}

fn edit_product(engine: &Engine) -> io::Result<()> {
    let id = prompt("Product ID to edit: ")?;
    println!("Enter new values (leave empty to keep the current one):");
    let name = prompt("New name: ")?;
    let raw_stock = prompt("New stock: ")?;
    let raw_price = prompt("New price: ")?;
    let description = prompt("New description: ")?;

    let Ok(stock) = parse_optional_u64(&raw_stock) else {
        println!("Invalid stock value.");
        return Ok(());
    };
    let Ok(price) = parse_optional_u64(&raw_price) else {
        println!("Invalid price value.");
        return Ok(());
    };
    let update = ProductUpdate {
        name: (!name.is_empty()).then_some(name),
        stock,
        price,
        description: (!description.is_empty()).then_some(description),
    };

    match engine.update_product(&id, update) {
        Ok(product) => println!("Product {} updated.", product.id),
        Err(e) => println!("Error: {e}"),
    }
    Ok(())
}

/// Empty input keeps the current value; anything else must parse as a number.
fn parse_optional_u64(raw: &str) -> Result<Option<u64>, std::num::ParseIntError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some)
}

fn delete_product(engine: &Engine) -> io::Result<()> {
    let id = prompt("Product ID to delete: ")?;
    match engine.remove_product(&id) {
        Ok(()) => println!("Product deleted."),
        Err(e) => println!("Error: {e}"),
    }
    Ok(())
}

// === Transactions ===

fn transaction_menu(engine: &mut Engine) -> io::Result<()> {
    loop {
        println!("\nTransaction Menu");
        println!("[1] Sell");
        println!("[2] Buy (restock)");
        println!("[3] Recent history");
        println!("[4] Back");
        match prompt("Choose an option: ")?.as_str() {
            "1" => record_transaction(engine, TransactionKind::Sale)?,
            "2" => record_transaction(engine, TransactionKind::Purchase)?,
            "3" => show_recent(engine),
            "4" => return Ok(()),
            _ => println!("Invalid choice."),
        }
    }
}

fn record_transaction(engine: &mut Engine, kind: TransactionKind) -> io::Result<()> {
    let product_id = prompt("Product ID: ")?;
    // Unparsable input is the same failure as a non-positive quantity.
    let Ok(quantity) = prompt("Quantity: ")?.parse::<u64>() else {
        println!("Error: {}", LedgerError::InvalidQuantity);
        return Ok(());
    };

    match engine.execute(kind, &product_id, quantity) {
        Ok(receipt) => {
            println!(
                "{} recorded. Total: {}",
                kind_label(kind),
                format_rupiah(receipt.transaction.total)
            );
            print_receipt(&receipt);
        }
        Err(e) => println!("Error: {e}"),
    }
    Ok(())
}

fn print_receipt(receipt: &Receipt) {
    let transaction = &receipt.transaction;
    let product = &receipt.product;
    println!("\n===== RECEIPT =====");
    println!("Transaction : {}", transaction.transaction_id);
    println!("Date        : {}", transaction.timestamp.format(TIMESTAMP_FORMAT));
    println!("Kind        : {}", kind_label(transaction.kind));
    println!("Product     : {}", product.name);
    println!("Quantity    : {}", transaction.quantity);
    println!("Unit price  : {}", format_rupiah(product.price));
    println!("Total       : {}", format_rupiah(transaction.total));
    println!("Thank you for your business!");
    println!("===================\n");
}

fn show_recent(engine: &Engine) {
    println!("\nRecent transactions:");
    println!("{}", "-".repeat(72));
    if engine.recent().next().is_none() {
        println!("(none this session)");
    }
    for transaction in engine.recent() {
        println!(
            "{} | {} | {} | {} | {} | {}",
            transaction.transaction_id,
            transaction.timestamp.format(TIMESTAMP_FORMAT),
            kind_label(transaction.kind),
            transaction.product_id,
            transaction.quantity,
            format_rupiah(transaction.total)
        );
    }
    println!("{}", "-".repeat(72));
}

// === Reports ===

fn report_menu(engine: &Engine) -> io::Result<()> {
    loop {
        println!("\nReport Menu");
        println!("[1] Daily report");
        println!("[2] Weekly report");
        println!("[3] Monthly report");
        println!("[4] Back");
        match prompt("Choose an option: ")?.as_str() {
            "1" => show_report(engine, ReportPeriod::Daily),
            "2" => show_report(engine, ReportPeriod::Weekly),
            "3" => show_report(engine, ReportPeriod::Monthly),
            "4" => return Ok(()),
            _ => println!("Invalid choice."),
        }
    }
}

fn show_report(engine: &Engine, period: ReportPeriod) {
    let report = match engine.report(period) {
        Ok(report) => report,
        Err(e) => {
            println!("Error: {e}");
            return;
        }
    };
    if report.is_empty() {
        println!("No transactions recorded for this period.");
        return;
    }

    println!("\n{} report — {}", period, Local::now().format("%d %B %Y"));
    println!("{}", "-".repeat(75));
    for row in &report.rows {
        println!(
            "{} | {:<8} | {:<12} | {:<4} | {}",
            row.timestamp.format(TIMESTAMP_FORMAT),
            kind_label(row.kind),
            row.product_id,
            row.quantity,
            format_rupiah(row.total)
        );
    }
    println!("{}", "-".repeat(75));
    println!("Grand total: {}", format_rupiah(report.grand_total));
}
