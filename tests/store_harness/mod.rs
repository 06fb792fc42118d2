//! Shared test harness for record store testing
//!
//! Provides sample invoices and expenses, a `FailingStore` test double,
//! and the `record_store_tests!` contract macro.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod record_store_tests;
pub mod failing_store;

use chrono::{TimeZone, Utc};
use invoicer::entities::{
    Address, Expense, Invoice, InvoiceStatus, LineItem, Party, PaymentDetails,
};
use serde_json::{Value, json};

pub fn sample_address() -> Address {
    Address {
        street: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip: "62701".to_string(),
    }
}

pub fn sample_party(name: &str, email: &str) -> Party {
    Party {
        name: name.to_string(),
        email: email.to_string(),
        address: sample_address(),
    }
}

/// A fully populated invoice with a fixed id
pub fn sample_invoice(id: &str) -> Invoice {
    Invoice {
        id: id.to_string(),
        sender: sample_party("Acme Studio", "billing@acme.test"),
        client: sample_party("Globex", "ap@globex.test"),
        items: vec![
            LineItem {
                description: "Design".to_string(),
                quantity: 2,
                price: 100.0,
            },
            LineItem {
                description: "Hosting".to_string(),
                quantity: 1,
                price: 50.0,
            },
        ],
        invoice_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        due_date: Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
        status: InvoiceStatus::Unpaid,
        notes: Some("Thanks for your business".to_string()),
        tax_rate: Some(10.0),
        payment_details: Some(PaymentDetails {
            bank_name: Some("First Bank".to_string()),
            account_name: Some("Acme Studio".to_string()),
            iban: Some("DE89370400440532013000".to_string()),
        }),
        logo_url: None,
    }
}

/// An expense with a fixed id
pub fn sample_expense(id: &str, item_name: &str, amount: f64) -> Expense {
    Expense {
        id: id.to_string(),
        item_name: item_name.to_string(),
        vendor: "Office Depot".to_string(),
        category: "Supplies".to_string(),
        purchase_date: Some(Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap()),
        amount,
        description: None,
        receipt_url: None,
    }
}

/// Create payload for an invoice, as a client would send it
pub fn invoice_draft_json() -> Value {
    json!({
        "sender": {
            "name": "Acme Studio",
            "email": "billing@acme.test",
            "address": { "street": "1 Main St", "city": "Springfield", "state": "IL", "zip": "62701" }
        },
        "client": {
            "name": "Globex",
            "email": "ap@globex.test",
            "address": { "street": "9 Elm Rd", "city": "Shelbyville", "state": "IL", "zip": "62565" }
        },
        "items": [
            { "description": "Design", "quantity": 2, "price": 100.0 },
            { "description": "Hosting", "quantity": 1, "price": 50.0 }
        ],
        "invoiceDate": "2024-01-01T00:00:00Z",
        "dueDate": "2024-01-31T00:00:00Z",
        "status": "unpaid",
        "taxRate": 10.0
    })
}
