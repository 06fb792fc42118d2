//! Value types shared by invoice documents

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Postal address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Sender or client of an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Party {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(nested)]
    pub address: Address,
}

/// One line of an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LineItem {
    pub description: String,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
}

impl LineItem {
    pub fn amount(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// Bank details printed on an invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
}
