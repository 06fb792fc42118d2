//! Expense record

use crate::core::record::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A recorded business expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub item_name: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<DateTime<Utc>>,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
}

/// Create payload for an expense
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    #[validate(length(min = 1, message = "item name must not be empty"))]
    pub item_name: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub purchase_date: Option<DateTime<Utc>>,
    #[validate(range(exclusive_min = 0.0, message = "amount must be positive"))]
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub receipt_url: Option<String>,
}

/// Partial update for an expense
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePatch {
    #[validate(length(min = 1, message = "item name must not be empty"))]
    pub item_name: Option<String>,
    pub vendor: Option<String>,
    pub category: Option<String>,
    pub purchase_date: Option<DateTime<Utc>>,
    #[validate(range(exclusive_min = 0.0, message = "amount must be positive"))]
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub receipt_url: Option<String>,
}

impl Record for Expense {
    type Draft = ExpenseDraft;
    type Patch = ExpensePatch;

    fn resource_name() -> &'static str {
        "expenses"
    }

    fn resource_name_singular() -> &'static str {
        "expense"
    }

    fn id_prefix() -> &'static str {
        "EXP"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: ExpenseDraft) -> Self {
        Self {
            id,
            item_name: draft.item_name,
            vendor: draft.vendor,
            category: draft.category,
            purchase_date: draft.purchase_date,
            amount: draft.amount,
            description: draft.description,
            receipt_url: draft.receipt_url,
        }
    }

    fn apply_patch(&mut self, patch: ExpensePatch) {
        if let Some(item_name) = patch.item_name {
            self.item_name = item_name;
        }
        if let Some(vendor) = patch.vendor {
            self.vendor = vendor;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(purchase_date) = patch.purchase_date {
            self.purchase_date = Some(purchase_date);
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(receipt_url) = patch.receipt_url {
            self.receipt_url = Some(receipt_url);
        }
    }
}
