//! Invoice record

use super::party::{LineItem, Party, PaymentDetails};
use crate::core::record::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Invoice lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Unpaid,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Unpaid => "unpaid",
            InvoiceStatus::Paid => "paid",
        }
    }
}

/// An invoice document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub sender: Party,
    pub client: Party,
    pub items: Vec<LineItem>,
    pub invoice_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_details: Option<PaymentDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Amounts derived from an invoice's line items and tax rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl Invoice {
    /// Sum of quantity × price over all items
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(LineItem::amount).sum()
    }

    pub fn totals(&self) -> InvoiceTotals {
        let subtotal = self.subtotal();
        let tax = subtotal * self.tax_rate.unwrap_or(0.0) / 100.0;
        InvoiceTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Create payload for an invoice
///
/// Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    #[validate(nested)]
    pub sender: Party,
    #[validate(nested)]
    pub client: Party,
    #[validate(nested)]
    pub items: Vec<LineItem>,
    pub invoice_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "tax rate must not be negative"))]
    pub tax_rate: Option<f64>,
    #[serde(default)]
    pub payment_details: Option<PaymentDetails>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Partial update for an invoice
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    #[validate(nested)]
    pub sender: Option<Party>,
    #[validate(nested)]
    pub client: Option<Party>,
    #[validate(nested)]
    pub items: Option<Vec<LineItem>>,
    pub invoice_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<InvoiceStatus>,
    pub notes: Option<String>,
    #[validate(range(min = 0.0, message = "tax rate must not be negative"))]
    pub tax_rate: Option<f64>,
    pub payment_details: Option<PaymentDetails>,
    pub logo_url: Option<String>,
}

impl Record for Invoice {
    type Draft = InvoiceDraft;
    type Patch = InvoicePatch;

    fn resource_name() -> &'static str {
        "invoices"
    }

    fn resource_name_singular() -> &'static str {
        "invoice"
    }

    fn id_prefix() -> &'static str {
        "INV"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: InvoiceDraft) -> Self {
        Self {
            id,
            sender: draft.sender,
            client: draft.client,
            items: draft.items,
            invoice_date: draft.invoice_date,
            due_date: draft.due_date,
            status: draft.status,
            notes: draft.notes,
            tax_rate: draft.tax_rate,
            payment_details: draft.payment_details,
            logo_url: draft.logo_url,
        }
    }

    fn apply_patch(&mut self, patch: InvoicePatch) {
        if let Some(sender) = patch.sender {
            self.sender = sender;
        }
        if let Some(client) = patch.client {
            self.client = client;
        }
        if let Some(items) = patch.items {
            self.items = items;
        }
        if let Some(invoice_date) = patch.invoice_date {
            self.invoice_date = invoice_date;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        if let Some(tax_rate) = patch.tax_rate {
            self.tax_rate = Some(tax_rate);
        }
        if let Some(payment_details) = patch.payment_details {
            self.payment_details = Some(payment_details);
        }
        if let Some(logo_url) = patch.logo_url {
            self.logo_url = Some(logo_url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::party::Address;
    use serde_json::json;

    fn party(name: &str) -> Party {
        Party {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            address: Address {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip: "62701".to_string(),
            },
        }
    }

    fn invoice() -> Invoice {
        Invoice {
            id: "INV-001".to_string(),
            sender: party("Sender"),
            client: party("Client"),
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
            invoice_date: Utc::now(),
            due_date: Utc::now(),
            status: InvoiceStatus::Unpaid,
            notes: None,
            tax_rate: Some(10.0),
            payment_details: None,
            logo_url: None,
        }
    }

    #[test]
    fn test_totals_apply_tax_to_subtotal() {
        let totals = invoice().totals();
        assert!((totals.subtotal - 250.0).abs() < 1e-9);
        assert!((totals.tax - 25.0).abs() < 1e-9);
        assert!((totals.total - 275.0).abs() < 1e-9);
    }

    #[test]
    fn test_totals_without_tax_rate() {
        let mut invoice = invoice();
        invoice.tax_rate = None;
        let totals = invoice.totals();
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_status_patch_touches_only_status() {
        let original = invoice();
        let mut patched = original.clone();
        patched.apply_patch(InvoicePatch {
            status: Some(InvoiceStatus::Paid),
            ..Default::default()
        });

        assert_eq!(patched.status, InvoiceStatus::Paid);
        patched.status = original.status;
        assert_eq!(patched, original);
    }

    #[test]
    fn test_draft_ignores_client_id_and_defaults_status() {
        let draft: InvoiceDraft = serde_json::from_value(json!({
            "id": "INV-999",
            "sender": party("Sender"),
            "client": party("Client"),
            "items": [],
            "invoiceDate": "2025-01-01T00:00:00Z",
            "dueDate": "2025-01-31T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(draft.status, InvoiceStatus::Draft);

        let invoice = Invoice::from_draft("INV-001".to_string(), draft);
        assert_eq!(invoice.id, "INV-001");
    }

    #[test]
    fn test_draft_rejects_negative_tax_rate() {
        let draft: InvoiceDraft = serde_json::from_value(json!({
            "sender": party("Sender"),
            "client": party("Client"),
            "items": [{ "description": "Work", "quantity": 1, "price": 10.0 }],
            "invoiceDate": "2025-01-01T00:00:00Z",
            "dueDate": "2025-01-31T00:00:00Z",
            "taxRate": -5.0
        }))
        .unwrap();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(invoice()).unwrap();
        assert_eq!(json["id"], "INV-001");
        assert_eq!(json["status"], "unpaid");
        assert_eq!(json["taxRate"], 10.0);
        assert!(json.get("invoiceDate").is_some());
        assert!(json.get("notes").is_none());
    }
}
