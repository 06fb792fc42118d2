//! Record types managed by the service

pub mod expense;
pub mod invoice;
pub mod party;

pub use expense::{Expense, ExpenseDraft, ExpensePatch};
pub use invoice::{Invoice, InvoiceDraft, InvoicePatch, InvoiceStatus, InvoiceTotals};
pub use party::{Address, LineItem, Party, PaymentDetails};
