//! Invoice model and the derived-amount rules.
//!
//! An invoice stores its derived fields (`subtotal`, `tax_amount`, `total`,
//! `balance`, `status`) at write time. Payment recording is the only path
//! that mutates them afterwards, via [`reconcile_payment`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Unpaid,
    Partial,
    Paid,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Unpaid => write!(f, "unpaid"),
            InvoiceStatus::Partial => write!(f, "partial"),
            InvoiceStatus::Paid => write!(f, "paid"),
        }
    }
}

/// Line item. `amount` is taken from the caller as-is, not recomputed from
/// `quantity * price` - recorded-at-entry semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: f64,
    pub price: f64,
    pub tax_rate: f64,
    #[serde(default)]
    pub discount: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub customer_id: String,
    pub customer_name: String,
    pub business_id: String,
    pub invoice_date: DateTime<Utc>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub items: Vec<InvoiceItem>,
    pub subtotal: f64,
    pub tax_amount: f64,
    #[serde(default)]
    pub discount: f64,
    pub total: f64,
    #[serde(default)]
    pub paid_amount: f64,
    pub balance: f64,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct InvoiceCreate {
    #[validate(length(min = 1, message = "Customer is required"))]
    pub customer_id: String,
    pub invoice_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "At least one item is required"))]
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub discount: f64,
    pub notes: Option<String>,
}

/// Sum the line items into `(subtotal, tax_amount, total)`.
///
/// Per-item tax is `amount * tax_rate / 100`; the invoice-level discount is
/// applied once, after tax.
pub fn compute_totals(items: &[InvoiceItem], discount: f64) -> (f64, f64, f64) {
    let subtotal: f64 = items.iter().map(|item| item.amount).sum();
    let tax_amount: f64 = items
        .iter()
        .map(|item| item.amount * item.tax_rate / 100.0)
        .sum();
    let total = subtotal + tax_amount - discount;
    (subtotal, tax_amount, total)
}

/// Apply a payment of `amount` to an invoice with the given `total` and
/// prior `paid_amount`, yielding `(new_paid, new_balance, new_status)`.
///
/// Over-payment is representable: the balance goes negative and the status
/// is `paid`. The amount itself is not validated.
pub fn reconcile_payment(total: f64, paid_amount: f64, amount: f64) -> (f64, f64, InvoiceStatus) {
    let new_paid = paid_amount + amount;
    let new_balance = total - new_paid;
    let new_status = if new_balance <= 0.0 {
        InvoiceStatus::Paid
    } else if new_paid > 0.0 {
        InvoiceStatus::Partial
    } else {
        InvoiceStatus::Unpaid
    };
    (new_paid, new_balance, new_status)
}

impl Invoice {
    /// Build a new invoice with derived fields computed from the items.
    /// Starts unpaid with `balance == total`.
    pub fn new(
        data: InvoiceCreate,
        invoice_number: String,
        customer_name: String,
        business_id: String,
    ) -> Self {
        let (subtotal, tax_amount, total) = compute_totals(&data.items, data.discount);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            invoice_number,
            customer_id: data.customer_id,
            customer_name,
            business_id,
            invoice_date: data.invoice_date.unwrap_or_else(Utc::now),
            due_date: data.due_date,
            items: data.items,
            subtotal,
            tax_amount,
            discount: data.discount,
            total,
            paid_amount: 0.0,
            balance: total,
            status: InvoiceStatus::Unpaid,
            notes: data.notes,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(amount: f64, tax_rate: f64, quantity: f64) -> InvoiceItem {
        InvoiceItem {
            product_id: "prod-1".to_string(),
            product_name: "Widget".to_string(),
            quantity,
            price: amount / quantity,
            tax_rate,
            discount: 0.0,
            amount,
        }
    }

    #[test]
    fn totals_for_two_items_with_mixed_tax_rates() {
        let items = vec![item(100.0, 18.0, 1.0), item(50.0, 12.0, 1.0)];
        let (subtotal, tax_amount, total) = compute_totals(&items, 0.0);
        assert_eq!(subtotal, 150.0);
        assert_eq!(tax_amount, 24.0);
        assert_eq!(total, 174.0);
    }

    #[test]
    fn discount_is_applied_after_tax() {
        let items = vec![item(200.0, 10.0, 2.0)];
        let (subtotal, tax_amount, total) = compute_totals(&items, 20.0);
        assert_eq!(subtotal, 200.0);
        assert_eq!(tax_amount, 20.0);
        assert_eq!(total, 200.0);
    }

    #[test]
    fn new_invoice_starts_unpaid_with_balance_equal_to_total() {
        let invoice = Invoice::new(
            InvoiceCreate {
                customer_id: "cust-1".to_string(),
                invoice_date: None,
                due_date: None,
                items: vec![item(100.0, 18.0, 1.0), item(50.0, 12.0, 1.0)],
                discount: 0.0,
                notes: None,
            },
            "INV-00001".to_string(),
            "Acme Rooftops".to_string(),
            "biz-1".to_string(),
        );
        assert_eq!(invoice.total, invoice.subtotal + invoice.tax_amount - invoice.discount);
        assert_eq!(invoice.balance, invoice.total - invoice.paid_amount);
        assert_eq!(invoice.paid_amount, 0.0);
        assert_eq!(invoice.status, InvoiceStatus::Unpaid);
    }

    #[test]
    fn partial_payment_leaves_invoice_partial() {
        let (paid, balance, status) = reconcile_payment(174.0, 0.0, 74.0);
        assert_eq!(paid, 74.0);
        assert_eq!(balance, 100.0);
        assert_eq!(status, InvoiceStatus::Partial);
    }

    #[test]
    fn exact_payment_settles_invoice() {
        let (paid, balance, status) = reconcile_payment(174.0, 74.0, 100.0);
        assert_eq!(paid, 174.0);
        assert_eq!(balance, 0.0);
        assert_eq!(status, InvoiceStatus::Paid);
    }

    #[test]
    fn over_payment_goes_negative_but_reads_paid() {
        let (paid, balance, status) = reconcile_payment(174.0, 100.0, 100.0);
        assert_eq!(paid, 200.0);
        assert_eq!(balance, -26.0);
        assert_eq!(status, InvoiceStatus::Paid);
    }

    #[test]
    fn zero_payment_on_untouched_invoice_stays_unpaid() {
        let (paid, balance, status) = reconcile_payment(174.0, 0.0, 0.0);
        assert_eq!(paid, 0.0);
        assert_eq!(balance, 174.0);
        assert_eq!(status, InvoiceStatus::Unpaid);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Partial).unwrap(),
            "\"partial\""
        );
        assert_eq!(InvoiceStatus::Paid.to_string(), "paid");
    }
}
