//! Money documents: estimates, invoices, contracts, bills

use serde::{Deserialize, Serialize};

use crate::api::Resource;
use crate::listing::{Listable, SortKey};
use crate::totals::{self, Totals};
use super::{BillStatus, ContractStatus, EstimateStatus, InvoiceStatus};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    #[serde(alias = "price", alias = "rate")]
    pub unit_price: f64,
    pub unit: Option<String>,
}

impl LineItem {
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Estimate {
    pub id: u32,
    pub number: String,
    pub customer_id: Option<u32>,
    pub customer_name: String,
    pub site_name: Option<String>,
    pub line_items: Vec<LineItem>,
    pub discount: f64,
    pub tax_rate: f64,
    pub status: EstimateStatus,
    pub signed_by: Option<String>,
    pub valid_until: Option<String>,
    pub created_at: Option<String>,
}

impl Estimate {
    pub fn totals(&self) -> Totals {
        totals::compute(&self.line_items, self.discount, self.tax_rate)
    }
}

impl Resource for Estimate {
    const PATH: &'static str = "estimates";
    const ENVELOPE: &'static str = "estimates";
    const SINGULAR: &'static str = "estimate";
    const LABEL: &'static str = "estimates";
}

impl Listable for Estimate {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.number.as_str(),
            self.customer_name.as_str(),
            self.site_name.as_deref().unwrap_or(""),
        ]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> SortKey {
        match key {
            "number" => SortKey::text(&self.number),
            "customer" => SortKey::text(&self.customer_name),
            "total" => SortKey::Number(self.totals().total),
            "created_at" => SortKey::date(self.created_at.as_deref()),
            _ => SortKey::Missing,
        }
    }
}

/// Body for creating or editing an estimate
#[derive(Debug, Clone, Default, Serialize)]
pub struct EstimateDraft {
    pub customer_id: Option<u32>,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    pub line_items: Vec<LineItem>,
    pub discount: f64,
    pub tax_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
}

/// Body for sign actions on estimates and contracts
#[derive(Debug, Clone, Serialize)]
pub struct Signature {
    pub signed_by: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Payment {
    pub id: u32,
    pub amount: f64,
    pub method: String,
    pub reference: Option<String>,
    pub paid_at: Option<String>,
}

impl Resource for Payment {
    const PATH: &'static str = "payments";
    const ENVELOPE: &'static str = "payments";
    const SINGULAR: &'static str = "payment";
    const LABEL: &'static str = "payments";
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentDraft {
    pub amount: f64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

pub const PAYMENT_METHODS: &[(&str, &str)] = &[
    ("check", "Check"),
    ("card", "Card"),
    ("ach", "ACH"),
    ("cash", "Cash"),
];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    pub id: u32,
    pub number: String,
    pub customer_id: Option<u32>,
    pub customer_name: String,
    pub line_items: Vec<LineItem>,
    pub discount: f64,
    pub tax_rate: f64,
    /// Server-computed total, when sent
    pub total: Option<f64>,
    pub amount_paid: f64,
    pub issued_at: Option<String>,
    pub due_date: Option<String>,
    pub status: InvoiceStatus,
    pub payments: Vec<Payment>,
}

impl Invoice {
    pub fn totals(&self) -> Totals {
        totals::compute(&self.line_items, self.discount, self.tax_rate)
    }

    /// Prefer the server figure; fall back to the line items
    pub fn total(&self) -> f64 {
        self.total.unwrap_or_else(|| self.totals().total)
    }

    pub fn amount_due(&self) -> f64 {
        totals::amount_due(self.total(), self.amount_paid)
    }
}

impl Resource for Invoice {
    const PATH: &'static str = "invoices";
    const ENVELOPE: &'static str = "invoices";
    const SINGULAR: &'static str = "invoice";
    const LABEL: &'static str = "invoices";
}

impl Listable for Invoice {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.number.as_str(), self.customer_name.as_str()]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> SortKey {
        match key {
            "number" => SortKey::text(&self.number),
            "customer" => SortKey::text(&self.customer_name),
            "total" => SortKey::Number(self.total()),
            "due" => SortKey::Number(self.amount_due()),
            "due_date" => SortKey::date(self.due_date.as_deref()),
            _ => SortKey::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceDraft {
    pub customer_id: Option<u32>,
    pub customer_name: String,
    pub line_items: Vec<LineItem>,
    pub discount: f64,
    pub tax_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contract {
    pub id: u32,
    pub title: String,
    pub customer_id: Option<u32>,
    pub customer_name: String,
    pub value: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: ContractStatus,
    pub signed_by: Option<String>,
}

impl Resource for Contract {
    const PATH: &'static str = "contracts";
    const ENVELOPE: &'static str = "contracts";
    const SINGULAR: &'static str = "contract";
    const LABEL: &'static str = "contracts";
}

impl Listable for Contract {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.customer_name.as_str()]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> SortKey {
        match key {
            "title" => SortKey::text(&self.title),
            "customer" => SortKey::text(&self.customer_name),
            "value" => SortKey::Number(self.value),
            "start_date" => SortKey::date(self.start_date.as_deref()),
            "end_date" => SortKey::date(self.end_date.as_deref()),
            _ => SortKey::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContractDraft {
    pub title: String,
    pub customer_id: Option<u32>,
    pub customer_name: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Body for the terminate action
#[derive(Debug, Clone, Serialize)]
pub struct Termination {
    pub reason: String,
}

/// Payable owed to a vendor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Bill {
    pub id: u32,
    pub vendor_id: Option<u32>,
    pub vendor_name: String,
    pub number: String,
    pub description: String,
    pub amount: f64,
    pub due_date: Option<String>,
    pub status: BillStatus,
}

impl Resource for Bill {
    const PATH: &'static str = "bills";
    const ENVELOPE: &'static str = "bills";
    const SINGULAR: &'static str = "bill";
    const LABEL: &'static str = "bills";
}

impl Listable for Bill {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.number.as_str(), self.vendor_name.as_str(), self.description.as_str()]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "vendor" => self.vendor_id.map(|id| id.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> SortKey {
        match key {
            "number" => SortKey::text(&self.number),
            "vendor" => SortKey::text(&self.vendor_name),
            "amount" => SortKey::Number(self.amount),
            "due_date" => SortKey::date(self.due_date.as_deref()),
            _ => SortKey::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BillDraft {
    pub vendor_id: Option<u32>,
    pub number: String,
    pub description: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Sum of a column, for list footers
pub fn sum_by<T>(items: &[T], value: impl Fn(&T) -> f64) -> f64 {
    items.iter().map(value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fields_decode_to_defaults() {
        let body = serde_json::json!({"invoices": [
            {"id": 1, "number": "INV-1", "customer_name": "Acme", "amount_paid": 50.0, "status": "sent",
             "line_items": [{"description": "Plow", "quantity": 2, "unit_price": 75}]},
            {"id": 2, "number": null, "customer_name": null, "amount_paid": null, "discount": null,
             "tax_rate": null, "status": null, "payments": null,
             "line_items": [{"description": null, "quantity": null, "unit_price": 40}]}
        ]});
        let invoices: Vec<Invoice> = crate::api::unwrap_collection(body, Invoice::ENVELOPE).unwrap();
        assert_eq!(invoices.len(), 2);
        assert_eq!(invoices[0].amount_paid, 50.0);
        let sparse = &invoices[1];
        assert_eq!(sparse.customer_name, "");
        assert_eq!(sparse.amount_paid, 0.0);
        assert_eq!(sparse.status, InvoiceStatus::Unknown);
        assert_eq!(sparse.line_items[0].quantity, 0.0);
        assert_eq!(sparse.line_items[0].unit_price, 40.0);

        let estimates: Vec<Estimate> = crate::api::unwrap_collection(
            serde_json::json!([{"id": 3, "customer_name": null, "discount": null, "line_items": null}]),
            Estimate::ENVELOPE,
        )
        .unwrap();
        assert_eq!(estimates[0].discount, 0.0);
        assert!(estimates[0].line_items.is_empty());

        let contracts: Vec<Contract> = crate::api::unwrap_collection(
            serde_json::json!({"data": [{"id": 4, "title": null, "value": null, "customer_name": null}]}),
            Contract::ENVELOPE,
        )
        .unwrap();
        assert_eq!((contracts[0].title.as_str(), contracts[0].value), ("", 0.0));

        let bills: Vec<Bill> = crate::api::unwrap_collection(
            serde_json::json!({"bills": [{"id": 5, "vendor_name": null, "number": null, "description": null, "amount": null}]}),
            Bill::ENVELOPE,
        )
        .unwrap();
        assert_eq!(bills[0].amount, 0.0);

        let payments: Vec<Payment> = crate::api::unwrap_collection(
            serde_json::json!([{"id": 6, "amount": null, "method": null, "paid_at": null}]),
            Payment::ENVELOPE,
        )
        .unwrap();
        assert_eq!((payments[0].amount, payments[0].method.as_str()), (0.0, ""));
    }

    #[test]
    fn test_line_item_accepts_price_alias() {
        let item: LineItem = serde_json::from_str(r#"{"description": "Salt", "quantity": 3, "price": 12.5}"#).unwrap();
        assert_eq!(item.amount(), 37.5);
    }

    #[test]
    fn test_invoice_prefers_server_total() {
        let mut invoice = Invoice {
            line_items: vec![LineItem { description: "Plow".into(), quantity: 2.0, unit_price: 100.0, unit: None }],
            tax_rate: 0.1,
            amount_paid: 50.0,
            ..Default::default()
        };
        assert!((invoice.total() - 220.0).abs() < 1e-9);
        assert!((invoice.amount_due() - 170.0).abs() < 1e-9);

        invoice.total = Some(230.0);
        assert!((invoice.amount_due() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_invoice_decodes_unknown_status() {
        let invoice: Invoice = serde_json::from_str(r#"{"id": 3, "number": "INV-3", "status": "in_collections"}"#).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Unknown);
        assert_eq!(invoice.total(), 0.0);
    }

    #[test]
    fn test_sum_by() {
        let bills = vec![
            Bill { amount: 10.0, ..Default::default() },
            Bill { amount: 32.5, ..Default::default() },
        ];
        assert_eq!(sum_by(&bills, |b| b.amount), 42.5);
    }
}
