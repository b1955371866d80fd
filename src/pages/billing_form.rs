//! Shared form state for estimates and invoices: customer, line items,
//! discount and tax, plus one date field (valid-until or due date).

use leptos::prelude::*;

use crate::components::{cleaned_items, optional_id, optional_text};
use crate::models::{Customer, LineItem};
use crate::totals::{self, parse_amount, parse_rate_percent, round_cents};

#[derive(Clone, Copy)]
pub struct BillingForm {
    pub editing: RwSignal<Option<u32>>,
    pub customer_id: RwSignal<String>,
    pub items: RwSignal<Vec<LineItem>>,
    pub discount: RwSignal<String>,
    pub tax_percent: RwSignal<String>,
    pub date: RwSignal<String>,
    pub site_name: RwSignal<String>,
}

/// Fields read back from the form on submit
pub struct BillingValues {
    pub customer_id: Option<u32>,
    pub customer_name: String,
    pub line_items: Vec<LineItem>,
    pub discount: f64,
    pub tax_rate: f64,
    pub date: Option<String>,
    pub site_name: Option<String>,
}

impl BillingForm {
    pub fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            customer_id: RwSignal::new(String::new()),
            items: RwSignal::new(Vec::new()),
            discount: RwSignal::new(String::new()),
            tax_percent: RwSignal::new(String::new()),
            date: RwSignal::new(String::new()),
            site_name: RwSignal::new(String::new()),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn fill(
        &self,
        id: Option<u32>,
        customer_id: Option<u32>,
        items: &[LineItem],
        discount: f64,
        tax_rate: f64,
        date: Option<&str>,
        site_name: Option<&str>,
    ) {
        self.editing.set(id);
        self.customer_id.set(customer_id.map(|c| c.to_string()).unwrap_or_default());
        self.items.set(if items.is_empty() {
            vec![LineItem { quantity: 1.0, ..Default::default() }]
        } else {
            items.to_vec()
        });
        self.discount.set(if discount == 0.0 { String::new() } else { discount.to_string() });
        self.tax_percent.set(rate_as_percent(tax_rate));
        self.date.set(date.unwrap_or_default().to_string());
        self.site_name.set(site_name.unwrap_or_default().to_string());
    }

    pub fn values(&self, customers: &[Customer]) -> BillingValues {
        let customer_id = optional_id(&self.customer_id.get_untracked());
        let customer_name = customer_id
            .and_then(|id| customers.iter().find(|c| c.id == id))
            .map(|c| c.name.clone())
            .unwrap_or_default();
        BillingValues {
            customer_id,
            customer_name,
            line_items: self.items.with_untracked(|items| cleaned_items(items)),
            discount: parse_amount(&self.discount.get_untracked()),
            tax_rate: parse_rate_percent(&self.tax_percent.get_untracked()),
            date: optional_text(&self.date.get_untracked()),
            site_name: optional_text(&self.site_name.get_untracked()),
        }
    }
}

impl BillingValues {
    /// Reason the form can't be submitted yet
    pub fn problem(&self) -> Option<&'static str> {
        if self.customer_id.is_none() {
            Some("Choose a customer.")
        } else if self.line_items.is_empty() {
            Some("Add at least one line item.")
        } else if self.discount < 0.0 || self.tax_rate < 0.0 {
            Some("Discount and tax rate cannot be negative.")
        } else if round_cents(self.discount) > round_cents(totals::compute(&self.line_items, 0.0, 0.0).subtotal) {
            Some("Discount cannot exceed the subtotal.")
        } else {
            None
        }
    }
}

/// 0.0825 → "8.25"; zero shows as an empty field
pub fn rate_as_percent(rate: f64) -> String {
    if rate == 0.0 {
        return String::new();
    }
    ((rate * 10000.0).round() / 100.0).to_string()
}

pub fn customer_choices(customers: &[Customer]) -> Vec<(String, String)> {
    customers.iter().map(|c| (c.id.to_string(), c.name.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_as_percent() {
        assert_eq!(rate_as_percent(0.0825), "8.25");
        assert_eq!(rate_as_percent(0.07), "7");
        assert_eq!(rate_as_percent(0.0), "");
    }

    fn plow_job(discount: f64) -> BillingValues {
        BillingValues {
            customer_id: Some(1),
            customer_name: "Acme".into(),
            line_items: vec![LineItem { description: "Plow".into(), quantity: 2.0, unit_price: 45.0, unit: None }],
            discount,
            tax_rate: 0.05,
            date: None,
            site_name: None,
        }
    }

    #[test]
    fn test_discount_is_capped_at_subtotal() {
        assert_eq!(plow_job(90.0).problem(), None);
        assert_eq!(plow_job(90.001).problem(), None);
        assert_eq!(plow_job(90.5).problem(), Some("Discount cannot exceed the subtotal."));
        assert_eq!(plow_job(-1.0).problem(), Some("Discount and tax rate cannot be negative."));
    }

    #[test]
    fn test_problem() {
        let values = BillingValues {
            customer_id: Some(1),
            customer_name: "Acme".into(),
            line_items: vec![LineItem { description: "Plow".into(), quantity: 1.0, unit_price: 90.0, unit: None }],
            discount: 0.0,
            tax_rate: 0.05,
            date: None,
            site_name: None,
        };
        assert_eq!(values.problem(), None);
        assert_eq!(BillingValues { customer_id: None, ..values }.problem(), Some("Choose a customer."));
    }
}
