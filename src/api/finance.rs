//! Estimate, Invoice, Contract & Bill Endpoints

use super::{action, action_with, create_nested, list_nested, ApiError};
use crate::models::{
    Bill, Contract, Estimate, Invoice, Payment, PaymentDraft, Signature, Termination,
};

// ========================
// Estimates
// ========================

pub async fn send_estimate(id: u32) -> Result<(), ApiError> {
    action::<Estimate>(id, "send").await
}

pub async fn sign_estimate(id: u32, signed_by: &str) -> Result<(), ApiError> {
    action_with::<Estimate, _>(id, "sign", &Signature { signed_by: signed_by.to_string() }).await
}

pub async fn approve_estimate(id: u32) -> Result<(), ApiError> {
    action::<Estimate>(id, "approve").await
}

pub async fn decline_estimate(id: u32) -> Result<(), ApiError> {
    action::<Estimate>(id, "decline").await
}

/// Turn an approved estimate into a draft invoice
pub async fn convert_estimate(id: u32) -> Result<(), ApiError> {
    action::<Estimate>(id, "convert").await
}

// ========================
// Invoices
// ========================

pub async fn send_invoice(id: u32) -> Result<(), ApiError> {
    action::<Invoice>(id, "send").await
}

pub async fn void_invoice(id: u32) -> Result<(), ApiError> {
    action::<Invoice>(id, "void").await
}

pub async fn list_payments(invoice_id: u32) -> Result<Vec<Payment>, ApiError> {
    list_nested::<Invoice, Payment>(invoice_id).await
}

pub async fn record_payment(invoice_id: u32, payment: &PaymentDraft) -> Result<(), ApiError> {
    create_nested::<Invoice, Payment, _>(invoice_id, payment).await
}

// ========================
// Contracts
// ========================

pub async fn send_contract(id: u32) -> Result<(), ApiError> {
    action::<Contract>(id, "send").await
}

pub async fn sign_contract(id: u32, signed_by: &str) -> Result<(), ApiError> {
    action_with::<Contract, _>(id, "sign", &Signature { signed_by: signed_by.to_string() }).await
}

pub async fn activate_contract(id: u32) -> Result<(), ApiError> {
    action::<Contract>(id, "activate").await
}

pub async fn terminate_contract(id: u32, reason: &str) -> Result<(), ApiError> {
    action_with::<Contract, _>(id, "terminate", &Termination { reason: reason.to_string() }).await
}

// ========================
// Bills
// ========================

pub async fn approve_bill(id: u32) -> Result<(), ApiError> {
    action::<Bill>(id, "approve").await
}

pub async fn reject_bill(id: u32) -> Result<(), ApiError> {
    action::<Bill>(id, "reject").await
}

pub async fn pay_bill(id: u32) -> Result<(), ApiError> {
    action::<Bill>(id, "pay").await
}
