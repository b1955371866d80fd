//! Invoices Page
//!
//! Billing with payment tracking. Amount due is total minus payments;
//! the detail panel lists payments and records new ones.

use leptos::prelude::*;

use super::billing_form::{customer_choices, BillingForm};
use crate::api;
use crate::components::{
    list_phase, optional_text, DeleteConfirmButton, EmptyState, FilterSelect, FormActions, LineItemEditor,
    LineItemTable, ListBody, Modal, NumberField, PageHeader, SearchBar, SelectField, SortHeader, StatusBadge,
    TextField, TotalsSummary,
};
use crate::listing::{self, format_date, ListQuery, SortSpec};
use crate::models::{sum_by, Customer, Invoice, InvoiceDraft, InvoiceStatus, PaymentDraft, PAYMENT_METHODS};
use crate::notify;
use crate::resource::{confirm_then, dispatch, use_collection, use_collection_with, use_record};
use crate::totals::{format_money, parse_amount, round_cents};

/// Payment amount check against what is still owed
fn payment_problem(amount: f64, amount_due: f64) -> Option<String> {
    if amount <= 0.0 {
        Some("Enter a payment amount.".to_string())
    } else if round_cents(amount) > round_cents(amount_due) {
        Some(format!("Payment exceeds the amount due ({}).", format_money(amount_due)))
    } else {
        None
    }
}

#[component]
pub fn InvoicesPage() -> impl IntoView {
    let invoices = use_collection::<Invoice>();
    let customers = use_collection::<Customer>();
    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let sort = RwSignal::new(Some(SortSpec::asc("due_date")));

    let visible = Memo::new(move |_| {
        let query = ListQuery::new(search.get()).filter("status", status.get()).sorted(sort.get());
        invoices.items.with(|items| listing::apply(items, &query))
    });
    let choices = Signal::derive(move || customers.items.with(|c| customer_choices(c)));
    let phase = Signal::derive(move || {
        list_phase(invoices.loading.get(), invoices.items.with(|i| i.len()), visible.with(|v| v.len()))
    });
    let receivable = Signal::derive(move || {
        invoices.items.with(|items| {
            sum_by(items, |i| if i.status == InvoiceStatus::Void { 0.0 } else { i.amount_due() })
        })
    });

    // Create / edit
    let form = BillingForm::new();
    let form_open = RwSignal::new(false);
    let open_form = move |invoice: Option<Invoice>| {
        match invoice {
            Some(i) => form.fill(Some(i.id), i.customer_id, &i.line_items, i.discount, i.tax_rate, i.due_date.as_deref(), None),
            None => form.fill(None, None, &[], 0.0, 0.0, None, None),
        }
        form_open.set(true);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let values = customers.items.with_untracked(|c| form.values(c));
        if let Some(problem) = values.problem() {
            notify::alert(problem);
            return;
        }
        let draft = InvoiceDraft {
            customer_id: values.customer_id,
            customer_name: values.customer_name,
            line_items: values.line_items,
            discount: values.discount,
            tax_rate: values.tax_rate,
            due_date: values.date,
        };
        let after = move || {
            form_open.set(false);
            invoices.reload();
        };
        match form.editing.get_untracked() {
            Some(id) => dispatch(
                "Could not save invoice",
                "Invoice saved",
                async move { api::update::<Invoice, _>(id, &draft).await },
                after,
            ),
            None => dispatch(
                "Could not create invoice",
                "Invoice created",
                async move { api::create::<Invoice, _>(&draft).await },
                after,
            ),
        }
    };

    // Detail: fresh record plus its payments
    let viewing = RwSignal::new(None::<u32>);
    let detail_open = RwSignal::new(false);
    let (detail, set_detail_version) = use_record("invoice", move || viewing.get().map(api::fetch::<Invoice>));
    let payments = use_collection_with("payments", move || {
        let id = viewing.get();
        async move {
            match id {
                Some(id) => api::list_payments(id).await,
                None => Ok(Vec::new()),
            }
        }
    });
    let pay_amount = RwSignal::new(String::new());
    let pay_method = RwSignal::new(PAYMENT_METHODS[0].0.to_string());
    let pay_reference = RwSignal::new(String::new());

    let open_detail = move |id: u32| {
        viewing.set(Some(id));
        pay_amount.set(String::new());
        pay_reference.set(String::new());
        detail_open.set(true);
    };
    let refresh_all = move || {
        invoices.reload();
        payments.reload();
        set_detail_version.update(|v| *v += 1);
    };

    let record_payment = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(invoice) = detail.get_untracked() else { return };
        let draft = PaymentDraft {
            amount: parse_amount(&pay_amount.get_untracked()),
            method: pay_method.get_untracked(),
            reference: optional_text(&pay_reference.get_untracked()),
        };
        if let Some(problem) = payment_problem(draft.amount, invoice.amount_due()) {
            notify::alert(&problem);
            return;
        }
        let id = invoice.id;
        dispatch(
            "Could not record payment",
            "Payment recorded",
            async move { api::record_payment(id, &draft).await },
            move || {
                pay_amount.set(String::new());
                pay_reference.set(String::new());
                refresh_all();
            },
        );
    };

    let send = move |id: u32, number: String| {
        confirm_then(
            &format!("Email invoice {} to the customer?", number),
            "Could not send invoice",
            "Invoice sent",
            || api::send_invoice(id),
            refresh_all,
        );
    };
    let void = move |id: u32, number: String| {
        confirm_then(
            &format!("Void invoice {}? It will no longer be collectable.", number),
            "Could not void invoice",
            "Invoice voided",
            || api::void_invoice(id),
            refresh_all,
        );
    };
    let delete = move |id: u32| {
        dispatch("Could not delete invoice", "Invoice deleted", api::remove::<Invoice>(id), move || invoices.reload());
    };

    view! {
        <section class="page invoices-page">
            <PageHeader title="Invoices" count=Signal::derive(move || visible.with(|v| v.len()))>
                <span class="header-stat">"Receivable: " {move || format_money(receivable.get())}</span>
                <button class="btn primary" on:click=move |_| open_form(None)>"+ New invoice"</button>
            </PageHeader>

            <div class="toolbar">
                <SearchBar value=search placeholder="Search number, customer" />
                <FilterSelect label="Status" value=status options=Signal::stored(InvoiceStatus::options()) />
            </div>

            <ListBody phase=phase noun="invoices">
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader label="Number" key="number" sort=sort />
                            <SortHeader label="Customer" key="customer" sort=sort />
                            <SortHeader label="Total" key="total" sort=sort />
                            <th class="num">"Paid"</th>
                            <SortHeader label="Due" key="due" sort=sort />
                            <SortHeader label="Due date" key="due_date" sort=sort />
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|invoice| {
                            let id = invoice.id;
                            let state = invoice.status;
                            let for_edit = invoice.clone();
                            let (n1, n2) = (invoice.number.clone(), invoice.number.clone());
                            view! {
                                <tr>
                                    <td>
                                        <button class="link mono" on:click=move |_| open_detail(id)>{invoice.number.clone()}</button>
                                    </td>
                                    <td>{invoice.customer_name.clone()}</td>
                                    <td class="num">{format_money(invoice.total())}</td>
                                    <td class="num">{format_money(invoice.amount_paid)}</td>
                                    <td class="num">{format_money(invoice.amount_due())}</td>
                                    <td>{format_date(invoice.due_date.as_deref())}</td>
                                    <td><StatusBadge label=state.label() tone=state.tone() /></td>
                                    <td class="row-actions">
                                        {state.can_edit().then(|| view! {
                                            <button class="btn small" on:click=move |_| open_form(Some(for_edit.clone()))>"Edit"</button>
                                        })}
                                        {state.can_send().then(|| view! {
                                            <button class="btn small" on:click=move |_| send(id, n1.clone())>"Send"</button>
                                        })}
                                        {state.can_void().then(|| view! {
                                            <button class="btn small danger" on:click=move |_| void(id, n2.clone())>"Void"</button>
                                        })}
                                        {state.can_delete().then(|| view! {
                                            <DeleteConfirmButton button_class="row-delete" on_confirm=move |_| delete(id) />
                                        })}
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </ListBody>

            <Modal
                title=Signal::derive(move || if form.editing.get().is_some() { "Edit invoice".to_string() } else { "New invoice".to_string() })
                open=form_open
                wide=true
            >
                <form class="record-form" on:submit=on_submit>
                    <SelectField label="Customer" value=form.customer_id options=choices blank="Choose customer" />
                    <TextField label="Due date" value=form.date kind="date" />
                    <LineItemEditor items=form.items discount=form.discount tax_percent=form.tax_percent />
                    <FormActions on_cancel=Callback::new(move |_| form_open.set(false)) />
                </form>
            </Modal>

            <Modal
                title=Signal::derive(move || detail.with(|i| i.as_ref().map(|i| format!("Invoice {}", i.number)).unwrap_or_else(|| "Invoice".to_string())))
                open=detail_open
                wide=true
            >
                {move || detail.get().map(|invoice| {
                    let accepts_payment = invoice.status.accepts_payment();
                    view! {
                        <div class="document-detail">
                            <p>
                                <strong>{invoice.customer_name.clone()}</strong>
                                " · due " {format_date(invoice.due_date.as_deref())} " · "
                                <StatusBadge label=invoice.status.label() tone=invoice.status.tone() />
                            </p>
                            <LineItemTable items=invoice.line_items.clone() />
                            <TotalsSummary totals=Signal::stored(invoice.totals()) />
                            <dl class="totals-summary balance">
                                <dt>"Paid"</dt>
                                <dd>{format_money(invoice.amount_paid)}</dd>
                                <dt class="grand">"Amount due"</dt>
                                <dd class="grand">{format_money(invoice.amount_due())}</dd>
                            </dl>
                            <Show when=move || accepts_payment>
                                <form class="inline-form" on:submit=record_payment>
                                    <NumberField label="Payment ($)" value=pay_amount />
                                    <SelectField
                                        label="Method"
                                        value=pay_method
                                        options=Signal::stored(PAYMENT_METHODS.iter().map(|(v, l)| (v.to_string(), l.to_string())).collect::<Vec<_>>())
                                    />
                                    <TextField label="Reference" value=pay_reference placeholder="Check #" />
                                    <button type="submit" class="btn primary">"Record payment"</button>
                                </form>
                            </Show>
                        </div>
                    }
                })}
                <h3>"Payments"</h3>
                {move || if payments.is_empty() {
                    view! { <EmptyState message="No payments recorded." /> }.into_any()
                } else {
                    view! {
                        <table class="data-table compact">
                            <thead>
                                <tr><th>"Date"</th><th>"Method"</th><th>"Reference"</th><th class="num">"Amount"</th></tr>
                            </thead>
                            <tbody>
                                {payments.get().into_iter().map(|payment| view! {
                                    <tr>
                                        <td>{format_date(payment.paid_at.as_deref())}</td>
                                        <td>{payment.method.clone()}</td>
                                        <td>{payment.reference.clone().unwrap_or_default()}</td>
                                        <td class="num">{format_money(payment.amount)}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_any()
                }}
            </Modal>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_problem() {
        assert_eq!(payment_problem(0.0, 100.0), Some("Enter a payment amount.".to_string()));
        assert_eq!(payment_problem(100.0, 100.0), None);
        assert_eq!(payment_problem(100.004, 100.0), None);
        assert!(payment_problem(150.0, 100.0).unwrap().contains("$100.00"));
    }
}
