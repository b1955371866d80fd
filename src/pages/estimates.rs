//! Estimates Page
//!
//! Quotes built from line items. Lifecycle: draft → sent → signed →
//! approved → converted into an invoice, or declined.

use leptos::prelude::*;

use super::billing_form::{customer_choices, BillingForm};
use crate::api;
use crate::components::{
    list_phase, DeleteConfirmButton, FilterSelect, FormActions, LineItemEditor, ListBody, Modal, PageHeader,
    LineItemTable, SearchBar, SelectField, SortHeader, StatusBadge, TextField, TotalsSummary,
};
use crate::listing::{self, format_date, ListQuery, SortSpec};
use crate::models::{Customer, Estimate, EstimateDraft, EstimateStatus};
use crate::notify;
use crate::resource::{confirm_then, dispatch, use_collection};
use crate::totals::format_money;

#[component]
pub fn EstimatesPage() -> impl IntoView {
    let estimates = use_collection::<Estimate>();
    let customers = use_collection::<Customer>();
    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let sort = RwSignal::new(Some(SortSpec::desc("created_at")));

    let visible = Memo::new(move |_| {
        let query = ListQuery::new(search.get()).filter("status", status.get()).sorted(sort.get());
        estimates.items.with(|items| listing::apply(items, &query))
    });
    let choices = Signal::derive(move || customers.items.with(|c| customer_choices(c)));
    let phase = Signal::derive(move || {
        list_phase(estimates.loading.get(), estimates.items.with(|i| i.len()), visible.with(|v| v.len()))
    });
    let reload = move || estimates.reload();

    // Create / edit
    let form = BillingForm::new();
    let form_open = RwSignal::new(false);
    let open_form = move |estimate: Option<Estimate>| {
        match estimate {
            Some(e) => form.fill(
                Some(e.id),
                e.customer_id,
                &e.line_items,
                e.discount,
                e.tax_rate,
                e.valid_until.as_deref(),
                e.site_name.as_deref(),
            ),
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
        let draft = EstimateDraft {
            customer_id: values.customer_id,
            customer_name: values.customer_name,
            site_name: values.site_name,
            line_items: values.line_items,
            discount: values.discount,
            tax_rate: values.tax_rate,
            valid_until: values.date,
        };
        let after = move || {
            form_open.set(false);
            estimates.reload();
        };
        match form.editing.get_untracked() {
            Some(id) => dispatch(
                "Could not save estimate",
                "Estimate saved",
                async move { api::update::<Estimate, _>(id, &draft).await },
                after,
            ),
            None => dispatch(
                "Could not create estimate",
                "Estimate created",
                async move { api::create::<Estimate, _>(&draft).await },
                after,
            ),
        }
    };

    // Detail
    let viewing = RwSignal::new(None::<Estimate>);
    let detail_open = RwSignal::new(false);

    // Lifecycle actions
    let send = move |id: u32, number: String| {
        confirm_then(
            &format!("Email estimate {} to the customer?", number),
            "Could not send estimate",
            "Estimate sent",
            || api::send_estimate(id),
            reload,
        );
    };
    let sign = move |id: u32| {
        let Some(signer) = notify::prompt("Name of the person signing:", "") else { return };
        dispatch(
            "Could not record signature",
            "Signature recorded",
            async move { api::sign_estimate(id, &signer).await },
            reload,
        );
    };
    let approve = move |id: u32, number: String| {
        confirm_then(
            &format!("Approve estimate {}?", number),
            "Could not approve estimate",
            "Estimate approved",
            || api::approve_estimate(id),
            reload,
        );
    };
    let decline = move |id: u32, number: String| {
        confirm_then(
            &format!("Mark estimate {} as declined?", number),
            "Could not decline estimate",
            "Estimate declined",
            || api::decline_estimate(id),
            reload,
        );
    };
    let convert = move |id: u32, number: String| {
        confirm_then(
            &format!("Create an invoice from estimate {}?", number),
            "Could not convert estimate",
            "Invoice created from estimate",
            || api::convert_estimate(id),
            reload,
        );
    };
    let delete = move |id: u32| {
        dispatch("Could not delete estimate", "Estimate deleted", api::remove::<Estimate>(id), reload);
    };

    view! {
        <section class="page estimates-page">
            <PageHeader title="Estimates" count=Signal::derive(move || visible.with(|v| v.len()))>
                <button class="btn primary" on:click=move |_| open_form(None)>"+ New estimate"</button>
            </PageHeader>

            <div class="toolbar">
                <SearchBar value=search placeholder="Search number, customer, site" />
                <FilterSelect label="Status" value=status options=Signal::stored(EstimateStatus::options()) />
            </div>

            <ListBody phase=phase noun="estimates">
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader label="Number" key="number" sort=sort />
                            <SortHeader label="Customer" key="customer" sort=sort />
                            <SortHeader label="Total" key="total" sort=sort />
                            <SortHeader label="Created" key="created_at" sort=sort />
                            <th>"Valid until"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|estimate| {
                            let id = estimate.id;
                            let state = estimate.status;
                            let number = estimate.number.clone();
                            let for_view = estimate.clone();
                            let for_edit = estimate.clone();
                            let (n1, n2, n3, n4) = (number.clone(), number.clone(), number.clone(), number.clone());
                            view! {
                                <tr>
                                    <td>
                                        <button class="link mono" on:click=move |_| { viewing.set(Some(for_view.clone())); detail_open.set(true); }>
                                            {number}
                                        </button>
                                    </td>
                                    <td>
                                        <div>{estimate.customer_name.clone()}</div>
                                        <div class="muted">{estimate.site_name.clone().unwrap_or_default()}</div>
                                    </td>
                                    <td class="num">{format_money(estimate.totals().total)}</td>
                                    <td>{format_date(estimate.created_at.as_deref())}</td>
                                    <td>{format_date(estimate.valid_until.as_deref())}</td>
                                    <td><StatusBadge label=state.label() tone=state.tone() /></td>
                                    <td class="row-actions">
                                        {state.can_edit().then(|| view! {
                                            <button class="btn small" on:click=move |_| open_form(Some(for_edit.clone()))>"Edit"</button>
                                        })}
                                        {state.can_send().then(|| view! {
                                            <button class="btn small" on:click=move |_| send(id, n1.clone())>"Send"</button>
                                        })}
                                        {state.can_sign().then(|| view! {
                                            <button class="btn small" on:click=move |_| sign(id)>"Sign"</button>
                                        })}
                                        {state.can_decline().then(|| view! {
                                            <button class="btn small" on:click=move |_| decline(id, n2.clone())>"Decline"</button>
                                        })}
                                        {state.can_approve().then(|| view! {
                                            <button class="btn small" on:click=move |_| approve(id, n3.clone())>"Approve"</button>
                                        })}
                                        {state.can_convert().then(|| view! {
                                            <button class="btn small primary" on:click=move |_| convert(id, n4.clone())>"Convert to invoice"</button>
                                        })}
                                        {state.can_edit().then(|| view! {
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
                title=Signal::derive(move || if form.editing.get().is_some() { "Edit estimate".to_string() } else { "New estimate".to_string() })
                open=form_open
                wide=true
            >
                <form class="record-form" on:submit=on_submit>
                    <SelectField label="Customer" value=form.customer_id options=choices blank="Choose customer" />
                    <TextField label="Site" value=form.site_name />
                    <TextField label="Valid until" value=form.date kind="date" />
                    <LineItemEditor items=form.items discount=form.discount tax_percent=form.tax_percent />
                    <FormActions on_cancel=Callback::new(move |_| form_open.set(false)) />
                </form>
            </Modal>

            <Modal
                title=Signal::derive(move || viewing.with(|e| e.as_ref().map(|e| format!("Estimate {}", e.number)).unwrap_or_default()))
                open=detail_open
                wide=true
            >
                {move || viewing.get().map(|estimate| view! {
                    <div class="document-detail">
                        <p>
                            <strong>{estimate.customer_name.clone()}</strong>
                            " · "
                            <StatusBadge label=estimate.status.label() tone=estimate.status.tone() />
                        </p>
                        {estimate.signed_by.clone().map(|who| view! { <p class="muted">"Signed by " {who}</p> })}
                        <LineItemTable items=estimate.line_items.clone() />
                        <TotalsSummary totals=Signal::stored(estimate.totals()) />
                    </div>
                })}
            </Modal>
        </section>
    }
}
