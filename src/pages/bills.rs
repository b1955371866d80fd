//! Bills Page
//!
//! Vendor payables: approve or reject pending bills, pay approved ones.

use leptos::prelude::*;

use crate::api::{self, ApiError};
use crate::components::{
    list_phase, optional_id, optional_text, DeleteConfirmButton, FilterSelect, FormActions, ListBody, Modal,
    NumberField, PageHeader, SearchBar, SelectField, SortHeader, StatusBadge, TextField,
};
use crate::listing::{self, format_date, ListQuery, SortSpec};
use crate::models::{sum_by, Bill, BillDraft, BillStatus, Vendor};
use crate::resource::{confirm_then, dispatch, use_collection};
use crate::totals::{format_money, parse_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BillAction {
    Approve,
    Reject,
    Pay,
}

impl BillAction {
    fn verb(self) -> &'static str {
        match self {
            BillAction::Approve => "approve",
            BillAction::Reject => "reject",
            BillAction::Pay => "pay",
        }
    }

    fn done(self) -> &'static str {
        match self {
            BillAction::Approve => "Bill approved",
            BillAction::Reject => "Bill rejected",
            BillAction::Pay => "Bill marked paid",
        }
    }

    fn allowed(self, status: BillStatus) -> bool {
        match self {
            BillAction::Approve => status.can_approve(),
            BillAction::Reject => status.can_reject(),
            BillAction::Pay => status.can_pay(),
        }
    }

    async fn run(self, id: u32) -> Result<(), ApiError> {
        match self {
            BillAction::Approve => api::approve_bill(id).await,
            BillAction::Reject => api::reject_bill(id).await,
            BillAction::Pay => api::pay_bill(id).await,
        }
    }
}

/// Sum of bills not yet paid or rejected
fn outstanding(bills: &[Bill]) -> f64 {
    sum_by(bills, |b| match b.status {
        BillStatus::Pending | BillStatus::Approved => b.amount,
        _ => 0.0,
    })
}

#[derive(Clone, Copy)]
struct BillForm {
    vendor_id: RwSignal<String>,
    number: RwSignal<String>,
    description: RwSignal<String>,
    amount: RwSignal<String>,
    due_date: RwSignal<String>,
}

impl BillForm {
    fn new() -> Self {
        Self {
            vendor_id: RwSignal::new(String::new()),
            number: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            amount: RwSignal::new(String::new()),
            due_date: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.vendor_id.set(String::new());
        self.number.set(String::new());
        self.description.set(String::new());
        self.amount.set(String::new());
        self.due_date.set(String::new());
    }

    fn draft(&self) -> BillDraft {
        BillDraft {
            vendor_id: optional_id(&self.vendor_id.get_untracked()),
            number: self.number.get_untracked().trim().to_string(),
            description: self.description.get_untracked().trim().to_string(),
            amount: parse_amount(&self.amount.get_untracked()),
            due_date: optional_text(&self.due_date.get_untracked()),
        }
    }
}

#[component]
pub fn BillsPage() -> impl IntoView {
    let bills = use_collection::<Bill>();
    let vendors = use_collection::<Vendor>();
    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let vendor = RwSignal::new(String::new());
    let sort = RwSignal::new(Some(SortSpec::asc("due_date")));

    let visible = Memo::new(move |_| {
        let query = ListQuery::new(search.get())
            .filter("status", status.get())
            .filter("vendor", vendor.get())
            .sorted(sort.get());
        bills.items.with(|items| listing::apply(items, &query))
    });
    let vendor_choices = Signal::derive(move || {
        vendors.items.with(|vs| vs.iter().map(|v| (v.id.to_string(), v.name.clone())).collect::<Vec<_>>())
    });
    let phase = Signal::derive(move || {
        list_phase(bills.loading.get(), bills.items.with(|i| i.len()), visible.with(|v| v.len()))
    });

    let form = BillForm::new();
    let form_open = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft();
        if draft.vendor_id.is_none() || draft.amount <= 0.0 {
            crate::notify::alert("Pick a vendor and enter an amount.");
            return;
        }
        dispatch(
            "Could not record bill",
            "Bill recorded",
            async move { api::create::<Bill, _>(&draft).await },
            move || {
                form_open.set(false);
                bills.reload();
            },
        );
    };

    let run_action = move |bill_id: u32, number: String, action: BillAction| {
        confirm_then(
            &format!("{} bill {}?", capitalize(action.verb()), number),
            format!("Could not {} bill", action.verb()),
            action.done(),
            || action.run(bill_id),
            move || bills.reload(),
        );
    };

    let delete = move |id: u32| {
        dispatch("Could not delete bill", "Bill deleted", api::remove::<Bill>(id), move || bills.reload());
    };

    view! {
        <section class="page bills-page">
            <PageHeader title="Bills" count=Signal::derive(move || visible.with(|v| v.len()))>
                <span class="header-stat">
                    "Outstanding: " {move || format_money(bills.items.with(|b| outstanding(b)))}
                </span>
                <button class="btn primary" on:click=move |_| { form.reset(); form_open.set(true); }>"+ Record bill"</button>
            </PageHeader>

            <div class="toolbar">
                <SearchBar value=search placeholder="Search number, vendor, description" />
                <FilterSelect label="Vendor" value=vendor options=vendor_choices />
                <FilterSelect label="Status" value=status options=Signal::stored(BillStatus::options()) />
            </div>

            <ListBody phase=phase noun="bills">
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader label="Number" key="number" sort=sort />
                            <SortHeader label="Vendor" key="vendor" sort=sort />
                            <th>"Description"</th>
                            <SortHeader label="Amount" key="amount" sort=sort />
                            <SortHeader label="Due" key="due_date" sort=sort />
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|bill| {
                            let id = bill.id;
                            let state = bill.status;
                            let number = bill.number.clone();
                            view! {
                                <tr>
                                    <td class="mono">{bill.number.clone()}</td>
                                    <td>{bill.vendor_name.clone()}</td>
                                    <td>{bill.description.clone()}</td>
                                    <td class="num">{format_money(bill.amount)}</td>
                                    <td>{format_date(bill.due_date.as_deref())}</td>
                                    <td><StatusBadge label=state.label() tone=state.tone() /></td>
                                    <td class="row-actions">
                                        {[BillAction::Approve, BillAction::Reject, BillAction::Pay]
                                            .into_iter()
                                            .filter(|a| a.allowed(state))
                                            .map(|action| {
                                                let number = number.clone();
                                                view! {
                                                    <button class="btn small" on:click=move |_| run_action(id, number.clone(), action)>
                                                        {capitalize(action.verb())}
                                                    </button>
                                                }
                                            })
                                            .collect_view()}
                                        {(state == BillStatus::Pending).then(|| view! {
                                            <DeleteConfirmButton button_class="row-delete" on_confirm=move |_| delete(id) />
                                        })}
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </ListBody>

            <Modal title=Signal::derive(|| "Record bill".to_string()) open=form_open>
                <form class="record-form" on:submit=on_submit>
                    <SelectField label="Vendor" value=form.vendor_id options=vendor_choices blank="Choose vendor" />
                    <TextField label="Bill number" value=form.number />
                    <TextField label="Description" value=form.description />
                    <NumberField label="Amount ($)" value=form.amount />
                    <TextField label="Due date" value=form.due_date kind="date" />
                    <FormActions on_cancel=Callback::new(move |_| form_open.set(false)) />
                </form>
            </Modal>
        </section>
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill(amount: f64, status: BillStatus) -> Bill {
        Bill { amount, status, ..Default::default() }
    }

    #[test]
    fn test_outstanding_excludes_paid_and_rejected() {
        let bills = vec![
            bill(100.0, BillStatus::Pending),
            bill(250.0, BillStatus::Approved),
            bill(75.0, BillStatus::Paid),
            bill(40.0, BillStatus::Rejected),
        ];
        assert_eq!(outstanding(&bills), 350.0);
    }

    #[test]
    fn test_actions_follow_status() {
        let pending: Vec<_> = [BillAction::Approve, BillAction::Reject, BillAction::Pay]
            .into_iter()
            .filter(|a| a.allowed(BillStatus::Pending))
            .collect();
        assert_eq!(pending, vec![BillAction::Approve, BillAction::Reject]);
        assert!(BillAction::Pay.allowed(BillStatus::Approved));
        assert_eq!(capitalize("approve"), "Approve");
    }
}
