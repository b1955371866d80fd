//! Contracts Page
//!
//! Seasonal service agreements through draft → sent → signed → active,
//! ending terminated or expired.

use leptos::prelude::*;

use crate::api;
use crate::components::{
    list_phase, optional_id, optional_text, DeleteConfirmButton, FilterSelect, FormActions, ListBody, Modal,
    NumberField, PageHeader, SearchBar, SelectField, SortHeader, StatusBadge, TextField,
};
use crate::listing::{self, format_date, ListQuery, SortSpec};
use crate::models::{Contract, ContractDraft, ContractStatus, Customer};
use crate::notify;
use crate::resource::{confirm_then, dispatch, use_collection};
use crate::totals::{format_money, parse_amount};

#[derive(Clone, Copy)]
struct ContractForm {
    editing: RwSignal<Option<u32>>,
    title: RwSignal<String>,
    customer_id: RwSignal<String>,
    value: RwSignal<String>,
    start_date: RwSignal<String>,
    end_date: RwSignal<String>,
}

impl ContractForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            title: RwSignal::new(String::new()),
            customer_id: RwSignal::new(String::new()),
            value: RwSignal::new(String::new()),
            start_date: RwSignal::new(String::new()),
            end_date: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, contract: Option<&Contract>) {
        let blank = Contract::default();
        let c = contract.unwrap_or(&blank);
        self.editing.set(contract.map(|c| c.id));
        self.title.set(c.title.clone());
        self.customer_id.set(c.customer_id.map(|id| id.to_string()).unwrap_or_default());
        self.value.set(if contract.is_some() { c.value.to_string() } else { String::new() });
        self.start_date.set(c.start_date.clone().unwrap_or_default());
        self.end_date.set(c.end_date.clone().unwrap_or_default());
    }

    fn draft(&self, customers: &[Customer]) -> ContractDraft {
        let customer_id = optional_id(&self.customer_id.get_untracked());
        let customer_name = customer_id
            .and_then(|id| customers.iter().find(|c| c.id == id))
            .map(|c| c.name.clone())
            .unwrap_or_default();
        ContractDraft {
            title: self.title.get_untracked().trim().to_string(),
            customer_id,
            customer_name,
            value: parse_amount(&self.value.get_untracked()),
            start_date: optional_text(&self.start_date.get_untracked()),
            end_date: optional_text(&self.end_date.get_untracked()),
        }
    }
}

#[component]
pub fn ContractsPage() -> impl IntoView {
    let contracts = use_collection::<Contract>();
    let customers = use_collection::<Customer>();
    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let sort = RwSignal::new(Some(SortSpec::desc("start_date")));

    let visible = Memo::new(move |_| {
        let query = ListQuery::new(search.get()).filter("status", status.get()).sorted(sort.get());
        contracts.items.with(|items| listing::apply(items, &query))
    });
    let customer_choices = Signal::derive(move || {
        customers.items.with(|cs| cs.iter().map(|c| (c.id.to_string(), c.name.clone())).collect::<Vec<_>>())
    });
    let phase = Signal::derive(move || {
        list_phase(contracts.loading.get(), contracts.items.with(|i| i.len()), visible.with(|v| v.len()))
    });

    let form = ContractForm::new();
    let form_open = RwSignal::new(false);
    let open_form = move |contract: Option<Contract>| {
        form.fill(contract.as_ref());
        form_open.set(true);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = customers.items.with_untracked(|cs| form.draft(cs));
        if draft.title.is_empty() || draft.customer_id.is_none() {
            notify::alert("A contract needs a title and a customer.");
            return;
        }
        let after = move || {
            form_open.set(false);
            contracts.reload();
        };
        match form.editing.get_untracked() {
            Some(id) => dispatch(
                "Could not update contract",
                "Contract updated",
                async move { api::update::<Contract, _>(id, &draft).await },
                after,
            ),
            None => dispatch(
                "Could not create contract",
                "Contract created",
                async move { api::create::<Contract, _>(&draft).await },
                after,
            ),
        }
    };

    let reload = move || contracts.reload();

    let send = move |id: u32, title: String| {
        confirm_then(
            &format!("Send \"{}\" to the customer for signature?", title),
            "Could not send contract",
            "Contract sent",
            || api::send_contract(id),
            reload,
        );
    };
    let sign = move |id: u32| {
        let Some(signer) = notify::prompt("Name of the person signing:", "") else { return };
        dispatch(
            "Could not record signature",
            "Contract signed",
            async move { api::sign_contract(id, &signer).await },
            reload,
        );
    };
    let activate = move |id: u32, title: String| {
        confirm_then(
            &format!("Activate \"{}\"? Service starts under its terms.", title),
            "Could not activate contract",
            "Contract active",
            || api::activate_contract(id),
            reload,
        );
    };
    let terminate = move |id: u32, title: String| {
        let Some(reason) = notify::prompt(&format!("Reason for terminating \"{}\":", title), "") else { return };
        confirm_then(
            "Terminate this contract? This cannot be undone.",
            "Could not terminate contract",
            "Contract terminated",
            move || async move { api::terminate_contract(id, &reason).await },
            reload,
        );
    };
    let delete = move |id: u32| {
        dispatch("Could not delete contract", "Contract deleted", api::remove::<Contract>(id), reload);
    };

    view! {
        <section class="page contracts-page">
            <PageHeader title="Contracts" count=Signal::derive(move || visible.with(|v| v.len()))>
                <button class="btn primary" on:click=move |_| open_form(None)>"+ New contract"</button>
            </PageHeader>

            <div class="toolbar">
                <SearchBar value=search placeholder="Search title, customer" />
                <FilterSelect label="Status" value=status options=Signal::stored(ContractStatus::options()) />
            </div>

            <ListBody phase=phase noun="contracts">
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader label="Title" key="title" sort=sort />
                            <SortHeader label="Customer" key="customer" sort=sort />
                            <SortHeader label="Value" key="value" sort=sort />
                            <SortHeader label="Starts" key="start_date" sort=sort />
                            <SortHeader label="Ends" key="end_date" sort=sort />
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|contract| {
                            let id = contract.id;
                            let state = contract.status;
                            let row = contract.clone();
                            let (t1, t2, t3) = (contract.title.clone(), contract.title.clone(), contract.title.clone());
                            view! {
                                <tr>
                                    <td>
                                        {if state.can_delete() {
                                            view! { <button class="link" on:click=move |_| open_form(Some(row.clone()))>{contract.title.clone()}</button> }.into_any()
                                        } else {
                                            view! { <span>{contract.title.clone()}</span> }.into_any()
                                        }}
                                        {contract.signed_by.clone().map(|who| view! { <div class="muted">"Signed by " {who}</div> })}
                                    </td>
                                    <td>{contract.customer_name.clone()}</td>
                                    <td class="num">{format_money(contract.value)}</td>
                                    <td>{format_date(contract.start_date.as_deref())}</td>
                                    <td>{format_date(contract.end_date.as_deref())}</td>
                                    <td><StatusBadge label=state.label() tone=state.tone() /></td>
                                    <td class="row-actions">
                                        {state.can_send().then(|| view! {
                                            <button class="btn small" on:click=move |_| send(id, t1.clone())>"Send"</button>
                                        })}
                                        {state.can_sign().then(|| view! {
                                            <button class="btn small" on:click=move |_| sign(id)>"Record signature"</button>
                                        })}
                                        {state.can_activate().then(|| view! {
                                            <button class="btn small" on:click=move |_| activate(id, t2.clone())>"Activate"</button>
                                        })}
                                        {state.can_terminate().then(|| view! {
                                            <button class="btn small danger" on:click=move |_| terminate(id, t3.clone())>"Terminate"</button>
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
                title=Signal::derive(move || if form.editing.get().is_some() { "Edit contract".to_string() } else { "New contract".to_string() })
                open=form_open
            >
                <form class="record-form" on:submit=on_submit>
                    <TextField label="Title" value=form.title required=true />
                    <SelectField label="Customer" value=form.customer_id options=customer_choices blank="Choose customer" />
                    <NumberField label="Contract value ($)" value=form.value />
                    <TextField label="Start date" value=form.start_date kind="date" />
                    <TextField label="End date" value=form.end_date kind="date" />
                    <FormActions on_cancel=Callback::new(move |_| form_open.set(false)) />
                </form>
            </Modal>
        </section>
    }
}

