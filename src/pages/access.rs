//! Access Page
//!
//! Who can sign in and with what role. Disabling a user keeps their
//! history; invites email a sign-up link.

use leptos::prelude::*;

use crate::api;
use crate::components::{
    list_phase, FilterSelect, FormActions, ListBody, Modal, PageHeader, SearchBar, SelectField, SortHeader,
    StatusBadge, TextField,
};
use crate::listing::{self, format_date, ListQuery, SortSpec};
use crate::models::{Role, Tone, User, UserInvite};
use crate::notify;
use crate::resource::{confirm_then, dispatch, use_collection};

fn active_options() -> Vec<(String, String)> {
    vec![
        ("active".to_string(), "Active".to_string()),
        ("disabled".to_string(), "Disabled".to_string()),
    ]
}

/// Minimal shape check before the server validates it properly
pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[component]
pub fn AccessPage() -> impl IntoView {
    let users = use_collection::<User>();
    let search = RwSignal::new(String::new());
    let role = RwSignal::new(String::new());
    let active = RwSignal::new(String::new());
    let sort = RwSignal::new(Some(SortSpec::asc("name")));

    let visible = Memo::new(move |_| {
        let query = ListQuery::new(search.get())
            .filter("role", role.get())
            .filter("active", active.get())
            .sorted(sort.get());
        users.items.with(|items| listing::apply(items, &query))
    });
    let phase = Signal::derive(move || {
        list_phase(users.loading.get(), users.items.with(|u| u.len()), visible.with(|v| v.len()))
    });

    let change_role = move |id: u32, name: String, value: String| {
        let new_role = Role::parse(&value);
        if new_role == Role::Unknown {
            return;
        }
        if notify::confirm(&format!("Make {} a {}?", name, new_role.label())) {
            dispatch("Could not change role", "Role updated", api::set_user_role(id, new_role), move || users.reload());
        } else {
            // Put the select back on the saved role
            users.reload();
        }
    };
    let toggle_active = move |id: u32, name: String, now_active: bool| {
        let (question, failure, success) = if now_active {
            (format!("Disable {}? They will no longer be able to sign in.", name), "Could not disable user", "User disabled")
        } else {
            (format!("Re-enable {}?", name), "Could not enable user", "User enabled")
        };
        confirm_then(&question, failure, success, || api::set_user_active(id, !now_active), move || users.reload());
    };

    // Invite
    let invite_open = RwSignal::new(false);
    let invite_name = RwSignal::new(String::new());
    let invite_email = RwSignal::new(String::new());
    let invite_role = RwSignal::new(Role::Crew.as_str().to_string());
    let open_invite = move || {
        invite_name.set(String::new());
        invite_email.set(String::new());
        invite_role.set(Role::Crew.as_str().to_string());
        invite_open.set(true);
    };
    let on_invite = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let invite = UserInvite {
            name: invite_name.get_untracked().trim().to_string(),
            email: invite_email.get_untracked().trim().to_string(),
            role: Role::parse(&invite_role.get_untracked()),
        };
        if invite.name.is_empty() || !looks_like_email(&invite.email) {
            notify::alert("Enter a name and a valid email address.");
            return;
        }
        let sent_to = invite.email.clone();
        dispatch(
            "Could not send invite",
            format!("Invite sent to {}", sent_to),
            async move { api::invite_user(&invite).await },
            move || {
                invite_open.set(false);
                users.reload();
            },
        );
    };

    view! {
        <section class="page access-page">
            <PageHeader title="Access" count=Signal::derive(move || visible.with(|v| v.len()))>
                <button class="btn primary" on:click=move |_| open_invite()>"+ Invite user"</button>
            </PageHeader>

            <div class="toolbar">
                <SearchBar value=search placeholder="Search name, email" />
                <FilterSelect label="Role" value=role options=Signal::stored(Role::options()) />
                <FilterSelect label="State" value=active options=Signal::stored(active_options()) />
            </div>

            <ListBody phase=phase noun="users">
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader label="Name" key="name" sort=sort />
                            <SortHeader label="Email" key="email" sort=sort />
                            <SortHeader label="Role" key="role" sort=sort />
                            <SortHeader label="Last login" key="last_login" sort=sort />
                            <th>"State"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|user| {
                            let id = user.id;
                            let is_active = user.active;
                            let current = user.role.as_str();
                            let (n1, n2) = (user.name.clone(), user.name.clone());
                            view! {
                                <tr class:muted=!is_active>
                                    <td>{user.name.clone()}</td>
                                    <td>{user.email.clone()}</td>
                                    <td>
                                        <select
                                            class="inline-select"
                                            on:change=move |ev| change_role(id, n1.clone(), event_target_value(&ev))
                                        >
                                            {Role::options().into_iter().map(|(value, label)| {
                                                let selected = value == current;
                                                view! { <option value=value selected=selected>{label}</option> }
                                            }).collect_view()}
                                        </select>
                                    </td>
                                    <td>{format_date(user.last_login.as_deref())}</td>
                                    <td>
                                        <StatusBadge
                                            label=if is_active { "Active" } else { "Disabled" }
                                            tone=if is_active { Tone::Success } else { Tone::Neutral }
                                        />
                                    </td>
                                    <td class="row-actions">
                                        <button
                                            class="btn small"
                                            class:danger=is_active
                                            on:click=move |_| toggle_active(id, n2.clone(), is_active)
                                        >
                                            {if is_active { "Disable" } else { "Enable" }}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </ListBody>

            <Modal title=Signal::derive(|| "Invite user".to_string()) open=invite_open>
                <form class="record-form" on:submit=on_invite>
                    <TextField label="Name" value=invite_name required=true />
                    <TextField label="Email" value=invite_email kind="email" required=true />
                    <SelectField label="Role" value=invite_role options=Signal::stored(Role::options()) />
                    <FormActions submit_label="Send invite" on_cancel=Callback::new(move |_| invite_open.set(false)) />
                </form>
            </Modal>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_email() {
        assert!(looks_like_email("dispatch@northplow.com"));
        assert!(looks_like_email("  ana@crew.co "));
        assert!(!looks_like_email("ana"));
        assert!(!looks_like_email("@northplow.com"));
        assert!(!looks_like_email("ana@localhost"));
        assert!(!looks_like_email("ana@northplow."));
    }
}
