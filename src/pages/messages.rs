//! Messages Page
//!
//! Internal inbox and sent folders. Bodies are Markdown, rendered
//! through the sanitizing renderer. Opening an unread message marks it
//! read on the server.

use leptos::prelude::*;

use crate::api;
use crate::components::{
    list_phase, FilterSelect, FormActions, ListBody, Modal, PageHeader, SearchBar, SortHeader, TextArea, TextField,
};
use crate::listing::{self, format_date, ListQuery, SortSpec};
use crate::markdown::{parse_markdown, preview};
use crate::models::{Message, MessageDraft};
use crate::notify;
use crate::resource::{dispatch, use_collection_with};
use crate::store::{store_set_unread, use_app_store};

const PREVIEW_CHARS: usize = 80;
const FOLDERS: [(&str, &str); 2] = [("inbox", "Inbox"), ("sent", "Sent")];

fn read_options() -> Vec<(String, String)> {
    vec![
        ("unread".to_string(), "Unread".to_string()),
        ("read".to_string(), "Read".to_string()),
    ]
}

pub fn unread_count(messages: &[Message]) -> usize {
    messages.iter().filter(|m| !m.read).count()
}

#[component]
pub fn MessagesPage() -> impl IntoView {
    let store = use_app_store();
    let folder = RwSignal::new("inbox");
    let messages = use_collection_with("messages", move || {
        let folder = folder.get();
        async move { api::list_messages(folder).await }
    });

    let search = RwSignal::new(String::new());
    let read_filter = RwSignal::new(String::new());
    let sort = RwSignal::new(Some(SortSpec::desc("sent_at")));

    let visible = Memo::new(move |_| {
        let query = ListQuery::new(search.get()).filter("read", read_filter.get()).sorted(sort.get());
        messages.items.with(|items| listing::apply(items, &query))
    });
    let phase = Signal::derive(move || {
        list_phase(messages.loading.get(), messages.items.with(|m| m.len()), visible.with(|v| v.len()))
    });

    // Sidebar badge follows the inbox
    Effect::new(move |_| {
        if folder.get() == "inbox" && !messages.loading.get() {
            let unread = messages.items.with(|m| unread_count(m));
            store_set_unread(&store, unread);
        }
    });

    // Reading
    let reading = RwSignal::new(None::<Message>);
    let reader_open = RwSignal::new(false);
    let open_message = move |message: Message| {
        let needs_mark = !message.read && folder.get_untracked() == "inbox";
        let id = message.id;
        reading.set(Some(message));
        reader_open.set(true);
        if needs_mark {
            dispatch("Could not mark message read", "", api::mark_message_read(id, true), move || messages.reload());
        }
    };
    let mark_unread = move |id: u32| {
        dispatch("Could not mark message unread", "", api::mark_message_read(id, false), move || {
            reader_open.set(false);
            messages.reload();
        });
    };

    // Compose
    let compose_open = RwSignal::new(false);
    let recipient = RwSignal::new(String::new());
    let subject = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());
    let open_compose = move |reply_to: Option<Message>| {
        match reply_to {
            Some(m) => {
                recipient.set(m.sender.clone());
                subject.set(if m.subject.starts_with("Re: ") { m.subject.clone() } else { format!("Re: {}", m.subject) });
            }
            None => {
                recipient.set(String::new());
                subject.set(String::new());
            }
        }
        body.set(String::new());
        reader_open.set(false);
        compose_open.set(true);
    };

    let on_send = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = MessageDraft {
            recipient: recipient.get_untracked().trim().to_string(),
            subject: subject.get_untracked().trim().to_string(),
            body: body.get_untracked(),
        };
        if draft.recipient.is_empty() || draft.subject.is_empty() {
            notify::alert("Recipient and subject are required.");
            return;
        }
        dispatch(
            "Could not send message",
            "Message sent",
            async move { api::create::<Message, _>(&draft).await },
            move || {
                compose_open.set(false);
                messages.reload();
            },
        );
    };

    view! {
        <section class="page messages-page">
            <PageHeader title="Messages" count=Signal::derive(move || visible.with(|v| v.len()))>
                <button class="btn primary" on:click=move |_| open_compose(None)>"+ Compose"</button>
            </PageHeader>

            <div class="tabs">
                {FOLDERS.into_iter().map(|(key, label)| {
                    view! {
                        <button
                            class="tab"
                            class:active=move || folder.get() == key
                            on:click=move |_| folder.set(key)
                        >
                            {label}
                        </button>
                    }
                }).collect_view()}
            </div>

            <div class="toolbar">
                <SearchBar value=search placeholder="Search subject, sender, body" />
                <FilterSelect label="Read" value=read_filter options=Signal::stored(read_options()) />
            </div>

            <ListBody phase=phase noun="messages">
                <table class="data-table messages">
                    <thead>
                        <tr>
                            <SortHeader label="From" key="sender" sort=sort />
                            <th>"To"</th>
                            <SortHeader label="Subject" key="subject" sort=sort />
                            <SortHeader label="Sent" key="sent_at" sort=sort />
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|message| {
                            let unread = !message.read;
                            let snippet = preview(&message.body, PREVIEW_CHARS);
                            let opened = message.clone();
                            view! {
                                <tr class="clickable" class:unread=unread on:click=move |_| open_message(opened.clone())>
                                    <td>{message.sender.clone()}</td>
                                    <td>{message.recipient.clone()}</td>
                                    <td>
                                        <div class="subject">{message.subject.clone()}</div>
                                        <div class="snippet muted">{snippet}</div>
                                    </td>
                                    <td>{format_date(message.sent_at.as_deref())}</td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </ListBody>

            <Modal
                title=Signal::derive(move || reading.with(|m| m.as_ref().map(|m| m.subject.clone()).unwrap_or_default()))
                open=reader_open
                wide=true
            >
                {move || reading.get().map(|message| {
                    let html = parse_markdown(&message.body);
                    let id = message.id;
                    let inbox = folder.get_untracked() == "inbox";
                    let reply = message.clone();
                    view! {
                        <div class="message-meta muted">
                            "From " {message.sender.clone()} " to " {message.recipient.clone()}
                            " · " {format_date(message.sent_at.as_deref())}
                        </div>
                        <div class="message-body markdown" inner_html=html></div>
                        <div class="form-actions">
                            <Show when=move || inbox>
                                <button class="btn" on:click=move |_| mark_unread(id)>"Mark unread"</button>
                            </Show>
                            <button class="btn primary" on:click=move |_| open_compose(Some(reply.clone()))>"Reply"</button>
                        </div>
                    }
                })}
            </Modal>

            <Modal title=Signal::derive(|| "New message".to_string()) open=compose_open wide=true>
                <form class="record-form" on:submit=on_send>
                    <TextField label="To" value=recipient kind="email" required=true />
                    <TextField label="Subject" value=subject required=true />
                    <TextArea label="Message (Markdown)" value=body rows=10 />
                    <div class="markdown-preview">
                        <div class="label muted">"Preview"</div>
                        <div class="markdown" inner_html=move || parse_markdown(&body.get())></div>
                    </div>
                    <FormActions submit_label="Send" on_cancel=Callback::new(move |_| compose_open.set(false)) />
                </form>
            </Modal>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unread_count() {
        let messages = vec![
            Message { id: 1, read: false, ..Default::default() },
            Message { id: 2, read: true, ..Default::default() },
            Message { id: 3, read: false, ..Default::default() },
        ];
        assert_eq!(unread_count(&messages), 2);
        assert_eq!(unread_count(&[]), 0);
    }
}
