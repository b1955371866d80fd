//! Form Field Components
//!
//! Labelled inputs bound to string signals. Numbers stay strings until
//! submit, where `totals::parse_amount` reads them.

use leptos::prelude::*;

#[component]
pub fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input
                type=kind
                placeholder=placeholder
                required=required
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

/// Numeric input; committed on change so partial input like "1." is not rewritten
#[component]
pub fn NumberField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "0.01")] step: &'static str,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input
                type="number"
                step=step
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn TextArea(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = 4)] rows: u32,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <textarea
                rows=rows
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
        </label>
    }
}

#[component]
pub fn SelectField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    /// Leading empty choice, e.g. "None"
    #[prop(optional)] blank: Option<&'static str>,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <select
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {blank.map(|text| view! {
                    <option value="" selected=move || value.with(|v| v.is_empty())>{text}</option>
                })}
                {move || options.get().into_iter().map(|(option, text)| {
                    let current = option.clone();
                    view! {
                        <option value=option selected=move || value.with(|v| *v == current)>{text}</option>
                    }
                }).collect_view()}
            </select>
        </label>
    }
}

/// Form submit/cancel row
#[component]
pub fn FormActions(
    #[prop(default = "Save")] submit_label: &'static str,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="form-actions">
            <button type="button" class="btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
            <button type="submit" class="btn primary">{submit_label}</button>
        </div>
    }
}

/// `Some(trimmed)` for a non-blank input
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parse an id picked from a `SelectField`
pub fn optional_id(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_helpers() {
        assert_eq!(optional_text("  Lot B  "), Some("Lot B".to_string()));
        assert_eq!(optional_text("   "), None);
        assert_eq!(optional_id("42"), Some(42));
        assert_eq!(optional_id(""), None);
    }
}
