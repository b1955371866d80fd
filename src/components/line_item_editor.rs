//! Line Item Editor Component
//!
//! Editable rows for estimate and invoice forms, with the derived
//! subtotal/discount/tax/total recomputed as the user types.

use leptos::prelude::*;

use crate::models::LineItem;
use crate::totals::{self, format_money, parse_amount, parse_rate_percent, Totals};

/// Totals for the form state: discount as an amount, tax as a percentage
pub fn form_totals(items: &[LineItem], discount: &str, tax_percent: &str) -> Totals {
    totals::compute(items, parse_amount(discount), parse_rate_percent(tax_percent))
}

/// Rows with no description and no amount are dropped on submit
pub fn cleaned_items(items: &[LineItem]) -> Vec<LineItem> {
    items
        .iter()
        .filter(|item| !item.description.trim().is_empty() || item.amount() != 0.0)
        .map(|item| LineItem { description: item.description.trim().to_string(), ..item.clone() })
        .collect()
}

fn blank_item() -> LineItem {
    LineItem { quantity: 1.0, ..Default::default() }
}

#[component]
pub fn LineItemEditor(
    items: RwSignal<Vec<LineItem>>,
    discount: RwSignal<String>,
    /// Percentage, e.g. "8.25"
    tax_percent: RwSignal<String>,
) -> impl IntoView {
    let summary = Memo::new(move |_| {
        items.with(|rows| form_totals(rows, &discount.get(), &tax_percent.get()))
    });

    let row_count = Memo::new(move |_| items.with(|rows| rows.len()));

    let edit = move |index: usize, apply: fn(&mut LineItem, String), raw: String| {
        items.update(|rows| {
            if let Some(row) = rows.get_mut(index) {
                apply(row, raw);
            }
        });
    };

    let field = move |index: usize, read: fn(&LineItem) -> String| {
        move || items.with(|rows| rows.get(index).map(read).unwrap_or_default())
    };

    view! {
        <div class="line-items">
            <table class="line-item-table">
                <thead>
                    <tr>
                        <th>"Description"</th>
                        <th class="num">"Qty"</th>
                        <th class="num">"Unit price"</th>
                        <th class="num">"Amount"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || (0..row_count.get()).map(|index| view! {
                        <tr>
                            <td>
                                <input
                                    type="text"
                                    placeholder="Service or material"
                                    prop:value=field(index, |row| row.description.clone())
                                    on:input=move |ev| edit(index, |row, v| row.description = v, event_target_value(&ev))
                                />
                            </td>
                            <td class="num">
                                <input
                                    type="number"
                                    step="0.25"
                                    prop:value=field(index, |row| row.quantity.to_string())
                                    on:change=move |ev| edit(index, |row, v| row.quantity = parse_amount(&v), event_target_value(&ev))
                                />
                            </td>
                            <td class="num">
                                <input
                                    type="number"
                                    step="0.01"
                                    prop:value=field(index, |row| row.unit_price.to_string())
                                    on:change=move |ev| edit(index, |row, v| row.unit_price = parse_amount(&v), event_target_value(&ev))
                                />
                            </td>
                            <td class="num">{move || items.with(|rows| rows.get(index).map(|row| format_money(row.amount())).unwrap_or_default())}</td>
                            <td>
                                <button
                                    type="button"
                                    class="row-remove"
                                    title="Remove line"
                                    on:click=move |_| items.update(|rows| {
                                        if index < rows.len() {
                                            rows.remove(index);
                                        }
                                    })
                                >
                                    "×"
                                </button>
                            </td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
            <button type="button" class="btn small" on:click=move |_| items.update(|rows| rows.push(blank_item()))>
                "+ Add line"
            </button>

            <div class="totals-grid">
                <label class="form-field inline">
                    <span class="form-label">"Discount ($)"</span>
                    <input
                        type="number"
                        step="0.01"
                        prop:value=move || discount.get()
                        on:change=move |ev| discount.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-field inline">
                    <span class="form-label">"Tax rate (%)"</span>
                    <input
                        type="number"
                        step="0.01"
                        prop:value=move || tax_percent.get()
                        on:change=move |ev| tax_percent.set(event_target_value(&ev))
                    />
                </label>
                <TotalsSummary totals=Signal::derive(move || summary.get()) />
            </div>
        </div>
    }
}

/// Read-only subtotal/discount/tax/total block
#[component]
pub fn TotalsSummary(totals: Signal<Totals>) -> impl IntoView {
    view! {
        <dl class="totals-summary">
            <dt>"Subtotal"</dt>
            <dd>{move || format_money(totals.get().subtotal)}</dd>
            <dt>"Discount"</dt>
            <dd>{move || format!("−{}", format_money(totals.get().discount))}</dd>
            <dt>"Tax"</dt>
            <dd>{move || format_money(totals.get().tax)}</dd>
            <dt class="grand">"Total"</dt>
            <dd class="grand">{move || format_money(totals.get().total)}</dd>
        </dl>
    }
}

/// Read-only line items for detail panels
#[component]
pub fn LineItemTable(items: Vec<LineItem>) -> impl IntoView {
    view! {
        <table class="line-item-table readonly">
            <thead>
                <tr>
                    <th>"Description"</th>
                    <th class="num">"Qty"</th>
                    <th class="num">"Unit price"</th>
                    <th class="num">"Amount"</th>
                </tr>
            </thead>
            <tbody>
                {items.into_iter().map(|item| view! {
                    <tr>
                        <td>{item.description.clone()}</td>
                        <td class="num">{format!("{} {}", item.quantity, item.unit.clone().unwrap_or_default()).trim_end().to_string()}</td>
                        <td class="num">{format_money(item.unit_price)}</td>
                        <td class="num">{format_money(item.amount())}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(description: &str, quantity: f64, unit_price: f64) -> LineItem {
        LineItem { description: description.into(), quantity, unit_price, unit: None }
    }

    #[test]
    fn test_form_totals_reads_percent_inputs() {
        let items = vec![item("Plow visit", 4.0, 125.0), item("Salt (ton)", 2.0, 90.0)];
        let totals = form_totals(&items, "80", "10");
        assert_eq!(totals.subtotal, 680.0);
        assert!((totals.total - 660.0).abs() < 1e-9);
    }

    #[test]
    fn test_cleaned_items_drops_blank_rows() {
        let items = vec![item("  Walkway shoveling ", 1.0, 45.0), item("", 1.0, 0.0), item("", 2.0, 10.0)];
        let cleaned = cleaned_items(&items);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].description, "Walkway shoveling");
    }
}
