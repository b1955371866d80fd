//! UI Components
//!
//! Reusable Leptos components shared by the pages.

mod page_header;
mod search_bar;
mod filter_select;
mod sort_header;
mod status_badge;
mod list_state;
mod modal;
mod form_fields;
mod line_item_editor;
mod delete_confirm_button;
mod sidebar_nav;

pub use page_header::PageHeader;
pub use search_bar::SearchBar;
pub use filter_select::{plain_options, FilterSelect};
pub use sort_header::SortHeader;
pub use status_badge::StatusBadge;
pub use list_state::{list_phase, EmptyState, ListBody};
pub use modal::Modal;
pub use form_fields::{optional_id, optional_text, FormActions, NumberField, SelectField, TextArea, TextField};
pub use line_item_editor::{cleaned_items, LineItemEditor, LineItemTable, TotalsSummary};
pub use delete_confirm_button::DeleteConfirmButton;
pub use sidebar_nav::SidebarNav;
