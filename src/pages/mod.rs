//! Pages
//!
//! One module per screen. `render_page` maps the sidebar selection to
//! the screen shown in the main area.

mod access;
mod billing_form;
mod bills;
mod contracts;
mod customers;
mod employees;
mod equipment;
mod estimates;
mod invoices;
mod messages;
mod navigation;
mod projects;
mod safety;
mod sites;
mod vendors;
mod workflows;

pub use access::AccessPage;
pub use bills::BillsPage;
pub use contracts::ContractsPage;
pub use customers::CustomersPage;
pub use employees::EmployeesPage;
pub use equipment::EquipmentPage;
pub use estimates::EstimatesPage;
pub use invoices::InvoicesPage;
pub use messages::MessagesPage;
pub use navigation::NavigationPage;
pub use projects::ProjectsPage;
pub use safety::SafetyPage;
pub use sites::SitesPage;
pub use vendors::VendorsPage;
pub use workflows::WorkflowsPage;

use leptos::prelude::*;

use crate::nav_layout::Page;

pub fn render_page(page: Page) -> AnyView {
    match page {
        Page::Customers | Page::Unknown => view! { <CustomersPage /> }.into_any(),
        Page::Sites => view! { <SitesPage /> }.into_any(),
        Page::Estimates => view! { <EstimatesPage /> }.into_any(),
        Page::Invoices => view! { <InvoicesPage /> }.into_any(),
        Page::Contracts => view! { <ContractsPage /> }.into_any(),
        Page::Projects => view! { <ProjectsPage /> }.into_any(),
        Page::Equipment => view! { <EquipmentPage /> }.into_any(),
        Page::Employees => view! { <EmployeesPage /> }.into_any(),
        Page::Safety => view! { <SafetyPage /> }.into_any(),
        Page::Messages => view! { <MessagesPage /> }.into_any(),
        Page::Workflows => view! { <WorkflowsPage /> }.into_any(),
        Page::Bills => view! { <BillsPage /> }.into_any(),
        Page::Vendors => view! { <VendorsPage /> }.into_any(),
        Page::Access => view! { <AccessPage /> }.into_any(),
        Page::Navigation => view! { <NavigationPage /> }.into_any(),
    }
}
