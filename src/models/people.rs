//! People: admin users, employees, customers, vendors

use serde::{Deserialize, Serialize};

use crate::api::Resource;
use crate::listing::{Listable, SortKey};
use super::{CustomerStatus, EmployeeStatus, Role};

/// Admin user with an access role
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
    pub last_login: Option<String>,
}

impl Resource for User {
    const PATH: &'static str = "users";
    const ENVELOPE: &'static str = "users";
    const SINGULAR: &'static str = "user";
    const LABEL: &'static str = "users";
}

impl Listable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "role" => Some(self.role.as_str().to_string()),
            "active" => Some(if self.active { "active" } else { "disabled" }.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> SortKey {
        match key {
            "name" => SortKey::text(&self.name),
            "email" => SortKey::text(&self.email),
            "role" => SortKey::text(self.role.label()),
            "last_login" => SortKey::date(self.last_login.as_deref()),
            _ => SortKey::Missing,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserInvite {
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// HR record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    pub title: String,
    pub department: String,
    pub email: String,
    pub phone: String,
    pub hire_date: Option<String>,
    pub status: EmployeeStatus,
}

impl Resource for Employee {
    const PATH: &'static str = "employees";
    const ENVELOPE: &'static str = "employees";
    const SINGULAR: &'static str = "employee";
    const LABEL: &'static str = "employees";
}

impl Listable for Employee {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.title.as_str(), self.email.as_str(), self.phone.as_str()]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "department" => Some(self.department.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> SortKey {
        match key {
            "name" => SortKey::text(&self.name),
            "title" => SortKey::text(&self.title),
            "department" => SortKey::text(&self.department),
            "hire_date" => SortKey::date(self.hire_date.as_deref()),
            _ => SortKey::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub title: String,
    pub department: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
    pub status: EmployeeStatus,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub id: u32,
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: CustomerStatus,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

impl Resource for Customer {
    const PATH: &'static str = "customers";
    const ENVELOPE: &'static str = "customers";
    const SINGULAR: &'static str = "customer";
    const LABEL: &'static str = "customers";
}

impl Listable for Customer {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.company.as_deref().unwrap_or(""),
            self.email.as_str(),
            self.phone.as_str(),
            self.address.as_str(),
        ]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> SortKey {
        match key {
            "name" => SortKey::text(&self.name),
            "company" => SortKey::opt_text(self.company.as_deref()),
            "created_at" => SortKey::date(self.created_at.as_deref()),
            _ => SortKey::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: CustomerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vendor {
    pub id: u32,
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub category: String,
}

impl Resource for Vendor {
    const PATH: &'static str = "vendors";
    const ENVELOPE: &'static str = "vendors";
    const SINGULAR: &'static str = "vendor";
    const LABEL: &'static str = "vendors";
}

impl Listable for Vendor {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.contact.as_str(), self.email.as_str()]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "category" => Some(self.category.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> SortKey {
        match key {
            "name" => SortKey::text(&self.name),
            "category" => SortKey::text(&self.category),
            _ => SortKey::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VendorDraft {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fields_decode_to_defaults() {
        let users: Vec<User> = crate::api::unwrap_collection(
            serde_json::json!({"users": [{"id": 1, "name": null, "email": null, "role": null, "active": null}]}),
            User::ENVELOPE,
        )
        .unwrap();
        assert_eq!(users[0].role, Role::Unknown);
        assert!(!users[0].active);

        let employees: Vec<Employee> = crate::api::unwrap_collection(
            serde_json::json!([{"id": 2, "name": "Ana", "title": null, "department": null, "email": null, "phone": null, "status": null}]),
            Employee::ENVELOPE,
        )
        .unwrap();
        assert_eq!(employees[0].department, "");

        let customers: Vec<Customer> = crate::api::unwrap_collection(
            serde_json::json!({"data": {"customers": [
                {"id": 3, "name": "North Lot", "email": null, "phone": null, "address": null, "company": null},
                {"id": 4, "name": "South Lot", "email": "s@lot.com"}
            ]}}),
            Customer::ENVELOPE,
        )
        .unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].company, None);
        assert_eq!(customers[0].email, "");

        let vendors: Vec<Vendor> = crate::api::unwrap_collection(
            serde_json::json!([{"id": 5, "name": "Salt Co", "contact": null, "email": null, "phone": null, "category": null}]),
            Vendor::ENVELOPE,
        )
        .unwrap();
        assert_eq!(vendors[0].category, "");
    }

    #[test]
    fn test_customer_decodes_sparse_payload() {
        let customer: Customer = serde_json::from_str(r#"{"id": 7, "name": "Maple HOA", "status": "active"}"#).unwrap();
        assert_eq!(customer.id, 7);
        assert_eq!(customer.status, CustomerStatus::Active);
        assert!(customer.company.is_none());
        assert_eq!(customer.search_fields().len(), 5);
    }

    #[test]
    fn test_user_filters() {
        let user = User { id: 1, name: "Ana".into(), role: Role::Crew, active: false, ..Default::default() };
        assert_eq!(user.filter_value("role").as_deref(), Some("crew"));
        assert_eq!(user.filter_value("active").as_deref(), Some("disabled"));
    }

    #[test]
    fn test_user_patch_skips_unset_fields() {
        let patch = UserPatch { active: Some(true), role: None };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"active":true}"#);
    }
}
