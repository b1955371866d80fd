//! Lifecycle Status Types
//!
//! One enum per entity. Unrecognized wire values decode to `Unknown`
//! so a new backend status never breaks a page. Which actions a record
//! allows is answered here, not by string comparisons in views.

use serde::{Deserialize, Serialize};

/// Badge color family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl Tone {
    pub fn class(self) -> &'static str {
        match self {
            Tone::Neutral => "badge neutral",
            Tone::Info => "badge info",
            Tone::Success => "badge success",
            Tone::Warning => "badge warning",
            Tone::Danger => "badge danger",
        }
    }
}

macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($wire:literal, $label:literal, $tone:ident)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
            #[default]
            #[serde(other, rename = "unknown")]
            Unknown,
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Unknown => "unknown",
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Unknown => "Unknown",
                }
            }

            pub fn tone(self) -> Tone {
                match self {
                    $($name::$variant => Tone::$tone,)+
                    $name::Unknown => Tone::Neutral,
                }
            }

            /// Dropdown options: (wire value, label)
            pub fn options() -> Vec<(String, String)> {
                Self::ALL.iter().map(|s| (s.as_str().to_string(), s.label().to_string())).collect()
            }

            pub fn parse(value: &str) -> Self {
                Self::ALL.iter().copied().find(|s| s.as_str() == value).unwrap_or($name::Unknown)
            }
        }
    };
}

status_enum!(
    /// Access level of an admin user
    Role {
        Admin => ("admin", "Admin", Danger),
        Manager => ("manager", "Manager", Warning),
        Dispatcher => ("dispatcher", "Dispatcher", Info),
        Crew => ("crew", "Crew", Success),
        Viewer => ("viewer", "Viewer", Neutral),
    }
);

status_enum!(
    EquipmentStatus {
        Available => ("available", "Available", Success),
        InUse => ("in_use", "In use", Info),
        Maintenance => ("maintenance", "Maintenance", Warning),
        Retired => ("retired", "Retired", Neutral),
    }
);

status_enum!(
    CustomerStatus {
        Lead => ("lead", "Lead", Info),
        Active => ("active", "Active", Success),
        Inactive => ("inactive", "Inactive", Neutral),
    }
);

status_enum!(
    SiteStatus {
        Active => ("active", "Active", Success),
        Inactive => ("inactive", "Inactive", Neutral),
    }
);

status_enum!(
    EstimateStatus {
        Draft => ("draft", "Draft", Neutral),
        Sent => ("sent", "Sent", Info),
        Signed => ("signed", "Signed", Warning),
        Approved => ("approved", "Approved", Success),
        Declined => ("declined", "Declined", Danger),
        Converted => ("converted", "Converted", Success),
    }
);

impl EstimateStatus {
    pub fn can_edit(self) -> bool {
        self == EstimateStatus::Draft
    }

    pub fn can_send(self) -> bool {
        matches!(self, EstimateStatus::Draft | EstimateStatus::Sent)
    }

    pub fn can_sign(self) -> bool {
        self == EstimateStatus::Sent
    }

    pub fn can_decline(self) -> bool {
        self == EstimateStatus::Sent
    }

    pub fn can_approve(self) -> bool {
        self == EstimateStatus::Signed
    }

    pub fn can_convert(self) -> bool {
        self == EstimateStatus::Approved
    }
}

status_enum!(
    InvoiceStatus {
        Draft => ("draft", "Draft", Neutral),
        Sent => ("sent", "Sent", Info),
        PartiallyPaid => ("partially_paid", "Partially paid", Warning),
        Paid => ("paid", "Paid", Success),
        Overdue => ("overdue", "Overdue", Danger),
        Void => ("void", "Void", Neutral),
    }
);

impl InvoiceStatus {
    pub fn can_edit(self) -> bool {
        self == InvoiceStatus::Draft
    }

    pub fn can_send(self) -> bool {
        matches!(self, InvoiceStatus::Draft | InvoiceStatus::Sent | InvoiceStatus::Overdue)
    }

    pub fn accepts_payment(self) -> bool {
        matches!(self, InvoiceStatus::Sent | InvoiceStatus::PartiallyPaid | InvoiceStatus::Overdue)
    }

    pub fn can_void(self) -> bool {
        !matches!(self, InvoiceStatus::Paid | InvoiceStatus::Void)
    }

    pub fn can_delete(self) -> bool {
        self == InvoiceStatus::Draft
    }
}

status_enum!(
    ContractStatus {
        Draft => ("draft", "Draft", Neutral),
        Sent => ("sent", "Sent", Info),
        Signed => ("signed", "Signed", Warning),
        Active => ("active", "Active", Success),
        Terminated => ("terminated", "Terminated", Danger),
        Expired => ("expired", "Expired", Neutral),
    }
);

impl ContractStatus {
    pub fn can_send(self) -> bool {
        self == ContractStatus::Draft
    }

    pub fn can_sign(self) -> bool {
        self == ContractStatus::Sent
    }

    pub fn can_activate(self) -> bool {
        self == ContractStatus::Signed
    }

    pub fn can_terminate(self) -> bool {
        self == ContractStatus::Active
    }

    pub fn can_delete(self) -> bool {
        matches!(self, ContractStatus::Draft | ContractStatus::Sent)
    }
}

status_enum!(
    ProjectStatus {
        Planning => ("planning", "Planning", Info),
        Active => ("active", "Active", Success),
        OnHold => ("on_hold", "On hold", Warning),
        Completed => ("completed", "Completed", Neutral),
        Cancelled => ("cancelled", "Cancelled", Danger),
    }
);

status_enum!(
    TaskStatus {
        Todo => ("todo", "To do", Neutral),
        InProgress => ("in_progress", "In progress", Info),
        Done => ("done", "Done", Success),
    }
);

impl TaskStatus {
    /// Checkbox cycle: anything open becomes done, done reopens
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Done => TaskStatus::Todo,
            _ => TaskStatus::Done,
        }
    }
}

status_enum!(
    BillStatus {
        Pending => ("pending", "Pending", Warning),
        Approved => ("approved", "Approved", Info),
        Paid => ("paid", "Paid", Success),
        Rejected => ("rejected", "Rejected", Danger),
    }
);

impl BillStatus {
    pub fn can_approve(self) -> bool {
        self == BillStatus::Pending
    }

    pub fn can_reject(self) -> bool {
        self == BillStatus::Pending
    }

    pub fn can_pay(self) -> bool {
        self == BillStatus::Approved
    }
}

status_enum!(
    EmployeeStatus {
        Active => ("active", "Active", Success),
        OnLeave => ("on_leave", "On leave", Warning),
        Terminated => ("terminated", "Terminated", Neutral),
    }
);

status_enum!(
    IncidentStatus {
        Open => ("open", "Open", Danger),
        Investigating => ("investigating", "Investigating", Warning),
        Resolved => ("resolved", "Resolved", Success),
    }
);

impl IncidentStatus {
    /// Next step in the review flow, if any
    pub fn next(self) -> Option<Self> {
        match self {
            IncidentStatus::Open => Some(IncidentStatus::Investigating),
            IncidentStatus::Investigating => Some(IncidentStatus::Resolved),
            _ => None,
        }
    }
}

status_enum!(
    Severity {
        Low => ("low", "Low", Neutral),
        Medium => ("medium", "Medium", Info),
        High => ("high", "High", Warning),
        Critical => ("critical", "Critical", Danger),
    }
);

status_enum!(
    /// Event that starts a workflow
    WorkflowTrigger {
        EstimateSigned => ("estimate_signed", "Estimate signed", Info),
        InvoiceOverdue => ("invoice_overdue", "Invoice overdue", Danger),
        ContractActivated => ("contract_activated", "Contract activated", Success),
        SnowfallAlert => ("snowfall_alert", "Snowfall alert", Warning),
        TaskCompleted => ("task_completed", "Task completed", Success),
        IncidentReported => ("incident_reported", "Incident reported", Danger),
    }
);

status_enum!(
    /// Step a workflow performs
    WorkflowActionKind {
        SendEmail => ("send_email", "Send email", Info),
        SendSms => ("send_sms", "Send SMS", Info),
        CreateTask => ("create_task", "Create task", Neutral),
        AssignCrew => ("assign_crew", "Assign crew", Neutral),
        NotifyManager => ("notify_manager", "Notify manager", Warning),
        Wait => ("wait", "Wait", Neutral),
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_round_trip_and_unknown() {
        let status: InvoiceStatus = serde_json::from_str("\"partially_paid\"").unwrap();
        assert_eq!(status, InvoiceStatus::PartiallyPaid);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"partially_paid\"");

        let unknown: InvoiceStatus = serde_json::from_str("\"disputed\"").unwrap();
        assert_eq!(unknown, InvoiceStatus::Unknown);
        assert_eq!(InvoiceStatus::parse("void"), InvoiceStatus::Void);
        assert_eq!(InvoiceStatus::parse("nope"), InvoiceStatus::Unknown);
    }

    #[test]
    fn test_estimate_actions_follow_lifecycle() {
        assert!(EstimateStatus::Draft.can_send());
        assert!(!EstimateStatus::Draft.can_sign());
        assert!(EstimateStatus::Sent.can_sign());
        assert!(EstimateStatus::Signed.can_approve());
        assert!(EstimateStatus::Approved.can_convert());
        assert!(!EstimateStatus::Converted.can_send());
        assert!(!EstimateStatus::Unknown.can_edit());
    }

    #[test]
    fn test_contract_actions_follow_lifecycle() {
        let allowed: Vec<ContractStatus> = ContractStatus::ALL.iter().copied().filter(|s| s.can_terminate()).collect();
        assert_eq!(allowed, vec![ContractStatus::Active]);
        assert!(ContractStatus::Signed.can_activate());
        assert!(!ContractStatus::Terminated.can_delete());
    }

    #[test]
    fn test_invoice_actions() {
        assert!(InvoiceStatus::Overdue.accepts_payment());
        assert!(!InvoiceStatus::Draft.accepts_payment());
        assert!(!InvoiceStatus::Paid.can_void());
        assert!(InvoiceStatus::Draft.can_delete());
    }

    #[test]
    fn test_bill_and_task_transitions() {
        assert!(BillStatus::Pending.can_approve());
        assert!(!BillStatus::Pending.can_pay());
        assert!(BillStatus::Approved.can_pay());
        assert_eq!(TaskStatus::InProgress.toggled(), TaskStatus::Done);
        assert_eq!(TaskStatus::Done.toggled(), TaskStatus::Todo);
        assert_eq!(IncidentStatus::Open.next(), Some(IncidentStatus::Investigating));
        assert_eq!(IncidentStatus::Resolved.next(), None);
    }

    #[test]
    fn test_options_exclude_unknown() {
        let options = Role::options();
        assert_eq!(options.len(), 5);
        assert!(options.iter().all(|(value, _)| value != "unknown"));
        assert_eq!(Tone::Danger.class(), "badge danger");
        assert_eq!(Severity::Critical.tone(), Tone::Danger);
    }
}
