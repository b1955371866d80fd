//! Messaging and automation workflows

use serde::{Deserialize, Serialize};

use crate::api::Resource;
use crate::listing::{Listable, SortKey};
use super::{WorkflowActionKind, WorkflowTrigger};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub id: u32,
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    /// Markdown
    pub body: String,
    pub read: bool,
    pub sent_at: Option<String>,
}

impl Resource for Message {
    const PATH: &'static str = "messages";
    const ENVELOPE: &'static str = "messages";
    const SINGULAR: &'static str = "message";
    const LABEL: &'static str = "messages";
}

impl Listable for Message {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.subject.as_str(),
            self.sender.as_str(),
            self.recipient.as_str(),
            self.body.as_str(),
        ]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "read" => Some(if self.read { "read" } else { "unread" }.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> SortKey {
        match key {
            "subject" => SortKey::text(&self.subject),
            "sender" => SortKey::text(&self.sender),
            "sent_at" => SortKey::date(self.sent_at.as_deref()),
            _ => SortKey::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageDraft {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadPatch {
    pub read: bool,
}

/// One step of a workflow; `config` is free-form per kind (template, delay, ...)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowAction {
    pub kind: WorkflowActionKind,
    pub config: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Workflow {
    pub id: u32,
    pub name: String,
    pub trigger: WorkflowTrigger,
    pub actions: Vec<WorkflowAction>,
    pub active: bool,
    pub updated_at: Option<String>,
}

impl Resource for Workflow {
    const PATH: &'static str = "workflows";
    const ENVELOPE: &'static str = "workflows";
    const SINGULAR: &'static str = "workflow";
    const LABEL: &'static str = "workflows";
}

impl Listable for Workflow {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.trigger.label()]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "trigger" => Some(self.trigger.as_str().to_string()),
            "active" => Some(if self.active { "active" } else { "paused" }.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> SortKey {
        match key {
            "name" => SortKey::text(&self.name),
            "trigger" => SortKey::text(self.trigger.label()),
            "steps" => SortKey::Number(self.actions.len() as f64),
            "updated_at" => SortKey::date(self.updated_at.as_deref()),
            _ => SortKey::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkflowDraft {
    pub name: String,
    pub trigger: WorkflowTrigger,
    pub actions: Vec<WorkflowAction>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivePatch {
    pub active: bool,
}

/// Move an action one slot up (-1) or down (+1); out-of-range moves are no-ops
pub fn shift_action(actions: &mut [WorkflowAction], index: usize, delta: i32) {
    let target = index as i64 + delta as i64;
    if index >= actions.len() || target < 0 || target as usize >= actions.len() {
        return;
    }
    actions.swap(index, target as usize);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fields_decode_to_defaults() {
        let messages: Vec<Message> = crate::api::unwrap_collection(
            serde_json::json!({"messages": [{"id": 1, "sender": null, "recipient": null, "subject": "Route",
                "body": null, "read": null}]}),
            Message::ENVELOPE,
        )
        .unwrap();
        assert_eq!(messages[0].body, "");
        assert!(!messages[0].read);

        let workflows: Vec<Workflow> = crate::api::unwrap_collection(
            serde_json::json!([{"id": 2, "name": null, "trigger": null, "active": null,
                "actions": [{"kind": "wait", "config": null}, null]}]),
            Workflow::ENVELOPE,
        )
        .unwrap();
        assert_eq!(workflows[0].trigger, WorkflowTrigger::Unknown);
        assert_eq!(workflows[0].actions.len(), 1);
        assert_eq!(workflows[0].actions[0].config, "");
    }

    fn action(kind: WorkflowActionKind, config: &str) -> WorkflowAction {
        WorkflowAction { kind, config: config.to_string() }
    }

    #[test]
    fn test_shift_action_keeps_every_step() {
        let mut actions = vec![
            action(WorkflowActionKind::SendEmail, "a"),
            action(WorkflowActionKind::Wait, "b"),
            action(WorkflowActionKind::CreateTask, "c"),
        ];
        shift_action(&mut actions, 2, -1);
        let configs: Vec<&str> = actions.iter().map(|a| a.config.as_str()).collect();
        assert_eq!(configs, vec!["a", "c", "b"]);

        shift_action(&mut actions, 0, -1);
        shift_action(&mut actions, 2, 1);
        shift_action(&mut actions, 9, 1);
        let configs: Vec<&str> = actions.iter().map(|a| a.config.as_str()).collect();
        assert_eq!(configs, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_workflow_decodes_actions_in_order() {
        let json = r#"{
            "id": 4,
            "name": "Storm prep",
            "trigger": "snowfall_alert",
            "active": true,
            "actions": [
                {"kind": "notify_manager", "config": ""},
                {"kind": "assign_crew", "config": "north"}
            ]
        }"#;
        let workflow: Workflow = serde_json::from_str(json).unwrap();
        assert_eq!(workflow.trigger, WorkflowTrigger::SnowfallAlert);
        assert_eq!(workflow.actions[1].kind, WorkflowActionKind::AssignCrew);
        assert_eq!(workflow.filter_value("active").as_deref(), Some("active"));
    }

    #[test]
    fn test_message_read_filter() {
        let message = Message { read: false, ..Default::default() };
        assert_eq!(message.filter_value("read").as_deref(), Some("unread"));
    }
}
