use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which relay template a report is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTemplate {
    /// A reader flags a mistake in a published record.
    RecordError,
    /// General feedback or a proposal for the project.
    Feedback,
}

impl ReportTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportTemplate::RecordError => "record_error",
            ReportTemplate::Feedback => "feedback",
        }
    }
}

/// Payload accepted by `POST /api/reports`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub template: ReportTemplate,
    pub message: String,
    pub name: String,
    pub contacts: String,
    pub url: String,
    #[serde(default)]
    pub record_id: Option<String>,
}

impl ReportRequest {
    /// All free-text parts are mandatory.
    pub fn is_complete(&self) -> bool {
        [&self.message, &self.name, &self.contacts]
            .iter()
            .all(|value| !value.trim().is_empty())
    }

    /// The field mapping handed to the relay.
    pub fn fields(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert("message".to_string(), self.message.clone());
        fields.insert("name".to_string(), self.name.clone());
        fields.insert("contacts".to_string(), self.contacts.clone());
        fields.insert("url".to_string(), self.url.clone());
        if let Some(record_id) = &self.record_id {
            fields.insert("record_id".to_string(), record_id.clone());
        }
        fields
    }
}
