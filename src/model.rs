//! Model-assisted extraction over an OpenAI-style completion endpoint.
//!
//! This path sends the whole document to a chat-completions endpoint and
//! validates whatever comes back into the same record shape the rule-based
//! parser produces. One bounded attempt, no retries; every failure is
//! returned as an error string so the pipeline can fall back.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::fields::Priority;
use crate::record::TaskRecord;

/// Connection settings for the completion endpoint.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            api_key: String::new(),
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

const SYSTEM_PROMPT: &str = "You convert project task descriptions into Teamwork import records. \
Reply with a JSON object of the form {\"tasks\": [...]} where every item carries exactly the keys \
TASKLIST, TASK, DESCRIPTION, ASSIGN TO, START DATE, DUE DATE, PRIORITY, ESTIMATED TIME, TAGS and STATUS. \
A row either names a tasklist (TASKLIST filled, TASK empty) or one task inside the latest tasklist \
(TASK filled, TASKLIST empty). Strip numbering and code prefixes from names. Fold description, \
dependency, acceptance-criteria, deliverable, risk and milestone lines into DESCRIPTION. \
PRIORITY is High, Medium or Low when the text states one, otherwise empty. ESTIMATED TIME uses \
the <n>hr or <n>mn form when a duration is stated, otherwise empty. Leave ASSIGN TO, START DATE, \
DUE DATE, TAGS and STATUS empty. Never invent tasks.";

/// Extractor backed by a chat-completions endpoint.
pub struct ModelExtractor {
    config: ModelConfig,
    client: reqwest::blocking::Client,
}

impl ModelExtractor {
    pub fn new(config: ModelConfig) -> Result<Self, String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(ModelExtractor { config, client })
    }

    /// True when an API key is configured.
    pub fn is_available(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }

    /// Runs one extraction attempt and validates the returned records.
    pub fn extract(&self, text: &str, project_title: &str) -> Result<Vec<TaskRecord>, String> {
        if !self.is_available() {
            return Err("no API key configured".to_string());
        }
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": user_prompt(text, project_title) },
            ],
            "temperature": 0.1,
            "max_tokens": 2000,
            "response_format": { "type": "json_object" },
        });
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .map_err(|e| format!("request failed: {e}"))?;
        if !response.status().is_success() {
            return Err(format!("endpoint returned {}", response.status()));
        }
        let parsed: ChatResponse = response
            .json()
            .map_err(|e| format!("malformed completion response: {e}"))?;
        let content = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| "completion response held no choices".to_string())?;
        let value: Value =
            serde_json::from_str(content).map_err(|e| format!("completion content is not JSON: {e}"))?;
        let items = unwrap_record_list(value)
            .ok_or_else(|| "completion content held no record list".to_string())?;
        Ok(validate_records(&items, project_title))
    }
}

fn user_prompt(text: &str, project_title: &str) -> String {
    format!("Project title: {project_title}\n\nConvert this text into import records:\n\n{text}")
}

/// Accepts the record list bare, or wrapped in a `tasks`/`data` member, or
/// as the first array member of any wrapper object.
fn unwrap_record_list(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => {
            for key in ["tasks", "data"] {
                if let Some(Value::Array(items)) = map.get(key) {
                    return Some(items.clone());
                }
            }
            map.into_iter().find_map(|(_, member)| match member {
                Value::Array(items) => Some(items),
                _ => None,
            })
        }
        _ => None,
    }
}

/// Cleans externally produced records into importable rows.
///
/// Every schema column is string-coerced and trimmed. Rows that merely name
/// a section label are dropped, rows filling both name columns keep the
/// tasklist, and a first row naming nothing inherits the project title.
pub fn validate_records(items: &[Value], project_title: &str) -> Vec<TaskRecord> {
    let mut records = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            continue;
        };
        let cell = |column: &str| -> String {
            match object.get(column) {
                Some(Value::String(text)) => text.trim().to_string(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string().trim_matches('"').trim().to_string(),
            }
        };
        let mut record = TaskRecord {
            tasklist: cell("TASKLIST"),
            task: cell("TASK"),
            description: cell("DESCRIPTION"),
            assign_to: cell("ASSIGN TO"),
            start_date: cell("START DATE"),
            due_date: cell("DUE DATE"),
            priority: cell("PRIORITY"),
            estimated_time: cell("ESTIMATED TIME"),
            tags: cell("TAGS"),
            status: cell("STATUS"),
        };
        if is_label_row(&record.task) || is_label_row(&record.tasklist) {
            eprintln!(
                "Warning: dropping label row \"{}\"",
                if record.task.is_empty() { &record.tasklist } else { &record.task }
            );
            continue;
        }
        if !record.tasklist.is_empty() && !record.task.is_empty() {
            eprintln!(
                "Warning: record {} named both a tasklist and a task, keeping the tasklist",
                index + 1
            );
            record.task.clear();
        }
        if index == 0 && !record.is_importable() && !project_title.is_empty() {
            record.tasklist = project_title.to_string();
        }
        if !record.is_importable() {
            continue;
        }
        record.priority = clean_priority(&record.priority);
        records.push(record);
    }
    records
}

/// Section labels sometimes come back as task rows; the model may answer
/// in French or English.
const LABEL_KEYWORDS: [&str; 8] = [
    "critère",
    "dépendance",
    "livrable",
    "risque",
    "criteria",
    "dependency",
    "deliverable",
    "risk",
];

fn is_label_row(name: &str) -> bool {
    if name.chars().count() >= 50 {
        return false;
    }
    let lower = name.to_lowercase();
    LABEL_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

fn clean_priority(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    match Priority::from_cell(value) {
        Some(priority) => priority.as_cell().to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_body(content: &Value) -> String {
        json!({
            "choices": [
                { "message": { "role": "assistant", "content": content.to_string() } }
            ]
        })
        .to_string()
    }

    fn test_config(url: String) -> ModelConfig {
        ModelConfig {
            api_key: "test-key".to_string(),
            api_url: url,
            ..ModelConfig::default()
        }
    }

    #[test]
    fn test_extract_parses_a_wrapped_task_list() {
        let mut server = mockito::Server::new();
        let content = json!({
            "tasks": [
                { "TASKLIST": "Campagne", "TASK": "", "DESCRIPTION": "Contexte" },
                { "TASKLIST": "", "TASK": "Définir le concept", "PRIORITY": "élevée" }
            ]
        });
        let mock = server
            .mock("POST", "/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(chat_body(&content))
            .create();

        let extractor = ModelExtractor::new(test_config(format!("{}/chat", server.url()))).unwrap();
        let records = extractor.extract("1. Définir le concept", "Campagne").unwrap();
        mock.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tasklist, "Campagne");
        assert_eq!(records[1].task, "Définir le concept");
        assert_eq!(records[1].priority, "High");
    }

    #[test]
    fn test_extract_reports_http_failures() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("POST", "/chat").with_status(500).create();

        let extractor = ModelExtractor::new(test_config(format!("{}/chat", server.url()))).unwrap();
        let error = extractor.extract("texte", "Projet").unwrap_err();
        assert!(error.contains("500"), "unexpected error: {error}");
    }

    #[test]
    fn test_extract_rejects_non_json_content() {
        let mut server = mockito::Server::new();
        let body = json!({
            "choices": [ { "message": { "role": "assistant", "content": "pas du JSON" } } ]
        })
        .to_string();
        let _mock = server
            .mock("POST", "/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create();

        let extractor = ModelExtractor::new(test_config(format!("{}/chat", server.url()))).unwrap();
        let error = extractor.extract("texte", "Projet").unwrap_err();
        assert!(error.contains("not JSON"), "unexpected error: {error}");
    }

    #[test]
    fn test_missing_key_never_calls_the_endpoint() {
        let extractor = ModelExtractor::new(ModelConfig::default()).unwrap();
        assert!(!extractor.is_available());
        assert!(extractor.extract("texte", "Projet").is_err());
    }

    #[test]
    fn test_unwrap_record_list_accepts_known_wrappers() {
        let bare = json!([{ "TASK": "a" }]);
        assert_eq!(unwrap_record_list(bare).unwrap().len(), 1);

        let tasks = json!({ "tasks": [{ "TASK": "a" }, { "TASK": "b" }] });
        assert_eq!(unwrap_record_list(tasks).unwrap().len(), 2);

        let data = json!({ "data": [{ "TASK": "a" }] });
        assert_eq!(unwrap_record_list(data).unwrap().len(), 1);

        let other = json!({ "résultat": [{ "TASK": "a" }] });
        assert_eq!(unwrap_record_list(other).unwrap().len(), 1);

        assert!(unwrap_record_list(json!("texte")).is_none());
        assert!(unwrap_record_list(json!({ "tasks": "rien" })).is_none());
    }

    #[test]
    fn test_validate_drops_label_rows_and_fixes_name_columns() {
        let items = vec![
            json!({ "TASKLIST": "", "TASK": "Critère d'acceptation" }),
            json!({ "TASKLIST": "Liste", "TASK": "Tâche en trop" }),
            json!({ "TASKLIST": "", "TASK": "" }),
            json!({ "TASKLIST": "", "TASK": "Vraie tâche", "PRIORITY": "urgente" }),
        ];
        let records = validate_records(&items, "Projet");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tasklist, "Liste");
        assert_eq!(records[0].task, "");
        assert_eq!(records[1].task, "Vraie tâche");
        assert_eq!(records[1].priority, "High");
    }

    #[test]
    fn test_validate_first_empty_row_inherits_the_title() {
        let items = vec![json!({ "TASKLIST": "", "TASK": "", "DESCRIPTION": "Contexte" })];
        let records = validate_records(&items, "Campagne");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tasklist, "Campagne");
        assert_eq!(records[0].description, "Contexte");
    }

    #[test]
    fn test_validate_keeps_long_names_carrying_keywords() {
        let name = "Mettre en place le suivi des risques frais pour toute la durée du projet";
        let items = vec![json!({ "TASK": name })];
        let records = validate_records(&items, "");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].task, name);
    }

    #[test]
    fn test_validate_coerces_non_string_cells() {
        let items = vec![json!({ "TASK": "Chiffrée", "ESTIMATED TIME": 3, "PRIORITY": null })];
        let records = validate_records(&items, "");
        assert_eq!(records[0].estimated_time, "3");
        assert_eq!(records[0].priority, "");
    }
}
