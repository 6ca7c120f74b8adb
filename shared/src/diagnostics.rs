use crate::AppState;
use serde::Serialize;

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

/// Body of `GET /test`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for DiagnosticReport {
    fn default() -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: None,
            database_name: None,
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}

/// Describes store connectivity and which variables are configured.
/// Infallible: every store error is folded into the `database` status.
pub async fn run_diagnostics(state: &AppState) -> DiagnosticReport {
    let mut report = DiagnosticReport::default();

    if state.store.is_connected() {
        report.database = "✅ Available".to_string();
        report.connection_status = "Connected".to_string();

        match state.store.collections().await {
            Ok(mut names) => {
                names.truncate(MAX_COLLECTIONS);
                report.collections = names;
                report.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                report.database = format!("⚠️  Connected but Error: {}", truncate(&e.to_string()));
            }
        }
    } else {
        report.database = "⚠️  Available but not initialized".to_string();
    }

    report.database_url = Some(presence(state.config.database_url.is_some()));
    report.database_name = Some(presence(state.config.database_name.is_some()));
    report
}

fn presence(set: bool) -> String {
    if set { "✅ Set" } else { "❌ Not Set" }.to_string()
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}
