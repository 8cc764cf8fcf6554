use serde::{Deserialize, Serialize};
use solace_core::{HistoryEntry, QuickAction, Role};
use uuid::Uuid;

/// Free-text submission. Without a session id a fresh session is created
/// and its id returned.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitText {
    #[serde(default)]
    pub session_id: Option<Uuid>,
    pub text: String,
}

/// Role selection (initial or via the change-role flow).
#[derive(Debug, Clone, Deserialize)]
pub struct SelectRole {
    #[serde(default)]
    pub session_id: Option<Uuid>,
    pub role: Role,
}

/// Quick-action button click against an existing session.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectAction {
    pub session_id: Uuid,
    pub action: QuickAction,
}

/// Every endpoint answers with the entries appended by the event plus what
/// the page should offer next.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    /// New history entries to render, in order.
    pub entries: Vec<HistoryEntry>,
    /// Quick actions currently on offer (empty when none).
    pub quick_actions: Vec<QuickAction>,
    /// True when the session has no role and the page should show the role
    /// menu.
    pub role_required: bool,
}
