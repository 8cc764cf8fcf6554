//! The HTTP shell: a thin adapter between the chat page and the dialogue
//! engine.
//!
//! Sessions are independent instances keyed by UUID; each session's state
//! sits behind its own mutex so one inbound event is fully handled before
//! the next for that session, while separate sessions never contend.

use crate::types::{ChatResponse, SelectAction, SelectRole, SubmitText};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use solace_core::SessionState;
use solace_dialogue::DialogueEngine;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

type SharedSession = Arc<Mutex<SessionState>>;

#[derive(Clone)]
pub struct GatewayState {
    engine: Arc<DialogueEngine>,
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl GatewayState {
    pub fn new(engine: Arc<DialogueEngine>) -> Self {
        Self {
            engine,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fetch an existing session or create a fresh one.
    async fn session(&self, id: Option<Uuid>) -> (Uuid, SharedSession) {
        if let Some(id) = id {
            if let Some(session) = self.sessions.read().await.get(&id) {
                return (id, session.clone());
            }
        }
        let id = id.unwrap_or_else(Uuid::new_v4);
        let session = Arc::new(Mutex::new(SessionState::new()));
        self.sessions.write().await.insert(id, session.clone());
        tracing::debug!("Created session {}", id);
        (id, session)
    }

    async fn existing_session(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }
}

pub fn router(engine: Arc<DialogueEngine>) -> Router {
    let state = GatewayState::new(engine);
    Router::new()
        .route("/health", get(health))
        .route("/role", post(select_role))
        .route("/message", post(submit_text))
        .route("/action", post(select_action))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn serve(engine: Arc<DialogueEngine>, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Gateway failed to bind {}: {}", addr, e))?;
    tracing::info!("Gateway listening on {}", addr);
    axum::serve(listener, router(engine)).await?;
    Ok(())
}

// ============================================================================
// Route handlers
// ============================================================================

async fn health() -> &'static str {
    "ok"
}

fn respond(id: Uuid, state: &SessionState, entries: Vec<solace_core::HistoryEntry>) -> ChatResponse {
    ChatResponse {
        session_id: id,
        entries,
        quick_actions: state
            .offered_actions()
            .map(|actions| actions.to_vec())
            .unwrap_or_default(),
        role_required: state.role.is_none(),
    }
}

async fn select_role(
    State(state): State<GatewayState>,
    Json(req): Json<SelectRole>,
) -> Json<ChatResponse> {
    let (id, session) = state.session(req.session_id).await;
    let mut session = session.lock().await;
    let entries = state.engine.select_role(&mut session, req.role);
    Json(respond(id, &session, entries))
}

async fn submit_text(
    State(state): State<GatewayState>,
    Json(req): Json<SubmitText>,
) -> Json<ChatResponse> {
    let (id, session) = state.session(req.session_id).await;
    let mut session = session.lock().await;
    let entries = state.engine.submit_text(&mut session, &req.text).await;
    Json(respond(id, &session, entries))
}

async fn select_action(
    State(state): State<GatewayState>,
    Json(req): Json<SelectAction>,
) -> Result<Json<ChatResponse>, StatusCode> {
    let Some(session) = state.existing_session(req.session_id).await else {
        return Err(StatusCode::NOT_FOUND);
    };
    let mut session = session.lock().await;
    let entries = state
        .engine
        .select_quick_action(&mut session, req.action)
        .await;
    Ok(Json(respond(req.session_id, &session, entries)))
}
