//! Warm-session cache.
//!
//! Holds at most one live chat session, keyed by agent identity. The cache
//! is explicitly owned and constructor-injected (no process-wide state), so
//! tests can supply a fake gateway and assert eviction behavior.

use crate::ports::chat_gateway::{ChatGateway, ChatSession, GatewayError};
use chatzia_domain::{AgentProfile, KnowledgeCompiler, Model, Turn};
use std::sync::Arc;
use tracing::{debug, info};

struct CacheEntry {
    owner_agent_id: String,
    session: Box<dyn ChatSession>,
}

/// Cache of the single warm session.
///
/// Cardinality is 0 or 1: switching agents evicts the previous entry, and
/// the evicted session's server-side state becomes unreachable. Each tester
/// instance handles one agent at a time, so that loss is acceptable.
pub struct SessionCache {
    gateway: Arc<dyn ChatGateway>,
    model: Model,
    entry: Option<CacheEntry>,
}

impl SessionCache {
    pub fn new(gateway: Arc<dyn ChatGateway>, model: Model) -> Self {
        Self {
            gateway,
            model,
            entry: None,
        }
    }

    /// Get the warm session for `profile`, rebuilding it when absent or
    /// owned by a different agent.
    ///
    /// On rebuild the profile is compiled and a new session is opened seeded
    /// with `history`; on reuse the history is NOT re-submitted — the live
    /// session already holds it. Content-only edits to the profile do not
    /// trigger a rebuild (identity change and [`invalidate`](Self::invalidate)
    /// are the only staleness signals); a warm session keeps answering from
    /// the grounding it was built with.
    pub async fn get_or_create(
        &mut self,
        profile: &AgentProfile,
        history: &[Turn],
    ) -> Result<&dyn ChatSession, GatewayError> {
        let reuse = self
            .entry
            .as_ref()
            .is_some_and(|entry| entry.owner_agent_id == profile.id);

        if !reuse {
            // Evict before the await so a failed rebuild leaves no stale entry.
            self.entry = None;

            info!("Building session for agent '{}' ({})", profile.name, profile.id);
            let knowledge = KnowledgeCompiler::compile(profile);
            let session = self
                .gateway
                .create_session(&self.model, &knowledge, history)
                .await?;

            self.entry = Some(CacheEntry {
                owner_agent_id: profile.id.clone(),
                session,
            });
        } else {
            debug!("Reusing warm session for agent {}", profile.id);
        }

        match &self.entry {
            Some(entry) => Ok(entry.session.as_ref()),
            None => Err(GatewayError::SessionError(
                "session cache empty after rebuild".to_string(),
            )),
        }
    }

    /// Clear the entry unconditionally. Called after any transport failure
    /// so the next turn starts from a clean session instead of retrying the
    /// broken one.
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            debug!("Session cache invalidated");
        }
    }

    /// Whether a warm session currently exists.
    pub fn has_session(&self) -> bool {
        self.entry.is_some()
    }
}
