//! Submit Turn use case — the streaming conversation controller.
//!
//! Orchestrates one user turn end-to-end: appends the user turn and an
//! empty placeholder to the transcript, obtains a session from the cache,
//! sends the message, and republishes each streamed chunk to the sink while
//! writing it to the placeholder through its [`TurnHandle`].
//!
//! A turn moves through `idle → sending → streaming → (done | failed)`;
//! both terminal states return to idle. `failed` additionally invalidates
//! the session cache so the next turn rebuilds instead of retrying a broken
//! session.
//!
//! The controller is not reentrant and does not queue a second concurrent
//! turn; the caller serializes submissions (the REPL awaits each one, a UI
//! disables its send affordance while busy).

use crate::ports::chat_gateway::ChatGateway;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::turn_sink::TurnSink;
use crate::session_cache::SessionCache;
use chatzia_domain::{AgentProfile, Model, StreamEvent, Transcript, TurnHandle};
use std::sync::Arc;
use tracing::{debug, error};

/// Fixed user-facing message for any transport failure. The root cause is
/// logged for diagnostics and never shown verbatim to the end user.
pub const TRANSPORT_ERROR_MESSAGE: &str =
    "Hubo un error al comunicarse con el servicio de IA. Por favor, inténtelo de nuevo.";

/// Terminal state of one submitted turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The stream ran to natural exhaustion.
    Completed,
    /// A transport failure occurred; the sink received exactly one
    /// `on_error` and the session cache was invalidated.
    Failed,
    /// Blank input — nothing was mutated and no transport call was made.
    Ignored,
}

/// Use case for submitting one conversation turn.
///
/// Owns the [`SessionCache`]; transport errors are absorbed here and
/// reported through the sink, never returned as `Err` to the caller.
pub struct SubmitTurnUseCase {
    cache: SessionCache,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl SubmitTurnUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>, model: Model) -> Self {
        Self {
            cache: SessionCache::new(gateway, model),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Submit one user turn.
    ///
    /// `transcript` is the visible conversation; the prior history sent to
    /// a freshly built session is its state *before* this call appends the
    /// user turn and the placeholder.
    pub async fn submit(
        &mut self,
        user_text: &str,
        profile: &AgentProfile,
        transcript: &mut Transcript,
        sink: &mut dyn TurnSink,
    ) -> TurnOutcome {
        let trimmed = user_text.trim();
        if trimmed.is_empty() {
            debug!("Ignoring blank input");
            return TurnOutcome::Ignored;
        }

        // History excludes the turns this submit is about to add.
        let history = transcript.turns().to_vec();

        transcript.push_user(trimmed);
        let placeholder = transcript.push_placeholder();

        self.conversation_logger.log(ConversationEvent::new(
            "turn_submitted",
            serde_json::json!({
                "agent_id": profile.id,
                "chars": trimmed.len(),
                "history_turns": history.len(),
            }),
        ));

        debug!("Turn: idle -> sending");
        let stream = match self.cache.get_or_create(profile, &history).await {
            Ok(session) => session.send_streaming(trimmed).await,
            Err(e) => Err(e),
        };

        let mut stream = match stream {
            Ok(handle) => handle,
            Err(e) => {
                return self.fail_turn(profile, transcript, placeholder, sink, &e.to_string());
            }
        };

        debug!("Turn: sending -> streaming");
        let mut chunks_received = 0usize;

        while let Some(event) = stream.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => {
                    if chunk.is_empty() {
                        continue;
                    }
                    transcript.append_chunk(placeholder, &chunk);
                    sink.on_chunk(&chunk);
                    chunks_received += 1;
                }
                StreamEvent::Completed(full) => {
                    // Transports that buffer the whole answer deliver it
                    // here; treat it as the only chunk.
                    if chunks_received == 0 && !full.is_empty() {
                        transcript.append_chunk(placeholder, &full);
                        sink.on_chunk(&full);
                        chunks_received = 1;
                    }
                    break;
                }
                StreamEvent::Error(cause) => {
                    return self.fail_turn(profile, transcript, placeholder, sink, &cause);
                }
            }
        }
        // A closed channel without a terminal event counts as natural
        // exhaustion: everything that arrived is already in the transcript.

        debug!("Turn: streaming -> done ({} chunks)", chunks_received);
        self.conversation_logger.log(ConversationEvent::new(
            "turn_completed",
            serde_json::json!({
                "agent_id": profile.id,
                "chunks": chunks_received,
                "bytes": transcript.text_at(placeholder).map_or(0, str::len),
            }),
        ));

        TurnOutcome::Completed
    }

    /// Whether a warm session is currently cached.
    pub fn has_warm_session(&self) -> bool {
        self.cache.has_session()
    }

    /// Drop the warm session so the next turn rebuilds from the current
    /// profile (used when the caller resets the visible conversation).
    pub fn invalidate_session(&mut self) {
        self.cache.invalidate();
    }

    fn fail_turn(
        &mut self,
        profile: &AgentProfile,
        transcript: &mut Transcript,
        placeholder: TurnHandle,
        sink: &mut dyn TurnSink,
        cause: &str,
    ) -> TurnOutcome {
        error!("Chat transport failure: {}", cause);

        self.cache.invalidate();
        // Keep a partially streamed answer; only an untouched placeholder
        // is rolled back.
        let removed = transcript.remove_if_empty(placeholder);
        sink.on_error(TRANSPORT_ERROR_MESSAGE);

        debug!("Turn: -> failed (placeholder removed: {})", removed);
        self.conversation_logger.log(ConversationEvent::new(
            "turn_failed",
            serde_json::json!({
                "agent_id": profile.id,
                "cause": cause,
                "placeholder_removed": removed,
            }),
        ));

        TurnOutcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_gateway::{ChatSession, GatewayError, StreamHandle};
    use crate::ports::turn_sink::NoTurnSink;
    use async_trait::async_trait;
    use chatzia_domain::{CompiledKnowledge, QaPair, Speaker, TrainingDocument, Turn};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    // ==================== Test Mocks ====================

    /// One scripted streaming response.
    type Script = Vec<StreamEvent>;

    struct MockSession {
        model: Model,
        scripts: Mutex<VecDeque<Script>>,
    }

    impl MockSession {
        fn new(scripts: Vec<Script>) -> Self {
            Self {
                model: Model::default(),
                scripts: Mutex::new(VecDeque::from(scripts)),
            }
        }
    }

    #[async_trait]
    impl ChatSession for MockSession {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn send_streaming(&self, _text: &str) -> Result<StreamHandle, GatewayError> {
            let script = self
                .scripts
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| GatewayError::Other("No more scripted responses".to_string()))?;

            let (tx, rx) = mpsc::channel(script.len().max(1));
            for event in script {
                tx.try_send(event).unwrap();
            }
            Ok(StreamHandle::new(rx))
        }
    }

    #[derive(Debug)]
    struct CreateRecord {
        system_instruction: String,
        history_turns: usize,
    }

    struct MockGateway {
        sessions: Mutex<VecDeque<MockSession>>,
        creates: Mutex<Vec<CreateRecord>>,
        fail_create: bool,
    }

    impl MockGateway {
        fn new(sessions: Vec<MockSession>) -> Self {
            Self {
                sessions: Mutex::new(VecDeque::from(sessions)),
                creates: Mutex::new(Vec::new()),
                fail_create: false,
            }
        }

        fn failing() -> Self {
            Self {
                sessions: Mutex::new(VecDeque::new()),
                creates: Mutex::new(Vec::new()),
                fail_create: true,
            }
        }

        fn create_count(&self) -> usize {
            self.creates.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatGateway for MockGateway {
        async fn create_session(
            &self,
            _model: &Model,
            knowledge: &CompiledKnowledge,
            history: &[Turn],
        ) -> Result<Box<dyn ChatSession>, GatewayError> {
            self.creates.lock().unwrap().push(CreateRecord {
                system_instruction: knowledge.system_instruction.clone(),
                history_turns: history.len(),
            });

            if self.fail_create {
                return Err(GatewayError::ConnectionError("no backend".to_string()));
            }

            let session = self
                .sessions
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| GatewayError::Other("No more scripted sessions".to_string()))?;
            Ok(Box::new(session))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        chunks: Vec<String>,
        errors: Vec<String>,
    }

    impl TurnSink for RecordingSink {
        fn on_chunk(&mut self, chunk: &str) {
            self.chunks.push(chunk.to_string());
        }

        fn on_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    fn profile(id: &str, name: &str) -> AgentProfile {
        AgentProfile::new(id, name)
            .with_document(TrainingDocument::new("faq.txt", "Plan base: 10€/mes."))
            .with_qa_pair(QaPair {
                id: "qa-1".to_string(),
                title: "Precio".to_string(),
                question: "¿Cuánto cuesta?".to_string(),
                answer: "10€ al mes.".to_string(),
            })
    }

    fn use_case(gateway: &Arc<MockGateway>) -> SubmitTurnUseCase {
        SubmitTurnUseCase::new(Arc::clone(gateway) as Arc<dyn ChatGateway>, Model::default())
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_chunks_assembled_in_order() {
        let gateway = Arc::new(MockGateway::new(vec![MockSession::new(vec![vec![
            StreamEvent::Delta("El plan".to_string()),
            StreamEvent::Delta(" cuesta".to_string()),
            StreamEvent::Delta(" 10€.".to_string()),
            StreamEvent::Completed("El plan cuesta 10€.".to_string()),
        ]])]));
        let mut use_case = use_case(&gateway);
        let mut transcript = Transcript::new();
        let mut sink = RecordingSink::default();

        let outcome = use_case
            .submit("¿cuánto cuesta?", &profile("a-1", "Soporte"), &mut transcript, &mut sink)
            .await;

        assert_eq!(outcome, TurnOutcome::Completed);
        assert_eq!(transcript.turns().last().unwrap().text, "El plan cuesta 10€.");
        assert_eq!(sink.chunks, vec!["El plan", " cuesta", " 10€."]);
        assert!(sink.errors.is_empty());
    }

    #[tokio::test]
    async fn test_completed_only_stream_becomes_single_chunk() {
        let gateway = Arc::new(MockGateway::new(vec![MockSession::new(vec![vec![
            StreamEvent::Completed("respuesta entera".to_string()),
        ]])]));
        let mut use_case = use_case(&gateway);
        let mut transcript = Transcript::new();
        let mut sink = RecordingSink::default();

        use_case
            .submit("hola", &profile("a-1", "Soporte"), &mut transcript, &mut sink)
            .await;

        assert_eq!(transcript.turns().last().unwrap().text, "respuesta entera");
        assert_eq!(sink.chunks, vec!["respuesta entera"]);
    }

    #[tokio::test]
    async fn test_session_reused_for_same_agent() {
        let gateway = Arc::new(MockGateway::new(vec![MockSession::new(vec![
            vec![StreamEvent::Completed("uno".to_string())],
            vec![StreamEvent::Completed("dos".to_string())],
        ])]));
        let mut use_case = use_case(&gateway);
        let mut transcript = Transcript::new();
        let agent = profile("a-1", "Soporte");

        use_case
            .submit("primera", &agent, &mut transcript, &mut NoTurnSink)
            .await;
        use_case
            .submit("segunda", &agent, &mut transcript, &mut NoTurnSink)
            .await;

        assert_eq!(gateway.create_count(), 1);
        assert!(use_case.has_warm_session());
    }

    #[tokio::test]
    async fn test_agent_switch_rebuilds_session() {
        let gateway = Arc::new(MockGateway::new(vec![
            MockSession::new(vec![vec![StreamEvent::Completed("de A".to_string())]]),
            MockSession::new(vec![vec![StreamEvent::Completed("de B".to_string())]]),
        ]));
        let mut use_case = use_case(&gateway);
        let mut transcript = Transcript::new();

        use_case
            .submit("hola", &profile("a-1", "Ventas"), &mut transcript, &mut NoTurnSink)
            .await;
        use_case
            .submit("hola", &profile("a-2", "Soporte"), &mut transcript, &mut NoTurnSink)
            .await;

        assert_eq!(gateway.create_count(), 2);
        let creates = gateway.creates.lock().unwrap();
        assert!(creates[0].system_instruction.contains("Ventas"));
        assert!(creates[1].system_instruction.contains("Soporte"));
    }

    #[tokio::test]
    async fn test_failure_preserves_partial_output() {
        let gateway = Arc::new(MockGateway::new(vec![
            MockSession::new(vec![vec![
                StreamEvent::Delta("Lo ".to_string()),
                StreamEvent::Delta("siento".to_string()),
                StreamEvent::Error("connection reset".to_string()),
            ]]),
            MockSession::new(vec![vec![StreamEvent::Completed("recuperado".to_string())]]),
        ]));
        let mut use_case = use_case(&gateway);
        let mut transcript = Transcript::new();
        let mut sink = RecordingSink::default();
        let agent = profile("a-1", "Soporte");

        let outcome = use_case
            .submit("hola", &agent, &mut transcript, &mut sink)
            .await;

        assert_eq!(outcome, TurnOutcome::Failed);
        // Partial answer is kept, not rolled back.
        assert_eq!(transcript.turns().last().unwrap().text, "Lo siento");
        assert_eq!(sink.errors.len(), 1);
        assert_eq!(sink.errors[0], TRANSPORT_ERROR_MESSAGE);
        assert!(!use_case.has_warm_session());

        // The invalidated cache forces a rebuild on the next turn.
        use_case
            .submit("otra vez", &agent, &mut transcript, &mut NoTurnSink)
            .await;
        assert_eq!(gateway.create_count(), 2);
    }

    #[tokio::test]
    async fn test_failure_before_any_chunk_removes_placeholder() {
        let gateway = Arc::new(MockGateway::new(vec![MockSession::new(vec![vec![
            StreamEvent::Error("boom".to_string()),
        ]])]));
        let mut use_case = use_case(&gateway);
        let mut transcript = Transcript::new();
        let mut sink = RecordingSink::default();

        use_case
            .submit("hola", &profile("a-1", "Soporte"), &mut transcript, &mut sink)
            .await;

        // Only the user turn remains; the empty placeholder is gone.
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.turns()[0].speaker, Speaker::User);
        assert_eq!(sink.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_session_creation_failure_reports_once() {
        let gateway = Arc::new(MockGateway::failing());
        let mut use_case = use_case(&gateway);
        let mut transcript = Transcript::new();
        let mut sink = RecordingSink::default();

        let outcome = use_case
            .submit("hola", &profile("a-1", "Soporte"), &mut transcript, &mut sink)
            .await;

        assert_eq!(outcome, TurnOutcome::Failed);
        assert_eq!(transcript.len(), 1);
        assert_eq!(sink.errors.len(), 1);
        assert!(sink.chunks.is_empty());
    }

    #[tokio::test]
    async fn test_blank_input_is_local_noop() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let mut use_case = use_case(&gateway);
        let mut transcript = Transcript::new();
        transcript.push_agent("Hola, soy Soporte. ¿Cómo puedo ayudarte?");
        let mut sink = RecordingSink::default();

        let outcome = use_case
            .submit("   ", &profile("a-1", "Soporte"), &mut transcript, &mut sink)
            .await;

        assert_eq!(outcome, TurnOutcome::Ignored);
        assert_eq!(transcript.len(), 1);
        assert_eq!(gateway.create_count(), 0);
        assert!(sink.chunks.is_empty() && sink.errors.is_empty());
    }

    #[tokio::test]
    async fn test_history_excludes_in_flight_turns() {
        let gateway = Arc::new(MockGateway::new(vec![MockSession::new(vec![vec![
            StreamEvent::Completed("hola".to_string()),
        ]])]));
        let mut use_case = use_case(&gateway);
        let mut transcript = Transcript::new();
        transcript.push_agent("Hola, soy Soporte. ¿Cómo puedo ayudarte?");

        use_case
            .submit("buenas", &profile("a-1", "Soporte"), &mut transcript, &mut NoTurnSink)
            .await;

        // Only the greeting; not the just-added user turn or placeholder.
        let creates = gateway.creates.lock().unwrap();
        assert_eq!(creates[0].history_turns, 1);
    }

    #[tokio::test]
    async fn test_input_is_trimmed_before_send() {
        let gateway = Arc::new(MockGateway::new(vec![MockSession::new(vec![vec![
            StreamEvent::Completed("ok".to_string()),
        ]])]));
        let mut use_case = use_case(&gateway);
        let mut transcript = Transcript::new();

        use_case
            .submit("  hola  ", &profile("a-1", "Soporte"), &mut transcript, &mut NoTurnSink)
            .await;

        assert_eq!(transcript.turns()[0].text, "hola");
    }
}
