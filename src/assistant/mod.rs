//! Chat assistant backed by an LLM messages endpoint.
//!
//! Every request goes through a [`MessageSender`]; [`AnthropicClient`] is the
//! production one. When no API key is configured or the endpoint cannot be
//! reached, answers are computed locally from the journal instead. Errors the
//! provider itself reports (bad key, rate limit, other API errors) are passed
//! through to the caller of [`Assistant::chat`].

mod analysis;
mod client;
mod history;

pub use analysis::{
    AnalysisSource, Emotion, MemoryAnalysis, analysis_prompt, basic_analysis, parse_analysis,
};
pub use client::{
    API_KEY_ENV, AnthropicClient, ApiMessage, MessageSender, MessagesRequest, error_for_status,
    extract_text,
};
pub use history::{Conversation, Exchange, UsageStats};

use crate::config::AssistantSettings;
use crate::error::{AssistantError, Result};
use crate::model::Memory;
use crate::search;
use crate::storage::{KvStore, Personality};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cell::Cell;

const SEARCH_MAX_TOKENS: u32 = 2000;
const ANALYSIS_MAX_TOKENS: u32 = 1000;
const OFFLINE_PREVIEWS: usize = 5;

impl Personality {
    fn tone(&self) -> &'static str {
        match self {
            Personality::Casual => "Speak in a friendly, relaxed way, like a friend would.",
            Personality::Professional => {
                "Speak politely and professionally, as suits a business setting."
            }
            Personality::Detailed => "Give thorough, specific explanations and in-depth analysis.",
            Personality::Concise => "Keep answers short and to the point.",
        }
    }
}

pub fn system_prompt(personality: Personality) -> String {
    format!(
        "You are the assistant of recall, a personal memory journal. \
         You help the user remember, search and understand their memories: \
         notes, voice transcripts, photos, videos, places and documents.\n\n\
         Your tasks:\n\
         1. Analyze and organize the user's memories\n\
         2. Understand natural-language search queries and find related memories\n\
         3. Point out connections between memories\n\
         4. Help the user recall their days and experiences\n\n\
         Tone: {}\n\n\
         Give practical answers and respect the user's privacy. \
         Reply in the language the user writes in.",
        personality.tone()
    )
}

#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    pub personality: Personality,
    /// Replay recent exchanges as context
    pub include_history: bool,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    /// Computed locally rather than by the model
    pub offline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl Reply {
    fn online(text: String) -> Self {
        Self {
            text,
            offline: false,
            fallback_reason: None,
        }
    }

    fn offline(text: String, reason: &AssistantError) -> Self {
        Self {
            text,
            offline: true,
            fallback_reason: Some(reason.to_string()),
        }
    }
}

/// Clears the in-flight flag when dropped.
pub struct InFlight<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

pub struct Assistant<S: MessageSender> {
    sender: S,
    settings: AssistantSettings,
    conversation: Conversation,
    in_flight: Cell<bool>,
}

impl Assistant<AnthropicClient> {
    /// Assistant talking to the configured endpoint with the key from the environment.
    pub fn from_env(store: KvStore, settings: AssistantSettings) -> Result<Self> {
        let client = AnthropicClient::from_env(&settings)?;
        Self::new(client, store, settings)
    }
}

impl<S: MessageSender> Assistant<S> {
    pub fn new(sender: S, store: KvStore, settings: AssistantSettings) -> Result<Self> {
        let conversation = Conversation::load(store, settings.history_limit)?;
        Ok(Self {
            sender,
            settings,
            conversation,
            in_flight: Cell::new(false),
        })
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut Conversation {
        &mut self.conversation
    }

    /// Mark a request as in flight; fails with `Busy` if one already is.
    pub fn begin(&self) -> std::result::Result<InFlight<'_>, AssistantError> {
        if self.in_flight.replace(true) {
            return Err(AssistantError::Busy);
        }
        Ok(InFlight {
            flag: &self.in_flight,
        })
    }

    pub fn build_request(&self, message: &str, options: &ChatOptions) -> MessagesRequest {
        let mut messages = Vec::new();
        if options.include_history {
            messages.extend(self.conversation.context(self.settings.context_turns));
        }
        messages.push(ApiMessage::user(message));

        MessagesRequest {
            model: self.settings.model.clone(),
            max_tokens: options.max_tokens.unwrap_or(self.settings.max_tokens),
            system: system_prompt(options.personality),
            messages,
        }
    }

    fn send(&self, request: &MessagesRequest) -> std::result::Result<String, AssistantError> {
        let _guard = self.begin()?;
        self.sender.send(request)
    }

    /// Answer a message. Only online exchanges are added to the history.
    pub fn chat(
        &mut self,
        message: &str,
        options: &ChatOptions,
        memories: &[Memory],
        now: DateTime<Utc>,
    ) -> Result<Reply> {
        let request = self.build_request(message, options);
        match self.send(&request) {
            Ok(text) => {
                self.conversation.record(message, &text, now)?;
                tracing::info!(chars = text.len(), "Assistant replied");
                Ok(Reply::online(text))
            }
            Err(e) if e.allows_fallback() => {
                tracing::warn!(error = %e, "Assistant unavailable, answering locally");
                Ok(Reply::offline(local_reply(message, memories), &e))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Ask the model which of the local `results` best fit `query`.
    pub fn search(&mut self, query: &str, results: &[&Memory]) -> Result<Reply> {
        let listing: Vec<String> = results
            .iter()
            .enumerate()
            .map(|(i, m)| {
                format!(
                    "{}. [{}] {} ({})",
                    i + 1,
                    m.kind,
                    m.content,
                    m.timestamp.format("%Y-%m-%d")
                )
            })
            .collect();
        let prompt = format!(
            "The user searched for \"{}\". These memories are stored locally:\n\n{}\n\n\
             Work out what the user is looking for and recommend the most relevant \
             memories, each with a relevance score (1-10) and a short reason.",
            query,
            listing.join("\n")
        );
        let options = ChatOptions {
            personality: Personality::Detailed,
            include_history: false,
            max_tokens: Some(SEARCH_MAX_TOKENS),
        };

        let request = self.build_request(&prompt, &options);
        match self.send(&request) {
            Ok(text) => Ok(Reply::online(text)),
            Err(e) => {
                tracing::warn!(error = %e, query = %query, "Assistant search failed");
                let text = format!("Searched for \"{}\": {} memories matched.", query, results.len());
                Ok(Reply::offline(text, &e))
            }
        }
    }

    /// Analyze one memory; falls back to keyword heuristics on any failure.
    pub fn analyze(&mut self, memory: &Memory) -> Result<MemoryAnalysis> {
        let options = ChatOptions {
            personality: Personality::Detailed,
            include_history: false,
            max_tokens: Some(ANALYSIS_MAX_TOKENS),
        };
        let request = self.build_request(&analysis_prompt(memory), &options);
        match self.send(&request) {
            Ok(text) => Ok(parse_analysis(&text, memory)),
            Err(e) => {
                tracing::warn!(error = %e, id = %memory.id, "Assistant analysis failed");
                Ok(basic_analysis(memory))
            }
        }
    }
}

/// Summary of the journal entries matching `message`.
pub fn local_reply(message: &str, memories: &[Memory]) -> String {
    let mut matches = search::simple_search(message.trim(), memories);
    if matches.is_empty() {
        matches = search::text_search(message, memories);
    }

    if matches.is_empty() {
        return format!(
            "Offline: no memories match \"{}\" among the {} in your journal.",
            message.trim(),
            memories.len()
        );
    }

    let mut reply = format!(
        "Offline: {} of {} memories match \"{}\".",
        matches.len(),
        memories.len(),
        message.trim()
    );
    for memory in matches.iter().take(OFFLINE_PREVIEWS) {
        reply.push_str(&format!(
            "\n- {} [{}] {}",
            memory.timestamp.format("%Y-%m-%d"),
            memory.kind,
            memory.preview(60)
        ));
    }
    if matches.len() > OFFLINE_PREVIEWS {
        reply.push_str(&format!("\n...and {} more", matches.len() - OFFLINE_PREVIEWS));
    }
    reply
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemoryKind;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use tempfile::TempDir;

    enum Script {
        Reply(&'static str),
        Fail(fn() -> AssistantError),
    }

    struct FakeSender {
        script: Script,
        requests: RefCell<Vec<MessagesRequest>>,
    }

    impl FakeSender {
        fn replying(text: &'static str) -> Self {
            Self {
                script: Script::Reply(text),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn failing(error: fn() -> AssistantError) -> Self {
            Self {
                script: Script::Fail(error),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl MessageSender for FakeSender {
        fn send(&self, request: &MessagesRequest) -> std::result::Result<String, AssistantError> {
            self.requests.borrow_mut().push(request.clone());
            match &self.script {
                Script::Reply(text) => Ok(text.to_string()),
                Script::Fail(error) => Err(error()),
            }
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 16, 0, 0).unwrap()
    }

    fn assistant(sender: FakeSender, temp: &TempDir) -> Assistant<FakeSender> {
        let store = KvStore::open(temp.path()).unwrap();
        Assistant::new(sender, store, AssistantSettings::default()).unwrap()
    }

    fn memories() -> Vec<Memory> {
        vec![
            Memory::new("m1".into(), MemoryKind::Photo, "Sunset at Jeju beach".into())
                .with_importance(8),
            Memory::new("m2".into(), MemoryKind::Text, "Dentist appointment Friday".into()),
        ]
    }

    #[test]
    fn test_online_chat_records_history() {
        let temp = TempDir::new().unwrap();
        let mut assistant = assistant(FakeSender::replying("Sure!"), &temp);

        let reply = assistant
            .chat("hello", &ChatOptions::default(), &memories(), now())
            .unwrap();
        assert_eq!(reply.text, "Sure!");
        assert!(!reply.offline);
        assert_eq!(assistant.conversation().len(), 1);

        let requests = assistant.sender.requests.borrow();
        assert_eq!(requests[0].messages, vec![ApiMessage::user("hello")]);
        assert_eq!(requests[0].max_tokens, 4000);
        assert!(requests[0].system.contains("friendly"));
    }

    #[test]
    fn test_history_is_sent_when_requested() {
        let temp = TempDir::new().unwrap();
        let mut assistant = assistant(FakeSender::replying("ok"), &temp);
        let options = ChatOptions {
            include_history: true,
            ..Default::default()
        };

        assistant.chat("first", &options, &[], now()).unwrap();
        assistant.chat("second", &options, &[], now()).unwrap();

        let requests = assistant.sender.requests.borrow();
        assert_eq!(
            requests[1].messages,
            vec![
                ApiMessage::user("first"),
                ApiMessage::assistant("ok"),
                ApiMessage::user("second"),
            ]
        );
    }

    #[test]
    fn test_missing_key_falls_back_locally() {
        let temp = TempDir::new().unwrap();
        let mut assistant = assistant(FakeSender::failing(|| AssistantError::MissingApiKey), &temp);

        let reply = assistant
            .chat("jeju", &ChatOptions::default(), &memories(), now())
            .unwrap();
        assert!(reply.offline);
        assert!(reply.text.contains("1 of 2 memories"));
        assert!(reply.text.contains("Sunset at Jeju beach"));
        assert!(assistant.conversation().is_empty());
    }

    #[test]
    fn test_transport_error_falls_back() {
        let temp = TempDir::new().unwrap();
        let mut assistant = assistant(
            FakeSender::failing(|| AssistantError::Transport("connection refused".into())),
            &temp,
        );
        let reply = assistant
            .chat("nothing like this", &ChatOptions::default(), &memories(), now())
            .unwrap();
        assert!(reply.offline);
        assert!(reply.text.contains("no memories match"));
        assert_eq!(
            reply.fallback_reason.as_deref(),
            Some("Request failed: connection refused")
        );
    }

    #[test]
    fn test_api_errors_surface() {
        let temp = TempDir::new().unwrap();
        let mut assistant = assistant(FakeSender::failing(|| AssistantError::RateLimited), &temp);
        let err = assistant
            .chat("hello", &ChatOptions::default(), &memories(), now())
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::RecallError::Assistant(AssistantError::RateLimited)
        ));
    }

    #[test]
    fn test_search_falls_back_to_count() {
        let temp = TempDir::new().unwrap();
        let mut assistant = assistant(FakeSender::failing(|| AssistantError::InvalidApiKey), &temp);
        let memories = memories();
        let refs: Vec<&Memory> = memories.iter().collect();

        let reply = assistant.search("beach", &refs).unwrap();
        assert!(reply.offline);
        assert_eq!(reply.text, "Searched for \"beach\": 2 memories matched.");
    }

    #[test]
    fn test_search_prompt_lists_results() {
        let temp = TempDir::new().unwrap();
        let mut assistant = assistant(FakeSender::replying("1. m1"), &temp);
        let memories = memories();
        let refs: Vec<&Memory> = memories.iter().collect();

        let reply = assistant.search("beach", &refs).unwrap();
        assert_eq!(reply.text, "1. m1");
        let requests = assistant.sender.requests.borrow();
        assert!(requests[0].messages[0].content.contains("1. [photo] Sunset at Jeju beach"));
        assert_eq!(requests[0].max_tokens, 2000);
    }

    #[test]
    fn test_analyze_online_and_offline() {
        let temp = TempDir::new().unwrap();
        let mut online = assistant(
            FakeSender::replying(r#"{"importance":9,"keywords":["jeju"],"emotion":"positive","summary":"Sunset"}"#),
            &temp,
        );
        let journal = memories();
        let analysis = online.analyze(&journal[0]).unwrap();
        assert_eq!(analysis.importance, 9);
        assert_eq!(analysis.source, AnalysisSource::Model);

        let other = TempDir::new().unwrap();
        let mut offline = assistant(FakeSender::failing(|| AssistantError::MissingApiKey), &other);
        let analysis = offline.analyze(&memories()[1]).unwrap();
        assert_eq!(analysis.source, AnalysisSource::Offline);
        assert_eq!(analysis.importance, 8);
    }

    #[test]
    fn test_second_request_in_flight_is_busy() {
        let temp = TempDir::new().unwrap();
        let assistant = assistant(FakeSender::replying("ok"), &temp);

        let guard = assistant.begin().unwrap();
        assert!(matches!(assistant.begin(), Err(AssistantError::Busy)));
        let request = assistant.build_request("hi", &ChatOptions::default());
        assert!(matches!(assistant.send(&request), Err(AssistantError::Busy)));
        drop(guard);
        assert!(assistant.begin().is_ok());
    }
}
