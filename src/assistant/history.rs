use super::client::ApiMessage;
use crate::error::Result;
use crate::storage::{KEY_CHAT_HISTORY, KvStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One question and its answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageStats {
    pub total_conversations: usize,
    pub today: usize,
    pub last_used: Option<DateTime<Utc>>,
}

/// Chat history persisted under `chat_history`, oldest first.
#[derive(Debug, Clone)]
pub struct Conversation {
    store: KvStore,
    exchanges: Vec<Exchange>,
    limit: usize,
}

impl Conversation {
    pub fn load(store: KvStore, limit: usize) -> Result<Self> {
        let exchanges = match store.get::<Vec<Exchange>>(KEY_CHAT_HISTORY) {
            Ok(history) => history.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Chat history unreadable, starting fresh");
                Vec::new()
            }
        };
        Ok(Self {
            store,
            exchanges,
            limit: limit.max(1),
        })
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Append and persist, dropping the oldest exchanges beyond the limit.
    pub fn record(&mut self, user: &str, assistant: &str, now: DateTime<Utc>) -> Result<()> {
        let mut candidate = self.exchanges.clone();
        candidate.push(Exchange {
            user: user.to_string(),
            assistant: assistant.to_string(),
            timestamp: now,
        });
        if candidate.len() > self.limit {
            let excess = candidate.len() - self.limit;
            candidate.drain(..excess);
        }
        self.store.set(KEY_CHAT_HISTORY, &candidate)?;
        self.exchanges = candidate;
        Ok(())
    }

    /// The last `turns` exchanges as alternating user/assistant messages.
    pub fn context(&self, turns: usize) -> Vec<ApiMessage> {
        let start = self.exchanges.len().saturating_sub(turns);
        self.exchanges[start..]
            .iter()
            .flat_map(|e| {
                [
                    ApiMessage::user(e.user.as_str()),
                    ApiMessage::assistant(e.assistant.as_str()),
                ]
            })
            .collect()
    }

    pub fn clear(&mut self) -> Result<usize> {
        let count = self.exchanges.len();
        self.store.remove(KEY_CHAT_HISTORY)?;
        self.exchanges.clear();
        tracing::info!(count = count, "Cleared chat history");
        Ok(count)
    }

    pub fn usage(&self, now: DateTime<Utc>) -> UsageStats {
        let today = now.date_naive();
        UsageStats {
            total_conversations: self.exchanges.len(),
            today: self
                .exchanges
                .iter()
                .filter(|e| e.timestamp.date_naive() == today)
                .count(),
            last_used: self.exchanges.last().map(|e| e.timestamp),
        }
    }
}
