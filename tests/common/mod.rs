#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use fintrack_core::{
    advisor::{AdvisoryError, GenerationRequest, LanguageModel},
    core::FinanceTracker,
    storage::{KeyValueStore, MemoryStore},
    time::Clock,
};

/// Clock that only moves when a test advances it.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 20, 9, 0, 0).unwrap()
}

/// Fresh tracker over an inspectable in-memory store.
pub fn tracker() -> (FinanceTracker, Arc<MemoryStore>, ManualClock) {
    let store = Arc::new(MemoryStore::new());
    let clock = ManualClock::starting_at(start_time());
    let tracker = FinanceTracker::load(Box::new(store.clone()), Box::new(clock.clone()));
    (tracker, store, clock)
}

pub fn stored(store: &MemoryStore, key: &str) -> Option<String> {
    store.get(key).unwrap()
}

/// Language model replaying canned answers and recording prompts.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, AdvisoryError>>>,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedModel {
    pub fn replying(reply: Result<String, AdvisoryError>) -> Self {
        let model = Self::default();
        model.replies.lock().unwrap().push_back(reply);
        model
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, AdvisoryError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(AdvisoryError::RequestFailed {
                    message: "no scripted reply".into(),
                })
            })
    }
}
