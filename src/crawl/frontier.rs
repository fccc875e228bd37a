//! The shared queue of URLs waiting to be fetched.

use std::collections::VecDeque;
use std::time::Duration;

use ahash::AHashSet;
use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::time::{Instant, timeout_at};

/// A URL waiting to be fetched and its distance from the seeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    pub depth: u32,
}

/// Every URL ever admitted to the frontier.
#[derive(Debug, Default)]
pub struct SeenSet {
    urls: AHashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `url`; returns `false` if it was already present.
    pub fn insert(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[derive(Debug, Default)]
struct FrontierState {
    queue: VecDeque<FrontierEntry>,
    seen: SeenSet,
}

/// FIFO work queue with lifetime deduplication.
///
/// The seen-set and the queue share one lock, so admitting a URL is a single
/// check-and-insert step even with many workers enqueueing at once.
#[derive(Debug, Default)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    available: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit `url` at `depth` unless it has been admitted before.
    ///
    /// Returns whether the URL was queued.
    pub fn enqueue<S: Into<String>>(&self, url: S, depth: u32) -> bool {
        let url = url.into();
        {
            let mut state = self.state.lock();
            if !state.seen.insert(&url) {
                return false;
            }
            state.queue.push_back(FrontierEntry { url, depth });
        }
        self.available.notify_one();
        true
    }

    /// Pop the oldest entry without waiting.
    pub fn try_dequeue(&self) -> Option<FrontierEntry> {
        self.state.lock().queue.pop_front()
    }

    /// Pop the oldest entry, waiting up to `wait` for one to arrive.
    ///
    /// `None` means the queue stayed empty for the whole wait.
    pub async fn dequeue(&self, wait: Duration) -> Option<FrontierEntry> {
        let deadline = Instant::now() + wait;

        loop {
            let notified = self.available.notified();

            if let Some(entry) = self.try_dequeue() {
                return Some(entry);
            }

            if timeout_at(deadline, notified).await.is_err() {
                return self.try_dequeue();
            }
        }
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.state.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct URLs admitted so far.
    pub fn seen_count(&self) -> usize {
        self.state.lock().seen.len()
    }

    /// Whether `url` has ever been admitted.
    pub fn has_seen(&self, url: &str) -> bool {
        self.state.lock().seen.contains(url)
    }
}
