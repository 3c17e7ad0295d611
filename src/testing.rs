//! Testing utilities for pixfeed
//!
//! This module provides in-memory transports and recording collaborators
//! for exercising the paging client and load controller without a network.
//!
//! Only available when compiled with `cfg(test)`.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

use crate::api::{ImageResult, SearchPage, SearchTransport, TransportError};
use crate::loader::{Notification, Notifier, Renderer, Viewer};

/// Build `count` distinct image results
#[must_use]
pub fn images(count: usize) -> Vec<ImageResult> {
    (0..count)
        .map(|i| ImageResult {
            id: i as u64,
            preview_url: format!("https://cdn.example/{i}_640.jpg"),
            full_url: format!("https://cdn.example/{i}_1280.jpg"),
            tags: format!("tag{i}, sample"),
            likes: i as u64,
            views: 10 * i as u64,
            comments: 0,
            downloads: 2 * i as u64,
        })
        .collect()
}

/// A recorded transport call: query, page, page size
pub type Call = (String, u32, u32);

/// Transport that answers from a fixed script, in order
///
/// Runs out of script → returns a 500 status error.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<SearchPage, TransportError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<SearchPage, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchTransport for ScriptedTransport {
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchPage, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), page, page_size));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TransportError::Status {
                status: 500,
                body: "script exhausted".to_string(),
            }))
    }
}

/// Sender half that releases one gated transport call
pub type Gate = oneshot::Sender<Result<SearchPage, TransportError>>;

/// Transport whose calls block until the test releases them
///
/// Call N waits on gate N, in call order.
pub struct GatedTransport {
    gates: Mutex<VecDeque<oneshot::Receiver<Result<SearchPage, TransportError>>>>,
    calls: Mutex<Vec<Call>>,
}

impl GatedTransport {
    pub fn new(count: usize) -> (Self, Vec<Gate>) {
        let (senders, receivers): (Vec<_>, VecDeque<_>) =
            (0..count).map(|_| oneshot::channel()).unzip();
        let transport = Self {
            gates: Mutex::new(receivers),
            calls: Mutex::new(Vec::new()),
        };
        (transport, senders)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchTransport for GatedTransport {
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchPage, TransportError> {
        let gate = {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), page, page_size));
            self.gates.lock().unwrap().pop_front()
        };
        match gate {
            Some(rx) => rx.await.unwrap_or(Err(TransportError::Status {
                status: 503,
                body: "gate dropped".to_string(),
            })),
            None => Err(TransportError::Status {
                status: 500,
                body: "no gate left".to_string(),
            }),
        }
    }
}

/// Yield until the gated transport has seen `count` calls
pub async fn wait_for_calls(transport: &GatedTransport, count: usize) {
    while transport.calls().len() < count {
        tokio::task::yield_now().await;
    }
}

/// Everything a collaborator was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Render { count: usize, append: bool },
    ScrollHint,
    Refresh,
    Notify(Notification),
}

/// Renderer, viewer and notifier that just record calls
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Renderer for Recorder {
    fn render(&self, items: &[ImageResult], append: bool) {
        self.push(Event::Render {
            count: items.len(),
            append,
        });
    }

    fn continue_scroll(&self) {
        self.push(Event::ScrollHint);
    }
}

impl Viewer for Recorder {
    fn refresh(&self) {
        self.push(Event::Refresh);
    }
}

impl Notifier for Recorder {
    fn notify(&self, notification: Notification) {
        self.push(Event::Notify(notification));
    }
}
