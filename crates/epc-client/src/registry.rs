//! The registry search seam.
//!
//! [`Registry`] is what the session and analysis code talk to. [`EpcClient`]
//! implements it over HTTP; [`MockRegistry`] replays scripted responses and
//! records every request for tests.
//!
//! [`EpcClient`]: crate::EpcClient

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use epc_core::{EpcError, Result, SearchParams, SearchResultPage};

/// Search access to the certificate registry.
///
/// `Ok(None)` means the registry answered successfully with an empty body.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Runs one search against the registry.
    async fn search(&self, params: &SearchParams) -> Result<Option<SearchResultPage>>;
}

#[async_trait]
impl<R: Registry + ?Sized> Registry for Arc<R> {
    async fn search(&self, params: &SearchParams) -> Result<Option<SearchResultPage>> {
        (**self).search(params).await
    }
}

/// A scripted failure for [`MockRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    /// Non-success HTTP status
    Status(u16),
    /// Body that is not valid JSON
    MalformedBody(String),
    /// Network-level failure
    Transport(String),
}

impl MockFailure {
    fn into_error(self) -> EpcError {
        match self {
            MockFailure::Status(status) => EpcError::RequestFailed {
                status,
                url: "mock://registry/search".to_string(),
            },
            MockFailure::MalformedBody(body) => match serde_json::from_str::<serde_json::Value>(&body) {
                Err(source) => EpcError::ParseFailed { source, body },
                Ok(_) => EpcError::transport(format!("scripted malformed body parsed: {body}")),
            },
            MockFailure::Transport(message) => EpcError::transport(message),
        }
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Page(Option<SearchResultPage>),
    Fail(MockFailure),
}

/// In-memory registry replaying queued responses in order.
///
/// Every call is recorded, including calls that fail. When the queue is
/// exhausted further calls fail with a transport error.
#[derive(Debug, Default)]
pub struct MockRegistry {
    responses: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<SearchParams>>,
}

impl MockRegistry {
    /// Creates a registry with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a page to be returned.
    pub fn with_page(self, page: SearchResultPage) -> Self {
        self.push(Scripted::Page(Some(page)));
        self
    }

    /// Queues an empty-body success.
    pub fn with_empty_body(self) -> Self {
        self.push(Scripted::Page(None));
        self
    }

    /// Queues a failure.
    pub fn with_failure(self, failure: MockFailure) -> Self {
        self.push(Scripted::Fail(failure));
        self
    }

    /// Parameters of every call made so far, in order.
    pub fn calls(&self) -> Vec<SearchParams> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of scripted responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn push(&self, scripted: Scripted) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(scripted);
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn search(&self, params: &SearchParams) -> Result<Option<SearchResultPage>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(params.clone());

        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match next {
            Some(Scripted::Page(page)) => Ok(page),
            Some(Scripted::Fail(failure)) => Err(failure.into_error()),
            None => Err(EpcError::transport("mock registry has no scripted response")),
        }
    }
}
