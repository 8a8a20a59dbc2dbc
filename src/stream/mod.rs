//! Client-side chat session: token → provider stream → media sink.
//!
//! The provider's streaming SDK is reached only through two narrow traits:
//! a [`StreamConnector`] that opens an [`AvatarStream`] from a session token,
//! and the stream itself, which can be attached to a sink and stopped. The
//! [`ChatSession`] controller tracks the loading/active/failed state a page
//! shows and allows a retry after failure.

mod backend;

pub use backend::BackendTokenSource;

use crate::session::{SessionInitiator, SessionParams, SessionToken};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;

/// Where decoded audio/video should be rendered (e.g. a video element id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSink {
    pub element_id: String,
}

impl MediaSink {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }
}

/// Opaque handle to a live provider stream.
#[async_trait]
pub trait AvatarStream: Send {
    async fn attach(&mut self, sink: &MediaSink) -> Result<()>;
    async fn stop(&mut self) -> Result<()>;
}

/// Opens provider streams from session tokens.
#[async_trait]
pub trait StreamConnector: Send + Sync {
    async fn connect(&self, token: &SessionToken) -> Result<Box<dyn AvatarStream>>;
}

/// Supplies session tokens to the client.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_token(&self, params: &SessionParams) -> Result<SessionToken>;
}

#[async_trait]
impl TokenSource for SessionInitiator {
    async fn fetch_token(&self, params: &SessionParams) -> Result<SessionToken> {
        self.initiate(params).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Active,
    Failed(String),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SessionState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

pub struct ChatSession<T, C> {
    tokens: T,
    connector: C,
    params: SessionParams,
    state: SessionState,
    stream: Option<Box<dyn AvatarStream>>,
}

impl<T: TokenSource, C: StreamConnector> ChatSession<T, C> {
    pub fn new(tokens: T, connector: C) -> Self {
        Self {
            tokens,
            connector,
            params: SessionParams::default(),
            state: SessionState::Idle,
            stream: None,
        }
    }

    pub fn with_params(mut self, params: SessionParams) -> Self {
        self.params = params;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Fetch a token, open the stream and attach it to `sink`.
    ///
    /// Allowed from `Idle` and `Failed` (a retry). Any failure leaves the
    /// session in `Failed` with the error's message. `Loading` on entry means
    /// an earlier `start` future was dropped before finishing; since `start`
    /// holds `&mut self`, nothing else can be in flight, so it starts over.
    pub async fn start(&mut self, sink: &MediaSink) -> Result<()> {
        match self.state {
            SessionState::Idle | SessionState::Failed(_) => {}
            SessionState::Loading => {
                tracing::warn!(sink = %sink.element_id, "previous start was cancelled; starting again");
            }
            SessionState::Active => {
                return Err(Error::stream_with_context(
                    "session already started",
                    ErrorContext::new()
                        .with_source("chat_session")
                        .with_details(format!("{:?}", SessionState::Active)),
                ));
            }
        }

        self.state = SessionState::Loading;
        match self.open(sink).await {
            Ok(stream) => {
                self.stream = Some(stream);
                self.state = SessionState::Active;
                tracing::info!(sink = %sink.element_id, "avatar stream active");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to start avatar session");
                self.state = SessionState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    async fn open(&self, sink: &MediaSink) -> Result<Box<dyn AvatarStream>> {
        let token = self.tokens.fetch_token(&self.params).await?;
        let mut stream = self.connector.connect(&token).await?;
        if let Err(e) = stream.attach(sink).await {
            // Don't leak a half-open stream.
            let _ = stream.stop().await;
            return Err(e);
        }
        Ok(stream)
    }

    /// Stop the active stream. Without one this only clears a `Loading` state
    /// left by a cancelled `start`.
    pub async fn stop(&mut self) -> Result<()> {
        let Some(mut stream) = self.stream.take() else {
            if self.state.is_loading() {
                self.state = SessionState::Idle;
            }
            return Ok(());
        };
        self.state = SessionState::Idle;
        stream.stop().await
    }
}
