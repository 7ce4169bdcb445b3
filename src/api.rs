//! Request layer: endpoint table, the transport seam, and reply classification.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::state::{
    Empty, GameViewState, HumanMove, Leaderboard, ModelChange, Player, Setup, VariantChange,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Server endpoints the controller talks to.
///
/// The legacy single-shot `/api/run` is deliberately absent: automated play is paced on
/// the client through repeated [`Endpoint::Move`] calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Init,
    Move,
    HumanMove,
    Reset,
    Model,
    Variant,
    Leaderboard,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Init => "/api/init",
            Endpoint::Move => "/api/move",
            Endpoint::HumanMove => "/api/human-move",
            Endpoint::Reset => "/api/reset",
            Endpoint::Model => "/api/model",
            Endpoint::Variant => "/api/variant",
            Endpoint::Leaderboard => "/api/leaderboard",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::Leaderboard => Method::Get,
            _ => Method::Post,
        }
    }

    #[cfg(test)]
    pub(crate) fn all() -> &'static [Endpoint] {
        &[
            Endpoint::Init,
            Endpoint::Move,
            Endpoint::HumanMove,
            Endpoint::Reset,
            Endpoint::Model,
            Endpoint::Variant,
            Endpoint::Leaderboard,
        ]
    }
}

/// A request as handed to the transport. POST bodies are already JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves bytes to the server and back. Failing to complete the exchange at all is the
/// only error a transport reports; status and payload checks happen in [`Api`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn exchange(&self, request: Outgoing) -> Result<Reply, String>;
}

pub struct Api<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> Api<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            config: config.clone(),
        }
    }

    pub async fn init(&self, setup: &Setup) -> Result<GameViewState, ApiError> {
        self.call(Endpoint::Init, Some(setup)).await
    }

    /// One automated move (`/api/move`).
    pub async fn advance(&self) -> Result<GameViewState, ApiError> {
        self.call(Endpoint::Move, Some(&Empty {})).await
    }

    pub async fn human_move(&self, choice: u32) -> Result<GameViewState, ApiError> {
        self.call(Endpoint::HumanMove, Some(&HumanMove { choice }))
            .await
    }

    pub async fn reset(&self, setup: &Setup) -> Result<GameViewState, ApiError> {
        self.call(Endpoint::Reset, Some(setup)).await
    }

    pub async fn change_model(
        &self,
        player: Player,
        model: &str,
    ) -> Result<GameViewState, ApiError> {
        self.call(Endpoint::Model, Some(&ModelChange { player, model }))
            .await
    }

    pub async fn change_variant(&self, variant: &str) -> Result<GameViewState, ApiError> {
        self.call(Endpoint::Variant, Some(&VariantChange { variant }))
            .await
    }

    pub async fn leaderboard(&self) -> Result<Leaderboard, ApiError> {
        self.call::<Empty, _>(Endpoint::Leaderboard, None).await
    }

    async fn call<B, R>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let name = endpoint.path();
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|source| ApiError::Malformed {
                endpoint: name,
                source,
            })?;
        let request = Outgoing {
            method: endpoint.method(),
            url: self.config.url(name),
            body,
        };
        tracing::debug!(endpoint = name, "sending request");

        let reply = self
            .transport
            .exchange(request)
            .await
            .map_err(|reason| ApiError::Network {
                endpoint: name,
                reason,
            })?;
        if !reply.is_success() {
            return Err(ApiError::Status {
                endpoint: name,
                status: reply.status,
            });
        }
        serde_json::from_str(&reply.body).map_err(|source| ApiError::Malformed {
            endpoint: name,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{trace, ScriptedTransport, Step};

    fn api(transport: &ScriptedTransport, base: &str) -> Api<ScriptedTransport> {
        let config = ClientConfig {
            api_base: base.to_string(),
            ..ClientConfig::default()
        };
        Api::new(transport.clone(), &config)
    }

    #[test]
    fn endpoint_inventory_is_stable() {
        let mut paths: Vec<&str> = Endpoint::all().iter().map(|e| e.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), 7);
        assert!(!paths.contains(&"/api/run"));

        let gets: Vec<_> = Endpoint::all()
            .iter()
            .filter(|e| e.method() == Method::Get)
            .collect();
        assert_eq!(gets, vec![&Endpoint::Leaderboard]);
    }

    #[tokio::test]
    async fn posts_json_bodies_under_the_configured_base() {
        let log = trace();
        let transport = ScriptedTransport::new(&log);
        transport.reply_json(serde_json::json!({ "can_move": true }));
        transport.reply_json(serde_json::json!({ "show_human": true }));

        let api = api(&transport, "http://arena.local/");
        let state = api.advance().await.unwrap();
        assert!(state.can_move);
        let state = api.human_move(3).await.unwrap();
        assert!(state.show_human);

        assert_eq!(
            log.borrow().as_slice(),
            &[
                Step::Request(Outgoing {
                    method: Method::Post,
                    url: "http://arena.local/api/move".into(),
                    body: Some("{}".into()),
                }),
                Step::Request(Outgoing {
                    method: Method::Post,
                    url: "http://arena.local/api/human-move".into(),
                    body: Some(r#"{"move":3}"#.into()),
                }),
            ]
        );
    }

    #[tokio::test]
    async fn leaderboard_is_a_bodyless_get() {
        let log = trace();
        let transport = ScriptedTransport::new(&log);
        transport.reply_json(serde_json::json!({ "ratings": [["A", "1200"]], "results": [] }));

        let board = api(&transport, "").leaderboard().await.unwrap();
        assert_eq!(board.ratings, vec![vec!["A", "1200"]]);
        assert_eq!(
            log.borrow()[0],
            Step::Request(Outgoing {
                method: Method::Get,
                url: "/api/leaderboard".into(),
                body: None,
            })
        );
    }

    #[tokio::test]
    async fn failures_are_classified() {
        let log = trace();
        let transport = ScriptedTransport::new(&log);
        transport.fail("connection refused");
        transport.reply_raw(502, "<html>bad gateway</html>");
        transport.reply_raw(200, "<html>not json</html>");
        let api = api(&transport, "");

        match api.advance().await {
            Err(ApiError::Network { endpoint, reason }) => {
                assert_eq!(endpoint, "/api/move");
                assert_eq!(reason, "connection refused");
            }
            other => panic!("expected network error, got {other:?}"),
        }
        match api.reset(&Setup::default()).await {
            Err(ApiError::Status { status, .. }) => assert_eq!(status, 502),
            other => panic!("expected status error, got {other:?}"),
        }
        match api.change_variant("a").await {
            Err(e @ ApiError::Malformed { .. }) => assert_eq!(e.endpoint(), "/api/variant"),
            other => panic!("expected malformed payload, got {other:?}"),
        }
    }
}
