//! Common test utilities for integration tests.
//!
//! Provides recorded-event fixtures and a helper that starts a `wiremock`
//! server shaped like the dataset server.
//!
//! # Example
//!
//! ```ignore
//! let server = DatasetServer::start().await;
//! server.mount_ndjson("/events/i1", &[MESSAGE, COMMAND]).await;
//! let client = server.client(FailurePolicy::Soft);
//! ```

#![allow(dead_code)]

use explorer::adapters::ReqwestHttpClient;
use explorer::client::DatasetClient;
use explorer::config::{ExplorerConfig, FailurePolicy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MESSAGE: &str = r#"{"combat_id":"c9","event_type":"message","timestamp":1660000000.5,"message_id":9223372036854775807,"author_id":"187421759484592128","author_name":"Vex","created_at":1660000000.25,"content":"I loose an arrow at the ogre.","embeds":[],"components":[]}"#;

pub const COMMAND: &str = r#"{"combat_id":"c9","event_type":"command","timestamp":1660000002,"message_id":"18446744073709551615","author_id":187421759484592128,"author_name":"Vex","created_at":1660000002,"content":"!a longbow -t ogre","embeds":[],"components":[],"referenced_message_id":9223372036854775807,"prefix":"!","command_name":"attack","called_by_alias":false,"caster":{"name":"Vex"},"targets":[{"name":"Ogre"}]}"#;

pub const BUTTON: &str = r#"{"combat_id":"c9","event_type":"button_press","timestamp":1660000003,"interaction_id":1008765432109876546,"interaction_message_id":1008765432109876547,"author_id":"187421759484592128","author_name":"Vex","button_id":"end_turn","button_label":"End Turn"}"#;

pub const COMBAT_STATE: &str = r#"{"combat_id":"c9","event_type":"combat_state_update","timestamp":1660000005,"probable_interaction_id":1008765432109876546,"data":{"round_num":3,"combatants":[]},"human_readable":"Round 3: Ogre"}"#;

pub const AUTOMATION: &str = r#"{"combat_id":"c9","event_type":"automation_run","timestamp":1660000004,"interaction_id":1008765432109876548,"automation":[{"type":"target","target":"all"}],"automation_result":{"children":[]},"caster":null,"targets":null}"#;

/// Join records into an NDJSON body with a trailing newline.
pub fn ndjson(records: &[&str]) -> String {
    records.iter().map(|record| format!("{}\n", record)).collect()
}

/// Base URL of a local port that nothing listens on.
///
/// The port is taken from a listener that is closed again before returning,
/// so connecting to it is refused.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind port");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{}", addr)
}

/// A `wiremock` server serving dataset endpoints.
pub struct DatasetServer {
    pub server: MockServer,
}

impl DatasetServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Serve `body` with the given status at `route`.
    pub async fn mount(&self, route: &str, status: u16, body: impl Into<String>) {
        Mock::given(method("GET"))
            .and(path(route.to_string()))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_raw(body.into(), "application/x-ndjson"),
            )
            .mount(&self.server)
            .await;
    }

    /// Serve `records` as NDJSON at `route`.
    pub async fn mount_ndjson(&self, route: &str, records: &[&str]) {
        self.mount(route, 200, ndjson(records)).await;
    }

    pub fn config(&self, policy: FailurePolicy) -> ExplorerConfig {
        ExplorerConfig::new(self.uri()).with_failure_policy(policy)
    }

    pub fn client(&self, policy: FailurePolicy) -> DatasetClient<ReqwestHttpClient> {
        DatasetClient::new(ReqwestHttpClient::new(), self.config(policy))
    }
}
