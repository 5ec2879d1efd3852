//! Shared setup for the HTTP integration tests.

use elevenlabs_lib::auth::{AuthHeader, ElevenLabsAuthentication};
use elevenlabs_lib::{ElevenLabsClient, ElevenLabsSettings};
use tempfile::TempDir;
use wiremock::MockServer;

pub const TEST_KEY: &str = "sk_test_key";

/// A mock server plus a client pointed at it, caching into a temp dir.
pub struct Harness {
    pub server: MockServer,
    pub client: ElevenLabsClient,
    pub cache: TempDir,
}

impl Harness {
    pub async fn start() -> Self {
        Self::with_auth_header(AuthHeader::default()).await
    }

    pub async fn with_auth_header(auth_header: AuthHeader) -> Self {
        let server = MockServer::start().await;
        let cache = tempfile::tempdir().unwrap();
        let settings = ElevenLabsSettings::default()
            .with_domain(server.uri())
            .with_cache_dir(cache.path())
            .with_auth_header(auth_header);
        let auth = ElevenLabsAuthentication::new(TEST_KEY).unwrap();
        let client = ElevenLabsClient::new(auth, settings).unwrap();
        Self {
            server,
            client,
            cache,
        }
    }
}
