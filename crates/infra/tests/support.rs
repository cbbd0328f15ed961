//! Shared fixtures for the infra integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use chainverdict_core::{Navigator, SessionStore};
use chainverdict_domain::constants::TOKEN_STORAGE_KEY;
use chainverdict_domain::ApiConfig;
use chainverdict_infra::{MemorySessionStore, RequestClient};
use wiremock::{Request, Respond, ResponseTemplate};

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness so it shows on failure
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("chainverdict_infra=debug"))
            .with_test_writer()
            .try_init();
    });
}

/// Navigator that counts how often it was asked to move
#[derive(Default)]
pub struct CountingNavigator {
    count: AtomicUsize,
    paths: Mutex<Vec<String>>,
}

impl CountingNavigator {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().expect("navigator mutex poisoned").clone()
    }
}

impl Navigator for CountingNavigator {
    fn navigate(&self, path: &str) {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.paths.lock().expect("navigator mutex poisoned").push(path.to_string());
    }
}

/// A client against `base_url` with an in-memory store and a counting
/// navigator, optionally pre-loaded with a token
pub struct TestClient {
    pub client: Arc<RequestClient>,
    pub store: Arc<MemorySessionStore>,
    pub navigator: Arc<CountingNavigator>,
}

impl TestClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        init_tracing();

        let store = Arc::new(MemorySessionStore::new());
        if let Some(token) = token {
            store.set(TOKEN_STORAGE_KEY, token).expect("memory store accepts writes");
        }
        let navigator = Arc::new(CountingNavigator::default());

        let client = RequestClient::builder()
            .config(ApiConfig { base_url: base_url.to_string(), ..Default::default() })
            .store(store.clone())
            .navigator(navigator.clone())
            .build()
            .expect("request client should build");

        Self { client: Arc::new(client), store, navigator }
    }
}

/// Responds with the request body as JSON
pub struct EchoBody;

impl Respond for EchoBody {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(request.body.clone(), "application/json")
    }
}
