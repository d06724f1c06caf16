//! Test harness wiring the app to in-memory dependencies.
//!
//! Every test gets its own stores, clock and router; nothing is shared
//! between tests, so they can run in parallel without a database.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use playday_core::common::Actor;
use playday_core::domains::auth::JwtService;
use playday_core::kernel::{ServerDeps, TestDependencies};
use playday_core::server::{build_app, AxumAppState};
use test_context::AsyncTestContext;

use super::{fixed_now, HttpClient};

const TEST_JWT_SECRET: &str = "test-secret";
const TEST_JWT_ISSUER: &str = "playday-test";

pub fn init_tracing() {
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test harness that manages test dependencies.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &mut TestHarness) {
///     let deps = ctx.server_deps();
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// In-memory doubles; inspect these to assert on side effects.
    pub deps: TestDependencies,
    pub jwt_service: Arc<JwtService>,
    app: Router,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
    }

    async fn teardown(self) {
        // In-memory state is dropped with the harness
    }
}

impl TestHarness {
    /// Harness whose clock starts at `fixed_now()`.
    pub fn new() -> Self {
        Self::with_deps(TestDependencies::at(fixed_now()))
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self::with_deps(TestDependencies::at(now))
    }

    /// Harness over pre-configured dependencies (offset, matcher, limits).
    pub fn with_deps(deps: TestDependencies) -> Self {
        init_tracing();

        let jwt_service = Arc::new(JwtService::new(
            TEST_JWT_SECRET,
            TEST_JWT_ISSUER.to_string(),
        ));
        let state = AxumAppState::new(None, deps.server_deps(), jwt_service.clone());
        let app = build_app(state, &[]);

        Self {
            deps,
            jwt_service,
            app,
        }
    }

    /// Dependencies for calling actions directly.
    pub fn server_deps(&self) -> ServerDeps {
        self.deps.server_deps()
    }

    /// HTTP client against the full router.
    pub fn http(&self) -> HttpClient {
        HttpClient::new(self.app.clone())
    }

    /// Bearer token carrying `actor`'s identity and permissions.
    pub fn token_for(&self, actor: &Actor) -> String {
        self.jwt_service
            .create_token(
                actor.user_id(),
                actor.is_admin(),
                actor.permissions().to_vec(),
            )
            .expect("Failed to create test token")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
