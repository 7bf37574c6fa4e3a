// tests/support/helpers.rs
use super::mocks;
use campus_core::application::commands::auth::{ClientContext, LoginCommand, LoginOutcome};
use campus_core::application::dto::AuthenticatedUser;
use campus_core::application::error::ApplicationResult;
use campus_core::application::ports::security::{PasswordHasher, TokenCodec};
use campus_core::application::ports::time::Clock;
use campus_core::application::services::ApplicationServices;
use campus_core::domain::audit::repository::AuditEntryRepository;
use campus_core::domain::session::SessionId;
use campus_core::domain::session::repository::SessionRepository;
use campus_core::domain::user::{Role, UserId, UserRepository};
use campus_core::infrastructure::security::token::HmacTokenCodec;
use campus_core::infrastructure::time::SystemClock;
use campus_core::presentation::http::state::HttpState;
use std::sync::Arc;

pub const ADMIN_EMAIL: &str = "admin@school.example";
pub const ADMIN_PASSWORD: &str = "admin-pw";
pub const STAFF_EMAIL: &str = "staff@school.example";
pub const STAFF_PASSWORD: &str = "staff-pw";
pub const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct TestHarness {
    pub services: Arc<ApplicationServices>,
    pub users: Arc<mocks::InMemoryUserRepo>,
    pub sessions: Arc<mocks::InMemorySessionRepo>,
    pub audit: Arc<mocks::InMemoryAuditRepo>,
}

impl TestHarness {
    pub async fn login(&self, email: &str, password: &str) -> ApplicationResult<LoginOutcome> {
        self.services
            .auth
            .login(
                LoginCommand {
                    email: email.into(),
                    password: password.into(),
                },
                client_context(),
            )
            .await
    }

    /// Principal for query-side calls; the role is what the services gate
    /// on, the session id only has to be well formed.
    pub fn admin_principal(&self) -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(1).unwrap(),
            email: ADMIN_EMAIL.into(),
            role: Role::Admin,
            session_id: SessionId::new(1).unwrap(),
        }
    }

    pub fn staff_principal(&self) -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(2).unwrap(),
            email: STAFF_EMAIL.into(),
            role: Role::Staff,
            session_id: SessionId::new(1).unwrap(),
        }
    }
}

pub fn client_context() -> ClientContext {
    ClientContext {
        url: Some("/api/v1/auth/login".into()),
        ip: Some("203.0.113.7".into()),
        user_agent: Some(CHROME_UA.into()),
    }
}

pub async fn build_harness() -> TestHarness {
    let users = Arc::new(mocks::InMemoryUserRepo::default());
    let sessions = Arc::new(mocks::InMemorySessionRepo::default());
    let audit = Arc::new(mocks::InMemoryAuditRepo::default());

    seed_users(&users).await;

    let services = build_services(
        Arc::clone(&users),
        Arc::clone(&sessions),
        Arc::clone(&audit) as Arc<dyn AuditEntryRepository>,
    );

    TestHarness {
        services,
        users,
        sessions,
        audit,
    }
}

/// Same harness but with an audit store that rejects every write, for the
/// escalation path.
pub async fn build_harness_with_failing_audit() -> TestHarness {
    let users = Arc::new(mocks::InMemoryUserRepo::default());
    let sessions = Arc::new(mocks::InMemorySessionRepo::default());
    let audit = Arc::new(mocks::InMemoryAuditRepo::default());

    seed_users(&users).await;

    let services = build_services(
        Arc::clone(&users),
        Arc::clone(&sessions),
        Arc::new(mocks::FailingAuditRepo) as Arc<dyn AuditEntryRepository>,
    );

    TestHarness {
        services,
        users,
        sessions,
        audit,
    }
}

async fn seed_users(users: &Arc<mocks::InMemoryUserRepo>) {
    // id 1
    users
        .insert(mocks::seed_user("admin", Role::Admin))
        .await
        .expect("seed admin");
    // id 2
    users
        .insert(mocks::seed_user("staff", Role::Staff))
        .await
        .expect("seed staff");
    // id 3, disabled account
    let mut dormant = mocks::seed_user("dormant", Role::Staff);
    dormant.is_active = false;
    users.insert(dormant).await.expect("seed dormant");
}

fn build_services(
    users: Arc<mocks::InMemoryUserRepo>,
    sessions: Arc<mocks::InMemorySessionRepo>,
    audit: Arc<dyn AuditEntryRepository>,
) -> Arc<ApplicationServices> {
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(mocks::MockPasswordHasher);
    let token_codec: Arc<dyn TokenCodec> = Arc::new(HmacTokenCodec::new(
        *b"test-secret-test-secret-test-sec",
    ));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    Arc::new(ApplicationServices::new(
        users as Arc<dyn UserRepository>,
        sessions as Arc<dyn SessionRepository>,
        audit,
        password_hasher,
        token_codec,
        clock,
    ))
}

pub async fn build_test_state() -> (HttpState, TestHarness) {
    let harness = build_harness().await;
    let state = HttpState {
        services: Arc::clone(&harness.services),
    };
    (state, harness)
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
