// tests/admin_test.rs — Integration test: admin login and inbox with a mock backend

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use hotelchat::backend::*;
use hotelchat::infra::errors::ClientError;
use hotelchat::session::admin::AdminSession;
use hotelchat::session::inbox::Role;
use hotelchat::session::notify::{EventLog, Level};

/// Accepts `admin`/`secret`; serves whatever page is currently loaded.
struct MockAdminBackend {
    page: Mutex<Result<Vec<ConversationRecord>, u16>>,
    seen_token: Mutex<Option<String>>,
    seen_limit: Mutex<Option<u32>>,
    login_calls: Mutex<u32>,
}

impl MockAdminBackend {
    fn new(records: Vec<ConversationRecord>) -> Self {
        Self {
            page: Mutex::new(Ok(records)),
            seen_token: Mutex::new(None),
            seen_limit: Mutex::new(None),
            login_calls: Mutex::new(0),
        }
    }

    fn fail_with(&self, status: u16) {
        *self.page.lock().unwrap() = Err(status);
    }

    fn serve(&self, records: Vec<ConversationRecord>) {
        *self.page.lock().unwrap() = Ok(records);
    }
}

#[async_trait]
impl Backend for MockAdminBackend {
    async fn chat(&self, _request: &ChatRequest) -> Result<ChatReply, ClientError> {
        unreachable!()
    }

    async fn book(&self, _request: &BookingRequest) -> Result<BookingResult, ClientError> {
        unreachable!()
    }

    async fn create_payment_intent(
        &self,
        _request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ClientError> {
        unreachable!()
    }

    async fn generate_invoice(&self, _request: &InvoiceRequest) -> Result<Invoice, ClientError> {
        unreachable!()
    }

    async fn admin_login(&self, request: &AdminLoginRequest) -> Result<AdminToken, ClientError> {
        *self.login_calls.lock().unwrap() += 1;
        if request.username == "admin" && request.password == "secret" {
            Ok(AdminToken {
                token: "tok-123".into(),
            })
        } else {
            Err(ClientError::Rejected {
                endpoint: "/admin/login".into(),
                status: 401,
                body: "{\"detail\":\"Invalid credentials\"}".into(),
            })
        }
    }

    async fn admin_chats(&self, token: &str, limit: u32) -> Result<ConversationPage, ClientError> {
        *self.seen_token.lock().unwrap() = Some(token.to_string());
        *self.seen_limit.lock().unwrap() = Some(limit);
        match &*self.page.lock().unwrap() {
            Ok(records) => Ok(ConversationPage {
                conversations: records.clone(),
                count: None,
            }),
            Err(500) => Err(ClientError::Transport {
                endpoint: "/admin/chats".into(),
                message: "connection reset".into(),
            }),
            Err(status) => Err(ClientError::Rejected {
                endpoint: "/admin/chats".into(),
                status: *status,
                body: String::new(),
            }),
        }
    }

    async fn hotels(&self, _max_price: Option<u32>) -> Result<HotelCatalogue, ClientError> {
        unreachable!()
    }

    async fn conversations(&self, _user_id: &str) -> Result<ConversationPage, ClientError> {
        unreachable!()
    }
}

fn rec(user: &str, role: &str, msg: &str, at: &str) -> ConversationRecord {
    ConversationRecord {
        user_id: user.into(),
        role: role.into(),
        message: msg.into(),
        created_at: Some(at.into()),
    }
}

fn sample() -> Vec<ConversationRecord> {
    vec![
        rec("A", "user", "a1", "2025-01-01T10:00:00"),
        rec("B", "user", "b1", "2025-01-01T10:02:00"),
        rec("A", "bot", "a2", "2025-01-01T10:05:00"),
    ]
}

fn admin_with(backend: Arc<MockAdminBackend>) -> (AdminSession, EventLog) {
    let log = EventLog::new();
    let admin = AdminSession::new(backend, log.sink(), 20);
    (admin, log)
}

#[tokio::test]
async fn test_empty_credentials_rejected_locally() {
    let backend = Arc::new(MockAdminBackend::new(sample()));
    let (mut admin, log) = admin_with(backend.clone());

    assert!(!admin.login("admin", "").await);
    assert!(!admin.login("  ", "secret").await);
    assert_eq!(*backend.login_calls.lock().unwrap(), 0);
    assert_eq!(
        log.notifications()[0].message,
        "Please enter username and password"
    );
}

#[tokio::test]
async fn test_wrong_password_keeps_session_logged_out() {
    let backend = Arc::new(MockAdminBackend::new(sample()));
    let (mut admin, log) = admin_with(backend);

    assert!(!admin.login("admin", "wrong").await);
    assert!(!admin.is_logged_in());
    assert!(!admin.is_dashboard_open());
    assert!(admin.inbox().is_none());
    let n = log.notifications();
    assert_eq!(n.last().unwrap().message, "Invalid credentials");
    assert_eq!(n.last().unwrap().level, Level::Error);
}

#[tokio::test]
async fn test_login_loads_grouped_inbox() {
    let backend = Arc::new(MockAdminBackend::new(sample()));
    let (mut admin, log) = admin_with(backend.clone());

    assert!(admin.login("admin", "secret").await);
    assert!(admin.is_dashboard_open());
    assert_eq!(backend.seen_token.lock().unwrap().as_deref(), Some("tok-123"));
    assert_eq!(*backend.seen_limit.lock().unwrap(), Some(20));
    assert_eq!(log.notifications()[0].message, "Logged in as admin");

    let inbox = admin.inbox().unwrap();
    let order: Vec<_> = inbox.threads.iter().map(|t| t.user_id.as_str()).collect();
    assert_eq!(order, vec!["A", "B"]);
    assert_eq!(inbox.total_records, 3);
    assert_eq!(inbox.active_users(), 2);

    let thread = admin.open_chat("A").unwrap();
    let texts: Vec<_> = thread.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["a1", "a2"]);
    assert_eq!(thread.messages[1].role, Role::Assistant);
    assert_eq!(admin.selected(), Some("A"));
}

#[tokio::test]
async fn test_unknown_thread_is_not_selected() {
    let backend = Arc::new(MockAdminBackend::new(sample()));
    let (mut admin, _log) = admin_with(backend);
    admin.login("admin", "secret").await;

    assert!(admin.open_chat("Z").is_none());
    assert_eq!(admin.selected(), None);
}

#[tokio::test]
async fn test_reload_failure_keeps_previous_inbox() {
    let backend = Arc::new(MockAdminBackend::new(sample()));
    let (mut admin, log) = admin_with(backend.clone());
    admin.login("admin", "secret").await;
    admin.open_chat("B");

    backend.fail_with(403);
    assert!(!admin.load_data().await);
    assert_eq!(
        log.notifications().last().unwrap().message,
        "Failed to load admin data"
    );
    assert_eq!(admin.inbox().unwrap().threads.len(), 2);
    assert_eq!(admin.selected(), Some("B"));

    backend.fail_with(500);
    assert!(!admin.load_data().await);
    assert!(log
        .notifications()
        .last()
        .unwrap()
        .message
        .starts_with("Error loading data: "));
    assert_eq!(admin.inbox().unwrap().threads.len(), 2);
}

#[tokio::test]
async fn test_reload_replaces_inbox_and_drops_stale_selection() {
    let backend = Arc::new(MockAdminBackend::new(sample()));
    let (mut admin, _log) = admin_with(backend.clone());
    admin.login("admin", "secret").await;
    admin.open_chat("B");

    backend.serve(vec![rec("C", "user", "c1", "2025-01-02T09:00:00")]);
    assert!(admin.load_data().await);

    let inbox = admin.inbox().unwrap();
    assert_eq!(inbox.threads.len(), 1);
    assert_eq!(inbox.threads[0].user_id, "C");
    assert_eq!(admin.selected(), None);
}

#[tokio::test]
async fn test_logout_discards_everything() {
    let backend = Arc::new(MockAdminBackend::new(sample()));
    let (mut admin, log) = admin_with(backend);
    admin.login("admin", "secret").await;
    admin.open_chat("A");

    admin.close_dashboard();
    assert!(!admin.is_logged_in());
    assert!(!admin.is_dashboard_open());
    assert!(admin.inbox().is_none());
    assert_eq!(admin.selected(), None);

    // Without a token nothing is fetched.
    assert!(!admin.load_data().await);
    assert_eq!(
        log.notifications().last().unwrap().message,
        "Not logged in as admin"
    );
}
