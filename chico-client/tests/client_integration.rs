// chico-client/tests/client_integration.rs
// 集成测试：会话持久化与客户端构造

use chico_client::{ChicoClient, Client, ClientConfig, Session, SessionStore, User, UserRole};
use tempfile::TempDir;

fn test_user() -> User {
    User {
        id: "u1".to_string(),
        email: "user@example.com".to_string(),
        name: "Test User".to_string(),
        phone: "+380 67 987 6543".to_string(),
        role: UserRole::User,
        created_at: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn test_session_storage_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = SessionStore::new(temp_dir.path(), "session.json");

    assert!(!store.exists());
    assert!(store.load().is_none());

    let session = Session::new("jwt-token", test_user());
    store.save(&session).unwrap();
    assert!(store.exists());

    let loaded = store.load().unwrap();
    assert_eq!(loaded.token, "jwt-token");
    assert_eq!(loaded.user.email, "user@example.com");
    assert_eq!(loaded.user.role, UserRole::User);
}

#[tokio::test]
async fn test_session_clear_invalidates_token_and_user_together() {
    let temp_dir = TempDir::new().unwrap();
    let store = SessionStore::new(temp_dir.path(), "session.json");

    store.save(&Session::new("jwt-token", test_user())).unwrap();
    assert!(store.exists());

    store.clear().unwrap();
    assert!(!store.exists());
    assert!(store.load().is_none());

    // Clearing twice is fine
    store.clear().unwrap();
}

#[tokio::test]
async fn test_corrupt_session_file_counts_as_no_session() {
    let temp_dir = TempDir::new().unwrap();
    let store = SessionStore::new(temp_dir.path(), "session.json");

    std::fs::write(store.path(), "not json at all").unwrap();
    assert!(store.exists());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn test_network_client_creation() {
    let client = ChicoClient::network("http://localhost:8081");
    assert!(client.token().is_none());
}

#[tokio::test]
async fn test_network_client_restores_token_from_config() {
    let config = ClientConfig::new("http://localhost:8081").with_token("persisted-token");
    let client = ChicoClient::with_config(&config);
    assert_eq!(client.token(), Some("persisted-token"));
}
