//! Use case tests against the in-memory store

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use platform::token::TokenError;

use crate::application::{
    AuthenticateUseCase, SignUpInput, SignUpUseCase, TokenAuthInput, TokenAuthUseCase,
};
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_name::UserName};
use crate::{
    AuthConfig, AuthError, AuthResult, AuthStore, MemoryAuthRepository, UserLoader, Viewer,
    resolve_viewer,
};

fn setup() -> (Arc<AuthStore>, Arc<AuthConfig>) {
    let store = Arc::new(AuthStore::from(MemoryAuthRepository::new()));
    let config = Arc::new(AuthConfig::with_secret(b"test-secret".to_vec()));
    (store, config)
}

fn sign_up_input(name: &str) -> SignUpInput {
    SignUpInput {
        user_name: name.to_string(),
        email: format!("{name}@example.com"),
        password: "correct horse battery".to_string(),
    }
}

async fn obtain_token(store: &Arc<AuthStore>, config: &Arc<AuthConfig>, name: &str) -> String {
    TokenAuthUseCase::new(store.clone(), config.clone())
        .execute(TokenAuthInput {
            user_name: name.to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap()
        .token
}

fn auth_header(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    headers
}

#[tokio::test]
async fn test_sign_up_then_token_auth() {
    let (store, config) = setup();

    let user = SignUpUseCase::new(store.clone(), config.clone())
        .execute(sign_up_input("alice"))
        .await
        .unwrap();
    assert_eq!(user.user_name.as_str(), "alice");
    assert!(user.last_login.is_none());

    let output = TokenAuthUseCase::new(store.clone(), config.clone())
        .execute(TokenAuthInput {
            user_name: "alice".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(output.claims.username, "alice");
    assert_eq!(output.claims.exp - output.claims.orig_iat, 300);
    assert_eq!(output.refresh_expires_in - output.claims.orig_iat, 604_800);

    // last_login recorded
    let stored = store.find_by_id(&user.user_id).await.unwrap().unwrap();
    assert!(stored.last_login.is_some());
}

#[tokio::test]
async fn test_duplicate_user_name_rejected() {
    let (store, config) = setup();
    let use_case = SignUpUseCase::new(store.clone(), config.clone());

    use_case.execute(sign_up_input("alice")).await.unwrap();
    let err = use_case.execute(sign_up_input("alice")).await.unwrap_err();

    assert!(matches!(err, AuthError::UserNameTaken));
    assert_eq!(err.kind().graphql_code(), "ValidationError");

    // No second row
    let ids = store.ids_by_user_name_contains("alice").await.unwrap();
    assert_eq!(ids.len(), 1);
}

#[tokio::test]
async fn test_sign_up_validation() {
    let (store, config) = setup();
    let use_case = SignUpUseCase::new(store.clone(), config.clone());

    let mut input = sign_up_input("bob");
    input.password = "short".to_string();
    assert!(matches!(
        use_case.execute(input).await,
        Err(AuthError::Validation(_))
    ));

    let mut input = sign_up_input("bob");
    input.email = "not-an-email".to_string();
    assert!(matches!(
        use_case.execute(input).await,
        Err(AuthError::Validation(_))
    ));

    assert!(matches!(
        use_case.execute(sign_up_input("has space")).await,
        Err(AuthError::Validation(_))
    ));

    let name = UserName::new("bob").unwrap();
    assert!(!store.exists_by_user_name(&name).await.unwrap());
}

#[tokio::test]
async fn test_token_auth_wrong_password() {
    let (store, config) = setup();
    SignUpUseCase::new(store.clone(), config.clone())
        .execute(sign_up_input("alice"))
        .await
        .unwrap();

    let err = TokenAuthUseCase::new(store.clone(), config.clone())
        .execute(TokenAuthInput {
            user_name: "alice".to_string(),
            password: "wrong password".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(err.kind().graphql_code(), "AuthenticationError");
}

#[tokio::test]
async fn test_token_auth_unknown_user() {
    let (store, config) = setup();
    let err = TokenAuthUseCase::new(store.clone(), config.clone())
        .execute(TokenAuthInput {
            user_name: "nobody".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));

    // Malformed names take the same path
    let err = TokenAuthUseCase::new(store, config)
        .execute(TokenAuthInput {
            user_name: "no body!".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_authenticate_round_trip() {
    let (store, config) = setup();
    SignUpUseCase::new(store.clone(), config.clone())
        .execute(sign_up_input("alice"))
        .await
        .unwrap();
    let token = obtain_token(&store, &config, "alice").await;

    let user = AuthenticateUseCase::new(store.clone(), config.clone())
        .execute(&token)
        .await
        .unwrap();
    assert_eq!(user.user_name.as_str(), "alice");
}

#[tokio::test]
async fn test_authenticate_rejects_expired_token() {
    let (store, config) = setup();
    SignUpUseCase::new(store.clone(), config.clone())
        .execute(sign_up_input("alice"))
        .await
        .unwrap();

    let issued_at = chrono::Utc::now().timestamp() - 3600;
    let (token, _) = config
        .signer()
        .issue_at("alice", issued_at, Duration::from_secs(300))
        .unwrap();

    let err = AuthenticateUseCase::new(store, config)
        .execute(&token)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Token(TokenError::Expired)));
}

#[tokio::test]
async fn test_resolve_viewer() {
    let (store, config) = setup();
    SignUpUseCase::new(store.clone(), config.clone())
        .execute(sign_up_input("alice"))
        .await
        .unwrap();
    let token = obtain_token(&store, &config, "alice").await;

    let viewer = resolve_viewer(&HeaderMap::new(), &store, &config).await;
    assert!(matches!(viewer, Viewer::Anonymous));

    for prefix in ["JWT", "Bearer"] {
        let headers = auth_header(&format!("{prefix} {token}"));
        let viewer = resolve_viewer(&headers, &store, &config).await;
        assert_eq!(viewer.user().unwrap().user_name.as_str(), "alice");
    }

    let viewer = resolve_viewer(&auth_header("JWT garbage"), &store, &config).await;
    assert!(matches!(viewer, Viewer::Rejected(TokenError::Invalid)));
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let (store, config) = setup();
    SignUpUseCase::new(store.clone(), config.clone())
        .execute(sign_up_input("alice"))
        .await
        .unwrap();
    let token = obtain_token(&store, &config, "alice").await;

    let other = Arc::new(AuthConfig::with_secret(b"other-secret".to_vec()));
    let viewer = resolve_viewer(&auth_header(&format!("JWT {token}")), &store, &other).await;
    assert!(matches!(viewer, Viewer::Rejected(TokenError::Invalid)));
}

/// Store whose every call fails as if the database were down
struct UnavailableUsers;

impl UserRepository for UnavailableUsers {
    async fn create(&self, _user: &NewUser) -> AuthResult<User> {
        Err(AuthError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_id(&self, _user_id: &UserId) -> AuthResult<Option<User>> {
        Err(AuthError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_ids(&self, _user_ids: &[UserId]) -> AuthResult<Vec<User>> {
        Err(AuthError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_user_name(&self, _user_name: &UserName) -> AuthResult<Option<User>> {
        Err(AuthError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn exists_by_user_name(&self, _user_name: &UserName) -> AuthResult<bool> {
        Err(AuthError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ids_by_user_name_contains(&self, _fragment: &str) -> AuthResult<Vec<UserId>> {
        Err(AuthError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn record_login(&self, _user_id: &UserId, _at: DateTime<Utc>) -> AuthResult<()> {
        Err(AuthError::Database(sqlx::Error::PoolTimedOut))
    }
}

#[tokio::test]
async fn test_storage_failure_is_not_a_token_error() {
    let config = Arc::new(AuthConfig::with_secret(b"test-secret".to_vec()));
    let (token, _) = config
        .signer()
        .issue("alice", config.jwt_expiration)
        .unwrap();

    let store = Arc::new(UnavailableUsers);
    let viewer = resolve_viewer(&auth_header(&format!("JWT {token}")), &store, &config).await;
    assert!(matches!(viewer, Viewer::Failed(_)));

    let err = viewer.require_user().unwrap_err();
    assert_eq!(err.kind().graphql_code(), "InternalError");
}

// ============================================================================
// Loaders
// ============================================================================

#[tokio::test]
async fn test_user_loader_batches_known_ids() {
    use async_graphql::dataloader::Loader;

    let (store, config) = setup();
    let sign_up = SignUpUseCase::new(store.clone(), config.clone());
    let alice = sign_up.execute(sign_up_input("alice")).await.unwrap();
    let bob = sign_up.execute(sign_up_input("bob")).await.unwrap();

    let found = UserLoader::new(store)
        .load(&[bob.user_id, alice.user_id, UserId::from_i64(999)])
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found[&alice.user_id].user_name.as_str(), "alice");
    assert_eq!(found[&bob.user_id].user_name.as_str(), "bob");
}
