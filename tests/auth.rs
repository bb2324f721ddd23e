mod common;

use chrono::Duration;
use community_pharmacy_api::{
    config::AppConfig,
    core::auth::authenticate,
    dto::auth::LoginRequest,
    error::AppError,
    models::Role,
    seed::initial_snapshot,
    services::auth_service::login_user,
    session::SessionRegistry,
    state::AppState,
};

use common::seeded_state;

#[test]
fn authentication_checks_run_in_order() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("Apamate.25")?;

    let err = authenticate("nadie", "Apamate.25", &snapshot.users).expect_err("unknown");
    assert!(matches!(err, AppError::UnknownUser));

    let err = authenticate("roble", "incorrecta", &snapshot.users).expect_err("bad password");
    assert!(matches!(err, AppError::InvalidCredentials));

    // Wrong password wins over pending approval.
    let err = authenticate("cc", "incorrecta", &snapshot.users).expect_err("bad password");
    assert!(matches!(err, AppError::InvalidCredentials));

    let err = authenticate("cc", "Apamate.25", &snapshot.users).expect_err("pending approval");
    assert!(matches!(err, AppError::NotApproved));

    let user = authenticate(" ROBLE ", "Apamate.25", &snapshot.users)?;
    assert_eq!(user.id, "cmanager-a");
    assert_eq!(user.role, Role::Administrator);
    assert_eq!(user.email, "ca@farmacia.com");
    Ok(())
}

#[tokio::test]
async fn login_returns_token_and_capabilities() -> anyhow::Result<()> {
    let state = seeded_state()?;

    let resp = login_user(
        &state,
        LoginRequest {
            username: "gnorte".into(),
            password: "Apamate.25".into(),
        },
    )
    .await?
    .data
    .expect("login data");

    assert!(resp.token.starts_with("Bearer "));
    assert_eq!(resp.session.user.id, "zmanager-norte");
    assert_eq!(resp.session.user.zone_id.as_deref(), Some("zona-norte"));
    assert!(resp.session.capabilities.inspect_routes);
    assert!(!resp.session.capabilities.place_orders);
    assert_eq!(
        resp.session.assignable_roles,
        [Role::ZoneManager, Role::CommunityManager, Role::Driver]
    );

    let audit = state.store.audit_log().await?;
    assert!(audit.iter().any(|e| e.action == "user_login"));
    Ok(())
}

#[tokio::test]
async fn rejected_login_opens_no_session() -> anyhow::Result<()> {
    let state = seeded_state()?;

    let err = login_user(
        &state,
        LoginRequest {
            username: "cc".into(),
            password: "Apamate.25".into(),
        },
    )
    .await
    .expect_err("pending approval");
    assert!(matches!(err, AppError::NotApproved));
    assert!(state.store.audit_log().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn session_expiry_past_the_calendar_is_an_error() -> anyhow::Result<()> {
    let sessions = SessionRegistry::new();

    let err = sessions
        .open("cmanager-a", Duration::hours(3_000_000_000))
        .await
        .expect_err("expiry out of range");
    assert!(matches!(err, AppError::Internal(_)));

    let session = sessions.open("cmanager-a", Duration::hours(8760)).await?;
    assert!(sessions.get(session.id).await.is_some());
    Ok(())
}

#[tokio::test]
async fn oversized_ttl_fails_login_without_a_session() -> anyhow::Result<()> {
    let state = AppState::seeded(AppConfig {
        session_ttl_hours: 3_000_000_000,
        ..AppConfig::for_tests()
    })?;

    let err = login_user(
        &state,
        LoginRequest {
            username: "roble".into(),
            password: "Apamate.25".into(),
        },
    )
    .await
    .expect_err("ttl out of range");
    assert!(matches!(err, AppError::Internal(_)));
    assert!(state.store.audit_log().await?.is_empty());
    Ok(())
}
