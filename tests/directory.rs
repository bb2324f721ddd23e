mod common;

use community_pharmacy_api::{
    core::{
        auth::verify_password,
        directory::{NewUser, UserChanges, create_user, delete_user, resolve_scope, update_user},
    },
    error::AppError,
    models::{Role, Snapshot, User},
    seed::{initial_snapshot, reference_data},
    services::user_service,
};

use common::{seeded_state, sign_in};

fn user<'a>(snapshot: &'a Snapshot, id: &str) -> &'a User {
    snapshot.users.iter().find(|u| u.id == id).expect("seeded user")
}

fn new_user(username: &str, role: Role) -> NewUser {
    NewUser {
        username: username.into(),
        password: Some("Clave.2024".into()),
        role: Some(role),
        ..Default::default()
    }
}

#[test]
fn self_deletion_is_refused_before_anything_else() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();

    let err = delete_user(
        user(&snapshot, "cmanager-a"),
        &snapshot.users,
        "cmanager-a",
        &reference,
    )
    .expect_err("self deletion");
    assert!(matches!(err, AppError::SelfDeletion));

    // Drivers cannot manage users, but deleting themselves still reports self deletion.
    let err = delete_user(user(&snapshot, "driver-a"), &snapshot.users, "driver-a", &reference)
        .expect_err("self deletion");
    assert!(matches!(err, AppError::SelfDeletion));
    Ok(())
}

#[tokio::test]
async fn self_deletion_leaves_the_directory_unchanged() -> anyhow::Result<()> {
    let state = seeded_state()?;
    let admin = sign_in(&state, "cmanager-a").await?;

    let err = user_service::delete_user(&state, &admin, "cmanager-a")
        .await
        .expect_err("self deletion");
    assert!(matches!(err, AppError::SelfDeletion));
    assert_eq!(state.store.snapshot().await?.users.len(), 7);
    Ok(())
}

#[tokio::test]
async fn deleting_a_user_ends_its_sessions() -> anyhow::Result<()> {
    let state = seeded_state()?;
    let admin = sign_in(&state, "cmanager-a").await?;
    let driver = sign_in(&state, "driver-a").await?;

    let removed = user_service::delete_user(&state, &admin, "driver-a")
        .await?
        .data
        .expect("removed user");
    assert_eq!(removed.username, "da");

    let snapshot = state.store.snapshot().await?;
    assert_eq!(snapshot.users.len(), 6);
    assert!(snapshot.users.iter().all(|u| u.id != "driver-a"));
    assert!(state.sessions.get(driver.session_id).await.is_none());
    Ok(())
}

#[test]
fn delete_outside_scope_is_not_found() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();

    let err = delete_user(
        user(&snapshot, "zmanager-norte"),
        &snapshot.users,
        "cmanager-c",
        &reference,
    )
    .expect_err("other zone");
    assert!(matches!(err, AppError::NotFound));

    let err = delete_user(user(&snapshot, "driver-a"), &snapshot.users, "admin-01", &reference)
        .expect_err("drivers manage nobody");
    assert!(matches!(err, AppError::Unauthorized));
    Ok(())
}

#[test]
fn usernames_are_unique_ignoring_case() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();
    let admin = user(&snapshot, "cmanager-a");

    let mut fields = new_user("CB", Role::CommunityManager);
    fields.community_id = Some("com-b".into());
    let err = create_user(admin, &snapshot.users, fields, &reference).expect_err("duplicate");
    assert!(matches!(err, AppError::DuplicateUsername));
    Ok(())
}

#[test]
fn password_is_required_on_create() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();

    let mut fields = new_user("nuevo", Role::Driver);
    fields.password = Some("   ".into());
    let err = create_user(user(&snapshot, "admin-01"), &snapshot.users, fields, &reference)
        .expect_err("blank password");
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[test]
fn community_manager_hands_down_its_own_scope() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();
    let manager = user(&snapshot, "admin-01");

    let mut fields = new_user("chofer2", Role::Driver);
    fields.approved = Some(true);
    let created = create_user(manager, &snapshot.users, fields, &reference)?;

    assert!(created.id.starts_with("user-"));
    assert_eq!(created.name, "Nuevo Usuario");
    assert_eq!(created.community_id.as_deref(), Some("com-a"));
    assert_eq!(created.zone_id.as_deref(), Some("zona-norte"));
    assert!(!created.approved);
    assert!(verify_password("Clave.2024", &created.password_hash)?);

    let err = create_user(
        manager,
        &snapshot.users,
        new_user("zona", Role::ZoneManager),
        &reference,
    )
    .expect_err("community managers cannot create zone managers");
    assert!(matches!(err, AppError::Unauthorized));
    Ok(())
}

#[test]
fn zone_manager_scope_must_stay_inside_its_zone() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();
    let north = user(&snapshot, "zmanager-norte");

    let err = resolve_scope(north, Role::CommunityManager, None, None, &reference)
        .expect_err("community required");
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = resolve_scope(north, Role::CommunityManager, Some("com-c"), None, &reference)
        .expect_err("southern community");
    assert!(matches!(err, AppError::Unauthorized));

    let scope = resolve_scope(north, Role::CommunityManager, Some("com-b"), None, &reference)?;
    assert_eq!(scope, (Some("com-b".into()), Some("zona-norte".into())));

    let scope = resolve_scope(north, Role::ZoneManager, None, None, &reference)?;
    assert_eq!(scope, (None, Some("zona-norte".into())));

    let admin = user(&snapshot, "cmanager-a");
    assert_eq!(
        resolve_scope(admin, Role::Administrator, Some("com-a"), None, &reference)?,
        (None, None)
    );
    Ok(())
}

#[test]
fn only_administrators_approve() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();

    let mut fields = new_user("aprobado", Role::ZoneManager);
    fields.zone_id = Some("zona-sur".into());
    fields.approved = Some(true);
    let created = create_user(user(&snapshot, "cmanager-a"), &snapshot.users, fields, &reference)?;
    assert!(created.approved);

    let mut fields = new_user("pendiente", Role::CommunityManager);
    fields.community_id = Some("com-b".into());
    fields.approved = Some(true);
    let created =
        create_user(user(&snapshot, "zmanager-norte"), &snapshot.users, fields, &reference)?;
    assert!(!created.approved);
    Ok(())
}

#[test]
fn update_keeps_password_and_scope_when_untouched() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();
    let target = user(&snapshot, "cmanager-c");

    let changes = UserChanges {
        name: "Encargada C".into(),
        email: target.email.clone(),
        username: target.username.clone(),
        password: Some(String::new()),
        role: target.role,
        approved: true,
        community_id: target.community_id.clone(),
        zone_id: target.zone_id.clone(),
    };

    let updated = update_user(
        user(&snapshot, "zmanager-sur"),
        &snapshot.users,
        "cmanager-c",
        changes.clone(),
        &reference,
    )?;
    assert_eq!(updated.name, "Encargada C");
    assert_eq!(updated.password_hash, target.password_hash);
    assert_eq!(updated.community_id.as_deref(), Some("com-c"));
    // Zone managers cannot approve.
    assert!(!updated.approved);

    let approved = update_user(
        user(&snapshot, "cmanager-a"),
        &snapshot.users,
        "cmanager-c",
        changes,
        &reference,
    )?;
    assert!(approved.approved);
    Ok(())
}

#[test]
fn update_rejects_taken_username() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();
    let target = user(&snapshot, "driver-a");

    let changes = UserChanges {
        name: target.name.clone(),
        email: target.email.clone(),
        username: "Admin".into(),
        password: None,
        role: target.role,
        approved: target.approved,
        community_id: target.community_id.clone(),
        zone_id: target.zone_id.clone(),
    };
    let err = update_user(
        user(&snapshot, "admin-01"),
        &snapshot.users,
        "driver-a",
        changes,
        &reference,
    )
    .expect_err("taken");
    assert!(matches!(err, AppError::DuplicateUsername));
    Ok(())
}
