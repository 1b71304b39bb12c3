//! Integration tests for the identity store through a full session.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::time::Duration;

use planetsmart_core::{EmailMatching, MembershipTier};
use planetsmart_integration_tests::{DEMO_ACCOUNTS, SwitchableStore, TestContext};
use planetsmart_storefront::config::StorefrontConfig;
use planetsmart_storefront::db::users::{DEMO_PASSWORD, InMemoryRoster};
use planetsmart_storefront::services::auth::{AuthError, AuthOutcome, Navigation};
use planetsmart_storefront::services::points::PointsPolicy;
use planetsmart_storefront::storage::{FileStore, KeyValueStore, MemoryStore, SESSION_USER_KEY};

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_succeeds_for_every_demo_account() {
    for (email, points) in DEMO_ACCOUNTS {
        let mut ctx = TestContext::new();
        let user = ctx.storefront.login(email, DEMO_PASSWORD).await.unwrap();
        assert_eq!(user.email.as_str(), email);
        assert_eq!(ctx.storefront.points(), points);
        assert!(ctx.storefront.is_authenticated());
    }
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let mut ctx = TestContext::new();
    let attempts = [
        ("shashank@gmail.com", "654321"),
        ("shashank@gmail.com", ""),
        ("stranger@gmail.com", DEMO_PASSWORD),
        ("", DEMO_PASSWORD),
        ("no-at-sign", "x"),
    ];

    let messages: Vec<String> = {
        let mut messages = Vec::new();
        for (email, password) in attempts {
            let result = ctx.storefront.login(email, password).await;
            assert!(matches!(result, Err(AuthError::InvalidCredentials)));
            messages.push(AuthOutcome::login(&result).message);
        }
        messages
    };

    assert!(messages.iter().all(|m| m == "Invalid email or password"));
    assert!(!ctx.storefront.is_authenticated());
    assert_eq!(ctx.storefront.points(), 0);
}

#[tokio::test]
async fn test_email_matching_is_configurable() {
    let mut exact = TestContext::new();
    assert!(exact.storefront.login("Harsh@Gmail.com", DEMO_PASSWORD).await.is_err());

    let config = StorefrontConfig {
        email_matching: EmailMatching::CaseInsensitive,
        ..StorefrontConfig::default()
    };
    let mut relaxed = TestContext::with_config(&config);
    let user = relaxed
        .storefront
        .login("Harsh@Gmail.com", DEMO_PASSWORD)
        .await
        .unwrap();
    assert_eq!(user.email.as_str(), "harsh@gmail.com");
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_login_leaves_session_untouched() {
    let config = StorefrontConfig {
        auth_latency: Duration::from_secs(1),
        ..StorefrontConfig::default()
    };
    let mut ctx = TestContext::with_config(&config);

    let attempt = tokio::time::timeout(
        Duration::from_millis(999),
        ctx.storefront.login("ishita@gmail.com", DEMO_PASSWORD),
    )
    .await;
    assert!(attempt.is_err());
    assert!(!ctx.storefront.is_authenticated());
    assert_eq!(ctx.storefront.points(), 0);

    // The same session can still log in afterwards.
    ctx.storefront
        .login("ishita@gmail.com", DEMO_PASSWORD)
        .await
        .unwrap();
    assert_eq!(ctx.storefront.points(), 2100);
}

// =============================================================================
// Signup
// =============================================================================

#[tokio::test]
async fn test_signup_with_existing_email_always_fails() {
    for (email, _) in DEMO_ACCOUNTS {
        let mut ctx = TestContext::new();
        let result = ctx.storefront.signup("Someone", email, "secret").await;
        let outcome = AuthOutcome::signup(&result);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Email already registered");
        assert!(!ctx.storefront.is_authenticated());
    }
}

#[tokio::test]
async fn test_signup_with_new_email_creates_starter_member() {
    let mut ctx = TestContext::new();
    let user = ctx
        .storefront
        .signup("Kavya", "kavya@example.com", "secret")
        .await
        .unwrap();

    assert_eq!(user.eco_points, 0);
    assert_eq!(user.stats.total_orders, 0);
    assert_eq!(user.stats.trees_saved, 0);
    assert_eq!(user.membership_tier, MembershipTier::EcoStarter);
    assert_eq!(user.badges, vec!["Newcomer".to_string()]);
    assert_eq!(user.favorite_category, "General");
    assert!(user.last_order.is_none());
    assert_eq!(ctx.storefront.points(), 0);

    // The new account is now registered.
    ctx.storefront.logout().await;
    assert!(matches!(
        ctx.storefront.signup("Kavya", "kavya@example.com", "x").await,
        Err(AuthError::UserAlreadyExists)
    ));
    ctx.storefront
        .login("kavya@example.com", "secret")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_back_to_back_signups_keep_accounts_apart() {
    let config = StorefrontConfig {
        points_policy: PointsPolicy::WriteBack,
        ..StorefrontConfig::default()
    };
    let roster = InMemoryRoster::demo();
    let mut first = TestContext::with_parts(&config, roster.clone(), MemoryStore::new());
    let mut second = TestContext::with_parts(&config, roster.clone(), MemoryStore::new());

    let mut ids = HashSet::new();
    for i in 0..50 {
        let a = first
            .storefront
            .signup("Asha", &format!("asha{i}@example.com"), &format!("pw-a{i}"))
            .await
            .unwrap();
        let b = second
            .storefront
            .signup("Bela", &format!("bela{i}@example.com"), &format!("pw-b{i}"))
            .await
            .unwrap();
        assert!(ids.insert(a.id));
        assert!(ids.insert(b.id));
        second.storefront.add_points(5).await.unwrap();
    }
    assert_eq!(roster.len().await, 4 + 100);

    let mut check = TestContext::with_parts(&config, roster, MemoryStore::new());
    for i in 0..50 {
        let a = check
            .storefront
            .login(&format!("asha{i}@example.com"), &format!("pw-a{i}"))
            .await
            .unwrap();
        assert_eq!(a.eco_points, 0);
        let b = check
            .storefront
            .login(&format!("bela{i}@example.com"), &format!("pw-b{i}"))
            .await
            .unwrap();
        assert_eq!(b.eco_points, 5);
        assert!(
            check
                .storefront
                .login(&format!("bela{i}@example.com"), &format!("pw-a{i}"))
                .await
                .is_err()
        );
    }
}

#[tokio::test]
async fn test_signup_without_snapshot_can_be_retried() {
    let roster = InMemoryRoster::demo();
    let store = SwitchableStore::new();
    let config = StorefrontConfig::default();
    let mut ctx = TestContext::with_parts(&config, roster.clone(), store.clone());

    store.set_read_only(true);
    let result = ctx
        .storefront
        .signup("Kavya", "kavya@example.com", "secret")
        .await;
    assert!(matches!(result, Err(AuthError::Storage(_))));
    assert!(!ctx.storefront.is_authenticated());
    assert_eq!(roster.len().await, 4);

    store.set_read_only(false);
    let user = ctx
        .storefront
        .signup("Kavya", "kavya@example.com", "secret")
        .await
        .unwrap();
    assert_eq!(ctx.storefront.current_user(), Some(&user));
}

// =============================================================================
// Logout and restore
// =============================================================================

#[tokio::test]
async fn test_logout_returns_to_auth_screen() {
    let mut ctx = TestContext::new();
    ctx.storefront
        .login("adarsh@gmail.com", DEMO_PASSWORD)
        .await
        .unwrap();

    assert_eq!(ctx.storefront.logout().await, Navigation::AuthScreen);
    assert!(ctx.storefront.current_user().is_none());
    assert_eq!(ctx.storefront.points(), 0);

    // Logging out twice is harmless.
    assert_eq!(ctx.storefront.logout().await, Navigation::AuthScreen);
}

#[tokio::test]
async fn test_session_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorefrontConfig::default();

    let mut first = TestContext::with_storage(&config, FileStore::new(dir.path()));
    let user = first
        .storefront
        .login("shashank@gmail.com", DEMO_PASSWORD)
        .await
        .unwrap();
    drop(first);

    let mut second = TestContext::with_storage(&config, FileStore::new(dir.path()));
    let restored = second.storefront.restore().await.unwrap().cloned();
    assert_eq!(restored, Some(user));
    assert_eq!(second.storefront.points(), 1250);

    second.storefront.logout().await;
    let mut third = TestContext::with_storage(&config, FileStore::new(dir.path()));
    assert!(third.storefront.restore().await.unwrap().is_none());
}

#[tokio::test]
async fn test_corrupt_snapshot_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store
        .set(SESSION_USER_KEY, r#"{"id": "not a user"}"#)
        .await
        .unwrap();

    let mut ctx = TestContext::with_storage(&StorefrontConfig::default(), store.clone());
    assert!(ctx.storefront.restore().await.unwrap().is_none());
    assert!(!ctx.storefront.is_authenticated());
    assert!(store.get(SESSION_USER_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_snapshot_uses_camel_case_fields() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let mut ctx = TestContext::with_storage(&StorefrontConfig::default(), store.clone());
    ctx.storefront
        .login("ishita@gmail.com", DEMO_PASSWORD)
        .await
        .unwrap();

    let raw = store.get(SESSION_USER_KEY).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["ecoPoints"], 2100);
    assert_eq!(json["membershipTier"], "Eco Master");
    assert_eq!(json["totalOrders"], 34);
}
