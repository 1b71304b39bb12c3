//! Session commands.

use planetsmart_core::User;
use planetsmart_storefront::config::StorefrontConfig;
use planetsmart_storefront::services::auth::{AuthError, AuthOutcome};

use super::open_session;

/// Log in and save the session.
///
/// # Errors
///
/// Returns `AuthError` if the credentials are rejected or the session cannot
/// be saved.
pub async fn login(config: &StorefrontConfig, email: &str, password: &str) -> Result<(), AuthError> {
    let mut session = open_session(config).await?;
    let result = session.login(email, password).await;
    print_outcome(&AuthOutcome::login(&result));
    result.map(|user| print_profile(&user))
}

/// Create an account and save the session.
///
/// # Errors
///
/// Returns `AuthError` if the form is invalid, the email is taken, or the
/// session cannot be saved.
pub async fn signup(
    config: &StorefrontConfig,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), AuthError> {
    let mut session = open_session(config).await?;
    let result = session.signup(name, email, password).await;
    print_outcome(&AuthOutcome::signup(&result));
    result.map(|user| print_profile(&user))
}

/// Forget the saved session.
///
/// # Errors
///
/// Returns `AuthError::Storage` if the saved session cannot be read.
#[allow(clippy::print_stdout)]
pub async fn logout(config: &StorefrontConfig) -> Result<(), AuthError> {
    let mut session = open_session(config).await?;
    session.logout().await;
    println!("Logged out.");
    Ok(())
}

/// Show the signed-in member.
///
/// # Errors
///
/// Returns `AuthError::NotSignedIn` if there is no saved session.
pub async fn whoami(config: &StorefrontConfig) -> Result<(), AuthError> {
    let session = open_session(config).await?;
    let user = session.current_user().ok_or(AuthError::NotSignedIn)?;
    print_profile(user);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_outcome(outcome: &AuthOutcome) {
    if outcome.success {
        println!("{}", outcome.message);
    }
}

#[allow(clippy::print_stdout)]
fn print_profile(user: &User) {
    println!("{} <{}>", user.name, user.email);
    println!("  tier:      {}", user.membership_tier);
    println!("  points:    {}", user.eco_points);
    println!("  joined:    {}", user.join_date);
    println!(
        "  orders:    {} (${} spent)",
        user.stats.total_orders, user.stats.total_spent
    );
    println!(
        "  impact:    {} trees, {} L water, {} kg CO2 offset",
        user.stats.trees_saved, user.stats.water_saved, user.stats.carbon_offset
    );
    if !user.badges.is_empty() {
        println!("  badges:    {}", user.badges.join(", "));
    }
}
