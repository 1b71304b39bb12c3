//! Reward commands.

use planetsmart_core::RewardId;
use planetsmart_storefront::config::StorefrontConfig;
use planetsmart_storefront::error::AppError;
use planetsmart_storefront::services::auth::AuthError;
use planetsmart_storefront::services::points::PointsPolicy;
use planetsmart_storefront::services::rewards::{MilestoneProgress, can_claim, rewards};

use super::open_session;

/// List every reward, marking the ones the balance unlocks.
///
/// # Errors
///
/// Returns `AuthError::Storage` if the saved session cannot be read.
#[allow(clippy::print_stdout)]
pub async fn list(config: &StorefrontConfig) -> Result<(), AuthError> {
    let session = open_session(config).await?;
    let balance = session.points();
    let progress = MilestoneProgress::for_balance(balance);

    println!(
        "{balance} EcoPoints  ({}/{} to next milestone, {}%)",
        progress.current,
        progress.target,
        progress.percent()
    );
    for reward in rewards() {
        let state = if can_claim(reward, balance) {
            "Claim Reward".to_string()
        } else {
            format!("Need {} Points", reward.cost)
        };
        println!(
            "#{} {:<22} {:>5} pts  {:<10} {}",
            reward.id.as_i64(),
            reward.title,
            reward.cost,
            reward.rarity.to_string().to_uppercase(),
            state
        );
    }
    Ok(())
}

/// Redeem a reward for the signed-in member.
///
/// # Errors
///
/// Returns `AppError::Auth` if nobody is signed in.
/// Returns `AppError::Reward` if the reward is unknown or locked.
#[allow(clippy::print_stdout)]
pub async fn claim(config: &StorefrontConfig, id: RewardId) -> Result<(), AppError> {
    let mut session = open_session(config).await?;
    if !session.is_authenticated() {
        return Err(AuthError::NotSignedIn.into());
    }

    let reward = session.claim_reward(id).await?;
    println!(
        "Claimed {}! {} EcoPoints left.",
        reward.title,
        session.points()
    );
    if config.points_policy == PointsPolicy::Ephemeral {
        println!("(points policy is ephemeral; the balance was not saved)");
    }
    Ok(())
}
