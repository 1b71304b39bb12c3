//! In-memory account roster.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;

use planetsmart_core::{Email, EmailMatching, MembershipTier, User, UserId, UserStats};

use super::{CredentialRepository, RepositoryError};

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "123456";

/// An account: the public profile plus its password.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct CredentialRecord {
    pub user: User,
    password: SecretString,
}

impl CredentialRecord {
    /// Create a record.
    #[must_use]
    pub fn new(user: User, password: SecretString) -> Self {
        Self { user, password }
    }

    /// Whether `candidate` is this account's password.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.expose_secret() == candidate
    }
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Signup details for an account that does not exist yet.
#[derive(Debug)]
pub struct NewAccount {
    pub name: String,
    pub email: Email,
    pub password: SecretString,
    pub join_date: NaiveDate,
}

/// Roster held in process memory. Clones share the same accounts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoster {
    records: Arc<Mutex<Vec<CredentialRecord>>>,
}

impl InMemoryRoster {
    /// A roster with no accounts.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A roster seeded with the four demo accounts.
    #[must_use]
    pub fn demo() -> Self {
        Self::with_records(demo_records())
    }

    /// A roster seeded with `records`.
    #[must_use]
    pub fn with_records(records: Vec<CredentialRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// Number of accounts.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Whether the roster has no accounts.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

impl CredentialRepository for InMemoryRoster {
    async fn find_by_email(
        &self,
        email: &Email,
        matching: EmailMatching,
    ) -> Result<Option<CredentialRecord>, RepositoryError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .find(|r| r.user.email.matches(email, matching))
            .cloned())
    }

    async fn create(
        &self,
        account: NewAccount,
        matching: EmailMatching,
    ) -> Result<User, RepositoryError> {
        let mut records = self.records.lock().await;
        if records
            .iter()
            .any(|r| r.user.email.matches(&account.email, matching))
        {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let next_id = records
            .iter()
            .map(|r| r.user.id.as_i64())
            .max()
            .map_or(1, |max| max.saturating_add(1));
        if records.iter().any(|r| r.user.id.as_i64() == next_id) {
            return Err(RepositoryError::Conflict("user id exhausted".to_owned()));
        }

        let user = User::new_member(
            UserId::new(next_id),
            account.name,
            account.email,
            account.join_date,
        );
        records.push(CredentialRecord::new(user.clone(), account.password));
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().await;
        let index = records
            .iter()
            .position(|r| r.user.id == id)
            .ok_or(RepositoryError::NotFound)?;
        records.remove(index);
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().await;
        let record = records
            .iter_mut()
            .find(|r| r.user.id == user.id)
            .ok_or(RepositoryError::NotFound)?;
        record.user = user.clone();
        Ok(())
    }
}

// =============================================================================
// Demo accounts
// =============================================================================

struct DemoAccount {
    id: i64,
    name: &'static str,
    email: &'static str,
    eco_points: u64,
    joined: (i32, u32, u32),
    stats: (u32, i64, u32, u32, u32),
    favorite_category: &'static str,
    last_order: (i32, u32, u32),
    tier: MembershipTier,
    badges: &'static [&'static str],
}

const DEMO_ACCOUNTS: [DemoAccount; 4] = [
    DemoAccount {
        id: 1,
        name: "Shashank",
        email: "shashank@gmail.com",
        eco_points: 1250,
        joined: (2024, 1, 15),
        stats: (23, 124_750, 45, 8900, 234),
        favorite_category: "Personal Care",
        last_order: (2024, 3, 15),
        tier: MembershipTier::EcoChampion,
        badges: &["Early Adopter", "Tree Planter", "Water Saver", "Carbon Neutral"],
    },
    DemoAccount {
        id: 2,
        name: "Harsh",
        email: "harsh@gmail.com",
        eco_points: 890,
        joined: (2024, 2, 20),
        stats: (15, 89_230, 32, 5600, 156),
        favorite_category: "Home & Kitchen",
        last_order: (2024, 3, 12),
        tier: MembershipTier::EcoExplorer,
        badges: &["Water Saver", "Recycler", "Local Shopper"],
    },
    DemoAccount {
        id: 3,
        name: "Ishita",
        email: "ishita@gmail.com",
        eco_points: 2100,
        joined: (2024, 3, 10),
        stats: (34, 215_680, 78, 12_400, 445),
        favorite_category: "Tech",
        last_order: (2024, 3, 18),
        tier: MembershipTier::EcoMaster,
        badges: &[
            "Eco Master",
            "Carbon Neutral",
            "Tree Planter",
            "Water Saver",
            "Early Adopter",
            "Influencer",
        ],
    },
    DemoAccount {
        id: 4,
        name: "Adarsh",
        email: "adarsh@gmail.com",
        eco_points: 650,
        joined: (2024, 4, 5),
        stats: (12, 67_890, 24, 3800, 98),
        favorite_category: "Clothing",
        last_order: (2024, 3, 10),
        tier: MembershipTier::EcoExplorer,
        badges: &["Fashion Forward", "Recycler"],
    },
];

fn demo_records() -> Vec<CredentialRecord> {
    DEMO_ACCOUNTS.iter().filter_map(demo_record).collect()
}

fn demo_record(account: &DemoAccount) -> Option<CredentialRecord> {
    let date = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d);
    let (total_orders, spent_cents, trees_saved, water_saved, carbon_offset) = account.stats;

    let user = User {
        id: UserId::new(account.id),
        name: account.name.to_owned(),
        email: Email::parse(account.email).ok()?,
        eco_points: account.eco_points,
        join_date: date(account.joined)?,
        stats: UserStats {
            total_orders,
            total_spent: Decimal::new(spent_cents, 2),
            trees_saved,
            water_saved,
            carbon_offset,
        },
        favorite_category: account.favorite_category.to_owned(),
        last_order: date(account.last_order),
        membership_tier: account.tier,
        badges: account.badges.iter().map(|b| (*b).to_owned()).collect(),
    };

    Some(CredentialRecord::new(user, SecretString::from(DEMO_PASSWORD)))
}
