//! Database seeder for CHRONYX development and testing.
//!
//! Seeds a test user, the built-in financial year rule sets, and sample
//! insurance/loan records for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use chronyx_core::discovery::{LoanKind, PolicyKind};
use chronyx_core::tax::builtin_years;
use chronyx_db::entities::{insurance_policies, loan_accounts, users};
use chronyx_db::seed::seed_year_rules;
use chronyx_shared::{JwtConfig, JwtService};

/// Test user ID (consistent for all seeds)
const TEST_USER_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = chronyx_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding test user...");
    seed_test_user(&db).await;

    println!("Seeding financial year rule sets...");
    seed_rule_tables(&db).await;

    println!("Seeding sample insurance policies...");
    seed_insurance_policies(&db).await;

    println!("Seeding sample loan accounts...");
    seed_loan_accounts(&db).await;

    print_dev_token();

    println!("Seeding complete!");
}

/// Prints a short-lived bearer token for the test user so the API can be
/// exercised right after seeding.
fn print_dev_token() {
    let secret = std::env::var("CHRONYX__JWT__SECRET")
        .unwrap_or_else(|_| JwtConfig::default().secret);

    let jwt = JwtService::new(JwtConfig {
        secret,
        ..JwtConfig::default()
    });

    match jwt.generate_access_token(test_user_id(), "test@chronyx.dev") {
        Ok(token) => println!("Dev access token for test user:\n  {token}"),
        Err(e) => println!("  Could not generate dev token: {e}"),
    }
}

fn test_user_id() -> Uuid {
    Uuid::parse_str(TEST_USER_ID).unwrap()
}

/// Seeds a test user for development.
async fn seed_test_user(db: &DatabaseConnection) {
    // Check if user already exists
    if users::Entity::find_by_id(test_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Test user already exists, skipping...");
        return;
    }

    let user = users::ActiveModel {
        id: Set(test_user_id()),
        email: Set("test@chronyx.dev".to_string()),
        full_name: Set("Test User".to_string()),
        created_at: Set(Utc::now().into()),
    };

    user.insert(db).await.expect("Failed to seed test user");
}

/// Seeds the built-in financial year configurations.
async fn seed_rule_tables(db: &DatabaseConnection) {
    for rules in builtin_years() {
        let inserted = seed_year_rules(db, &rules)
            .await
            .expect("Failed to seed rule tables");
        if inserted {
            println!("  Seeded {}", rules.year.code);
        } else {
            println!("  {} already exists, skipping...", rules.year.code);
        }
    }
}

/// Seeds sample insurance policies for the test user.
async fn seed_insurance_policies(db: &DatabaseConnection) {
    let existing = insurance_policies::Entity::find().one(db).await.ok().flatten();
    if existing.is_some() {
        println!("  Insurance policies already exist, skipping...");
        return;
    }

    let samples = [
        ("Family health floater", PolicyKind::Health, 28_000i64),
        ("Term life plan", PolicyKind::Life, 45_000),
        ("Car comprehensive", PolicyKind::Vehicle, 14_500),
    ];

    for (name, kind, premium) in samples {
        let policy = insurance_policies::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(test_user_id()),
            name: Set(name.to_string()),
            policy_type: Set(kind.as_str().to_string()),
            annual_premium: Set(Decimal::from(premium)),
            created_at: Set(Utc::now().into()),
        };
        policy
            .insert(db)
            .await
            .expect("Failed to seed insurance policy");
    }
}

/// Seeds sample loan accounts for the test user.
async fn seed_loan_accounts(db: &DatabaseConnection) {
    let existing = loan_accounts::Entity::find().one(db).await.ok().flatten();
    if existing.is_some() {
        println!("  Loan accounts already exist, skipping...");
        return;
    }

    let samples = [
        ("Apartment home loan", LoanKind::Home, 215_000i64),
        ("Masters education loan", LoanKind::Education, 68_000),
    ];

    for (name, kind, interest) in samples {
        let loan = loan_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(test_user_id()),
            name: Set(name.to_string()),
            loan_type: Set(kind.as_str().to_string()),
            annual_interest_paid: Set(Decimal::from(interest)),
            created_at: Set(Utc::now().into()),
        };
        loan.insert(db).await.expect("Failed to seed loan account");
    }
}
