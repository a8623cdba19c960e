//! Database seeder for Kosha development and testing.
//!
//! Seeds the default transaction categories and a pair of demo bank
//! accounts for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::str::FromStr;
use uuid::Uuid;

use kosha_db::entities::{
    bank_accounts,
    sea_orm_active_enums::{AccountType, CategoryType},
    transaction_categories,
};
use kosha_shared::AppConfig;

/// Demo current account ID (consistent for all seeds)
const DEMO_CURRENT_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo savings account ID (consistent for all seeds)
const DEMO_SAVINGS_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().expect("Failed to load configuration");

    println!("Connecting to database...");
    let db = kosha_db::connect_with(&config.database)
        .await
        .expect("Failed to connect to database");

    println!("Seeding default categories...");
    seed_default_categories(&db).await;

    println!("Seeding demo bank accounts...");
    seed_demo_accounts(&db).await;

    println!("Seeding complete!");
}

/// Seeds the default categories that ship with the system.
///
/// Default categories are protected: the engine refuses to update or
/// delete them.
async fn seed_default_categories(db: &DatabaseConnection) {
    let defaults = [
        ("Sales", CategoryType::Income, "Customer receipts"),
        ("Interest Income", CategoryType::Income, "Bank interest credited"),
        ("Salary", CategoryType::Expense, "Payroll disbursements"),
        ("Rent", CategoryType::Expense, "Office and godown rent"),
        ("Bank Charges", CategoryType::Expense, "Fees levied by the bank"),
        ("Office Supplies", CategoryType::Expense, "Consumables and stationery"),
    ];

    for (name, category_type, description) in defaults {
        let exists = transaction_categories::Entity::find()
            .filter(transaction_categories::Column::CategoryName.eq(name))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some();
        if exists {
            println!("  Category '{name}' already exists, skipping...");
            continue;
        }

        let category = transaction_categories::ActiveModel {
            id: Set(Uuid::now_v7()),
            category_name: Set(name.to_string()),
            category_type: Set(category_type),
            description: Set(Some(description.to_string())),
            is_default: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = category.insert(db).await {
            eprintln!("Failed to insert category '{name}': {e}");
        } else {
            println!("  Created category: {name}");
        }
    }
}

/// Seeds two demo bank accounts with opening balances.
async fn seed_demo_accounts(db: &DatabaseConnection) {
    let accounts = [
        (
            DEMO_CURRENT_ID,
            "HDFC Current",
            "HDFC Bank",
            "50200012345678",
            "Koramangala",
            "HDFC0000123",
            AccountType::Current,
            "250000.00",
        ),
        (
            DEMO_SAVINGS_ID,
            "SBI Savings",
            "State Bank of India",
            "32109876543",
            "MG Road",
            "SBIN0004321",
            AccountType::Savings,
            "80000.00",
        ),
    ];

    for (id, name, bank, number, branch, ifsc, account_type, opening) in accounts {
        let id = Uuid::parse_str(id).expect("demo account id must parse");

        if bank_accounts::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Account '{name}' already exists, skipping...");
            continue;
        }

        let opening = Decimal::from_str(opening).expect("opening balance must parse");
        let account = bank_accounts::ActiveModel {
            id: Set(id),
            account_name: Set(name.to_string()),
            bank_name: Set(bank.to_string()),
            account_number: Set(number.to_string()),
            branch_name: Set(Some(branch.to_string())),
            ifsc_code: Set(Some(ifsc.to_string())),
            account_type: Set(account_type),
            opening_balance: Set(opening),
            current_balance: Set(opening),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = account.insert(db).await {
            eprintln!("Failed to insert account '{name}': {e}");
        } else {
            println!("  Created account: {name}");
        }
    }
}
