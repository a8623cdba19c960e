//! Transaction category repository.
//!
//! Categories label vouchers for reporting. Default categories ship
//! with the system and reject edits and deletion.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use kosha_shared::CategoryId;

use crate::entities::{sea_orm_active_enums::CategoryType, transaction_categories};
use crate::error::{LedgerError, LedgerResult};

/// Input for creating a transaction category.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    /// Category name (must be unique).
    pub category_name: String,
    /// Expense or income.
    pub category_type: CategoryType,
    /// Free-form description.
    pub description: Option<String>,
    /// Marks a system-provided category that cannot be changed.
    pub is_default: bool,
}

/// Input for updating a transaction category.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    /// Category name.
    pub category_name: Option<String>,
    /// Expense or income.
    pub category_type: Option<CategoryType>,
    /// Free-form description.
    pub description: Option<Option<String>>,
}

/// Repository for transaction category CRUD.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or already taken.
    pub async fn create_category(
        &self,
        input: CreateCategoryInput,
    ) -> LedgerResult<transaction_categories::Model> {
        let category_name = input.category_name.trim().to_string();
        if category_name.is_empty() {
            return Err(LedgerError::Validation(
                "Category name must not be empty".to_string(),
            ));
        }

        let existing = transaction_categories::Entity::find()
            .filter(transaction_categories::Column::CategoryName.eq(&category_name))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(LedgerError::Validation(format!(
                "Category '{category_name}' already exists"
            )));
        }

        let now = chrono::Utc::now().into();
        let category = transaction_categories::ActiveModel {
            id: Set(Uuid::now_v7()),
            category_name: Set(category_name),
            category_type: Set(input.category_type),
            description: Set(input.description),
            is_default: Set(input.is_default),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let category = category.insert(&self.db).await?;
        info!(category_id = %category.id, name = %category.category_name, "Category created");
        Ok(category)
    }

    /// Fetches a category by id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if no category has this id.
    pub async fn get_category(
        &self,
        id: CategoryId,
    ) -> LedgerResult<transaction_categories::Model> {
        transaction_categories::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Category not found: {id}")))
    }

    /// Lists all categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_categories(&self) -> LedgerResult<Vec<transaction_categories::Model>> {
        let categories = transaction_categories::Entity::find()
            .order_by_asc(transaction_categories::Column::CategoryName)
            .all(&self.db)
            .await?;
        Ok(categories)
    }

    /// Updates a category.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ProtectedEntity`] for default categories,
    /// or a validation error if the new name collides.
    pub async fn update_category(
        &self,
        id: CategoryId,
        input: UpdateCategoryInput,
    ) -> LedgerResult<transaction_categories::Model> {
        let category = self.get_category(id).await?;
        if category.is_default {
            return Err(LedgerError::ProtectedEntity(format!(
                "Default category '{}' cannot be modified",
                category.category_name
            )));
        }

        if let Some(new_name) = &input.category_name {
            let new_name = new_name.trim();
            if new_name.is_empty() {
                return Err(LedgerError::Validation(
                    "Category name must not be empty".to_string(),
                ));
            }
            if new_name != category.category_name {
                let existing = transaction_categories::Entity::find()
                    .filter(transaction_categories::Column::CategoryName.eq(new_name))
                    .filter(transaction_categories::Column::Id.ne(id.into_inner()))
                    .one(&self.db)
                    .await?;
                if existing.is_some() {
                    return Err(LedgerError::Validation(format!(
                        "Category '{new_name}' already exists"
                    )));
                }
            }
        }

        let mut active: transaction_categories::ActiveModel = category.into();
        if let Some(category_name) = input.category_name {
            active.category_name = Set(category_name.trim().to_string());
        }
        if let Some(category_type) = input.category_type {
            active.category_type = Set(category_type);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a category.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ProtectedEntity`] for default categories,
    /// or [`LedgerError::NotFound`] if the category does not exist.
    pub async fn delete_category(&self, id: CategoryId) -> LedgerResult<()> {
        let category = self.get_category(id).await?;
        if category.is_default {
            return Err(LedgerError::ProtectedEntity(format!(
                "Default category '{}' cannot be deleted",
                category.category_name
            )));
        }

        transaction_categories::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        info!(category_id = %id, "Category deleted");
        Ok(())
    }
}
