//! `SeaORM` Entity for the voucher_sequences table.
//!
//! One row per voucher type carrying its last issued sequence value.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "voucher_sequences")]
pub struct Model {
    /// Voucher type key, e.g. `payment`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub voucher_type: String,
    pub last_number: i64,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
