//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Settings key/value table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "app_settings")]
pub struct Model {
    /// Setting key (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub setting_key: String,

    /// Stored value as text; typed on read
    pub setting_value: String,

    /// Creation timestamp
    pub created_at: DateTimeUtc,

    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Activity audit trail module
pub mod activity {
    use sea_orm::entity::prelude::*;

    /// Activity log table entity
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "activity_log")]
    pub struct Model {
        /// Row id
        #[sea_orm(primary_key)]
        pub id: i32,

        /// Activity kind (e.g. "setting_updated")
        pub action: String,

        /// Human-readable description of the change
        pub description: String,

        /// Creation timestamp
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
