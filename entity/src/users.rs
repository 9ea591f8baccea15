//! SeaORM Entity for the users table.
//! Carries all three mixins: UUID primary key, timestamps and an optimistic-locking version.

use crate::mixins::{self, TimestampMixin, UuidPrimaryKeyMixin, VersionMixin};
use crate::Id;
use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::users::Model)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[schema(value_type = uuid::Uuid)]
    pub id: Id,

    /// Optional user name
    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub name: Option<String>,

    /// Optional user title
    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub title: Option<String>,

    /// Optimistic locking counter, starts at 1 and grows by one per update
    #[serde(skip_deserializing)]
    pub version: i32,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

// Rows are identified by their primary key in logs.
impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "User(id={})", self.id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl UuidPrimaryKeyMixin for Entity {
    fn id_column() -> Column {
        Column::Id
    }
}

impl TimestampMixin for Entity {
    fn created_at_column() -> Column {
        Column::CreatedAt
    }

    fn updated_at_column() -> Column {
        Column::UpdatedAt
    }
}

impl VersionMixin for Entity {
    fn version_column() -> Column {
        Column::Version
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        let mut active_model = <Self as ActiveModelTrait>::default();
        mixins::assign_id(&mut active_model);
        mixins::init_version(&mut active_model);
        active_model
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert {
            mixins::assign_id(&mut self);
            if !mixins::version_is_set(&self) {
                mixins::init_version(&mut self);
            }
        }
        mixins::touch(&mut self, insert);
        Ok(self)
    }
}
