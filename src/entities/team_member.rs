//! Team member entity - People shown on the team roster page.
//!
//! Members belong to at most one category. Deleting a category detaches its
//! members (`category_id` becomes null) rather than deleting them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Team member database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_members")]
pub struct Model {
    /// Unique identifier for the member
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Member's display name
    pub name: String,
    /// Optional public URL of the member photo
    pub image_url: Option<String>,
    /// Optional short biography
    pub bio: Option<String>,
    /// Manual ordering position within the roster; lower sorts first
    pub sort_order: i32,
    /// Category this member belongs to, if any
    pub category_id: Option<i64>,
    /// When the member was added
    pub created_at: DateTime,
}

/// Defines relationships between TeamMember and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each member may belong to one category
    #[sea_orm(
        belongs_to = "super::team_category::Entity",
        from = "Column::CategoryId",
        to = "super::team_category::Column::Id"
    )]
    TeamCategory,
}

impl Related<super::team_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
