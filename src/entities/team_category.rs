//! Team category entity - Groupings for the team roster page.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Team category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the category
    pub name: String,
    /// Optional public URL of the category image
    pub image_url: Option<String>,
    /// Manual ordering position; lower sorts first
    pub sort_order: i32,
    /// When the category was created
    pub created_at: DateTime,
}

/// Defines relationships between TeamCategory and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A category groups many team members
    #[sea_orm(has_many = "super::team_member::Entity")]
    TeamMember,
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
