//! Contact message entity - Submissions from the public contact form.
//! Messages are write-once; the admin console only lists them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contact message database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_messages")]
pub struct Model {
    /// Unique identifier for the message
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sender's name
    pub name: String,
    /// Sender's email address
    pub email: String,
    /// The message body
    pub message: String,
    /// When the message was submitted
    pub created_at: DateTimeUtc,
}

/// Contact messages have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
