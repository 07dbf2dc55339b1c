//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod contact_message;
pub mod order;
pub mod product;
pub mod team_category;
pub mod team_member;

// Re-export specific types to avoid conflicts
pub use contact_message::{
    Column as ContactMessageColumn, Entity as ContactMessage, Model as ContactMessageModel,
};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use team_category::{
    Column as TeamCategoryColumn, Entity as TeamCategory, Model as TeamCategoryModel,
};
pub use team_member::{Column as TeamMemberColumn, Entity as TeamMember, Model as TeamMemberModel};
