//! Team roster business logic - categories and members for the team page.
//!
//! Reads are public. Creates, updates, deletes, and reorders require an active
//! admin session. Listing order is always `sort_order` ascending with
//! `created_at` as the tiebreaker, which is what the reorder operations write.

use crate::{
    core::session::{AdminSession, require_admin},
    entities::{TeamCategory, TeamMember, team_category, team_member},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all team categories in display order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_team_categories(db: &DatabaseConnection) -> Result<Vec<team_category::Model>> {
    TeamCategory::find()
        .order_by_asc(team_category::Column::SortOrder)
        .order_by_asc(team_category::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all team members in display order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_team_members(db: &DatabaseConnection) -> Result<Vec<team_member::Model>> {
    TeamMember::find()
        .order_by_asc(team_member::Column::SortOrder)
        .order_by_asc(team_member::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the members of one category in display order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_team_members_by_category(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Vec<team_member::Model>> {
    TeamMember::find()
        .filter(team_member::Column::CategoryId.eq(category_id))
        .order_by_asc(team_member::Column::SortOrder)
        .order_by_asc(team_member::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the members that belong to no category, in display order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_uncategorized_members(
    db: &DatabaseConnection,
) -> Result<Vec<team_member::Model>> {
    TeamMember::find()
        .filter(team_member::Column::CategoryId.is_null())
        .order_by_asc(team_member::Column::SortOrder)
        .order_by_asc(team_member::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a team category by id.
///
/// # Errors
/// Returns [`Error::CategoryNotFound`] if absent, or an error if the query
/// fails.
pub async fn get_team_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<team_category::Model> {
    TeamCategory::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })
}

/// Retrieves a team member by id.
///
/// # Errors
/// Returns [`Error::MemberNotFound`] if absent, or an error if the query
/// fails.
pub async fn get_team_member_by_id(
    db: &DatabaseConnection,
    member_id: i64,
) -> Result<team_member::Model> {
    TeamMember::find_by_id(member_id)
        .one(db)
        .await?
        .ok_or(Error::MemberNotFound { id: member_id })
}

/// Creates a team category. Privileged.
///
/// # Errors
/// Returns an error if the caller has no active admin session, the name is
/// blank, or the insert fails.
pub async fn create_team_category(
    db: &DatabaseConnection,
    session: Option<&AdminSession>,
    name: &str,
    image_url: Option<String>,
) -> Result<team_category::Model> {
    require_admin(session)?;

    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Category name is required".to_string(),
        });
    }

    let category = team_category::ActiveModel {
        name: Set(name.to_string()),
        image_url: Set(image_url),
        sort_order: Set(0),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    category.insert(db).await.map_err(Into::into)
}

/// Creates a team member under an existing category. Privileged.
///
/// # Errors
/// Returns an error if the caller has no active admin session, the name is
/// blank, the category does not exist, or the insert fails.
pub async fn create_team_member(
    db: &DatabaseConnection,
    session: Option<&AdminSession>,
    name: &str,
    bio: Option<String>,
    category_id: i64,
    image_url: Option<String>,
) -> Result<team_member::Model> {
    require_admin(session)?;

    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Member name is required".to_string(),
        });
    }
    // Creating under a dangling category id would silently orphan the member
    get_team_category_by_id(db, category_id).await?;

    let bio = bio.map(|b| b.trim().to_string()).filter(|b| !b.is_empty());

    let member = team_member::ActiveModel {
        name: Set(name.to_string()),
        image_url: Set(image_url),
        bio: Set(bio),
        sort_order: Set(0),
        category_id: Set(Some(category_id)),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    member.insert(db).await.map_err(Into::into)
}

/// Updates a team category's name and image. Privileged.
///
/// # Errors
/// Returns an error if the caller has no active admin session, the name is
/// blank, the category does not exist, or the update fails.
pub async fn update_team_category(
    db: &DatabaseConnection,
    session: Option<&AdminSession>,
    category_id: i64,
    name: &str,
    image_url: Option<String>,
) -> Result<team_category::Model> {
    require_admin(session)?;

    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Category name is required".to_string(),
        });
    }

    let mut category: team_category::ActiveModel =
        get_team_category_by_id(db, category_id).await?.into();
    category.name = Set(name.to_string());
    category.image_url = Set(image_url);
    category.update(db).await.map_err(Into::into)
}

/// Updates a team member's profile fields. Privileged.
///
/// A `category_id` of `None` detaches the member; `Some` must reference an
/// existing category.
///
/// # Errors
/// Returns an error if the caller has no active admin session, the name is
/// blank, the member or target category does not exist, or the update fails.
pub async fn update_team_member(
    db: &DatabaseConnection,
    session: Option<&AdminSession>,
    member_id: i64,
    name: &str,
    bio: Option<String>,
    category_id: Option<i64>,
    image_url: Option<String>,
) -> Result<team_member::Model> {
    require_admin(session)?;

    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Member name is required".to_string(),
        });
    }
    if let Some(id) = category_id {
        get_team_category_by_id(db, id).await?;
    }

    let mut member: team_member::ActiveModel = get_team_member_by_id(db, member_id).await?.into();
    member.name = Set(name.to_string());
    member.bio = Set(bio.map(|b| b.trim().to_string()).filter(|b| !b.is_empty()));
    member.category_id = Set(category_id);
    member.image_url = Set(image_url);
    member.update(db).await.map_err(Into::into)
}

/// Deletes a team category, detaching (not deleting) its members. Privileged.
///
/// # Errors
/// Returns an error if the caller has no active admin session, the category
/// does not exist, or a database operation fails.
pub async fn delete_team_category(
    db: &DatabaseConnection,
    session: Option<&AdminSession>,
    category_id: i64,
) -> Result<()> {
    require_admin(session)?;

    use sea_orm::sea_query::Expr;

    // Detach first so the category row can go away cleanly
    TeamMember::update_many()
        .col_expr(team_member::Column::CategoryId, Expr::value(None::<i64>))
        .filter(team_member::Column::CategoryId.eq(category_id))
        .exec(db)
        .await?;

    let result = TeamCategory::delete_by_id(category_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::CategoryNotFound { id: category_id });
    }
    Ok(())
}

/// Deletes a team member. Privileged.
///
/// # Errors
/// Returns an error if the caller has no active admin session, the member
/// does not exist, or the delete fails.
pub async fn delete_team_member(
    db: &DatabaseConnection,
    session: Option<&AdminSession>,
    member_id: i64,
) -> Result<()> {
    require_admin(session)?;

    let result = TeamMember::delete_by_id(member_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::MemberNotFound { id: member_id });
    }
    Ok(())
}

/// Rewrites member sort positions to follow `ordered_ids`. Privileged.
///
/// Each listed member gets `sort_order = position`. Updates run one row at a
/// time; a failure part-way leaves earlier rows renumbered.
///
/// # Errors
/// Returns an error if the caller has no active admin session, an id does not
/// exist, or an update fails.
pub async fn reorder_team_members(
    db: &DatabaseConnection,
    session: Option<&AdminSession>,
    ordered_ids: &[i64],
) -> Result<()> {
    require_admin(session)?;

    for (position, member_id) in ordered_ids.iter().enumerate() {
        let mut member: team_member::ActiveModel =
            get_team_member_by_id(db, *member_id).await?.into();
        member.sort_order = Set(i32::try_from(position).unwrap_or(i32::MAX));
        member.update(db).await?;
    }
    Ok(())
}

/// Rewrites category sort positions to follow `ordered_ids`. Privileged.
///
/// Same contract as [`reorder_team_members`].
///
/// # Errors
/// Returns an error if the caller has no active admin session, an id does not
/// exist, or an update fails.
pub async fn reorder_team_categories(
    db: &DatabaseConnection,
    session: Option<&AdminSession>,
    ordered_ids: &[i64],
) -> Result<()> {
    require_admin(session)?;

    for (position, category_id) in ordered_ids.iter().enumerate() {
        let mut category: team_category::ActiveModel =
            get_team_category_by_id(db, *category_id).await?.into();
        category.sort_order = Set(i32::try_from(position).unwrap_or(i32::MAX));
        category.update(db).await?;
    }
    Ok(())
}
