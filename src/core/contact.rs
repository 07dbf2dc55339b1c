//! Contact form business logic.
//!
//! Anyone can leave a message; only an admin can read the inbox.

use crate::{
    core::session::{AdminSession, require_admin},
    entities::{ContactMessage, contact_message},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Persists a contact form submission. Public.
///
/// # Errors
/// Returns an error if any of name, email, or message is blank, or if the
/// insert fails.
pub async fn create_contact_message(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    message: &str,
) -> Result<contact_message::Model> {
    let name = name.trim();
    let email = email.trim();
    let message = message.trim();
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(Error::Validation {
            message: "Name, email, and message are required".to_string(),
        });
    }

    let row = contact_message::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        message: Set(message.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}

/// Retrieves all contact messages, newest first. Privileged.
///
/// # Errors
/// Returns an error if the caller has no active admin session or the query
/// fails.
pub async fn get_contact_messages(
    db: &DatabaseConnection,
    session: Option<&AdminSession>,
) -> Result<Vec<contact_message::Model>> {
    require_admin(session)?;

    ContactMessage::find()
        .order_by_desc(contact_message::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_contact_message() -> Result<()> {
        let db = setup_test_db().await?;

        let message =
            create_contact_message(&db, " Deniz ", "deniz@example.com", "Do you do repairs?")
                .await?;
        assert_eq!(message.name, "Deniz");
        assert_eq!(message.email, "deniz@example.com");
        assert_eq!(message.message, "Do you do repairs?");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_contact_message_requires_all_fields() -> Result<()> {
        let db = setup_test_db().await?;

        for (name, email, message) in [
            ("", "a@b.c", "hi"),
            ("Deniz", "  ", "hi"),
            ("Deniz", "a@b.c", ""),
        ] {
            let result = create_contact_message(&db, name, email, message).await;
            assert!(matches!(
                result.unwrap_err(),
                Error::Validation { message: _ }
            ));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_get_contact_messages_requires_admin() -> Result<()> {
        let db = setup_test_db().await?;
        create_contact_message(&db, "Deniz", "deniz@example.com", "hi").await?;

        let result = get_contact_messages(&db, None).await;
        assert!(matches!(result.unwrap_err(), Error::Unauthorized));

        let session = test_admin_session()?;
        let messages = get_contact_messages(&db, Some(&session)).await?;
        assert_eq!(messages.len(), 1);

        Ok(())
    }
}
