use serde::Deserialize;

use crate::database::UserRepository;
use crate::models::{Entry, EntryError, User};
use crate::utils::AppError;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct EntryForm {
    pub date: String,
    pub entry: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct EditEntryForm {
    pub date: String,
    pub entry: String,
    /// Id of the entry the form was rendered for; enables the stale check.
    #[serde(default)]
    pub entry_id: Option<String>,
}

impl From<EntryError> for AppError {
    fn from(e: EntryError) -> Self {
        match e {
            EntryError::OutOfRange => AppError::EntryNotFound,
            EntryError::Stale => AppError::StaleEntry,
        }
    }
}

pub async fn load_user(
    users: &dyn UserRepository,
    id: &str,
    context: &'static str,
) -> Result<User, AppError> {
    users
        .find_by_id(id)
        .await
        .map_err(AppError::store(context))?
        .ok_or(AppError::UserNotFound)
}

/// Appends to the log and returns the new entry's index.
pub async fn add_entry(
    users: &dyn UserRepository,
    id: &str,
    form: EntryForm,
) -> Result<usize, AppError> {
    const CONTEXT: &str = "Error saving entry to database";

    let mut user = load_user(users, id, CONTEXT).await?;
    let index = user.append_entry(form.date, form.entry);
    users.save(&user).await.map_err(AppError::store(CONTEXT))?;
    Ok(index)
}

pub async fn get_entry(
    users: &dyn UserRepository,
    id: &str,
    index: usize,
) -> Result<Entry, AppError> {
    let user = load_user(users, id, "Error fetching entry from database").await?;
    user.entry(index).cloned().ok_or(AppError::EntryNotFound)
}

pub async fn update_entry(
    users: &dyn UserRepository,
    id: &str,
    index: usize,
    form: EditEntryForm,
) -> Result<(), AppError> {
    const CONTEXT: &str = "Error updating entry in database";

    let mut user = load_user(users, id, CONTEXT).await?;
    let expected = form.entry_id.as_deref().filter(|s| !s.is_empty());
    user.replace_entry(index, expected, form.date, form.entry)?;
    users.save(&user).await.map_err(AppError::store(CONTEXT))
}

pub async fn delete_entry(
    users: &dyn UserRepository,
    id: &str,
    index: usize,
) -> Result<Entry, AppError> {
    const CONTEXT: &str = "Error deleting entry from database";

    let mut user = load_user(users, id, CONTEXT).await?;
    let removed = user.remove_entry(index)?;
    users.save(&user).await.map_err(AppError::store(CONTEXT))?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryUsers;

    async fn seeded(entries: &[(&str, &str)]) -> (InMemoryUsers, String) {
        let users = InMemoryUsers::new();
        let mut user = User::new("Ivy".to_string(), "ivy@example.com".to_string(), "pw".to_string());
        for (date, text) in entries {
            user.append_entry(date.to_string(), text.to_string());
        }
        users.insert(&user).await.unwrap();
        (users, user.id_hex())
    }

    fn edit(date: &str, entry: &str, entry_id: Option<&str>) -> EditEntryForm {
        EditEntryForm {
            date: date.to_string(),
            entry: entry.to_string(),
            entry_id: entry_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn entries_round_trip_untouched() {
        let (users, id) = seeded(&[]).await;
        let text = "  <script>alert(1)</script> & tabs\there  ";
        let index = add_entry(
            &users,
            &id,
            EntryForm { date: "31/12/1999".to_string(), entry: text.to_string() },
        )
        .await
        .unwrap();

        let entry = get_entry(&users, &id, index).await.unwrap();
        assert_eq!(entry.date, "31/12/1999");
        assert_eq!(entry.entry, text);
    }

    #[tokio::test]
    async fn stale_edit_writes_nothing() {
        let (users, id) = seeded(&[("a", "one"), ("b", "two")]).await;
        let first = get_entry(&users, &id, 0).await.unwrap();

        // The form for entry 0 was rendered, then entry 0 was deleted elsewhere.
        delete_entry(&users, &id, 0).await.unwrap();
        let result = update_entry(&users, &id, 0, edit("c", "changed", Some(&first.id))).await;
        assert!(matches!(result, Err(AppError::StaleEntry)));

        let survivor = get_entry(&users, &id, 0).await.unwrap();
        assert_eq!(survivor.entry, "two");
    }

    #[tokio::test]
    async fn empty_entry_id_skips_the_stale_check() {
        let (users, id) = seeded(&[("a", "one")]).await;
        update_entry(&users, &id, 0, edit("a2", "uno", Some(""))).await.unwrap();
        assert_eq!(get_entry(&users, &id, 0).await.unwrap().entry, "uno");
    }

    #[tokio::test]
    async fn out_of_range_index_is_not_found() {
        let (users, id) = seeded(&[("a", "one")]).await;
        assert!(matches!(get_entry(&users, &id, 1).await, Err(AppError::EntryNotFound)));
        assert!(matches!(
            update_entry(&users, &id, 5, edit("x", "y", None)).await,
            Err(AppError::EntryNotFound)
        ));
        assert!(matches!(delete_entry(&users, &id, 1).await, Err(AppError::EntryNotFound)));
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let (users, _) = seeded(&[]).await;
        let result = load_user(&users, "65f0c0ffee0000000000dead", "ctx").await;
        assert!(matches!(result, Err(AppError::UserNotFound)));
    }
}
