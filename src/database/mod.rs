mod memory;

pub use memory::InMemoryUsers;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection, Database, IndexModel};

use crate::models::User;
use crate::utils::StoreError;

const USERS: &str = "users";
const DEFAULT_DB: &str = "diaryApp";

/// Access to the `users` document collection.
///
/// Writes replace the whole document; there is no per-entry update and no
/// concurrency check, so concurrent saves of the same user are last-write-wins.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Exact match on both fields.
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError>;

    async fn insert(&self, user: &User) -> Result<(), StoreError>;

    async fn save(&self, user: &User) -> Result<(), StoreError>;

    /// Cheap round trip used by `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, StoreError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(database_name(uri));

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Lookup index only: email uniqueness is checked at signup, not here.
    async fn ensure_indexes(&self) {
        let users = self.collection::<mongodb::bson::Document>(USERS);
        let email_index = IndexModel::builder().keys(doc! { "email": 1 }).build();

        match users.create_index(email_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    fn users(&self) -> Collection<User> {
        self.collection(USERS)
    }
}

/// Database name from the URI path, e.g. `mongodb://host:27017/diaryApp?x=y`.
fn database_name(uri: &str) -> &str {
    uri.split_once("://")
        .map(|(_, rest)| rest)
        .and_then(|rest| rest.split_once('/'))
        .map(|(_, path)| path.split('?').next().unwrap_or_default())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DB)
}

#[async_trait]
impl UserRepository for MongoDB {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        Ok(self.users().find_one(doc! { "_id": oid }).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let filter = doc! { "email": email, "password": password };
        Ok(self.users().find_one(filter).await?)
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        self.users().insert_one(user).await?;
        Ok(())
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        let result = self
            .users()
            .replace_one(doc! { "_id": user.id }, user)
            .await?;
        if result.matched_count == 0 {
            log::warn!("⚠️ Save matched no document for user {}", user.id);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.list_collection_names().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("mongodb://127.0.0.1:27017/diaryApp", "diaryApp")]
    #[case("mongodb://localhost/journal?retryWrites=true", "journal")]
    #[case("mongodb://localhost:27017", "diaryApp")]
    #[case("mongodb://localhost:27017/", "diaryApp")]
    #[case("mongodb+srv://user:pw@cluster.example.net/notes", "notes")]
    fn picks_database_from_uri(#[case] uri: &str, #[case] expected: &str) {
        assert_eq!(database_name(uri), expected);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_roundtrip() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://127.0.0.1:27017/diaryApp_test".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let mut user = User::new(
            "Mongo".to_string(),
            format!("{}@example.com", ObjectId::new()),
            "pw".to_string(),
        );
        db.insert(&user).await.unwrap();
        user.append_entry("today".to_string(), "stored".to_string());
        db.save(&user).await.unwrap();

        let found = db.find_by_id(&user.id_hex()).await.unwrap().unwrap();
        assert_eq!(found.log, user.log);
        assert!(db.find_by_credentials(&user.email, "nope").await.unwrap().is_none());
    }
}
