use mongodb::bson::Bson;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

/// One dated record inside a user's `log` array.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "StoredEntry")]
pub struct Entry {
    /// Stable across edits. Legacy subdocuments reuse their `_id` as hex.
    pub id: String,
    pub date: String,
    pub entry: String,
    /// Set when the stored entry had no id and this one was made up on load,
    /// so it cannot be compared with an id from an earlier load.
    #[serde(skip)]
    pub minted: bool,
}

impl Entry {
    pub fn new(date: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            id: new_entry_id(),
            date: date.into(),
            entry: entry.into(),
            minted: false,
        }
    }
}

#[derive(Deserialize)]
struct StoredEntry {
    #[serde(default, alias = "_id", deserialize_with = "stored_id")]
    id: Option<String>,
    date: String,
    entry: String,
}

fn stored_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Bson::deserialize(deserializer)? {
        Bson::String(id) if !id.is_empty() => Some(id),
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        _ => None,
    })
}

impl From<StoredEntry> for Entry {
    fn from(stored: StoredEntry) -> Self {
        let minted = stored.id.is_none();
        Self {
            id: stored.id.unwrap_or_else(new_entry_id),
            date: stored.date,
            entry: stored.entry,
            minted,
        }
    }
}

/// Why a positional change to the log was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryError {
    OutOfRange,
    /// The slot holds a different entry than the one the client saw.
    Stale,
}
