use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::entry::{Entry, EntryError};

/// Document in the `users` collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    // Plain text, compared by exact match at login.
    pub password: String,
    #[serde(default)]
    pub log: Vec<Entry>,
}

impl User {
    pub fn new(name: String, email: String, password: String) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            email,
            password,
            log: Vec::new(),
        }
    }

    pub fn id_hex(&self) -> String {
        self.id.to_hex()
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.log.get(index)
    }

    /// Appends at the end of the log and returns the new entry's index.
    pub fn append_entry(&mut self, date: String, entry: String) -> usize {
        self.log.push(Entry::new(date, entry));
        self.log.len() - 1
    }

    /// Overwrites the slot at `index`, keeping the entry's stable id.
    ///
    /// When `expected_id` is given it must match the id currently at `index`,
    /// unless that id was minted on this load and cannot have been seen before.
    pub fn replace_entry(
        &mut self,
        index: usize,
        expected_id: Option<&str>,
        date: String,
        entry: String,
    ) -> Result<(), EntryError> {
        let slot = self.log.get_mut(index).ok_or(EntryError::OutOfRange)?;
        if let Some(expected) = expected_id {
            if !slot.minted && slot.id != expected {
                return Err(EntryError::Stale);
            }
        }
        slot.date = date;
        slot.entry = entry;
        Ok(())
    }

    pub fn remove_entry(&mut self, index: usize) -> Result<Entry, EntryError> {
        if index >= self.log.len() {
            return Err(EntryError::OutOfRange);
        }
        Ok(self.log.remove(index))
    }
}

/// What the session keeps about the logged-in user.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_hex(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
