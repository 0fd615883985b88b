use std::iter::FromIterator;

use serde::Serialize;

use crate::gallery::storage::{Storage, StorageError};
use crate::models::images::ImageId;

/// Storage slot holding the serialized favorite set.
pub const FAVORITES_KEY: &str = "favorites";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Favorited image ids, in the order they were favorited. Never holds duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: Vec<ImageId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a persisted set. Absent or malformed data gives an empty set.
    pub fn load(raw: Option<&str>) -> Self {
        let raw = match raw {
            Some(raw) => raw,
            None => return Self::new(),
        };

        match serde_json::from_str::<Vec<ImageId>>(raw) {
            Ok(ids) => ids.into_iter().collect(),
            Err(err) => {
                tracing::debug!("discarding unparseable favorites: {}", err);
                Self::new()
            },
        }
    }

    pub fn toggle(&mut self, id: &ImageId) -> Toggle {
        match self.ids.iter().position(|fav| fav == id) {
            Some(index) => {
                self.ids.remove(index);
                Toggle::Removed
            },
            None => {
                self.ids.push(id.clone());
                Toggle::Added
            },
        }
    }

    pub fn contains(&self, id: &ImageId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[ImageId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.ids)
    }
}

impl FromIterator<ImageId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = ImageId>>(iter: I) -> Self {
        let mut set = FavoriteSet::new();
        for id in iter {
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }
}

/// A favorite set bound to the storage slot it is persisted in.
#[derive(Debug)]
pub struct Favorites<S> {
    set: FavoriteSet,
    storage: S,
}

impl<S: Storage> Favorites<S> {
    pub fn load(storage: S) -> Self {
        let set = FavoriteSet::load(storage.get(FAVORITES_KEY).as_deref());
        Favorites { set, storage }
    }

    /// Toggles `id` and writes the whole set back to storage.
    ///
    /// The in-memory set keeps the change even when the write fails.
    pub fn toggle(&mut self, id: &ImageId) -> Result<Toggle, StorageError> {
        let toggle = self.set.toggle(id);
        let serialized = self.set.to_json()?;
        if let Err(err) = self.storage.set(FAVORITES_KEY, serialized) {
            tracing::warn!(image_id = %id, "failed to persist favorites: {}", err);
            return Err(err);
        }
        Ok(toggle)
    }

    pub fn set(&self) -> &FavoriteSet {
        &self.set
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
