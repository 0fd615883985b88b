use std::collections::HashMap;

use tide::http::Cookie;
use tide::{Request, Response};

use crate::gallery::storage::{Storage, StorageError};

/// Browser-side storage: each slot is a long-lived cookie.
///
/// Slots are read from the incoming request and written back by [`CookieStorage::apply`].
/// Values are stored as-is; tide's cookie layer percent-encodes them on the wire.
#[derive(Debug, Default)]
pub struct CookieStorage {
    slots: HashMap<String, String>,
    pending: Vec<Cookie<'static>>,
}

impl CookieStorage {
    pub fn from_request<S>(req: &Request<S>, keys: &[&str]) -> Self
    where
        S: Clone + Send + Sync + 'static,
    {
        let slots = keys
            .iter()
            .filter_map(|&key| {
                let cookie = req.cookie(key)?;
                Some((key.to_string(), cookie.value().to_string()))
            })
            .collect();

        CookieStorage {
            slots,
            pending: Vec::new(),
        }
    }

    pub fn apply(self, res: &mut Response) {
        for cookie in self.pending {
            res.insert_cookie(cookie);
        }
    }
}

impl Storage for CookieStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let cookie = Cookie::build(key.to_string(), value.clone())
            .path("/")
            .http_only(true)
            .permanent()
            .finish();

        self.pending.retain(|c| c.name() != key);
        self.pending.push(cookie);
        self.slots.insert(key.to_string(), value);
        Ok(())
    }
}
