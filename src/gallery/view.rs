//! UI state of the gallery page and its transitions.
//!
//! The state travels in the query string, so every link on the page is the
//! current state with one event applied.

use serde::{Deserialize, Serialize};

use crate::gallery::filter::Filter;
use crate::gallery::lightbox::Lightbox;
use crate::models::images::{AlbumKey, ImageId};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewState {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    /// Empty means all albums.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub album: AlbumKey,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub favorites_only: bool,
    #[serde(rename = "selected", skip_serializing_if = "is_closed")]
    pub lightbox: Lightbox,
}

fn is_closed(lightbox: &Lightbox) -> bool {
    !lightbox.is_open()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    Search(String),
    SelectAlbum(AlbumKey),
    ToggleFavoritesView,
    Open(ImageId),
    Close,
}

impl ViewState {
    pub fn apply(self, event: ViewEvent) -> Self {
        match event {
            ViewEvent::Search(search) => ViewState { search, ..self },
            ViewEvent::SelectAlbum(album) => ViewState { album, ..self },
            ViewEvent::ToggleFavoritesView => ViewState {
                favorites_only: !self.favorites_only,
                ..self
            },
            ViewEvent::Open(id) => ViewState {
                lightbox: self.lightbox.open(id),
                ..self
            },
            ViewEvent::Close => ViewState {
                lightbox: self.lightbox.close(),
                ..self
            },
        }
    }

    pub fn filter(&self) -> Filter<'_> {
        Filter {
            search: &self.search,
            album: &self.album,
            favorites_only: self.favorites_only,
        }
    }

    pub fn from_query(query: &str) -> Result<Self, serde_qs::Error> {
        serde_qs::from_str(query)
    }

    pub fn to_query(&self) -> Result<String, serde_qs::Error> {
        serde_qs::to_string(self)
    }

    /// Gallery page URL path showing this state.
    pub fn href(&self) -> Result<String, serde_qs::Error> {
        let query = self.to_query()?;
        if query.is_empty() {
            Ok("/".to_string())
        } else {
            Ok(format!("/?{}", query))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_update_only_their_own_cell() {
        let state = ViewState::default()
            .apply(ViewEvent::Search("ali".to_string()))
            .apply(ViewEvent::SelectAlbum("2".to_string()))
            .apply(ViewEvent::ToggleFavoritesView)
            .apply(ViewEvent::Open("7".into()));

        assert_eq!(state.search, "ali");
        assert_eq!(state.album, "2");
        assert!(state.favorites_only);
        assert_eq!(state.lightbox, Lightbox::Open("7".into()));

        let closed = state.clone().apply(ViewEvent::Close);
        assert_eq!(closed.lightbox, Lightbox::Closed);
        assert_eq!(closed.search, state.search);

        let all = closed.apply(ViewEvent::ToggleFavoritesView);
        assert!(!all.favorites_only);
    }

    #[test]
    fn default_state_links_to_bare_gallery() {
        assert_eq!(ViewState::default().href().unwrap(), "/");
        assert_eq!(ViewState::from_query("").unwrap(), ViewState::default());
    }

    #[test]
    fn query_string_carries_the_whole_state() {
        let state = ViewState::default()
            .apply(ViewEvent::Search("bob".to_string()))
            .apply(ViewEvent::ToggleFavoritesView)
            .apply(ViewEvent::Open("3".into()));

        let query = state.to_query().unwrap();
        assert!(query.contains("search=bob"));
        assert!(query.contains("favorites_only=true"));
        assert!(query.contains("selected=3"));
        assert!(!query.contains("album"));

        assert_eq!(ViewState::from_query(&query).unwrap(), state);
    }

    #[test]
    fn empty_form_fields_mean_unfiltered() {
        let state = ViewState::from_query("search=&album=&selected=").unwrap();
        assert_eq!(state, ViewState::default());
    }
}
