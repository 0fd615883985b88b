use std::sync::Arc;

use async_std::sync::RwLock;

use peanut_gallery_api_structs::ListedImage;

use crate::gallery::source::{FetchError, ImageSource, PageRequest};
use crate::models::images::{albums, AlbumKey, Image, ImageId};

pub type Generation = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list was replaced with this many images.
    Applied(usize),
    Failed,
    /// The fetch was superseded or the gallery was torn down before it finished.
    Stale,
}

/// The loaded image list and the album keys derived from it.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: Vec<Image>,
    albums: Vec<AlbumKey>,
    generation: Generation,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn albums(&self) -> &[AlbumKey] {
        &self.albums
    }

    pub fn get(&self, id: &ImageId) -> Option<&Image> {
        self.images.iter().find(|image| &image.id == id)
    }

    pub fn begin_fetch(&mut self) -> Generation {
        self.generation += 1;
        self.generation
    }

    /// Invalidates any fetch still in flight.
    pub fn unmount(&mut self) {
        self.generation += 1;
    }

    pub fn complete(
        &mut self,
        generation: Generation,
        result: Result<Vec<ListedImage>, FetchError>,
    ) -> FetchOutcome {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "ignoring stale fetch result");
            return FetchOutcome::Stale;
        }

        match result {
            Ok(listed) => {
                self.images = listed.into_iter().map(Image::from).collect();
                self.albums = albums(&self.images);
                tracing::info!(
                    images = self.images.len(),
                    albums = self.albums.len(),
                    "image list loaded"
                );
                FetchOutcome::Applied(self.images.len())
            },
            Err(err) => {
                tracing::error!("Error fetching images: {}", err);
                FetchOutcome::Failed
            },
        }
    }
}

/// Runs the one startup fetch. The store lock is not held while the request is outstanding.
pub async fn load_on_mount(store: Arc<RwLock<ImageStore>>, source: Arc<dyn ImageSource>) -> FetchOutcome {
    let generation = store.write().await.begin_fetch();
    let result = source.fetch_page(PageRequest::FIRST).await;
    store.write().await.complete(generation, result)
}
