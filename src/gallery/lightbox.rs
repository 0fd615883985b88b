use serde::{Deserialize, Serialize};

use crate::models::images::{Image, ImageId};

/// Which image, if any, is shown enlarged.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Option<ImageId>", into = "Option<ImageId>")]
pub enum Lightbox {
    Closed,
    Open(ImageId),
}

impl Default for Lightbox {
    fn default() -> Self {
        Lightbox::Closed
    }
}

impl Lightbox {
    /// Shows `id`, replacing whatever was open.
    pub fn open(self, id: ImageId) -> Self {
        Lightbox::Open(id)
    }

    pub fn close(self) -> Self {
        Lightbox::Closed
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Lightbox::Open(_))
    }

    /// The open image, if it is part of `images`.
    pub fn resolve<'i>(&self, images: &'i [Image]) -> Option<&'i Image> {
        match self {
            Lightbox::Closed => None,
            Lightbox::Open(id) => images.iter().find(|image| &image.id == id),
        }
    }
}

impl From<Option<ImageId>> for Lightbox {
    fn from(selected: Option<ImageId>) -> Self {
        match selected {
            Some(id) if !id.as_str().is_empty() => Lightbox::Open(id),
            _ => Lightbox::Closed,
        }
    }
}

impl From<Lightbox> for Option<ImageId> {
    fn from(lightbox: Lightbox) -> Self {
        match lightbox {
            Lightbox::Closed => None,
            Lightbox::Open(id) => Some(id),
        }
    }
}
