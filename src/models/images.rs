use std::fmt;

use serde::{Deserialize, Serialize};

use peanut_gallery_api_structs::ListedImage;

/// Number of albums images are spread over.
pub const ALBUM_COUNT: u64 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        ImageId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ImageId {
    fn from(id: &str) -> Self {
        ImageId(id.to_string())
    }
}

pub type AlbumKey = String;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Image {
    pub id: ImageId,
    pub author: String,
    pub title: Option<String>,
    pub download_url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub source_url: Option<String>,
}

impl Image {
    pub fn album(&self) -> Option<AlbumKey> {
        album_key(&self.id)
    }
}

impl From<ListedImage> for Image {
    fn from(i: ListedImage) -> Self {
        Image {
            id: ImageId(i.id),
            author: i.author,
            title: i.title.filter(|t| !t.is_empty()),
            download_url: i.download_url,
            width: i.width,
            height: i.height,
            source_url: i.url,
        }
    }
}

/// Album an image id belongs to, or `None` for ids that aren't non-negative integers.
pub fn album_key(id: &ImageId) -> Option<AlbumKey> {
    id.0.parse::<u64>()
        .ok()
        .map(|n| (n % ALBUM_COUNT).to_string())
}

/// Distinct album keys of `images`, in order of first appearance.
pub fn albums(images: &[Image]) -> Vec<AlbumKey> {
    let mut keys: Vec<AlbumKey> = Vec::new();
    for key in images.iter().filter_map(Image::album) {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

#[cfg(test)]
pub(crate) fn image(id: &str, author: &str, title: Option<&str>) -> Image {
    Image {
        id: ImageId::from(id),
        author: author.to_string(),
        title: title.map(str::to_string),
        download_url: format!("https://picsum.photos/id/{}/400/300", id),
        width: None,
        height: None,
        source_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_key_is_id_modulo_five() {
        assert_eq!(album_key(&"0".into()), Some("0".to_string()));
        assert_eq!(album_key(&"7".into()), Some("2".to_string()));
        assert_eq!(album_key(&"1084".into()), Some("4".to_string()));
    }

    #[test]
    fn non_numeric_ids_have_no_album() {
        assert_eq!(album_key(&"abc".into()), None);
        assert_eq!(album_key(&"-3".into()), None);
        assert_eq!(album_key(&"".into()), None);
    }

    #[test]
    fn albums_are_distinct_in_first_appearance_order() {
        let images = vec![
            image("7", "a", None),
            image("3", "b", None),
            image("12", "c", None),
            image("x", "d", None),
            image("5", "e", None),
        ];

        assert_eq!(albums(&images), vec!["2", "3", "0"]);
        assert_eq!(albums(&images), albums(&images));
    }

    #[test]
    fn empty_titles_are_treated_as_absent() {
        let listed = ListedImage {
            id: "1".to_string(),
            author: "Alice".to_string(),
            title: Some(String::new()),
            download_url: "https://picsum.photos/id/1/10/10".to_string(),
            width: Some(10),
            height: Some(10),
            url: None,
        };

        let image = Image::from(listed);
        assert_eq!(image.title, None);
        assert_eq!(image.album().as_deref(), Some("1"));
    }
}
