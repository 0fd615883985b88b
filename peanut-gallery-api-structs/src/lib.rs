/// One record of the remote photo listing, as returned by the listing endpoint.
///
/// Only `id`, `author` and `download_url` are guaranteed. Unknown fields are ignored.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ListedImage {
    pub id: String,
    pub author: String,
    #[serde(default)]
    pub title: Option<String>,
    pub download_url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub url: Option<String>,
}
