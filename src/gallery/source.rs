use surf::StatusCode;
use thiserror::Error;
use url::Url;

use peanut_gallery_api_structs::ListedImage;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("listing request failed: {0}")]
    Http(surf::Error),
    #[error("listing endpoint answered {0}")]
    Status(StatusCode),
    #[error("malformed listing payload")]
    Decode(#[from] serde_json::Error),
}

impl From<surf::Error> for FetchError {
    fn from(err: surf::Error) -> Self {
        FetchError::Http(err)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// The only page the gallery ever shows.
    pub const FIRST: PageRequest = PageRequest { page: 1, limit: 50 };
}

#[async_trait::async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch_page(&self, page: PageRequest) -> Result<Vec<ListedImage>, FetchError>;
}

/// Reads the remote photo listing over HTTP.
#[derive(Debug)]
pub struct SurfImageSource {
    client: surf::Client,
    endpoint: Url,
}

impl SurfImageSource {
    pub fn new(endpoint: Url) -> Self {
        SurfImageSource {
            client: surf::Client::new(),
            endpoint,
        }
    }

    pub fn page_url(&self, page: PageRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.page.to_string())
            .append_pair("limit", &page.limit.to_string());
        url
    }
}

#[async_trait::async_trait]
impl ImageSource for SurfImageSource {
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_page(&self, page: PageRequest) -> Result<Vec<ListedImage>, FetchError> {
        let url = self.page_url(page);
        let mut res = self.client.get(url.as_str()).await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = res.body_string().await?;
        let images: Vec<ListedImage> = serde_json::from_str(&body)?;
        tracing::debug!(count = images.len(), "fetched listing page");
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use async_std::net::TcpListener;
    use tide::{Request, Response};

    use super::*;

    async fn listing(_req: Request<()>) -> tide::Result<Response> {
        Ok(Response::builder(StatusCode::Ok)
            .content_type(tide::http::mime::JSON)
            .body(
                r#"[
                    {"id": "0", "author": "Alejandro Escamilla", "width": 5000, "height": 3333,
                     "url": "https://unsplash.com/photos/yC-Yzbqy7PY",
                     "download_url": "https://picsum.photos/id/0/5000/3333"},
                    {"id": "7", "author": "Alejandro Escamilla", "title": "Desk",
                     "download_url": "https://picsum.photos/id/7/4728/3168"}
                ]"#,
            )
            .build())
    }

    async fn broken(_req: Request<()>) -> tide::Result<Response> {
        Ok(Response::builder(StatusCode::InternalServerError).build())
    }

    async fn not_a_list(_req: Request<()>) -> tide::Result<Response> {
        Ok(Response::builder(StatusCode::Ok)
            .content_type(tide::http::mime::JSON)
            .body(r#"{"error": "rate limited"}"#)
            .build())
    }

    /// Serves a fake listing service on an ephemeral port and returns its base URL.
    async fn serve_listing() -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut app = tide::new();
        app.at("/v2/list").get(listing);
        app.at("/broken").get(broken);
        app.at("/not-a-list").get(not_a_list);
        async_std::task::spawn(app.listen(listener));

        Url::parse(&format!("http://{}/", addr)).unwrap()
    }

    #[async_std::test]
    async fn fetch_page_decodes_listing() {
        let base = serve_listing().await;
        let source = SurfImageSource::new(base.join("v2/list").unwrap());

        let images = source.fetch_page(PageRequest::FIRST).await.unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].width, Some(5000));
        assert_eq!(images[1].title.as_deref(), Some("Desk"));
    }

    #[async_std::test]
    async fn fetch_page_reports_failure_kinds() {
        let base = serve_listing().await;

        let source = SurfImageSource::new(base.join("broken").unwrap());
        let err = source.fetch_page(PageRequest::FIRST).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(StatusCode::InternalServerError)));

        let source = SurfImageSource::new(base.join("not-a-list").unwrap());
        let err = source.fetch_page(PageRequest::FIRST).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[async_std::test]
    async fn fetch_page_reports_unreachable_endpoint() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = SurfImageSource::new(Url::parse(&format!("http://{}/v2/list", addr)).unwrap());
        let err = source.fetch_page(PageRequest::FIRST).await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
    }

    #[test]
    fn page_url_appends_fixed_page_parameters() {
        let source = SurfImageSource::new(Url::parse("https://picsum.photos/v2/list").unwrap());
        assert_eq!(
            source.page_url(PageRequest::FIRST).as_str(),
            "https://picsum.photos/v2/list?page=1&limit=50"
        );
    }

    #[test]
    fn page_url_keeps_existing_query() {
        let source = SurfImageSource::new(Url::parse("http://localhost:9000/list?grayscale").unwrap());
        assert_eq!(
            source.page_url(PageRequest::FIRST).as_str(),
            "http://localhost:9000/list?grayscale&page=1&limit=50"
        );
    }
}
