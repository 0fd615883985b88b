use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use async_std::sync::RwLock;
use opentelemetry_tide::TideExt;
use structopt::StructOpt;
use url::Url;

use crate::gallery::source::{ImageSource, SurfImageSource};
use crate::gallery::store::{load_on_mount, ImageStore};

pub mod gallery;
pub mod models;
pub mod telemetry;
pub mod web;

#[derive(Clone, Debug)]
pub struct State {
    pub args: Arc<Args>,
    pub gallery: Arc<RwLock<ImageStore>>,
    pub tera: Arc<tera::Tera>,
    pub cache_busting_string: Option<String>,
}

#[derive(Debug)]
pub enum Error {
    TemplatePathError(std::io::Error),
    TemplateParseError(tera::Error),
    TelemetryInitError(anyhow::Error),
    ListenError(std::io::Error),
}

impl From<Error> for u8 {
    fn from(error: Error) -> u8 {
        match error {
            Error::TemplatePathError(_) => 2,
            Error::TemplateParseError(_) => 3,
            Error::TelemetryInitError(_) => 4,
            Error::ListenError(_) => 5,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::TemplatePathError(err) => {
                write!(f, "Template path error: {}", err)
            },
            Error::TemplateParseError(err) => {
                write!(f, "Template parsing error: {}", err)
            },
            Error::TelemetryInitError(err) => {
                write!(f, "Failed to init telemetry: {}", err)
            },
            Error::ListenError(err) => {
                write!(f, "Failed to serve gallery: {}", err)
            },
        }
    }
}

#[derive(Debug, StructOpt)]
pub struct Args {
    /// Host address to bind to.
    #[structopt(long, default_value = "localhost", env = "PEANUT_GALLERY_BIND_ADDRESS")]
    address: String,
    /// Port to bind to.
    #[structopt(long, default_value = "8166", env = "PEANUT_GALLERY_BIND_PORT")]
    port: u16,

    /// Gallery base URL.
    #[structopt(long, default_value = "http://localhost:8166", env = "PEANUT_GALLERY_BASE_URL")]
    base_url: String,

    /// Remote photo listing endpoint the gallery is filled from.
    #[structopt(
        long,
        default_value = "https://picsum.photos/v2/list",
        env = "PEANUT_GALLERY_LISTING_ENDPOINT"
    )]
    listing_endpoint: Url,

    /// Path to Tera templates directory
    #[structopt(
        long,
        parse(from_os_str),
        default_value = "./templates",
        env = "PEANUT_GALLERY_TEMPLATE_PATH"
    )]
    template_path: std::path::PathBuf,
}

impl Args {
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }
}

/// Loads every `*.html` template below `template_path`.
pub fn load_templates(template_path: &Path) -> Result<tera::Tera, Error> {
    let template_path = template_path
        .canonicalize()
        .map_err(Error::TemplatePathError)?;
    tera::Tera::new(&template_path.join("**/*.html").to_string_lossy())
        .map_err(Error::TemplateParseError)
}

fn read_cache_buster(template_path: &Path) -> Option<String> {
    let mut file = std::fs::File::open(template_path.join("cache-buster")).ok()?;
    let mut data = String::new();
    if let Err(err) = file.read_to_string(&mut data) {
        tracing::warn!("couldn't read cache busting string from file: {}", err);
        return None;
    }
    data.split_whitespace().next().map(|s| s.to_string())
}

pub fn app(state: State) -> tide::Server<State> {
    let mut app = tide::with_state(state);

    app.with_default_tracing_middleware();

    web::mount(&mut app);
    app
}

pub async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    let args = Arc::new(Args::from_args());

    telemetry::init().map_err(Error::TelemetryInitError)?;

    let tera = load_templates(&args.template_path)?;
    let cache_busting_string = read_cache_buster(&args.template_path);

    let gallery = Arc::new(RwLock::new(ImageStore::new()));
    let source: Arc<dyn ImageSource> = Arc::new(SurfImageSource::new(args.listing_endpoint.clone()));
    async_std::task::spawn(load_on_mount(gallery.clone(), source));

    let state = State {
        args: args.clone(),
        gallery: gallery.clone(),
        tera: Arc::new(tera),
        cache_busting_string,
    };
    let app = app(state);

    let address: &str = args.address.as_ref();
    tracing::info!(address, port = args.port, "serving gallery");
    let served = app.listen((address, args.port)).await;

    gallery.write().await.unmount();
    served.map_err(Error::ListenError)
}
