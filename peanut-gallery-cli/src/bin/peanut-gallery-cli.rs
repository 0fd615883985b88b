use std::path::PathBuf;

use structopt::StructOpt;
use url::Url;

use peanut_gallery::gallery::favorites::{Favorites, Toggle};
use peanut_gallery::gallery::filter::{filter_images, Filter};
use peanut_gallery::gallery::source::{ImageSource, PageRequest, SurfImageSource};
use peanut_gallery::gallery::storage::JsonFileStorage;
use peanut_gallery::gallery::store::{FetchOutcome, ImageStore};
use peanut_gallery::models::images::ImageId;

#[derive(StructOpt)]
struct SharedArgs {
    /// Remote photo listing endpoint.
    #[structopt(
        long,
        default_value = "https://picsum.photos/v2/list",
        env = "PEANUT_GALLERY_LISTING_ENDPOINT"
    )]
    endpoint: Url,

    /// File favorites are persisted in.
    #[structopt(
        long,
        parse(from_os_str),
        default_value = "favorites.json",
        env = "PEANUT_GALLERY_FAVORITES_PATH"
    )]
    favorites_path: PathBuf,
}

#[derive(StructOpt)]
pub struct ListArgs {
    #[structopt(flatten)]
    shared: SharedArgs,

    /// Only show images whose author or title contains this text.
    #[structopt(long, default_value = "")]
    search: String,

    /// Only show images from this album.
    #[structopt(long, default_value = "")]
    album: String,

    /// Only show favorited images.
    #[structopt(long)]
    favorites_only: bool,
}

#[derive(StructOpt)]
pub struct ToggleArgs {
    #[structopt(flatten)]
    shared: SharedArgs,

    /// Image ID to add to or remove from favorites.
    #[structopt(name = "IMAGE_ID")]
    image_id: String,
}

#[derive(StructOpt)]
enum Command {
    /// List the images of the gallery.
    List(ListArgs),
    /// List the album keys of the gallery.
    Albums(SharedArgs),
    /// List favorited image IDs.
    Favorites(SharedArgs),
    /// Toggle whether an image is a favorite.
    Toggle(ToggleArgs),
}

async fn load_store(args: &SharedArgs) -> ImageStore {
    let source = SurfImageSource::new(args.endpoint.clone());
    let mut store = ImageStore::new();

    let generation = store.begin_fetch();
    let result = source.fetch_page(PageRequest::FIRST).await;
    if store.complete(generation, result) == FetchOutcome::Failed {
        log::warn!("Continuing with an empty gallery");
    }
    store
}

async fn list(args: ListArgs) -> std::io::Result<()> {
    let store = load_store(&args.shared).await;
    let favorites = Favorites::load(JsonFileStorage::new(&args.shared.favorites_path));

    let filter = Filter {
        search: &args.search,
        album: &args.album,
        favorites_only: args.favorites_only,
    };
    for image in filter_images(store.images(), &filter, favorites.set()) {
        let marker = if favorites.set().contains(&image.id) { "*" } else { " " };
        let album = image.album().unwrap_or_else(|| "-".to_string());
        println!(
            "{} {:>5} [{}] {} {}",
            marker, image.id, album, image.author, image.download_url
        );
    }

    Ok(())
}

async fn albums(args: SharedArgs) -> std::io::Result<()> {
    let store = load_store(&args).await;
    for album in store.albums() {
        println!("{}", album);
    }
    Ok(())
}

fn favorites(args: SharedArgs) -> std::io::Result<()> {
    let favorites = Favorites::load(JsonFileStorage::new(&args.favorites_path));
    for id in favorites.set().ids() {
        println!("{}", id);
    }
    Ok(())
}

fn toggle(args: ToggleArgs) -> std::io::Result<()> {
    let mut favorites = Favorites::load(JsonFileStorage::new(&args.shared.favorites_path));
    let id = ImageId::new(args.image_id);

    match favorites.toggle(&id) {
        Ok(Toggle::Added) => log::info!("Added {} to favorites", id),
        Ok(Toggle::Removed) => log::info!("Removed {} from favorites", id),
        Err(err) => {
            log::error!("Could not save favorites to {:?}: {}", args.shared.favorites_path, err);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, err));
        },
    }

    Ok(())
}

#[async_std::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    match Command::from_args() {
        Command::List(args) => list(args).await,
        Command::Albums(args) => albums(args).await,
        Command::Favorites(args) => favorites(args),
        Command::Toggle(args) => toggle(args),
    }
}
