use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;
use tide::{Redirect, Request, Response};

use crate::gallery::favorites::{FavoriteSet, Favorites, FAVORITES_KEY};
use crate::gallery::store::ImageStore;
use crate::gallery::view::{ViewEvent, ViewState};
use crate::models::images::{AlbumKey, Image};
use crate::web::cookies::CookieStorage;
use crate::web::image_id_param;

mod utils;

pub(in super::super) fn mount(route: &mut tide::Server<crate::State>) {
    route.at("/").get(gallery);
    route.at("/favorites/:image_id/toggle").post(toggle_favorite);
}

#[derive(Serialize)]
struct Card<'a> {
    image: &'a Image,
    album: Option<AlbumKey>,
    favorite: bool,
    open_href: String,
    toggle_action: String,
}

#[derive(Serialize)]
struct LightboxView<'a> {
    image: &'a Image,
    close_href: String,
}

fn toggle_action(image: &Image, view: &ViewState) -> Result<String, serde_qs::Error> {
    let id = utf8_percent_encode(image.id.as_str(), NON_ALPHANUMERIC);
    let query = view.to_query()?;
    if query.is_empty() {
        Ok(format!("/favorites/{}/toggle", id))
    } else {
        Ok(format!("/favorites/{}/toggle?{}", id, query))
    }
}

fn gallery_context(
    context: &mut tera::Context,
    store: &ImageStore,
    view: &ViewState,
    favorites: &FavoriteSet,
) -> Result<(), serde_qs::Error> {
    let visible = crate::gallery::filter::filter_images(store.images(), &view.filter(), favorites);

    let cards = visible
        .into_iter()
        .map(|image| {
            Ok::<_, serde_qs::Error>(Card {
                image,
                album: image.album(),
                favorite: favorites.contains(&image.id),
                open_href: view.clone().apply(ViewEvent::Open(image.id.clone())).href()?,
                toggle_action: toggle_action(image, view)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let lightbox = match view.lightbox.resolve(store.images()) {
        Some(image) => Some(LightboxView {
            image,
            close_href: view.clone().apply(ViewEvent::Close).href()?,
        }),
        None => None,
    };

    let toggle_view = view.clone().apply(ViewEvent::ToggleFavoritesView).apply(ViewEvent::Close);
    let reset_album = view.clone().apply(ViewEvent::SelectAlbum(String::new()));

    context.insert("search", &view.search);
    context.insert("album", &view.album);
    context.insert("favorites_only", &view.favorites_only);
    context.insert("albums", store.albums());
    context.insert("total", &store.images().len());
    context.insert("favorite_count", &favorites.len());
    context.insert("cards", &cards);
    context.insert("lightbox", &lightbox);
    context.insert("toggle_view_href", &toggle_view.href()?);
    context.insert("all_albums_href", &reset_album.href()?);

    Ok(())
}

async fn gallery(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();
    let view: ViewState = req.query()?;

    let favorites = Favorites::load(CookieStorage::from_request(&req, &[FAVORITES_KEY]));
    let store = state.gallery.read().await;

    let title = match view.lightbox.resolve(store.images()) {
        Some(image) => image.title.clone().unwrap_or_else(|| image.author.clone()),
        None if view.favorites_only => "favorites".to_string(),
        None => "gallery".to_string(),
    };

    let mut context = utils::page_context(state, &title, &view.href()?);
    gallery_context(&mut context, &store, &view, favorites.set())?;

    let body = utils::render(state, "gallery.html", &context)?;
    Ok(utils::html_response(body))
}

async fn toggle_favorite(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();
    let view: ViewState = req.query()?;
    let image_id = image_id_param(&req)?;

    let mut favorites = Favorites::load(CookieStorage::from_request(&req, &[FAVORITES_KEY]));
    let known = favorites.set().contains(&image_id)
        || state.gallery.read().await.get(&image_id).is_some();
    if !known {
        return Ok(Response::builder(tide::http::StatusCode::NotFound).build());
    }

    let toggle = favorites.toggle(&image_id)?;
    tracing::info!(image_id = %image_id, ?toggle, "toggled favorite");

    let mut res: Response = Redirect::see_other(view.href()?).into();
    favorites.into_storage().apply(&mut res);
    Ok(res)
}
