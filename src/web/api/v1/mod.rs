use tide::{Body, Request, Response};

use crate::gallery::favorites::{Favorites, Toggle, FAVORITES_KEY};
use crate::gallery::filter::filter_images;
use crate::gallery::view::ViewState;
use crate::web::cookies::CookieStorage;
use crate::web::image_id_param;

pub(super) fn mount(mut route: tide::Route<crate::State>) {
    route.at("/images").get(list_images);
    route.at("/albums").get(list_albums);

    route.at("/favorites").get(list_favorites);
    route
        .at("/favorites/:image_id/toggle")
        .post(toggle_favorite);
}

fn cookie_favorites(req: &Request<crate::State>) -> Favorites<CookieStorage> {
    Favorites::load(CookieStorage::from_request(req, &[FAVORITES_KEY]))
}

async fn list_images(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();
    let view: ViewState = req.query()?;
    let favorites = cookie_favorites(&req);

    let store = state.gallery.read().await;
    let images = filter_images(store.images(), &view.filter(), favorites.set());

    let res = Response::builder(tide::http::StatusCode::Ok)
        .body(Body::from_json(&images)?)
        .build();
    Ok(res)
}

async fn list_albums(req: Request<crate::State>) -> tide::Result<Response> {
    let store = req.state().gallery.read().await;

    let res = Response::builder(tide::http::StatusCode::Ok)
        .body(Body::from_json(&store.albums())?)
        .build();
    Ok(res)
}

async fn list_favorites(req: Request<crate::State>) -> tide::Result<Response> {
    let favorites = cookie_favorites(&req);

    let res = Response::builder(tide::http::StatusCode::Ok)
        .body(Body::from_json(favorites.set())?)
        .build();
    Ok(res)
}

async fn toggle_favorite(req: Request<crate::State>) -> tide::Result<Response> {
    let image_id = image_id_param(&req)?;

    let mut favorites = cookie_favorites(&req);

    // Members can always be removed, even once they have left the listing.
    let known = favorites.set().contains(&image_id)
        || req.state().gallery.read().await.get(&image_id).is_some();
    if !known {
        return Ok(Response::builder(tide::http::StatusCode::NotFound)
            .body(tide::convert::json!({
                "reason": format!("No image with id {} is loaded.", image_id),
            }))
            .build());
    }

    let toggle = favorites.toggle(&image_id)?;
    tracing::debug!(image_id = %image_id, ?toggle, "toggled favorite");

    let mut res = Response::builder(tide::http::StatusCode::Ok)
        .body(tide::convert::json!({
            "id": image_id,
            "favorite": toggle == Toggle::Added,
            "favorites": favorites.set(),
        }))
        .build();
    favorites.into_storage().apply(&mut res);
    Ok(res)
}
