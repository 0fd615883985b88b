use tide::Request;

use crate::models::images::ImageId;

pub mod api;
pub mod cookies;
pub mod html;

pub(super) fn mount(app: &mut tide::Server<crate::State>) {
    html::mount(app);
    api::mount(app.at("/api"));
}

fn image_id_param(req: &Request<crate::State>) -> tide::Result<ImageId> {
    let raw = req.param("image_id")?;
    let id = percent_encoding::percent_decode_str(raw)
        .decode_utf8_lossy()
        .to_string();
    Ok(ImageId::new(id))
}
