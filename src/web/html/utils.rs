use html_minifier::HTMLMinifier;
use tera::Context;
use thiserror::Error;
use tide::Response;
use tracing::error;

use crate::State;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("rendering error")]
    Tera(#[from] tera::Error),
}

/// Context entries every page template expects.
pub(super) fn page_context(state: &State, title: &str, canonical_path: &str) -> Context {
    let mut context = Context::new();
    context.insert("cache_buster", &state.cache_busting_string);
    context.insert("title", title);
    context.insert(
        "canonical_href",
        &format!("{}{}", state.args.base_url.trim_end_matches('/'), canonical_path),
    );
    context
}

/// Renders `template` and minifies it, falling back to the unminified page.
pub(super) fn render(
    state: &State,
    template: &'static str,
    context: &Context,
) -> Result<String, TemplateError> {
    let rendered = state.tera.render(template, context)?;

    let mut html_minifier = HTMLMinifier::new();
    if let Err(err) = html_minifier.digest(&rendered) {
        error!(template, "Failed to minify HTML: {}", err);
        return Ok(rendered);
    };

    match std::str::from_utf8(html_minifier.get_html()) {
        Ok(minified) => Ok(minified.to_string()),
        Err(err) => {
            error!(template, "Failed to parse minified HTML as UTF-8: {}", err);
            Ok(rendered)
        },
    }
}

pub(super) fn html_response(body: String) -> Response {
    Response::builder(tide::http::StatusCode::Ok)
        .content_type(tide::http::mime::HTML)
        .body(body)
        .build()
}
