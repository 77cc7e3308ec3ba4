use std::{convert::Infallible, sync::Arc};
use warp::{http::StatusCode, Filter, Rejection, Reply};

use crate::{handlers, AppContext};

/// URL segment charts are served under; also the `image_path` prefix.
pub const STATIC_PREFIX: &str = "static";

/// Largest accepted request body.
const MAX_BODY_BYTES: u64 = 64 * 1024;

static INDEX_HTML: &str = include_str!("../static/index.html");

pub fn routes(
    context: Arc<AppContext>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(INDEX_HTML));

    let generate_plot = warp::path("generate_plot")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_context(context.clone()))
        .and_then(handlers::generate_plot);

    let charts = warp::path(STATIC_PREFIX).and(warp::fs::dir(context.store.dir().to_path_buf()));

    index
        .or(generate_plot)
        .or(charts)
        .recover(handle_rejection)
        .with(warp::log("wsa_server::http"))
}

fn with_context(
    context: Arc<AppContext>,
) -> impl Filter<Extract = (Arc<AppContext>,), Error = Infallible> + Clone {
    warp::any().map(move || context.clone())
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message, kind) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string(), "not_found")
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string(), "malformed_input")
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "request body too large".to_string(),
            "malformed_input",
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "method not allowed".to_string(),
            "method_not_allowed",
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("unhandled rejection: {:?}", err),
            "internal",
        )
    };
    Ok(handlers::error_reply(status, message, kind))
}
