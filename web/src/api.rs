use guessr_core as game;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, Response};

pub(crate) fn url_for(api_base: &str, endpoint: game::Endpoint) -> String {
    format!("{}{}", api_base.trim_end_matches('/'), endpoint.path())
}

fn transport_error(context: &str, err: JsValue) -> game::ClientError {
    log::warn!("{}: {:?}", context, err);
    game::ClientError::Transport
}

/// Performs one request with the session cookie attached and hands back the raw reply.
pub(crate) async fn send(
    api_base: &str,
    request: &game::ServiceRequest,
) -> game::Result<game::HttpReply> {
    let endpoint = request.endpoint();
    let url = url_for(api_base, endpoint);
    let body = request.body().map_err(|err| {
        log::error!("could not encode {:?}: {}", request, err);
        game::ClientError::Transport
    })?;

    let init = RequestInit::new();
    init.set_method(endpoint.method().as_str());
    init.set_credentials(RequestCredentials::Include);
    if let Some(body) = &body {
        init.set_body(&JsValue::from_str(body));
    }

    let http_request = Request::new_with_str_and_init(&url, &init)
        .map_err(|err| transport_error("invalid request", err))?;
    if body.is_some() {
        http_request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|err| transport_error("invalid header", err))?;
    }

    log::debug!("{} {}", endpoint.method().as_str(), url);
    let response = JsFuture::from(gloo::utils::window().fetch_with_request(&http_request))
        .await
        .map_err(|err| transport_error("fetch failed", err))?;
    let response: Response = response
        .dyn_into()
        .map_err(|err| transport_error("not a response", err))?;
    let text = response
        .text()
        .map_err(|err| transport_error("unreadable body", err))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|err| transport_error("unreadable body", err))?;

    let status = response.status();
    log::debug!("{} {} -> {}", endpoint.method().as_str(), url, status);
    Ok(game::HttpReply::new(status, text.as_string().unwrap_or_default()))
}
