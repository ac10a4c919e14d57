//! HTTP span helpers.

use kiosk_app::bson::oid::ObjectId;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = normalise_path(path);
    let span_name = format!("{method} {route}");

    RequestSpanName { route, span_name }
}

/// Collapse product ids and message ids into placeholders so metric labels
/// stay bounded.
fn normalise_path(path: &str) -> String {
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

    let normalised: Vec<&str> = segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let previous = index.checked_sub(1).and_then(|prev| segments.get(prev));

            if ObjectId::parse_str(segment).is_ok() || previous == Some(&"products") {
                "{id}"
            } else if previous == Some(&"msg") {
                "{msg_id}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", normalised.join("/"))
}
