//! httptest servers emulating the album server for tests.

use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::json;

pub use httptest;

/// Name of the session cookie issued by the album server.
pub const SESSION_COOKIE: &str = "albums_session";

/// Start an empty mock album server.
pub fn album_server() -> Server {
    Server::run()
}

/// Base URL of the server with an optional root path, e.g. `/albums`.
pub fn base_url(server: &Server, root_path: &str) -> String {
    let url = server.url_str(root_path);
    url.trim_end_matches('/').to_string()
}

/// Expect a successful POST `{root}/login` issuing a session cookie.
pub fn expect_login(server: &Server, root_path: &str, username: &str) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", eq(format!("{}/login", root_path))),
            request::body(json_decoded(eq(json!({
                "username": username,
                "password": "secret"
            })))),
        ])
        .respond_with(
            status_code(200)
                .insert_header("content-type", "application/json")
                .insert_header(
                    "set-cookie",
                    format!("{}=token-{}; Path=/; HttpOnly", SESSION_COOKIE, username),
                )
                .body(json!({ "ok": true, "username": username }).to_string()),
        ),
    );
}

/// Expect a rejected POST `{root}/login`.
pub fn expect_login_rejected(server: &Server, root_path: &str) {
    server.expect(
        Expectation::matching(request::method_path("POST", eq(format!("{}/login", root_path))))
            .respond_with(
                status_code(401)
                    .insert_header("content-type", "application/json")
                    .body(json!({ "detail": "Invalid username/password" }).to_string()),
            ),
    );
}

/// Expect a GET `{root}/me` answered with the given user.
pub fn expect_me(server: &Server, root_path: &str, username: &str) {
    server.expect(
        Expectation::matching(request::method_path("GET", eq(format!("{}/me", root_path))))
            .respond_with(json_encoded(json!({ "username": username }))),
    );
}

/// Expect a GET `{root}/me` without a session.
pub fn expect_me_unauthenticated(server: &Server, root_path: &str) {
    server.expect(
        Expectation::matching(request::method_path("GET", eq(format!("{}/me", root_path))))
            .respond_with(
                status_code(401)
                    .insert_header("content-type", "application/json")
                    .body(json!({ "detail": "Not authenticated" }).to_string()),
            ),
    );
}

/// Expect a POST `{root}/logout`.
pub fn expect_logout(server: &Server, root_path: &str) {
    server.expect(
        Expectation::matching(request::method_path("POST", eq(format!("{}/logout", root_path))))
            .respond_with(json_encoded(json!({ "ok": true }))),
    );
}

/// Expect a GET `{root}/albums` listing albums whose id doubles as title.
pub fn expect_albums(server: &Server, root_path: &str, ids: &[&str]) {
    let albums: Vec<_> = ids.iter().map(|id| json!({ "id": id, "title": id })).collect();
    server.expect(
        Expectation::matching(request::method_path("GET", eq(format!("{}/albums", root_path))))
            .respond_with(json_encoded(serde_json::Value::Array(albums))),
    );
}

/// Expect a GET `{root}/album/{id}/contents`. `encoded_id` must be given as
/// it appears on the wire.
pub fn expect_contents(server: &Server, root_path: &str, encoded_id: &str, photos: &[&str]) {
    server.expect(
        Expectation::matching(request::method_path(
            "GET",
            eq(format!("{}/album/{}/contents", root_path, encoded_id)),
        ))
        .respond_with(json_encoded(json!(photos))),
    );
}

/// Expect a failing GET `{root}/album/{id}/contents`.
pub fn expect_contents_missing(server: &Server, root_path: &str, encoded_id: &str) {
    server.expect(
        Expectation::matching(request::method_path(
            "GET",
            eq(format!("{}/album/{}/contents", root_path, encoded_id)),
        ))
        .respond_with(
            status_code(404)
                .insert_header("content-type", "application/json")
                .body(json!({ "detail": "Album not found" }).to_string()),
        ),
    );
}
