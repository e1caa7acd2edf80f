use super::*;

#[test]
fn join_url_uses_single_slash() {
    assert_eq!(join_url("http://localhost:8000/", "/api/ai/health"), "http://localhost:8000/api/ai/health");
    assert_eq!(join_url("http://localhost:8000", "api/menus"), "http://localhost:8000/api/menus");
}

#[test]
fn client_trims_trailing_slash_from_base() {
    let client = ApiClient::new("http://backend:8000///", 5).unwrap();
    assert_eq!(client.url(&status_path(3)), "http://backend:8000/api/ai/status/3");
}
