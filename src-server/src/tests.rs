//! Integration tests for the session gate.

use std::sync::Arc;

use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
use reqwest::{redirect::Policy, Client, StatusCode};
use tempfile::TempDir;

use crate::auth::fake::{FakeAuth, EMAIL, EXPIRED_ACCESS, PASSWORD, VALID_ACCESS, VALID_REFRESH};
use crate::config::Config;
use crate::{create_router, AppState};

const INDEX_HTML: &str = "<!doctype html><title>ProjeX</title>";

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_auth(FakeAuth::default()).await
    }

    async fn with_auth(auth: FakeAuth) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(temp_dir.path().join("index.html"), INDEX_HTML).unwrap();
        std::fs::write(temp_dir.path().join("projex-ui.js"), "export default 1;").unwrap();

        let config = Config {
            supabase_url: "http://auth.invalid".to_string(),
            supabase_anon_key: "anon".to_string(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            dist_dir: temp_dir.path().to_path_buf(),
            log_level: "warn".to_string(),
            secure_cookies: false,
        };

        let state = AppState::new(config, Arc::new(auth)).expect("Failed to build state");
        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::builder().redirect(Policy::none()).build().unwrap(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str, cookie: Option<&str>) -> reqwest::Response {
        let mut req = self.client.get(self.url(path));
        if let Some(cookie) = cookie {
            req = req.header(COOKIE, cookie);
        }
        req.send().await.unwrap()
    }
}

fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect()
}

fn signed_in() -> String {
    format!("sb-access-token={}; sb-refresh-token={}", VALID_ACCESS, VALID_REFRESH)
}

// ============================================================================
// Redirects
// ============================================================================

#[tokio::test]
async fn test_private_page_redirects_to_login_with_next() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/projects", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?next=%2Fprojects");
}

#[tokio::test]
async fn test_public_pages_need_no_session() {
    let fixture = TestFixture::new().await;

    for path in ["/", "/login", "/profile/some-user", "/auth/callback"] {
        let response = fixture.get(path, None).await;
        assert_eq!(response.status(), StatusCode::OK, "path {}", path);
        assert_eq!(response.text().await.unwrap(), INDEX_HTML);
    }
}

#[tokio::test]
async fn test_nested_profile_path_is_private() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/profile/a/b", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_signed_in_login_redirects_to_next() {
    let fixture = TestFixture::new().await;
    let cookie = signed_in();

    let response = fixture.get("/login?next=%2Fprojects%2F42", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/projects/42");

    let response = fixture.get("/create-account", Some(&cookie)).await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_signed_in_login_ignores_offsite_next() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .get("/login?next=%2F%2Fevil.example", Some(&signed_in()))
        .await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_signed_in_private_page_passes() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/projects", Some(&signed_in())).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_bundle_files_bypass_gate() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/projex-ui.js", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_dotted_and_prefixed_private_paths_redirect() {
    let fixture = TestFixture::new().await;

    for (path, next) in [
        ("/projects/a.b", "%2Fprojects%2Fa%2Eb"),
        ("/projects/report.pdf", "%2Fprojects%2Freport%2Epdf"),
        ("/projects/v1.2", "%2Fprojects%2Fv1%2E2"),
        ("/auth/logout-now", "%2Fauth%2Flogout%2Dnow"),
        ("/auth/loginx/settings", "%2Fauth%2Floginx%2Fsettings"),
    ] {
        let response = fixture.get(path, None).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "path {}", path);
        assert_eq!(location(&response), format!("/login?next={}", next), "path {}", path);
    }
}

#[tokio::test]
async fn test_login_route_get_is_gated() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/auth/login", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?next=%2Fauth%2Flogin");
}

// ============================================================================
// Cookies
// ============================================================================

#[tokio::test]
async fn test_expired_token_is_refreshed_and_rewritten() {
    let fixture = TestFixture::new().await;
    let cookie = format!("sb-access-token={}; sb-refresh-token={}", EXPIRED_ACCESS, VALID_REFRESH);

    let response = fixture.get("/projects", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies[0].starts_with("sb-access-token=fresh-access;"));
    assert!(cookies[1].starts_with("sb-refresh-token=fresh-refresh;"));
}

#[tokio::test]
async fn test_revoked_refresh_clears_cookies_and_redirects() {
    let fixture = TestFixture::new().await;
    let cookie = format!("sb-access-token={}; sb-refresh-token=revoked", EXPIRED_ACCESS);

    let response = fixture.get("/projects", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
}

#[tokio::test]
async fn test_auth_service_down_counts_as_signed_out() {
    let fixture = TestFixture::with_auth(FakeAuth {
        offline: true,
        ..Default::default()
    })
    .await;

    let response = fixture.get("/projects", Some(&signed_in())).await;
    assert_eq!(location(&response), "/login?next=%2Fprojects");

    let response = fixture.get("/login", Some(&signed_in())).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Login / logout
// ============================================================================

#[tokio::test]
async fn test_login_sets_cookies_and_follows_next() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .post(fixture.url("/auth/login?next=%2Fprojects"))
        .form(&[("email", EMAIL), ("password", PASSWORD)])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/projects");
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("sb-access-token=fresh-access;")));
    assert!(cookies.iter().any(|c| c.starts_with("sb-refresh-token=fresh-refresh;")));
}

#[tokio::test]
async fn test_login_failure_returns_to_form() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .post(fixture.url("/auth/login?next=%2Fprojects"))
        .form(&[("email", EMAIL), ("password", "wrong")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/login?error=Invalid%20login%20credentials&next=%2Fprojects"
    );
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_logout_clears_cookies() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .post(fixture.url("/auth/logout"))
        .header(COOKIE, signed_in())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
}
