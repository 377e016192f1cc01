//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use sumi_sitemap::config::{Config, RobotsMode};
use sumi_sitemap::crawler::crawl;
use sumi_sitemap::{Crawler, DomainMatcher, SumiError, UrlState};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates an HTML response with the given body
fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

/// Creates a test configuration with a short timeout
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.crawler.request_timeout_secs = 5;
    config.crawler.connect_timeout_secs = 2;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config
}

#[tokio::test]
async fn test_single_page_assets_without_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r##"<html><head>
                <link rel="stylesheet" href="/news.css">
                <script src="//schemetest.js"></script>
            </head><body>
                <a href="#">Back to top</a>
            </body></html>"##,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let start = format!("{}/", base_url);
    let report = crawl(&start, &create_test_config())
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages.len(), 1);
    let page = &report.pages[0];
    assert_eq!(page.referrer, start);
    assert!(page.links.is_empty(), "fragment link must be ignored");
    assert_eq!(
        page.assets,
        vec![
            format!("{}/news.css", base_url),
            "http://schemetest.js/".to_string()
        ]
    );
}

#[tokio::test]
async fn test_crawl_follows_root_relative_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><body>
                <a href="/yahoo">Yahoo</a>
                <a href="/google">Google</a>
                <a href="/bing">Bing</a>
                <a href="/duckduckgo">DuckDuckGo</a>
            </body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    for page in ["/yahoo", "/google", "/bing", "/duckduckgo"] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(html(""))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let start = format!("{}/", base_url);
    let report = crawl(&start, &create_test_config())
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages.len(), 5);

    // Breadth-first: the start page, then its links in document order
    let referrers: Vec<&str> = report.pages.iter().map(|p| p.referrer.as_str()).collect();
    assert_eq!(
        referrers,
        vec![
            start.clone(),
            format!("{}/yahoo", base_url),
            format!("{}/google", base_url),
            format!("{}/bing", base_url),
            format!("{}/duckduckgo", base_url),
        ]
    );
    assert_eq!(report.pages[0].links.len(), 4);
    assert_eq!(report.state.count(UrlState::Visited), 5);
    assert!(report.errored().is_empty());
}

#[test]
fn test_ip_and_deep_hosts_are_unrestricted() {
    assert_eq!(DomainMatcher::new("127.0.0.1"), DomainMatcher::Unrestricted);
    assert_eq!(
        DomainMatcher::new("a.b.c.example.com"),
        DomainMatcher::Unrestricted
    );

    let config = create_test_config();
    let crawler = Crawler::new("http://127.0.0.1:8080/", &config).expect("valid start URL");
    assert_eq!(crawler.matcher(), &DomainMatcher::Unrestricted);
    assert!(crawler.matcher().in_scope("https://anything.example.org/"));
}

#[tokio::test]
async fn test_ip_start_url_follows_links_to_other_hosts() {
    let start_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let start = format!("{}/", start_server.uri());
    let other_port = other_server.address().port();
    let other_page = format!("http://localhost:{}/page", other_port);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(&format!(r#"<a href="{}">Elsewhere</a>"#, other_page)))
        .expect(1)
        .mount(&start_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(html(r#"<img src="/pixel.gif">"#))
        .expect(1)
        .mount(&other_server)
        .await;

    let report = crawl(&start, &create_test_config())
        .await
        .expect("Crawl failed");

    assert!(start.starts_with("http://127.0.0.1:"));
    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.pages[0].links, vec![other_page.clone()]);
    let page = report.page(&other_page).expect("page on the other host");
    assert_eq!(page.assets, vec![format!("{}/pixel.gif", start_server.uri())]);
    assert_eq!(report.state.state_of(&other_page), Some(UrlState::Visited));
}

#[tokio::test]
async fn test_robots_disallowed_url_never_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /admin"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><body>
                <a href="/about">About</a>
                <a href="/admin">Admin</a>
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html(r#"<a href="/admin">Admin again</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin"))
        .respond_with(html("secret"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let start = format!("{}/", base_url);
    let report = crawl(&start, &create_test_config())
        .await
        .expect("Crawl failed");

    let admin = format!("{}/admin", base_url);
    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.state.state_of(&admin), Some(UrlState::Excluded));
    assert_eq!(report.excluded(), vec![admin.as_str()]);
    assert!(report.page(&admin).is_none());

    // The excluded link still appears in the page's link list
    assert!(report.pages[0].links.contains(&admin));
}

#[tokio::test]
async fn test_redirect_into_disallowed_path_is_not_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /admin"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/old">Old</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/admin", base_url).as_str()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin"))
        .respond_with(html("secret"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let start = format!("{}/", base_url);
    let report = crawl(&start, &create_test_config())
        .await
        .expect("Crawl failed");

    let old = format!("{}/old", base_url);
    let admin = format!("{}/admin", base_url);

    assert_eq!(report.pages.len(), 1);
    assert!(report.page(&admin).is_none());
    assert_eq!(report.state.state_of(&old), Some(UrlState::Errored));
    assert_ne!(report.state.state_of(&admin), Some(UrlState::Visited));

    let admin_hits = mock_server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == "/admin")
        .count();
    assert_eq!(admin_hits, 0);
}

#[tokio::test]
async fn test_agent_mode_respects_user_agent_groups() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "User-agent: *\nDisallow: /private\n\nUser-agent: TestBot\nDisallow: /*.pdf$",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a href="/private/page">P</a><a href="/manual.pdf">M</a><a href="/ok">OK</a>"#,
        ))
        .mount(&mock_server)
        .await;

    // The `*` group does not apply once TestBot has its own group
    Mock::given(method("GET"))
        .and(path("/private/page"))
        .respond_with(html(""))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/manual.pdf"))
        .respond_with(html(""))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(html(""))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config();
    config.robots.mode = RobotsMode::Agent;

    let start = format!("{}/", base_url);
    let report = crawl(&start, &config).await.expect("Crawl failed");

    assert_eq!(report.pages.len(), 3);
    assert_eq!(
        report.excluded(),
        vec![format!("{}/manual.pdf", base_url).as_str()]
    );
    assert_eq!(
        report.state.state_of(&format!("{}/private/page", base_url)),
        Some(UrlState::Visited)
    );
}

#[tokio::test]
async fn test_agent_mode_allow_lifts_wildcard_disallow() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "User-agent: *\nDisallow: /private\n\nUser-agent: TestBot\nAllow: /",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/private/page">P</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/private/page"))
        .respond_with(html(""))
        .mount(&mock_server)
        .await;

    let start = format!("{}/", base_url);

    let mut agent_config = create_test_config();
    agent_config.robots.mode = RobotsMode::Agent;
    let report = crawl(&start, &agent_config).await.expect("Crawl failed");
    assert_eq!(report.pages.len(), 2);
    assert!(report.excluded().is_empty());

    // Prefix mode applies every Disallow line to every agent
    let report = crawl(&start, &create_test_config())
        .await
        .expect("Crawl failed");
    assert_eq!(report.pages.len(), 1);
    assert_eq!(
        report.excluded(),
        vec![format!("{}/private/page", base_url).as_str()]
    );
}

#[tokio::test]
async fn test_non_html_and_error_pages_are_errored() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a href="/data.json">Data</a><a href="/missing">Missing</a><a href="/fail">Fail</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("not found", "text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fail"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("oops", "text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let start = format!("{}/", base_url);
    let report = crawl(&start, &create_test_config())
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.state.count(UrlState::Errored), 3);
    for page in ["/data.json", "/missing", "/fail"] {
        let url = format!("{}{}", base_url, page);
        assert_eq!(report.state.state_of(&url), Some(UrlState::Errored));
        assert!(report.page(&url).is_none());
    }
}

#[tokio::test]
async fn test_redirect_records_final_url_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/old">Old</a><a href="/new">New</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(html(r#"<img src="/moved.png">"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let start = format!("{}/", base_url);
    let report = crawl(&start, &create_test_config())
        .await
        .expect("Crawl failed");

    let old = format!("{}/old", base_url);
    let new = format!("{}/new", base_url);

    assert_eq!(report.pages.len(), 2);
    let moved = report.page(&new).expect("final URL recorded as referrer");
    assert_eq!(moved.assets, vec![format!("{}/moved.png", base_url)]);
    assert!(report.page(&old).is_none());

    assert_eq!(report.state.state_of(&old), Some(UrlState::Visited));
    assert_eq!(report.state.state_of(&new), Some(UrlState::Visited));
}

#[tokio::test]
async fn test_no_url_fetched_twice() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/a">A</a><a href="/b">B</a><a href="/">Home</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html(r#"<a href="/b">B</a><a href="/">Home</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html(r#"<a href="/a">A</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let start = format!("{}/", base_url);
    let report = crawl(&start, &create_test_config())
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages.len(), 3);
    for state in UrlState::all_states() {
        for url in report.state.urls_in(state) {
            let others = UrlState::all_states()
                .into_iter()
                .filter(|s| *s != state)
                .any(|s| report.state.urls_in(s).contains(&url));
            assert!(!others, "{} appears in more than one state", url);
        }
    }
}

#[tokio::test]
async fn test_invalid_start_url_fails() {
    let result = crawl("123", &create_test_config()).await;
    assert!(matches!(result, Err(SumiError::InvalidStartUrl { .. })));

    let result = crawl("mailto:someone@example.com", &create_test_config()).await;
    assert!(matches!(result, Err(SumiError::InvalidStartUrl { .. })));
}

#[tokio::test]
async fn test_unreachable_start_url_is_errored() {
    // Nothing listens on port 9 of the loopback interface
    let report = crawl("http://127.0.0.1:9/", &create_test_config())
        .await
        .expect("an unreachable host is not fatal");

    assert!(report.pages.is_empty());
    assert_eq!(report.errored(), vec!["http://127.0.0.1:9/"]);
}
