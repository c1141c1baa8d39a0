//! End-to-end route runs against a local `wiremock` server.
//!
//! Every route is re-rooted on the mock server with `Runner::run_at`, so list
//! pages, detail pages, and the reader proxy are all served locally.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use feedwright_core::{EnrichmentFailures, SiteOverride, SitesFile};
use feedwright_scraper::{routes, HttpClient, Route, Runner, ScraperError};

fn runner_for(server: &MockServer) -> Runner {
    let client = HttpClient::new(5, "feedwright-test/0.1", 0, 0).expect("test client");
    Runner::new(
        client,
        Duration::from_secs(300),
        format!("{}/proxy/", server.uri()),
    )
}

fn route(id: &str) -> &'static Route {
    routes::find(id).expect("built-in route")
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body.into())
}

fn article_page(paragraph: &str) -> String {
    let text = format!("{paragraph} ").repeat(12);
    format!(
        "<html><head><title>Story</title></head><body>\
         <nav><a href=\"/\">Home</a></nav>\
         <article><h1>Story</h1><p>{text}</p><p>{text}</p><p>{text}</p></article>\
         <footer>Footer</footer></body></html>"
    )
}

// ---------------------------------------------------------------------------
// HTML list + container enrichment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn html_route_drops_incomplete_items_before_applying_limit() {
    let server = MockServer::start().await;
    let card = |slug: &str, title: &str| {
        format!(
            r#"<div class="term-page--news-article--item">
                 <a class="term-page--news-article--item--title--link" href="/news/{slug}">{title}</a>
                 <p class="term-page--news-article--item--dek">Dek {slug}</p>
                 <time datetime="2024-05-0{n}T12:00:00Z">May {n}</time>
               </div>"#,
            n = slug.len()
        )
    };
    let list = format!(
        "<html><body>{}{}{}{}</body></html>",
        card("a", "First"),
        card("bb", ""),
        card("ccc", "Third"),
        card("dddd", "Fourth"),
    );

    Mock::given(method("GET"))
        .and(path("/topic/artificial-intelligence2"))
        .respond_with(html(list))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/news/a"))
        .respond_with(html(r#"<div itemprop="articleBody"><p>Full A</p></div>"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/news/ccc"))
        .respond_with(html("<p>layout changed, no body</p>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/news/dddd"))
        .respond_with(html(""))
        .expect(0)
        .mount(&server)
        .await;

    let runner = runner_for(&server);
    let feed = runner
        .run_at(route("mit/news/topic/artificial-intelligence2"), &server.uri(), 2)
        .await
        .expect("route run");

    assert_eq!(feed.title, "MIT News - Artificial Intelligence");
    assert_eq!(
        feed.link,
        format!("{}/topic/artificial-intelligence2", server.uri())
    );
    let titles: Vec<_> = feed.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["First", "Third"]);
    assert_eq!(feed.items[0].link, format!("{}/news/a", server.uri()));
    assert_eq!(feed.items[0].guid.as_deref(), Some(feed.items[0].link.as_str()));
    assert_eq!(feed.items[0].description.as_deref(), Some("<p>Full A</p>"));
    // No container on the detail page: the listing summary survives.
    assert_eq!(feed.items[1].description.as_deref(), Some("Dek ccc"));
    assert!(feed.items[1].pub_date.is_some());
}

#[tokio::test]
async fn abort_policy_fails_the_whole_run_on_detail_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(html(
            r#"<a class="dev_blog_card_link_wrap" href="/blog/gone">
                 <div class="dev_blog_card_title">Gone</div>
                 <div class="dev_blog_card_date">Mar 5, 2024</div>
               </a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blog/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let runner = runner_for(&server);
    let result = runner.run_at(route("telegramorg/blog"), &server.uri(), 30).await;
    assert!(
        matches!(result, Err(ScraperError::NotFound { .. })),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn override_turns_abort_into_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(html(
            r#"<a class="dev_blog_card_link_wrap" href="/blog/gone">
                 <div class="dev_blog_card_title">Gone</div>
               </a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blog/gone"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut runner = runner_for(&server);
    runner
        .apply_overrides(&SitesFile {
            sites: vec![SiteOverride {
                route: "telegramorg/blog".to_owned(),
                enrichment_failures: Some(EnrichmentFailures::Fallback),
            }],
        })
        .expect("known route");

    let feed = runner
        .run_at(route("telegramorg/blog"), &server.uri(), 30)
        .await
        .expect("fallback keeps the run alive");
    assert_eq!(feed.items.len(), 1);
    assert_eq!(feed.items[0].title, "Gone");
    assert_eq!(feed.items[0].description, None);
}

#[tokio::test]
async fn empty_listing_is_an_error_unless_route_allows_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(html("<html><body>maintenance</body></html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/proxy/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("nothing listed today"))
        .mount(&server)
        .await;

    let runner = runner_for(&server);
    let result = runner.run_at(route("telegramorg/blog"), &server.uri(), 30).await;
    assert!(matches!(result, Err(ScraperError::EmptyFeed { ref route }) if route == "telegramorg/blog"));

    let feed = runner
        .run_at(route("aihot/today"), &server.uri(), 30)
        .await
        .expect("empty is allowed");
    assert!(feed.items.is_empty());
}

// ---------------------------------------------------------------------------
// Feeds, proxy fallback, readability
// ---------------------------------------------------------------------------

#[tokio::test]
async fn feed_route_falls_back_to_proxy_and_keeps_summary_on_readability_failure() {
    let server = MockServer::start().await;
    let uri = server.uri();
    let rss = format!(
        r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <title>TLDR RSS Feed</title>
  <link>https://tldr.tech/</link>
  <item><title>Broken</title><link>{uri}/posts/broken</link><description>Feed summary</description></item>
  <item><title>Works</title><link>{uri}/posts/works</link><description>Short</description></item>
</channel></rss>"#
    );

    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Checking your browser..."))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/proxy/.*/rss$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts/works"))
        .respond_with(html(article_page(
            "Engineers shipped a faster compiler with better diagnostics and smaller binaries.",
        )))
        .mount(&server)
        .await;

    let runner = runner_for(&server);
    let feed = runner
        .run_at(route("tldr/tech"), &uri, 30)
        .await
        .expect("fallback policy never fails on detail pages");

    assert_eq!(feed.title, "TLDR RSS Feed");
    assert_eq!(feed.link, "https://tldr.tech/");
    assert_eq!(feed.items.len(), 2);
    assert_eq!(feed.items[0].description.as_deref(), Some("Feed summary"));
    let full = feed.items[1].description.as_deref().unwrap_or_default();
    assert!(full.contains("faster compiler"), "got: {full}");
}

#[tokio::test]
async fn feed_route_errors_when_proxy_also_returns_non_xml() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(ResponseTemplate::new(200).set_body_string("blocked"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/proxy/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("still blocked"))
        .mount(&server)
        .await;

    let runner = runner_for(&server);
    let result = runner.run_at(route("tldr/tech"), &server.uri(), 30).await;
    assert!(matches!(result, Err(ScraperError::Feed { .. })), "got: {result:?}");
}

#[tokio::test]
async fn duplicate_links_fetch_their_detail_page_once() {
    let server = MockServer::start().await;
    let uri = server.uri();
    let rss = format!(
        r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>TestingCatalog</title><link>{uri}/</link>
  <item><title>Same A</title><link>{uri}/same/</link></item>
  <item><title>Same B</title><link>{uri}/same/</link></item>
</channel></rss>"#
    );
    Mock::given(method("GET"))
        .and(path("/rss/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/same/"))
        .respond_with(html(r#"<div id="post-body"><p>Once</p></div>"#))
        .expect(1)
        .mount(&server)
        .await;

    let runner = runner_for(&server);
    let feed = runner
        .run_at(route("testingcatalog"), &uri, 30)
        .await
        .expect("route run");
    assert_eq!(feed.items.len(), 2);
    assert!(feed
        .items
        .iter()
        .all(|item| item.description.as_deref() == Some("<p>Once</p>")));

    // A second run inside the TTL is served from the cache as well.
    runner
        .run_at(route("testingcatalog"), &uri, 30)
        .await
        .expect("cached run");
    assert_eq!(runner.cache().len(), 1);
}

#[tokio::test]
async fn failed_detail_fetch_is_not_repeated_for_duplicate_links() {
    let server = MockServer::start().await;
    let uri = server.uri();
    let rss = format!(
        r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>TLDR RSS Feed</title><link>https://tldr.tech/</link>
  <item><title>First copy</title><link>{uri}/same/</link><description>Summary</description></item>
  <item><title>Second copy</title><link>{uri}/same/</link><description>Summary</description></item>
</channel></rss>"#
    );
    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/same/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let runner = runner_for(&server);
    let feed = runner
        .run_at(route("tldr/tech"), &uri, 30)
        .await
        .expect("fallback policy keeps the run alive");

    assert_eq!(feed.items.len(), 2);
    assert!(feed
        .items
        .iter()
        .all(|item| item.description.as_deref() == Some("Summary")));
}

// ---------------------------------------------------------------------------
// WordPress and sitemap
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wordpress_route_requests_limit_and_dedupes_terms() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(query_param("per_page", "2"))
        .and(query_param("_embed", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "title": {"rendered": "First &amp; best"},
                "link": "https://aiera.com.cn/p/1/",
                "content": {"rendered": "<p>One</p>"},
                "date_gmt": "2024-05-01T02:00:00",
                "_embedded": {
                    "author": [{"name": "Editor"}],
                    "wp:term": [
                        [{"taxonomy": "category", "name": "AI"}],
                        [{"taxonomy": "post_tag", "name": "AI"}, {"taxonomy": "post_tag", "name": "Chips"}]
                    ]
                }
            },
            {"title": {"rendered": "Second"}, "link": "https://aiera.com.cn/p/2/"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let runner = runner_for(&server);
    let feed = runner
        .run_at(route("aiera"), &server.uri(), 2)
        .await
        .expect("route run");

    assert_eq!(feed.title, "新智元");
    assert_eq!(feed.items.len(), 2);
    assert_eq!(feed.items[0].title, "First & best");
    assert_eq!(feed.items[0].category, ["AI", "Chips"]);
    assert_eq!(feed.items[0].author.as_deref(), Some("Editor"));
    assert_eq!(feed.items[1].guid.as_deref(), Some("https://aiera.com.cn/p/2/"));
}

#[tokio::test]
async fn sitemap_route_orders_by_lastmod_and_enriches_each_entry() {
    let server = MockServer::start().await;
    let uri = server.uri();
    let sitemap = format!(
        r#"<urlset>
  <url><loc>{uri}/news-and-events/</loc><lastmod>2024-06-01</lastmod></url>
  <url><loc>{uri}/news-and-events/older/</loc><lastmod>2024-01-01</lastmod></url>
  <url><loc>{uri}/news-and-events/newer/</loc><lastmod>2024-05-01</lastmod></url>
  <url><loc>{uri}/culture/elsewhere/</loc><lastmod>2024-07-01</lastmod></url>
</urlset>"#
    );
    Mock::given(method("GET"))
        .and(path("/en-us/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/news-and-events/newer/"))
        .respond_with(html(
            r#"<h1 class="yt-archive__title">Newer post</h1>
               <span class="yt-archive__date">May.02.2024</span>
               <div class="yt-archive__content"><img src="/img/a.png"></div>
               <div class="yt-archive__content"><p>Second block</p></div>
               <a class="yt-article-rel-tags__item">Creators</a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/news-and-events/older/"))
        .respond_with(html("<p>no archive markup</p>"))
        .mount(&server)
        .await;

    let runner = runner_for(&server);
    let feed = runner
        .run_at(route("youtubeblog/news-and-events"), &uri, 30)
        .await
        .expect("route run");

    assert_eq!(feed.title, "YouTube Blog - News and Events");
    assert_eq!(feed.items.len(), 2);
    let newer = &feed.items[0];
    assert_eq!(newer.title, "Newer post");
    assert_eq!(
        newer.description.as_deref(),
        Some(format!(r#"<img src="{uri}/img/a.png"><p>Second block</p>"#).as_str())
    );
    assert_eq!(newer.category, ["Creators"]);
    assert_eq!(
        newer.pub_date.map(|d| d.date_naive().to_string()).as_deref(),
        Some("2024-05-02")
    );

    let older = &feed.items[1];
    assert_eq!(older.title, format!("{uri}/news-and-events/older/"));
    assert_eq!(older.guid.as_deref(), Some(older.link.as_str()));
    assert_eq!(
        older.pub_date.map(|d| d.date_naive().to_string()).as_deref(),
        Some("2024-01-01")
    );
}

// ---------------------------------------------------------------------------
// Embedded payloads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn payload_routes_fail_hard_when_payload_is_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/newsroom"))
        .respond_with(html("<html><script>window.other = 1;</script></html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/zh/news"))
        .respond_with(html("<html><body>no data</body></html>"))
        .mount(&server)
        .await;

    let runner = runner_for(&server);
    let kwai = runner.run_at(route("kwai/newsroom"), &server.uri(), 30).await;
    assert!(matches!(kwai, Err(ScraperError::PayloadNotFound { .. })), "got: {kwai:?}");

    let aibase = runner.run_at(route("aibase/news-site"), &server.uri(), 30).await;
    assert!(matches!(aibase, Err(ScraperError::PayloadNotFound { .. })), "got: {aibase:?}");
}

#[tokio::test]
async fn script_state_route_builds_anchor_links() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/newsroom"))
        .respond_with(html(
            r#"<html><script>window.__NUXT__=(function(a){return {data:[{newsroomList:[
                {__id__:3,en:{title:"Kwai update",date:"April 2nd, 2024",desc:"Plain"}},
                {__id__:4,en:{title:a,desc:"Second"}}
            ]}]}}("Another"));</script></html>"#,
        ))
        .mount(&server)
        .await;

    let runner = runner_for(&server);
    let feed = runner
        .run_at(route("kwai/newsroom"), &server.uri(), 1)
        .await
        .expect("route run");

    assert_eq!(feed.title, "Kwai Newsroom");
    assert_eq!(feed.items.len(), 1);
    assert_eq!(feed.items[0].link, format!("{}/newsroom#3", server.uri()));
    assert_eq!(feed.items[0].description.as_deref(), Some("Plain"));
}
