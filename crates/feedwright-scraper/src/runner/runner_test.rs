use super::*;
use feedwright_core::SiteOverride;

fn runner() -> Runner {
    let client = HttpClient::new(5, "feedwright-test", 0, 0).unwrap();
    Runner::new(client, Duration::from_secs(60), "https://reader.example.com/")
}

fn route(id: &str) -> &'static Route {
    routes::find(id).unwrap()
}

#[test]
fn policy_defaults_to_route_table() {
    let runner = runner();
    assert_eq!(
        runner.enrichment_policy(route("tldr/tech")),
        EnrichmentFailures::Fallback
    );
    assert_eq!(
        runner.enrichment_policy(route("telegramorg/blog")),
        EnrichmentFailures::Abort
    );
}

#[test]
fn overrides_replace_policy_by_normalized_id() {
    let mut runner = runner();
    let sites = SitesFile {
        sites: vec![
            SiteOverride {
                route: "/aihot/today/".to_owned(),
                enrichment_failures: Some(EnrichmentFailures::Abort),
            },
            SiteOverride {
                route: "pocketgamer".to_owned(),
                enrichment_failures: None,
            },
        ],
    };
    runner.apply_overrides(&sites).unwrap();

    assert_eq!(
        runner.enrichment_policy(route("aihot/today")),
        EnrichmentFailures::Abort
    );
    assert_eq!(
        runner.enrichment_policy(route("pocketgamer")),
        EnrichmentFailures::Abort
    );
}

#[test]
fn overrides_reject_unknown_routes() {
    let mut runner = runner();
    let sites = SitesFile {
        sites: vec![SiteOverride {
            route: "nope/missing".to_owned(),
            enrichment_failures: Some(EnrichmentFailures::Fallback),
        }],
    };
    let result = runner.apply_overrides(&sites);
    assert!(matches!(result, Err(ScraperError::UnknownRoute(ref id)) if id == "nope/missing"));
}

#[test]
fn join_resolves_route_paths() {
    let base = Url::parse("https://news.mit.edu").unwrap();
    assert_eq!(
        join(&base, "/topic/artificial-intelligence2"),
        "https://news.mit.edu/topic/artificial-intelligence2"
    );
    assert_eq!(join(&base, ""), "https://news.mit.edu/");
}

#[tokio::test]
async fn invalid_base_url_is_rejected_before_fetching() {
    let runner = runner();
    let result = runner.run_at(route("mit/news/topic/artificial-intelligence2"), "not a url", 5).await;
    assert!(matches!(result, Err(ScraperError::InvalidUrl { .. })));
}
