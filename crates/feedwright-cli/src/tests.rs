use super::*;

#[test]
fn parses_routes_command() {
    let cli = Cli::try_parse_from(["feedwright", "routes"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Routes));
}

#[test]
fn parses_fetch_with_raw_limit() {
    let cli = Cli::try_parse_from(["feedwright", "fetch", "tldr/tech", "--limit", "5abc"])
        .expect("expected valid cli args");
    match cli.command {
        Commands::Fetch {
            route,
            limit,
            base_url,
        } => {
            assert_eq!(route, "tldr/tech");
            assert_eq!(parse_limit(limit.as_deref()), 5);
            assert!(base_url.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn fetch_without_limit_uses_default() {
    let cli = Cli::try_parse_from(["feedwright", "fetch", "aihot/today"]).unwrap();
    let Commands::Fetch { limit, .. } = cli.command else {
        panic!("expected fetch");
    };
    assert_eq!(parse_limit(limit.as_deref()), 30);
}

#[test]
fn parses_fetch_with_base_url() {
    let cli = Cli::try_parse_from([
        "feedwright",
        "fetch",
        "mit/news/topic/artificial-intelligence2",
        "--base-url",
        "http://localhost:8080",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Fetch { base_url: Some(ref b), .. } if b == "http://localhost:8080"
    ));
}

#[test]
fn parses_radar_command() {
    let cli = Cli::try_parse_from(["feedwright", "radar", "https://telegram.org/blog"]).unwrap();
    assert!(matches!(cli.command, Commands::Radar { ref url } if url == "https://telegram.org/blog"));
}

#[test]
fn missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["feedwright"]).is_err());
}
