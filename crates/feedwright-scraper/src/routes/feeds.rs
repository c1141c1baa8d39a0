//! Routes whose list comes from a syndication feed or the WordPress API.

use feedwright_core::EnrichmentFailures;

use super::{MAINTAINERS, NEW_MEDIA};
use crate::extract::html::Locator;
use crate::rules::{ContainerRule, Enrichment, Features, FeedList, ListStrategy, Route};

const FEED_ROOT: &str = "/";

const TESTINGCATALOG_BODY: &[Locator] = &[Locator::of("#post-body")];
const JAYISGAMES_BODY: &[Locator] = &[Locator::of(".entrycontent")];
const SEROUNDTABLE_BODY: &[Locator] = &[Locator::of(".post-body")];

pub(super) const TESTINGCATALOG: Route = Route {
    namespace: "testingcatalog",
    path: "/",
    name: "Latest",
    example: "/testingcatalog",
    url: "www.testingcatalog.com/",
    maintainers: MAINTAINERS,
    description: "Latest posts from TestingCatalog with full content.",
    categories: NEW_MEDIA,
    features: None,
    radar: &["www.testingcatalog.com/"],
    base_url: "https://www.testingcatalog.com",
    feed_title: "TestingCatalog",
    feed_link: FEED_ROOT,
    allow_empty: false,
    list: ListStrategy::Feed(FeedList {
        path: "/rss/",
        proxy_fallback: false,
        use_channel_link: false,
    }),
    enrichment: Enrichment::Container(ContainerRule::content(TESTINGCATALOG_BODY)),
    enrichment_failures: EnrichmentFailures::Abort,
};

pub(super) const JAYISGAMES: Route = Route {
    namespace: "jayisgames",
    path: "/",
    name: "Latest",
    example: "/jayisgames",
    url: "jayisgames.com/",
    maintainers: MAINTAINERS,
    description: "Latest posts from Jay Is Games with full content.",
    categories: NEW_MEDIA,
    features: None,
    radar: &["jayisgames.com/"],
    base_url: "https://jayisgames.com",
    feed_title: "Jay Is Games",
    feed_link: FEED_ROOT,
    allow_empty: false,
    list: ListStrategy::Feed(FeedList {
        path: "/index.xml",
        proxy_fallback: false,
        use_channel_link: false,
    }),
    enrichment: Enrichment::Container(ContainerRule::content(JAYISGAMES_BODY)),
    enrichment_failures: EnrichmentFailures::Abort,
};

pub(super) const SEROUNDTABLE: Route = Route {
    namespace: "seroundtable",
    path: "/",
    name: "Latest",
    example: "/seroundtable",
    url: "www.seroundtable.com/",
    maintainers: MAINTAINERS,
    description: "Latest posts from Search Engine Roundtable with full content.",
    categories: NEW_MEDIA,
    features: None,
    radar: &["www.seroundtable.com/"],
    base_url: "https://www.seroundtable.com",
    feed_title: "Search Engine Roundtable",
    feed_link: FEED_ROOT,
    allow_empty: false,
    list: ListStrategy::Feed(FeedList {
        path: "/index.rdf",
        proxy_fallback: false,
        use_channel_link: false,
    }),
    enrichment: Enrichment::Container(ContainerRule::content(SEROUNDTABLE_BODY)),
    enrichment_failures: EnrichmentFailures::Abort,
};

pub(super) const TLDR_TECH: Route = Route {
    namespace: "tldr",
    path: "/tech",
    name: "Tech",
    example: "/tldr/tech",
    url: "tldr.tech",
    maintainers: MAINTAINERS,
    description: "TLDR Tech RSS feed with full article content.",
    categories: NEW_MEDIA,
    features: Some(Features::RADAR),
    radar: &["tldr.tech", "tldr.tech/rss"],
    base_url: "https://tldr.tech",
    feed_title: "TLDR Tech",
    feed_link: FEED_ROOT,
    allow_empty: false,
    list: ListStrategy::Feed(FeedList {
        path: "/rss",
        proxy_fallback: true,
        use_channel_link: true,
    }),
    enrichment: Enrichment::Readability,
    enrichment_failures: EnrichmentFailures::Fallback,
};

pub(super) const AIERA: Route = Route {
    namespace: "aiera",
    path: "/",
    name: "最新文章",
    example: "/aiera",
    url: "aiera.com.cn/",
    maintainers: MAINTAINERS,
    description: "新智元最新文章。",
    categories: NEW_MEDIA,
    features: None,
    radar: &["aiera.com.cn/"],
    base_url: "https://aiera.com.cn",
    feed_title: "新智元",
    feed_link: FEED_ROOT,
    allow_empty: false,
    list: ListStrategy::WordPress,
    enrichment: Enrichment::None,
    enrichment_failures: EnrichmentFailures::Abort,
};

pub(super) const MUSICALLY: Route = Route {
    namespace: "musically",
    path: "/",
    name: "Latest",
    example: "/musically",
    url: "musically.com/",
    maintainers: MAINTAINERS,
    description: "Latest news from Musically.",
    categories: NEW_MEDIA,
    features: None,
    radar: &["musically.com/"],
    base_url: "https://musically.com",
    feed_title: "Musically",
    feed_link: FEED_ROOT,
    allow_empty: false,
    list: ListStrategy::WordPress,
    enrichment: Enrichment::None,
    enrichment_failures: EnrichmentFailures::Abort,
};
