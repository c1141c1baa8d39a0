//! Routes that read a static HTML listing or a sitemap, then a detail page.

use feedwright_core::EnrichmentFailures;

use super::{MAINTAINERS, NEW_MEDIA};
use crate::extract::dates::DateFormat;
use crate::extract::html::{Locator, Pick};
use crate::rules::{
    ContainerRule, Enrichment, Features, HtmlList, ListStrategy, Route, SitemapList,
};

const FACEBOOK_TITLE: &[Pick] = &[Pick::text("h2"), Pick::text("h3")];
const OWN_HREF: &[Pick] = &[Pick::own_attr("href")];
const FACEBOOK_BODY: &[Locator] = &[Locator::of("div._6u4h"), Locator::parent_of("p._8zym")];

pub(super) const FACEBOOK_DEVELOPERS_BLOG: Route = Route {
    namespace: "facebookdevelopers",
    path: "/blog",
    name: "Blog",
    example: "/facebookdevelopers/blog",
    url: "developers.facebook.com/blog/",
    maintainers: MAINTAINERS,
    description: "Latest Facebook Developers blog posts with full content.",
    categories: NEW_MEDIA,
    features: None,
    radar: &["developers.facebook.com/blog/"],
    base_url: "https://developers.facebook.com",
    feed_title: "Facebook Developers Blog",
    feed_link: "/blog",
    allow_empty: false,
    list: ListStrategy::Html(HtmlList {
        path: "/blog",
        item: r#"a[href^="/blog/post/"], a[href^="https://developers.facebook.com/blog/post/"]"#,
        title: FACEBOOK_TITLE,
        link: OWN_HREF,
        date_from_link: Some(r"/blog/post/(\d{4})/(\d{2})/(\d{2})/"),
        dedupe_links: true,
        ..HtmlList::EMPTY
    }),
    enrichment: Enrichment::Container(ContainerRule {
        rewrite_urls: true,
        ..ContainerRule::content(FACEBOOK_BODY)
    }),
    enrichment_failures: EnrichmentFailures::Abort,
};

const TELEGRAM_TITLE: &[Pick] = &[Pick::text(".dev_blog_card_title")];
const TELEGRAM_DATE: &[Pick] = &[Pick::text(".dev_blog_card_date")];
const TELEGRAM_BODY: &[Locator] = &[Locator::of("#dev_page_content")];
const TELEGRAM_PUBLISHED: &[Pick] = &[Pick::attr(
    r#"meta[property="article:published_time"]"#,
    "content",
)];

pub(super) const TELEGRAM_BLOG: Route = Route {
    namespace: "telegramorg",
    path: "/blog",
    name: "Blog",
    example: "/telegramorg/blog",
    url: "telegram.org/blog",
    maintainers: MAINTAINERS,
    description: "Latest Telegram blog posts with full content.",
    categories: NEW_MEDIA,
    features: None,
    radar: &["telegram.org/blog"],
    base_url: "https://telegram.org",
    feed_title: "Telegram Blog",
    feed_link: "/blog",
    allow_empty: false,
    list: ListStrategy::Html(HtmlList {
        path: "/blog",
        item: ".dev_blog_card_link_wrap",
        title: TELEGRAM_TITLE,
        link: OWN_HREF,
        date: TELEGRAM_DATE,
        date_format: Some(DateFormat::utc("%b %d, %Y")),
        ..HtmlList::EMPTY
    }),
    enrichment: Enrichment::Container(ContainerRule {
        rewrite_urls: true,
        date: TELEGRAM_PUBLISHED,
        ..ContainerRule::content(TELEGRAM_BODY)
    }),
    enrichment_failures: EnrichmentFailures::Abort,
};

const MIT_TITLE: &[Pick] = &[Pick::text(".term-page--news-article--item--title--link")];
const MIT_LINK: &[Pick] = &[
    Pick::attr(".term-page--news-article--item--title--link", "href"),
    Pick::attr("a.image--link", "href"),
];
const MIT_SUMMARY: &[Pick] = &[Pick::text(".term-page--news-article--item--dek")];
const MIT_IMAGE: &[Pick] = &[
    Pick::attr("img.ondemand", "data-src"),
    Pick::attr("img.ondemand", "src"),
];
const MIT_DATE: &[Pick] = &[Pick::attr("time", "datetime"), Pick::text("time")];
const MIT_BODY: &[Locator] = &[Locator::of(r#"[itemprop="articleBody"]"#)];

pub(super) const MIT_AI_NEWS: Route = Route {
    namespace: "mit",
    path: "/news/topic/artificial-intelligence2",
    name: "News - Artificial Intelligence",
    example: "/mit/news/topic/artificial-intelligence2",
    url: "news.mit.edu/topic/artificial-intelligence2",
    maintainers: MAINTAINERS,
    description: "MIT News stories tagged artificial intelligence.",
    categories: NEW_MEDIA,
    features: Some(Features::RADAR),
    radar: &["news.mit.edu/topic/artificial-intelligence2"],
    base_url: "https://news.mit.edu",
    feed_title: "MIT News - Artificial Intelligence",
    feed_link: "/topic/artificial-intelligence2",
    allow_empty: false,
    list: ListStrategy::Html(HtmlList {
        path: "/topic/artificial-intelligence2",
        item: ".term-page--news-article--item",
        title: MIT_TITLE,
        link: MIT_LINK,
        summary: MIT_SUMMARY,
        image: MIT_IMAGE,
        date: MIT_DATE,
        ..HtmlList::EMPTY
    }),
    enrichment: Enrichment::Container(ContainerRule::content(MIT_BODY)),
    enrichment_failures: EnrichmentFailures::Abort,
};

const SEMRUSH_TITLE: &[Pick] = &[Pick::text(".semrush-story-box__title")];
const SEMRUSH_LINK: &[Pick] = &[Pick::attr("a.semrush-story-box__link", "href")];
const SEMRUSH_SUMMARY: &[Pick] = &[Pick::text(".semrush-story-box__lead")];
const SEMRUSH_IMAGE: &[Pick] = &[Pick::attr("img.semrush-story-box__photo", "src")];
const SEMRUSH_DATE: &[Pick] = &[Pick::text(".semrush-story-box__date")];
const SEMRUSH_BODY: &[Locator] = &[Locator::of(".semrush-story__content")];

pub(super) const SEMRUSH_PRODUCT_NEWS: Route = Route {
    namespace: "semrush",
    path: "/news/releases/product-news",
    name: "Product News",
    example: "/semrush/news/releases/product-news",
    url: "semrush.com",
    maintainers: MAINTAINERS,
    description: "Semrush product announcements.",
    categories: NEW_MEDIA,
    features: Some(Features::RADAR),
    radar: &[
        "www.semrush.com/news/releases/product-news",
        "semrush.com/news/releases/product-news",
    ],
    base_url: "https://www.semrush.com",
    feed_title: "Semrush Product News",
    feed_link: "/news/releases/product-news/",
    allow_empty: false,
    list: ListStrategy::Html(HtmlList {
        path: "/news/releases/product-news/",
        item: ".semrush-story-box",
        title: SEMRUSH_TITLE,
        link: SEMRUSH_LINK,
        summary: SEMRUSH_SUMMARY,
        image: SEMRUSH_IMAGE,
        date: SEMRUSH_DATE,
        ..HtmlList::EMPTY
    }),
    enrichment: Enrichment::Container(ContainerRule {
        strip: &[".semrush-breadcrumb", "h1", ".semrush-story__date"],
        ..ContainerRule::content(SEMRUSH_BODY)
    }),
    enrichment_failures: EnrichmentFailures::Abort,
};

const POCKETGAMER_TITLE: &[Pick] = &[Pick::text("h3 a, h2 a"), Pick::text("h3, h2")];
const POCKETGAMER_LINK: &[Pick] = &[Pick::own_attr("data-href")];
const POCKETGAMER_DATE: &[Pick] = &[Pick::attr("time[datetime]", "datetime")];
const POCKETGAMER_BODY: &[Locator] = &[Locator::of("article div.body")];
const POCKETGAMER_AUTHOR: &[Pick] = &[Pick::text("article .byline .name")];

pub(super) const POCKETGAMER: Route = Route {
    namespace: "pocketgamer",
    path: "/",
    name: "News",
    example: "/pocketgamer",
    url: "pocketgamer.biz/news/",
    maintainers: MAINTAINERS,
    description: "Latest PocketGamer.biz news with full content.",
    categories: NEW_MEDIA,
    features: None,
    radar: &["pocketgamer.biz/news/"],
    base_url: "https://pocketgamer.biz",
    feed_title: "PocketGamer.biz News",
    feed_link: "/news/",
    allow_empty: false,
    list: ListStrategy::Html(HtmlList {
        path: "/news/",
        item: "article[data-href]",
        title: POCKETGAMER_TITLE,
        link: POCKETGAMER_LINK,
        date: POCKETGAMER_DATE,
        ..HtmlList::EMPTY
    }),
    enrichment: Enrichment::Container(ContainerRule {
        strip: &[".art-subscribe"],
        author: POCKETGAMER_AUTHOR,
        categories: Some("article .cats a"),
        ..ContainerRule::content(POCKETGAMER_BODY)
    }),
    enrichment_failures: EnrichmentFailures::Abort,
};

const YOUTUBE_BODY: &[Locator] = &[Locator::of(".yt-archive__content")];
const YOUTUBE_TITLE: &[Pick] = &[Pick::text(".yt-archive__title")];
const YOUTUBE_DATE: &[Pick] = &[Pick::text(".yt-archive__date")];

pub(super) const YOUTUBE_NEWS_AND_EVENTS: Route = Route {
    namespace: "youtubeblog",
    path: "/news-and-events",
    name: "News and Events",
    example: "/youtubeblog/news-and-events",
    url: "blog.youtube/news-and-events/",
    maintainers: MAINTAINERS,
    description: "YouTube Blog News and Events with full content.",
    categories: NEW_MEDIA,
    features: None,
    radar: &["blog.youtube/news-and-events/"],
    base_url: "https://blog.youtube",
    feed_title: "YouTube Blog - News and Events",
    feed_link: "/news-and-events/",
    allow_empty: false,
    list: ListStrategy::Sitemap(SitemapList {
        path: "/en-us/sitemap.xml",
        prefix: "/news-and-events/",
    }),
    enrichment: Enrichment::Container(ContainerRule {
        rewrite_urls: true,
        join_all: true,
        title: YOUTUBE_TITLE,
        date: YOUTUBE_DATE,
        date_format: Some(DateFormat::utc("%b.%d.%Y")),
        categories: Some(".yt-article-rel-tags__item"),
        ..ContainerRule::content(YOUTUBE_BODY)
    }),
    enrichment_failures: EnrichmentFailures::Abort,
};
