//! Routes whose list is recovered from an embedded payload or a proxy
//! rendering rather than from markup.

use feedwright_core::EnrichmentFailures;

use super::{MAINTAINERS, NEW_MEDIA};
use crate::extract::dates::DateFormat;
use crate::rules::{
    Enrichment, Features, ListStrategy, NuxtDataList, NuxtFields, ProxyTextList, Route,
    ScriptStateList,
};

pub(super) const AIHOT_TODAY: Route = Route {
    namespace: "aihot",
    path: "/today",
    name: "AI今日热榜",
    example: "/aihot/today",
    url: "aihot.today",
    maintainers: MAINTAINERS,
    description: "AI今日热榜聚合的热点资讯列表。",
    categories: NEW_MEDIA,
    features: Some(Features {
        anti_crawler: true,
        ..Features::RADAR
    }),
    radar: &["aihot.today", "aihot.today/ai-news"],
    base_url: "http://aihot.today",
    feed_title: "AI今日热榜",
    feed_link: "/",
    allow_empty: true,
    list: ListStrategy::ProxyText(ProxyTextList {
        path: "/",
        date_format: DateFormat {
            pattern: "%Y年%m月%d日 %H:%M",
            utc_offset_secs: 8 * 3600,
            year_prefix: Some("年"),
        },
    }),
    enrichment: Enrichment::Readability,
    enrichment_failures: EnrichmentFailures::Fallback,
};

pub(super) const AIBASE_NEWS_SITE: Route = Route {
    namespace: "aibase",
    path: "/news-site",
    name: "资讯（news.aibase.com）",
    example: "/aibase/news-site",
    url: "news.aibase.com",
    maintainers: MAINTAINERS,
    description: "AIbase 新闻站点资讯列表。",
    categories: NEW_MEDIA,
    features: Some(Features::RADAR),
    radar: &["news.aibase.com/zh/news"],
    base_url: "https://news.aibase.com",
    feed_title: "AIbase 新闻",
    feed_link: "/zh/news",
    allow_empty: true,
    list: ListStrategy::NuxtData(NuxtDataList {
        path: "/zh/news",
        container_keys: &["list", "totalCount"],
        fields: NuxtFields {
            title: "title",
            summary: "description",
            image: "thumb",
            id: "oid",
            date: "createTime",
            author: "author",
        },
        link_template: "/zh/news/{id}",
    }),
    enrichment: Enrichment::None,
    enrichment_failures: EnrichmentFailures::Abort,
};

pub(super) const KWAI_NEWSROOM: Route = Route {
    namespace: "kwai",
    path: "/newsroom",
    name: "Newsroom",
    example: "/kwai/newsroom",
    url: "www.kwai.com/newsroom",
    maintainers: MAINTAINERS,
    description: "Kwai newsroom updates with full content.",
    categories: NEW_MEDIA,
    features: None,
    radar: &["www.kwai.com/newsroom"],
    base_url: "https://www.kwai.com",
    feed_title: "Kwai Newsroom",
    feed_link: "/newsroom",
    allow_empty: false,
    list: ListStrategy::ScriptState(ScriptStateList {
        path: "/newsroom",
        marker: "window.__NUXT__=",
        items_pointer: "/data/0/newsroomList",
        date_format: DateFormat::utc("%B %d, %Y"),
    }),
    enrichment: Enrichment::None,
    enrichment_failures: EnrichmentFailures::Abort,
};
