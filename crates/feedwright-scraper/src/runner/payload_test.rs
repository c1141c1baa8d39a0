use super::*;
use crate::extract::dates::DateFormat;
use crate::rules::NuxtFields;
use chrono::{DateTime, Utc};

const NEWS_LIST: NuxtDataList = NuxtDataList {
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
};

const NEWSROOM: ScriptStateList = ScriptStateList {
    path: "/newsroom",
    marker: "window.__NUXT__=",
    items_pointer: "/data/0/newsroomList",
    date_format: DateFormat::utc("%B %d, %Y"),
};

const NEWSROOM_URL: &str = "https://www.kwai.com/newsroom";

fn utc(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
}

fn base() -> Url {
    Url::parse("https://news.aibase.com").unwrap()
}

#[test]
fn proxy_items_carry_header_summary_and_local_time() {
    let rule = ProxyTextList {
        path: "/",
        date_format: DateFormat {
            pattern: "%Y年%m月%d日 %H:%M",
            utc_offset_secs: 8 * 3600,
            year_prefix: Some("年"),
        },
    };
    let text = "\
[![Image 1](https://img.example.com/hn.png) Hacker News](https://news.ycombinator.com)03月05日 09:30
[1. First story](https://example.com/1)
[2. Second story](https://example.com/2)
";
    let items = proxy_items(&rule, text, 30);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "First story");
    assert_eq!(items[1].link, "https://example.com/2");
    let description = items[0].description.as_deref().unwrap();
    assert!(description.starts_with("<img src=\"https://img.example.com/hn.png\">\n来源：Hacker News"));
    let date = items[0].pub_date.unwrap();
    assert_eq!(date.format("%m-%d %H:%M").to_string(), "03-05 01:30");
}

#[test]
fn nuxt_items_resolve_interned_fields() {
    let body = r#"<html><body><script type="application/json" id="__NUXT_DATA__">
        [{"state":1},{"list":2,"totalCount":40},[3],
         {"title":4,"description":5,"thumb":6,"oid":7,"createTime":8,"author":9},
         " 新模型发布 ","简介","https://cdn.aibase.com/a.png",1234,"2024-05-01 08:00:00","AIbase"]
    </script></body></html>"#;

    let items = nuxt_items(&NEWS_LIST, body, &base(), "https://news.aibase.com/zh/news").unwrap();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.title, "新模型发布");
    assert_eq!(item.link, "https://news.aibase.com/zh/news/1234");
    assert_eq!(
        item.description.as_deref(),
        Some("<img src=\"https://cdn.aibase.com/a.png\">\n简介")
    );
    assert_eq!(item.pub_date, Some(utc("2024-05-01T08:00:00Z")));
    assert_eq!(item.author.as_deref(), Some("AIbase"));
}

#[test]
fn nuxt_items_without_payload_fail() {
    let result = nuxt_items(&NEWS_LIST, "<html></html>", &base(), "https://news.aibase.com/zh/news");
    assert!(
        matches!(result, Err(ScraperError::PayloadNotFound { ref what, .. }) if what == "Nuxt payload"),
        "got: {result:?}"
    );
}

#[test]
fn nuxt_items_without_list_container_fail() {
    let body = r#"<script id="__NUXT_DATA__">[{"state":1},{"list":2}]</script>"#;
    let result = nuxt_items(&NEWS_LIST, body, &base(), "https://news.aibase.com/zh/news");
    assert!(
        matches!(result, Err(ScraperError::PayloadNotFound { ref what, .. }) if what == "News list"),
        "got: {result:?}"
    );
}

#[test]
fn script_state_items_from_bound_literal() {
    let body = r#"<script>window.__NUXT__=(function(a,b){return {data:[{newsroomList:[
        {__id__:7,en:{title:"Kwai launches",date:"March 5th, 2024",desc:"short",
            info:[{type:"text",content:"<p>Hello</p>"},{type:"img",imgUrl:a}]}},
        {__id__:b,en:{title:"",desc:"ignored"}},
        {en:{title:"No id",desc:"Plain desc"}}
    ]}]}}("https://cdn.kwai.com/x.png",8));</script>"#;

    let items = script_state_items(&NEWSROOM, body, NEWSROOM_URL).unwrap();
    assert_eq!(items.len(), 2);

    assert_eq!(items[0].link, "https://www.kwai.com/newsroom#7");
    assert_eq!(items[0].guid.as_deref(), Some("https://www.kwai.com/newsroom#7"));
    assert_eq!(
        items[0].description.as_deref(),
        Some("<p>Hello</p><img src=\"https://cdn.kwai.com/x.png\">")
    );
    assert_eq!(items[0].pub_date, Some(utc("2024-03-05T00:00:00Z")));

    assert_eq!(items[1].link, "https://www.kwai.com/newsroom#No id");
    assert_eq!(items[1].description.as_deref(), Some("Plain desc"));
}

#[test]
fn script_state_without_marker_fails() {
    let result = script_state_items(&NEWSROOM, "<script>var x = 1;</script>", NEWSROOM_URL);
    assert!(matches!(result, Err(ScraperError::PayloadNotFound { .. })));
}

#[test]
fn script_state_without_list_is_empty() {
    let body = "<script>window.__NUXT__={data:[{}]};</script>";
    let items = script_state_items(&NEWSROOM, body, NEWSROOM_URL).unwrap();
    assert!(items.is_empty());
}

#[test]
fn empty_info_blocks_fall_back_to_desc() {
    assert_eq!(newsroom_description(&[]), None);
    let blocks = [serde_json::json!({"type": "text"})];
    assert_eq!(newsroom_description(&blocks), None);
}
