use super::NEW_MEDIA;
use crate::rules::Namespace;

/// Publishers known to the route table, including ones without routes yet.
pub static NAMESPACES: &[Namespace] = &[
    Namespace {
        id: "aibase",
        name: "AIbase",
        url: "news.aibase.com",
        lang: "zh",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "aiera",
        name: "新智元",
        url: "aiera.com.cn",
        lang: "zh",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "aihot",
        name: "AI今日热榜",
        url: "aihot.today",
        lang: "zh",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "facebookdevelopers",
        name: "Facebook Developers",
        url: "developers.facebook.com",
        lang: "en",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "jayisgames",
        name: "Jay Is Games",
        url: "jayisgames.com",
        lang: "en",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "kwai",
        name: "Kwai",
        url: "www.kwai.com",
        lang: "en",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "mit",
        name: "MIT News",
        url: "news.mit.edu",
        lang: "en",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "musicbusinessworldwide",
        name: "Music Business Worldwide",
        url: "www.musicbusinessworldwide.com",
        lang: "en",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "musically",
        name: "Musically",
        url: "musically.com",
        lang: "en",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "pocketgamer",
        name: "PocketGamer.biz",
        url: "pocketgamer.biz",
        lang: "en",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "semrush",
        name: "Semrush",
        url: "www.semrush.com",
        lang: "en",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "seroundtable",
        name: "Search Engine Roundtable",
        url: "www.seroundtable.com",
        lang: "en",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "telegramorg",
        name: "Telegram Blog",
        url: "telegram.org",
        lang: "en",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "testingcatalog",
        name: "TestingCatalog",
        url: "www.testingcatalog.com",
        lang: "en",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "tldr",
        name: "TLDR",
        url: "tldr.tech",
        lang: "en",
        categories: NEW_MEDIA,
    },
    Namespace {
        id: "youtubeblog",
        name: "YouTube Blog",
        url: "blog.youtube",
        lang: "en",
        categories: NEW_MEDIA,
    },
];
