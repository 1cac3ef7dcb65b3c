//! Shared fixtures for unit tests.

use quill_core::{Config, ContentConfig, MemorySource, ServerConfig, Settings};

use crate::site::Site;

const PAGES: &str = r#"[
    {"slug": "index", "title": "Home"},
    {"slug": "about", "title": "About", "keywords": "me", "description": "Who"},
    {"slug": "broken", "title": "Broken"}
]"#;

const POSTS: &str = r#"[
    {"title": "A", "slug": "a", "date": "3 Jan", "machineDate": "2024-01-03T00:00:00Z", "tags": ["x", "y"]},
    {"title": "B", "slug": "b", "date": "2 Jan", "machineDate": "2024-01-02T00:00:00Z", "tags": ["y"]}
]"#;

pub fn fixture_config() -> Config {
    Config {
        site: Settings {
            url: "https://example.com".to_string(),
            title: "Test Blog".to_string(),
            description: "A test blog".to_string(),
            lang: "en".to_string(),
            editor: "ed@example.com".to_string(),
            webmaster: "web@example.com".to_string(),
        },
        server: ServerConfig::default(),
        content: ContentConfig::default(),
    }
}

pub fn fixture_source() -> MemorySource {
    MemorySource::new()
        .with_file("data/pages.json", PAGES)
        .with_file("data/posts.json", POSTS)
        .with_file("posts/a.html", "<p>alpha</p>")
        .with_file("posts/b.html", "<p>beta</p>")
        .with_file("pages/index.html", "<!--page:index-->")
        .with_file("pages/about.html", "<!--page:about-->{{page.description}}")
        .with_file("pages/broken.html", "{{page.nonexistent}}")
        .with_file(
            "templates/header.html",
            "<!--header-->{{page.title}} | {{site.title}}\n",
        )
        .with_file(
            "templates/sidebar.html",
            "<!--sidebar-->{{#each sidebar.recent}}[{{slug}}]{{/each}}\n",
        )
        .with_file(
            "templates/post.html",
            "<!--post:{{post.slug}}-->{{{post.content}}}\n",
        )
        .with_file(
            "templates/archive.html",
            "<!--archive-->{{#each posts}}({{slug}}){{/each}}\n",
        )
        .with_file("templates/comments.html", "<!--comments:{{post.slug}}-->\n")
        .with_file("templates/footer.html", "<!--footer-->\n")
        .with_file("templates/errors/404.html", "<!--404-->Not found on {{site.title}}")
        .with_file("templates/errors/500.html", "<!--500-->Internal error")
        .with_file(
            "templates/rss.xml",
            "<feed>{{#each posts}}<entry>{{slug}}</entry>{{/each}}</feed>",
        )
        .with_file(
            "templates/sitemap.xml",
            "<urlset>{{#each pages}}<url>{{../site.url}}/page/{{slug}}</url>{{/each}}\
             {{#each posts}}<url>{{../site.url}}/{{slug}}</url>{{/each}}</urlset>",
        )
}

pub fn fixture_site() -> Site {
    Site::boot(fixture_config(), &fixture_source()).expect("fixture site boots")
}

pub fn fixture_site_with(adjust: impl FnOnce(&mut Config)) -> Site {
    let mut config = fixture_config();
    adjust(&mut config);
    Site::boot(config, &fixture_source()).expect("fixture site boots")
}

pub fn site_without_index_page() -> Site {
    let source = fixture_source().with_file(
        "data/pages.json",
        r#"[{"slug": "about", "title": "About"}]"#,
    );
    Site::boot(fixture_config(), &source).expect("fixture site boots")
}
