//! Fixtures for router tests.

use quill_core::{Config, MemorySource};

const CONFIG: &str = r#"
[site]
url = "https://example.com"
title = "Test Blog"
"#;

pub fn fixture_config() -> Config {
    Config::from_toml_str(CONFIG).expect("fixture config parses")
}

pub fn fixture_source() -> MemorySource {
    MemorySource::new()
        .with_file(
            "data/pages.json",
            r#"[
                {"slug": "index", "title": "Home"},
                {"slug": "about", "title": "About"},
                {"slug": "broken", "title": "Broken"}
            ]"#,
        )
        .with_file(
            "data/posts.json",
            r#"[
                {"title": "A", "slug": "a", "date": "3 Jan", "machineDate": "2024-01-03T00:00:00Z", "tags": ["x", "y"]},
                {"title": "B", "slug": "b", "date": "2 Jan", "machineDate": "2024-01-02T00:00:00Z", "tags": ["y"]}
            ]"#,
        )
        .with_file("posts/a.html", "<p>alpha</p>")
        .with_file("posts/b.html", "<p>beta</p>")
        .with_file("pages/index.html", "<!--page:index-->")
        .with_file("pages/about.html", "<!--page:about-->")
        .with_file("pages/broken.html", "{{page.nonexistent}}")
        .with_file("templates/header.html", "<!--header-->{{page.title}} | {{site.title}}\n")
        .with_file("templates/sidebar.html", "<!--sidebar-->\n")
        .with_file("templates/post.html", "<!--post:{{post.slug}}-->{{{post.content}}}\n")
        .with_file(
            "templates/archive.html",
            "<!--archive-->{{#each posts}}({{slug}}){{/each}}\n",
        )
        .with_file("templates/comments.html", "<!--comments:{{post.slug}}-->\n")
        .with_file("templates/footer.html", "<!--footer-->\n")
        .with_file("templates/errors/404.html", "<!--404-->")
        .with_file("templates/errors/500.html", "<!--500-->")
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
