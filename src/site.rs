use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use spdlog::{debug, info};

use crate::config::Config;
use crate::content::markdown_renderer::{render_markdown, RenderedContent};
use crate::content::{Post, PostId};
use crate::lastmod::build_lastmod_map;
use crate::post_processor::{load_posts, sorted_posts};
use crate::related::related_posts;
use crate::tags::normalize_tag;
use crate::view::llms_renderer::LlmsRenderer;
use crate::view::markdown_export::render_markdown_export;
use crate::view::post_renderer::PostRenderer;
use crate::view::rss_renderer::{RssChannel, RssItem};
use crate::view::sitemap_renderer::SitemapRenderer;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
pub const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

const ARCHIVES_PAGE: &str = "/archives/";

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

/// Generated site: route path to response body.
#[derive(Debug, Default)]
pub struct Routes {
    routes: BTreeMap<String, Route>,
}

impl Routes {
    pub fn insert(&mut self, path: String, content_type: &'static str, body: Vec<u8>) {
        self.routes.insert(path, Route { content_type, body });
    }

    pub fn get(&self, path: &str) -> Option<&Route> {
        self.routes.get(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// File below `output_dir` that holds the route `path`:
    /// `/posts/a/` is `posts/a/index.html`, `/rss.xml` is `rss.xml`.
    pub fn file_for(output_dir: &Path, path: &str) -> PathBuf {
        let relative = path.trim_start_matches('/');
        if relative.is_empty() || relative.ends_with('/') {
            output_dir.join(relative).join("index.html")
        } else {
            output_dir.join(relative)
        }
    }

    pub fn write_to(&self, output_dir: &Path) -> Result<()> {
        for (path, route) in &self.routes {
            let file = Self::file_for(output_dir, path);
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("could not create directory {}", parent.display()))?;
            }
            fs::write(&file, &route.body).with_context(|| format!("could not write {}", file.display()))?;
            debug!("Wrote {} to {}", path, file.display());
        }

        info!("Wrote {} routes to {}", self.routes.len(), output_dir.display());
        Ok(())
    }
}

pub struct Site {
    pub config: Config,
    pub posts: Vec<Post>,
}

impl Site {
    pub fn load(config: Config) -> Result<Site> {
        let posts = load_posts(&config.paths.posts_dir, &config.site.author)?;
        Ok(Site { config, posts })
    }

    fn website(&self) -> &str {
        self.config.site.website.trim_end_matches('/')
    }

    /// Published posts at `now`, most recently updated first.
    pub fn published_posts(&self, now: DateTime<Utc>) -> Vec<&Post> {
        sorted_posts(&self.posts, now, self.config.site.scheduled_margin())
    }

    pub fn generate(&self, now: DateTime<Utc>) -> Result<Routes> {
        let site = &self.config.site;
        let published = self.published_posts(now);
        let mut routes = Routes::default();

        let mut rendered: HashMap<&PostId, RenderedContent> = HashMap::new();
        for post in &published {
            let content = render_markdown(&post.body)
                .with_context(|| format!("could not render post {}", post.id()))?;
            rendered.insert(post.id(), content);
        }

        let post_renderer = PostRenderer {
            site_title: &site.title,
            lang: &site.lang,
            website: self.website(),
        };
        for post in &published {
            let Some(content) = rendered.get(post.id()) else {
                continue;
            };
            let related = related_posts(post, &published, self.config.defaults.related_posts_limit);
            let page = post_renderer
                .render(post, content, &related)
                .with_context(|| format!("could not render page of post {}", post.id()))?;
            routes.insert(post.path(), HTML_CONTENT_TYPE, page.into_bytes());
            routes.insert(format!("/posts/{}.md", post.id()), MARKDOWN_CONTENT_TYPE, render_markdown_export(post).into_bytes());
        }

        let items: Vec<RssItem> = published
            .iter()
            .map(|post| RssItem {
                title: &post.title,
                link: post.url(self.website()),
                description: &post.description,
                pub_date: post.last_updated(),
                author: &site.author,
                content_html: rendered.get(post.id()).map_or("", |c| c.html.as_str()),
            })
            .collect();
        let channel = RssChannel {
            ch_title: &site.title,
            ch_link: &site.website,
            ch_desc: &site.description,
        };
        routes.insert("/rss.xml".to_string(), XML_CONTENT_TYPE, channel.render(&items)?);

        let lastmod = build_lastmod_map(&self.config.paths.posts_dir, self.website());
        let sitemap = SitemapRenderer { lastmod: &lastmod };
        routes.insert("/sitemap.xml".to_string(), XML_CONTENT_TYPE, sitemap.render(self.sitemap_urls(&published))?);

        let llms = LlmsRenderer {
            title: &site.title,
            description: &site.description,
            website: self.website(),
        };
        routes.insert("/llms.txt".to_string(), TEXT_CONTENT_TYPE, llms.render_index(&published).into_bytes());
        routes.insert("/llms-full.txt".to_string(), TEXT_CONTENT_TYPE, llms.render_full(&published).into_bytes());

        info!("Generated {} routes for {} published posts", routes.len(), published.len());
        Ok(routes)
    }

    /// Absolute URLs of the configured static pages, the published posts and
    /// their tag pages.
    pub fn sitemap_urls(&self, published: &[&Post]) -> BTreeSet<String> {
        let website = self.website();
        let mut urls = BTreeSet::new();

        for page in &self.config.defaults.static_pages {
            if !self.config.site.show_archives && page.trim_end_matches('/') == ARCHIVES_PAGE.trim_end_matches('/') {
                continue;
            }
            urls.insert(format!("{}{}", website, page));
        }

        for post in published {
            urls.insert(post.url(website));
            for tag in &post.header.tags {
                let tag = normalize_tag(tag);
                if !tag.is_empty() {
                    urls.insert(format!("{}/tags/{}/", website, tag));
                }
            }
        }

        urls
    }
}
