pub mod llms_renderer;
pub mod markdown_export;
pub mod post_renderer;
pub mod rss_renderer;
pub mod sitemap_renderer;
