pub mod config;
pub mod content;
pub mod faq;
pub mod lastmod;
pub mod logger;
pub mod related;
pub mod server;
pub mod site;
pub mod tags;
pub mod text_utils;
pub mod validate;
mod image_priority;
mod post_list;
mod post_processor;
mod test_data;
mod view;
