pub mod config;
pub mod error;
pub mod generator;
pub mod logger;
pub mod path_resolver;
pub mod post;
pub mod runtime;
pub mod seo;
mod query_string;
mod test_data;
mod text_utils;
mod util;
mod view;
