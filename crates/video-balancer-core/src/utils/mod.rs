pub mod host;

pub use host::{build_cdn_url, extract_server_name};
