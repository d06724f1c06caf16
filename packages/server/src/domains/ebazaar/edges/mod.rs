pub mod http;

pub use http::routes;
