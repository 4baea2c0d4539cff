pub mod http;
pub mod tmdb;
mod traits;

pub use http::HttpClient;
pub use tmdb::{TmdbClient, TmdbOptions};
pub use traits::SearchClient;
