//! Resolves anime catalog records against TMDB and attaches best-effort
//! metadata: ids, season, artwork, synopsis, rating and a media sub-type.

pub mod config;
pub mod enricher;
pub mod services;
