use serde::Deserialize;

// Search responses
#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct MovieResult {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub original_language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TvResult {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub original_language: Option<String>,
}

/// `/search/multi` mixes movies, series and people
#[derive(Debug, Deserialize)]
pub struct MultiResult {
    pub id: u64,
    #[serde(default)]
    pub media_type: String,
    pub title: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub original_language: Option<String>,
}

// Detail responses
#[derive(Debug, Deserialize)]
pub struct MovieDetails {
    pub overview: Option<String>,
    pub runtime: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TvDetails {
    pub overview: Option<String>,
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub seasons: Vec<Season>,
}

#[derive(Debug, Deserialize)]
pub struct Season {
    pub season_number: u32,
    pub episode_count: Option<u32>,
    pub poster_path: Option<String>,
    pub air_date: Option<String>,
}
