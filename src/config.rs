use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the board game catalog CSV
    #[serde(default = "default_games_csv_path")]
    pub games_csv_path: String,

    /// Path to the user ratings CSV
    #[serde(default = "default_ratings_csv_path")]
    pub ratings_csv_path: String,

    /// Number of distinct users kept from the ratings file
    #[serde(default = "default_max_rating_users")]
    pub max_rating_users: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_games_csv_path() -> String {
    "data/games.csv".to_string()
}

fn default_ratings_csv_path() -> String {
    "data/user_ratings.csv".to_string()
}

fn default_max_rating_users() -> usize {
    50
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
