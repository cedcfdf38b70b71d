#[derive(Debug, Clone)]
pub struct OuraConfig {
    pub token: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub oura: OuraConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3000);
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:nutrition.db".into());
        let oura = OuraConfig {
            token: std::env::var("OURA_TOKEN").ok().filter(|t| !t.is_empty()),
            base_url: std::env::var("OURA_API_URL")
                .unwrap_or_else(|_| "https://api.ouraring.com".into()),
            timeout_secs: std::env::var("OURA_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(15),
        };
        Self {
            host,
            port,
            database_url,
            oura,
        }
    }
}
