use std::env;

/// Deployment environment. Only `production` tightens the CORS policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub api_key: String,
    pub environment: Environment,
    pub allowed_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .unwrap_or(4000),
            api_key: env::var("API_KEY")?,
            environment,
            allowed_origin: env::var("ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "https://www.example.com".to_string()),
        })
    }
}
