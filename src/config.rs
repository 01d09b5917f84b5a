use std::env;

use anyhow::Context;

use crate::price::Price;

pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Insert the fixed seed set on startup when the store has never held data.
    pub seed_on_start: bool,
    /// Overrides the request scheme and host when building share URLs.
    pub public_base_url: Option<String>,
    pub property_defaults: PropertyDefaults,
}

/// Values substituted for fields omitted from a property create request.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefaults {
    pub title: String,
    pub price: Price,
    pub location: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

impl Default for PropertyDefaults {
    fn default() -> Self {
        Self {
            title: String::new(),
            price: Price::ZERO,
            location: String::new(),
            image_url: None,
            description: None,
        }
    }
}

impl PropertyDefaults {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut defaults = Self::default();
        if let Ok(title) = env::var("PROPERTY_DEFAULT_TITLE") {
            defaults.title = title;
        }
        if let Ok(location) = env::var("PROPERTY_DEFAULT_LOCATION") {
            defaults.location = location;
        }
        if let Ok(price) = env::var("PROPERTY_DEFAULT_PRICE") {
            defaults.price = price
                .parse()
                .with_context(|| format!("invalid PROPERTY_DEFAULT_PRICE {price:?}"))?;
        }
        Ok(defaults)
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| IN_MEMORY_DATABASE_URL.to_string());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let seed_on_start = env::var("SEED_ON_START")
            .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .ok()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        Ok(Self {
            database_url,
            host,
            port,
            seed_on_start,
            public_base_url,
            property_defaults: PropertyDefaults::from_env()?,
        })
    }

    /// Fresh seeded in-memory store, used by tests and local runs.
    pub fn in_memory() -> Self {
        Self {
            database_url: IN_MEMORY_DATABASE_URL.to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            seed_on_start: true,
            public_base_url: None,
            property_defaults: PropertyDefaults::default(),
        }
    }

    pub fn listen_authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
