use anyhow::{Context, Result, bail};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub enable_swagger: bool,
    pub database_url: String,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` uses the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match get("PORT") {
            Some(port) => port.parse::<u16>().with_context(|| format!("invalid PORT {:?}", port))?,
            None => 3000,
        };
        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let enable_swagger = get("ENABLE_SWAGGER").as_deref() == Some("true");
        let run_migrations = get("DATABASE_MIGRATIONS").as_deref() == Some("true");
        let database_url = database_url(&get)?;

        Ok(Config {
            port,
            allowed_origins,
            enable_swagger,
            database_url,
            run_migrations,
        })
    }
}

fn database_url(get: &impl Fn(&str) -> Option<String>) -> Result<String> {
    if let Some(url) = get("DATABASE_URL") {
        return Ok(url);
    }
    let Some(host) = get("DATABASE_HOST") else {
        bail!("either DATABASE_URL or DATABASE_HOST must be set");
    };
    let port = get("DATABASE_PORT").unwrap_or_else(|| "5432".to_string());
    let username = get("DATABASE_USERNAME").context("DATABASE_USERNAME must be set")?;
    let password = get("DATABASE_PASSWORD").unwrap_or_default();
    let name = get("DATABASE_NAME").context("DATABASE_NAME must be set")?;
    Ok(format!("postgres://{}:{}@{}:{}/{}", username, password, host, port, name))
}
