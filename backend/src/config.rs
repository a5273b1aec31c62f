use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub listen_addr: String,
    pub cors_origins: Vec<String>,
    pub pricing_upstream_url: Option<String>,
    pub pricing_timeout_secs: u64,
    pub max_body_bytes: usize,
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let pricing_upstream_url =
            parse_upstream_url(std::env::var("PRICING_UPSTREAM_URL").ok().as_deref())?;

        let log_format = match std::env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("text") | Err(_) => LogFormat::Text,
            Ok(other) => anyhow::bail!("LOG_FORMAT must be 'text' or 'json', got '{other}'"),
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".into())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a number")?,
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            pricing_upstream_url,
            pricing_timeout_secs: std::env::var("PRICING_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .context("PRICING_TIMEOUT_SECS must be a number")?,
            max_body_bytes: match std::env::var("MAX_BODY_BYTES") {
                Ok(v) => v.parse().context("MAX_BODY_BYTES must be a number")?,
                Err(_) => crate::DEFAULT_MAX_BODY_BYTES,
            },
            log_format,
        })
    }
}

/// Blank means "not configured". Anything else must be an absolute http(s) URL.
fn parse_upstream_url(raw: Option<&str>) -> anyhow::Result<Option<String>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let url = reqwest::Url::parse(raw)
        .with_context(|| format!("PRICING_UPSTREAM_URL is not a valid URL: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        anyhow::bail!("PRICING_UPSTREAM_URL must be an http(s) URL with a host, got {raw}");
    }

    Ok(Some(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_upstream_is_unset() {
        assert_eq!(parse_upstream_url(None).unwrap(), None);
        assert_eq!(parse_upstream_url(Some("   ")).unwrap(), None);
    }

    #[test]
    fn valid_upstream_is_kept_trimmed() {
        assert_eq!(
            parse_upstream_url(Some(" https://pricing.internal:8443/v1/update?src=web ")).unwrap(),
            Some("https://pricing.internal:8443/v1/update?src=web".to_string())
        );
    }

    #[test]
    fn malformed_upstream_fails_at_startup() {
        for raw in ["http://", "http://exa mple.com/", "https://[::1/update", "pricing.internal/update"] {
            assert!(parse_upstream_url(Some(raw)).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn non_http_upstream_is_rejected() {
        for raw in ["ftp://pricing.internal/", "file:///etc/passwd", "mailto:ops@example.com"] {
            assert!(parse_upstream_url(Some(raw)).is_err(), "{raw:?} should be rejected");
        }
    }
}
