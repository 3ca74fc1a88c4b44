use std::{env, time::Duration};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_path: String,
    pub host: String,
    pub port: u16,
    pub timings: CheckoutTimings,
}

/// Fixed delays standing in for payment processing and the confirmation page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutTimings {
    pub payment: Duration,
    pub finalize: Duration,
    pub redirect: Duration,
}

impl Default for CheckoutTimings {
    fn default() -> Self {
        Self {
            payment: Duration::from_millis(3000),
            finalize: Duration::from_millis(5000),
            redirect: Duration::from_millis(10000),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let catalog_path = env::var("CATALOG_PATH").unwrap_or_else(|_| "catalog.json".to_string());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let defaults = CheckoutTimings::default();
        let timings = CheckoutTimings {
            payment: millis_from_env("PAYMENT_DELAY_MS")?.unwrap_or(defaults.payment),
            finalize: millis_from_env("FINALIZE_DELAY_MS")?.unwrap_or(defaults.finalize),
            redirect: millis_from_env("REDIRECT_DELAY_MS")?.unwrap_or(defaults.redirect),
        };

        Ok(Self {
            port,
            catalog_path,
            host,
            timings,
        })
    }
}

fn millis_from_env(key: &str) -> anyhow::Result<Option<Duration>> {
    match env::var(key) {
        Ok(raw) => {
            let ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|err| anyhow::anyhow!("{key} must be a number of milliseconds: {err}"))?;
            Ok(Some(Duration::from_millis(ms)))
        }
        Err(_) => Ok(None),
    }
}
