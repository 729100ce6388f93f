use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub backend_url: String,
    pub booking_window_days: i64,
    pub notification_refresh_delay: Duration,
    pub wizard_idle: Duration,
    pub business_name: String,
    pub business_address: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:8001".to_string()),
            booking_window_days: env::var("BOOKING_WINDOW_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            notification_refresh_delay: Duration::from_millis(
                env::var("NOTIFICATION_REFRESH_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(3000),
            ),
            wizard_idle: minutes(env::var("WIZARD_IDLE_MINUTES").ok().as_deref(), 30),
            business_name: env::var("BUSINESS_NAME")
                .unwrap_or_else(|_| "BMB Estética Automotiva".to_string()),
            business_address: env::var("BUSINESS_ADDRESS")
                .unwrap_or_else(|_| "Rua Juiz Jacob Goldemberg, 4".to_string()),
        }
    }
}

fn minutes(raw: Option<&str>, default: u64) -> Duration {
    let minutes = raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default);
    Duration::from_secs(minutes.saturating_mul(60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes() {
        assert_eq!(minutes(Some("45"), 30), Duration::from_secs(45 * 60));
        assert_eq!(minutes(Some("abc"), 30), Duration::from_secs(30 * 60));
        assert_eq!(minutes(None, 30), Duration::from_secs(30 * 60));
    }

    #[test]
    fn test_minutes_saturates() {
        let huge = u64::MAX.to_string();
        assert_eq!(minutes(Some(&huge), 30), Duration::from_secs(u64::MAX));
    }
}
