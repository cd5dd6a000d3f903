use std::{str::FromStr, time::Duration};

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_SESSION_TTL_DAYS: i64 = 8;
const MAX_SESSION_TTL_DAYS: i64 = 365;

/// Settings baked into the bundle at build time. A browser bundle has no process environment, so
/// values are read with `option_env!` when the client is compiled.
#[derive(Clone, Copy, Debug)]
pub struct ClientConfig {
    /// Base url of the Narvis API, without a trailing slash
    pub api_url: &'static str,
    /// Upper bound for any single request before it is reported as a network failure
    pub request_timeout: Duration,
    /// Lifetime of a stored session token, counted from login
    pub session_ttl: chrono::Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL,
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            session_ttl: chrono::Duration::days(DEFAULT_SESSION_TTL_DAYS),
        }
    }
}

impl ClientConfig {
    /// Build the config from `NARVIS_API_URL`, `NARVIS_REQUEST_TIMEOUT_MS` and
    /// `NARVIS_SESSION_TTL_DAYS` as they were set at compile time
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("NARVIS_API_URL"),
            option_env!("NARVIS_REQUEST_TIMEOUT_MS"),
            option_env!("NARVIS_SESSION_TTL_DAYS"),
        )
    }

    fn from_values(
        api_url: Option<&'static str>,
        timeout_ms: Option<&str>,
        ttl_days: Option<&str>,
    ) -> Self {
        let api_url = match api_url.map(str::trim) {
            Some(url) if !url.is_empty() => url.trim_end_matches('/'),
            _ => DEFAULT_API_URL,
        };
        let timeout_ms = parse_or("NARVIS_REQUEST_TIMEOUT_MS", timeout_ms, DEFAULT_TIMEOUT_MS);
        let mut ttl_days = parse_or("NARVIS_SESSION_TTL_DAYS", ttl_days, DEFAULT_SESSION_TTL_DAYS);
        if !(1..=MAX_SESSION_TTL_DAYS).contains(&ttl_days) {
            log::warn!(
                "NARVIS_SESSION_TTL_DAYS must be between 1 and {MAX_SESSION_TTL_DAYS}, got \
                 {ttl_days}. Using the default"
            );
            ttl_days = DEFAULT_SESSION_TTL_DAYS;
        }
        Self {
            api_url,
            request_timeout: Duration::from_millis(timeout_ms),
            session_ttl: chrono::Duration::days(ttl_days),
        }
    }
}

fn parse_or<T>(name: &str, raw: Option<&str>, default: T) -> T
where
    T: FromStr + Copy,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            log::warn!("Ignoring invalid value `{raw}` for {name}, using the default");
            default
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use rstest::rstest;

    use super::ClientConfig;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ClientConfig::from_values(None, None, None);

        assert_eq!(config.api_url, "http://localhost:8000", "default url");
        assert_eq!(config.request_timeout, Duration::from_secs(10), "default timeout");
        assert_eq!(config.session_ttl, chrono::Duration::days(8), "default ttl");
    }

    #[rstest]
    #[case("https://api.narvis.app/", "https://api.narvis.app")]
    #[case("  ", "http://localhost:8000")]
    #[case("http://10.0.0.2:9000", "http://10.0.0.2:9000")]
    fn api_url_is_normalized(#[case] raw: &'static str, #[case] expected: &str) {
        let config = ClientConfig::from_values(Some(raw), None, None);
        assert_eq!(config.api_url, expected, "url from `{raw}`");
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let config = ClientConfig::from_values(None, Some("soon"), Some("-"));

        assert_eq!(config.request_timeout, Duration::from_secs(10), "timeout fallback");
        assert_eq!(config.session_ttl, chrono::Duration::days(8), "ttl fallback");
    }

    #[rstest]
    #[case::zero("0")]
    #[case::negative("-3")]
    #[case::past_a_year("366")]
    #[case::oversized("1000000000")]
    #[case::beyond_i64("99999999999999999999")]
    fn out_of_range_ttl_falls_back_to_default(#[case] raw: &str) {
        let config = ClientConfig::from_values(None, None, Some(raw));
        assert_eq!(config.session_ttl, chrono::Duration::days(8), "ttl from `{raw}`");
    }

    #[test]
    fn longest_ttl_is_accepted() {
        let config = ClientConfig::from_values(None, None, Some("365"));
        assert_eq!(config.session_ttl, chrono::Duration::days(365), "one year");
    }

    #[test]
    fn numbers_are_parsed() {
        let config = ClientConfig::from_values(None, Some("2500"), Some("1"));

        assert_eq!(config.request_timeout, Duration::from_millis(2500), "timeout");
        assert_eq!(config.session_ttl, chrono::Duration::days(1), "ttl");
    }
}
