use std::time::Duration;

/// Read `name`, treating an unset or blank variable as absent.
pub fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

/// Parse a timeout in milliseconds, or a humantime span such as `"2s"` or
/// `"1m 30s"`.
pub fn parse_timeout_ms(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(ms) = raw.parse::<u64>() {
        return Some(ms);
    }
    humantime::parse_duration(raw)
        .ok()
        .and_then(|span| u64::try_from(span.as_millis()).ok())
}

/// `0` disables the limit.
pub fn timeout_from_ms(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}
