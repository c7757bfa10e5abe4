//! Browser fingerprint applied to each session's page.

use rand::seq::SliceRandom;

const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36 Edg/123.0.0.0",
];

const VIEWPORTS: [(u32, u32); 4] = [(1920, 1080), (1366, 768), (1536, 864), (1440, 900)];

/// User agent and viewport one account's session presents to a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintConfig {
    /// User-Agent header and `navigator.userAgent`
    pub user_agent: String,
    /// Device metrics width in CSS pixels
    pub viewport_width: u32,
    /// Device metrics height in CSS pixels
    pub viewport_height: u32,
}

impl FingerprintConfig {
    /// Pick a common desktop user agent and viewport at random, so accounts
    /// logged in from the same machine don't all look identical.
    #[must_use]
    pub fn randomized() -> Self {
        let mut rng = rand::thread_rng();
        let user_agent = USER_AGENTS.choose(&mut rng).unwrap_or(&USER_AGENTS[0]);
        let (width, height) = *VIEWPORTS.choose(&mut rng).unwrap_or(&VIEWPORTS[0]);

        Self {
            user_agent: (*user_agent).to_string(),
            viewport_width: width,
            viewport_height: height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randomized_draws_from_desktop_profiles() {
        for _ in 0..50 {
            let fingerprint = FingerprintConfig::randomized();
            assert!(USER_AGENTS.contains(&fingerprint.user_agent.as_str()));
            assert!(VIEWPORTS.contains(&(fingerprint.viewport_width, fingerprint.viewport_height)));
        }
    }

    #[test]
    fn test_sessions_get_varied_fingerprints() {
        let fingerprints: Vec<_> = (0..30).map(|_| FingerprintConfig::randomized()).collect();
        assert!(fingerprints.iter().any(|f| f != &fingerprints[0]));
    }
}
