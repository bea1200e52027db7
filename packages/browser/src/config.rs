//! Browser session configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// When navigation hands control back to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageLoad {
    /// Return once the DOM is parsed, before sub-resources finish loading.
    /// Callers compensate with explicit waits on the content they need.
    #[default]
    Eager,
    /// Return after the `load` event.
    Normal,
}

/// Launch-time settings for a browser session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Run without a visible window.
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// User agent reported to the site.
    pub user_agent: String,
    pub page_load: PageLoad,
    /// Upper bound on a single navigation, in milliseconds.
    pub navigation_timeout_ms: u64,
    /// Skip image decoding and loading.
    pub disable_images: bool,
    /// Additional Chromium command-line flags.
    pub extra_args: Vec<String>,
    /// Explicit browser binary. Falls back to [`crate::chromium::find_chromium`].
    pub chrome_executable: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            user_agent: "Mozilla/5.0".to_owned(),
            page_load: PageLoad::Eager,
            navigation_timeout_ms: 60_000,
            disable_images: true,
            extra_args: Vec::new(),
            chrome_executable: None,
        }
    }
}

impl SessionConfig {
    /// Navigation timeout as a [`Duration`].
    #[must_use]
    pub const fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    /// Chromium flags for this configuration (excluding `--headless`, which
    /// the launcher controls).
    #[must_use]
    pub fn chrome_args(&self) -> Vec<String> {
        let mut args = vec![
            "--disable-gpu".to_owned(),
            "--no-sandbox".to_owned(),
            "--disable-dev-shm-usage".to_owned(),
            "--disable-extensions".to_owned(),
            "--disable-blink-features=AutomationControlled".to_owned(),
            format!("--window-size={},{}", self.window_width, self.window_height),
            format!("--user-agent={}", self.user_agent),
        ];
        if self.disable_images {
            args.push("--blink-settings=imagesEnabled=false".to_owned());
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_args_disable_images_and_spoof_agent() {
        let args = SessionConfig::default().chrome_args();
        assert!(args.contains(&"--window-size=1920,1080".to_owned()));
        assert!(args.contains(&"--user-agent=Mozilla/5.0".to_owned()));
        assert!(args.contains(&"--blink-settings=imagesEnabled=false".to_owned()));
        assert!(args.contains(&"--no-sandbox".to_owned()));
    }

    #[test]
    fn extra_args_are_appended_last() {
        let config = SessionConfig {
            disable_images: false,
            extra_args: vec!["--lang=en-IN".to_owned()],
            ..SessionConfig::default()
        };
        let args = config.chrome_args();
        assert_eq!(args.last().map(String::as_str), Some("--lang=en-IN"));
        assert!(!args.iter().any(|a| a.starts_with("--blink-settings")));
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let config: SessionConfig = toml::from_str("page_load = \"normal\"").unwrap();
        assert_eq!(config.page_load, PageLoad::Normal);
        assert_eq!(config.window_width, 1920);
        assert!(config.headless);
    }
}
