use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "LabAssist";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default REST backend, matching the development server.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Dashboard and analytics screens re-fetch on this fixed interval.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Recent-activity feed caps: 5 on the dashboard, 10 on analytics.
pub const DASHBOARD_ACTIVITY_LIMIT: usize = 5;
pub const ANALYTICS_ACTIVITY_LIMIT: usize = 10;

pub fn default_log_filter() -> String {
    "labassist=info".to_string()
}

/// Get the application data directory (~/LabAssist/)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("LabAssist")
}

/// Directory where generated report PDFs are written.
pub fn exports_dir() -> PathBuf {
    app_data_dir().join("exports")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("LabAssist"));
    }

    #[test]
    fn exports_dir_under_app_data() {
        let exports = exports_dir();
        assert!(exports.starts_with(app_data_dir()));
        assert!(exports.ends_with("exports"));
    }

    #[test]
    fn poll_interval_is_30_seconds() {
        assert_eq!(POLL_INTERVAL, Duration::from_secs(30));
    }

    #[test]
    fn activity_limits() {
        assert_eq!(DASHBOARD_ACTIVITY_LIMIT, 5);
        assert_eq!(ANALYTICS_ACTIVITY_LIMIT, 10);
    }
}
