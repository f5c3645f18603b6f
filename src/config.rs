use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "HridayMitra";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/HridayMitra/ on all platforms (user-visible by design)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("HridayMitra")
}

/// Get the local record store directory
pub fn store_dir() -> PathBuf {
    app_data_dir().join("store")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("HridayMitra"));
    }

    #[test]
    fn store_dir_under_app_data() {
        let store = store_dir();
        let app = app_data_dir();
        assert!(store.starts_with(app));
        assert!(store.ends_with("store"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
