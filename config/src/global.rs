//! # Process-wide Site Configuration
//!
//! The site configuration is written once and read many times. [`install`]
//! sets it at startup; [`site`] hands out the same `&'static` reference to
//! every reader for the rest of the process.

use std::sync::OnceLock;

use errors::ConfigError;
use tracing::{debug, info};

use crate::site::SiteConfig;
use crate::validation::ensure_valid;

static SITE: OnceLock<SiteConfig> = OnceLock::new();

/// Install the process-wide site configuration.
///
/// The value is validated first. Fails with `AlreadyInitialized` if a value
/// was installed before, or if [`site`] already fell back to the defaults.
pub fn install(config: SiteConfig) -> Result<&'static SiteConfig, ConfigError> {
    ensure_valid(&config)?;

    let mut installed = false;
    let site = SITE.get_or_init(|| {
        installed = true;
        config
    });

    if !installed {
        return Err(ConfigError::AlreadyInitialized);
    }

    info!("Installed site configuration for {}", site.website);
    Ok(site)
}

/// The process-wide site configuration.
///
/// Returns the installed value, or installs and returns the built-in
/// defaults on first read if nothing was installed.
pub fn site() -> &'static SiteConfig {
    SITE.get_or_init(|| {
        debug!("No site configuration installed, using built-in defaults");
        SiteConfig::default()
    })
}

/// Whether a configuration has been installed or defaulted.
pub fn is_initialized() -> bool {
    SITE.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The static is shared by every test in this binary, so all assertions
    // about it live in one test.
    #[test]
    fn test_write_once_read_many() {
        let mut custom = SiteConfig::default();
        custom.title = "Installed".to_string();

        let mut invalid = SiteConfig::default();
        invalid.post_per_page = 0;
        assert!(matches!(
            install(invalid),
            Err(ConfigError::Validation { .. })
        ));
        assert!(!is_initialized());

        let installed = install(custom.clone()).unwrap();
        assert_eq!(installed.title, "Installed");
        assert!(is_initialized());

        let first = site();
        let second = site();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(first, installed));
        assert_eq!(first, &custom);

        assert!(matches!(
            install(SiteConfig::default()),
            Err(ConfigError::AlreadyInitialized)
        ));
        assert_eq!(site().title, "Installed");
    }
}
