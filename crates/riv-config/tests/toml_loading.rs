//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed cwd and env var manipulation.

use figment::Jail;
use pretty_assertions::assert_eq;
use riv_config::RivConfig;

#[test]
fn loads_project_local_config() {
    Jail::expect_with(|jail| {
        jail.create_dir(".riv")?;
        jail.create_file(
            ".riv/config.toml",
            r#"
[gateway]
base_url = "https://wms.example.internal"
cookie = "session=abc"

[scan]
deep_batch_size = 1
batch_delay_ms = 0

[destinations]
SC-FAST = "KTW3"
"#,
        )?;

        let config = RivConfig::load().expect("config loads");
        assert!(config.gateway.is_configured());
        assert_eq!(config.gateway.cookie, "session=abc");
        assert_eq!(config.gateway.locale, "pl-PL");
        assert_eq!(config.scan.deep_batch_size, 1);
        assert_eq!(config.scan.surface_batch_size, 5);
        assert_eq!(config.scan.batch_delay_ms, 0);
        assert_eq!(config.destinations.destination_for("SC-FAST"), Some("KTW3"));
        Ok(())
    });
}

#[test]
fn explicit_file_overrides_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".riv")?;
        jail.create_file(".riv/config.toml", "[scan]\nsurface_batch_size = 3\n")?;
        jail.create_file("override.toml", "[scan]\nsurface_batch_size = 4\n")?;

        let path = jail.directory().join("override.toml");
        let config = RivConfig::load_from(Some(&path)).expect("config loads");
        assert_eq!(config.scan.surface_batch_size, 4);
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".riv")?;
        jail.create_file(".riv/config.toml", "[scan]\npallet_concurrency = 0\n")?;

        assert!(RivConfig::load().is_err());
        Ok(())
    });
}
