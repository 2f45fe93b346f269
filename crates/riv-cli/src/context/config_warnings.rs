use riv_config::RivConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &RivConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &RivConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.gateway.is_configured() && has_env_prefix(&env_keys, "RIV_GATEWAY") {
        warnings.push(
            "Gateway config appears default while RIV_GATEWAY* env vars exist. Use double underscores (example: RIV_GATEWAY__BASE_URL)."
                .to_string(),
        );
    }

    // Single-underscore keys like RIV_SCAN_DEEP_BATCH_SIZE are ignored by figment.
    for section in ["SCAN", "SESSION"] {
        let single = format!("RIV_{section}_");
        let double = format!("RIV_{section}__");
        if env_keys
            .iter()
            .any(|key| key.starts_with(&single) && !key.starts_with(&double))
        {
            warnings.push(format!(
                "RIV_{section}_* env vars are ignored. Use double underscores (example: RIV_{section}__<FIELD>)."
            ));
        }
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use riv_config::{GatewayConfig, RivConfig};

    use super::collect_unconfigured_warnings;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn warns_for_mistyped_env_keys() {
        let warnings = collect_unconfigured_warnings(
            &RivConfig::default(),
            env(&[
                ("RIV_GATEWAY_BASE_URL", "https://wms.example"),
                ("RIV_SCAN_DEEP_BATCH_SIZE", "1"),
                ("RIV_SESSION_PATH", "/tmp/s.json"),
            ]),
        );

        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn does_not_warn_for_well_formed_keys() {
        let config = RivConfig {
            gateway: GatewayConfig {
                base_url: "https://wms.example".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let warnings = collect_unconfigured_warnings(
            &config,
            env(&[
                ("RIV_GATEWAY__BASE_URL", "https://wms.example"),
                ("RIV_SCAN__DEEP_BATCH_SIZE", "1"),
                ("RIV_LOG", "debug"),
            ]),
        );

        assert!(warnings.is_empty());
    }
}
