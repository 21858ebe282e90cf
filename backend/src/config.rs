use std::env;
use std::path::PathBuf;

const DEFAULT_MODEL_PATH: &str = "diabetic_retinopathy_model.pt";
const DEFAULT_PORT: u16 = 8081;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub port: u16,
    pub frontend_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_path = lookup("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let frontend_dir = lookup("FRONTEND_DIR")
            .or_else(|| {
                lookup("CARGO_MANIFEST_DIR").map(|manifest_dir| format!("{}/../frontend/dist", manifest_dir))
            })
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/usr/src/app/frontend/dist"));

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(value) => match value.parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "MAX_UPLOAD_BYTES",
                        value,
                    });
                }
            },
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            model_path,
            port,
            frontend_dir,
            max_upload_bytes,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(config.port, 8081);
        assert_eq!(config.max_upload_bytes, 50 * 1024 * 1024);
        assert_eq!(config.frontend_dir, PathBuf::from("/usr/src/app/frontend/dist"));
        assert_eq!(config.bind_address(), "0.0.0.0:8081");
    }

    #[test]
    fn frontend_dir_falls_back_to_manifest_dir() {
        let config = config_from(&[("CARGO_MANIFEST_DIR", "/work/backend")]).unwrap();
        assert_eq!(config.frontend_dir, PathBuf::from("/work/backend/../frontend/dist"));

        let config = config_from(&[
            ("CARGO_MANIFEST_DIR", "/work/backend"),
            ("FRONTEND_DIR", "/srv/dist"),
        ])
        .unwrap();
        assert_eq!(config.frontend_dir, PathBuf::from("/srv/dist"));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("MODEL_PATH", "/models/dr.pt"),
            ("PORT", "9000"),
            ("MAX_UPLOAD_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(config.model_path, PathBuf::from("/models/dr.pt"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidValue { name: "PORT", .. })
        ));
        assert!(matches!(
            config_from(&[("MAX_UPLOAD_BYTES", "0")]),
            Err(ConfigError::InvalidValue { name: "MAX_UPLOAD_BYTES", .. })
        ));
    }
}
