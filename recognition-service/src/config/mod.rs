use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub baidu: BaiduConfig,
}

/// Upstream Baidu AI settings.
///
/// The two recognition endpoints are authorized by separate access
/// tokens; both are opaque, externally provisioned, and time limited.
#[derive(Debug, Clone, Deserialize)]
pub struct BaiduConfig {
    pub api_base_url: String,
    pub dish_access_token: Secret<String>,
    pub ingredient_access_token: Secret<String>,
    pub timeout_seconds: u64,
}

impl RecognitionConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let config = RecognitionConfig {
            common: common_config,
            service_name: get_env("SERVICE_NAME", Some("recognition-service"))?,
            log_level: get_env("LOG_LEVEL", Some("info,recognition_service=debug"))?,
            baidu: BaiduConfig {
                api_base_url: get_env("BAIDU_API_BASE_URL", Some("https://aip.baidubce.com"))?,
                dish_access_token: Secret::new(get_env("BAIDU_DISH_ACCESS_TOKEN", None)?),
                ingredient_access_token: Secret::new(get_env(
                    "BAIDU_INGREDIENT_ACCESS_TOKEN",
                    None,
                )?),
                timeout_seconds: get_env("UPSTREAM_TIMEOUT_SECONDS", Some("10"))?
                    .parse()
                    .map_err(|e: std::num::ParseIntError| {
                        AppError::ConfigError(anyhow::anyhow!(
                            "UPSTREAM_TIMEOUT_SECONDS: {}",
                            e
                        ))
                    })?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.baidu.timeout_seconds == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "UPSTREAM_TIMEOUT_SECONDS must be greater than 0"
            )));
        }

        if self.baidu.api_base_url.ends_with('/') {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "BAIDU_API_BASE_URL must not end with a trailing slash"
            )));
        }

        Ok(())
    }
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}
