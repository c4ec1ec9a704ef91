use crate::shared::config::{ConfigError, Lookup};

pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Credentials for the hosted media service.
///
/// Read either from `CLOUDINARY_URL` (`cloudinary://<key>:<secret>@<cloud>`) or from
/// the three `CLOUDINARY_CLOUD_NAME` / `CLOUDINARY_API_KEY` / `CLOUDINARY_API_SECRET`
/// variables. `CLOUDINARY_API_BASE` overrides the endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base_url: String,
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl CloudinaryConfig {
    /// Returns `Ok(None)` when no media credentials are configured at all.
    pub fn from_lookup(lookup: Lookup) -> Result<Option<Self>, ConfigError> {
        let api_base_url = lookup("CLOUDINARY_API_BASE")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        if let Some(url) = lookup("CLOUDINARY_URL") {
            let (cloud_name, api_key, api_secret) = parse_cloudinary_url(&url)?;
            return Ok(Some(Self {
                cloud_name,
                api_key,
                api_secret,
                api_base_url,
            }));
        }

        const PARTS: [&str; 3] = [
            "CLOUDINARY_CLOUD_NAME",
            "CLOUDINARY_API_KEY",
            "CLOUDINARY_API_SECRET",
        ];
        let values: Vec<Option<String>> = PARTS.iter().map(|name| lookup(name)).collect();

        if values.iter().all(Option::is_none) {
            return Ok(None);
        }

        let missing: Vec<String> = PARTS
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let mut values = values.into_iter().flatten();
        match (values.next(), values.next(), values.next()) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Ok(Some(Self {
                cloud_name: cloud_name.trim().to_string(),
                api_key: api_key.trim().to_string(),
                api_secret: api_secret.trim().to_string(),
                api_base_url,
            })),
            _ => Err(ConfigError::Missing(
                PARTS.iter().map(|p| p.to_string()).collect(),
            )),
        }
    }

    pub fn endpoint(&self, resource_type: &str, action: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.api_base_url, self.cloud_name, resource_type, action
        )
    }
}

fn parse_cloudinary_url(raw: &str) -> Result<(String, String, String), ConfigError> {
    let invalid = |reason: &str| ConfigError::invalid("CLOUDINARY_URL", reason);

    let rest = raw
        .trim()
        .strip_prefix("cloudinary://")
        .ok_or_else(|| invalid("must start with cloudinary://"))?;
    let (credentials, cloud_name) = rest
        .rsplit_once('@')
        .ok_or_else(|| invalid("expected <key>:<secret>@<cloud>"))?;
    let (api_key, api_secret) = credentials
        .split_once(':')
        .ok_or_else(|| invalid("expected <key>:<secret>@<cloud>"))?;

    let cloud_name = cloud_name.trim_end_matches('/');
    if cloud_name.is_empty() || api_key.is_empty() || api_secret.is_empty() {
        return Err(invalid("cloud name, key and secret must not be empty"));
    }

    Ok((
        cloud_name.to_string(),
        api_key.to_string(),
        api_secret.to_string(),
    ))
}
