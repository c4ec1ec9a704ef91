use sha2::{Digest, Sha256};

/// Fields that are sent with a request but never signed.
const UNSIGNED_FIELDS: &[&str] = &["file", "api_key", "signature", "resource_type", "cloud_name"];

/// SHA-256 request signature: sorted `key=value` pairs joined by `&`, followed by the secret.
pub(super) fn sign_params(params: &[(String, String)], api_secret: &str) -> String {
    let mut signed: Vec<&(String, String)> = params
        .iter()
        .filter(|(k, _)| !UNSIGNED_FIELDS.contains(&k.as_str()))
        .collect();
    signed.sort_by(|a, b| a.0.cmp(&b.0));

    let joined = signed
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    format!("{:x}", hasher.finalize())
}
