use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub fn generate_signing_key() -> [u8; 32] {
    rand::thread_rng().gen()
}

pub fn sign(key: &[u8], data: &[u8]) -> Vec<u8> {
    // hmac accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(key).unwrap();
    mac.update(data);

    let result = mac.finalize().into_bytes();
    result.to_vec()
}

pub fn verify_signature(key: &[u8], data: &[u8], signature: &[u8]) -> bool {
    let mut mac = HmacSha256::new_from_slice(key).unwrap();
    mac.update(data);

    mac.verify_slice(signature).is_ok()
}

/// Signs `value` and returns `value.signature`, suitable for a cookie.
pub fn sign_cookie_value(key: &[u8], value: &str) -> String {
    let signature = base64_url::encode(&sign(key, value.as_bytes()));
    format!("{}.{}", value, signature)
}

/// Inverse of [`sign_cookie_value`]. Returns the original value only if the
/// signature checks out.
pub fn verify_cookie_value<'a>(key: &[u8], signed: &'a str) -> Option<&'a str> {
    let (value, signature) = signed.rsplit_once('.')?;
    let signature = base64_url::decode(signature).ok()?;

    if verify_signature(key, value.as_bytes(), &signature) {
        Some(value)
    } else {
        None
    }
}
