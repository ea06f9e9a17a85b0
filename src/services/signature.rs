// services/signature.rs
use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::models::callback::{RawCallbackParams, SECURE_HASH_KEY, SECURE_HASH_TYPE_KEY};

type HmacSha512 = Hmac<Sha512>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureCheck {
    Valid,
    Missing,
    Invalid,
}

impl SignatureCheck {
    pub fn is_valid(self) -> bool {
        self == SignatureCheck::Valid
    }
}

/// The string the gateway signs: non-empty params except the hash itself,
/// sorted by key, values form-urlencoded, joined with `&`.
pub fn hash_data(params: &RawCallbackParams) -> String {
    let mut pairs: Vec<(&str, &str)> = params
        .iter()
        .filter(|(key, value)| {
            *key != SECURE_HASH_KEY && *key != SECURE_HASH_TYPE_KEY && !value.is_empty()
        })
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    pairs
        .into_iter()
        .map(|(key, value)| {
            let encoded: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
            format!("{}={}", key, encoded)
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Lowercase hex HMAC-SHA512 of [`hash_data`].
pub fn sign(secret: &str, params: &RawCallbackParams) -> String {
    let mut mac = new_mac(secret);
    mac.update(hash_data(params).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub fn verify(secret: &str, params: &RawCallbackParams) -> SignatureCheck {
    let provided = match params.value(SECURE_HASH_KEY) {
        Some(hash) => hash,
        None => return SignatureCheck::Missing,
    };
    let provided = match hex::decode(provided.trim()) {
        Ok(bytes) => bytes,
        Err(_) => return SignatureCheck::Invalid,
    };

    let mut mac = new_mac(secret);
    mac.update(hash_data(params).as_bytes());
    match mac.verify_slice(&provided) {
        Ok(()) => SignatureCheck::Valid,
        Err(_) => SignatureCheck::Invalid,
    }
}

fn new_mac(secret: &str) -> HmacSha512 {
    <HmacSha512 as Mac>::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_params(secret: &str) -> RawCallbackParams {
        let mut params = RawCallbackParams::parse(
            "vnp_TxnRef=1742964928849&vnp_Amount=10000000&vnp_OrderInfo=Thanh+toan+goi+VIP&vnp_ResponseCode=00&vnp_BankTranNo=",
        );
        let hash = sign(secret, &params);
        params.insert(SECURE_HASH_TYPE_KEY, "HmacSHA512");
        params.insert(SECURE_HASH_KEY, hash);
        params
    }

    #[test]
    fn hash_data_sorts_skips_empty_and_encodes() {
        let params = signed_params("secret");
        assert_eq!(
            hash_data(&params),
            "vnp_Amount=10000000&vnp_OrderInfo=Thanh+toan+goi+VIP&vnp_ResponseCode=00&vnp_TxnRef=1742964928849"
        );
    }

    #[test]
    fn valid_signature_verifies_in_any_case() {
        let mut params = signed_params("secret");
        assert_eq!(verify("secret", &params), SignatureCheck::Valid);

        let upper = params.get(SECURE_HASH_KEY).unwrap().to_uppercase();
        params.insert(SECURE_HASH_KEY, upper);
        assert_eq!(verify("secret", &params), SignatureCheck::Valid);
    }

    #[test]
    fn empty_and_oversized_secrets_still_sign() {
        let long = "k".repeat(512);
        for secret in ["", long.as_str()] {
            let mut params = RawCallbackParams::parse("vnp_ResponseCode=00&vnp_TxnRef=7");
            let hash = sign(secret, &params);
            params.insert(SECURE_HASH_KEY, hash);
            assert_eq!(verify(secret, &params), SignatureCheck::Valid);
        }
    }

    #[test]
    fn tampered_params_fail() {
        let mut params = signed_params("secret");
        params.insert("vnp_ResponseCode", "24");
        assert_eq!(verify("secret", &params), SignatureCheck::Invalid);
        assert_eq!(verify("other-secret", &signed_params("secret")), SignatureCheck::Invalid);
    }

    #[test]
    fn missing_or_garbage_hash() {
        let params = RawCallbackParams::parse("vnp_ResponseCode=00");
        assert_eq!(verify("secret", &params), SignatureCheck::Missing);

        let garbage = RawCallbackParams::parse("vnp_ResponseCode=00&vnp_SecureHash=zz");
        assert_eq!(verify("secret", &garbage), SignatureCheck::Invalid);
    }
}
