// models/callback.rs
pub const RESPONSE_CODE_KEY: &str = "vnp_ResponseCode";
pub const AMOUNT_KEY: &str = "vnp_Amount";
pub const ORDER_INFO_KEY: &str = "vnp_OrderInfo";
pub const PAY_DATE_KEY: &str = "vnp_PayDate";
pub const TRANSACTION_NO_KEY: &str = "vnp_TransactionNo";
pub const TXN_REF_KEY: &str = "vnp_TxnRef";
pub const BANK_CODE_KEY: &str = "vnp_BankCode";
pub const CARD_TYPE_KEY: &str = "vnp_CardType";
pub const SECURE_HASH_KEY: &str = "vnp_SecureHash";
pub const SECURE_HASH_TYPE_KEY: &str = "vnp_SecureHashType";

/// Query parameters the gateway appended to the return URL.
///
/// Entries keep the order in which keys were first seen. A repeated key keeps
/// its first position and takes the last value, the same way a browser folds
/// `URLSearchParams` into a plain object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCallbackParams {
    entries: Vec<(String, String)>,
}

impl RawCallbackParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        url::form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Present, non-empty value.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    pub fn response_code(&self) -> Option<&str> {
        self.get(RESPONSE_CODE_KEY)
    }

    /// A recognized response-code key selects the callback path, even when empty.
    pub fn has_callback(&self) -> bool {
        self.response_code().is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawCallbackParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RawCallbackParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
