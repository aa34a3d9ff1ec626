//! Serde helpers shared by the result types.
//!
//! The service sometimes sends `null` where a value is simply absent. Fields
//! with a default accept both spellings.

use serde::{Deserialize, Deserializer};

/// Deserializes `null` as `T::default()`. Pair with `#[serde(default)]` so a
/// missing key behaves the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn default_cookie_path() -> Option<String> {
    Some("/".to_string())
}

/// Cookie paths default to `/` whether the key is missing or `null`.
pub(crate) fn cookie_path<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.or_else(default_cookie_path))
}

pub(crate) fn default_wait_strategy() -> String {
    "load".to_string()
}

pub(crate) fn wait_strategy<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_wait_strategy))
}
