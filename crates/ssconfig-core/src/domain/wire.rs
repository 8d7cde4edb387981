//! Serde helpers shared by the persisted document types.

use serde::{Deserialize, Deserializer};

/// Deserializes an explicit `null` the same way as an absent field.
///
/// Older writers emitted `null` for unset strings and sub-documents.  Combine
/// with `#[serde(default)]` so both cases land on `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
