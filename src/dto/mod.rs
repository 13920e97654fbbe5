pub mod catalog;
pub mod contacts;
pub mod orders;
pub mod product_infos;
pub mod users;

use serde::{Deserialize, Deserializer};

/// For `Option<Option<T>>` patch fields: an absent key stays `None` (via
/// `#[serde(default)]`), an explicit `null` becomes `Some(None)`.
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
