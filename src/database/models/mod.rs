pub mod alumni;
pub mod file;
pub mod job;
pub mod user;

pub use alumni::{Alumni, AlumniInput, AlumniPatch, ALUMNI_LISTING};
pub use file::{FileCategory, FileRecord};
pub use job::{DeletedState, Job, JobInput, JobPatch, YearCount, JOB_LISTING};
pub use user::User;

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Phone numbers arrive as JSON numbers from older clients and as strings from newer ones
pub(crate) fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// Patch fields that can be cleared: absent keeps the stored value (`None`),
/// `null` clears it (`Some(None)`). Pair with `#[serde(default)]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// [`nullable`] for phone numbers
pub(crate) fn nullable_string_or_number<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_string_or_number(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        note: Option<Option<String>>,
        #[serde(default, deserialize_with = "nullable_string_or_number")]
        phone: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.note, None);
        assert_eq!(absent.phone, None);

        let cleared: Patch = serde_json::from_value(json!({ "note": null, "phone": null })).unwrap();
        assert_eq!(cleared.note, Some(None));
        assert_eq!(cleared.phone, Some(None));

        let set: Patch = serde_json::from_value(json!({ "note": "x", "phone": 812 })).unwrap();
        assert_eq!(set.note, Some(Some("x".to_string())));
        assert_eq!(set.phone, Some(Some("812".to_string())));
    }
}
