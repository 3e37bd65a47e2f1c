pub mod price;
pub mod suggestion;
pub mod vehicle;

pub use price::*;
pub use suggestion::*;
pub use vehicle::*;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Wire helpers — the catalog emits years as JSON numbers on some endpoints
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum Label {
    Text(String),
    Number(serde_json::Number),
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        match label {
            Label::Text(s) => s,
            Label::Number(n) => n.to_string(),
        }
    }
}

/// Deserialize a JSON string or number into its string form.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Label::deserialize(deserializer).map(String::from)
}

/// Deserialize an option list whose items may be strings or numbers.
pub(crate) fn option_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Label>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(String::from).collect())
}

/// An option-list response body.
#[derive(Deserialize)]
pub(crate) struct OptionLabels(#[serde(deserialize_with = "option_labels")] pub Vec<String>);
