//! Unvalidated form input, as typed by the user.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::Pair;

/// Raw fields of one position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionInput {
    #[serde(default)]
    pub direction: Option<String>,

    #[serde(default, deserialize_with = "text_or_number")]
    pub lot: Option<String>,

    #[serde(default, deserialize_with = "text_or_number")]
    pub open: Option<String>,
}

impl PositionInput {
    pub fn new(
        direction: impl Into<String>,
        lot: impl Into<String>,
        open: impl Into<String>,
    ) -> Self {
        Self {
            direction: Some(direction.into()),
            lot: Some(lot.into()),
            open: Some(open.into()),
        }
    }
}

impl FromStr for PositionInput {
    type Err = std::convert::Infallible;

    /// Compact `direction:lot:open` form, e.g. `buy:1.5:90400`.
    ///
    /// Missing parts are left empty so validation reports them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':').map(|p| p.trim().to_string());
        let mut next = || parts.next().filter(|p| !p.is_empty());
        Ok(Self {
            direction: next(),
            lot: next(),
            open: next(),
        })
    }
}

/// Raw fields of the whole calculator form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInput {
    #[serde(default)]
    pub pair: Option<String>,

    #[serde(default, deserialize_with = "text_or_number")]
    pub close: Option<String>,

    #[serde(default)]
    pub positions: Vec<PositionInput>,
}

impl RequestInput {
    /// Fill in `pair` when it was left out or blank.
    pub fn with_default_pair(mut self, pair: Pair) -> Self {
        if self.pair.as_deref().map_or(true, |p| p.trim().is_empty()) {
            self.pair = Some(pair.as_str().to_string());
        }
        self
    }
}

/// JSON numbers are taken as their textual form so that coercion stays in
/// one place.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }),
    )
}
