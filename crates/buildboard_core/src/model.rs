use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Ordered snapshot of builds, in server order.
pub type BuildList = Vec<Build>;

/// Opaque build identifier. The backend sends it as a number, but a string
/// form is accepted as well since it is only ever used to build a link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "WireBuildId")]
pub struct BuildId(String);

impl BuildId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BuildId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for BuildId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireBuildId {
    Number(i64),
    Text(String),
}

impl From<WireBuildId> for BuildId {
    fn from(value: WireBuildId) -> Self {
        match value {
            WireBuildId::Number(n) => BuildId::from(n),
            WireBuildId::Text(s) => BuildId(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub id: BuildId,
    /// Run state, e.g. `running` or `finished`.
    #[serde(default)]
    pub state: String,
    /// Result, e.g. `SUCCESS` or `FAILURE`.
    #[serde(default)]
    pub status: String,
    /// Progress text shown while the build is running.
    #[serde(default)]
    pub status_text: String,
    pub changes: Changes,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Changes {
    #[serde(default)]
    pub change: Vec<Change>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed frame: {0}")]
    Malformed(String),
    #[error("frame has no `build` list")]
    MissingBuilds,
}

#[derive(Deserialize)]
struct Frame {
    build: Option<BuildList>,
}

/// Decode one inbound push-feed frame into a complete build snapshot.
pub fn decode_frame(text: &str) -> Result<BuildList, DecodeError> {
    let frame: Frame =
        serde_json::from_str(text).map_err(|err| DecodeError::Malformed(err.to_string()))?;
    frame.build.ok_or(DecodeError::MissingBuilds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_decode_to_same_text() {
        let builds = decode_frame(
            r#"{"build":[
                {"id":42,"changes":{}},
                {"id":"bt-7","changes":{"change":[]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(builds[0].id.as_str(), "42");
        assert_eq!(builds[1].id, BuildId::from("bt-7"));
        assert!(builds[0].changes.change.is_empty());
    }

    #[test]
    fn extra_teamcity_fields_are_ignored() {
        let builds = decode_frame(
            r#"{"build":[{"id":3,"number":"117","finishDate":"20240101T120000+0000","changes":{}}]}"#,
        )
        .unwrap();
        assert_eq!(builds.len(), 1);
        assert_eq!(builds[0].id.as_str(), "3");
    }

    #[test]
    fn null_build_field_is_missing() {
        assert_eq!(
            decode_frame(r#"{"build":null}"#),
            Err(DecodeError::MissingBuilds)
        );
    }

    #[test]
    fn non_object_frame_is_malformed() {
        assert!(matches!(
            decode_frame("[1,2,3]"),
            Err(DecodeError::Malformed(_))
        ));
    }
}
