use serde::Deserialize;

/// Request payload for `POST /api/reveal`. The response is a
/// [`storyteller::Revelation`].
#[derive(Debug, Deserialize)]
pub struct RevealRequest {
    #[serde(default)]
    pub name: Option<String>,
}
