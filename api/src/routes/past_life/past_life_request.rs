use serde::{Deserialize, Serialize};

/// Query for `GET /api/past-life`.
#[derive(Debug, Deserialize)]
pub struct PastLifeQuery {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PastLifeResponse {
    pub name: String,
    pub title: String,
    pub year: i32,
    pub year_label: String,
}
