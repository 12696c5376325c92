use serde::{Deserialize, Serialize};

// Card query string, every field optional
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct CardQuery {
    pub format: Option<String>,
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub link: Option<String>,
    pub redirect: Option<String>,
    pub avatar: Option<String>,
    pub bgcolor: Option<String>,
    pub textcolor: Option<String>,
    pub linkcolor: Option<String>,
    pub font: Option<String>,
}

// Health endpoint response
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub tracked_clients: usize,
}
