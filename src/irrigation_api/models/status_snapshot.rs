use serde::{Deserialize, Serialize};

/// Controller watering state at the moment `/status` was served.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    #[serde(rename = "regar", default)]
    pub watering: bool,
    /// Minutes.
    #[serde(rename = "duracao", default)]
    pub duration: f64,
    #[serde(default)]
    pub timestamp: Option<String>,
}
