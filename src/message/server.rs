//! Node information

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub node: Option<String>,
    pub server_version: Option<String>,
}
