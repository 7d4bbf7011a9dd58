// CodeDeploy deployment notification payload

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodedeployEvent {
    pub region: String,
    pub account_id: String,
    #[serde(default)]
    pub event_trigger_name: String,
    pub application_name: String,
    pub deployment_id: String,
    pub deployment_group_name: String,
    #[serde(default)]
    pub create_time: String,
    #[serde(default)]
    pub complete_time: String,
    pub status: String,
}
