use crate::domain::model::Participant;
use crate::utils::error::Result;
use crate::utils::validation::{validate_email, validate_participants, Validate};
use serde::Deserialize;
use std::path::Path;

/// One draw request: the participant list plus optional template and
/// organizer. Field names follow the camelCase wire form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawPlan {
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub email_template: Option<String>,
    #[serde(default)]
    pub organizer_email: Option<String>,
}

impl DrawPlan {
    /// 從 TOML 檔案載入抽籤計劃
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

impl Validate for DrawPlan {
    fn validate(&self) -> Result<()> {
        validate_participants(&self.participants)?;
        if let Some(organizer) = &self.organizer_email {
            validate_email("organizerEmail", organizer)?;
        }
        Ok(())
    }
}
