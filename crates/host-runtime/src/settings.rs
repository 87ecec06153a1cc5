//! Typed application settings
//!
//! Bound once from the `SavingIdeaSettings` section of the resolved
//! configuration and registered as a singleton instance.

use host_config::{ConfigError, FromConfiguration, ResolvedConfiguration};

/// Root section of the application settings.
pub const SETTINGS_SECTION: &str = "SavingIdeaSettings";

/// Connection string for the persistence layer.
pub const CONNECTION_STRING_KEY: &str = "SavingIdeaSettings:ConnectionStrings:SavingIdeaDataContext";

const QLIK_SENSE_SERVER_URL: &str = "SavingIdeaSettings:QlikSense:ServerUrl";
const QLIK_SENSE_APP_ID: &str = "SavingIdeaSettings:QlikSense:AppId";
const QLIK_SENSE_SHEET_IDS: &str = "SavingIdeaSettings:QlikSense:SheetIds";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStrings {
    pub saving_idea_data_context: String,
}

/// Analytics endpoint settings. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QlikSenseSettings {
    pub server_url: Option<String>,
    pub app_id: Option<String>,
    pub sheet_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavingIdeaSettings {
    pub connection_strings: ConnectionStrings,
    pub qlik_sense: QlikSenseSettings,
}

impl FromConfiguration for SavingIdeaSettings {
    fn from_configuration(configuration: &ResolvedConfiguration) -> Result<Self, ConfigError> {
        let connection_strings = ConnectionStrings {
            saving_idea_data_context: configuration.require_string(CONNECTION_STRING_KEY)?,
        };

        let qlik_sense = QlikSenseSettings {
            server_url: non_blank(configuration.get_string(QLIK_SENSE_SERVER_URL)),
            app_id: non_blank(configuration.get_string(QLIK_SENSE_APP_ID)),
            sheet_ids: configuration.get_strings(QLIK_SENSE_SHEET_IDS),
        };

        Ok(Self {
            connection_strings,
            qlik_sense,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
