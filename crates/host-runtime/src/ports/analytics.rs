//! Analytics ports (Qlik Sense)

pub trait QlikSenseAppData: Send + Sync {
    fn server_url(&self) -> Option<&str>;
    fn app_id(&self) -> Option<&str>;
}

pub trait QlikSenseSheetData: Send + Sync {
    fn sheet_ids(&self) -> &[String];
}

/// Facade over app and sheet data.
pub trait QlikSenseServices: Send + Sync {
    /// True when both a server and an app are configured.
    fn is_configured(&self) -> bool;

    /// `<server>/sense/app/<app>/sheet/<sheet>/state/analysis`, if configured
    /// and the sheet is known.
    fn sheet_url(&self, sheet_id: &str) -> Option<String>;
}
