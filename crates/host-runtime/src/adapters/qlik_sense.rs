//! Qlik Sense adapters backed by the bound settings

use crate::ports::{QlikSenseAppData, QlikSenseServices, QlikSenseSheetData};
use crate::settings::QlikSenseSettings;
use std::sync::Arc;

pub struct QlikSenseAppDataAdapter {
    server_url: Option<String>,
    app_id: Option<String>,
}

impl QlikSenseAppDataAdapter {
    pub fn new(settings: &QlikSenseSettings) -> Self {
        Self {
            server_url: settings
                .server_url
                .as_ref()
                .map(|url| url.trim_end_matches('/').to_string()),
            app_id: settings.app_id.clone(),
        }
    }
}

impl QlikSenseAppData for QlikSenseAppDataAdapter {
    fn server_url(&self) -> Option<&str> {
        self.server_url.as_deref()
    }

    fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }
}

pub struct QlikSenseSheetDataAdapter {
    sheet_ids: Vec<String>,
}

impl QlikSenseSheetDataAdapter {
    pub fn new(settings: &QlikSenseSettings) -> Self {
        Self {
            sheet_ids: settings.sheet_ids.clone(),
        }
    }
}

impl QlikSenseSheetData for QlikSenseSheetDataAdapter {
    fn sheet_ids(&self) -> &[String] {
        &self.sheet_ids
    }
}

pub struct QlikSenseServicesAdapter {
    app: Arc<dyn QlikSenseAppData>,
    sheets: Arc<dyn QlikSenseSheetData>,
}

impl QlikSenseServicesAdapter {
    pub fn new(app: Arc<dyn QlikSenseAppData>, sheets: Arc<dyn QlikSenseSheetData>) -> Self {
        Self { app, sheets }
    }
}

impl QlikSenseServices for QlikSenseServicesAdapter {
    fn is_configured(&self) -> bool {
        self.app.server_url().is_some() && self.app.app_id().is_some()
    }

    fn sheet_url(&self, sheet_id: &str) -> Option<String> {
        let server = self.app.server_url()?;
        let app = self.app.app_id()?;
        if !self.sheets.sheet_ids().iter().any(|id| id == sheet_id) {
            return None;
        }
        Some(format!("{server}/sense/app/{app}/sheet/{sheet_id}/state/analysis"))
    }
}
