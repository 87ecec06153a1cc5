//! Qlik Sense singletons

use crate::adapters::{QlikSenseAppDataAdapter, QlikSenseServicesAdapter, QlikSenseSheetDataAdapter};
use crate::capabilities::{QLIK_SENSE_APP_DATA, QLIK_SENSE_SERVICES, QLIK_SENSE_SHEET_DATA, SAVING_IDEA_SETTINGS};
use crate::ports::{QlikSenseAppData, QlikSenseServices, QlikSenseSheetData};
use service_graph::{CompositionGraph, GraphError};
use std::sync::Arc;

pub(super) fn register(graph: &mut CompositionGraph) -> Result<(), GraphError> {
    graph.add_singleton(QLIK_SENSE_APP_DATA, &[SAVING_IDEA_SETTINGS.id()], |resolver| {
        let settings = resolver.get(SAVING_IDEA_SETTINGS)?;
        let app: Arc<dyn QlikSenseAppData> = Arc::new(QlikSenseAppDataAdapter::new(&settings.qlik_sense));
        Ok(app)
    })?;

    graph.add_singleton(QLIK_SENSE_SHEET_DATA, &[SAVING_IDEA_SETTINGS.id()], |resolver| {
        let settings = resolver.get(SAVING_IDEA_SETTINGS)?;
        let sheets: Arc<dyn QlikSenseSheetData> = Arc::new(QlikSenseSheetDataAdapter::new(&settings.qlik_sense));
        Ok(sheets)
    })?;

    graph.add_singleton(
        QLIK_SENSE_SERVICES,
        &[QLIK_SENSE_APP_DATA.id(), QLIK_SENSE_SHEET_DATA.id()],
        |resolver| {
            let services: Arc<dyn QlikSenseServices> = Arc::new(QlikSenseServicesAdapter::new(
                resolver.get(QLIK_SENSE_APP_DATA)?,
                resolver.get(QLIK_SENSE_SHEET_DATA)?,
            ));
            Ok(services)
        },
    )
}
