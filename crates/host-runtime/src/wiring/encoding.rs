//! Extended text encodings, registered for every environment

use crate::capabilities::TEXT_ENCODINGS;
use crate::encoding::TextEncodingSupport;
use host_config::FeatureSwitches;
use service_graph::{CompositionGraph, GraphError};
use std::sync::Arc;

pub(super) fn register(graph: &mut CompositionGraph, switches: FeatureSwitches) -> Result<(), GraphError> {
    graph.add_singleton(TEXT_ENCODINGS, &[], move |_| Ok(Arc::new(TextEncodingSupport::new(switches))))
}
