use crate::config::QueryPolicies;
use crate::queries::render::CellRenderer;
use core_executor::QueryExecutor;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<QueryExecutor>,
    pub renderer: Arc<CellRenderer>,
    pub policies: Arc<QueryPolicies>,
}

impl AppState {
    #[must_use]
    pub fn new(executor: Arc<QueryExecutor>, policies: Arc<QueryPolicies>) -> Self {
        Self {
            executor,
            renderer: Arc::new(CellRenderer::default()),
            policies,
        }
    }
}
