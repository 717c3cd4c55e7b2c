pub mod analysis;
pub mod error;
pub mod health;
pub mod openapi;

use actix_web::web;

use crate::app::AppState;
use crate::service::{TestResultAnalyzer, TestRunner, TestStore};

/// Handler data shared by every worker
#[derive(Clone)]
pub struct ApiData {
    analyzer: web::Data<TestResultAnalyzer>,
    store: web::Data<TestStore>,
    runner: web::Data<TestRunner>,
}

impl ApiData {
    pub fn new(state: &AppState) -> Self {
        Self {
            analyzer: web::Data::from(state.analyzer.clone()),
            store: web::Data::from(state.store.clone()),
            runner: web::Data::from(state.runner.clone()),
        }
    }

    /// Register handler data and all routes
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.analyzer.clone())
            .app_data(self.store.clone())
            .app_data(self.runner.clone())
            .configure(analysis::configure)
            .configure(tests::configure)
            .configure(health::configure)
            .configure(openapi::configure);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;
    use std::sync::Arc;

    use crate::app::AppState;
    use crate::model::Config;
    use crate::service::analysis::ScoringRules;
    use crate::service::{TestStore, TextGenerator};

    pub async fn test_state(dir: &Path, generator: Option<Arc<dyn TextGenerator>>) -> AppState {
        let store = Arc::new(TestStore::open(dir).await.unwrap());
        AppState::build(
            ScoringRules::builtin().unwrap(),
            generator,
            store,
            &Config::default(),
        )
    }
}
