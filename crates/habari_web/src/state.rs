use std::sync::Arc;

use habari_feeds::AggregationService;

pub struct AppState {
    pub service: Arc<AggregationService>,
}
