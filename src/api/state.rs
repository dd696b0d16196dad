use std::sync::Arc;

use crate::loader::ViewLoader;

#[derive(Clone)]
pub struct AppState {
    pub loader: Arc<ViewLoader>,
}

impl AppState {
    pub fn new(loader: ViewLoader) -> Self {
        Self {
            loader: Arc::new(loader),
        }
    }
}
