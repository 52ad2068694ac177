use std::sync::Arc;

use crate::auth::AuthConfig;
use crate::services::todos::TodoService;
use crate::store::TodoStore;

/// Shared handler state: the store and the token verification settings.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    pub auth_config: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>, auth_config: AuthConfig) -> Self {
        Self {
            store,
            auth_config: Arc::new(auth_config),
        }
    }

    pub fn todos(&self) -> TodoService<'_> {
        TodoService::new(self.store.as_ref())
    }
}
