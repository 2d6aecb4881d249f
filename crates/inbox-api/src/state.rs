use std::sync::Arc;

use inbox_db::Database;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    /// `None` when the store could not be opened at startup.
    pub db: Option<Database>,
}

impl AppStateInner {
    pub fn new(db: Option<Database>) -> AppState {
        Arc::new(Self { db })
    }
}
