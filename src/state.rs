use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{clock::Clock, notifier::Notifier};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Clock,
}
