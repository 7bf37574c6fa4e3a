// src/application/queries/sessions/service.rs
use std::sync::Arc;

use crate::application::ports::time::Clock;
use crate::domain::session::repository::SessionRepository;

pub struct SessionQueryService {
    pub(super) repo: Arc<dyn SessionRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl SessionQueryService {
    pub fn new(repo: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}
