//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::{CommentService, CommentSettings, StructureService};
use crate::domain::repositories::HealthRepository;
use crate::infrastructure::Repositories;

/// Application state cloned into each request.
///
/// All members are reference counted; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub comment_service: Arc<CommentService>,
    pub structure_service: Arc<StructureService>,
    pub health: Arc<dyn HealthRepository>,
    /// Add permissive CORS headers when the request `Host` is a localhost name.
    pub cors_localhost: bool,
}

impl AppState {
    /// Wires the services over one set of repositories.
    pub fn new(repos: Repositories, settings: CommentSettings, cors_localhost: bool) -> Self {
        let structure_service = Arc::new(StructureService::new(repos.pages, repos.domains));
        let comment_service = Arc::new(CommentService::new(
            repos.comments,
            repos.logs,
            repos.recent,
            structure_service.clone(),
            settings,
        ));

        Self {
            comment_service,
            structure_service,
            health: repos.health,
            cors_localhost,
        }
    }
}
