//! Business logic services

pub mod catalog;
pub mod circulation;
pub mod engagement;
pub mod identity;
pub mod notifications;

use crate::{config::CirculationConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub circulation: circulation::CirculationService,
    pub engagement: engagement::EngagementService,
    pub notifications: notifications::NotificationService,
    pub identity: identity::IdentityService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, circulation_config: CirculationConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            circulation: circulation::CirculationService::new(
                repository.clone(),
                circulation_config,
            ),
            engagement: engagement::EngagementService::new(repository.clone()),
            notifications: notifications::NotificationService::new(repository.clone()),
            identity: identity::IdentityService::new(repository),
        }
    }
}
