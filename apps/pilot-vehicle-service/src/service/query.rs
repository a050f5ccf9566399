use std::sync::Arc;

use layerkit::{Component, Proxy};

use super::VehicleQueryService;
use crate::domain::{Vehicle, VehicleError};
use crate::repo::VehicleRepository;

#[derive(Component)]
#[component(query_service)]
pub struct DefaultVehicleQueryService {
    #[inject]
    repository: Arc<Proxy<dyn VehicleRepository>>,
}

impl DefaultVehicleQueryService {
    #[must_use]
    pub fn new(repository: Arc<Proxy<dyn VehicleRepository>>) -> Self {
        Self { repository }
    }
}

impl VehicleQueryService for DefaultVehicleQueryService {
    fn find_vehicle(&self, id: u64) -> Result<Vehicle, VehicleError> {
        self.repository
            .find_by_id(id)
            .ok_or(VehicleError::NotFound { id })
    }

    fn list_vehicles(&self) -> Vec<Vehicle> {
        self.repository.find_all()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::repo::InMemoryVehicleRepository;

    #[test]
    fn finds_saved_vehicles() {
        let repository: Arc<dyn VehicleRepository> = Arc::new(InMemoryVehicleRepository::new());
        let saved = repository.save(Vehicle::new("Mazda", "CX-5", 2023));
        let queries = DefaultVehicleQueryService::new(Arc::new(Proxy::new("transactional", repository)));

        assert_eq!(queries.find_vehicle(1), Ok(saved));
        assert_eq!(queries.list_vehicles().len(), 1);
        assert_eq!(queries.find_vehicle(2), Err(VehicleError::NotFound { id: 2 }));
    }
}
