use std::sync::Arc;

use layerkit::{Component, Proxy};

use super::VehicleCommandService;
use crate::config::TransunionConfig;
use crate::domain::{Vehicle, VehicleError};
use crate::framework::Clock;
use crate::repo::VehicleRepository;

#[derive(Component)]
#[component(command_service(config = "transunion"))]
pub struct DefaultVehicleCommandService {
    #[inject]
    repository: Arc<Proxy<dyn VehicleRepository>>,
    #[inject]
    transunion: Arc<TransunionConfig>,
    #[inject]
    clock: Arc<dyn Clock>,
}

impl DefaultVehicleCommandService {
    #[must_use]
    pub fn new(
        repository: Arc<Proxy<dyn VehicleRepository>>,
        transunion: Arc<TransunionConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            transunion,
            clock,
        }
    }

    fn validate(&self, vehicle: &Vehicle) -> Result<(), VehicleError> {
        if vehicle.make.trim().is_empty() || vehicle.model.trim().is_empty() {
            return Err(VehicleError::Rejected {
                reason: "make and model are required".to_owned(),
            });
        }
        if vehicle.year < self.transunion.min_year {
            return Err(VehicleError::Rejected {
                reason: format!(
                    "model year {} predates {} history coverage ({})",
                    vehicle.year, self.transunion.endpoint, self.transunion.min_year
                ),
            });
        }
        Ok(())
    }
}

impl VehicleCommandService for DefaultVehicleCommandService {
    fn save_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, VehicleError> {
        self.validate(&vehicle)?;
        let saved = self.repository.save(vehicle);
        tracing::info!(
            event = "notification",
            vehicle_id = saved.id,
            at = self.clock.now_unix(),
            "vehicle saved"
        );
        Ok(saved)
    }

    fn save_vehicles(&self, vehicles: Vec<Vehicle>) -> Result<Vec<Vehicle>, VehicleError> {
        for vehicle in &vehicles {
            self.validate(vehicle)?;
        }
        let saved = self.repository.save_all(vehicles);
        tracing::debug!(count = saved.len(), "vehicles saved");
        Ok(saved)
    }

    fn delete_vehicle(&self, id: u64) -> Result<(), VehicleError> {
        self.repository.delete_by_id(id)?;
        tracing::debug!(vehicle_id = id, "vehicle deleted");
        Ok(())
    }
}
