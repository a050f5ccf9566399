//! Entry points of the vehicle API. Each controller delegates to exactly one
//! service.

use std::sync::Arc;

use layerkit::Component;

use crate::domain::{Vehicle, VehicleError};
use crate::service::{VehicleCommandService, VehicleQueryService};

#[derive(Component)]
#[component(controller)]
pub struct VehicleCommandController {
    #[inject]
    commands: Arc<dyn VehicleCommandService>,
}

impl VehicleCommandController {
    #[must_use]
    pub fn new(commands: Arc<dyn VehicleCommandService>) -> Self {
        Self { commands }
    }

    /// # Errors
    /// Propagates the command service's rejection.
    pub fn register(&self, vehicle: Vehicle) -> Result<Vehicle, VehicleError> {
        self.commands.save_vehicle(vehicle)
    }

    /// # Errors
    /// Propagates the command service's rejection.
    pub fn register_all(&self, vehicles: Vec<Vehicle>) -> Result<Vec<Vehicle>, VehicleError> {
        self.commands.save_vehicles(vehicles)
    }

    /// # Errors
    /// [`VehicleError::NotFound`] if no vehicle has this id.
    pub fn remove(&self, id: u64) -> Result<(), VehicleError> {
        self.commands.delete_vehicle(id)
    }
}

#[derive(Component)]
#[component(controller)]
pub struct VehicleQueryController {
    #[inject]
    queries: Arc<dyn VehicleQueryService>,
}

impl VehicleQueryController {
    #[must_use]
    pub fn new(queries: Arc<dyn VehicleQueryService>) -> Self {
        Self { queries }
    }

    /// # Errors
    /// [`VehicleError::NotFound`] if no vehicle has this id.
    pub fn get(&self, id: u64) -> Result<Vehicle, VehicleError> {
        self.queries.find_vehicle(id)
    }

    #[must_use]
    pub fn list(&self) -> Vec<Vehicle> {
        self.queries.list_vehicles()
    }
}
