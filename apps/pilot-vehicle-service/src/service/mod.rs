//! Vehicle services, split by responsibility: commands mutate, queries read.

pub mod command;
pub mod query;
pub mod report;

use layerkit::Component;

use crate::domain::{Vehicle, VehicleError};

pub use command::DefaultVehicleCommandService;
pub use query::DefaultVehicleQueryService;
pub use report::{VehicleReport, VehicleReportService};

pub trait VehicleCommandService: Component {
    /// # Errors
    /// [`VehicleError::Rejected`] if the vehicle fails registration checks.
    fn save_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, VehicleError>;

    /// Saves all vehicles or none of them.
    ///
    /// # Errors
    /// [`VehicleError::Rejected`] for the first vehicle failing registration checks.
    fn save_vehicles(&self, vehicles: Vec<Vehicle>) -> Result<Vec<Vehicle>, VehicleError>;

    /// # Errors
    /// [`VehicleError::NotFound`] if no vehicle has this id.
    fn delete_vehicle(&self, id: u64) -> Result<(), VehicleError>;
}

pub trait VehicleQueryService: Component {
    /// # Errors
    /// [`VehicleError::NotFound`] if no vehicle has this id.
    fn find_vehicle(&self, id: u64) -> Result<Vehicle, VehicleError>;

    fn list_vehicles(&self) -> Vec<Vehicle>;
}
