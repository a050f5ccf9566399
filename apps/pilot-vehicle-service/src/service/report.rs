//! Fleet report.
//!
//! The report service also retires old vehicles after reporting them, which
//! goes through the command side. A query service may not depend on commands,
//! so wiring it (feature `vehicle_report_audit`) fails the conformance check at
//! startup.

use std::collections::BTreeMap;
use std::sync::Arc;

use layerkit::Component;
use serde::Serialize;

use super::{VehicleCommandService, VehicleQueryService};
use crate::domain::{Vehicle, VehicleError};

/// Feature switch that wires [`VehicleReportService`].
pub const AUDIT_FEATURE: &str = "vehicle_report_audit";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleReport {
    pub total: usize,
    pub by_make: BTreeMap<String, usize>,
}

#[derive(Component)]
#[component(query_service)]
pub struct VehicleReportService {
    #[inject]
    queries: Arc<dyn VehicleQueryService>,
    #[inject]
    commands: Arc<dyn VehicleCommandService>,
}

impl VehicleReportService {
    #[must_use]
    pub fn new(
        queries: Arc<dyn VehicleQueryService>,
        commands: Arc<dyn VehicleCommandService>,
    ) -> Self {
        Self { queries, commands }
    }

    #[must_use]
    pub fn report(&self) -> VehicleReport {
        let vehicles = self.queries.list_vehicles();
        let mut by_make = BTreeMap::new();
        for vehicle in &vehicles {
            *by_make.entry(vehicle.make.clone()).or_insert(0) += 1;
        }
        VehicleReport {
            total: vehicles.len(),
            by_make,
        }
    }

    /// Removes and returns every vehicle with a model year before `year`.
    ///
    /// # Errors
    /// Fails if a vehicle disappears while it is being retired.
    pub fn retire_before(&self, year: u16) -> Result<Vec<Vehicle>, VehicleError> {
        let retired: Vec<Vehicle> = self
            .queries
            .list_vehicles()
            .into_iter()
            .filter(|vehicle| vehicle.year < year)
            .collect();
        for id in retired.iter().filter_map(|vehicle| vehicle.id) {
            self.commands.delete_vehicle(id)?;
        }
        tracing::info!(count = retired.len(), before = year, "vehicles retired");
        Ok(retired)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::TransunionConfig;
    use crate::framework::SystemClock;
    use crate::repo::{InMemoryVehicleRepository, VehicleRepository};
    use crate::service::{DefaultVehicleCommandService, DefaultVehicleQueryService};
    use layerkit::Proxy;

    fn report_service() -> VehicleReportService {
        let repository: Arc<dyn VehicleRepository> = Arc::new(InMemoryVehicleRepository::new());
        let repository = Arc::new(Proxy::new("transactional", repository));
        let commands = Arc::new(DefaultVehicleCommandService::new(
            Arc::clone(&repository),
            Arc::new(TransunionConfig::default()),
            Arc::new(SystemClock),
        ));
        commands
            .save_vehicles(vec![
                Vehicle::new("Toyota", "Corolla", 2008),
                Vehicle::new("Toyota", "Yaris", 2021),
                Vehicle::new("Ford", "Focus", 2012),
            ])
            .unwrap();
        VehicleReportService::new(Arc::new(DefaultVehicleQueryService::new(repository)), commands)
    }

    #[test]
    fn report_counts_vehicles_by_make() {
        let report = report_service().report();
        assert_eq!(report.total, 3);
        assert_eq!(report.by_make.get("Toyota"), Some(&2));
        assert_eq!(report.by_make.get("Ford"), Some(&1));
    }

    #[test]
    fn retire_before_removes_old_vehicles() {
        let service = report_service();
        let retired = service.retire_before(2015).unwrap();
        assert_eq!(retired.len(), 2);
        assert_eq!(service.report().total, 1);
    }
}
