//! The microservice entry point.

use anyhow::Context;
use layerkit::{Component, ComponentHub};
use serde::Serialize;

use crate::controller::{VehicleCommandController, VehicleQueryController};
use crate::domain::Vehicle;

/// Outcome of a scripted round, printed by `pilot-vehicle-service run`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub registered: Vec<Vehicle>,
    pub removed: Vec<u64>,
    pub lookup: Option<Vehicle>,
    pub remaining: Vec<Vehicle>,
}

#[derive(Component)]
#[component(microservice, operations(run))]
pub struct PilotApplication;

impl PilotApplication {
    /// Drives one command/query round through the published controllers.
    ///
    /// # Errors
    /// Fails if a controller is missing from the hub or a command is rejected.
    pub fn run(&self, hub: &ComponentHub) -> anyhow::Result<RunReport> {
        let commands = hub
            .get::<VehicleCommandController>()
            .context("command controller is not published")?;
        let queries = hub
            .get::<VehicleQueryController>()
            .context("query controller is not published")?;

        let mut registered = commands.register_all(vec![
            Vehicle::new("Toyota", "Corolla", 2019),
            Vehicle::new("Ford", "Mustang", 2021),
            Vehicle::new("Tesla", "Model 3", 2023),
        ])?;
        registered.push(commands.register(Vehicle::new("Volvo", "XC90", 2020))?);

        let mut removed = Vec::new();
        if let Some(id) = registered.get(1).and_then(|vehicle| vehicle.id) {
            commands.remove(id)?;
            removed.push(id);
        }

        let lookup = registered
            .first()
            .and_then(|vehicle| vehicle.id)
            .map(|id| queries.get(id))
            .transpose()?;

        let remaining = queries.list();
        tracing::info!(
            registered = registered.len(),
            removed = removed.len(),
            remaining = remaining.len(),
            "scripted round complete"
        );

        Ok(RunReport {
            registered,
            removed,
            lookup,
            remaining,
        })
    }
}
