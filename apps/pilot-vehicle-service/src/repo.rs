//! Vehicle persistence.

use std::collections::BTreeMap;

use layerkit::Component;
use parking_lot::Mutex;

use crate::domain::{Vehicle, VehicleError};

pub trait VehicleRepository: Component {
    /// Stores `vehicle`, assigning an id if it has none.
    fn save(&self, vehicle: Vehicle) -> Vehicle;

    fn save_all(&self, vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
        vehicles.into_iter().map(|v| self.save(v)).collect()
    }

    /// # Errors
    /// [`VehicleError::NotFound`] if no vehicle has this id.
    fn delete_by_id(&self, id: u64) -> Result<(), VehicleError>;

    fn find_by_id(&self, id: u64) -> Option<Vehicle>;

    /// All vehicles, ordered by id.
    fn find_all(&self) -> Vec<Vehicle>;
}

#[derive(Default)]
struct Store {
    next_id: u64,
    vehicles: BTreeMap<u64, Vehicle>,
}

#[derive(Component, Default)]
#[component(repository)]
pub struct InMemoryVehicleRepository {
    store: Mutex<Store>,
}

impl InMemoryVehicleRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl VehicleRepository for InMemoryVehicleRepository {
    fn save(&self, mut vehicle: Vehicle) -> Vehicle {
        let mut store = self.store.lock();
        let id = match vehicle.id {
            Some(id) => {
                store.next_id = store.next_id.max(id);
                id
            }
            None => {
                store.next_id += 1;
                store.next_id
            }
        };
        vehicle.id = Some(id);
        store.vehicles.insert(id, vehicle.clone());
        vehicle
    }

    fn delete_by_id(&self, id: u64) -> Result<(), VehicleError> {
        self.store
            .lock()
            .vehicles
            .remove(&id)
            .map(|_| ())
            .ok_or(VehicleError::NotFound { id })
    }

    fn find_by_id(&self, id: u64) -> Option<Vehicle> {
        self.store.lock().vehicles.get(&id).cloned()
    }

    fn find_all(&self) -> Vec<Vehicle> {
        self.store.lock().vehicles.values().cloned().collect()
    }
}
