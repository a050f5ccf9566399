use std::sync::Arc;

use layerkit::{Component, Described, RoleKind};

pub trait VehicleRepository: Component {
    fn count(&self) -> usize;
}

#[derive(Component)]
#[component(repository)]
pub struct InMemoryVehicleRepository;

impl VehicleRepository for InMemoryVehicleRepository {
    fn count(&self) -> usize {
        0
    }
}

#[derive(Component)]
#[component(command_service(config = "transunion"), operations(save_vehicle))]
pub struct VehicleCommands {
    #[inject]
    repository: Arc<dyn VehicleRepository>,
}

#[derive(Component)]
#[component(query_service(stateful))]
pub struct VehicleQueries {
    last_query: String,
}

#[derive(Component)]
#[component(controller)]
pub struct VehicleController(#[inject] Arc<VehicleCommands>);

#[derive(Component)]
#[component(microservice, operations(run))]
pub struct Application;

fn main() {
    let commands = Arc::new(VehicleCommands {
        repository: Arc::new(InMemoryVehicleRepository),
    });
    assert_eq!(commands.repository.count(), 0);
    let controller = VehicleController(Arc::clone(&commands));

    let descriptor = VehicleCommands::describe();
    assert!(descriptor.has_role(RoleKind::CommandService));
    assert_eq!(descriptor.operations(), &["save_vehicle"]);

    let bindings = controller.bindings();
    assert_eq!(bindings[0].field(), "0");
    assert!(bindings[0].target().is_some_and(|d| d.has_role(RoleKind::CommandService)));

    let queries = VehicleQueries { last_query: String::new() };
    assert!(queries.last_query.is_empty());
    assert!(queries.bindings().is_empty());
    assert!(Application.descriptor().has_role(RoleKind::Microservice));
}
