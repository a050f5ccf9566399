//! Derive macro for `layerkit` component descriptors.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod component;

/// Derives `layerkit::Described` and `layerkit::Component`.
///
/// Role markers and entry points are declared with `#[component(...)]`:
///
/// ```ignore
/// #[derive(Component)]
/// #[component(command_service(config = "transunion"), operations(save_vehicle, delete_vehicle))]
/// pub struct DefaultVehicleCommandService {
///     #[inject]
///     repository: Arc<Proxy<dyn VehicleRepository>>,
/// }
/// ```
///
/// Recognized roles: `microservice`, `controller`, `command_service`,
/// `query_service`, `application_service`, `repository`, `framework_service`
/// and `service_config`. The three service roles accept `stateful` and
/// `config = "..."`.
///
/// Fields marked `#[inject]` are reported as managed dependencies; their type
/// must implement `layerkit::Injectable`.
#[proc_macro_derive(Component, attributes(component, inject))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::expand_component(&input).into()
}
