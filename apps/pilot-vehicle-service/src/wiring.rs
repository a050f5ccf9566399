//! Application assembly.
//!
//! Components are constructed bottom-up and published one by one; the hub
//! verifies each before it becomes visible to the components built after it.

use std::sync::Arc;

use anyhow::Context;
use layerkit::bootstrap::AppConfig;
use layerkit::{ComponentHub, Proxy};

use crate::application::PilotApplication;
use crate::config::TransunionConfig;
use crate::controller::{VehicleCommandController, VehicleQueryController};
use crate::framework::{Clock, SystemClock};
use crate::repo::{InMemoryVehicleRepository, VehicleRepository};
use crate::service::report::AUDIT_FEATURE;
use crate::service::{
    DefaultVehicleCommandService, DefaultVehicleQueryService, VehicleCommandService,
    VehicleQueryService, VehicleReportService,
};

/// Namespace root used when `conformance.application_root` is not configured.
pub const APPLICATION_ROOT: &str = env!("CARGO_CRATE_NAME");

/// Builds and publishes every component of the service.
///
/// # Errors
/// Fails on invalid service configuration or on the first component that
/// violates its role contract.
pub fn assemble(config: &AppConfig) -> anyhow::Result<ComponentHub> {
    let hub = config.conformance.hub(APPLICATION_ROOT);
    tracing::info!(
        checked = hub.checker().is_some(),
        root = hub.checker().map(|c| c.scope().root()),
        "assembling vehicle service"
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    hub.publish::<dyn Clock>(Arc::clone(&clock))?;

    let transunion = Arc::new(TransunionConfig::from_app_config(config)?);
    hub.publish(Arc::clone(&transunion))?;

    let repository: Arc<dyn VehicleRepository> = Arc::new(InMemoryVehicleRepository::new());
    let repository = Arc::new(Proxy::new("transactional", repository));
    hub.publish::<Proxy<dyn VehicleRepository>>(Arc::clone(&repository))?;

    let commands: Arc<dyn VehicleCommandService> = Arc::new(DefaultVehicleCommandService::new(
        Arc::clone(&repository),
        transunion,
        clock,
    ));
    hub.publish::<dyn VehicleCommandService>(Arc::clone(&commands))?;

    let queries: Arc<dyn VehicleQueryService> =
        Arc::new(DefaultVehicleQueryService::new(repository));
    hub.publish::<dyn VehicleQueryService>(Arc::clone(&queries))?;

    if config.feature(AUDIT_FEATURE) {
        let reports = Arc::new(VehicleReportService::new(
            Arc::clone(&queries),
            Arc::clone(&commands),
        ));
        hub.publish(reports)
            .context("failed to publish vehicle report service")?;
    }

    hub.publish(Arc::new(VehicleCommandController::new(commands)))?;
    hub.publish(Arc::new(VehicleQueryController::new(queries)))?;
    hub.publish(Arc::new(PilotApplication))?;

    tracing::info!(components = hub.len(), "vehicle service assembled");
    Ok(hub)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use layerkit::HubError;
    use layerkit::rules::QUERY_SERVICE_MESSAGE;
    use tracing_test::traced_test;

    fn with_audit(enabled: bool) -> AppConfig {
        let mut config = AppConfig::default();
        config.features.insert(AUDIT_FEATURE.to_owned(), enabled);
        config
    }

    #[test]
    fn default_wiring_passes_conformance() {
        let hub = assemble(&AppConfig::default()).unwrap();
        assert_eq!(hub.len(), 8);
        assert!(hub.contains::<dyn VehicleCommandService>());
        assert!(hub.contains::<PilotApplication>());
        assert!(!hub.contains::<VehicleReportService>());
    }

    #[test]
    fn audited_report_service_is_rejected() {
        let err = assemble(&with_audit(true)).unwrap_err();
        let violation = err
            .chain()
            .find_map(|cause| match cause.downcast_ref::<HubError>() {
                Some(HubError::Rejected(v)) => Some(v.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(violation.message(), QUERY_SERVICE_MESSAGE);
        assert!(violation.component().ends_with("VehicleReportService"));
    }

    #[test]
    #[traced_test]
    fn disabled_checking_lets_the_miswiring_through() {
        let mut config = with_audit(true);
        config.conformance.enabled = false;
        let hub = assemble(&config).unwrap();
        assert!(hub.contains::<VehicleReportService>());
        assert!(logs_contain("checked=false"));
    }

    #[test]
    #[traced_test]
    fn assembly_logs_that_checking_is_on() {
        let hub = assemble(&AppConfig::default()).unwrap();
        assert!(hub.checker().is_some());
        assert!(logs_contain("checked=true"));
        assert!(logs_contain("vehicle service assembled"));
    }

    #[test]
    fn application_round_trips_through_controllers() {
        let hub = assemble(&AppConfig::default()).unwrap();
        let report = PilotApplication.run(&hub).unwrap();
        assert_eq!(report.registered.len(), 4);
        assert_eq!(report.removed, vec![2]);
        assert_eq!(report.remaining.len(), 3);
        assert_eq!(
            report.lookup.map(|v| v.model),
            Some("Corolla".to_owned())
        );
    }

    #[test]
    fn foreign_root_skips_every_check() {
        let mut config = with_audit(true);
        config.conformance.application_root = Some("somebody_else".to_owned());
        assert!(assemble(&config).is_ok());
    }
}
