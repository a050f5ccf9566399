use std::sync::Arc;

use layerkit::{Component, Proxy, RoleKind};

pub trait Clock: Component {
    fn now(&self) -> u64;
}

#[derive(Component)]
#[component(framework_service)]
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        42
    }
}

#[derive(Component)]
#[component(application_service)]
pub struct Audit {
    #[inject]
    clock: Option<Arc<dyn Clock>>,
    #[inject]
    proxied: Box<Proxy<dyn Clock>>,
}

fn main() {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock);
    let audit = Audit {
        clock: None,
        proxied: Box::new(Proxy::new("cached", clock)),
    };
    assert_eq!(audit.proxied.now(), 42);
    assert!(audit.clock.is_none());

    let bindings = audit.bindings();
    assert_eq!(bindings.len(), 2);
    assert!(bindings[0].target().is_none());
    assert!(bindings[1]
        .target()
        .is_some_and(|d| d.has_role(RoleKind::FrameworkService)));
}
