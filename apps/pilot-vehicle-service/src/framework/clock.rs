use std::time::{SystemTime, UNIX_EPOCH};

use layerkit::Component;

pub trait Clock: Component {
    /// Seconds since the Unix epoch.
    fn now_unix(&self) -> u64;
}

#[derive(Component)]
#[component(framework_service)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs())
    }
}
