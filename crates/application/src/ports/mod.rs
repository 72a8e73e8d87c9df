mod clock;
mod path_store_maintenance_port;
mod path_store_port;

pub use clock::Clock;
pub use path_store_maintenance_port::{ExpiryOutcome, PathStoreMaintenancePort};
pub use path_store_port::{Admission, PathStorePort, PathStoreStats};
