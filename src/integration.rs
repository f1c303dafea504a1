//! Loader seam for optional extensions that contribute schema or manager
//! flavors when their requirements are present.

use crate::errors::Result;
use tracing::{info, warn};

/// An optional extension activated at runtime.
///
/// `activate` registers the extension's flavors and may run at any point in
/// the process lifetime, not only at startup.
pub trait Integration: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether the extension's requirements are satisfied in this environment.
    fn probe(&self) -> bool;

    /// Register the extension's flavors.
    fn activate(&self) -> Result<()>;
}

/// Probe the given integrations and activate those whose requirements are
/// met, returning the names that were activated. Failures are logged and
/// skipped; they never abort the remaining activations.
pub fn activate_available(integrations: &[&dyn Integration]) -> Vec<&'static str> {
    let mut activated = Vec::new();
    for integration in integrations {
        if !integration.probe() {
            info!(integration = integration.name(), "requirements missing, skipping");
            continue;
        }
        match integration.activate() {
            Ok(()) => {
                info!(integration = integration.name(), "activated");
                activated.push(integration.name());
            }
            Err(err) => {
                warn!(integration = integration.name(), error = %err, "activation failed");
            }
        }
    }
    activated
}
