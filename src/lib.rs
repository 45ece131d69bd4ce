//! Transient simulation of vaporizing-propellant micro-thrusters.
//!
//! The physics lives in the workspace crates re-exported here; this crate adds the glue that
//! turns scenario files into ready-to-run engines, and hosts the CLI front-ends.

pub mod scenario;

pub use thruster_config as config;
pub use thruster_core as core;
pub use thruster_export as export;
pub use thruster_propulsion as propulsion;
pub use thruster_transient as transient;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
