pub mod commands;
pub mod config;
pub mod error;
pub mod explain;
pub mod format;
pub mod init_config;
pub mod parameters;
pub mod physics;
pub mod plotting;
pub mod projection;
pub mod readout;
pub mod units;

pub use error::{LabError, Result};
pub use parameters::{Ball, Field, ParameterSet};
pub use physics::{compute, ResultSet};
pub use plotting::{sweep, SweepPoint, SweepSpec};
