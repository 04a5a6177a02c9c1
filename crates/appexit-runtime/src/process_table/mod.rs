//! OS-backed implementations of the process table and executable name ports.

mod executable;
mod sysinfo_table;

pub use executable::CurrentExecutableName;
pub use sysinfo_table::SysinfoProcessTable;
