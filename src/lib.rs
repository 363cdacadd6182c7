pub mod collector;
pub mod console;
pub mod filters;
pub mod loader;
pub mod logging;
pub mod registry;
pub mod report;
pub mod session;
pub mod stats;
pub mod trips;
