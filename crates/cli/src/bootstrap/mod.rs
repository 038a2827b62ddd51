pub mod config;
pub mod logging;
pub mod record_store;
pub mod resolvers;

pub use config::load_config;
pub use logging::init_logging;
pub use record_store::init_record_store;
pub use resolvers::discover_resolvers;
