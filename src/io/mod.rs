pub mod config_io;
pub mod identity;
pub mod lock;
pub mod logging;
pub mod state;
pub mod store;
