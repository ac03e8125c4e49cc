pub use servitor_client as client;
pub use servitor_core as core;
pub use servitor_server as server;

mod entry;
pub use entry::*;
