// Library exports for testing
pub mod api;
pub mod config;
pub mod errors;
pub mod hal;
pub mod metrics;
pub mod server;

use anyhow::Result;

use config::Config;
use server::Server;

/// A server with every built-in route group mounted
pub fn build_server(config: Config) -> Result<Server> {
    let mut server = Server::new(config);
    api::routes::mount_builtin(&mut server)?;
    Ok(server)
}
