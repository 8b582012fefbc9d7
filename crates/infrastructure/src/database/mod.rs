mod pool;
mod provider;

pub use pool::{Backend, Credentials, DatabasePool};
pub use provider::{
    resolve_provider, ConnectionProvider, DirectConnectionProvider, HostConnectionProvider,
    PDO_INCOMPLETE_MESSAGE,
};
