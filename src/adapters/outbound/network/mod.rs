/// Network adapters for external API calls
mod iq_server_client;

pub use iq_server_client::IqServerClient;
