use httpmock::MockServer;
use planhat::{Client, Config};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn config_for(server: &MockServer) -> Config {
    Config::new("test-key", "")
        .with_base_url(server.base_url())
        .with_metrics_url(server.url("/dimensiondata"))
}

pub fn client_for(server: &MockServer) -> Client {
    init_logging();
    Client::new(config_for(server)).unwrap()
}
