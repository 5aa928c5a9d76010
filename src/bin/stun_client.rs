use anyhow::Context;
use stun_binding_client::{ClientConfig, StunClient, UdpCommunicator};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut config = ClientConfig::default();
    let mut send_indication = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--indication" => send_indication = true,
            server => config = config.with_server(server),
        }
    }

    let communicator = UdpCommunicator::connect(&config)
        .await
        .with_context(|| format!("Failed to connect to {}", config.server))?;
    let client = StunClient::new(communicator);

    let address = client.bind().await.context("Binding request failed")?;

    println!("Our public IP is: {address}");

    if send_indication {
        client
            .send_bind_indication()
            .await
            .context("Failed to send binding indication")?;
        tracing::info!("binding indication sent");
    }

    Ok(())
}
