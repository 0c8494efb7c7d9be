use dns_race_application::RaceCoordinator;
use dns_race_domain::Config;
use dns_race_infrastructure::dns::{
    AnswerSynthesizer, ChainRequestHandler, RacingHandler, ServFailHandler, UpstreamResolver,
};
use hickory_server::ServerFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tracing::info;

const TCP_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn start_dns_server(config: &Config) -> anyhow::Result<()> {
    let socket_addr = config.server.listen_address()?;
    let endpoints = config.endpoint_set()?;

    let lookup = Arc::new(UpstreamResolver::new(config.race.dial_timeout()));
    let synthesizer = AnswerSynthesizer::new(config.race.answer_ttl);

    info!(
        bind_address = %socket_addr,
        upstreams = %endpoints,
        dial_timeout_ms = lookup.timeout().as_millis() as u64,
        answer_ttl = synthesizer.ttl(),
        "Starting DNS server"
    );

    let coordinator = Arc::new(RaceCoordinator::new(endpoints, lookup));
    let chain = Arc::new(RacingHandler::new(
        coordinator,
        synthesizer,
        Arc::new(ServFailHandler),
    ));

    // Create UDP socket
    let udp_socket = UdpSocket::bind(socket_addr).await?;
    info!(protocol = "UDP", "DNS server listening");

    // Create TCP listener
    let tcp_listener = TcpListener::bind(socket_addr).await?;
    info!(protocol = "TCP", "DNS server listening");

    let mut server = ServerFuture::new(ChainRequestHandler::new(chain));
    server.register_socket(udp_socket);
    server.register_listener(tcp_listener, TCP_TIMEOUT);

    info!("DNS server ready to accept queries");

    server.block_until_done().await?;

    Ok(())
}
