use geotxt_infrastructure::dns::GeoTxtHandler;
use hickory_server::ServerFuture;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tracing::info;

/// TCP connection timeout for DNS queries.
const TCP_TIMEOUT: Duration = Duration::from_secs(10);

/// Bind UDP and TCP listeners and serve until the transport shuts down.
pub async fn start_dns_server(bind_addr: String, handler: GeoTxtHandler) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let mut server = ServerFuture::new(handler);

    let udp_socket = UdpSocket::bind(socket_addr).await?;
    server.register_socket(udp_socket);

    let tcp_listener = TcpListener::bind(socket_addr).await?;
    server.register_listener(tcp_listener, TCP_TIMEOUT);

    info!(bind_address = %socket_addr, "DNS server ready (udp+tcp)");

    server.block_until_done().await?;
    Ok(())
}
