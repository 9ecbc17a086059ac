//! Connection establishment: plain TCP or TLS over TCP.
//!
//! No retries happen here; a failed attempt is returned to the caller as a
//! [`ConnectionError`].

use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::rustls;
use tokio_rustls::TlsConnector;

/// Everything needed for one connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub host: String,
    pub port: u16,
    pub tls: bool,
    /// Skip certificate validation. Opt-in only.
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
}

impl TransportConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("timed out connecting to {address} after {timeout:?}")]
    Timeout { address: String, timeout: Duration },

    #[error("failed to connect to {address}: {source}")]
    Io { address: String, source: io::Error },

    #[error("invalid TLS server name {host:?}: {source}")]
    InvalidServerName {
        host: String,
        source: rustls::pki_types::InvalidDnsNameError,
    },

    #[error("TLS handshake with {address} failed: {source}")]
    Tls { address: String, source: io::Error },
}

/// A duplex byte stream to the server.
pub trait Transport: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> Transport for T {}

pub type Connection = Box<dyn Transport>;

/// Dial the server described by `cfg`. The timeout covers the TCP connect and
/// the TLS handshake together.
pub async fn connect(cfg: &TransportConfig) -> Result<Connection, ConnectionError> {
    let address = cfg.address();
    match tokio::time::timeout(cfg.timeout, dial(cfg, &address)).await {
        Ok(result) => result,
        Err(_) => Err(ConnectionError::Timeout {
            address,
            timeout: cfg.timeout,
        }),
    }
}

async fn dial(cfg: &TransportConfig, address: &str) -> Result<Connection, ConnectionError> {
    if cfg.tls {
        tracing::info!(
            %address,
            insecure = cfg.accept_invalid_certs,
            "establishing TLS connection"
        );
    } else {
        tracing::info!(%address, "establishing plain TCP connection");
    }

    let tcp = TcpStream::connect(address)
        .await
        .map_err(|source| ConnectionError::Io {
            address: address.to_string(),
            source,
        })?;

    if !cfg.tls {
        return Ok(Box::new(tcp));
    }

    let tls_config = if cfg.accept_invalid_certs {
        insecure_client_config()
    } else {
        default_client_config()
    };
    let connector = TlsConnector::from(Arc::new(tls_config));
    let server_name = rustls::pki_types::ServerName::try_from(cfg.host.clone()).map_err(
        |source| ConnectionError::InvalidServerName {
            host: cfg.host.clone(),
            source,
        },
    )?;
    let stream = connector
        .connect(server_name, tcp)
        .await
        .map_err(|source| ConnectionError::Tls {
            address: address.to_string(),
            source,
        })?;
    Ok(Box::new(stream))
}

fn default_client_config() -> rustls::ClientConfig {
    let root_store =
        rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth()
}

fn insecure_client_config() -> rustls::ClientConfig {
    rustls::ClientConfig::builder()
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyCert))
        .with_no_client_auth()
}

/// Certificate verifier used when validation was explicitly disabled.
#[derive(Debug)]
struct AcceptAnyCert;

impl rustls::client::danger::ServerCertVerifier for AcceptAnyCert {
    fn verify_server_cert(
        &self,
        _end_entity: &rustls::pki_types::CertificateDer<'_>,
        _intermediates: &[rustls::pki_types::CertificateDer<'_>],
        _server_name: &rustls::pki_types::ServerName<'_>,
        _ocsp_response: &[u8],
        _now: rustls::pki_types::UnixTime,
    ) -> Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        rustls::crypto::aws_lc_rs::default_provider()
            .signature_verification_algorithms
            .supported_schemes()
    }
}
