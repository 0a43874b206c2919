use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, ToSocketAddrs};

/// HTTP サーバ設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// bind するホストアドレス
    #[serde(default = "default_host")]
    pub host: String,

    /// listen するポート
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// host:port を解決し、最初のソケットアドレスを返す
    pub fn socket_addr(&self) -> std::io::Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("could not resolve {}:{}", self.host, self.port),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let config: ServerConfig = serde_json::from_str(r#"{ "port": 8080 }"#).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(serde_json::from_str::<ServerConfig>("{}").unwrap(), ServerConfig::default());
    }

    #[test]
    fn socket_addr_of_ip_literal() {
        let config = ServerConfig {
            host: "0.0.0.0".into(),
            port: 4000,
        };
        assert_eq!(config.socket_addr().unwrap(), "0.0.0.0:4000".parse().unwrap());
    }
}
