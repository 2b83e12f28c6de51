use std::{env, net::IpAddr, net::SocketAddr, path::PathBuf};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Reads `HABITS_BIND_ADDR`, `PORT` and `HABITS_DATA_DIR`, falling back to defaults.
    pub fn from_env() -> Result<Self, String> {
        let host = match env::var("HABITS_BIND_ADDR") {
            Ok(value) => value
                .parse::<IpAddr>()
                .map_err(|err| format!("HABITS_BIND_ADDR must be an IP address: {err}"))?,
            Err(_) => IpAddr::from([0, 0, 0, 0]),
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        let data_dir = env::var("HABITS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        Ok(Self {
            addr: SocketAddr::new(host, port),
            data_dir,
        })
    }
}
