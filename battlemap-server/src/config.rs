use std::env;

const SERVER_PORT_KEY: &str = "SERVER_PORT";
const DEFAULT_SERVER_PORT: &str = "8080";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: String,
}

impl Config {
    /// Reads the server settings from the environment, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let server_port =
            env::var(SERVER_PORT_KEY).unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_owned());

        Ok(Config { server_port })
    }
}
