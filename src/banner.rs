//! Startup banners for the server and the terminal client.

use std::net::SocketAddr;
use std::time::Duration;

use crate::consts::{AUTHOR, REPO};

/// Server configuration for display at startup. Never carries secrets.
pub struct ServerBanner<'a> {
    pub addr: SocketAddr,
    pub model: &'a str,
    pub enrich_timeout: Duration,
    pub http_timeout: Duration,
}

pub fn server_banner(info: &ServerBanner) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║             R I V A L S               ║
   ║   who else is chasing your customers  ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   repo      {}
   listen    http://{}
   model     {}
   enrich    {}s per competitor
   upstream  {}s per request
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        REPO,
        info.addr,
        info.model,
        info.enrich_timeout.as_secs(),
        info.http_timeout.as_secs(),
    )
}

pub fn client_banner(server: &str) -> String {
    format!(
        "rivals {} client, server {}\ntype a website to look up, `back` to start over, `quit` to leave.",
        env!("CARGO_PKG_VERSION"),
        server
    )
}
