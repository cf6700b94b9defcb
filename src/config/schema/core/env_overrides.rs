use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port_str) =
            std::env::var("LINKACCENT_GATEWAY_PORT").or_else(|_| std::env::var("PORT"))
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Ok(host) =
            std::env::var("LINKACCENT_GATEWAY_HOST").or_else(|_| std::env::var("HOST"))
            && !host.is_empty()
        {
            self.gateway.host = host;
        }

        if let Ok(level) = std::env::var("LINKACCENT_LOG_LEVEL")
            && !level.is_empty()
        {
            self.log_level = level.to_lowercase();
        }

        if let Ok(timeout_str) = std::env::var("LINKACCENT_PAGE_TIMEOUT_MS")
            && let Ok(timeout_ms) = timeout_str.parse::<u64>()
            && timeout_ms > 0
        {
            self.preview.page_timeout_ms = timeout_ms;
        }
    }
}
