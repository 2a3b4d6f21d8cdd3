use serde::{Deserialize, Serialize};

/// A single administrator-configured override for a domain/record-type pair.
///
/// An empty `ip` means "synthesize NXDOMAIN for this name and type" instead
/// of installing an answer record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Override {
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Ip", default)]
    pub ip: String,
}

/// The on-disk / admin-API configuration record.
///
/// Field names are kept as the canonical JSON tags so that config files
/// written by older tooling round-trip cleanly.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(rename = "DNSPort", default = "default_dns_port")]
    pub dns_port: String,

    #[serde(rename = "PrometheusPort", default = "default_prometheus_port")]
    pub prometheus_port: String,

    #[serde(rename = "UpstreamDNS", default = "default_upstream_dns")]
    pub upstream_dns: String,

    #[serde(rename = "UpstreamTlsSrvName", default)]
    pub upstream_tls_srv_name: String,

    #[serde(rename = "Debug", default)]
    pub debug: bool,

    #[serde(rename = "BlocklistSources", default)]
    pub blocklist_sources: Vec<String>,

    #[serde(rename = "Overrides", default)]
    pub overrides: Vec<Override>,

    /// base64 of a bcrypt hash of the admin username. Opaque to everything
    /// except the admin API's Basic-auth check.
    #[serde(rename = "AdminUsrHash", default)]
    pub admin_usr_hash: String,

    /// base64 of a bcrypt hash of the admin password.
    #[serde(rename = "AdminPwdHash", default)]
    pub admin_pwd_hash: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            prometheus_port: default_prometheus_port(),
            upstream_dns: default_upstream_dns(),
            upstream_tls_srv_name: String::new(),
            debug: false,
            blocklist_sources: Vec::new(),
            overrides: Vec::new(),
            admin_usr_hash: String::new(),
            admin_pwd_hash: String::new(),
        }
    }
}

fn default_dns_port() -> String {
    "53".to_string()
}

fn default_prometheus_port() -> String {
    "9100".to_string()
}

fn default_upstream_dns() -> String {
    "1.1.1.1:53".to_string()
}

impl Config {
    /// Overlay the recognized environment variables onto `self`, in place.
    ///
    /// Each recognized variable, if set, replaces the corresponding field
    /// wholesale.
    pub fn apply_env_overlay(&mut self) {
        if let Ok(val) = std::env::var("DNS_PORT") {
            self.dns_port = val;
        }
        if let Ok(val) = std::env::var("PROMETHEUS_PORT") {
            self.prometheus_port = val;
        }
        if let Ok(val) = std::env::var("UPSTREAM_DNS") {
            self.upstream_dns = val;
        }
        if let Ok(val) = std::env::var("UPSTREAM_TLS_SRVNAME") {
            self.upstream_tls_srv_name = val;
        }
        if let Ok(val) = std::env::var("DEBUG") {
            self.debug = val == "true";
        }
        if let Ok(val) = std::env::var("ADMIN_USR_HASH") {
            self.admin_usr_hash = val;
        }
        if let Ok(val) = std::env::var("ADMIN_PWD_HASH") {
            self.admin_pwd_hash = val;
        }
    }

    /// The subset of fields the admin API is allowed to replace via POST:
    /// upstream address, upstream TLS SNI, blocklist sources.
    pub fn apply_admin_update(&mut self, update: &ConfigUpdate) {
        self.upstream_dns = update.upstream_dns.clone();
        self.upstream_tls_srv_name = update.upstream_tls_srv_name.clone();
        self.blocklist_sources = update.blocklist_sources.clone();
    }
}

/// The narrow subset of [`Config`] the admin API accepts on POST.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfigUpdate {
    #[serde(rename = "UpstreamDNS")]
    pub upstream_dns: String,
    #[serde(rename = "UpstreamTlsSrvName", default)]
    pub upstream_tls_srv_name: String,
    #[serde(rename = "BlocklistSources", default)]
    pub blocklist_sources: Vec<String>,
}
