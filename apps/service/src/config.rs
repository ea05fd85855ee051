use std::{env, fmt, fs, path, time::Duration};

use netwatch::{
    Category, ConfigError, NotifyPolicy, PingCommand, Registry, RegistryError, RetryPolicy,
    TargetEntry,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read config file {0}: {1}")]
    ReadFailed(path::PathBuf, #[source] std::io::Error),

    #[error("Failed to write config file {0}: {1}")]
    WriteFailed(path::PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),

    #[error("No config path available, set XDG_CONFIG_HOME or HOME")]
    ConfigPathUnavailable,

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigError),

    #[error(transparent)]
    Targets(#[from] RegistryError),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// JSON file with `[{ "name": ..., "ip": ... }]`, used instead of `servers`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers_file: Option<path::PathBuf>,

    /// JSON file with `[{ "name": ..., "url": ... }]`, used instead of `websites`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub websites_file: Option<path::PathBuf>,

    #[serde(default)]
    pub probe: ProbeSettings,

    #[serde(default)]
    pub watch: WatchSettings,

    #[serde(default)]
    pub audit: AuditSettings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp: Option<SmtpSettings>,

    #[serde(default)]
    pub servers: Vec<ServerEntry>,

    #[serde(default)]
    pub websites: Vec<WebsiteEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub ping_program: String,
    pub ping_deadline_secs: u64,
    pub ping_attempts: u32,
    pub ping_retry_delay_secs: u64,
    pub http_timeout_secs: u64,
    pub http_attempts: u32,
    pub http_retry_delay_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    /// Pause between the end of one probe and the next, per target
    pub tick_secs: u64,
    /// Capacity of the transition channel feeding the status board
    pub event_buffer: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSettings {
    pub notify_only_on_error: bool,
    /// `HH:MM:SS` times at which a clean report is sent anyway
    pub send_times: Vec<String>,
    /// Minutes between two audit passes, even and at least 10
    pub revision_interval_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Connect over implicit TLS (`true`) or upgrade with STARTTLS (`false`)
    #[serde(default = "default_implicit_tls")]
    pub implicit_tls: bool,
    pub from: String,
    pub to: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub name: String,
    pub ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteEntry {
    pub name: String,
    pub url: String,
}

fn default_smtp_port() -> u16 {
    465
}

fn default_implicit_tls() -> bool {
    true
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            ping_program: "ping".into(),
            ping_deadline_secs: 10,
            ping_attempts: 3,
            ping_retry_delay_secs: 3,
            http_timeout_secs: 10,
            http_attempts: 2,
            http_retry_delay_secs: 1,
        }
    }
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self { tick_secs: 2, event_buffer: 256 }
    }
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            notify_only_on_error: true,
            send_times: vec!["08:00:00".into(), "13:00:00".into(), "18:00:00".into()],
            revision_interval_minutes: 10,
        }
    }
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/netwatch/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, Error> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(Error::ConfigPathUnavailable);
    };

    Ok(path.join("netwatch/config.toml"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);
        let write_2 = write_indented(2);

        writeln!(f, "Current Internal Configuration State:")?;

        write_title_1(f, "Probes")?;
        write_1(f, "Ping Program", &self.probe.ping_program)?;
        write_1(f, "Ping Deadline (s)", &self.probe.ping_deadline_secs)?;
        write_1(f, "Ping Attempts", &self.probe.ping_attempts)?;
        write_1(f, "Ping Retry Delay (s)", &self.probe.ping_retry_delay_secs)?;
        write_1(f, "HTTP Timeout (s)", &self.probe.http_timeout_secs)?;
        write_1(f, "HTTP Attempts", &self.probe.http_attempts)?;
        write_1(f, "HTTP Retry Delay (s)", &self.probe.http_retry_delay_secs)?;

        write_title_1(f, "Watch")?;
        write_1(f, "Tick (s)", &self.watch.tick_secs)?;
        write_1(f, "Event Buffer", &self.watch.event_buffer)?;

        write_title_1(f, "Audit")?;
        write_1(f, "Notify Only On Error", &self.audit.notify_only_on_error)?;
        write_1(f, "Send Times", &self.audit.send_times.join(", "))?;
        write_1(f, "Revision Interval (min)", &self.audit.revision_interval_minutes)?;

        write_title_1(f, "SMTP")?;
        match &self.smtp {
            Some(smtp) => {
                write_1(f, "Server", &format!("{}:{}", smtp.host, smtp.port))?;
                write_1(f, "Implicit TLS", &smtp.implicit_tls)?;
                write_1(f, "From", &smtp.from)?;
                write_1(f, "To", &smtp.to.join(", "))?;
            }
            None => write_1(f, "Disabled", &"reports are logged only")?,
        }

        write_title_1(f, "Servers")?;
        match &self.servers_file {
            Some(file) => write_1(f, "File", &file.display())?,
            None => {
                for server in &self.servers {
                    write_2(f, &server.name, &server.ip)?;
                }
            }
        }

        write_title_1(f, "Websites")?;
        match &self.websites_file {
            Some(file) => write_1(f, "File", &file.display())?,
            None => {
                for website in &self.websites {
                    write_2(f, &website.name, &website.url)?;
                }
            }
        }

        Ok(())
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Creates a default config in ~/.config/netwatch/config.toml
    ///  or the specified path, with the name config.toml if one does not exist
    ///
    /// ```rust,ignore
    /// let cfg = config::Config::from_config(None::<&path::Path>)?;
    /// println!("{}", cfg);
    /// ```
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, Error> {
        let config_path: path::PathBuf = if let Some(path) = optional_path {
            normalize_toml_path(path.as_ref())
        } else {
            default_config_path()?
        };

        let config = if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path)
                .map_err(|err| Error::ReadFailed(config_path.clone(), err))?;
            toml::from_str(raw_string.as_str())?
        } else {
            let config = Self::default();
            config.write_config(&config_path)?;
            config
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &std::path::Path) -> Result<(), Error> {
        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| Error::WriteFailed(path.into(), err))?;
        }

        std::fs::write(path, config_str).map_err(|err| Error::WriteFailed(path.into(), err))
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe.ping_attempts == 0 {
            return Err(ConfigError::ZeroAttempts("probe.ping_attempts"));
        }
        if self.probe.http_attempts == 0 {
            return Err(ConfigError::ZeroAttempts("probe.http_attempts"));
        }
        if self.watch.event_buffer == 0 {
            return Err(ConfigError::ZeroEventBuffer);
        }

        self.notify_policy().map(|_| ())
    }

    pub fn notify_policy(&self) -> Result<NotifyPolicy, ConfigError> {
        NotifyPolicy::from_schedule(
            self.audit.notify_only_on_error,
            &self.audit.send_times,
            self.audit.revision_interval_minutes,
        )
    }

    pub fn revision_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.audit.revision_interval_minutes) * 60)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_secs(self.watch.tick_secs)
    }

    pub fn ping_command(&self) -> PingCommand {
        PingCommand {
            program: self.probe.ping_program.clone(),
            deadline_secs: self.probe.ping_deadline_secs,
        }
    }

    pub fn ping_retry(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.probe.ping_attempts,
            Duration::from_secs(self.probe.ping_retry_delay_secs),
        )
    }

    pub fn http_retry(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.probe.http_attempts,
            Duration::from_secs(self.probe.http_retry_delay_secs),
        )
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.probe.http_timeout_secs)
    }

    /// Server registry, from `servers_file` when set
    pub fn server_registry(&self) -> Result<Registry, RegistryError> {
        match &self.servers_file {
            Some(file) => Registry::from_json_file(Category::Server, file),
            None => Ok(Registry::new(
                Category::Server,
                self.servers.iter().map(|s| TargetEntry::new(&s.name, &s.ip)),
            )),
        }
    }

    /// Website registry, from `websites_file` when set
    pub fn website_registry(&self) -> Result<Registry, RegistryError> {
        match &self.websites_file {
            Some(file) => Registry::from_json_file(Category::Website, file),
            None => Ok(Registry::new(
                Category::Website,
                self.websites.iter().map(|w| TargetEntry::new(&w.name, &w.url)),
            )),
        }
    }
}
