use serde::Deserialize;

/// Server configuration.
///
/// Loaded from a YAML file named by the `CONFIG` environment variable.
/// When the variable is unset, built-in defaults apply: listen on
/// `127.0.0.1:8080` and serve `./www` under the `/` prefix.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// File-serving routes, tried in order; the first route whose prefix
    /// matches a request target claims it.
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,
}

/// One file-serving route: a URI prefix confined to a root directory.
#[derive(Clone, Debug, Deserialize)]
pub struct RouteConfig {
    pub prefix: String,
    pub root: String,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_routes() -> Vec<RouteConfig> {
    vec![RouteConfig {
        prefix: "/".to_string(),
        root: "./www".to_string(),
    }]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            routes: default_routes(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG") {
            Ok(path) => Self::from_file(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let cfg = serde_yaml::from_str(&raw)?;
        Ok(cfg)
    }
}
