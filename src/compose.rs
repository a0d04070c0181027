//! The compose descriptor written into every site directory.
//!
//! The template is identical for every site: same credentials, same host
//! port. Only one site can be up per host at a time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const FILE_NAME: &str = "docker-compose.yml";
/// Bind-mounted into the web container's document root.
pub const CONTENT_DIR: &str = "wp";
pub const WEB_PORT: u16 = 8000;

const DB_IMAGE: &str = "mysql:5.7";
const WP_IMAGE: &str = "wordpress:latest";
const DB_VOLUME: &str = "db_data";
const DB_ROOT_PASSWORD: &str = "somewordpress";
const DB_NAME: &str = "wordpress";
const DB_USER: &str = "wordpress";
const DB_PASSWORD: &str = "wordpress";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeFile {
    pub version: String,
    pub services: BTreeMap<String, Service>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub volumes: BTreeMap<String, NamedVolume>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
}

/// A named volume with driver defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedVolume {}

fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl ComposeFile {
    /// MySQL plus WordPress, the latter published on [`WEB_PORT`].
    pub fn wordpress() -> Self {
        let db = Service {
            image: DB_IMAGE.to_string(),
            volumes: vec![format!("{DB_VOLUME}:/var/lib/mysql")],
            restart: Some("always".to_string()),
            environment: env(&[
                ("MYSQL_ROOT_PASSWORD", DB_ROOT_PASSWORD),
                ("MYSQL_DATABASE", DB_NAME),
                ("MYSQL_USER", DB_USER),
                ("MYSQL_PASSWORD", DB_PASSWORD),
            ]),
            ..Service::default()
        };

        let wordpress = Service {
            image: WP_IMAGE.to_string(),
            depends_on: vec!["db".to_string()],
            ports: vec![format!("{WEB_PORT}:80")],
            volumes: vec![format!("./{CONTENT_DIR}:/var/www/html")],
            restart: Some("always".to_string()),
            environment: env(&[
                ("WORDPRESS_DB_HOST", "db:3306"),
                ("WORDPRESS_DB_USER", DB_USER),
                ("WORDPRESS_DB_PASSWORD", DB_PASSWORD),
                ("WORDPRESS_DB_NAME", DB_NAME),
            ]),
            ..Service::default()
        };

        ComposeFile {
            version: "3".to_string(),
            services: BTreeMap::from([
                ("db".to_string(), db),
                ("wordpress".to_string(), wordpress),
            ]),
            volumes: BTreeMap::from([(DB_VOLUME.to_string(), NamedVolume::default())]),
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
