use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use serde::Deserialize;

use crate::path_resolver::HostingRule;
use crate::seo::SiteInfo;
use crate::util::os_helper::get_name;

#[derive(Deserialize, Debug)]
pub struct Site {
    pub name: String,
    /// Defaults to the real name of the OS user
    pub author: Option<String>,
    /// Fixed deployment url, used for every absolute url written at generation time
    pub base_url: String,
    pub logo: String,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Paths {
    pub site_root: PathBuf,
    /// Relative to the site root. Also the url path of the dataset below the base path.
    #[serde(default = "default_posts_file")]
    pub posts_file: String,
    #[serde(default = "default_template_file")]
    pub template_file: String,
    /// Relative to the site root. Also the url directory of the post pages.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    pub feed_file: Option<String>,
}

fn default_posts_file() -> String {
    "posts/posts.json".to_string()
}

fn default_template_file() -> String {
    "post.html".to_string()
}

fn default_output_dir() -> String {
    "posts".to_string()
}

#[derive(Deserialize, Debug)]
pub struct Generator {
    /// Template references to the site root that move along with the post pages.
    #[serde(default = "default_root_links")]
    pub root_links: Vec<String>,
}

impl Default for Generator {
    fn default() -> Self {
        Generator {
            root_links: default_root_links(),
        }
    }
}

fn default_root_links() -> Vec<String> {
    ["index.html", "about.html", "css/", "js/"].iter().map(|s| s.to_string()).collect()
}

#[derive(Deserialize, Debug)]
pub struct Runtime {
    /// Takes the post id from the page file name when the query has none.
    #[serde(default = "default_true")]
    pub id_from_filename: bool,
    pub fetch_timeout_secs: Option<u64>,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime {
            id_from_filename: true,
            fetch_timeout_secs: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_hosting() -> Vec<HostingRule> {
    vec![HostingRule::default()]
}

#[derive(Deserialize, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    #[serde(default)]
    pub generator: Generator,
    #[serde(default = "default_hosting")]
    pub hosting: Vec<HostingRule>,
    #[serde(default)]
    pub runtime: Runtime,
    pub log: Option<Log>,
}

impl Config {
    pub fn author(&self) -> String {
        match self.site.author {
            Some(ref author) => author.clone(),
            None => get_name(),
        }
    }

    pub fn site_info(&self) -> SiteInfo {
        SiteInfo {
            name: self.site.name.clone(),
            author: self.author(),
            logo: self.site.logo.clone(),
            posts_dir: self.paths.output_dir.trim_matches('/').to_string(),
        }
    }

    pub fn posts_path(&self) -> PathBuf {
        self.paths.site_root.join(&self.paths.posts_file)
    }

    pub fn template_path(&self) -> PathBuf {
        self.paths.site_root.join(&self.paths.template_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.paths.site_root.join(self.paths.output_dir.trim_matches('/'))
    }

    pub fn feed_path(&self) -> Option<PathBuf> {
        self.paths.feed_file.as_ref().map(|f| self.paths.site_root.join(f))
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.runtime.fetch_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent().unwrap_or(Path::new("."));
    let str_path = path.to_string_lossy();
    Ok(PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy())))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths.site_root = parse_path(cfg.paths.site_root)?;
    if let Some(ref mut log) = cfg.log {
        if let Some(location) = log.location.take() {
            log.location = Some(parse_path(location)?);
        }
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r##"
[site]
name = "BraneTrix"
author = "Brane Author"
base_url = "https://triccs.github.io/blog"
logo = "/images/logo.png"

[paths]
site_root = "/srv/site"
"##;

    #[test]
    fn test_defaults() {
        let cfg = parse_config(MINIMAL).unwrap();
        assert_eq!(cfg.paths.posts_file, "posts/posts.json");
        assert_eq!(cfg.paths.template_file, "post.html");
        assert_eq!(cfg.paths.output_dir, "posts");
        assert_eq!(cfg.generator.root_links, ["index.html", "about.html", "css/", "js/"]);
        assert_eq!(cfg.hosting, [HostingRule::default()]);
        assert!(cfg.runtime.id_from_filename);
        assert_eq!(cfg.fetch_timeout(), None);
        assert!(cfg.log.is_none());
        assert!(cfg.feed_path().is_none());

        assert_eq!(cfg.posts_path(), PathBuf::from("/srv/site/posts/posts.json"));
        assert_eq!(cfg.template_path(), PathBuf::from("/srv/site/post.html"));
        assert_eq!(cfg.output_path(), PathBuf::from("/srv/site/posts"));

        let site = cfg.site_info();
        assert_eq!(site.author, "Brane Author");
        assert_eq!(site.posts_dir, "posts");
    }

    #[test]
    fn test_full_config() {
        let buf = format!("{}{}", MINIMAL, r##"
[generator]
root_links = ["index.html"]

[[hosting]]
host_suffix = "gitlab.io"
base_path = "/notes"

[runtime]
id_from_filename = false
fetch_timeout_secs = 3

[log]
level = "Debug"
log_to_console = false
location = "${exe_dir}/blogmeta.log"
"##);
        let cfg = parse_config(&buf).unwrap();
        assert_eq!(cfg.generator.root_links, ["index.html"]);
        assert_eq!(cfg.hosting.len(), 1);
        assert_eq!(cfg.hosting[0].host_suffix, "gitlab.io");
        assert!(!cfg.runtime.id_from_filename);
        assert_eq!(cfg.fetch_timeout(), Some(Duration::from_secs(3)));

        let log = cfg.log.unwrap();
        assert_eq!(log.level, LogLevel::Debug);
        let location = log.location.unwrap();
        assert!(!location.to_string_lossy().contains("${exe_dir}"));
        assert!(location.ends_with("blogmeta.log"));
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[site]\nname = 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let err = read_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
