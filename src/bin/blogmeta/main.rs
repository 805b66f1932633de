use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use spdlog::{info, warn};

use blogmeta::generator::generate_all;
use blogmeta::logger::configure_logger;
use blogmeta::path_resolver::Location;
use blogmeta::runtime::document::PageDocument;
use blogmeta::runtime::source::FsSource;
use blogmeta::runtime::{PageSession, SessionSettings, SessionState};

use crate::bootstrap::bootstrap_cmd;
use crate::config::open_config;

mod bootstrap;
mod config;

const CFG_FILE_NAME: &str = "blogmeta.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Writes one HTML page per post, with its preview and search tags
    Generate(GenerateArgs),
    /// Renders a page the way the blog script does and prints it
    Preview(PreviewArgs),
    /// Writes a sample configuration and post template
    Init(InitArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Address of the displayed page, e.g. https://me.github.io/blog/post.html?id=hello
    #[arg(short, long)]
    url: String,

    /// Page layout
    #[arg(short, long, value_enum, default_value_t = PageKind::Listing)]
    page: PageKind,

    /// Tag filter clicked after the listing is loaded
    #[arg(short, long)]
    filter: Option<String>,

    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,
}

#[derive(Parser, Debug)]
pub(crate) struct InitArgs {
    /// Directory where the new site configuration will be written
    #[arg(short, long)]
    out_dir: String,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum PageKind {
    /// index.html, with the post grid and the tag filters
    Listing,
    /// post.html, with a single post
    Post,
}

fn setup(config_path: Option<String>) -> Result<blogmeta::config::Config> {
    let config = open_config(config_path.map(PathBuf::from))?;
    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }
    Ok(config)
}

fn generate_cmd(args: GenerateArgs) -> Result<()> {
    let config = setup(args.config_path)?;
    info!("Generating post pages for {}", config.site.base_url);

    let report = generate_all(&config)?;
    println!("Generated {} post pages in {}", report.pages.len(), config.output_path().display());
    Ok(())
}

async fn preview_cmd(args: PreviewArgs) -> Result<()> {
    let config = setup(args.config_path)?;
    let location = Location::parse(&args.url)?;

    let mut session = PageSession::new(SessionSettings::from_config(&config), location)?;
    let source = FsSource::new(&config.paths.site_root, session.resolver().base_path());
    let mut doc = match args.page {
        PageKind::Listing => PageDocument::listing(),
        PageKind::Post => PageDocument::post_page(),
    };

    let state = session.load(&source, &mut doc).await;
    if let Some(filter) = args.filter {
        session.select_filter(&mut doc, &filter);
    }

    println!("{}", doc.render());
    if state == SessionState::Error {
        warn!("Page rendered with an error panel");
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args {
        Args::Generate(args) => generate_cmd(args),
        Args::Preview(args) => preview_cmd(args).await,
        Args::Init(args) => bootstrap_cmd(args),
    }
}
