use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::{InitArgs, CFG_FILE_NAME};

const SAMPLE_CFG: &str = include_str!("../../../res/blogmeta.toml");
const SAMPLE_TEMPLATE: &str = include_str!("../../../res/template/post.html");
const SAMPLE_POSTS: &str = include_str!("../../../res/posts/posts.json");

fn replace_site_root(site_root: &Path, config_data: &str) -> String {
    let site_root = site_root.to_string_lossy().replace('\\', "/");
    let site_root = site_root.trim_end_matches('/');
    config_data.replace(r#"site_root = "res""#, &format!(r#"site_root = "{}""#, site_root))
}

/// Existing files are kept, so init never loses posts or customized templates.
fn write_new_file(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("Keeping existing {}", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path).with_context(|| format!("Error creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;

    println!("Created {}", path.display());
    Ok(())
}

pub fn bootstrap_cmd(args: InitArgs) -> Result<()> {
    let out_path = fs::canonicalize(&args.out_dir)
        .with_context(|| format!("Error converting path to absolute: {}", args.out_dir))?;

    if !out_path.is_dir() {
        bail!("Output path must be a directory: {}", out_path.display());
    }

    let cfg = replace_site_root(&out_path, SAMPLE_CFG);
    write_new_file(&out_path.join(CFG_FILE_NAME), &cfg)?;
    write_new_file(&out_path.join("template").join("post.html"), SAMPLE_TEMPLATE)?;
    write_new_file(&out_path.join("posts").join("posts.json"), SAMPLE_POSTS)?;

    Ok(())
}
