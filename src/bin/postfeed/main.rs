use std::fmt::{Display, Formatter};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use spdlog::{error, info, warn};

use postfeed::config::Config;
use postfeed::logger::configure_logger;
use postfeed::new_post::{render_body, render_header, slug_from_title, NewPost};
use postfeed::pipeline::{content_source, discover, run_build};
use postfeed::post_preview::{all_categories, all_tags, filter_by_category, filter_by_tag, PostPreview};
use postfeed::util::os_helper::author_name;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "postfeed.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config path
    #[arg(short, long, global = true)]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover posts and write feed.xml, atom.xml and feed.json
    Build(BuildArgs),
    /// Print the published posts, newest first, as JSON
    List(ListArgs),
    /// Create a new draft post
    New(NewArgs),
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Directory holding the posts. Overrides paths.content_dir
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Directory receiving the feeds. Overrides paths.out_dir
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Directory holding the posts. Overrides paths.content_dir
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Only posts with this tag
    #[arg(long, conflicts_with = "category")]
    tag: Option<String>,

    /// Only posts in this category
    #[arg(long)]
    category: Option<String>,
}

#[derive(Args, Debug)]
struct NewArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Name of the author. If empty, OS user real name is being used
    #[arg(short, long)]
    name: Option<String>,

    /// Twitter handle of the author
    #[arg(long)]
    twitter: Option<String>,

    /// Category of the post
    #[arg(long)]
    category: Option<String>,

    /// Post generation options
    #[arg(short, long, default_value_t = PostOutput::Stdout)]
    output: PostOutput,
}

#[derive(Clone, Debug, ValueEnum)]
enum PostOutput {
    /// Writes the new post content to the stdout
    Stdout,
    /// Writes the new post to <content_dir>/<slug>.md
    File,
    /// Writes the new post to <content_dir>/<slug>/index.md
    Dir,
}

impl Display for PostOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PostOutput::Stdout => "stdout",
            PostOutput::File => "file",
            PostOutput::Dir => "dir",
        };
        write!(f, "{}", name)
    }
}

#[derive(Serialize)]
struct ListedPost<'a> {
    link: &'a str,
    title: &'a str,
    date: String,
    category: &'a str,
    tags: &'a [String],
}

#[derive(Serialize)]
struct Listing<'a> {
    tags: Vec<String>,
    categories: Vec<String>,
    posts: Vec<ListedPost<'a>>,
}

fn build_cmd(mut config: Config, args: BuildArgs) -> Result<()> {
    if let Some(content_dir) = args.content_dir {
        config.paths.content_dir = content_dir;
    }
    if let Some(out_dir) = args.out_dir {
        config.paths.out_dir = out_dir;
    }

    info!("Building feeds from {}", config.paths.content_dir.display());
    let source = content_source(&config);
    let report = run_build(&config, &source, Utc::now())
        .context("Feed build failed, no feed was written")?;
    info!("Feeds written for {} posts into {}", report.post_count, config.paths.out_dir.display());
    Ok(())
}

fn list_cmd(mut config: Config, args: ListArgs) -> Result<()> {
    if let Some(content_dir) = args.content_dir {
        config.paths.content_dir = content_dir;
    }

    let previews = discover(&config).context("Post discovery failed")?;
    let selected: Vec<&PostPreview> = match (args.tag, args.category) {
        (Some(tag), _) => filter_by_tag(&previews, &tag),
        (None, Some(category)) => filter_by_category(&previews, &category),
        (None, None) => previews.iter().collect(),
    };

    let listing = Listing {
        tags: all_tags(&previews),
        categories: all_categories(&previews),
        posts: selected.iter()
            .map(|p| ListedPost {
                link: &p.link,
                title: &p.meta.title,
                date: p.meta.date_iso(),
                category: &p.meta.category,
                tags: &p.meta.tags,
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

fn new_cmd(config: Config, args: NewArgs) -> Result<()> {
    let author = author_name(args.name);
    let post = NewPost {
        title: &args.title,
        author: &author,
        twitter: args.twitter.as_deref(),
        category: args.category.as_deref(),
        date: Utc::now(),
    };
    let text = format!("{}{}", render_header(&post), render_body());

    let slug = slug_from_title(&args.title);
    if slug.is_empty() {
        bail!("Could not derive a file name from the title {:?}", args.title);
    }

    let content_dir = config.paths.content_dir;
    let full_path = match args.output {
        PostOutput::Stdout => {
            println!("{}", text);
            return Ok(());
        }
        PostOutput::File => content_dir.join(format!("{}.md", slug)),
        PostOutput::Dir => content_dir.join(&slug).join("index.md"),
    };

    if full_path.exists() {
        bail!("{} already exists", full_path.display());
    }
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Error creating directory {}", parent.display()))?;
    }
    fs::write(&full_path, text)
        .with_context(|| format!("Error writing {}", full_path.display()))?;
    info!("Created post {}", full_path.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match open_config(cli.config_path) {
        Ok(config) => config,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("Please run postfeed --help");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let result = match cli.command {
        Command::Build(args) => build_cmd(config, args),
        Command::List(args) => list_cmd(config, args),
        Command::New(args) => new_cmd(config, args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
