//! docnav 命令行入口
//!
//! - `page`: 处理单个页面并写出 JSON 上下文
//! - `nav`: 打印导航树 JSON
//! - `rewrite`: 打印处理后的正文
//! - `finish`: 写出全局上下文
//! - `env`: 打印支持的环境变量

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docnav::env::{generate_env_docs, EnvConfig};
use docnav::parsers::html::decode_html;
use docnav::utils::url::page_path;
use docnav::{
    convert_nav_html_to_json, process_body, BuildConfig, ContextBuilder, DocnavResult,
    JsonBuilder, PageProcessor,
};

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";

#[derive(Parser)]
#[command(name = "docnav")]
#[command(version, about = "Turns rendered documentation HTML into client-side navigation data", long_about = None)]
struct Cli {
    /// Configuration file path (falls back to DOCNAV_CONFIG, then ./docnav.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one page and write its JSON context
    Page {
        /// Page name, e.g. `guides/install` or `guides/index`
        #[arg(short, long)]
        page: String,

        /// Rendered sidebar navigation fragment
        #[arg(long)]
        nav: PathBuf,

        /// Rendered page body fragment
        #[arg(long)]
        body: PathBuf,

        /// Output directory (overrides the config and DOCNAV_OUTDIR)
        #[arg(short, long)]
        outdir: Option<PathBuf>,

        /// Print the context to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Print the navigation tree of a sidebar fragment as JSON
    Nav {
        /// Rendered sidebar navigation fragment
        path: PathBuf,
    },

    /// Print a page body after re-encoding and link rewriting
    Rewrite {
        /// Page name used as the origin of relative links
        #[arg(short, long)]
        page: String,

        /// Rendered page body fragment
        path: PathBuf,
    },

    /// Write the global context once every page has been processed
    Finish {
        /// Names of the pages in the build
        pages: Vec<String>,

        /// Output directory (overrides the config and DOCNAV_OUTDIR)
        #[arg(short, long)]
        outdir: Option<PathBuf>,
    },

    /// Print the environment variables docnav reads
    Env,
}

fn main() {
    let cli = Cli::parse();

    // 不读取环境变量，变量值无效时也能查看说明
    if matches!(cli.command, Commands::Env) {
        print!("{}", generate_env_docs());
        return;
    }

    dotenv::dotenv().ok();

    let env = match EnvConfig::from_env() {
        Ok(env) => env,
        Err(e) => {
            print_error_message(&e.to_string(), false);
            process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&env.log_level))
        .with_writer(io::stderr)
        .with_ansi(!env.no_color)
        .init();

    if let Err(e) = run(cli, &env) {
        print_error_message(&e.to_string(), env.no_color);
        process::exit(1);
    }
}

fn run(cli: Cli, env: &EnvConfig) -> DocnavResult<()> {
    let mut config = BuildConfig::load(cli.config.as_deref(), env)?;

    match cli.command {
        Commands::Page {
            page,
            nav,
            body,
            outdir,
            stdout,
        } => {
            if let Some(outdir) = outdir {
                config.outdir = outdir;
            }

            let processor = PageProcessor::new(&config);
            let context = processor.process_page_bytes(&page, &fs::read(&nav)?, &fs::read(&body)?)?;

            if stdout {
                print_json(&context)?;
            } else {
                JsonBuilder::new(&config.outdir).write_page(&context)?;
            }
        }
        Commands::Nav { path } => {
            let tree = convert_nav_html_to_json(&read_html(&path, &config)?)?;
            print_json(&tree)?;
        }
        Commands::Rewrite { page, path } => {
            let body = process_body(
                &read_html(&path, &config)?,
                page_path(&page),
                &config.link_mappings,
            )?;
            io::stdout().write_all(body.as_bytes())?;
        }
        Commands::Finish { pages, outdir } => {
            if let Some(outdir) = outdir {
                config.outdir = outdir;
            }

            let context =
                PageProcessor::new(&config).global_context(pages.iter().map(String::as_str));
            JsonBuilder::new(&config.outdir).write_global_context(&context)?;
        }
        Commands::Env => {}
    }

    Ok(())
}

fn read_html(path: &Path, config: &BuildConfig) -> DocnavResult<String> {
    Ok(decode_html(&fs::read(path)?, &config.encoding))
}

fn print_json<T: serde::Serialize>(value: &T) -> DocnavResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn print_error_message(msg: &str, no_color: bool) {
    if no_color {
        eprintln!("{msg}");
    } else {
        eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
    }
}
