// ABOUTME: Entry point for the stevedore CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use std::env;
use std::path::Path;
use stevedore::cloud::GcloudCli;
use stevedore::config::{CONFIG_FILENAME, Config, DEFAULT_CONTEXT_PATH, DEFAULT_DOCKERFILE_PATH};
use stevedore::dockerfile::FsDockerfileInspector;
use stevedore::error::{Error, Result};
use stevedore::output::{Output, OutputMode};
use stevedore::prompt::TermPrompter;
use stevedore::registry::DockerRegistryClient;
use stevedore::resolve::{self, ResolveContext, ResolveError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let output = Output::new(if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    });

    if let Err(e) = run(cli, &output).await {
        // Aborted prompts exit quietly, everything else gets an error banner.
        if !matches!(e, Error::Resolve(ResolveError::Aborted)) {
            output.error(&e.to_string());
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    match cli.command {
        Commands::Init {
            image,
            dockerfile,
            context,
            key,
        } => init(image, dockerfile, context, &key, output).await,
        Commands::AddImage {
            key,
            name,
            tag,
            context,
            dockerfile,
            builder,
        } => {
            let cwd = env::current_dir()?;
            let mut config = Config::load_or_default(&cwd)?;
            config.add_image(
                &key,
                &name,
                tag.as_deref(),
                context.as_deref(),
                dockerfile.as_deref(),
                builder.as_deref(),
            )?;
            config.save(&cwd)?;
            output.success(&format!("Added image {key}"));
            Ok(())
        }
        Commands::RemoveImage { all, names } => {
            let cwd = env::current_dir()?;
            let mut config = Config::load_or_default(&cwd)?;
            config.remove_images(all, &names)?;
            config.save(&cwd)?;
            output.success("Removed image(s)");
            Ok(())
        }
    }
}

/// Resolve the image configuration and persist it under `key`.
async fn init(
    image: Option<String>,
    dockerfile: Option<String>,
    context: Option<String>,
    key: &str,
    output: &Output,
) -> Result<()> {
    let cwd = env::current_dir()?;

    let image_name = image.unwrap_or_else(|| {
        cwd.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| "app".to_string())
    });

    // Auto-detect the conventional Dockerfile when none was given.
    let dockerfile = dockerfile.unwrap_or_else(|| {
        if Path::new(DEFAULT_DOCKERFILE_PATH).exists() {
            DEFAULT_DOCKERFILE_PATH.to_string()
        } else {
            String::new()
        }
    });
    let context = context.unwrap_or_else(|| DEFAULT_CONTEXT_PATH.to_string());

    let image_config = if dockerfile.is_empty() {
        resolve::prebuilt_image_config(&image_name, &dockerfile, &context)
    } else {
        let registry = DockerRegistryClient::connect()
            .map_err(|e| ResolveError::ClientUnavailable(e.to_string()))?;
        let prompter = TermPrompter::new();
        let inspector = FsDockerfileInspector::new();
        let projects = GcloudCli::new();

        let ctx = ResolveContext {
            prompter: &prompter,
            registry: &registry,
            inspector: &inspector,
            projects: &projects,
            output,
        };

        resolve::build_image_config(&ctx, &image_name, &dockerfile, &context).await?
    };

    let mut config = Config::load_or_default(&cwd)?;
    config.images.insert(key.to_string(), image_config);
    config.save(&cwd)?;

    output.success(&format!("Saved image configuration to {CONFIG_FILENAME}"));
    Ok(())
}
