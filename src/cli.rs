// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stevedore")]
#[command(about = "Interactive container image configuration for deployment tools")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output for CI
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the image configuration for this project and write stevedore.yml
    Init {
        /// Image name to seed the resolution (defaults to the directory name)
        #[arg(short, long)]
        image: Option<String>,

        /// Path to the Dockerfile (omit to auto-detect, "" forces pre-built mode)
        #[arg(short, long)]
        dockerfile: Option<String>,

        /// Build context path
        #[arg(short, long)]
        context: Option<String>,

        /// Key under which the image is stored in the configuration
        #[arg(short, long, default_value = "default")]
        key: String,
    },

    /// Add an image entry to the configuration
    AddImage {
        /// Key under which the image is stored
        key: String,

        /// Image repository name
        name: String,

        #[arg(long)]
        tag: Option<String>,

        #[arg(long)]
        context: Option<String>,

        #[arg(long)]
        dockerfile: Option<String>,

        /// Builder to use (docker|kaniko)
        #[arg(long)]
        builder: Option<String>,
    },

    /// Remove image entries from the configuration
    RemoveImage {
        /// Remove all images
        #[arg(long)]
        all: bool,

        /// Keys of the images to remove
        names: Vec<String>,
    },
}
