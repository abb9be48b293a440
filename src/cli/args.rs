//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// GrandPad feed archiver CLI.
#[derive(Parser, Debug)]
#[command(
    name = "grandpad-archiver",
    version,
    about = "Archive a GrandPad feed: posts, users and media",
    long_about = "Logs in to the GrandPad API, walks the whole feed from the newest post,\n\
                  dumps posts and users to JSON and downloads every attached photo or video."
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Base URL of the GrandPad API.
    #[arg(long = "api-url", env = "GRANDPAD_API_URL")]
    pub api_url: Option<String>,

    /// Account email address.
    #[arg(short, long, env = "GRANDPAD_EMAIL")]
    pub email: Option<String>,

    /// Account password.
    #[arg(short, long, env = "GRANDPAD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Folder for downloaded media.
    #[arg(short, long = "media-folder")]
    pub media_folder: Option<PathBuf>,

    /// Folder for the posts and users dumps.
    #[arg(short, long = "records-dir")]
    pub records_dir: Option<PathBuf>,

    /// Posts requested per feed page.
    #[arg(long)]
    pub limit: Option<u32>,

    /// Hide progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(api_url) = self.api_url {
            config.api.url = api_url;
        }

        if let Some(email) = self.email {
            config.account.email = email;
        }

        if let Some(password) = self.password {
            config.account.password = password;
        }

        if let Some(folder) = self.media_folder {
            config.output.media_folder = folder;
        }

        if let Some(dir) = self.records_dir {
            config.output.records_directory = Some(dir);
        }

        if let Some(limit) = self.limit {
            config.api.page_size = limit;
        }

        if self.quiet {
            config.output.show_progress = false;
        }
    }
}
