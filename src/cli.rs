use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Fetch a platform-matching release binary from your GitHub repositories"
)]
pub struct Args {
    /// Repository name pattern (case-insensitive substring, empty = all repos)
    pub pattern: Option<String>,

    /// Release tag pattern (case-insensitive substring); defaults to the latest release
    pub version: Option<String>,

    /// GitHub personal access token (overrides the GH_TOKEN environment variable)
    #[arg(long)]
    pub token: Option<String>,

    /// Search owned public repositories instead of private ones
    #[arg(long)]
    pub public: bool,
}
