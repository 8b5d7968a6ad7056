use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "secret-santa")]
#[command(about = "Draws a secret gift assignment and emails every participant")]
pub struct CliConfig {
    /// Draw plan file (TOML): participants, template, organizer
    #[arg(long, default_value = "draw.toml")]
    pub input: String,

    /// Log messages instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
