use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use utagaki_types::Gender;

#[derive(Parser)]
#[command(
    name = "utagaki",
    about = "Utagaki — exchange poem halves and meet the one who completes yours",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the session snapshot
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// TOML file with session settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register a new participant and log in as them
    Register(RegisterArgs),
    /// Log in as a registered participant
    Login(LoginArgs),
    /// End the current session
    Logout,
    /// Show who is logged in
    Whoami,
    /// List registered participants
    Users,
    /// Post the upper half of a poem
    Compose(ComposeArgs),
    /// Show every verse, newest first
    River,
    /// Show your own verses and the replies they received
    Mine,
    /// Answer a verse with the lower half
    Reply(ReplyArgs),
    /// Show the replies to a verse
    Replies(VerseArgs),
    /// Bind a reply to one of your verses
    Bind(BindArgs),
    /// List your matches
    Matches,
    /// Send a message within a match
    Send(SendArgs),
    /// Show the messages of a match
    Chat(ChatArgs),
    /// Show the replies you have written
    History,
}

#[derive(Args)]
pub struct RegisterArgs {
    pub name: String,
    /// female (a) or male (b)
    #[arg(long, short)]
    pub gender: Gender,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Participant id or a unique prefix of it
    pub id: String,
}

#[derive(Args)]
pub struct ComposeArgs {
    pub content: String,
    /// Card style: matsu, take, ume, tsuki or mizu
    #[arg(long)]
    pub variant: Option<String>,
}

#[derive(Args)]
pub struct ReplyArgs {
    /// Verse id or a unique prefix of it
    pub verse: String,
    pub content: String,
}

#[derive(Args)]
pub struct VerseArgs {
    /// Verse id or a unique prefix of it
    pub verse: String,
}

#[derive(Args)]
pub struct BindArgs {
    /// Verse id or a unique prefix of it
    pub verse: String,
    /// Reply id or a unique prefix of it
    pub reply: String,
}

#[derive(Args)]
pub struct SendArgs {
    /// Match id or a unique prefix of it
    #[arg(value_name = "MATCH")]
    pub match_id: String,
    pub content: String,
}

#[derive(Args)]
pub struct ChatArgs {
    /// Match id or a unique prefix of it
    #[arg(value_name = "MATCH")]
    pub match_id: String,
}
