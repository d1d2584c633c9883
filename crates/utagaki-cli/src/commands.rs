use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use colored::Colorize;
use tracing::debug;
use utagaki_session::{SessionConfig, SessionStore};
use utagaki_snapshot::FileSnapshotStore;
use utagaki_types::{MatchId, Participant, ParticipantId, ReplyId, Verse, VerseId, VerseStatus};

use crate::cli::*;

type Store = SessionStore<FileSnapshotStore>;

const DEFAULT_DATA_DIR: &str = ".utagaki";

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let store = open_store(cli.data_dir.as_deref(), cli.config.as_deref())?;
    match cli.command {
        Command::Register(args) => cmd_register(&store, args),
        Command::Login(args) => cmd_login(&store, args),
        Command::Logout => {
            store.logout()?;
            println!("{} Logged out.", "✓".green());
            Ok(())
        }
        Command::Whoami => cmd_whoami(&store),
        Command::Users => cmd_users(&store),
        Command::Compose(args) => cmd_compose(&store, args),
        Command::River => cmd_river(&store),
        Command::Mine => cmd_mine(&store),
        Command::Reply(args) => cmd_reply(&store, args),
        Command::Replies(args) => cmd_replies(&store, args),
        Command::Bind(args) => cmd_bind(&store, args),
        Command::Matches => cmd_matches(&store),
        Command::Send(args) => cmd_send(&store, args),
        Command::Chat(args) => cmd_chat(&store, args),
        Command::History => cmd_history(&store),
    }
}

/// Open the file-backed store.
///
/// The directory comes from `--data-dir`, then the config file, then
/// `.utagaki`. Without a config file the river is seeded with sample verses.
fn open_store(data_dir: Option<&Path>, config_path: Option<&Path>) -> anyhow::Result<Store> {
    let config = match config_path {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SessionConfig {
            seed_sample_verses: true,
            ..SessionConfig::default()
        },
    };
    let dir = data_dir
        .map(Path::to_path_buf)
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    debug!(dir = %dir.display(), prefix = %config.key_prefix, "opening snapshot");

    let snapshot = FileSnapshotStore::open(&dir)
        .with_context(|| format!("opening data directory {}", dir.display()))?;
    Ok(SessionStore::open(snapshot, config)?)
}

fn require_session(store: &Store) -> anyhow::Result<Participant> {
    store
        .current_session()?
        .ok_or_else(|| anyhow!("nobody is logged in; run `utagaki register` or `utagaki login` first"))
}

/// Pick the one id whose full form starts with `raw`.
fn resolve<Id: Copy + Display>(
    kind: &str,
    raw: &str,
    candidates: impl IntoIterator<Item = Id>,
) -> anyhow::Result<Id> {
    let raw = raw.trim().to_ascii_lowercase();
    if raw.is_empty() {
        bail!("empty {kind} id");
    }
    let found: Vec<Id> = candidates
        .into_iter()
        .filter(|id| id.to_string().starts_with(&raw))
        .collect();
    match found.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no {kind} matches '{raw}'"),
        _ => bail!("'{raw}' is ambiguous: {} {kind}s match", found.len()),
    }
}

fn resolve_participant(store: &Store, raw: &str) -> anyhow::Result<ParticipantId> {
    resolve("participant", raw, store.participants()?.iter().map(|p| p.id))
}

fn resolve_verse(store: &Store, raw: &str) -> anyhow::Result<VerseId> {
    resolve("verse", raw, store.verses()?.iter().map(|v| v.id))
}

fn resolve_reply(store: &Store, verse_id: &VerseId, raw: &str) -> anyhow::Result<ReplyId> {
    resolve("reply", raw, store.replies_for_verse(verse_id)?.iter().map(|r| r.id))
}

fn resolve_match(store: &Store, me: &ParticipantId, raw: &str) -> anyhow::Result<MatchId> {
    resolve("match", raw, store.matches_for_participant(me)?.iter().map(|m| m.id))
}

fn print_participant(p: &Participant) {
    println!("{}  {} ({})", p.id.short_id().yellow(), p.display_name.bold(), p.gender);
}

fn print_verse(verse: &Verse) {
    let status = match verse.status {
        VerseStatus::Open => "open".green(),
        VerseStatus::Matched => "matched".magenta(),
        VerseStatus::Expired => "expired".dimmed(),
    };
    println!(
        "{}  [{}] {}  by {}",
        verse.id.short_id().yellow().bold(),
        verse.variant.as_str().cyan(),
        status,
        verse.author.display_name,
    );
    println!("    {}", verse.content);
}

fn cmd_register(store: &Store, args: RegisterArgs) -> anyhow::Result<()> {
    let p = store.register(&args.name, args.gender)?;
    println!("{} Registered and logged in", "✓".green().bold());
    println!("  Name: {}", p.display_name.bold());
    println!("  Id: {}", p.id.to_string().yellow());
    Ok(())
}

fn cmd_login(store: &Store, args: LoginArgs) -> anyhow::Result<()> {
    let id = resolve_participant(store, &args.id)?;
    let p = store.login(&id)?;
    println!("{} Logged in as {}", "✓".green().bold(), p.display_name.bold());
    Ok(())
}

fn cmd_whoami(store: &Store) -> anyhow::Result<()> {
    match store.current_session()? {
        Some(p) => print_participant(&p),
        None => println!("Not logged in."),
    }
    Ok(())
}

fn cmd_users(store: &Store) -> anyhow::Result<()> {
    let roster = store.participants()?;
    if roster.is_empty() {
        println!("No participants yet.");
    }
    let me = store.current_session()?.map(|p| p.id);
    for p in &roster {
        let marker = if Some(p.id) == me { "*".green().bold() } else { " ".normal() };
        print!("{marker} ");
        print_participant(p);
    }
    Ok(())
}

fn cmd_compose(store: &Store, args: ComposeArgs) -> anyhow::Result<()> {
    let me = require_session(store)?;
    let verse = store.add_verse(&args.content, &me, args.variant.as_deref())?;
    println!("{} Verse posted", "✓".green().bold());
    print_verse(&verse);
    Ok(())
}

fn cmd_river(store: &Store) -> anyhow::Result<()> {
    let verses = store.verses()?;
    if verses.is_empty() {
        println!("The river is empty.");
    }
    for verse in &verses {
        print_verse(verse);
    }
    Ok(())
}

fn cmd_mine(store: &Store) -> anyhow::Result<()> {
    let me = require_session(store)?;
    let verses = store.verses_by_author(&me.id)?;
    if verses.is_empty() {
        println!("You have not posted any verses.");
    }
    for verse in &verses {
        print_verse(verse);
        for reply in store.replies_for_verse(&verse.id)? {
            let bound = if store.match_for_reply(&reply.id)?.is_some() {
                " (bound)".magenta()
            } else {
                "".normal()
            };
            println!(
                "      {} {}: {}{}",
                reply.id.short_id().yellow(),
                reply.author.display_name.bold(),
                reply.content,
                bound
            );
        }
    }
    Ok(())
}

fn cmd_reply(store: &Store, args: ReplyArgs) -> anyhow::Result<()> {
    let me = require_session(store)?;
    let verse_id = resolve_verse(store, &args.verse)?;
    let reply = store.add_reply(&verse_id, &args.content, &me)?;
    println!("{} Reply sent", "✓".green().bold());
    println!("  Reply: {}", reply.id.short_id().yellow());
    Ok(())
}

fn cmd_replies(store: &Store, args: VerseArgs) -> anyhow::Result<()> {
    let verse_id = resolve_verse(store, &args.verse)?;
    let replies = store.replies_for_verse(&verse_id)?;
    if replies.is_empty() {
        println!("No replies yet.");
    }
    for reply in &replies {
        println!(
            "{}  {}: {}",
            reply.id.short_id().yellow(),
            reply.author.display_name.bold(),
            reply.content
        );
    }
    Ok(())
}

fn cmd_bind(store: &Store, args: BindArgs) -> anyhow::Result<()> {
    let me = require_session(store)?;
    let verse_id = resolve_verse(store, &args.verse)?;
    let verse = store
        .verse(&verse_id)?
        .ok_or_else(|| anyhow!("verse {verse_id} disappeared"))?;
    if verse.author.id != me.id {
        bail!("only the author of a verse can bind a reply to it");
    }
    let reply_id = resolve_reply(store, &verse_id, &args.reply)?;

    let outcome = store.create_match(&verse_id, &reply_id)?;
    if outcome.created {
        println!("{} Matched", "✓".green().bold());
    } else {
        println!("Already matched with this participant.");
    }
    println!("  Match: {}", outcome.match_id.short_id().yellow());
    Ok(())
}

fn cmd_matches(store: &Store) -> anyhow::Result<()> {
    let me = require_session(store)?;
    let matches = store.matches_for_participant(&me.id)?;
    if matches.is_empty() {
        println!("No matches yet.");
    }
    for record in &matches {
        let view = store.match_view(&record.id, &me.id)?;
        let partner = view
            .partner
            .map(|p| p.display_name)
            .unwrap_or_else(|| "?".into());
        let messages = store.messages_for_match(&record.id)?.len();
        println!(
            "{}  with {}  ({} messages)",
            record.id.short_id().yellow().bold(),
            partner.bold(),
            messages
        );
        println!("    {}", view.verse.content);
        println!("    {}", view.reply.content.italic());
    }
    Ok(())
}

fn cmd_send(store: &Store, args: SendArgs) -> anyhow::Result<()> {
    let me = require_session(store)?;
    let match_id = resolve_match(store, &me.id, &args.match_id)?;
    store.send_message(&match_id, &me.id, &args.content)?;
    println!("{} Sent", "✓".green());
    Ok(())
}

fn cmd_chat(store: &Store, args: ChatArgs) -> anyhow::Result<()> {
    let me = require_session(store)?;
    let match_id = resolve_match(store, &me.id, &args.match_id)?;
    let view = store.match_view(&match_id, &me.id)?;
    let partner = view.partner.unwrap_or_else(|| view.verse.author.clone());
    println!("Chat with {}", partner.display_name.bold());

    let messages = store.messages_for_match(&match_id)?;
    if messages.is_empty() {
        println!("  No messages yet.");
    }
    for message in &messages {
        let who = if message.sender_id == me.id {
            "you".green().bold()
        } else {
            partner.display_name.as_str().cyan().bold()
        };
        println!("  {}: {}", who, message.content);
    }
    Ok(())
}

fn cmd_history(store: &Store) -> anyhow::Result<()> {
    let me = require_session(store)?;
    let replies = store.replies_by_author(&me.id)?;
    if replies.is_empty() {
        println!("You have not replied to any verses.");
    }
    for reply in &replies {
        let verse = store.verse(&reply.verse_id)?;
        let state = match store.match_for_reply(&reply.id)? {
            Some(m) => format!("matched {}", m.id.short_id()).magenta(),
            None => "waiting".dimmed(),
        };
        match verse {
            Some(verse) => println!("{}  {}", verse.author.display_name.bold(), verse.content),
            None => println!("{}", "(verse missing)".dimmed()),
        }
        println!("    {}  [{}]", reply.content, state);
    }
    Ok(())
}
