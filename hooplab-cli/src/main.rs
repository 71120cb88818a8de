//! HoopLab CLI — accounts, build submission, feed browsing, LFG board.
//!
//! Commands:
//! - `signup` / `login` / `logout` — account and session management
//! - `submit` — validate and publish a build from a TOML draft file
//! - `show` — build detail: attributes, percentile line, category breakdown
//! - `feed` — most-liked (default) or newest builds
//! - `like` / `unlike` / `delete` — build actions
//! - `lfg post|list|delete` — the looking-for-group board
//! - `profile` / `gamertag` — account page
//! - `template` — print a starter draft TOML
//! - `export` — build catalog as CSV

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use hooplab_core::aggregate::category_breakdown;
use hooplab_core::compare::{overall_percentile, DEFAULT_RANKED_FIELDS};
use hooplab_core::domain::{format_height, Build, BuildDraft, BuildId, GameMode, PostId};
use hooplab_core::store::{DocumentStore, JsonStore};
use hooplab_service::{
    export_builds_csv, Authenticator, BuildService, Feed, HoopLabConfig, LfgService,
    ProfileService, RankCache, Session, SessionFile,
};

#[derive(Parser)]
#[command(name = "hooplab", about = "HoopLab — share, rank, and scout builds")]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in.
    Signup {
        email: String,
        password: String,
    },
    /// Sign in to an existing account.
    Login {
        email: String,
        password: String,
    },
    /// Sign out.
    Logout,
    /// Show your gamertag, builds, and posts.
    Profile,
    /// Change your gamertag (future submissions pick it up).
    Gamertag {
        tag: String,
    },
    /// Validate and publish a build from a TOML draft file.
    Submit {
        /// Draft file; start from `hooplab template`.
        #[arg(long)]
        file: PathBuf,

        /// Gamertag to submit under. Required on your first submission.
        #[arg(long)]
        gamertag: Option<String>,
    },
    /// Print a starter draft TOML to stdout.
    Template,
    /// Build detail: attributes, percentile, category breakdown.
    Show {
        build_id: String,
    },
    /// Delete one of your builds.
    Delete {
        build_id: String,
    },
    /// Like a build.
    Like {
        build_id: String,
    },
    /// Withdraw a like.
    Unlike {
        build_id: String,
    },
    /// Browse builds: most liked by default, newest with --newest.
    Feed {
        #[arg(long, default_value_t = false)]
        newest: bool,

        /// Page size. Defaults come from the config file.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Looking-for-group board.
    Lfg {
        #[command(subcommand)]
        action: LfgAction,
    },
    /// Export the build catalog as CSV.
    Export {
        #[arg(long, default_value = "builds.csv")]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum LfgAction {
    /// Publish a post. You can hold one live post at a time.
    Post {
        /// Team size: 2s, 3s, or 5s.
        mode: GameMode,
        content: String,
    },
    /// Show the board.
    List,
    /// Delete your live post.
    Delete {
        post_id: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => HoopLabConfig::load(path)?,
        None => HoopLabConfig::default(),
    };
    let store = JsonStore::open(&config.data_dir)
        .with_context(|| format!("opening data directory {}", config.data_dir.display()))?;
    let session_file = SessionFile::new(&config.session_file);

    match cli.command {
        Commands::Signup { email, password } => run_signup(&store, &session_file, &email, &password),
        Commands::Login { email, password } => run_login(&store, &session_file, &email, &password),
        Commands::Logout => {
            session_file.clear()?;
            println!("Signed out.");
            Ok(())
        }
        Commands::Profile => run_profile(&store, &session_file),
        Commands::Gamertag { tag } => run_gamertag(&store, &session_file, &tag),
        Commands::Submit { file, gamertag } => {
            run_submit(&store, &session_file, &file, gamertag.as_deref())
        }
        Commands::Template => run_template(),
        Commands::Show { build_id } => run_show(&store, &session_file, &build_id),
        Commands::Delete { build_id } => run_delete(&store, &session_file, &build_id),
        Commands::Like { build_id } => run_like(&store, &session_file, &build_id, true),
        Commands::Unlike { build_id } => run_like(&store, &session_file, &build_id, false),
        Commands::Feed { newest, limit } => run_feed(&store, &config, newest, limit),
        Commands::Lfg { action } => run_lfg(&store, &session_file, &config, action),
        Commands::Export { out } => run_export(&store, &out),
    }
}

/// Load the signed-in session or fail with a pointer to `login`.
fn require_session(session_file: &SessionFile) -> Result<Session> {
    match session_file.load() {
        Some(session) => Ok(session),
        None => bail!("not signed in — run `hooplab login <email> <password>` first"),
    }
}

fn run_signup(
    store: &dyn DocumentStore,
    session_file: &SessionFile,
    email: &str,
    password: &str,
) -> Result<()> {
    let session = Authenticator::new(store).sign_up(email, password)?;
    session_file.save(&session)?;
    println!("Account created. Signed in as {}.", session.email);
    Ok(())
}

fn run_login(
    store: &dyn DocumentStore,
    session_file: &SessionFile,
    email: &str,
    password: &str,
) -> Result<()> {
    let session = Authenticator::new(store).sign_in(email, password)?;
    session_file.save(&session)?;
    println!("Signed in as {}.", session.email);
    Ok(())
}

fn run_profile(store: &dyn DocumentStore, session_file: &SessionFile) -> Result<()> {
    let session = require_session(session_file)?;
    let view = ProfileService::new(store).view(&session)?;

    println!("Email:    {}", view.email);
    let tag = if view.gamertag.is_empty() {
        "(not set)"
    } else {
        view.gamertag.as_str()
    };
    println!("Gamertag: {tag}");
    println!(
        "You have {} {}.",
        view.build_count(),
        if view.build_count() == 1 { "build" } else { "builds" }
    );
    for build in &view.builds {
        print_build_line(build);
    }
    if !view.posts.is_empty() {
        println!("Your posts:");
        let now = Utc::now();
        for post in &view.posts {
            println!(
                "  [{}] {} ({}, {})",
                post.id,
                post.content,
                post.mode,
                post.age_label(now)
            );
        }
    }
    Ok(())
}

fn run_gamertag(store: &dyn DocumentStore, session_file: &SessionFile, tag: &str) -> Result<()> {
    let session = require_session(session_file)?;
    ProfileService::new(store).set_gamertag(&session, tag)?;
    println!("Gamertag updated to {tag}.");
    Ok(())
}

fn run_template() -> Result<()> {
    let template = toml::to_string_pretty(&BuildDraft::default())
        .context("serializing draft template")?;
    println!("{template}");
    Ok(())
}

fn run_submit(
    store: &dyn DocumentStore,
    session_file: &SessionFile,
    file: &PathBuf,
    gamertag: Option<&str>,
) -> Result<()> {
    let session = require_session(session_file)?;
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading draft file {}", file.display()))?;
    let draft: BuildDraft =
        toml::from_str(&content).with_context(|| format!("parsing {}", file.display()))?;

    let build = BuildService::new(store).submit(&session, &draft, gamertag)?;
    println!("Build {} submitted.", build.id);
    print_build_line(&build);
    Ok(())
}

fn run_show(store: &dyn DocumentStore, session_file: &SessionFile, build_id: &str) -> Result<()> {
    let id = BuildId::new(build_id);
    let build = store.build(&id)?;

    println!("Position: {}", build.position);
    println!("Height:   {}", format_height(build.height));
    println!("Weight:   {} lbs", build.weight);
    println!("Wingspan: {}", format_height(build.wingspan));
    println!("Role:     {}", build.role);
    println!("Uploader: {}", build.gamertag);
    println!("Likes:    {}", build.likes);
    println!();

    for slice in category_breakdown(&build)? {
        println!("{:<11} {:>4}  ({})", slice.label, slice.value, slice.color);
    }
    println!();
    for (name, value) in build.attributes.entries() {
        println!("  {name:<18} {value:>3}");
    }
    println!();

    // Whose build is it? Matches the detail page's "Your build" phrasing.
    let owner_word = match session_file.load() {
        Some(session) if session.user_id == build.user_id => "Your",
        _ => "This",
    };
    let peers = store.peers_by_position(build.position)?;
    let report = overall_percentile(&build, &peers, &DEFAULT_RANKED_FIELDS)?;
    println!(
        "{owner_word} build ranks in the {:.2}th percentile among other {}s.",
        report.overall, build.position
    );
    Ok(())
}

fn run_delete(store: &dyn DocumentStore, session_file: &SessionFile, build_id: &str) -> Result<()> {
    let session = require_session(session_file)?;
    BuildService::new(store).delete(&session, &BuildId::new(build_id))?;
    println!("Build {build_id} deleted.");
    Ok(())
}

fn run_like(
    store: &dyn DocumentStore,
    session_file: &SessionFile,
    build_id: &str,
    like: bool,
) -> Result<()> {
    let session = require_session(session_file)?;
    let service = BuildService::new(store);
    let id = BuildId::new(build_id);
    let likes = if like {
        service.like(&session, &id)?
    } else {
        service.unlike(&session, &id)?
    };
    println!("Build {build_id} now has {likes} like{}.", if likes == 1 { "" } else { "s" });
    Ok(())
}

fn run_feed(
    store: &dyn DocumentStore,
    config: &HoopLabConfig,
    newest: bool,
    limit: Option<usize>,
) -> Result<()> {
    let cache = RankCache::new();
    let feed = Feed::with_cache(store, &cache);
    let cards = if newest {
        println!("Newest Builds");
        feed.newest(limit.unwrap_or(config.newest_limit))?
    } else {
        println!("Most Liked Builds");
        feed.most_liked(limit.unwrap_or(config.most_liked_limit))?
    };

    if cards.is_empty() {
        println!("No builds found.");
        return Ok(());
    }
    for card in cards {
        print_build_line(&card.build);
        if let Some(report) = card.percentile {
            println!("      percentile {:.2} among {} peers", report.overall, report.peer_count);
        }
    }
    Ok(())
}

fn run_lfg(
    store: &dyn DocumentStore,
    session_file: &SessionFile,
    config: &HoopLabConfig,
    action: LfgAction,
) -> Result<()> {
    let session = require_session(session_file)?;
    let service = LfgService::new(store);

    // The board only ever shows live posts.
    service.purge_expired(Duration::minutes(config.lfg_ttl_minutes), Utc::now())?;

    match action {
        LfgAction::Post { mode, content } => {
            let post = service.post(&session, mode, &content)?;
            println!("Posted [{}]: {} ({})", post.id, post.content, post.mode);
        }
        LfgAction::List => {
            let board = service.board(&session)?;
            println!("People Looking: {}", board.total);
            if let Some(own) = board.own {
                println!("Your post [{}]: {} ({})", own.id, own.content, own.mode);
            }
            let now = Utc::now();
            for post in board.others {
                println!(
                    "  {} — {} ({}, {})",
                    post.gamertag, post.content, post.mode, post.age_label(now)
                );
            }
        }
        LfgAction::Delete { post_id } => {
            service.delete(&session, &PostId::new(post_id.clone()))?;
            println!("Post {post_id} deleted.");
        }
    }
    Ok(())
}

fn run_export(store: &dyn DocumentStore, out: &PathBuf) -> Result<()> {
    let builds = store.builds()?;
    let csv = export_builds_csv(&builds)?;
    std::fs::write(out, csv).with_context(|| format!("writing {}", out.display()))?;
    println!("Exported {} builds to {}.", builds.len(), out.display());
    Ok(())
}

fn print_build_line(build: &Build) {
    println!(
        "  [{}] {} {} | {} {} lbs ws {} | {} | {} likes",
        build.id,
        build.position,
        build.role,
        format_height(build.height),
        build.weight,
        format_height(build.wingspan),
        build.gamertag,
        build.likes
    );
}
