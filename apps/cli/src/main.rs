//! Archive administration CLI
//!
//! Applies migrations and seeds demo data without starting the HTTP server.
//! Useful for deployment pipelines and local setup.

use anyhow::Context;
use clap::{Parser, Subcommand};
use gamearchive::{logging, Config};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "archive-cli")]
#[command(about = "Massive Game Archive administration tool", long_about = None)]
struct Cli {
    /// Connection string; overrides the configured database.url
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Insert the demo dataset: vocabularies, users, games and votes (idempotent)
    Seed,
}

/// Age brackets the archive ships with. Admins can add more rows directly;
/// the API only reads this table.
const AGE_GROUPS: [(&str, Option<i32>, Option<i32>); 5] = [
    ("toddlers", Some(2), Some(4)),
    ("kids", Some(5), Some(9)),
    ("preteens", Some(10), Some(12)),
    ("teens", Some(13), Some(17)),
    ("adults", Some(18), None),
];

/// Starter tags. Unlike age groups, tags also grow organically as games
/// are published.
const TAGS: [&str; 8] = [
    "outdoor",
    "indoor",
    "ball-game",
    "icebreaker",
    "water",
    "quiet",
    "team-building",
    "no-material",
];

const USERS: [&str; 3] = ["alice", "bob", "carol"];

struct DemoGame {
    title: &'static str,
    slug: &'static str,
    short_description: &'static str,
    markdown_content: &'static str,
    creator: &'static str,
    // difficulty, group size, preparation, physical, duration
    indexes: [i32; 5],
    tags: &'static [&'static str],
    age_groups: &'static [&'static str],
    // (voter, value)
    votes: &'static [(&'static str, i16)],
}

const DEMO_GAMES: [DemoGame; 5] = [
    DemoGame {
        title: "Capture the Flag",
        slug: "capture-the-flag",
        short_description: "Two teams race to steal each other's flag.",
        markdown_content: "# Capture the Flag\n\nSplit into two teams, mark two territories and \
                           hide one flag in each. A player tagged on enemy ground is frozen \
                           until a teammate frees them. First team to carry the enemy flag \
                           home wins.",
        creator: "alice",
        indexes: [3, 8, 2, 7, 5],
        tags: &["outdoor", "team-building"],
        age_groups: &["kids", "preteens", "teens"],
        votes: &[("bob", 1), ("carol", 1)],
    },
    DemoGame {
        title: "Sardines",
        slug: "sardines",
        short_description: "Hide and seek in reverse: one hides, everyone seeks.",
        markdown_content: "# Sardines\n\nOne player hides while the rest count. Whoever finds \
                           the hider squeezes into the same spot. The last seeker standing \
                           hides next round.",
        creator: "alice",
        indexes: [1, 5, 1, 4, 4],
        tags: &["indoor", "no-material", "quiet"],
        age_groups: &["kids", "preteens"],
        votes: &[("bob", 1)],
    },
    DemoGame {
        title: "Werewolf",
        slug: "werewolf",
        short_description: "A village hunts the werewolves hiding among them.",
        markdown_content: "# Werewolf\n\nEach player secretly draws a role. By night the \
                           werewolves pick a victim; by day the village debates and votes \
                           someone out. The game ends when one side is eliminated.",
        creator: "bob",
        indexes: [6, 9, 3, 1, 8],
        tags: &["indoor", "quiet", "no-material"],
        age_groups: &["teens", "adults"],
        votes: &[("alice", 1), ("carol", -1)],
    },
    DemoGame {
        title: "Water Balloon Relay",
        slug: "water-balloon-relay",
        short_description: "Relay race with very fragile batons.",
        markdown_content: "# Water Balloon Relay\n\nTeams line up and pass a filled water \
                           balloon down the line over heads and between legs. A burst balloon \
                           restarts the lap. Fastest dry-ish team wins.",
        creator: "carol",
        indexes: [2, 7, 5, 8, 3],
        tags: &["outdoor", "water", "ball-game"],
        age_groups: &["kids", "preteens", "teens"],
        votes: &[("alice", 1), ("bob", 1)],
    },
    DemoGame {
        title: "Two Truths and a Lie",
        slug: "two-truths-and-a-lie",
        short_description: "Spot the invented fact about each player.",
        markdown_content: "# Two Truths and a Lie\n\nIn turn, each player states three facts \
                           about themselves, one of them false. The group votes on the lie \
                           before the teller resolves it.",
        creator: "bob",
        indexes: [1, 6, 1, 1, 3],
        tags: &["icebreaker", "indoor", "no-material", "quiet"],
        age_groups: &["teens", "adults"],
        votes: &[("carol", 1)],
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_simple_logging();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;
    let database_url = cli.database_url.unwrap_or(config.database.url);

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => {
            sqlx::migrate!("../server/migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations applied");
        }
        Commands::Seed => {
            seed_reference_data(&pool)
                .await
                .context("Failed to seed reference data")?;
            seed_demo_games(&pool)
                .await
                .context("Failed to seed demo games")?;
            tracing::info!(
                age_groups = AGE_GROUPS.len(),
                tags = TAGS.len(),
                users = USERS.len(),
                games = DEMO_GAMES.len(),
                "Demo dataset seeded"
            );
        }
    }

    Ok(())
}

async fn seed_reference_data(pool: &PgPool) -> anyhow::Result<()> {
    for (name, min_age, max_age) in AGE_GROUPS {
        sqlx::query(
            "INSERT INTO age_groups (name, min_age, max_age) VALUES ($1, $2, $3) ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .bind(min_age)
        .bind(max_age)
        .execute(pool)
        .await?;
    }

    for name in TAGS {
        sqlx::query("INSERT INTO tags (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }

    Ok(())
}

async fn seed_demo_games(pool: &PgPool) -> anyhow::Result<()> {
    for username in USERS {
        sqlx::query("INSERT INTO users (username) VALUES ($1) ON CONFLICT (username) DO NOTHING")
            .bind(username)
            .execute(pool)
            .await?;
    }

    for game in &DEMO_GAMES {
        sqlx::query(
            "INSERT INTO games (title, short_description, slug, markdown_content, creator_id, \
             difficulty_index, group_size_index, preperation_index, physical_index, duration_index) \
             SELECT $1, $2, $3, $4, u.id, $6, $7, $8, $9, $10 FROM users u WHERE u.username = $5 \
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(game.title)
        .bind(game.short_description)
        .bind(game.slug)
        .bind(game.markdown_content)
        .bind(game.creator)
        .bind(game.indexes[0])
        .bind(game.indexes[1])
        .bind(game.indexes[2])
        .bind(game.indexes[3])
        .bind(game.indexes[4])
        .execute(pool)
        .await?;

        // Re-running is a no-op above, so look the id up instead of RETURNING.
        let game_id = sqlx::query_scalar::<_, i32>("SELECT id FROM games WHERE slug = $1")
            .bind(game.slug)
            .fetch_one(pool)
            .await?;

        for tag in game.tags {
            sqlx::query(
                "INSERT INTO game_tags (game_id, tag_id) \
                 SELECT $1, t.id FROM tags t WHERE t.name = $2 ON CONFLICT DO NOTHING",
            )
            .bind(game_id)
            .bind(tag)
            .execute(pool)
            .await?;
        }

        for age_group in game.age_groups {
            sqlx::query(
                "INSERT INTO game_age_groups (game_id, age_group_id) \
                 SELECT $1, ag.id FROM age_groups ag WHERE ag.name = $2 ON CONFLICT DO NOTHING",
            )
            .bind(game_id)
            .bind(age_group)
            .execute(pool)
            .await?;
        }

        for (voter, value) in game.votes {
            sqlx::query(
                "INSERT INTO votes (game_id, user_id, value) \
                 SELECT $1, u.id, $3 FROM users u WHERE u.username = $2 \
                 ON CONFLICT (game_id, user_id) DO UPDATE SET value = EXCLUDED.value",
            )
            .bind(game_id)
            .bind(voter)
            .bind(value)
            .execute(pool)
            .await?;
        }
    }

    Ok(())
}
