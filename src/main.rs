//! Binary entrypoint for the `arise` CLI.
//!
//! Every command opens the saved game (applying the daily reset), performs
//! one action, prints the notifications it produced and exits.
//!
//! See the library crate docs for module-level details: `arise::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::info;
use uuid::Uuid;

use arise::config::{Config, DEFAULT_CONFIG_PATH};
use arise::game::dungeon::SetEdit;
use arise::game::history::PeriodSummary;
use arise::game::profile::equipped_item;
use arise::game::reveal::reveal;
use arise::game::{
    DrawCurrency, Game, GameStoreBuilder, StatKind, StdRandom, SystemClock,
};
use arise::validation::parse_set_spec;

#[derive(Parser)]
#[command(name = "arise")]
#[command(about = "Level up by completing habits and logging workouts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Show the player's status
    Status {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// List today's quests
    Quests,
    /// Complete a quest
    Complete { id: String },
    /// Add a custom habit quest
    AddQuest {
        title: String,
        #[arg(default_value = "")]
        description: String,
    },
    /// Remove a quest
    RemoveQuest { id: String },
    /// Spend a stat point (str, agi, vit, int, per)
    Invest { stat: String },
    /// Draw from the reward catalog
    Draw {
        #[arg(default_value_t = 1)]
        count: u32,
        /// Pay with essence stones instead of gold
        #[arg(long)]
        essence: bool,
    },
    /// List held cosmetics
    Inventory,
    /// Equip (or unequip) an inventory item by instance id
    Equip { instance: Uuid },
    /// Change display name and avatar
    Profile {
        name: String,
        #[arg(long, default_value = "")]
        avatar: String,
    },
    /// Register an exercise
    AddExercise { name: String, muscle: String },
    /// Define a workout plan
    AddPlan {
        name: String,
        #[arg(required = true)]
        exercises: Vec<String>,
    },
    /// Run a training session: `train default-full --set e1:0x20 --set e4:60x8`
    Train {
        plan: String,
        /// <exercise-id>:<weight>x<reps>
        #[arg(long = "set")]
        sets: Vec<String>,
    },
    /// Show archived training logs
    Logs,
    /// Edit one set of an archived log
    EditLog {
        log: Uuid,
        set: Uuid,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        reps: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init_logging(&None, cli.verbose);
        Config::create_default(&cli.config).await?;
        info!("Configuration file created at {}", cli.config);
        println!("Configuration written to {}", cli.config);
        return Ok(());
    }

    let config = Config::load_or_default(&cli.config).await?;
    init_logging(&Some(config.clone()), cli.verbose);

    let store = GameStoreBuilder::new(&config.storage.data_dir)
        .backend(config.storage.backend)
        .open()?;
    let mut game = Game::open(
        store,
        Box::new(SystemClock),
        Box::new(StdRandom::from_entropy()),
        &config.profile.default_username,
    )?;

    let outcome = run(&mut game, &config, cli.command).await;
    let notifications = game.drain_notifications();
    for message in &notifications {
        println!(">> {}", message);
    }
    match outcome {
        Err(e) if e.downcast_ref::<arise::game::GameError>().is_some_and(|g| g.is_rejection()) => {
            log::debug!("rejected: {}", e);
            if notifications.is_empty() {
                eprintln!("Error: {}", e);
            }
            std::process::exit(1);
        }
        other => other,
    }
}

async fn run(game: &mut Game, config: &Config, command: Commands) -> Result<()> {
    match command {
        Commands::Init => {}
        Commands::Status { json } => {
            let summary = game.summary(7);
            if json {
                let payload = serde_json::json!({
                    "player": game.player(),
                    "week": {
                        "total_xp": summary.total_xp,
                        "quests_completed": summary.quests_completed,
                        "completion_rate": summary.completion_rate,
                    },
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print_status(game, &summary);
            }
        }
        Commands::Quests => {
            println!("{}", arise::game::quest::format_quest_list(game.quests()));
        }
        Commands::Complete { id } => {
            if game.complete_quest(&id).is_none() {
                println!("Nothing to complete for '{}'.", id);
            }
        }
        Commands::AddQuest { title, description } => {
            let id = game.add_quest(&title, &description)?;
            println!("Added {}", id);
        }
        Commands::RemoveQuest { id } => {
            if game.remove_quest(&id)?.is_none() {
                println!("No quest '{}'.", id);
            }
        }
        Commands::Invest { stat } => {
            let stat: StatKind = stat.parse().map_err(|e: String| anyhow!(e))?;
            if game.invest_stat(stat) {
                println!("{} is now {}", stat.label(), game.player().stats.get(stat));
            } else {
                println!("No stat points available.");
            }
        }
        Commands::Draw { count, essence } => {
            let currency = if essence {
                DrawCurrency::Essence
            } else {
                DrawCurrency::Gold
            };
            let outcome = game.draw(count, currency)?;
            let skip = async {
                let _ = tokio::signal::ctrl_c().await;
            };
            let outcome = reveal(config.gacha.reveal_delay(), skip, outcome).await;
            for item in &outcome.items {
                println!("[{}] {} ({})", item.rarity, item.name, item.instance_id);
            }
            if outcome.duplicates > 0 {
                println!("{} duplicates -> {} XP", outcome.duplicates, outcome.duplicate_xp);
            }
        }
        Commands::Inventory => {
            if game.inventory().is_empty() {
                println!("Inventory is empty.");
            }
            let equipped = game.player().equipped_item_id;
            for item in game.inventory() {
                let mark = if Some(item.instance_id) == equipped { "*" } else { " " };
                println!("{} [{}] {} - {} ({})", mark, item.rarity, item.name, item.description, item.instance_id);
            }
        }
        Commands::Equip { instance } => {
            game.equip(instance)?;
        }
        Commands::Profile { name, avatar } => {
            game.update_profile(&name, &avatar)?;
        }
        Commands::AddExercise { name, muscle } => {
            let id = game.add_exercise(&name, &muscle)?;
            println!("Added {}", id);
        }
        Commands::AddPlan { name, exercises } => {
            let id = game.add_workout_plan(&name, &exercises)?;
            println!("Added {}", id);
        }
        Commands::Train { plan, sets } => {
            let specs = sets
                .iter()
                .map(|s| parse_set_spec(s))
                .collect::<Result<Vec<_>, _>>()?;
            game.start_session(&plan)?;
            for spec in specs {
                game.log_set(&spec.exercise_id, spec.weight, spec.reps)?;
                info!("running volume {}", game.session().running_volume());
            }
            let report = game.finish_session()?;
            println!(
                "Log {}: volume {} -> {} XP",
                report.log.id, report.log.total_volume, report.log.xp_earned
            );
        }
        Commands::Logs => {
            for log in &game.player().dungeon_logs {
                println!(
                    "{} {} {} volume {} xp {}",
                    log.id,
                    log.recorded_at.format("%Y-%m-%d %H:%M"),
                    log.plan_name,
                    log.total_volume,
                    log.xp_earned
                );
                for set in &log.sets {
                    println!("    {} {} {}x{}", set.id, set.exercise_name, set.weight, set.reps);
                }
            }
        }
        Commands::EditLog {
            log,
            set,
            weight,
            reps,
        } => {
            game.open_log(log)?;
            let mut edits = Vec::new();
            if let Some(weight) = weight {
                edits.push(SetEdit::Weight(weight));
            }
            if let Some(reps) = reps {
                edits.push(SetEdit::Reps(reps));
            }
            for edit in edits {
                if !game.edit_log_set(set, edit)? {
                    game.discard_log_edit();
                    return Err(anyhow!("set {} is not part of log {}", set, log));
                }
            }
            let updated = game.commit_log_edit()?;
            println!("Log {}: volume {}", updated.id, updated.total_volume);
        }
    }
    Ok(())
}

fn print_status(game: &Game, week: &PeriodSummary) {
    let p = game.player();
    println!("{}  [{}-Rank]  Level {}", p.username, p.rank, p.level);
    println!("XP {}/{}  Gold {}  Essence {}", p.xp, p.xp_to_next_level, p.gold, p.essence_stones);
    for stat in StatKind::ALL {
        println!("  {:<12} {}", stat.label(), p.stats.get(stat));
    }
    if let Some(item) = equipped_item(p, game.inventory()) {
        println!("Equipped: {} [{}]", item.name, item.rarity);
    }
    if p.stat_points_available > 0 {
        println!("  {} stat points available", p.stat_points_available);
    }
    println!(
        "Last 7 days: {} XP, {} quests, {}% completion",
        week.total_xp, week.quests_completed, week.completion_rate
    );
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // Base level from CLI verbosity overrides config
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| c.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });
    let file = file.map(|f| std::sync::Arc::new(std::sync::Mutex::new(f)));
    let is_tty = atty::is(atty::Stream::Stdout);

    builder.format(move |fmt, record| {
        let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let line = format!("{} [{}] {}", ts, record.level(), record.args());
        if let Some(file) = &file {
            if let Ok(mut guard) = file.lock() {
                let _ = writeln!(guard, "{}", line);
            }
        }
        // Notifications are already printed by the command itself
        if record.target() == "notify" || (file.is_some() && !is_tty) {
            return Ok(());
        }
        writeln!(fmt, "{}", line)
    });
    let _ = builder.try_init();
}
