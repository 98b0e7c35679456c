use adaptive_chess::adapt::MoveQuality;
use adaptive_chess::config::EngineConfig;
use adaptive_chess::selfplay::{generate_games, quality_share, SelfPlayParams, Summary};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "adaptive-chess-selfplay", about = "Play the adaptive engine against a simulated human and summarise the games")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 120)]
    max_plies: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Look-ahead of the simulated human, in plies after its own move
    #[arg(long, default_value_t = 1)]
    human_depth: u32,
    /// Gaussian noise on the simulated human's move scores (centipawns)
    #[arg(long, default_value_t = 150.0)]
    noise_cp: f64,
    #[arg(long, default_value_t = false)]
    beast: bool,
    /// Engine config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write per-game records and the summary here as JSON
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let config = match &a.config {
        Some(p) => EngineConfig::from_json_file(p)?,
        None => EngineConfig::default(),
    };
    let params = SelfPlayParams {
        games: a.games,
        max_plies: a.max_plies,
        seed: a.seed,
        human_depth: a.human_depth,
        noise_cp: a.noise_cp,
        beast: a.beast,
        config,
    };

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games {msg}")?);
    let games = generate_games(&params, |g| {
        pb.set_message(format!("last: {} plies, result {:+}", g.plies, g.result));
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    let summary = Summary::from_records(&games);
    println!(
        "games={} human={} engine={} draws={} plies={:.1} rating={:.0} human_wp={:.1}",
        summary.games, summary.human_wins, summary.engine_wins, summary.draws,
        summary.mean_plies, summary.mean_final_rating, summary.mean_human_win_prob
    );
    for q in MoveQuality::ALL {
        println!("  {:<9} {:5.1}%", q.to_string(), quality_share(&games, q) * 100.0);
    }

    if let Some(out) = &a.out {
        let doc = serde_json::json!({ "summary": summary, "games": games });
        std::fs::write(out, serde_json::to_string_pretty(&doc)?)?;
        eprintln!("Wrote {}", out.display());
    }
    Ok(())
}
