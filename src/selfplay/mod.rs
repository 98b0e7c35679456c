//! Games between the adaptive engine and a simulated human, for checking that the
//! difficulty policy keeps games close.

use cozy_chess::Color;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::Serialize;

use crate::adapt::quality::MoveQuality;
use crate::board::{MoveInfo, Outcome};
use crate::config::EngineConfig;
use crate::search::alphabeta::Searcher;
use crate::search::eval::win_prob;
use crate::session::{MoveStats, Session};

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    pub seed: u64,
    /// Depth the simulated human looks ahead (plies after their own move).
    pub human_depth: u32,
    /// Standard deviation of the noise added to the human's move scores, in centipawns.
    pub noise_cp: f64,
    pub beast: bool,
    pub config: EngineConfig,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self { games: 10, max_plies: 120, seed: 42, human_depth: 1, noise_cp: 150.0, beast: false, config: EngineConfig::default() }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub moves: Vec<String>,
    /// 1 human win, 0 draw or unfinished, -1 engine win.
    pub result: i8,
    pub plies: usize,
    pub final_rating: f64,
    pub human_qualities: MoveStats,
    pub mean_human_win_prob: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub games: usize,
    pub human_wins: usize,
    pub engine_wins: usize,
    pub draws: usize,
    pub mean_plies: f64,
    pub mean_final_rating: f64,
    pub mean_human_win_prob: f64,
}

fn mean(records: &[GameRecord], f: impl Fn(&GameRecord) -> f64) -> f64 {
    records.iter().map(f).sum::<f64>() / records.len().max(1) as f64
}

impl Summary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        Self {
            games: records.len(),
            human_wins: records.iter().filter(|r| r.result > 0).count(),
            engine_wins: records.iter().filter(|r| r.result < 0).count(),
            draws: records.iter().filter(|r| r.result == 0).count(),
            mean_plies: mean(records, |r| r.plies as f64),
            mean_final_rating: mean(records, |r| r.final_rating),
            mean_human_win_prob: mean(records, |r| r.mean_human_win_prob),
        }
    }
}

/// Scores every White move `depth` plies deep, adds Gaussian noise and picks the highest.
fn simulated_human_move<R: Rng>(searcher: &mut Searcher, session: &Session, depth: u32, noise: &Normal<f64>, rng: &mut R) -> Option<MoveInfo> {
    let mut pos = session.position().clone();
    let scored = searcher.score_children(&mut pos, depth, false);
    scored
        .into_iter()
        .map(|(info, r)| (r.score as f64 + noise.sample(&mut *rng), info))
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, info)| info)
}

pub fn play_game(params: &SelfPlayParams, game_index: usize) -> anyhow::Result<GameRecord> {
    let seed = params.seed.wrapping_add(game_index as u64);
    let mut config = params.config.clone();
    config.seed = Some(seed);
    config.reply_delay_ms = 0;
    let mut human = Searcher::from_config(&config);
    let mut session = Session::new(config);
    session.set_beast_mode(params.beast);

    let mut rng = SmallRng::seed_from_u64(seed ^ 0x5EED_0F_BEEF);
    let noise = Normal::new(0.0, params.noise_cp.max(0.0))?;
    let mut win_probs = Vec::new();

    while session.history().len() < params.max_plies && !session.is_game_over() {
        if session.position().side_to_move() != Color::White {
            if session.make_automated_move().is_none() { break; }
            continue;
        }
        let Some(info) = simulated_human_move(&mut human, &session, params.human_depth, &noise, &mut rng) else { break };
        let ex = session.play_human_notation(&info.notation)?;
        win_probs.push(win_prob(ex.human.eval_score));
        debug!("game {} ply {}: {} {}", game_index, session.history().len(), ex.human.notation, ex.human.quality);
    }

    let result = match session.outcome() {
        Some(Outcome::WhiteWins) => 1,
        Some(Outcome::BlackWins) => -1,
        _ => 0,
    };
    let mean_human_win_prob = if win_probs.is_empty() { 50.0 } else { win_probs.iter().sum::<f64>() / win_probs.len() as f64 };
    Ok(GameRecord {
        moves: session.history().iter().map(|e| e.notation.clone()).collect(),
        result,
        plies: session.history().len(),
        final_rating: session.skill().rating(),
        human_qualities: session.move_stats(),
        mean_human_win_prob,
    })
}

/// Plays `params.games` games, calling `on_game` after each one.
pub fn generate_games(params: &SelfPlayParams, mut on_game: impl FnMut(&GameRecord)) -> anyhow::Result<Vec<GameRecord>> {
    let mut games = Vec::with_capacity(params.games);
    for gi in 0..params.games {
        let rec = play_game(params, gi)?;
        on_game(&rec);
        games.push(rec);
    }
    Ok(games)
}

/// Share of the human's moves that landed on `q`.
pub fn quality_share(records: &[GameRecord], q: MoveQuality) -> f64 {
    let total: usize = records.iter().map(|r| r.human_qualities.total()).sum();
    if total == 0 { return 0.0; }
    records.iter().map(|r| r.human_qualities.get(q)).sum::<usize>() as f64 / total as f64
}
