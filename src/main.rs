use adaptive_chess::config::EngineConfig;
use adaptive_chess::session::{MoveHistoryEntry, Mover, ReviewCursor, Session};
use adaptive_chess::Outcome;
use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against an opponent that adapts to you", long_about = None)]
struct Args {
    /// Engine config (JSON); missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting FEN position; with Black to move the engine opens
    #[arg(long)]
    fen: Option<String>,

    /// Start with beast mode on
    #[arg(long)]
    beast: bool,

    /// RNG seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Pause before the engine replies, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
}

const HELP: &str = "commands: <move e.g. e2e4> | hint | undo | reset | beast on|off | stats | history | review <n|start|live|next|prev> | fen | quit";

fn print_entry(e: &MoveHistoryEntry) {
    let who = match e.mover { Mover::Human => "You", Mover::Automated => "Engine" };
    println!("{:>6}: {:<6} {:<9} eval {:+} ({:?})", who, e.notation, e.quality.to_string(), e.eval_score, e.phase);
}

fn print_status(s: &Session) {
    println!("\n{}", s.position().fen());
    println!("eval {:+}  your winning chances {:.0}%  rating {:.0}{}",
        s.current_eval(), s.win_probability(), s.skill().rating(),
        if s.is_beast_mode() { "  [beast]" } else { "" });
    if let Some(o) = s.outcome() {
        match o {
            Outcome::WhiteWins => println!("Checkmate! You win."),
            Outcome::BlackWins => println!("Checkmate! The engine wins."),
            Outcome::Draw => println!("Draw."),
        }
    }
}

/// The engine plays Black; let it move whenever the game is waiting on it.
fn engine_turn(s: &mut Session) {
    if let Some(e) = s.make_automated_move() {
        print_entry(&e);
    }
}

fn review(s: &mut Session, arg: Option<&str>) {
    match arg {
        Some("start") => s.go_to(ReviewCursor::Start),
        Some("live") | None => s.go_to(ReviewCursor::Live),
        Some("next") => s.review_next(),
        Some("prev") => s.review_prev(),
        Some(n) => match n.parse::<usize>() {
            Ok(i) => s.go_to(ReviewCursor::Ply(i)),
            Err(_) => { println!("review what? {n}"); return; }
        },
    }
    println!("[{:?}] {}", s.review_cursor(), s.view_fen());
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(p) => EngineConfig::from_json_file(p)?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() { config.seed = args.seed; }
    if let Some(d) = args.delay_ms { config.reply_delay_ms = d; }

    let mut session = match &args.fen {
        Some(fen) => Session::from_fen(config, fen)?,
        None => Session::new(config),
    };
    session.set_beast_mode(args.beast);

    println!("{HELP}");
    engine_turn(&mut session);
    print_status(&session);
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 { break; }
        let mut tokens = line.split_whitespace();
        let Some(cmd) = tokens.next() else { continue };
        match cmd {
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "fen" => println!("{}", session.position().fen()),
            "hint" => {
                let hints = session.analyze_best_moves();
                if hints.is_empty() { println!("no moves to suggest"); }
                for (i, h) in hints.iter().enumerate() {
                    println!("{}. {} score {:+} win {:.0}%  line: {}", i + 1, h.notation, h.score, h.win_prob, h.pv.join(" "));
                }
            }
            "undo" => {
                if session.undo() {
                    engine_turn(&mut session);
                    print_status(&session);
                } else {
                    println!("nothing to undo");
                }
            }
            "reset" => {
                session.reset();
                engine_turn(&mut session);
                print_status(&session);
            }
            "beast" => {
                let on = !matches!(tokens.next(), Some("off"));
                session.set_beast_mode(on);
                println!("beast mode {}", if on { "on" } else { "off" });
            }
            "stats" => {
                let st = session.move_stats();
                println!("excellent {} good {} neutral {} bad {} terrible {}", st.excellent, st.good, st.neutral, st.bad, st.terrible);
            }
            "history" => session.history().iter().for_each(print_entry),
            "review" => review(&mut session, tokens.next()),
            mv => match session.play_human_notation(mv) {
                Ok(ex) => {
                    print_entry(&ex.human);
                    if let Some(r) = &ex.reply { print_entry(r); }
                    print_status(&session);
                }
                Err(e) => println!("{e}"),
            },
        }
    }
    Ok(())
}
