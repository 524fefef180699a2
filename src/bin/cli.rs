//! Developer driver over the library. Not a UCI engine.
//!
//!   bitcastle perft <depth> [fen]
//!   bitcastle divide <depth> [fen]
//!   bitcastle search depth <n> [fen]
//!   bitcastle search time <ms> [fen]
//!   bitcastle status [fen]

use bitcastle::board::{Board, START_FEN};
use bitcastle::logger::{DEFAULT_FILTER, init_logging};
use bitcastle::moves::movegen::legal_moves;
use bitcastle::moves::perft::perft;
use bitcastle::search::search::SearchBudget;
use bitcastle::status::GameResult;
use bitcastle::{Engine, EngineError};
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use std::time::{Duration, Instant};

const LOG_PATH: &str = "logs/bitcastle.log";

const USAGE: &str = "usage:
  bitcastle perft <depth> [fen]
  bitcastle divide <depth> [fen]
  bitcastle search depth <n> [fen]
  bitcastle search time <ms> [fen]
  bitcastle status [fen]";

fn main() -> ExitCode {
    if let Err(e) = init_logging(LOG_PATH, DEFAULT_FILTER) {
        eprintln!("warning: file logging disabled: {e}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("perft") => cmd_perft(&args[1..]),
        Some("divide") => cmd_divide(&args[1..]),
        Some("search") => cmd_search(&args[1..]),
        Some("status") => cmd_status(&args[1..]),
        _ => Err(USAGE.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}

/// Remaining words form the FEN; empty means the start position.
fn fen_from(rest: &[String]) -> String {
    if rest.is_empty() {
        START_FEN.to_string()
    } else {
        rest.join(" ")
    }
}

fn board_from(rest: &[String]) -> Result<Board, String> {
    Board::from_fen(&fen_from(rest)).map_err(|e| e.to_string())
}

fn parse_num<T: std::str::FromStr>(word: Option<&String>, what: &str) -> Result<T, String> {
    word.ok_or_else(|| format!("missing {what}\n{USAGE}"))?
        .parse()
        .map_err(|_| format!("invalid {what}\n{USAGE}"))
}

fn cmd_perft(args: &[String]) -> Result<(), String> {
    let depth: u32 = parse_num(args.first(), "depth")?;
    let mut board = board_from(args.get(1..).unwrap_or_default())?;

    let start = Instant::now();
    let nodes = perft(&mut board, depth);
    let secs = start.elapsed().as_secs_f64().max(1e-9);
    println!(
        "perft({depth}) = {nodes}  time={secs:.3}s  nps={}",
        (nodes as f64 / secs) as u64
    );
    Ok(())
}

fn cmd_divide(args: &[String]) -> Result<(), String> {
    let depth: u32 = parse_num(args.first(), "depth")?;
    let mut board = board_from(args.get(1..).unwrap_or_default())?;
    if depth == 0 {
        println!("total: 1");
        return Ok(());
    }

    let moves = legal_moves(&mut board);
    let pb = ProgressBar::new(moves.len() as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} root moves • {elapsed_precise} {msg}")
    {
        pb.set_style(style.progress_chars("##-"));
    }

    let mut total = 0;
    let mut lines = Vec::with_capacity(moves.len());
    for &mv in moves.iter() {
        pb.set_message(mv.to_uci());
        board.execute(mv);
        let count = if depth == 1 { 1 } else { perft(&mut board, depth - 1) };
        board.undo();
        total += count;
        lines.push(format!("{mv}: {count}"));
        pb.inc(1);
    }
    pb.finish_and_clear();

    for line in lines {
        println!("{line}");
    }
    println!("\nmoves: {}  total: {total}", moves.len());
    Ok(())
}

fn cmd_search(args: &[String]) -> Result<(), String> {
    let budget = match args.first().map(String::as_str) {
        Some("depth") => SearchBudget::Depth(parse_num(args.get(1), "depth")?),
        Some("time") => SearchBudget::Time(Duration::from_millis(parse_num(args.get(1), "milliseconds")?)),
        _ => return Err(USAGE.to_string()),
    };

    let mut engine = Engine::new();
    engine
        .set_position(&fen_from(args.get(2..).unwrap_or_default()))
        .map_err(|e: EngineError| e.to_string())?;

    let report = engine.search_best_move(budget);
    let pv: Vec<String> = report.pv.iter().map(|m| m.to_uci()).collect();
    println!(
        "depth {} score {} nodes {} time {}ms status {:?}",
        report.depth,
        report.score,
        report.nodes,
        report.elapsed.as_millis(),
        report.status
    );
    match report.best_move() {
        Some(mv) => println!("bestmove {} ({mv:#})  pv {}", mv.to_uci(), pv.join(" ")),
        None => println!("bestmove (none)"),
    }
    Ok(())
}

fn cmd_status(args: &[String]) -> Result<(), String> {
    let mut engine = Engine::new();
    engine
        .set_position(&fen_from(args))
        .map_err(|e| e.to_string())?;

    let text = match engine.game_result() {
        GameResult::InPlay => "in play".to_string(),
        GameResult::Checkmate { winner } => format!("checkmate, {winner:?} wins"),
        GameResult::Stalemate => "stalemate".to_string(),
        GameResult::FiftyMoveRule => "draw by fifty-move rule".to_string(),
        GameResult::InsufficientMaterial => "draw by insufficient material".to_string(),
    };
    println!("{}\n{text}", engine.fen());
    Ok(())
}
