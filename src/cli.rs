//! Command dispatch for the castsim binary.
//!
//! Commands emit JSON by default (`--table` switches to tab-separated text)
//! and return a process exit code: 0 on success, 1 on a failed computation,
//! 2 on a usage error.

use std::fmt::Write as _;

use crate::accuracy::AccuracyContext;
use crate::combat::{simulate_kill, KillScenario};
use crate::parallel::{run_batch_rounds, WorkerPool};
use crate::specs::DpsSpec;
use crate::xp::XpTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Simulate,
    Batch,
    Accuracy,
    Xp,
    Level,
    Spec,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("simulate") => Some(Command::Simulate),
        Some("batch") => Some(Command::Batch),
        Some("accuracy") => Some(Command::Accuracy),
        Some("xp") => Some(Command::Xp),
        Some("level") => Some(Command::Level),
        Some("spec") => Some(Command::Spec),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Simulate) => handle_simulate(args),
        Some(Command::Batch) => handle_batch(args),
        Some(Command::Accuracy) => handle_accuracy(args),
        Some(Command::Xp) => handle_xp(args),
        Some(Command::Level) => handle_level(args),
        Some(Command::Spec) => handle_spec(args),
        None => {
            eprintln!("usage: castsim <simulate|batch|accuracy|xp|level|spec>");
            2
        }
    }
}

fn handle_simulate(args: &[String]) -> i32 {
    let hitpoints = parse_i64_arg(args.get(2), "hitpoints", 79);
    let seed = parse_optional_u64(args.get(3));
    let as_table = args.iter().any(|arg| arg == "--table");

    let scenario = KillScenario {
        target_hitpoints: hitpoints,
        seed,
        ..KillScenario::default()
    };
    let table = XpTable::generate();

    match simulate_kill(&scenario, &table) {
        Ok(result) => {
            if as_table {
                println!("casts\tfinal_level");
                println!("{}\t{}", result.casts, result.final_level);
                0
            } else {
                print_json(&result)
            }
        }
        Err(err) => {
            eprintln!("simulation failed: {err}");
            1
        }
    }
}

fn handle_batch(args: &[String]) -> i32 {
    let rounds = parse_usize_arg(args.get(2), "rounds", 1000);
    let seed = parse_optional_u64(args.get(3));
    let as_table = args.iter().any(|arg| arg == "--table");

    let scenario = KillScenario {
        seed,
        ..KillScenario::default()
    };
    let table = XpTable::generate();

    match run_batch_rounds(rounds, &scenario, &table, &WorkerPool::default()) {
        Ok(summary) => {
            if as_table {
                println!("rounds\tmean_casts\tmean_final_level");
                println!(
                    "{}\t{:.4}\t{:.4}",
                    summary.rounds, summary.mean_casts, summary.mean_final_level
                );
                0
            } else {
                print_json(&summary)
            }
        }
        Err(err) => {
            eprintln!("batch failed: {err}");
            1
        }
    }
}

fn handle_accuracy(args: &[String]) -> i32 {
    let level = parse_u32_arg(args.get(2), "level", 13);
    let bonus = parse_i32_arg(args.get(3), "equipment_bonus", 0);
    let defense_roll = parse_f64_arg(args.get(4), "defense_roll", 540.0);
    let as_table = args.iter().any(|arg| arg == "--table");

    let context = AccuracyContext::unboosted(level, bonus);
    let max_hit = KillScenario::default().max_hits.max_hit_for(level);

    match context.report(max_hit, defense_roll) {
        Ok(report) => {
            if as_table {
                println!("{report}");
                0
            } else {
                print_json(&report)
            }
        }
        Err(err) => {
            eprintln!("accuracy report failed: {err}");
            1
        }
    }
}

fn handle_xp(args: &[String]) -> i32 {
    let Some(raw) = args.get(2) else {
        eprintln!("usage: castsim xp <level>");
        return 2;
    };
    let Ok(level) = raw.parse::<u32>() else {
        eprintln!("invalid level '{raw}'");
        return 2;
    };

    let table = XpTable::generate();
    match table.xp_for_level(level) {
        Ok(xp) => {
            println!("{{\"level\": {level}, \"xp\": {xp}}}");
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn handle_level(args: &[String]) -> i32 {
    let Some(raw) = args.get(2) else {
        eprintln!("usage: castsim level <xp>");
        return 2;
    };
    let Ok(xp) = raw.parse::<f64>() else {
        eprintln!("invalid xp '{raw}'");
        return 2;
    };

    let table = XpTable::generate();
    let level = table.level_for_xp(xp);
    println!("{{\"xp\": {xp}, \"level\": {level}}}");
    0
}

fn handle_spec(args: &[String]) -> i32 {
    let spec_dps = parse_f64_arg(args.get(2), "spec_dps", 21.042);
    let spec_dmg = parse_f64_arg(args.get(3), "spec_dmg", 30.5);
    let attack_speed = parse_f64_arg(args.get(4), "attack_speed", 2.4);
    let spec_cost = parse_u32_arg(args.get(5), "spec_cost", 50);
    let target_hitpoints = parse_f64_arg(args.get(6), "target_hitpoints", 700.0);
    let main_dps = parse_f64_arg(args.get(7), "main_dps", 10.17482);
    let as_table = args.iter().any(|arg| arg == "--table");

    match DpsSpec::try_new(
        spec_dps,
        spec_dmg,
        attack_speed,
        spec_cost,
        target_hitpoints,
        main_dps,
    ) {
        Ok(spec) => {
            if as_table {
                println!("{spec}");
                0
            } else {
                print_json(&spec)
            }
        }
        Err(err) => {
            eprintln!("spec comparison failed: {err}");
            1
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize result: {err}");
            1
        }
    }
}

fn parse_optional_u64(raw: Option<&String>) -> Option<u64> {
    raw.and_then(|value| value.parse::<u64>().ok())
}

fn parse_u32_arg(raw: Option<&String>, name: &str, default: u32) -> u32 {
    raw.filter(|value| !value.starts_with("--"))
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or_else(|| {
            warn_default(raw, name, &default.to_string());
            default
        })
}

fn parse_i32_arg(raw: Option<&String>, name: &str, default: i32) -> i32 {
    raw.filter(|value| !value.starts_with("--"))
        .and_then(|value| value.parse::<i32>().ok())
        .unwrap_or_else(|| {
            warn_default(raw, name, &default.to_string());
            default
        })
}

fn parse_i64_arg(raw: Option<&String>, name: &str, default: i64) -> i64 {
    raw.filter(|value| !value.starts_with("--"))
        .and_then(|value| value.parse::<i64>().ok())
        .unwrap_or_else(|| {
            warn_default(raw, name, &default.to_string());
            default
        })
}

fn parse_usize_arg(raw: Option<&String>, name: &str, default: usize) -> usize {
    raw.filter(|value| !value.starts_with("--"))
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or_else(|| {
            warn_default(raw, name, &default.to_string());
            default
        })
}

fn parse_f64_arg(raw: Option<&String>, name: &str, default: f64) -> f64 {
    raw.filter(|value| !value.starts_with("--"))
        .and_then(|value| value.parse::<f64>().ok())
        .unwrap_or_else(|| {
            warn_default(raw, name, &default.to_string());
            default
        })
}

fn warn_default(raw: Option<&String>, name: &str, default: &str) {
    if let Some(value) = raw.filter(|value| !value.starts_with("--")) {
        let mut msg = String::new();
        let _ = write!(&mut msg, "invalid {name} '{value}', defaulting to {default}");
        eprintln!("{msg}");
    }
}
