//! Binary entrypoint: thin CLI adapter over the validation engine.
//!
//! Usage:
//!   validator-engine validate <path> [--fail-on-high-risk] [--no-report]
//!   validator-engine check <file>
//!   validator-engine stats
//!
//! `validate` accepts a file or a directory (all *.json entries, sorted).
//! Exit code 0 on normal completion; nonzero only with --fail-on-high-risk
//! and at least one HIGH result. Schema/model paths come from the
//! CI_VALIDATOR_SCHEMA and CI_VALIDATOR_MODEL environment variables.

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use validator_engine::{Engine, EngineError, RiskLevel, RiskPredictor, SchemaValidator};

const DEFAULT_MODEL_PATH: &str = "models/model.json";

fn main() {
  env_logger::init();

  let args: Vec<String> = env::args().skip(1).collect();
  let command = match args.first() {
    Some(c) => c.as_str(),
    None => {
      usage();
      return;
    }
  };

  let code = match command {
    "validate" => cmd_validate(&args[1..]),
    "check" => cmd_check(&args[1..]),
    "stats" => cmd_stats(),
    "help" | "--help" | "-h" => {
      usage();
      0
    }
    other => {
      eprintln!("validator-engine: unknown command: {}", other);
      usage();
      2
    }
  };
  process::exit(code);
}

fn usage() {
  eprintln!("Usage: validator-engine <command>");
  eprintln!("  validate <path> [--fail-on-high-risk] [--no-report]");
  eprintln!("           Validate a pipeline file or a directory of *.json files");
  eprintln!("  check <file>    Quick safety check (level + score only)");
  eprintln!("  stats           Print process-lifetime validation counters");
}

/// Startup loading: schema compile failure is unrecoverable; a missing or
/// broken model artifact degrades to fail-open scoring with a warning.
fn build_engine() -> Result<Engine, EngineError> {
  let schema = match env::var_os("CI_VALIDATOR_SCHEMA") {
    Some(path) => SchemaValidator::from_file(Path::new(&path))?,
    None => SchemaValidator::default_pipeline()?,
  };

  let model_path =
    env::var_os("CI_VALIDATOR_MODEL").unwrap_or_else(|| DEFAULT_MODEL_PATH.into());
  let predictor = match RiskPredictor::from_file(Path::new(&model_path)) {
    Ok(p) => {
      log::info!("loaded model {} ({})", p.version(), p.digest());
      Some(p)
    }
    Err(e) => {
      log::warn!("no usable model artifact, scoring fails open: {}", e);
      None
    }
  };

  Ok(Engine::new(schema, predictor))
}

fn cmd_validate(args: &[String]) -> i32 {
  let fail_on_high_risk = args.iter().any(|a| a == "--fail-on-high-risk");
  let no_report = args.iter().any(|a| a == "--no-report");
  let path = match args.iter().find(|a| !a.starts_with("--")) {
    Some(p) => PathBuf::from(p),
    None => {
      eprintln!("validator-engine: validate requires a path");
      usage();
      return 2;
    }
  };

  let engine = match build_engine() {
    Ok(engine) => engine,
    Err(e) => {
      eprintln!("validator-engine: startup failed: {}", e);
      return 2;
    }
  };

  let mut any_high = false;
  for target in collect_targets(&path) {
    let record = engine.validate_file(&target);
    any_high |= record.risk_level == RiskLevel::High;
    if !no_report {
      match serde_json::to_string_pretty(&record) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("validator-engine: cannot serialize report: {}", e),
      }
    }
  }

  let snap = engine.stats();
  eprintln!(
    "validated {} file(s): {} passed, {} high risk",
    snap.files_validated, snap.files_passed, snap.high_risk_count
  );

  if fail_on_high_risk && any_high {
    1
  } else {
    0
  }
}

fn cmd_check(args: &[String]) -> i32 {
  let file = match args.first() {
    Some(f) => PathBuf::from(f),
    None => {
      eprintln!("validator-engine: check requires a file");
      usage();
      return 2;
    }
  };

  let engine = match build_engine() {
    Ok(engine) => engine,
    Err(e) => {
      eprintln!("validator-engine: startup failed: {}", e);
      return 2;
    }
  };

  let record = engine.validate_file(&file);
  println!(
    "{}: {} RISK ({} / 100){}",
    record.filepath,
    record.risk_level,
    record.final_risk_score,
    if record.is_safe() { "" } else { " — unsafe to execute" }
  );
  for error in &record.errors {
    eprintln!("  error: {}", error);
  }
  for warning in &record.warnings {
    eprintln!("  warning: {}", warning);
  }
  0
}

fn cmd_stats() -> i32 {
  // Counters are process-lifetime only; a fresh CLI process reports zeros.
  let engine = match build_engine() {
    Ok(engine) => engine,
    Err(e) => {
      eprintln!("validator-engine: startup failed: {}", e);
      return 2;
    }
  };
  match serde_json::to_string_pretty(&engine.stats()) {
    Ok(json) => println!("{}", json),
    Err(e) => eprintln!("validator-engine: cannot serialize stats: {}", e),
  }
  0
}

/// A directory target expands to its *.json entries, sorted for
/// deterministic output; anything else validates as a single file.
fn collect_targets(path: &Path) -> Vec<PathBuf> {
  let Ok(meta) = std::fs::metadata(path) else {
    return vec![path.to_path_buf()];
  };
  if !meta.is_dir() {
    return vec![path.to_path_buf()];
  }

  let mut targets: Vec<PathBuf> = match std::fs::read_dir(path) {
    Ok(entries) => entries
      .filter_map(|e| e.ok())
      .map(|e| e.path())
      .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
      .collect(),
    Err(_) => return vec![path.to_path_buf()],
  };
  targets.sort();
  targets
}
