use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use oralis::{
    LexiconAnalyzer, Options, Pipeline, RunConfig, WordListOracle, run_corpus,
};
use tracing_subscriber::filter::LevelFilter;

const DEFAULT_MIN_TOKENS: usize = 8;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    init_tracing(match config.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    });

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn init_tracing(level: LevelFilter) {
    let subscriber = tracing_subscriber::fmt().with_max_level(level).with_target(false).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("tracing subscriber already set; skipping re-initialization");
    }
}

fn run(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Both capabilities are hard dependencies: the spell-sensitive rules are
    // order-sensitive and must not be silently skipped.
    let oracle = WordListOracle::load(&config.dictionary)?;
    let analyzer = LexiconAnalyzer::load(&config.lexicon)?;
    tracing::info!(
        dictionary_entries = oracle.len(),
        lexicon_entries = analyzer.len(),
        "capabilities loaded"
    );

    let pipeline = Arc::new(Pipeline::new(
        Arc::new(oracle),
        Arc::new(analyzer),
        Options { min_boundary_tokens: config.min_tokens },
    ));

    let run_config = RunConfig {
        input: config.input.clone(),
        output: config.output.clone(),
        log_path: config
            .log
            .clone()
            .unwrap_or_else(|| config.output.join("rewrite_log.csv")),
        timeout: Duration::from_secs(config.timeout_secs),
    };

    let summary = run_corpus(pipeline, &run_config)?;
    println!(
        "processed {} file(s): {} skipped, {} log row(s) written to {}",
        summary.files_processed,
        summary.files_skipped,
        summary.log_rows,
        run_config.log_path.display()
    );
    Ok(())
}

struct CliConfig {
    input: PathBuf,
    output: PathBuf,
    log: Option<PathBuf>,
    dictionary: PathBuf,
    lexicon: PathBuf,
    min_tokens: usize,
    timeout_secs: u64,
    verbose: u8,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut log: Option<PathBuf> = None;
    let mut dictionary: Option<PathBuf> = None;
    let mut lexicon: Option<PathBuf> = None;
    let mut min_tokens = DEFAULT_MIN_TOKENS;
    let mut timeout_secs = DEFAULT_TIMEOUT_SECS;
    let mut verbose = 0u8;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                process::exit(0);
            }
            "-V" | "--version" => {
                println!("oralis {}", env!("CARGO_PKG_VERSION"));
                process::exit(0);
            }
            "-v" => verbose += 1,
            "-vv" => verbose += 2,
            "--input" | "-i" => input = Some(expect_value(&arg, args.next())?.into()),
            "--output" | "-o" => output = Some(expect_value(&arg, args.next())?.into()),
            "--log" => log = Some(expect_value(&arg, args.next())?.into()),
            "--dictionary" => dictionary = Some(expect_value(&arg, args.next())?.into()),
            "--lexicon" => lexicon = Some(expect_value(&arg, args.next())?.into()),
            "--min-tokens" => {
                min_tokens = parse_number(&arg, &expect_value(&arg, args.next())?)?;
            }
            "--timeout" => {
                timeout_secs = parse_number(&arg, &expect_value(&arg, args.next())?)?;
            }
            _ if arg.starts_with("--input=") => {
                input = Some(arg.trim_start_matches("--input=").into());
            }
            _ if arg.starts_with("--output=") => {
                output = Some(arg.trim_start_matches("--output=").into());
            }
            _ if arg.starts_with("--log=") => {
                log = Some(arg.trim_start_matches("--log=").into());
            }
            _ if arg.starts_with("--dictionary=") => {
                dictionary = Some(arg.trim_start_matches("--dictionary=").into());
            }
            _ if arg.starts_with("--lexicon=") => {
                lexicon = Some(arg.trim_start_matches("--lexicon=").into());
            }
            _ if arg.starts_with("--min-tokens=") => {
                min_tokens = parse_number("--min-tokens", arg.trim_start_matches("--min-tokens="))?;
            }
            _ if arg.starts_with("--timeout=") => {
                timeout_secs = parse_number("--timeout", arg.trim_start_matches("--timeout="))?;
            }
            _ => {
                return Err(format!("error: unknown option '{arg}'\n\n{}", help_text()));
            }
        }
    }

    let input = input.ok_or_else(|| format!("error: --input is required\n\n{}", help_text()))?;
    let output = output.ok_or_else(|| format!("error: --output is required\n\n{}", help_text()))?;
    let dictionary =
        dictionary.ok_or_else(|| format!("error: --dictionary is required\n\n{}", help_text()))?;
    let lexicon =
        lexicon.ok_or_else(|| format!("error: --lexicon is required\n\n{}", help_text()))?;

    Ok(CliConfig { input, output, log, dictionary, lexicon, min_tokens, timeout_secs, verbose })
}

fn expect_value(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("error: {flag} expects a value"))
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value.parse().map_err(|_| format!("error: invalid value '{value}' for {flag}"))
}

fn help_text() -> String {
    format!(
        "oralis {version}

Normalizes speaker-tagged interview transcripts through a fixed rule
pipeline and splits each turn into discourse utterances.

Usage:
  oralis --input <dir> --output <dir> --dictionary <file> --lexicon <file> [OPTIONS]

Options:
  -i, --input <dir>        Directory of UTF-8 .txt transcripts (searched
                           recursively). A single .txt file also works.
  -o, --output <dir>       Output directory; receives <stem>_norm.txt and
                           <stem>_seg.txt per input file.
  --log <file>             Provenance log path.
                           Default: <output>/rewrite_log.csv
  --dictionary <file>      Word list for the spelling oracle (a hunspell
                           .dic file works). Required.
  --lexicon <file>         Full-form morphological lexicon, TSV
                           (surface, lemma, POS, feats). Required.
  --min-tokens <n>         Minimum sentence length at a boundary marker.
                           Default: {min_tokens}
  --timeout <secs>         Per-file processing budget; a file over budget
                           is skipped, not fatal. Default: {timeout}
  -v, -vv                  Increase log verbosity.
  -h, --help               Show this help message.
  -V, --version            Print version information.

Exit codes:
  0  Success.
  1  Internal or setup error (missing dictionary/lexicon, empty corpus).
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        min_tokens = DEFAULT_MIN_TOKENS,
        timeout = DEFAULT_TIMEOUT_SECS
    )
}
