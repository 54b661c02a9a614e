//! Corpus runner.
//!
//! Drives the pipeline over a directory of transcripts: discover files, build
//! the observed vocabulary (before any rewriting), process each file on a
//! worker thread with a wall-clock budget, write the per-file outputs and the
//! merged provenance log.
//!
//! Files are independent units of work: the only shared state is the
//! read-only vocabulary and the per-file event buffers merged here, so a
//! timeout or worker loss skips that one file and the run continues.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::api::{Pipeline, TurnMeta};
use crate::engine::log::{self, RuleEvent};
use crate::error::PipelineError;
use crate::rules::dialect::DialectProfile;
use crate::turn::parse_turns;
use crate::vocab::Vocabulary;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub log_path: PathBuf,
    /// Per-file wall-clock budget; exceeding it skips the file.
    pub timeout: Duration,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub log_rows: usize,
}

#[derive(Debug)]
struct FileOutput {
    file_id: String,
    normalized: String,
    segmented: String,
    events: Vec<RuleEvent>,
}

/// Process every transcript under `config.input`.
pub fn run_corpus(pipeline: Arc<Pipeline>, config: &RunConfig) -> Result<RunSummary, PipelineError> {
    let files = collect_transcripts(&config.input)?;
    if files.is_empty() {
        return Err(PipelineError::EmptyCorpus { path: config.input.clone() });
    }
    fs::create_dir_all(&config.output)
        .map_err(|source| PipelineError::Write { path: config.output.clone(), source })?;
    if let Some(parent) = config.log_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|source| PipelineError::Write { path: parent.to_path_buf(), source })?;
    }

    let vocabulary = Arc::new(build_vocabulary(&files)?);
    tracing::info!(files = files.len(), vocabulary = vocabulary.len(), "corpus scan complete");

    let mut summary = RunSummary::default();
    let mut rows: Vec<RuleEvent> = Vec::new();

    for path in files {
        match process_with_budget(&pipeline, &vocabulary, &path, config.timeout) {
            Ok(output) => {
                write_outputs(&config.output, &path, &output)?;
                tracing::debug!(
                    file = %output.file_id,
                    events = output.events.len(),
                    "file processed"
                );
                rows.extend(output.events);
                summary.files_processed += 1;
            }
            Err(err) => {
                tracing::warn!(file = %path.display(), error = %err, "skipping file");
                summary.files_skipped += 1;
            }
        }
    }

    log::sort_rows(&mut rows);
    log::write_log(&config.log_path, &rows)?;
    summary.log_rows = rows.len();

    tracing::info!(
        processed = summary.files_processed,
        skipped = summary.files_skipped,
        log_rows = summary.log_rows,
        "run complete"
    );
    Ok(summary)
}

/// All `.txt` files under `root`, recursively, in a stable sorted order.
fn collect_transcripts(root: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let metadata = fs::metadata(root)
        .map_err(|source| PipelineError::Io { path: root.to_path_buf(), source })?;
    if metadata.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries =
            fs::read_dir(&dir).map_err(|source| PipelineError::Io { path: dir.clone(), source })?;
        for entry in entries {
            let entry = entry.map_err(|source| PipelineError::Io { path: dir.clone(), source })?;
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("txt")) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// The join heuristic's vocabulary snapshot, complete before any rewriting.
fn build_vocabulary(files: &[PathBuf]) -> Result<Vocabulary, PipelineError> {
    let mut vocabulary = Vocabulary::new();
    for path in files {
        vocabulary.scan_text(&read_lossy(path)?);
    }
    Ok(vocabulary)
}

fn read_lossy(path: &Path) -> Result<String, PipelineError> {
    let bytes =
        fs::read(path).map_err(|source| PipelineError::Io { path: path.to_path_buf(), source })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Run one file on its own thread, bounded by the configured budget. The
/// budget exists to contain pathological inputs; blowing it is a per-file
/// skip, never fatal.
fn process_with_budget(
    pipeline: &Arc<Pipeline>,
    vocabulary: &Arc<Vocabulary>,
    path: &Path,
    timeout: Duration,
) -> Result<FileOutput, PipelineError> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    let pipeline = Arc::clone(pipeline);
    let vocabulary = Arc::clone(vocabulary);
    let worker_path = path.to_path_buf();
    thread::spawn(move || {
        let result = process_file(&pipeline, &vocabulary, &worker_path);
        let _ = tx.send(result);
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
            Err(PipelineError::FileTimeout { path: path.to_path_buf(), limit: timeout })
        }
        Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
            Err(PipelineError::WorkerLost { path: path.to_path_buf() })
        }
    }
}

fn process_file(
    pipeline: &Pipeline,
    vocabulary: &Vocabulary,
    path: &Path,
) -> Result<FileOutput, PipelineError> {
    let raw = read_lossy(path)?;
    let file_id = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("transcript.txt")
        .to_string();
    let dialect = DialectProfile::from_file_id(&file_id);

    let mut events = Vec::new();
    let mut normalized_lines: Vec<String> = Vec::new();
    let mut segment_blocks: Vec<Vec<String>> = Vec::new();

    for (index, turn) in parse_turns(&raw).iter().enumerate() {
        let meta = TurnMeta {
            file_id: file_id.clone(),
            utterance_id: format!("UD{:05}", index + 1),
            line_number: index + 1,
        };
        let outcome = pipeline.normalize_turn(turn, &meta, vocabulary, dialect);
        events.extend(outcome.events);

        let Some(content) = outcome.content else { continue };
        normalized_lines.push(format!("{}: {}", turn.label, content));

        let sentences = pipeline.segment(&content);
        if !sentences.is_empty() {
            segment_blocks
                .push(sentences.into_iter().map(|s| format!("{}: {}", turn.label, s)).collect());
        }
    }

    let mut normalized = normalized_lines.join("\n");
    if !normalized.is_empty() {
        normalized.push('\n');
    }
    let mut segmented =
        segment_blocks.iter().map(|block| block.join("\n")).collect::<Vec<_>>().join("\n\n");
    if !segmented.is_empty() {
        segmented.push('\n');
    }

    Ok(FileOutput { file_id, normalized, segmented, events })
}

fn write_outputs(out_dir: &Path, input: &Path, output: &FileOutput) -> Result<(), PipelineError> {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("transcript");
    let norm_path = out_dir.join(format!("{stem}_norm.txt"));
    let seg_path = out_dir.join(format!("{stem}_seg.txt"));
    fs::write(&norm_path, &output.normalized)
        .map_err(|source| PipelineError::Write { path: norm_path.clone(), source })?;
    fs::write(&seg_path, &output.segmented)
        .map_err(|source| PipelineError::Write { path: seg_path.clone(), source })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Options;
    use crate::capabilities::testing::SPANISH_SAMPLE;
    use crate::capabilities::{LexiconAnalyzer, WordListOracle};

    fn pipeline() -> Arc<Pipeline> {
        let oracle = WordListOracle::from_word_list("casa\nbueno\nsin\n");
        let analyzer = LexiconAnalyzer::from_tsv(SPANISH_SAMPLE);
        Arc::new(Pipeline::new(
            Arc::new(oracle),
            Arc::new(analyzer),
            Options { min_boundary_tokens: 3 },
        ))
    }

    #[test]
    fn round_trip_preserves_labels_and_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        fs::create_dir_all(&input).unwrap();
        fs::write(
            input.join("003_entrevista.txt"),
            "E1: bue- [bueno] eso fue / porque sí mismo\nI1: en mi CASA (risas) vivimos\n",
        )
        .unwrap();
        fs::write(input.join("014_asturias.txt"), "I1: los fíos ya no\n").unwrap();

        let config = RunConfig {
            input: input.clone(),
            output: output.clone(),
            log_path: dir.path().join("log.csv"),
            timeout: Duration::from_secs(30),
        };
        let summary = run_corpus(pipeline(), &config).unwrap();
        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.files_skipped, 0);
        assert!(summary.log_rows > 0);

        let norm = fs::read_to_string(output.join("003_entrevista_norm.txt")).unwrap();
        assert!(norm.starts_with("E1: bueno eso fue"));
        assert!(norm.contains("I1: en mi casa vivimos"));

        let seg = fs::read_to_string(output.join("003_entrevista_seg.txt")).unwrap();
        assert!(seg.contains("E1: bueno eso fue"));
        assert!(seg.contains("E1: porque sí mismo"));

        let asturian = fs::read_to_string(output.join("014_asturias_norm.txt")).unwrap();
        assert_eq!(asturian, "I1: los hijos ya no\n");

        let log = fs::read_to_string(dir.path().join("log.csv")).unwrap();
        assert!(log.starts_with('\u{feff}'));
        assert!(log.lines().next().unwrap().starts_with("file_id;utterance_id"));
    }

    #[test]
    fn empty_corpus_is_a_setup_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            input: dir.path().to_path_buf(),
            output: dir.path().join("out"),
            log_path: dir.path().join("log.csv"),
            timeout: Duration::from_secs(5),
        };
        let err = run_corpus(pipeline(), &config).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyCorpus { .. }));
    }

    #[test]
    fn nested_directories_are_discovered_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/one.txt"), "E1: hola\n").unwrap();
        fs::write(dir.path().join("b/two.txt"), "E1: hola\n").unwrap();
        fs::write(dir.path().join("b/skip.md"), "no").unwrap();
        let files = collect_transcripts(dir.path()).unwrap();
        let names: Vec<String> =
            files.iter().map(|p| p.file_name().unwrap().to_string_lossy().into_owned()).collect();
        assert_eq!(names, vec!["one.txt".to_string(), "two.txt".to_string()]);
    }
}
