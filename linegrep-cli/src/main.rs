use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use linegrep::{GrepConfig, GrepError, GrepSession};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Search for patterns in each input file, or standard input.
///
/// Patterns come from `-e` lists, `-f` files, or the first positional
/// argument when neither was given; every remaining positional is an
/// input file. Exits 0 if any line matched, 1 if none did, 2 on error.
#[derive(Debug, Parser)]
#[command(name = "linegrep", version, about)]
struct Cli {
    /// Write only a count of matching lines per input file
    #[arg(short = 'c')]
    count: bool,

    /// Add newline-separated patterns (repeatable)
    #[arg(short = 'e', value_name = "PATTERNS")]
    patterns: Vec<String>,

    /// Interpret patterns as extended regular expressions
    #[arg(short = 'E')]
    extended_regexp: bool,

    /// Read patterns from a file, one per line (repeatable)
    #[arg(short = 'f', value_name = "FILE")]
    pattern_files: Vec<PathBuf>,

    /// Match patterns as fixed strings, not regular expressions
    #[arg(short = 'F')]
    fixed_strings: bool,

    /// Ignore case distinctions in patterns and input
    #[arg(short = 'i')]
    ignore_case: bool,

    /// Write only the names of files containing matches
    #[arg(short = 'l')]
    files_with_matches: bool,

    /// Prefix each matching line with its line number
    #[arg(short = 'n')]
    line_number: bool,

    /// Suppress normal output; the exit status alone reports matches
    #[arg(short = 'q')]
    quiet: bool,

    /// Suppress messages about missing or unreadable input files
    #[arg(short = 's')]
    no_messages: bool,

    /// Select lines that do NOT match any pattern
    #[arg(short = 'v')]
    invert_match: bool,

    /// Match only whole lines
    #[arg(short = 'x')]
    line_regexp: bool,

    /// Pattern (when neither -e nor -f was given) followed by input files
    #[arg(value_name = "ARGS")]
    args: Vec<String>,
}

/// One pattern argument in its command-line position: `-e` supplies a
/// block inline, `-f` names a pattern file.
#[derive(Debug)]
enum PatternSource<'a> {
    Block(&'a str),
    File(&'a Path),
}

/// Merges `-e` and `-f` occurrences back into the order they appeared
/// on the command line, so pattern files are read in argument order.
fn ordered_pattern_sources<'a>(cli: &'a Cli, matches: &ArgMatches) -> Vec<PatternSource<'a>> {
    let mut sources: Vec<(usize, PatternSource)> = Vec::new();
    if let Some(indices) = matches.indices_of("patterns") {
        sources.extend(indices.zip(cli.patterns.iter().map(|block| PatternSource::Block(block))));
    }
    if let Some(indices) = matches.indices_of("pattern_files") {
        sources.extend(indices.zip(cli.pattern_files.iter().map(|path| PatternSource::File(path))));
    }
    sources.sort_by_key(|(index, _)| *index);
    sources.into_iter().map(|(_, source)| source).collect()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let matches = Cli::command().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(error) => error.exit(),
    };
    ExitCode::from(run(cli, &matches))
}

fn run(cli: Cli, matches: &ArgMatches) -> u8 {
    let config = GrepConfig {
        count_only: cli.count,
        extended_regex: cli.extended_regexp,
        fixed_string: cli.fixed_strings,
        case_insensitive: cli.ignore_case,
        names_only: cli.files_with_matches,
        line_numbers: cli.line_number,
        quiet: cli.quiet,
        suppress_file_errors: cli.no_messages,
        invert_match: cli.invert_match,
        full_line_match: cli.line_regexp,
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    let mut session = GrepSession::new(config, &mut out, &mut err);

    for source in ordered_pattern_sources(&cli, matches) {
        match source {
            PatternSource::Block(block) => session.add_pattern_block(block),
            PatternSource::File(path) => session.add_pattern_file(path),
        }
    }

    // Without -e or -f the first positional argument supplies the
    // patterns; everything after it names input files.
    let mut positionals = cli.args.iter();
    if session.pattern_count() == 0 {
        match positionals.next() {
            Some(pattern) => session.add_pattern_block(pattern),
            None => session.record_error(GrepError::MissingPattern),
        }
    }
    let files: Vec<PathBuf> = positionals.map(PathBuf::from).collect();

    debug!(
        patterns = session.pattern_count(),
        files = files.len(),
        "starting scan session"
    );
    session.run(&files) as u8
}
