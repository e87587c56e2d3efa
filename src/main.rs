mod ui;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use wordwhittler::app::{word_of_interest, App, Panel};
use wordwhittler::check::{diagnostic_at, Checker, Diagnostic, HarperChecker};
use wordwhittler::config::AppConfig;
use wordwhittler::lexicon::{LexicalStore, LexiconFormat, LexiconSource};
use wordwhittler::models::SenseId;
use wordwhittler::tree::LookupTree;
use wordwhittler::utils::strings::char_to_byte;

#[derive(Parser, Debug)]
#[command(name = "wordwhittler")]
#[command(version)]
#[command(about = "Thesaurus trees, phrase reduction and text counters over WordNet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Lexicon to load: a JSON file or a WordNet dict directory (bundled sample when omitted)
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    /// Format of --lexicon
    #[arg(long, value_enum, global = true)]
    format: Option<LexiconFormat>,

    /// Print machine-readable JSON instead of tables
    #[arg(long, default_value_t = false, global = true, help_heading = "Flags")]
    json: bool,

    /// Drop synonyms already contained in a phrase of the same sense
    #[arg(long, default_value_t = false, global = true, help_heading = "Flags")]
    hide_subsumed: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true, help_heading = "Flags")]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Relation tree and root words for a word or phrase
    Lookup {
        #[arg(required = true)]
        text: Vec<String>,

        /// Also print the full definition and the first synonym's gloss
        #[arg(long, default_value_t = false)]
        define: bool,
    },
    /// Numbered definitions for a word or phrase
    Define {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Look up the word at a position in a document
    At {
        file: PathBuf,

        /// Caret position, in characters
        #[arg(long)]
        caret: usize,

        /// Other end of a selection anchored at the caret (may be before it)
        #[arg(long)]
        selection_end: Option<usize>,
    },
    /// Multiword phrases that make single-word synonyms redundant
    Phrases {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Character, word and tweet counters for a document
    Stats { file: PathBuf },
    /// Spelling, grammar and style diagnostics for a document
    Check { file: PathBuf },
}

#[derive(Serialize)]
struct LookupOutput<'a> {
    selection: &'a str,
    roots: String,
    tree: Option<&'a LookupTree>,
    definition: Option<String>,
    first_gloss: Option<GlossOutput<'a>>,
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct GlossOutput<'a> {
    word: &'a str,
    gloss: &'a str,
}

#[derive(Serialize)]
struct AtOutput<'a> {
    lookup: LookupOutput<'a>,
    diagnostic: Option<DiagnosticOutput<'a>>,
}

#[derive(Serialize)]
struct PhraseOutput<'a> {
    phrase: &'a str,
    sense: SenseId,
    gloss: &'a str,
}

#[derive(Serialize)]
struct DiagnosticOutput<'a> {
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
    region: &'a str,
    display_message: String,
}

impl<'a> DiagnosticOutput<'a> {
    fn new(diagnostic: &'a Diagnostic, text: &'a str) -> Self {
        Self {
            diagnostic,
            region: diagnostic.region(text),
            display_message: diagnostic.display_message(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let app_config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config, using defaults. Error: {}",
            e
        );
        AppConfig::default()
    });

    let source = LexiconSource::new(
        cli.lexicon.clone().or_else(|| app_config.lexicon.path.clone()),
        cli.format.unwrap_or(app_config.lexicon.format),
    );
    let lexicon = source
        .load()
        .with_context(|| format!("Could not load lexicon: {:?}", source))?;

    let mut app = App::new(&lexicon, app_config.limits);
    app.hide_subsumed_synonyms = cli.hide_subsumed || app_config.display.hide_subsumed_synonyms;

    match &cli.command {
        Command::Lookup { text, define } => {
            app.set_word_of_interest(&text.join(" "));
            if cli.json {
                let out = lookup_output(&app, *define)?;
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                show_panel(&app, &app_config, *define)?;
            }
        }
        Command::Define { text } => {
            app.set_word_of_interest(&text.join(" "));
            let definition = app.definition()?.unwrap_or_default();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&definition)?);
            } else {
                ui::print_wrapped(&definition, ui::utils::wrap_width(app_config.display.wrap_width));
            }
        }
        Command::At {
            file,
            caret,
            selection_end,
        } => {
            let text = read_document(file)?;
            let selection = selection_end.map(|end| *caret..end);
            let word = word_of_interest(
                &text,
                *caret,
                selection,
                app_config.limits.max_selection_chars,
            );
            app.set_word_of_interest(&word);

            let checker = HarperChecker::default();
            let diagnostics = checker
                .check(&text)
                .with_context(|| format!("Checker '{}' failed", checker.name()))?;
            let at_caret = diagnostic_at(&diagnostics, char_to_byte(&text, *caret));

            if cli.json {
                let out = AtOutput {
                    lookup: lookup_output(&app, false)?,
                    diagnostic: at_caret.map(|d| DiagnosticOutput::new(d, &text)),
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                show_panel(&app, &app_config, false)?;
                if let Some(d) = at_caret {
                    ui::print_diagnostics(&text, std::slice::from_ref(d), &app_config.theme);
                }
            }
        }
        Command::Phrases { limit } => {
            let store = app.store();
            let reduction = app.phrase_reduction()?;
            let take = limit.unwrap_or(usize::MAX);
            let mut rows = Vec::new();
            for (phrase, sense) in reduction.iter().take(take) {
                rows.push(PhraseOutput {
                    phrase,
                    sense,
                    gloss: store.sense(sense)?.gloss.as_str(),
                });
            }
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("\n  {} phrases\n", reduction.len());
                for row in rows {
                    println!("  {:<32}{}", row.phrase, row.gloss);
                }
                println!();
            }
        }
        Command::Stats { file } => {
            let text = read_document(file)?;
            let rows = app.info_rows(&text);
            if cli.json {
                let map: serde_json::Map<String, serde_json::Value> = rows
                    .into_iter()
                    .map(|(label, value)| (label.to_string(), serde_json::Value::String(value)))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                println!();
                ui::print_rows(&rows, &app_config.theme);
                println!();
            }
        }
        Command::Check { file } => {
            let text = read_document(file)?;
            let checker = HarperChecker::default();
            let diagnostics = checker
                .check(&text)
                .with_context(|| format!("Checker '{}' failed", checker.name()))?;
            if cli.json {
                let out: Vec<DiagnosticOutput> = diagnostics
                    .iter()
                    .map(|d| DiagnosticOutput::new(d, &text))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                ui::print_diagnostics(&text, &diagnostics, &app_config.theme);
            }
        }
    }

    Ok(())
}

fn lookup_output<'a, S>(app: &'a App<'_, S>, define: bool) -> Result<LookupOutput<'a>>
where
    S: LexicalStore + Sync + ?Sized,
{
    let (definition, first_gloss) = if define {
        let gloss = app
            .first_gloss()?
            .map(|(word, gloss)| GlossOutput { word, gloss });
        (app.definition()?, gloss)
    } else {
        (None, None)
    };
    let rows = app.word_rows();
    let roots = rows.get(1).map(|(_, v)| v.clone()).unwrap_or_default();
    let mut out = LookupOutput {
        selection: "",
        roots,
        tree: None,
        definition,
        first_gloss,
        error: None,
    };
    match app.panel() {
        Panel::Empty => {}
        Panel::Ready {
            selection, tree, ..
        } => {
            out.selection = selection.as_str();
            out.tree = Some(tree);
        }
        Panel::Failed { selection, message } => {
            out.selection = selection.as_str();
            out.error = Some(message.as_str());
        }
    }
    Ok(out)
}

fn show_panel<S>(app: &App<'_, S>, cfg: &AppConfig, define: bool) -> Result<()>
where
    S: LexicalStore + Sync + ?Sized,
{
    match app.panel() {
        Panel::Empty => println!("\n  Nothing to look up.\n"),
        Panel::Ready { tree, .. } => {
            println!();
            ui::print_rows(&app.word_rows(), &cfg.theme);
            ui::print_tree(tree, &cfg.theme);
        }
        Panel::Failed { selection, message } => {
            ui::print_error(&format!("Lookup of '{}' failed: {}", selection, message), &cfg.theme);
        }
    }

    if !define {
        return Ok(());
    }
    let width = ui::utils::wrap_width(cfg.display.wrap_width);
    if let Some((word, gloss)) = app.first_gloss()? {
        ui::print_wrapped(&format!("{}: {}", word, gloss), width);
        println!();
    }
    if let Some(text) = app.definition()? {
        ui::print_wrapped(&text, width);
        println!();
    }
    Ok(())
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Could not read document: {}", path.display()))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "wordwhittler",
            "lookup",
            "kick",
            "the",
            "bucket",
            "--json",
            "--format",
            "wndb",
            "-vv",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.format, Some(LexiconFormat::Wndb));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Lookup { text, define } => {
                assert_eq!(text.join(" "), "kick the bucket");
                assert!(!define);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn at_takes_a_selection() {
        let cli = Cli::try_parse_from([
            "wordwhittler",
            "at",
            "notes.txt",
            "--caret",
            "4",
            "--selection-end",
            "11",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::At {
                caret: 4,
                selection_end: Some(11),
                ..
            }
        ));
    }

    #[test]
    fn lookup_needs_text() {
        assert!(Cli::try_parse_from(["wordwhittler", "lookup"]).is_err());
    }

    #[test]
    fn default_config_is_usable() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.limits.tweet_limit, 280);
    }
}
