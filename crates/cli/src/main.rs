//! CLI tool for editing slide decks stored as JSON.

mod store;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use deck_core::{
    table, AgentEvent, Editor, Importer, LayoutType, OpOutcome, Presentation, SlideElement,
    ThemeType,
};
use std::fs;
use std::path::{Path, PathBuf};
use store::JsonDeckFile;

/// Apply edit batches, layouts, and themes to JSON slide decks.
#[derive(Parser, Debug)]
#[command(name = "deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Write the result here instead of printing it to stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new deck with one slide
    New {
        /// Layout for the first slide
        #[arg(short, long, value_parser = parse_layout)]
        layout: Option<LayoutType>,

        /// Theme for the first slide
        #[arg(short, long, value_parser = parse_theme)]
        theme: Option<ThemeType>,
    },

    /// Apply an agent event ({"operations": [...]} or {"slidesData": [...]})
    Apply {
        /// Deck to edit
        deck: PathBuf,

        /// JSON file holding the event
        event: PathBuf,

        /// Slide that operations without a slideIndex target
        #[arg(short, long, default_value = "0")]
        active: usize,
    },

    /// Stamp a layout onto one slide
    Layout {
        deck: PathBuf,

        #[arg(short, long)]
        slide: usize,

        #[arg(short, long, value_parser = parse_layout)]
        layout: LayoutType,
    },

    /// Recolor one slide, or every slide, with a theme
    Theme {
        deck: PathBuf,

        #[arg(short, long, value_parser = parse_theme)]
        theme: ThemeType,

        /// Only this slide (default: all slides)
        #[arg(short, long)]
        slide: Option<usize>,
    },

    /// Grow or shrink a table element
    Table {
        deck: PathBuf,

        #[arg(short, long)]
        slide: usize,

        /// Id of the table element
        #[arg(short, long)]
        element: String,

        #[arg(value_enum)]
        edit: TableEdit,
    },

    /// Print a summary of a deck
    Inspect { deck: PathBuf },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TableEdit {
    AddRow,
    RemoveRow,
    AddColumn,
    RemoveColumn,
}

fn parse_layout(name: &str) -> Result<LayoutType, String> {
    LayoutType::from_name(name).ok_or_else(|| format!("unknown layout '{}'", name))
}

fn parse_theme(name: &str) -> Result<ThemeType, String> {
    ThemeType::from_name(name).ok_or_else(|| format!("unknown theme '{}'", name))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match &args.command {
        Command::Inspect { deck } => {
            let presentation = load_deck(deck)?;
            print!("{}", summarize(&presentation));
            Ok(())
        }
        command => {
            let editor = run(command, args.verbose)?;
            emit(editor, args.output.as_ref())
        }
    }
}

/// Execute an editing command and return the resulting session.
fn run(command: &Command, verbose: bool) -> Result<Editor> {
    match command {
        Command::New { layout, theme } => {
            let mut editor = Editor::new(Presentation::new());
            if let Some(layout) = layout {
                editor.set_layout(0, *layout)?;
            }
            if let Some(theme) = theme {
                editor.set_theme(0, *theme)?;
            }
            Ok(editor)
        }
        Command::Apply {
            deck,
            event,
            active,
        } => {
            let mut editor = Editor::new(load_deck(deck)?);
            editor.set_active_slide(*active);

            let json = fs::read_to_string(event)
                .with_context(|| format!("Failed to read {}", event.display()))?;
            let event = AgentEvent::from_json(&json).context("Invalid agent event")?;

            let results = editor.handle_event(event)?;
            report(&results, verbose);
            Ok(editor)
        }
        Command::Layout {
            deck,
            slide,
            layout,
        } => {
            let mut editor = Editor::new(load_deck(deck)?);
            editor.set_layout(*slide, *layout)?;
            Ok(editor)
        }
        Command::Theme { deck, theme, slide } => {
            let mut editor = Editor::new(load_deck(deck)?);
            match slide {
                Some(index) => editor.set_theme(*index, *theme)?,
                None => editor.set_theme_all(*theme),
            }
            Ok(editor)
        }
        Command::Table {
            deck,
            slide,
            element,
            edit,
        } => {
            let mut editor = Editor::new(load_deck(deck)?);
            let helper: fn(&SlideElement) -> Option<SlideElement> = match edit {
                TableEdit::AddRow => table::add_table_row,
                TableEdit::RemoveRow => table::remove_table_row,
                TableEdit::AddColumn => table::add_table_column,
                TableEdit::RemoveColumn => table::remove_table_column,
            };
            if !editor.edit_table(*slide, element, helper)? {
                bail!("Table edit {:?} rejected for element {}", edit, element);
            }
            Ok(editor)
        }
        Command::Inspect { .. } => unreachable!("handled in main"),
    }
}

/// Load a deck, failing loudly rather than overwriting an unreadable file.
fn load_deck(path: &Path) -> Result<Presentation> {
    let slides = JsonDeckFile::new(path)
        .import()
        .with_context(|| format!("Failed to load deck {}", path.display()))?;
    Presentation::from_slides(slides).with_context(|| format!("Empty deck {}", path.display()))
}

/// Write or print the edited deck.
fn emit(mut editor: Editor, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            editor
                .save(&JsonDeckFile::new(path))
                .with_context(|| format!("Failed to save {}", path.display()))?;
            log::debug!("Written to: {}", path.display());
        }
        None => println!("{}", store::to_json(editor.presentation())?),
    }
    Ok(())
}

/// Log per-operation results of a batch.
fn report(results: &[OpOutcome], verbose: bool) {
    for (i, result) in results.iter().enumerate() {
        match result {
            OpOutcome::Applied => {
                if verbose {
                    eprintln!("  op {}: applied", i);
                }
            }
            OpOutcome::Skipped(e) => eprintln!("  op {}: skipped ({})", i, e),
        }
    }
}

/// One line per slide: index, layout, element count, and notes flag.
fn summarize(presentation: &Presentation) -> String {
    let mut out = format!(
        "{} slides, {} elements\n",
        presentation.len(),
        presentation.element_count()
    );
    for slide in presentation.slides() {
        out.push_str(&format!(
            "  [{}] {} layout={} theme={} elements={}{}\n",
            slide.index,
            slide.id,
            slide.layout.map_or("-".to_string(), |l| l.to_string()),
            slide.theme.map_or("-".to_string(), |t| t.to_string()),
            slide.elements.len(),
            if slide.notes.is_some() { " notes" } else { "" },
        ));
    }
    out
}
