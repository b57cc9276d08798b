//! notes-render - render course notes with highlighted code blocks

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use course_notes::config::Config;
use course_notes::error::{NotesError, Result};
use course_notes::render::{render_checked, to_html, write_ansi, Document, TerminalOptions};
use course_notes::store::{Catalog, ContentStore, Id, MemoryStore};
use course_notes::syntax::LanguageRegistry;

/// Command line options
#[derive(Debug, Default)]
struct Options {
    html: bool,
    no_color: bool,
    list_languages: bool,
    language_file: Option<PathBuf>,
    catalog: Option<PathBuf>,
    chapter: Option<Id>,
    input: Option<PathBuf>,
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Initialize the logging system
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args)? {
        Some(options) => options,
        None => return Ok(()),
    };

    let config = Config::load();
    let mut registry = LanguageRegistry::new();
    if let Some(path) = options.language_file.as_ref().or(config.languages_file.as_ref()) {
        registry.load_file(path)?;
    }

    if options.list_languages {
        for name in registry.list_languages() {
            println!("{}", name);
        }
        return Ok(());
    }

    let documents = match &options.catalog {
        Some(path) => {
            let store = Catalog::load(path)?.into_store()?;
            match options.chapter {
                Some(chapter_id) => chapter_documents(&store, chapter_id, &registry, &config)?,
                None => {
                    print_outline(&store);
                    return Ok(());
                }
            }
        }
        None => {
            let raw = read_input(options.input.as_ref())?;
            vec![render_checked(&raw, &registry, config.max_input_bytes)?]
        }
    };

    log::info!("Rendering {} document(s)", documents.len());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if options.html {
        for doc in &documents {
            out.write_all(to_html(doc).as_bytes())?;
        }
        out.flush()?;
    } else {
        let terminal = TerminalOptions {
            color: config.color && !options.no_color,
            tab_width: config.tab_width,
        };
        for doc in &documents {
            write_ansi(&mut out, doc, &terminal)?;
        }
    }

    Ok(())
}

/// Parse arguments. `Ok(None)` means help or version was printed.
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(None);
            }
            "-V" | "--version" => {
                print_version();
                return Ok(None);
            }
            "--html" => options.html = true,
            "--no-color" => options.no_color = true,
            "--list-languages" => options.list_languages = true,
            "--language-file" => options.language_file = Some(PathBuf::from(value_for(arg, iter.next())?)),
            "--catalog" => options.catalog = Some(PathBuf::from(value_for(arg, iter.next())?)),
            "--chapter" => {
                let value = value_for(arg, iter.next())?;
                let id = value
                    .parse::<Id>()
                    .map_err(|_| NotesError::Message(format!("Invalid chapter id: {}", value)))?;
                options.chapter = Some(id);
            }
            "-" => options.input = None,
            other if other.starts_with('-') => {
                return Err(NotesError::Message(format!("Unknown option: {}", other)));
            }
            path => options.input = Some(PathBuf::from(path)),
        }
    }

    if options.chapter.is_some() && options.catalog.is_none() {
        return Err(NotesError::Message("--chapter needs --catalog".to_string()));
    }

    Ok(Some(options))
}

fn value_for<'a>(flag: &str, value: Option<&'a String>) -> Result<&'a str> {
    value
        .map(|v| v.as_str())
        .ok_or_else(|| NotesError::Message(format!("{} needs a value", flag)))
}

/// Read the note from a file, or stdin when no file was given
fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

/// Render every published note of a chapter
fn chapter_documents(
    store: &MemoryStore,
    chapter_id: Id,
    registry: &LanguageRegistry,
    config: &Config,
) -> Result<Vec<Document>> {
    if store.chapter(chapter_id).is_none() {
        return Err(NotesError::NotFound { kind: "Chapter", id: chapter_id });
    }
    store
        .published_notes(chapter_id)
        .iter()
        .map(|note| render_checked(&note.content, registry, config.max_input_bytes))
        .collect()
}

fn print_outline(store: &MemoryStore) {
    for course in store.courses() {
        println!("{}", course.title);
        for chapter in store.chapters(course.id) {
            let published = store.published_notes(chapter.id).len();
            println!("  [{}] {} ({} note(s))", chapter.id, chapter.title, published);
        }
    }
}

fn print_usage() {
    println!("notes-render {} - render course notes", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: notes-render [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE (or stdin) and prints it with highlighted code blocks.");
    println!();
    println!("Options:");
    println!("  --html                  Emit an HTML fragment instead of terminal output");
    println!("  --no-color              Disable terminal colors");
    println!("  --language-file PATH    Load extra language rule sets (TOML)");
    println!("  --catalog PATH          Read courses from a TOML catalog");
    println!("  --chapter ID            With --catalog, render the chapter's published notes");
    println!("  --list-languages        List known languages and exit");
    println!("  -h, --help              Show this help message");
    println!("  -V, --version           Show version information");
    println!();
    println!("Settings are read from ~/.notes-render.conf; set RUST_LOG for diagnostics.");
}

fn print_version() {
    println!("notes-render {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["--html", "--chapter", "3", "--catalog", "c.toml", "note.md"]))
            .unwrap()
            .unwrap();
        assert!(options.html);
        assert_eq!(options.chapter, Some(3));
        assert_eq!(options.catalog, Some(PathBuf::from("c.toml")));
        assert_eq!(options.input, Some(PathBuf::from("note.md")));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--chapter"])).is_err());
        assert!(parse_args(&args(&["--chapter", "x"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
        assert!(matches!(
            parse_args(&args(&["--chapter", "3", "note.md"])),
            Err(NotesError::Message(_))
        ));
    }

    #[test]
    fn test_stdin_dash() {
        let options = parse_args(&args(&["-"])).unwrap().unwrap();
        assert_eq!(options.input, None);
    }
}
