use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use weblingo::config::Settings;
use weblingo::dom::Document;
use weblingo::render;
use weblingo::storage::PreferenceStore;
use weblingo::translator::Translator;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let workspace_root = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let settings = Settings::load(&workspace_root)?;

    let store = PreferenceStore::new(settings.storage_path.clone());
    let mut translator = Translator::new(
        settings.build_source(),
        store,
        Document::placeholder_page(),
        settings.default_language,
    );
    if settings.track_fragment {
        translator = translator.with_fragment(settings.initial_fragment.clone());
    }

    // The page-ready trigger: resolve the startup language and load it.
    translator.start();

    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        // Map both triggers to a plain event first; the handlers below need
        // the translator mutably, so the arm bodies must not touch it.
        let event = tokio::select! {
            applied = translator.next_completion() => {
                if applied { Input::Completion } else { Input::End }
            }
            maybe_line = lines.next_line() => {
                match maybe_line {
                    Ok(Some(line)) => Input::Line(line),
                    _ => Input::End,
                }
            }
        };

        match event {
            Input::Completion => print_page(&translator),
            Input::Line(line) => {
                if !handle_command(&mut translator, line.trim()) {
                    break;
                }
            }
            Input::End => break,
        }
    }

    Ok(())
}

/// What the demo loop reacts to: a finished dictionary load or a console
/// command.
enum Input {
    Completion,
    Line(String),
    End,
}

/// Dispatches one console command. Returns `false` to quit.
fn handle_command(translator: &mut Translator, line: &str) -> bool {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    match (command, rest.trim()) {
        ("lang", code) if !code.is_empty() => translator.change_language(code),
        ("goto", fragment) if !fragment.is_empty() => translator.handle_fragment_change(fragment),
        ("get", key) if !key.is_empty() => println!("{}", translator.translation(key)),
        ("show", _) => print_page(translator),
        ("title", _) => println!("{}", translator.document().title()),
        ("quit", _) | ("q", _) => return false,
        ("", _) => {}
        _ => print_help(),
    }
    true
}

fn print_help() {
    println!("commands:");
    println!("  lang <code>    switch language (persists the choice)");
    println!("  goto <token>   simulate a URL fragment change");
    println!("  get <key>      look up one translation");
    println!("  show           print the rendered page");
    println!("  title          print the page title");
    println!("  quit           exit");
}

/// Prints the rendered state of the placeholder page: the title, every
/// marked element's text, and the language indicator.
fn print_page(translator: &Translator) {
    let document = translator.document();
    println!("--- [{}] {}", translator.current_language(), document.title());
    document.root().walk(&mut |el| {
        if let Some(key) = el.attr(render::TRANSLATE_ATTR) {
            println!("{key:>20}  {}", el.text_content());
        }
    });
    if let Some(indicator) = document.root().find_by_id(render::INDICATOR_ID) {
        println!("{:>20}  {}", "switcher", indicator.text_content());
    }
    if let Some(fragment) = translator.fragment() {
        println!("{:>20}  #{fragment}", "fragment");
    }
}
