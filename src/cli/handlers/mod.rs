mod init;
pub use init::cmd_init;

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::paths;
use crate::io::recovery;
use crate::io::storage::FileStore;
use crate::model::Context;
use crate::ops::store::{StoreError, TodoStore, open_file_store};

type CmdResult = Result<(), Box<dyn Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;

    match cli.command {
        None => Err("no subcommand given (run `wt` without arguments for the TUI)".into()),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(&data_dir, args),
            Commands::List(args) => cmd_list(&data_dir, args, json),
            Commands::Context(args) => cmd_context(&data_dir, args, json),
            Commands::Add(args) => cmd_add(&data_dir, args, json),
            Commands::Toggle(args) => cmd_toggle(&data_dir, args, json),
            Commands::Edit(args) => cmd_edit(&data_dir, args, json),
            Commands::Delete(args) => {
                let stdin = io::stdin();
                cmd_delete(&data_dir, args, &mut stdin.lock(), &mut io::stdout())
            }
            Commands::Recovery(args) => cmd_recovery(&data_dir, args, json),
        },
    }
}

/// Data directory from `-C`, the environment, or the XDG default.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf, Box<dyn Error>> {
    let dir = paths::data_dir(override_dir);
    if dir.exists() && !dir.is_dir() {
        return Err(format!("data directory {} is not a directory", dir.display()).into());
    }
    Ok(dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_todo(store: &TodoStore<FileStore>, key: &str, json: bool) -> CmdResult {
    let item = store
        .get(key)
        .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
    if json {
        print_json(&todo_to_json(key, item))
    } else {
        println!("{}", format_todo_line(key, item, true));
        Ok(())
    }
}

/// Ask a yes/no question. Only `y` or `yes` (any case) counts as yes.
pub fn confirm(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(data_dir: &Path, args: ListArgs, json: bool) -> CmdResult {
    let store = open_file_store(data_dir)?;

    let contexts: Vec<Context> = if args.all {
        vec![Context::Work, Context::Travel]
    } else {
        vec![args.context.unwrap_or(store.context())]
    };

    if json {
        let todos = store
            .items()
            .iter()
            .filter(|(_, item)| contexts.contains(&item.context))
            .map(|(key, item)| todo_to_json(key, item))
            .collect();
        let context = (!args.all).then(|| contexts[0].to_string());
        return print_json(&ListJson { context, todos });
    }

    for (i, context) in contexts.iter().enumerate() {
        let items: Vec<_> = store
            .items()
            .iter()
            .filter(|(_, item)| item.context == *context)
            .collect();
        let done = items.iter().filter(|(_, item)| item.completed).count();
        if i > 0 {
            println!();
        }
        println!("{}", format_list_header(*context, items.len(), done));
        for (key, item) in items {
            println!("  {}", format_todo_line(key, item, false));
        }
    }
    Ok(())
}

fn cmd_context(data_dir: &Path, args: ContextArgs, json: bool) -> CmdResult {
    let mut store = open_file_store(data_dir)?;
    if let Some(context) = args.context {
        store.set_context(context)?;
    }
    if json {
        print_json(&ContextJson {
            context: store.context().to_string(),
        })
    } else {
        println!("{}", store.context());
        Ok(())
    }
}

fn cmd_add(data_dir: &Path, args: AddArgs, json: bool) -> CmdResult {
    let mut store = open_file_store(data_dir)?;
    match store.add_item(&args.text)? {
        Some(key) => print_todo(&store, &key, json),
        None => Err("todo text is empty".into()),
    }
}

fn cmd_toggle(data_dir: &Path, args: KeyArgs, json: bool) -> CmdResult {
    let mut store = open_file_store(data_dir)?;
    store.toggle_complete(&args.key)?;
    print_todo(&store, &args.key, json)
}

fn cmd_edit(data_dir: &Path, args: EditArgs, json: bool) -> CmdResult {
    let mut store = open_file_store(data_dir)?;
    if !store.edit_text(&args.key, &args.text)? {
        return Err("todo text is empty".into());
    }
    print_todo(&store, &args.key, json)
}

fn cmd_delete(
    data_dir: &Path,
    args: DeleteArgs,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> CmdResult {
    let mut store = open_file_store(data_dir)?;
    let text = match store.get(&args.key) {
        Some(item) => item.text.clone(),
        None => {
            writeln!(output, "no todo with key {}", args.key)?;
            return Ok(());
        }
    };

    if !args.yes && !confirm(&format!("Delete \"{}\"?", text), input, output)? {
        writeln!(output, "kept")?;
        return Ok(());
    }

    store.delete_item(&args.key)?;
    writeln!(output, "deleted \"{}\"", text)?;
    Ok(())
}

fn cmd_recovery(data_dir: &Path, args: RecoveryArgs, json: bool) -> CmdResult {
    let entries = recovery::read_recovery_entries(data_dir, args.tail);
    if json {
        let values: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
        return print_json(&values);
    }
    if entries.is_empty() {
        println!("recovery log is empty");
        return Ok(());
    }
    for entry in &entries {
        print!("{}", entry.to_markdown());
    }
    Ok(())
}
