mod init;
pub use init::cmd_init;

use std::path::Path;

use crate::api::{self, GeminiClient, MealDbClient};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::storage::JsonFileStorage;
use crate::model::config::Config;
use crate::model::recipe::RecipeId;
use crate::ops::compose::Composer;
use crate::ops::detail::{DETAIL_ALERT, resolve_detail};
use crate::ops::store::RecipeStore;
use crate::ops::suggest::SuggestionForm;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let (data_dir, config_path) =
        config_io::resolve_locations(cli.data_dir.as_deref(), cli.config.as_deref());

    match cli.command {
        None => crate::tui::run(&data_dir, &config_path),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, &config_path),
            Commands::List => cmd_list(&data_dir, &config_path, json),
            Commands::Show(args) => cmd_show(args, &data_dir, &config_path, json),
            Commands::Add(args) => cmd_add(args, &data_dir, &config_path, json),
            Commands::Suggest(args) => cmd_suggest(args, &data_dir, &config_path, json),
            Commands::Delete(args) => cmd_delete(args, &data_dir, &config_path, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Everything one command needs: config, clients, and the opened store
/// with its bootstrap already run.
struct Session {
    config: Config,
    store: RecipeStore<JsonFileStorage>,
    source: MealDbClient,
    generator: GeminiClient,
}

fn open_session(data_dir: &Path, config_path: &Path) -> Result<Session, Box<dyn std::error::Error>> {
    let config = config_io::load_config(config_path)?;
    let (source, generator) = api::connect(&config)?;
    let mut store = RecipeStore::open(JsonFileStorage::in_dir(data_dir))?;
    store.bootstrap(&source, &config.mealdb.seed_keyword)?;
    Ok(Session {
        config,
        store,
        source,
        generator,
    })
}

/// Report a failed seed fetch without failing the command
fn warn_bootstrap_error(session: &Session) {
    if let Some(err) = session.store.error() {
        eprintln!("warning: {}", err);
    }
}

fn parse_id(raw: &str) -> Result<RecipeId, String> {
    raw.parse()
        .map_err(|_| format!("invalid recipe id \"{}\": expected an integer", raw))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(data_dir: &Path, config_path: &Path, json: bool) -> CmdResult {
    let session = open_session(data_dir, config_path)?;
    let store = &session.store;

    if json {
        let out = RecipeListJson {
            recipes: store.recipes().iter().map(recipe_to_json).collect(),
            error: store.error().map(str::to_string),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        if let Some(err) = store.error() {
            println!("{}", err);
        }
        if !store.is_empty() || store.error().is_none() {
            for line in format_recipe_listing(store.recipes()) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, data_dir: &Path, config_path: &Path, json: bool) -> CmdResult {
    let id = parse_id(&args.id)?;
    let session = open_session(data_dir, config_path)?;
    warn_bootstrap_error(&session);

    let recipe = session
        .store
        .get(id)
        .ok_or_else(|| format!("no recipe with id {}", id))?;
    let detail = resolve_detail(&session.source, recipe)
        .map_err(|e| format!("{}: {}", DETAIL_ALERT, e))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        for line in format_recipe_detail(&detail) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, data_dir: &Path, config_path: &Path, json: bool) -> CmdResult {
    let mut composer = Composer::new(args.title, args.description, args.image);
    // Checked before the store opens so an incomplete add never touches it
    if !composer.is_complete() {
        let missing: Vec<&str> = composer.missing().iter().map(|f| f.label()).collect();
        return Err(format!("missing {}: all three fields are required", missing.join(", ")).into());
    }

    let mut session = open_session(data_dir, config_path)?;
    warn_bootstrap_error(&session);
    let Some(id) = composer.submit(&mut session.store)? else {
        return Err("all three fields are required".into());
    };
    print_added(id, json)
}

fn cmd_suggest(args: SuggestArgs, data_dir: &Path, config_path: &Path, json: bool) -> CmdResult {
    if args.ingredient.is_empty() {
        return Err("an ingredient is required".into());
    }
    let mut session = open_session(data_dir, config_path)?;
    warn_bootstrap_error(&session);

    let mut form = SuggestionForm::new(args.ingredient);
    let template = session.config.ai.image_url_template.clone();
    let Some(id) = form.submit(&session.generator, &template, &mut session.store)? else {
        return Err("an ingredient is required".into());
    };

    if json {
        return print_added(id, json);
    }
    let title = session
        .store
        .get(id)
        .map(|r| r.title.clone())
        .unwrap_or_default();
    println!("{}  {}", id, title);
    Ok(())
}

fn cmd_delete(args: DeleteArgs, data_dir: &Path, config_path: &Path, json: bool) -> CmdResult {
    let id = parse_id(&args.id)?;
    let mut session = open_session(data_dir, config_path)?;
    warn_bootstrap_error(&session);

    let removed = session.store.delete_recipe(id)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&DeletedJson { id: id.0, removed })?
        );
    } else if removed == 0 {
        println!("no recipe with id {}", id);
    } else {
        println!("deleted {} ({} removed)", id, removed);
    }
    Ok(())
}

fn print_added(id: RecipeId, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(&AddedJson { id: id.0 })?);
    } else {
        println!("{}", id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_id("52795").unwrap(), RecipeId(52795));
        assert_eq!(parse_id(" 7 ").unwrap(), RecipeId(7));
    }

    #[test]
    fn parse_id_rejects_text() {
        let err = parse_id("abc").unwrap_err();
        assert!(err.contains("invalid recipe id \"abc\""));
    }
}
