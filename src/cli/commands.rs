use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pantry", about = concat!("pantry v", env!("CARGO_PKG_VERSION"), " - recipes from TheMealDB, Gemini, and you"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep recipes.json in a different directory
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    /// Read config from this file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter config.toml
    Init(InitArgs),
    /// List recipes (seeds from TheMealDB when the store is empty)
    List,
    /// Show full details for a recipe
    Show(ShowArgs),
    /// Add a recipe by hand
    Add(AddArgs),
    /// Ask the AI for a recipe using an ingredient
    Suggest(SuggestArgs),
    /// Delete every recipe with the given ID
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Recipe ID
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Recipe title
    pub title: String,
    /// Short description or instructions
    pub description: String,
    /// Image URL
    pub image: String,
}

#[derive(Args)]
pub struct SuggestArgs {
    /// Ingredient to build the recipe around
    pub ingredient: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Recipe ID
    pub id: String,
}
