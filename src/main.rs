use clap::{Parser, Subcommand};
use log::debug;
use tokio::io::{AsyncBufReadExt, BufReader};

use chef_enzo::{relay, render_markdown, AppConfig, ProviderFactory, RecipeProvider, Session};

#[derive(Parser)]
#[command(
    name = "chef-enzo",
    about = "Suggest a recipe from the ingredients you have on hand"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Provider to use instead of the configured default
    #[arg(long, global = true)]
    provider: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Suggest a recipe for the given ingredients
    Suggest {
        /// Ingredients on hand, e.g. avocado tomato "red onion" chili
        #[arg(required = true)]
        ingredients: Vec<String>,

        /// Print rendered HTML instead of markdown
        #[arg(long)]
        html: bool,
    },

    /// Run the HTTP relay
    Serve,

    /// Build the ingredient list line by line
    Interactive,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Command::Serve => relay::serve(&config, cli.provider.as_deref()).await?,
        Command::Suggest { ingredients, html } => {
            let provider = ProviderFactory::from_config(&config, cli.provider.as_deref())?;
            let recipe = chef_enzo::suggest_recipe_with(provider.as_ref(), &ingredients).await?;
            if html {
                println!("{}", render_markdown(&recipe));
            } else {
                println!("{}", recipe);
            }
        }
        Command::Interactive => {
            let provider = ProviderFactory::from_config(&config, cli.provider.as_deref())?;
            interactive(Session::new(config.min_ingredients), provider.as_ref()).await?;
        }
    }

    Ok(())
}

async fn interactive(
    mut session: Session,
    provider: &dyn RecipeProvider,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Add ingredients one per line. Commands: :list, :remove N, :recipe, :quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line.split_once(' ').unwrap_or((line, "")) {
            (":quit", _) => break,
            (":list", _) => print_ingredients(&session),
            (":remove", index) => match index.trim().parse::<usize>() {
                Ok(n) if n > 0 => match session.remove_ingredient(n - 1) {
                    Some(removed) => println!("Removed {}", removed),
                    None => println!("No ingredient #{}", n),
                },
                _ => println!("Usage: :remove N"),
            },
            (":recipe", _) => {
                if !session.can_request_recipe() {
                    println!("Add a few more ingredients first.");
                    continue;
                }
                println!("Asking Chef Enzo...");
                session.request_recipe(provider).await;
                let view = session.view();
                match (view.error, view.recipe_markdown) {
                    (Some(message), _) => eprintln!("{}", message),
                    (None, Some(recipe)) => println!("{}", recipe),
                    (None, None) => {}
                }
            }
            _ => {
                session.set_draft(line);
                if session.submit_draft() {
                    print_ingredients(&session);
                }
            }
        }
    }

    Ok(())
}

fn print_ingredients(session: &Session) {
    println!("Ingredients on hand:");
    for (i, ingredient) in session.ingredients().list_ingredients().iter().enumerate() {
        println!("  {}. {}", i + 1, ingredient);
    }
    if session.view().show_recipe_button {
        println!("Ready for a recipe? Type :recipe");
    }
}
