use std::process::ExitCode;

use catalog_taxonomy::domain::subcategory::SubCategory;
use catalog_taxonomy::domain::types::{CategoryId, SubCategoryId};
use catalog_taxonomy::dto::subcategories::SubCategoryDto;
use catalog_taxonomy::forms::subcategories::{
    AddSubCategoryForm, AddSubCategoryFormPayload, UpdateSubCategoryForm,
    UpdateSubCategoryFormPayload,
};
use catalog_taxonomy::models::config::ServerConfig;
use catalog_taxonomy::repository::http::HttpRepository;
use catalog_taxonomy::services::ServiceResult;
use catalog_taxonomy::services::categories::show_categories;
use catalog_taxonomy::services::parents::resolve_available_parents;
use catalog_taxonomy::services::subcategories::{
    create_subcategory, describe_subcategory, show_subcategories, update_subcategory,
};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taxonomy", about = "Inspect and edit the catalog subcategory hierarchy")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List categories.
    Categories,
    /// Print the subcategories of a category in display order.
    Tree { category_id: i32 },
    /// Print the subcategories that may parent a node in a category.
    Parents {
        category_id: i32,
        /// Node being edited, never offered as its own parent.
        #[arg(long)]
        exclude: Option<i32>,
    },
    /// Create a subcategory.
    Add {
        category_id: i32,
        #[command(flatten)]
        fields: Fields,
    },
    /// Replace a subcategory, optionally moving it under another parent.
    Update {
        subcategory_id: i32,
        category_id: i32,
        #[command(flatten)]
        fields: Fields,
    },
}

#[derive(Args)]
struct Fields {
    name: String,
    /// Top-level subcategory to nest under; omit for a top-level node.
    #[arg(long)]
    parent: Option<i32>,
    /// Derived from the name when omitted.
    #[arg(long)]
    slug: Option<String>,
    #[arg(long)]
    sort_order: Option<i32>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    inactive: bool,
}

fn print_rows(rows: &[SubCategoryDto]) {
    for row in rows {
        let indent = "    ".repeat(usize::from(row.depth));
        let status = if row.is_active { "" } else { " [inactive]" };
        println!("{indent}#{} {}{status}", row.id, row.label);
    }
}

/// The write already succeeded, so a failed follow-up listing only degrades
/// the output.
async fn print_written(subcategory: &SubCategory, repo: &HttpRepository) {
    match describe_subcategory(subcategory, repo).await {
        Ok(row) => print_rows(&[row]),
        Err(e) => {
            log::warn!("Failed to describe subcategory {}: {e}", subcategory.id);
            match subcategory.parent_id {
                Some(parent) => {
                    println!("#{} {} (parent #{parent})", subcategory.id, subcategory.name)
                }
                None => println!("#{} {}", subcategory.id, subcategory.name),
            }
        }
    }
}

async fn run(command: Command, repo: &HttpRepository) -> ServiceResult<()> {
    match command {
        Command::Categories => {
            for category in show_categories(repo).await? {
                println!("#{} {}", category.id, category.name);
            }
        }
        Command::Tree { category_id } => {
            let rows = show_subcategories(CategoryId::new(category_id)?, repo).await?;
            print_rows(&rows);
        }
        Command::Parents {
            category_id,
            exclude,
        } => {
            let exclude = exclude.map(SubCategoryId::new).transpose()?;
            let parents =
                resolve_available_parents(repo, CategoryId::new(category_id)?, exclude).await?;
            if parents.is_empty() {
                println!("No top-level subcategories yet.");
            }
            for parent in parents {
                println!("#{} {}", parent.id, parent.name);
            }
        }
        Command::Add {
            category_id,
            fields,
        } => {
            let payload = AddSubCategoryFormPayload::try_from(AddSubCategoryForm {
                category_id,
                parent_id: fields.parent,
                name: fields.name,
                slug: fields.slug,
                is_active: Some(!fields.inactive),
                sort_order: fields.sort_order,
                description: fields.description,
            })?;
            let created = create_subcategory(payload, repo).await?;
            print_written(&created, repo).await;
        }
        Command::Update {
            subcategory_id,
            category_id,
            fields,
        } => {
            let payload = UpdateSubCategoryFormPayload::try_from(UpdateSubCategoryForm {
                subcategory_id,
                category_id,
                parent_id: fields.parent,
                name: fields.name,
                slug: fields.slug,
                is_active: Some(!fields.inactive),
                sort_order: fields.sort_order,
                description: fields.description,
            })?;
            let updated = update_subcategory(payload, repo).await?;
            print_written(&updated, repo).await;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
    let config = match ServerConfig::load(&app_env) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let repo = match HttpRepository::new(&config) {
        Ok(repo) => repo,
        Err(e) => {
            log::error!("Failed to build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &repo).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
