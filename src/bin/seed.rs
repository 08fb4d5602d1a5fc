use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use sqlx::PgPool;
use stackbox::{
    config::Config,
    db::make_db_pool,
    repos::{
        OnConflict, PgStorage,
        product::{CreateProductDbPayload, ProductRepo},
        workspace::{CreateWorkspaceDbPayload, WorkspaceRepo},
    },
};
use uuid::Uuid;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
struct SeedWorkspace {
    name: String,
    description: String,
    #[serde(default)]
    logo_url: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
struct SeedProduct {
    name: String,
    description: String,
    #[serde(default)]
    logo_url: Option<String>,
    /// Name of the owning workspace.
    workspace: String,
}

fn read_seeds<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<Vec<T>>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let seeds = serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(seeds))
}

async fn workspace_id_by_name(pool: &PgPool, name: &str) -> Result<Uuid> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM workspaces WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?
        .with_context(|| format!("workspace {} not found", name))
}

async fn seed_workspaces(repo: &WorkspaceRepo, seeds_dir: &Path) -> Result<()> {
    let Some(workspaces) = read_seeds::<SeedWorkspace>(&seeds_dir.join("workspaces.json"))? else {
        return Ok(());
    };
    for w in workspaces {
        let created = repo
            .create(
                CreateWorkspaceDbPayload {
                    name: w.name.clone(),
                    description: w.description,
                    logo_url: w.logo_url,
                },
                OnConflict::DoNothing,
            )
            .await
            .with_context(|| format!("inserting workspace {}", w.name))?;
        if created.is_none() {
            tracing::info!("workspace {} already exists, skipped", w.name);
        }
    }
    Ok(())
}

async fn seed_products(repo: &ProductRepo, pool: &PgPool, seeds_dir: &Path) -> Result<()> {
    let Some(products) = read_seeds::<SeedProduct>(&seeds_dir.join("products.json"))? else {
        return Ok(());
    };
    for p in products {
        let workspace_id = workspace_id_by_name(pool, &p.workspace).await?;
        let created = repo
            .create(
                CreateProductDbPayload {
                    name: p.name.clone(),
                    description: p.description,
                    logo_url: p.logo_url,
                    workspace_id,
                },
                OnConflict::DoNothing,
            )
            .await
            .with_context(|| format!("inserting product {}", p.name))?;
        if created.is_none() {
            tracing::info!("product {} already exists, skipped", p.name);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let config = Config::from_env()?;

    let seeds_dir = Path::new("seeds");
    if !seeds_dir.exists() {
        anyhow::bail!("seeds directory not found at {}", seeds_dir.display());
    }

    let pool = make_db_pool(&config.database_url).await?;
    let storage = PgStorage::new(pool.clone());

    // Seed in dependency order
    seed_workspaces(&WorkspaceRepo::new(storage.clone()), seeds_dir).await?;
    seed_products(&ProductRepo::new(storage), &pool, seeds_dir).await?;

    tracing::info!("seeding complete");
    Ok(())
}
