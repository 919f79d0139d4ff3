//! The `add-recipe` command: drives a capture session from flags.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use hearth_core::{build_payload, CaptureSession, Difficulty, DraftField, Ingredient, InputMode};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

/// Manual recipe fields. Anything given here overrides extracted values.
#[derive(Args, Debug, Default)]
pub struct RecipeArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Ingredient as "name|amount|unit"; repeat for each row
    #[arg(long = "ingredient", value_parser = parse_ingredient)]
    pub ingredients: Vec<Ingredient>,
    #[arg(long)]
    pub instructions: Option<String>,
    /// Prep time in minutes
    #[arg(long)]
    pub prep_time: Option<String>,
    /// Cook time in minutes
    #[arg(long)]
    pub cook_time: Option<String>,
    #[arg(long)]
    pub servings: Option<String>,
    /// easy, medium or hard
    #[arg(long, value_parser = parse_difficulty)]
    pub difficulty: Option<Difficulty>,
    #[arg(long)]
    pub cuisine: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
}

/// Raw inputs for AI-assisted extraction.
#[derive(Debug, Default)]
pub struct Sources {
    pub text: Option<PathBuf>,
    pub image: Option<PathBuf>,
}

impl Sources {
    fn is_empty(&self) -> bool {
        self.text.is_none() && self.image.is_none()
    }
}

pub async fn add_recipe(
    session: &mut CaptureSession,
    recipe: &RecipeArgs,
    sources: &Sources,
    dry_run: bool,
) -> Result<()> {
    let cancel = session.cancel_token();
    session.mount().await;

    if !sources.is_empty() {
        session.switch_mode(InputMode::AiAssisted);
        if let Some(path) = &sources.text {
            session.stage_text(read_text(path, &cancel).await?);
        }
        if let Some(path) = &sources.image {
            let data = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read image {}", path.display()))?;
            let staged = session.stage_image(data);
            print_notices(session);
            staged?;
        }
        let extracted = session.extract().await;
        print_notices(session);
        extracted?;
    }

    apply_overrides(session, recipe);

    if dry_run {
        let payload = build_payload(session.space(), session.draft())?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let submitted = session.submit().await;
    print_notices(session);
    let payload = submitted?;

    if let Some(navigation) = session.navigation() {
        tracing::info!(route = navigation.route(), name = %payload.name, "saved");
    }
    Ok(())
}

fn apply_overrides(session: &mut CaptureSession, recipe: &RecipeArgs) {
    let fields = [
        (DraftField::Name, &recipe.name),
        (DraftField::Description, &recipe.description),
        (DraftField::Instructions, &recipe.instructions),
        (DraftField::PrepTime, &recipe.prep_time),
        (DraftField::CookTime, &recipe.cook_time),
        (DraftField::Servings, &recipe.servings),
        (DraftField::CuisineType, &recipe.cuisine),
        (DraftField::ImageUrl, &recipe.image_url),
        (DraftField::Tags, &recipe.tags),
    ];

    let store = session.store_mut();
    for (field, value) in fields {
        if let Some(value) = value {
            store.set_field(field, value.clone());
        }
    }
    if recipe.difficulty.is_some() {
        store.set_difficulty(recipe.difficulty);
    }
    if !recipe.ingredients.is_empty() {
        let mut draft = store.draft().clone();
        draft.ingredients = recipe.ingredients.clone();
        store.replace_all(draft);
    }
}

/// Print success notices. Error notices carry the same text as the error
/// returned to `main`, which reports it, so they are only logged here.
fn print_notices(session: &mut CaptureSession) {
    for notice in session.take_notices() {
        if notice.is_error() {
            tracing::debug!(message = notice.message(), "error notice");
        } else {
            println!("{}", notice.message());
        }
    }
}

async fn read_text(path: &Path, cancel: &CancellationToken) -> Result<String> {
    if path == Path::new("-") {
        return read_interruptible(std::io::stdin(), cancel)
            .await
            .context("Failed to read recipe text from stdin");
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read recipe text {}", path.display()))
}

/// Read `reader` to the end on a dedicated thread, giving up as soon as the
/// session is dismissed. A blocked reader thread is abandoned and ends with
/// the process.
async fn read_interruptible<R>(mut reader: R, cancel: &CancellationToken) -> Result<String>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let mut text = String::new();
        let _ = tx.send(reader.read_to_string(&mut text).map(|_| text));
    });

    tokio::select! {
        biased;
        _ = cancel.cancelled() => bail!("Interrupted while waiting for input"),
        read = rx => Ok(read.context("Input reader stopped unexpectedly")??),
    }
}

fn parse_ingredient(s: &str) -> Result<Ingredient> {
    let mut parts = s.splitn(3, '|').map(str::trim);
    let name = parts.next().unwrap_or_default();
    if name.is_empty() {
        bail!("ingredient name is empty in {:?}", s);
    }
    let amount = parts.next().unwrap_or_default();
    let unit = parts.next().unwrap_or_default();
    Ok(Ingredient::new(name, amount, unit))
}

fn parse_difficulty(s: &str) -> Result<Difficulty> {
    Difficulty::parse(s)
        .with_context(|| format!("unknown difficulty {:?} (expected easy, medium or hard)", s))
}
