use crate::app::App;
use crate::render;
use crate::SavedCommands;
use cinelista_models::ContentKind;
use cinelista_store::{AddOutcome, Collection, RemoveOutcome};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

pub async fn run_saved(app: &App, collection: Collection, cmd: SavedCommands) -> Result<()> {
    match cmd {
        SavedCommands::Add { kind, id } => add(app, collection, kind, id).await,
        SavedCommands::Remove { kind, id } => remove(app, collection, kind, id),
        SavedCommands::Toggle { kind, id } => {
            if app.store().contains(collection, id, kind) {
                remove(app, collection, kind, id)
            } else {
                add(app, collection, kind, id).await
            }
        }
        SavedCommands::Check { kind, id } => {
            check(app, collection, kind, id);
            Ok(())
        }
        SavedCommands::List => {
            list(app, collection);
            Ok(())
        }
    }
}

/// Fetch the title's current metadata and save it. Titles already in the
/// collection are left untouched and the catalog is not asked.
async fn add(app: &App, collection: Collection, kind: ContentKind, id: u64) -> Result<()> {
    if app.store().contains(collection, id, kind) {
        app.output.info(format!("{} {} is already in {}", kind.label(), id, collection.label().to_lowercase()));
        return Ok(());
    }

    let client = app.catalog()?;
    let spinner = app.output.spinner("Fetching title...");
    let snapshot = app.snapshot(&client, kind, id).await;
    drop(spinner);
    let snapshot = snapshot?;
    let title = render::display_title(&snapshot);

    match app.store().add(collection, snapshot) {
        Ok(AddOutcome::Added) => {
            app.output.success(format!("Added {} to {}", title, collection.label().to_lowercase()));
            Ok(())
        }
        Ok(AddOutcome::AlreadyPresent) => {
            app.output.info(format!("{} is already in {}", title, collection.label().to_lowercase()));
            Ok(())
        }
        Err(e) => Err(eyre!("Could not save {} to {}: {}", title, collection, e)),
    }
}

fn remove(app: &App, collection: Collection, kind: ContentKind, id: u64) -> Result<()> {
    match app.store().remove(collection, id, kind) {
        Ok(RemoveOutcome::Removed) => {
            app.output.success(format!("Removed {} {} from {}", kind.label(), id, collection.label().to_lowercase()));
            Ok(())
        }
        Ok(RemoveOutcome::NotPresent) => {
            app.output.info(format!("{} {} is not in {}", kind.label(), id, collection.label().to_lowercase()));
            Ok(())
        }
        Err(e) => Err(eyre!("Could not remove {} {} from {}: {}", kind, id, collection, e)),
    }
}

fn check(app: &App, collection: Collection, kind: ContentKind, id: u64) {
    let saved = app.store().contains(collection, id, kind);

    if app.output.is_human() {
        let verb = if saved { "is" } else { "is not" };
        app.output.info(format!("{} {} {} in {}", kind.label(), id, verb, collection.label().to_lowercase()));
    } else {
        app.output.json(&json!({
            "id": id,
            "type": kind,
            "collection": collection,
            "saved": saved,
        }));
    }
}

fn list(app: &App, collection: Collection) {
    let entries = app.store().list(collection);

    if entries.is_empty() && app.output.is_human() {
        app.output.info(format!("{} is empty", collection.label()));
        return;
    }

    app.output.heading(format!("{} ({})", collection.label(), entries.len()));
    app.output.listing(&render::saved_table(&entries), &json!(entries));
}
