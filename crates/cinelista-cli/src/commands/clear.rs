use crate::app::App;
use crate::cache::ResponseCache;
use cinelista_store::Collection;
use color_eyre::eyre::eyre;
use color_eyre::Result;

pub async fn run_clear(app: &App, all: bool, cache: bool, saved: bool) -> Result<()> {
    if all {
        clear_cache(app)?;
        clear_saved(app)?;
        app.output.success("Response cache and saved lists cleared");
        return Ok(());
    }

    let mut cleared_anything = false;

    if cache {
        clear_cache(app)?;
        cleared_anything = true;
    }

    if saved {
        clear_saved(app)?;
        cleared_anything = true;
    }

    if !cleared_anything {
        app.output.warn("No clear option specified. Use --cache, --saved, or --all");
        app.output.info("\nExample: cinelista clear --cache");
    }

    Ok(())
}

fn clear_cache(app: &App) -> Result<()> {
    // Ignores --no-cache: clearing works on the directory regardless
    let cache = ResponseCache::new(app.cache().dir(), app.config.cache.ttl_seconds);
    let removed = cache
        .clear()
        .map_err(|e| eyre!("Failed to clear response cache at {}: {}", cache.dir().display(), e))?;

    if removed == 0 {
        app.output.info("No cached responses found to clear");
    } else {
        app.output.success(format!("Cleared {} cached response(s)", removed));
    }
    Ok(())
}

/// Empty both collections entry by entry. The collections themselves stay.
fn clear_saved(app: &App) -> Result<()> {
    let store = app.store();

    for collection in Collection::ALL {
        let entries = store.list(collection);
        if entries.is_empty() {
            app.output.info(format!("{} is already empty", collection.label()));
            continue;
        }

        for entry in &entries {
            store
                .remove(collection, entry.id, entry.kind)
                .map_err(|e| eyre!("Failed to clear {}: {}", collection, e))?;
        }
        app.output.success(format!("Removed {} title(s) from {}", entries.len(), collection.label().to_lowercase()));
    }
    Ok(())
}
