use crate::app::App;
use crate::render;
use cinelista_catalog::{image_url_with_base, CatalogApi, CatalogResult};
use cinelista_models::{ContentKind, ContentSnapshot, Page, SearchResult};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::{json, Value};

/// Search terms shorter than this are not sent to the catalog
pub const MIN_QUERY_CHARS: usize = 2;

const SHOW_CAST: usize = 10;
const SHOW_SIMILAR: usize = 10;

fn to_snapshots<T: Into<ContentSnapshot>>(items: Vec<T>) -> Vec<ContentSnapshot> {
    items.into_iter().map(Into::into).collect()
}

fn print_titles(app: &App, heading: &str, titles: &[ContentSnapshot]) {
    app.output.heading(heading);
    app.output
        .listing(&render::titles_table(titles), &render::titles_json(titles, app.image_base_url()));
}

fn print_page(app: &App, heading: &str, page: &Page<ContentSnapshot>) {
    app.output.heading(heading);
    let data = json!({
        "page": page.page,
        "total_pages": page.total_pages,
        "total_results": page.total_results,
        "results": render::titles_json(&page.results, app.image_base_url()),
    });
    app.output.listing(&render::titles_table(&page.results), &data);
    if app.output.is_human() {
        app.output.info(page_footer(page));
    }
}

fn page_footer(page: &Page<ContentSnapshot>) -> String {
    let position = format!("Page {} of {}", page.page, page.total_pages.max(1));
    if page.has_next() {
        format!("{} (next: --page {})", position, page.page + 1)
    } else {
        position
    }
}

/// Landing rows, fetched concurrently. A failing row is reported and skipped.
pub async fn run_home(app: &App) -> Result<()> {
    let client = app.catalog()?;

    let spinner = app.output.spinner("Loading home rows...");
    let (trending_movies, trending_series, popular_movies, top_rated_series) = futures::join!(
        app.cached("trending/movie", client.trending_movies()),
        app.cached("trending/tv", client.trending_series()),
        app.cached("movie/popular/1", client.popular_movies(1)),
        app.cached("tv/top_rated/1", client.top_rated_series(1)),
    );
    drop(spinner);

    let rows: Vec<(&str, &str, CatalogResult<Vec<ContentSnapshot>>)> = vec![
        ("trending_movies", "Trending movies", trending_movies.map(to_snapshots)),
        ("trending_series", "Trending series", trending_series.map(to_snapshots)),
        ("popular_movies", "Popular movies", popular_movies.map(|p| to_snapshots(p.results))),
        ("top_rated_series", "Top rated series", top_rated_series.map(|p| to_snapshots(p.results))),
    ];

    let mut data = serde_json::Map::new();
    let mut loaded = 0;
    for (key, heading, row) in rows {
        match row {
            Ok(titles) => {
                loaded += 1;
                if app.output.is_human() {
                    print_titles(app, heading, &titles);
                } else {
                    data.insert(key.to_string(), render::titles_json(&titles, app.image_base_url()));
                }
            }
            Err(e) => {
                tracing::warn!(row = key, error = %e, "Home row failed");
                app.output.warn(format!("{} unavailable: {}", heading, e));
                data.insert(key.to_string(), Value::Null);
            }
        }
    }

    if !app.output.is_human() {
        app.output.json(&Value::Object(data));
    }

    if loaded == 0 {
        return Err(eyre!("The catalog is unreachable, no rows could be loaded"));
    }
    Ok(())
}

pub async fn run_trending(app: &App, kind: ContentKind) -> Result<()> {
    let client = app.catalog()?;
    let key = format!("trending/{}", kind.as_path());

    let spinner = app.output.spinner("Loading trending titles...");
    let titles = match kind {
        ContentKind::Movie => app.cached(&key, client.trending_movies()).await.map(to_snapshots),
        ContentKind::Series => app.cached(&key, client.trending_series()).await.map(to_snapshots),
    };
    drop(spinner);

    print_titles(app, &format!("Trending {}", kind_plural(kind)), &titles?);
    Ok(())
}

pub async fn run_popular(app: &App, kind: ContentKind, page: u32) -> Result<()> {
    let client = app.catalog()?;
    let page = page.max(1);
    let key = format!("{}/popular/{}", kind.as_path(), page);

    let spinner = app.output.spinner("Loading popular titles...");
    let results: CatalogResult<Page<ContentSnapshot>> = match kind {
        ContentKind::Movie => app.cached(&key, client.popular_movies(page)).await.map(|p| p.map(Into::into)),
        ContentKind::Series => app.cached(&key, client.popular_series(page)).await.map(|p| p.map(Into::into)),
    };
    drop(spinner);

    print_page(app, &format!("Popular {}", kind_plural(kind)), &results?);
    Ok(())
}

pub async fn run_top_rated(app: &App, kind: ContentKind, page: u32) -> Result<()> {
    let client = app.catalog()?;
    let page = page.max(1);
    let key = format!("{}/top_rated/{}", kind.as_path(), page);

    let spinner = app.output.spinner("Loading top rated titles...");
    let results: CatalogResult<Page<ContentSnapshot>> = match kind {
        ContentKind::Movie => app.cached(&key, client.top_rated_movies(page)).await.map(|p| p.map(Into::into)),
        ContentKind::Series => app.cached(&key, client.top_rated_series(page)).await.map(|p| p.map(Into::into)),
    };
    drop(spinner);

    print_page(app, &format!("Top rated {}", kind_plural(kind)), &results?);
    Ok(())
}

pub async fn run_genres(app: &App, kind: ContentKind) -> Result<()> {
    let client = app.catalog()?;

    let spinner = app.output.spinner("Loading genres...");
    let genres = app
        .cached(&format!("genre/{}", kind.as_path()), client.genres(kind))
        .await;
    drop(spinner);
    let genres = genres?;

    app.output.heading(format!("{} genres", kind.label()));
    app.output.listing(&render::genres_table(&genres), &json!(genres));
    Ok(())
}

pub async fn run_discover(app: &App, kind: ContentKind, genre_id: u64, page: u32) -> Result<()> {
    let client = app.catalog()?;
    let page = page.max(1);
    let key = format!("discover/{}/{}/{}", kind.as_path(), genre_id, page);

    let spinner = app.output.spinner("Loading titles...");
    let results: CatalogResult<Page<ContentSnapshot>> = match kind {
        ContentKind::Movie => app.cached(&key, client.movies_by_genre(genre_id, page)).await.map(|p| p.map(Into::into)),
        ContentKind::Series => app.cached(&key, client.series_by_genre(genre_id, page)).await.map(|p| p.map(Into::into)),
    };
    drop(spinner);

    print_page(app, &format!("{} in genre {}", kind_plural(kind), genre_id), &results?);
    Ok(())
}

/// Detail view. Cast and similar titles are optional extras: when they fail
/// the detail still renders.
pub async fn run_show(app: &App, kind: ContentKind, id: u64) -> Result<()> {
    let client = app.catalog()?;
    let image_base = app.image_base_url();

    // Credits and similar titles are only requested once the title itself resolved
    let spinner = app.output.spinner("Loading details...");
    let credits_key = format!("{}/{}/credits", kind.as_path(), id);
    let similar_key = format!("{}/{}/similar", kind.as_path(), id);

    let (detail, credits, similar) = match kind {
        ContentKind::Movie => {
            let details = app.movie_details(&client, id).await?;
            let (credits, similar) = futures::join!(
                app.cached(&credits_key, client.credits(kind, id)),
                app.cached(&similar_key, client.similar_movies(id)),
            );
            let mut fields = vec![
                ("Type", kind.label().to_string()),
                ("Rating", render::rating(details.vote_average)),
                ("Released", non_empty(&details.release_date)),
                ("Runtime", details.formatted_runtime().unwrap_or_else(|| "-".to_string())),
                ("Genres", genre_names(&details.genres)),
            ];
            if !details.tagline.is_empty() {
                fields.push(("Tagline", details.tagline.clone()));
            }
            let detail = Detail {
                snapshot: ContentSnapshot::from(&details),
                overview: details.overview.clone(),
                backdrop_path: details.backdrop_path.clone(),
                fields,
                seasons: None,
                raw: json!(details),
            };
            (detail, credits, similar.map(to_snapshots))
        }
        ContentKind::Series => {
            let details = app.series_details(&client, id).await?;
            let (credits, similar) = futures::join!(
                app.cached(&credits_key, client.credits(kind, id)),
                app.cached(&similar_key, client.similar_series(id)),
            );
            let mut fields = vec![
                ("Type", kind.label().to_string()),
                ("Rating", render::rating(details.vote_average)),
                ("First aired", non_empty(&details.first_air_date)),
                ("Seasons", details.number_of_seasons.to_string()),
                ("Episodes", details.number_of_episodes.to_string()),
                ("Status", non_empty(&details.status)),
                ("Genres", genre_names(&details.genres)),
            ];
            if !details.created_by.is_empty() {
                let creators: Vec<&str> = details.created_by.iter().map(|c| c.name.as_str()).collect();
                fields.push(("Created by", creators.join(", ")));
            }
            if !details.tagline.is_empty() {
                fields.push(("Tagline", details.tagline.clone()));
            }
            let detail = Detail {
                snapshot: ContentSnapshot::from(&details),
                overview: details.overview.clone(),
                backdrop_path: details.backdrop_path.clone(),
                fields,
                seasons: Some(render::seasons_table(&details.regular_seasons())),
                raw: json!(details),
            };
            (detail, credits, similar.map(to_snapshots))
        }
    };
    drop(spinner);

    let membership = app.store().membership(id, kind);

    if !app.output.is_human() {
        let mut data = json!({
            "details": detail.raw,
            "poster_url": image_url_with_base(image_base, detail.snapshot.poster_path(), render::POSTER_SIZE.as_str()),
            "backdrop_url": image_url_with_base(image_base, detail.backdrop_path.as_deref(), render::BACKDROP_SIZE.as_str()),
            "saved": membership,
        });
        if let Ok(credits) = &credits {
            data["cast"] = json!(credits.cast.iter().take(SHOW_CAST).collect::<Vec<_>>());
        }
        if let Ok(similar) = &similar {
            let similar: Vec<ContentSnapshot> = similar.iter().take(SHOW_SIMILAR).cloned().collect();
            data["similar"] = render::titles_json(&similar, image_base);
        }
        app.output.json(&data);
        return Ok(());
    }

    let mut fields = detail.fields;
    fields.push(("Saved", render::badges(membership)));
    fields.push((
        "Poster",
        image_url_with_base(image_base, detail.snapshot.poster_path(), render::POSTER_SIZE.as_str()),
    ));

    app.output.heading(render::display_title(&detail.snapshot));
    app.output.info(render::fields_table(detail.snapshot.title(), &fields).to_string());
    if !detail.overview.is_empty() {
        app.output.info(format!("\n{}", detail.overview));
    }

    if let Some(seasons) = detail.seasons {
        app.output.heading("Seasons");
        app.output.info(seasons.to_string());
    }

    match credits {
        Ok(credits) if !credits.cast.is_empty() => {
            let cast: Vec<_> = credits.cast.into_iter().take(SHOW_CAST).collect();
            app.output.heading("Cast");
            app.output.info(render::cast_table(&cast).to_string());
        }
        Ok(_) => {}
        Err(e) => app.output.warn(format!("Cast unavailable: {}", e)),
    }

    match similar {
        Ok(similar) if !similar.is_empty() => {
            let similar: Vec<ContentSnapshot> = similar.into_iter().take(SHOW_SIMILAR).collect();
            app.output.heading("Similar titles");
            app.output.info(render::titles_table(&similar).to_string());
        }
        Ok(_) => {}
        Err(e) => app.output.warn(format!("Similar titles unavailable: {}", e)),
    }

    Ok(())
}

pub async fn run_season(app: &App, series_id: u64, season_number: u32) -> Result<()> {
    let client = app.catalog()?;

    let spinner = app.output.spinner("Loading episodes...");
    let season = app
        .cached(
            &format!("tv/{}/season/{}", series_id, season_number),
            client.season(series_id, season_number),
        )
        .await;
    drop(spinner);
    let season = season?;

    app.output.heading(format!("{} ({} episodes)", season.name, season.episodes.len()));
    app.output.listing(&render::episodes_table(&season), &json!(season));
    Ok(())
}

/// Multi-search over movies and series. People are dropped from the results.
pub async fn run_search(app: &App, query: &str, page: u32) -> Result<()> {
    let query = validate_query(query)?;
    let client = app.catalog()?;
    let page = page.max(1);

    let spinner = app.output.spinner(format!("Searching for \"{}\"...", query));
    let results = app
        .cached(
            &format!("search/{}/{}", query.to_lowercase(), page),
            client.search_multi(query, page),
        )
        .await;
    drop(spinner);

    let results = results?.map(SearchResult::into_content);
    let titles = Page {
        page: results.page,
        results: results.results.into_iter().flatten().collect(),
        total_pages: results.total_pages,
        total_results: results.total_results,
    };

    if titles.results.is_empty() {
        app.output.info(format!("No movies or series found for \"{}\"", query));
        return Ok(());
    }

    print_page(app, &format!("Results for \"{}\"", query), &titles);
    Ok(())
}

fn validate_query(query: &str) -> Result<&str> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Err(eyre!("Search query must be at least {} characters", MIN_QUERY_CHARS));
    }
    Ok(query)
}

struct Detail {
    snapshot: ContentSnapshot,
    overview: String,
    backdrop_path: Option<String>,
    fields: Vec<(&'static str, String)>,
    seasons: Option<comfy_table::Table>,
    raw: Value,
}

fn kind_plural(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Movie => "movies",
        ContentKind::Series => "series",
    }
}

fn non_empty(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn genre_names(genres: &[cinelista_models::Genre]) -> String {
    if genres.is_empty() {
        return "-".to_string();
    }
    genres.iter().map(|g| g.name.as_str()).collect::<Vec<_>>().join(", ")
}
