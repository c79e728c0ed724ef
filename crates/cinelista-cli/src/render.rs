use cinelista_catalog::{image_url_with_base, ImageSize};
use cinelista_models::{CastMember, ContentReference, ContentSnapshot, Genre, Season, SeasonSummary};
use cinelista_store::Membership;
use comfy_table::{Attribute, Cell, Color, Table};
use serde_json::{json, Value};

pub const POSTER_SIZE: ImageSize = ImageSize::W500;
pub const BACKDROP_SIZE: ImageSize = ImageSize::Original;

pub fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(
        header
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold)),
    );
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

pub fn rating(vote_average: f64) -> String {
    if vote_average > 0.0 {
        format!("{:.1}", vote_average)
    } else {
        "-".to_string()
    }
}

pub fn year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}

/// `Fight Club (1999)`, or just the title when the year is unknown
pub fn display_title(snapshot: &ContentSnapshot) -> String {
    match snapshot.year() {
        Some(y) => format!("{} ({})", snapshot.title(), y),
        None => snapshot.title().to_string(),
    }
}

pub fn badges(membership: Membership) -> String {
    let mut badges = Vec::new();
    if membership.watch_later {
        badges.push("⏱ Watch later");
    }
    if membership.favorite {
        badges.push("★ Favorite");
    }
    if badges.is_empty() {
        "-".to_string()
    } else {
        badges.join("  ")
    }
}

pub fn title_json(snapshot: &ContentSnapshot, image_base: &str) -> Value {
    json!({
        "id": snapshot.id(),
        "type": snapshot.kind(),
        "title": snapshot.title(),
        "year": snapshot.year(),
        "vote_average": snapshot.vote_average(),
        "poster_url": image_url_with_base(image_base, snapshot.poster_path(), POSTER_SIZE.as_str()),
    })
}

pub fn titles_table(titles: &[ContentSnapshot]) -> Table {
    let mut table = new_table(&["ID", "Type", "Title", "Year", "Rating"]);
    for title in titles {
        table.add_row(vec![
            Cell::new(title.id()),
            Cell::new(title.kind().label()),
            Cell::new(title.title()),
            Cell::new(year(title.year())),
            Cell::new(rating(title.vote_average())),
        ]);
    }
    table
}

pub fn titles_json(titles: &[ContentSnapshot], image_base: &str) -> Value {
    Value::Array(titles.iter().map(|t| title_json(t, image_base)).collect())
}

pub fn saved_table(entries: &[ContentReference]) -> Table {
    let mut table = new_table(&["ID", "Type", "Title", "Year", "Rating", "Saved"]);
    for entry in entries {
        let snapshot = entry.snapshot();
        table.add_row(vec![
            Cell::new(entry.id),
            Cell::new(entry.kind.label()),
            Cell::new(entry.title().unwrap_or("-")),
            Cell::new(year(snapshot.as_ref().and_then(|s| s.year()))),
            Cell::new(rating(snapshot.as_ref().map_or(0.0, |s| s.vote_average()))),
            Cell::new(entry.saved_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    table
}

pub fn genres_table(genres: &[Genre]) -> Table {
    let mut table = new_table(&["ID", "Genre"]);
    for genre in genres {
        table.add_row(vec![Cell::new(genre.id), Cell::new(&genre.name)]);
    }
    table
}

pub fn cast_table(cast: &[CastMember]) -> Table {
    let mut table = new_table(&["Actor", "Character"]);
    for member in cast {
        table.add_row(vec![Cell::new(&member.name), Cell::new(&member.character)]);
    }
    table
}

pub fn seasons_table(seasons: &[&SeasonSummary]) -> Table {
    let mut table = new_table(&["Season", "Name", "Episodes", "Air date"]);
    for season in seasons {
        table.add_row(vec![
            Cell::new(season.season_number),
            Cell::new(&season.name),
            Cell::new(season.episode_count),
            Cell::new(season.air_date.as_deref().unwrap_or("-")),
        ]);
    }
    table
}

pub fn episodes_table(season: &Season) -> Table {
    let mut table = new_table(&["#", "Episode", "Air date", "Runtime", "Rating"]);
    for episode in &season.episodes {
        table.add_row(vec![
            Cell::new(episode.episode_number),
            Cell::new(&episode.name),
            Cell::new(episode.air_date.as_deref().unwrap_or("-")),
            Cell::new(episode.formatted_runtime().unwrap_or_else(|| "-".to_string())),
            Cell::new(rating(episode.vote_average)),
        ]);
    }
    table
}

/// Two-column key/value table for detail views
pub fn fields_table(title: &str, fields: &[(&str, String)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    for (name, value) in fields {
        table.add_row(vec![Cell::new(name).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinelista_models::Movie;

    fn fight_club() -> ContentSnapshot {
        ContentSnapshot::Movie(Movie {
            id: 550,
            title: "Fight Club".to_string(),
            poster_path: Some("/pB8.jpg".to_string()),
            backdrop_path: None,
            overview: String::new(),
            release_date: "1999-10-15".to_string(),
            vote_average: 8.433,
            genre_ids: vec![18],
        })
    }

    #[test]
    fn test_display_helpers() {
        assert_eq!(display_title(&fight_club()), "Fight Club (1999)");
        assert_eq!(rating(8.433), "8.4");
        assert_eq!(rating(0.0), "-");
        assert_eq!(year(None), "-");
    }

    #[test]
    fn test_badges() {
        assert_eq!(badges(Membership::default()), "-");
        assert_eq!(
            badges(Membership { watch_later: true, favorite: true }),
            "⏱ Watch later  ★ Favorite"
        );
    }

    #[test]
    fn test_title_json_uses_image_base() {
        let value = title_json(&fight_club(), "https://image.tmdb.org/t/p");
        assert_eq!(value["type"], "movie");
        assert_eq!(value["year"], 1999);
        assert_eq!(value["poster_url"], "https://image.tmdb.org/t/p/w500/pB8.jpg");
    }
}
