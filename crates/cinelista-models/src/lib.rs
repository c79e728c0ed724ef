pub mod details;
pub mod media;
pub mod page;
pub mod saved;
pub mod search;
pub mod season;
pub mod snapshot;

pub use details::{CastMember, Creator, Credits, MovieDetails, ProductionCompany, TvShowDetails};
pub use media::{ContentKind, Genre, Movie, TvShow};
pub use page::{GenreList, Page};
pub use saved::ContentReference;
pub use search::{Person, SearchResult};
pub use season::{Episode, Season, SeasonSummary};
pub use snapshot::ContentSnapshot;
