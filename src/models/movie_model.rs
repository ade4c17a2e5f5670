use mongodb::bson::{doc, DateTime, Document};
use once_cell::sync::Lazy;

/// Sample movie from `sample_mflix`; its key set is the minimum a new movie must provide.
pub static MOVIE_TEMPLATE: Lazy<Document> = Lazy::new(|| {
    doc! {
        "plot": "test",
        "genres": ["Animation", "Short", "Comedy"],
        "runtime": 7,
        "cast": ["Winsor McCay"],
        "num_mflix_comments": 0,
        "poster": "https://m.media-amazon.com/images/M/MV5BYzg2NjNhNTctMjUxMi00ZWU4LWI3ZjYtNTI0NTQxNThjZTk2XkEyXkFqcGdeQXVyNzg5OTk2OA@@._V1_SY1000_SX677_AL_.jpg",
        "title": "Winsor McCay, the Famous Cartoonist of the N.Y. Herald and His Moving Comics",
        "fullplot": "Cartoonist Winsor McCay agrees to create a large set of drawings...",
        "languages": ["English"],
        "released": DateTime::from_millis(-1_853_539_200_000),
        "directors": ["Winsor McCay", "J. Stuart Blackton"],
        "writers": [
            "Winsor McCay (comic strip \"Little Nemo in Slumberland\")",
            "Winsor McCay (screenplay)",
        ],
        "awards": {
            "wins": 1,
            "nominations": 0,
            "text": "1 win.",
        },
        "lastupdated": "2015-08-29 01:09:03.030000000",
        "year": 1911,
        "imdb": {
            "rating": 7.3,
            "votes": 1034,
            "id": 1737,
        },
        "countries": ["USA"],
        "type": "movie",
        "tomatoes": {
            "viewer": {
                "rating": 3.4,
                "numReviews": 89,
                "meter": 47,
            },
        },
    }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_descriptive_fields() {
        for key in ["title", "plot", "genres", "cast", "runtime", "imdb", "released", "awards"] {
            assert!(MOVIE_TEMPLATE.contains_key(key), "missing {key}");
        }
        assert!(!MOVIE_TEMPLATE.contains_key("_id"));
    }
}
