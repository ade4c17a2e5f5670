pub mod comment_model;
pub mod movie_model;

use std::fmt;

use mongodb::bson::Document;

/// Collections of the `sample_mflix` database served by this API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Movies,
    Comments,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Movies => "movies",
            Collection::Comments => "comments",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "movies" => Some(Collection::Movies),
            "comments" => Some(Collection::Comments),
            _ => None,
        }
    }

    /// Reference document whose keys every inserted document must carry.
    pub fn template(self) -> &'static Document {
        match self {
            Collection::Movies => &*movie_model::MOVIE_TEMPLATE,
            Collection::Comments => &*comment_model::COMMENT_TEMPLATE,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
