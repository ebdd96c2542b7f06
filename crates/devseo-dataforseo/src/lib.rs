pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{
    DataForSeoClient, KeywordIdeasQuery, KeywordSuggestionsQuery, RelatedKeywordsQuery,
};
pub use error::DataForSeoError;
