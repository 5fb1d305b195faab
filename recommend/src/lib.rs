//! Song recommendation.
//!
//! Pure, synchronous filtering over the catalog: ranked singers from the
//! similarity index are narrowed by gender, then their songs by release
//! year, genre, and the user's vocal range. Never errors; an empty song
//! list is a valid result.

pub mod genre;
pub mod pipeline;

pub use pipeline::{
    BestMatch, GenderFilter, GenreFilter, RankedSinger, Recommendation, RecommendRequest,
    YearRange, recommend,
};
