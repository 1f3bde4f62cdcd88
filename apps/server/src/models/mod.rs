//! Domain models for the game archive

pub mod game;

pub use game::{
    AgeGroupInfo, GameDetail, GameListResponse, GameSummary, GameVariant, NewGame, NewVariant,
    Pagination, TagCount, VoteCounts, VoteRequest,
};
