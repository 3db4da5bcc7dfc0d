pub mod api;
pub mod config;
pub mod data_models;
pub mod github;
pub mod presenter;
pub mod ranker;
pub mod search;
