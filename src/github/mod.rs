pub mod client;
pub mod model;

pub use client::GithubClient;
pub use model::Repository;
