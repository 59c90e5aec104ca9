pub mod client;
pub mod graphql;
pub mod source;

pub use client::GitHubClient;
pub use graphql::ContributionCalendar;
pub use source::ActivitySource;
