use crate::models::{Repository, RepositoryStats};

/// Sums stars and forks over the fetched repositories.
///
/// `public_repos` comes from the profile rather than `repos.len()`: the
/// repository fetch is capped at one page and undercounts large accounts.
pub fn build_repository_stats(public_repos: u32, repos: &[Repository]) -> RepositoryStats {
    let total_stars = repos.iter().map(|r| r.stargazers_count as u64).sum();
    let total_forks = repos.iter().map(|r| r.forks_count as u64).sum();

    let mut languages: Vec<String> = Vec::new();
    for language in repos.iter().filter_map(|r| r.language.as_ref()) {
        if !languages.contains(language) {
            languages.push(language.clone());
        }
    }

    RepositoryStats {
        public_repos,
        total_stars,
        total_forks,
        languages,
    }
}
