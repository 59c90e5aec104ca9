use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use gitactivity::models::{ActivitySnapshot, WeekRow};
use gitactivity::{AggregatorConfig, Config, ContributionAggregator, GitHubClient};

#[derive(Parser, Debug)]
#[command(name = "gitactivity")]
#[command(version = "0.1.0")]
#[command(about = "Show GitHub contribution activity, streaks and repository stats")]
struct Args {
    /// GitHub username (defaults to GITHUB_USERNAME)
    #[arg(short, long)]
    username: Option<String>,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// GitHub token; enables the contribution calendar (overrides GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Fail instead of printing placeholder data when fetching fails
    #[arg(long)]
    no_fallback: bool,
}

const LEVEL_GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];
const WEEKDAY_LABELS: [&str; 7] = ["Mon", "", "Wed", "", "Fri", "", ""];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitactivity=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    let username = args
        .username
        .clone()
        .or_else(|| config.default_username.clone())
        .context("No username given; pass --username or set GITHUB_USERNAME")?;

    let token = args.token.clone().or_else(|| config.github_token.clone());
    let client = GitHubClient::new(token.as_deref())?.with_base_url(config.api_url.as_str());

    let aggregator_config = AggregatorConfig {
        use_contribution_calendar: client.has_token(),
        ..AggregatorConfig::default()
    };
    let aggregator = ContributionAggregator::new(client, aggregator_config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Fetching GitHub activity for {}", username));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let snapshot = if args.no_fallback {
        let report = aggregator.fetch_contributions(&username).await;
        spinner.finish_and_clear();
        ActivitySnapshot {
            report: report?,
            error: None,
        }
    } else {
        let snapshot = aggregator.load(&username).await;
        spinner.finish_and_clear();
        snapshot
    };

    if let Some(ref error) = snapshot.error {
        tracing::warn!("Showing placeholder data: {}", error);
    }

    output_snapshot(&snapshot, &args)?;

    Ok(())
}

fn output_snapshot(snapshot: &ActivitySnapshot, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(snapshot)?,
        "markdown" => format_markdown(snapshot),
        _ => format_text(snapshot),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn render_heatmap(weeks: &[WeekRow]) -> String {
    let mut output = String::new();

    // Month labels above the first week of each month.
    let mut labels = vec![' '; weeks.len() + 3];
    let mut last_month: Option<&str> = None;
    let mut next_free = 0;
    for (i, week) in weeks.iter().enumerate() {
        let Some(first) = week.first() else { continue };
        if last_month != Some(first.month.as_str()) {
            if i >= next_free {
                for (j, c) in first.month.chars().enumerate() {
                    labels[i + j] = c;
                }
                next_free = i + first.month.chars().count() + 1;
            }
            last_month = Some(first.month.as_str());
        }
    }
    output.push_str(&format!("    {}\n", labels.iter().collect::<String>().trim_end()));

    for (weekday, label) in WEEKDAY_LABELS.iter().enumerate() {
        output.push_str(&format!("{:<4}", label));
        for week in weeks {
            let glyph = week
                .iter()
                .find(|d| d.weekday_index() == weekday)
                .map(|d| LEVEL_GLYPHS[d.level.min(4) as usize])
                .unwrap_or(' ');
            output.push(glyph);
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "    Less {} More\n",
        LEVEL_GLYPHS.iter().collect::<String>()
    ));
    output
}

fn format_text(snapshot: &ActivitySnapshot) -> String {
    let report = &snapshot.report;
    let stats = &report.stats;
    let mut output = String::new();

    output.push_str(&format!("\n=== GitHub Activity: {} ===\n\n", report.user.login));

    if let Some(ref error) = snapshot.error {
        output.push_str(&format!("!! {} (showing sample data)\n\n", error));
    }

    if let Some(ref name) = report.user.name {
        output.push_str(&format!("Name: {}\n", name));
    }
    if let Some(ref bio) = report.user.bio {
        output.push_str(&format!("Bio: {}\n", bio));
    }

    output.push_str(&format!(
        "Total Contributions: {} (last 6 months)\n",
        stats.total_contributions
    ));
    output.push_str(&format!("Public Repositories: {}\n", stats.public_repos));
    output.push_str(&format!("Total Stars: {}\n", stats.total_stars));
    output.push_str(&format!("Total Forks: {}\n", stats.total_forks));
    output.push_str(&format!("Followers: {}\n", report.user.followers));
    output.push_str(&format!(
        "Streaks: current {} days, longest {} days\n",
        stats.current_streak, stats.longest_streak
    ));

    if !stats.languages.is_empty() {
        output.push_str(&format!("Languages: {}\n", stats.languages.join(", ")));
    }
    if let Some(last) = stats.last_activity {
        output.push_str(&format!("Last Activity: {}\n", last.format("%Y-%m-%d %H:%M UTC")));
    }

    output.push('\n');
    output.push_str(&render_heatmap(&report.contribution_data));

    if !report.recent_repos.is_empty() {
        output.push_str("\nRecent Repositories:\n");
        for repo in &report.recent_repos {
            output.push_str(&format!(
                "  - {} [{}] ★{} ⑂{} (updated {})\n",
                repo.name,
                repo.language.as_deref().unwrap_or("-"),
                repo.stars,
                repo.forks,
                repo.updated.format("%b %-d, %Y")
            ));
        }
    }

    if !report.recent_activity.is_empty() {
        output.push_str("\nRecent Activity:\n");
        for event in &report.recent_activity {
            output.push_str(&format!(
                "  - {} {} {}",
                event.created_at.format("%Y-%m-%d"),
                event.kind,
                event.repo.as_deref().unwrap_or("-")
            ));
            if event.commits > 0 {
                output.push_str(&format!(" ({} commits)", event.commits));
            }
            output.push('\n');
        }
    }

    output
}

fn format_markdown(snapshot: &ActivitySnapshot) -> String {
    let report = &snapshot.report;
    let stats = &report.stats;
    let mut output = String::new();

    output.push_str(&format!("# GitHub Activity: {}\n\n", report.user.login));

    if let Some(ref error) = snapshot.error {
        output.push_str(&format!("> **Note:** {} (showing sample data)\n\n", error));
    }
    if let Some(ref bio) = report.user.bio {
        output.push_str(&format!("> {}\n\n", bio));
    }

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!(
        "| Total Contributions (6 months) | {} |\n",
        stats.total_contributions
    ));
    output.push_str(&format!("| Public Repositories | {} |\n", stats.public_repos));
    output.push_str(&format!("| Total Stars | {} |\n", stats.total_stars));
    output.push_str(&format!("| Total Forks | {} |\n", stats.total_forks));
    output.push_str(&format!("| Followers | {} |\n", report.user.followers));
    output.push_str(&format!("| Current Streak | {} days |\n", stats.current_streak));
    output.push_str(&format!("| Longest Streak | {} days |\n", stats.longest_streak));
    if !stats.languages.is_empty() {
        output.push_str(&format!("| Languages | {} |\n", stats.languages.join(", ")));
    }

    output.push_str("\n## Contributions\n\n```\n");
    output.push_str(&render_heatmap(&report.contribution_data));
    output.push_str("```\n");

    if !report.recent_repos.is_empty() {
        output.push_str("\n## Recent Repositories\n\n");
        output.push_str("| Repository | Language | Stars | Forks | Updated |\n");
        output.push_str("|------------|----------|-------|-------|---------|\n");
        for repo in &report.recent_repos {
            output.push_str(&format!(
                "| [{}]({}) | {} | {} | {} | {} |\n",
                repo.name,
                repo.url,
                repo.language.as_deref().unwrap_or("-"),
                repo.stars,
                repo.forks,
                repo.updated.format("%Y-%m-%d")
            ));
        }
    }

    if !report.recent_activity.is_empty() {
        output.push_str("\n## Recent Activity\n\n");
        for event in &report.recent_activity {
            output.push_str(&format!(
                "- {} **{}** {} ({} commits)\n",
                event.created_at.format("%Y-%m-%d"),
                event.kind,
                event.repo.as_deref().unwrap_or("-"),
                event.commits
            ));
        }
    }

    output
}
