use std::path::PathBuf;

pub mod input;
pub mod summary;
pub mod teams;

mod error;
pub use error::Error;

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub input: PathBuf,
    /// File name used for team inference, if the input was renamed.
    pub original_name: Option<String>,
    /// Explicitly given team names/sides; they take precedence.
    pub teams: teams::Teams,
    pub tick_rate: Option<f32>,
    pub no_corrections: bool,
}

/// Loads, reconstructs and scores one match.
#[tracing::instrument(skip_all, fields(input = ?options.input))]
pub fn run(options: &Options) -> Result<common::MatchSummary, Error> {
    let streams = input::load_events(&options.input)?;

    let file_name = options.original_name.clone().or_else(|| {
        options
            .input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    });

    let sidecar = teams::SidecarConfig::load(&options.input)
        .map(|config| config.teams())
        .unwrap_or_default();
    let from_name = file_name
        .as_deref()
        .map(teams::from_file_name)
        .unwrap_or_default();
    let resolved = options.teams.clone().or(sidecar).or(from_name);
    tracing::info!(?resolved, "Resolved teams");

    let base = if options.no_corrections {
        analysis::reconstruct::Config::without_corrections()
    } else {
        analysis::reconstruct::Config::default()
    };
    let config = base.with_tick_rate(options.tick_rate.unwrap_or_else(|| streams.header.tick_rate()));

    let result = analysis::analyse(&config, &streams, resolved.declarations())?;

    let summary = summary::summarize(&result, resolved.names());
    tracing::info!(
        "Result: {} ({:?}) {} x {} {} ({:?})",
        summary.team_a.name,
        summary.team_a.side,
        summary.team_a.score,
        summary.team_b.score,
        summary.team_b.name,
        summary.team_b.side,
    );

    Ok(summary)
}
