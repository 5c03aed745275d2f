use std::path::Path;

use analysis::events::EventStreams;

use crate::Error;

/// Loads the record streams for one match. `.dem` files go through the demo
/// decoder, anything else is read as a JSON event export.
#[tracing::instrument]
pub fn load_events(path: &Path) -> Result<EventStreams, Error> {
    let is_demo = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("dem"))
        .unwrap_or(false);

    let streams = if is_demo {
        load_demo(path)?
    } else {
        let file = std::fs::File::open(path)?;
        serde_json::from_reader(std::io::BufReader::new(file))?
    };

    tracing::debug!(
        map = %streams.header.map_name,
        round_end = streams.round_end.len(),
        player_death = ?streams.player_death.as_ref().map(|k| k.len()),
        "Loaded events"
    );

    Ok(streams)
}

#[cfg(feature = "demo")]
fn load_demo(path: &Path) -> Result<EventStreams, Error> {
    let file = std::fs::File::open(path)?;
    let mmap = unsafe { memmap2::MmapOptions::new().map(&file)? };

    Ok(analysis::demo::load(&mmap)?)
}

#[cfg(not(feature = "demo"))]
fn load_demo(path: &Path) -> Result<EventStreams, Error> {
    Err(Error::UnsupportedInput(path.to_path_buf()))
}
