//! Engine fixtures

use super::constants::*;
use minitube::config::EngineSettings;
use minitube::{CategoryPath, Engine, VideoId};

pub fn path(s: &str) -> CategoryPath {
    s.parse().expect("valid category path")
}

/// Engine with no videos, default playlists and a short history.
pub fn empty_engine() -> Engine {
    engine_with(EngineSettings {
        history_capacity: SMALL_HISTORY,
        owner: OWNER.to_string(),
        seed_sample_data: false,
        ..Default::default()
    })
}

pub fn engine_with(settings: EngineSettings) -> Engine {
    Engine::new(settings).expect("engine settings should be valid")
}

/// Engine loaded with the sample catalog.
pub fn seeded_engine() -> Engine {
    let mut engine = engine_with(EngineSettings {
        owner: OWNER.to_string(),
        ..Default::default()
    });
    engine.seed_sample_data().expect("sample data should load");
    engine
}

/// Creates one published video per title at the root category.
pub fn publish_titles(engine: &mut Engine, titles: &[&str]) -> Vec<VideoId> {
    titles
        .iter()
        .map(|title| {
            engine
                .create_video(title, &CategoryPath::root())
                .expect("video should be created")
        })
        .collect()
}

pub fn titles(engine: &Engine, ids: &[VideoId]) -> Vec<String> {
    ids.iter()
        .map(|id| engine.video(*id).expect("video exists").title.clone())
        .collect()
}

/// Looks up a seeded video by title.
pub fn seeded_id(engine: &Engine, title: &str) -> VideoId {
    engine
        .videos()
        .find(|video| video.title == title)
        .map(|video| video.id)
        .expect("seeded title exists")
}
