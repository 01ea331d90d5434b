//! Demo catalog loaded into a fresh engine.

use std::time::Duration;

use tracing::info;

use super::coordinator::Engine;
use crate::category::CategoryPath;
use crate::error::EngineResult;
use crate::media::{parse_clock_duration, NewVideo, VideoId};

const SAMPLE_COMMENTS: [(&str, &str); 5] = [
    ("TechGuru99", "Great video! Really helpful!"),
    ("VideoLover", "Thanks for sharing this content"),
    ("RandomUser", "Could you make a follow-up video?"),
    ("LearnMore", "This explained everything perfectly"),
    ("QuickWatch", "Subscribed after watching this!"),
];

/// (title, category path, duration)
const SAMPLE_VIDEOS: [(&str, &str, &str); 11] = [
    ("Mini YouTube Test Video", "", "0:05"),
    ("Smartphone Displays Explained", "Technology", "0:10"),
    ("Sample Video Demo", "", "0:10"),
    ("Python Tutorial", "Education/Programming", "15:30"),
    ("Gaming Highlights", "Entertainment", "8:45"),
    ("Cooking Basics", "Lifestyle", "12:20"),
    ("Tech Review", "Technology", "10:15"),
    ("Music Video", "Entertainment", "3:45"),
    ("News Update", "", "5:30"),
    ("Sports Highlights", "", "7:20"),
    ("Science Facts", "Education", "9:10"),
];

const SAMPLE_UPLOADS: [(&str, &str, &str); 2] = [
    ("Pending Upload 1", "Education", "5:00"),
    ("Pending Upload 2", "Entertainment", "8:30"),
];

const SUGGESTED_COUNT: usize = 4;
const EDUCATIONAL_PLAYLIST: &str = "Educational";
const EDUCATIONAL_PICKS: [&str; 2] = ["Python Tutorial", "Science Facts"];

fn sample_video(title: &str, category: &str, duration: &str) -> EngineResult<NewVideo> {
    let path: CategoryPath = category.parse()?;
    let duration = parse_clock_duration(duration).unwrap_or(Duration::ZERO);
    Ok(NewVideo::new(title, path).with_duration(duration))
}

impl Engine {
    /// Loads the demo catalog: categories, videos with a couple of comments
    /// each, pending uploads, the first suggestions and a few playlist picks.
    /// Categories that already exist are reused.
    pub fn seed_sample_data(&mut self) -> EngineResult<()> {
        let root = CategoryPath::root();
        for name in ["Education", "Entertainment", "Lifestyle", "Technology"] {
            self.ensure_category(&root, name)?;
        }
        self.ensure_category(&root.child("Education"), "Programming")?;

        let mut created: Vec<(VideoId, &str)> = Vec::with_capacity(SAMPLE_VIDEOS.len());
        for (idx, &(title, category, duration)) in SAMPLE_VIDEOS.iter().enumerate() {
            let id = self.create_video_with(sample_video(title, category, duration)?)?;
            for offset in 0..2 {
                let (author, text) = SAMPLE_COMMENTS[(idx + offset) % SAMPLE_COMMENTS.len()];
                self.add_comment(id, author, text)?;
            }
            created.push((id, title));
        }

        for (title, category, duration) in SAMPLE_UPLOADS {
            self.enqueue_upload(sample_video(title, category, duration)?)?;
        }

        let suggested: Vec<VideoId> = created
            .iter()
            .take(SUGGESTED_COUNT)
            .map(|(id, _)| *id)
            .collect();
        self.build_suggestions(suggested)?;

        if self
            .list_playlists()
            .any(|p| p.name == EDUCATIONAL_PLAYLIST && !p.system)
        {
            for (id, title) in &created {
                if EDUCATIONAL_PICKS.contains(title) {
                    self.add_to_playlist(EDUCATIONAL_PLAYLIST, *id)?;
                }
            }
        }

        info!(
            "Seeded {} videos, {} pending uploads",
            created.len(),
            SAMPLE_UPLOADS.len()
        );
        Ok(())
    }

    fn ensure_category(&mut self, parent: &CategoryPath, name: &str) -> EngineResult<CategoryPath> {
        let path = parent.child(name);
        if self.categories().contains(&path) {
            return Ok(path);
        }
        self.add_category(parent, name)
    }
}
