use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::models::{Playlist, PlaylistKind};
use crate::error::{require_non_blank, EngineError, EngineResult, Entity};
use crate::media::VideoId;

pub const MAX_PLAYLIST_SIZE: usize = 300;

/// Named playlists in creation order.
#[derive(Debug)]
pub struct PlaylistCollection {
    playlists: Vec<Playlist>,
    max_size: usize,
}

impl Default for PlaylistCollection {
    fn default() -> Self {
        Self::new(MAX_PLAYLIST_SIZE)
    }
}

impl PlaylistCollection {
    pub fn new(max_size: usize) -> Self {
        Self {
            playlists: Vec::new(),
            max_size,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.playlists.iter().position(|p| p.name == name)
    }

    fn checked_name<'a>(&self, name: &'a str) -> EngineResult<&'a str> {
        let name = require_non_blank(name, "Playlist name")?;
        if self.contains(name) {
            return Err(EngineError::duplicate(Entity::Playlist, name));
        }
        Ok(name)
    }

    pub fn create(&mut self, name: &str) -> EngineResult<()> {
        let name = self.checked_name(name)?;
        self.playlists.push(Playlist::custom(name.to_string()));
        debug!("Created playlist {}", name);
        Ok(())
    }

    /// Registers the derived liked playlist. Only one may exist.
    pub fn create_liked(&mut self, name: &str) -> EngineResult<()> {
        if let Some(existing) = self.playlists.iter().find(|p| p.is_system()) {
            return Err(EngineError::duplicate(Entity::Playlist, &existing.name));
        }
        let name = self.checked_name(name)?;
        self.playlists.push(Playlist::liked(name.to_string()));
        debug!("Created system playlist {}", name);
        Ok(())
    }

    pub fn get(&self, name: &str) -> EngineResult<&Playlist> {
        self.position(name)
            .map(|idx| &self.playlists[idx])
            .ok_or_else(|| EngineError::not_found(Entity::Playlist, name))
    }

    /// Mutable access to a custom playlist's videos.
    fn custom_videos_mut(&mut self, name: &str) -> EngineResult<&mut Vec<VideoId>> {
        let idx = self
            .position(name)
            .ok_or_else(|| EngineError::not_found(Entity::Playlist, name))?;
        match &mut self.playlists[idx].kind {
            PlaylistKind::Custom(videos) => Ok(videos),
            PlaylistKind::Liked => Err(EngineError::Forbidden(format!(
                "{} is managed through likes",
                name
            ))),
        }
    }

    /// Fails with the same errors `add_video` would, without mutating.
    pub fn check_add(&self, name: &str, video: VideoId) -> EngineResult<()> {
        let playlist = self.get(name)?;
        match &playlist.kind {
            PlaylistKind::Liked => Err(EngineError::Forbidden(format!(
                "{} is managed through likes",
                name
            ))),
            PlaylistKind::Custom(videos) => {
                if !videos.contains(&video) && videos.len() >= self.max_size {
                    return Err(EngineError::CapacityExceeded {
                        name: name.to_string(),
                        limit: self.max_size,
                    });
                }
                Ok(())
            }
        }
    }

    /// Appends the video unless already present. Returns whether it was added.
    pub fn add_video(&mut self, name: &str, video: VideoId) -> EngineResult<bool> {
        self.check_add(name, video)?;
        let videos = self.custom_videos_mut(name)?;
        if videos.contains(&video) {
            return Ok(false);
        }
        videos.push(video);
        debug!("Added video {} to playlist {}", video, name);
        Ok(true)
    }

    pub fn remove_video(&mut self, name: &str, video: VideoId) -> EngineResult<bool> {
        let videos = self.custom_videos_mut(name)?;
        let before = videos.len();
        videos.retain(|v| *v != video);
        Ok(videos.len() != before)
    }

    pub fn delete(&mut self, name: &str) -> EngineResult<Playlist> {
        let idx = self
            .position(name)
            .ok_or_else(|| EngineError::not_found(Entity::Playlist, name))?;
        if self.playlists[idx].is_system() {
            return Err(EngineError::Forbidden(format!("{} cannot be deleted", name)));
        }
        debug!("Deleted playlist {}", name);
        Ok(self.playlists.remove(idx))
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, name: &str, rng: &mut R) -> EngineResult<()> {
        let videos = self.custom_videos_mut(name)?;
        videos.shuffle(rng);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Playlist> + '_ {
        self.playlists.iter()
    }

    /// Drops the video from every custom playlist.
    pub(crate) fn forget_video(&mut self, video: VideoId) {
        for playlist in &mut self.playlists {
            if let PlaylistKind::Custom(videos) = &mut playlist.kind {
                videos.retain(|v| *v != video);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn collection() -> PlaylistCollection {
        let mut playlists = PlaylistCollection::default();
        playlists.create("Favorites").unwrap();
        playlists.create("Watch Later").unwrap();
        playlists.create_liked("Liked Videos").unwrap();
        playlists
    }

    #[test]
    fn test_create_rejects_duplicates_and_blank() {
        let mut playlists = collection();
        assert!(matches!(
            playlists.create("Favorites"),
            Err(EngineError::Duplicate { .. })
        ));
        assert!(matches!(
            playlists.create("Liked Videos"),
            Err(EngineError::Duplicate { .. })
        ));
        assert!(matches!(playlists.create(""), Err(EngineError::Invalid(_))));
        assert!(matches!(
            playlists.create_liked("Other Likes"),
            Err(EngineError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_creation_order_is_kept() {
        let playlists = collection();
        let names: Vec<_> = playlists.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Favorites", "Watch Later", "Liked Videos"]);
    }

    #[test]
    fn test_add_video_is_set_like() {
        let mut playlists = collection();
        assert!(playlists.add_video("Favorites", VideoId(1)).unwrap());
        assert!(playlists.add_video("Favorites", VideoId(2)).unwrap());
        assert!(!playlists.add_video("Favorites", VideoId(1)).unwrap());
        assert_eq!(
            playlists.get("Favorites").unwrap().videos(),
            &[VideoId(1), VideoId(2)]
        );
    }

    #[test]
    fn test_liked_playlist_is_read_only() {
        let mut playlists = collection();
        assert!(matches!(
            playlists.add_video("Liked Videos", VideoId(1)),
            Err(EngineError::Forbidden(_))
        ));
        assert!(matches!(
            playlists.remove_video("Liked Videos", VideoId(1)),
            Err(EngineError::Forbidden(_))
        ));
        assert!(matches!(
            playlists.delete("Liked Videos"),
            Err(EngineError::Forbidden(_))
        ));
        assert!(matches!(
            playlists.shuffle("Liked Videos", &mut StdRng::seed_from_u64(1)),
            Err(EngineError::Forbidden(_))
        ));
    }

    #[test]
    fn test_unknown_playlist() {
        let mut playlists = collection();
        assert!(matches!(
            playlists.add_video("Nope", VideoId(1)),
            Err(EngineError::NotFound {
                entity: Entity::Playlist,
                ..
            })
        ));
        assert!(matches!(
            playlists.delete("Nope"),
            Err(EngineError::NotFound { .. })
        ));
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut playlists = PlaylistCollection::new(2);
        playlists.create("Tiny").unwrap();
        playlists.add_video("Tiny", VideoId(1)).unwrap();
        playlists.add_video("Tiny", VideoId(2)).unwrap();
        assert!(matches!(
            playlists.add_video("Tiny", VideoId(3)),
            Err(EngineError::CapacityExceeded { limit: 2, .. })
        ));
        // Re-adding an existing member is still a no-op, not an error.
        assert!(!playlists.add_video("Tiny", VideoId(1)).unwrap());
    }

    #[test]
    fn test_remove_and_delete() {
        let mut playlists = collection();
        playlists.add_video("Favorites", VideoId(1)).unwrap();
        assert!(playlists.remove_video("Favorites", VideoId(1)).unwrap());
        assert!(!playlists.remove_video("Favorites", VideoId(1)).unwrap());

        let deleted = playlists.delete("Watch Later").unwrap();
        assert_eq!(deleted.name, "Watch Later");
        assert!(!playlists.contains("Watch Later"));
    }

    #[test]
    fn test_shuffle_keeps_members() {
        let mut playlists = collection();
        for id in 1..=20 {
            playlists.add_video("Favorites", VideoId(id)).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(42);
        playlists.shuffle("Favorites", &mut rng).unwrap();

        let mut videos = playlists.get("Favorites").unwrap().videos().to_vec();
        videos.sort();
        assert_eq!(videos, (1..=20).map(VideoId).collect::<Vec<_>>());
    }

    #[test]
    fn test_forget_video() {
        let mut playlists = collection();
        playlists.add_video("Favorites", VideoId(1)).unwrap();
        playlists.add_video("Watch Later", VideoId(1)).unwrap();
        playlists.add_video("Watch Later", VideoId(2)).unwrap();
        playlists.forget_video(VideoId(1));
        assert!(playlists.get("Favorites").unwrap().videos().is_empty());
        assert_eq!(playlists.get("Watch Later").unwrap().videos(), &[VideoId(2)]);
    }
}
