use cutline_core::timeline::{Timeline, TrackKind};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::builders::{ClipBuilder, TimelineBuilder};

/// Route `tracing` output to the test writer, filtered by `RUST_LOG`.
/// Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Ids of the clips in [`linked_av_timeline`].
pub struct LinkedAv {
    pub media_id: Uuid,
    pub video_id: Uuid,
    pub audio_id: Uuid,
}

/// One source's video on V1 and audio on A1, both spanning `[2, 6)`.
pub fn linked_av_timeline() -> (Timeline, LinkedAv) {
    let media_id = Uuid::new_v4();
    let video = ClipBuilder::new(media_id).at(2.0).duration_secs(4.0).build();
    let audio = ClipBuilder::new(media_id)
        .audio()
        .at(2.0)
        .duration_secs(4.0)
        .build();
    let ids = LinkedAv {
        media_id,
        video_id: video.id,
        audio_id: audio.id,
    };
    let timeline = TimelineBuilder::new()
        .with_clip(TrackKind::VideoA, video)
        .with_clip(TrackKind::AudioA, audio)
        .build();
    (timeline, ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linked_av_timeline_shares_media() {
        let (timeline, ids) = linked_av_timeline();
        let (_, video) = timeline.find_clip(ids.video_id).unwrap();
        let (_, audio) = timeline.find_clip(ids.audio_id).unwrap();
        assert_eq!(video.media_id, ids.media_id);
        assert_eq!(audio.media_id, ids.media_id);
        assert!(timeline.links.is_linked(ids.media_id));
    }
}
