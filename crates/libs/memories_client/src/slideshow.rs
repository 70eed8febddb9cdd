//! Slideshow controller: autoplay timing, navigation, music playback and the view model.

use crate::{MemoriesStore, Route};
use common_types::Memory;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

pub const SLIDE_DURATION: Duration = Duration::from_secs(5);
pub const FADE_DURATION: Duration = Duration::from_secs(1);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The platform refused to start playback without a user gesture.
    #[error("Autoplay prevented: {0}")]
    Blocked(String),

    #[error("Playback failed: {0}")]
    Failed(String),
}

/// Something that can play the background track.
pub trait AudioOutput: Send {
    /// Start playing `url`, looping when it ends.
    fn play(&mut self, url: &str, looping: bool) -> Result<(), AudioError>;

    fn pause(&mut self);

    fn set_muted(&mut self, muted: bool);
}

/// Result of toggling the music.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicToggle {
    /// No track uploaded, nothing happened.
    NoMusic,
    Playing,
    Paused,
    /// Playback was refused; the play flag stays off.
    Blocked(AudioError),
}

/// What the slideshow screen shows.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideView {
    Empty(EmptyView),
    Slide(SlideViewModel),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyView {
    pub heading: &'static str,
    pub message: &'static str,
    pub action_label: &'static str,
    pub action: Route,
}

impl Default for EmptyView {
    fn default() -> Self {
        Self {
            heading: "No Memories Yet",
            message: "Start by adding photos in the admin panel",
            action_label: "Go to Admin Panel",
            action: Route::Login,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideViewModel {
    pub memory: Memory,
    /// One based.
    pub position: usize,
    pub total: usize,
    pub progress_percent: f64,
    /// Opacity of the incoming slide, 0 to 1 over the cross-fade.
    pub opacity: f32,
    pub autoplay: bool,
    pub has_music: bool,
    pub is_music_playing: bool,
    pub is_muted: bool,
}

/// Progress through the list, `index / max(len - 1, 1)` as a percentage.
#[must_use]
pub fn progress_percent(index: usize, len: usize) -> f64 {
    let last = len.saturating_sub(1).max(1);
    index as f64 / last as f64 * 100.0
}

/// Drives a [`MemoriesStore`] as a slideshow.
pub struct Slideshow<A: AudioOutput> {
    audio: A,
    autoplay: bool,
    is_muted: bool,
    deadline: Option<Instant>,
    armed_index: Option<usize>,
    transition_started: Option<Instant>,
}

impl<A: AudioOutput> Slideshow<A> {
    /// Autoplay starts enabled.
    pub const fn new(audio: A) -> Self {
        Self {
            audio,
            autoplay: true,
            is_muted: false,
            deadline: None,
            armed_index: None,
            transition_started: None,
        }
    }

    pub const fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub const fn is_muted(&self) -> bool {
        self.is_muted
    }

    pub const fn audio(&self) -> &A {
        &self.audio
    }

    /// When autoplay advances next, `None` while it is off or there is nothing to show.
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Re-arm the autoplay deadline when the slide or the autoplay flag changed.
    fn refresh(&mut self, store: &MemoriesStore, now: Instant) {
        let index = store.current_index();
        if self.armed_index != Some(index) {
            if self.armed_index.is_some() {
                self.transition_started = Some(now);
            }
            self.armed_index = Some(index);
            self.deadline = None;
        }

        if !self.autoplay || store.is_empty() {
            self.deadline = None;
        } else if self.deadline.is_none() {
            self.deadline = Some(now + SLIDE_DURATION);
        }
    }

    fn go_to(&mut self, store: &mut MemoriesStore, index: usize, now: Instant) {
        if store.set_current_index(index).is_ok() {
            self.refresh(store, now);
        }
    }

    /// Advance when the autoplay deadline has passed. Returns whether the slide changed.
    pub fn tick(&mut self, store: &mut MemoriesStore, now: Instant) -> bool {
        self.refresh(store, now);
        match self.deadline {
            Some(deadline) if now >= deadline => {
                let next = (store.current_index() + 1) % store.len();
                self.deadline = None;
                self.go_to(store, next, now);
                debug!("Autoplay advanced to {}", next);
                true
            }
            _ => false,
        }
    }

    /// Sleep until the next autoplay deadline and advance. Returns `false` right away when autoplay is idle.
    pub async fn run_autoplay_step(&mut self, store: &mut MemoriesStore) -> bool {
        self.refresh(store, Instant::now());
        let Some(deadline) = self.deadline else {
            return false;
        };
        sleep_until(deadline).await;
        self.tick(store, Instant::now())
    }

    /// Show the following slide and stop autoplay.
    pub fn next(&mut self, store: &mut MemoriesStore, now: Instant) {
        self.autoplay = false;
        if store.len() > 1 {
            let next = (store.current_index() + 1) % store.len();
            self.go_to(store, next, now);
        }
        self.refresh(store, now);
    }

    /// Show the preceding slide and stop autoplay.
    pub fn previous(&mut self, store: &mut MemoriesStore, now: Instant) {
        self.autoplay = false;
        let len = store.len();
        if len > 1 {
            let previous = (store.current_index() + len - 1) % len;
            self.go_to(store, previous, now);
        }
        self.refresh(store, now);
    }

    pub fn toggle_autoplay(&mut self, store: &MemoriesStore, now: Instant) -> bool {
        self.autoplay = !self.autoplay;
        self.deadline = None;
        self.refresh(store, now);
        self.autoplay
    }

    /// Start or pause the background track. Without a track this does nothing.
    pub fn toggle_music(&mut self, store: &mut MemoriesStore) -> MusicToggle {
        if store.music_url().is_empty() {
            return MusicToggle::NoMusic;
        }

        if store.is_music_playing() {
            self.audio.pause();
            store.set_music_playing(false);
            return MusicToggle::Paused;
        }

        store.set_music_playing(true);
        match self.audio.play(store.music_url(), true) {
            Ok(()) => MusicToggle::Playing,
            Err(e) => {
                info!("{}", e);
                store.set_music_playing(false);
                MusicToggle::Blocked(e)
            }
        }
    }

    /// Mute or unmute, independent of whether the track is playing.
    pub fn toggle_mute(&mut self) -> bool {
        self.is_muted = !self.is_muted;
        self.audio.set_muted(self.is_muted);
        self.is_muted
    }

    /// The screen for the current state. Nothing renders before the store is hydrated.
    pub fn view(&mut self, store: &MemoriesStore, now: Instant) -> Option<SlideView> {
        if !store.is_hydrated() {
            return None;
        }
        self.refresh(store, now);

        let Some(memory) = store.current() else {
            return Some(SlideView::Empty(EmptyView::default()));
        };

        let opacity = self.transition_started.map_or(1.0, |started| {
            let elapsed = now.saturating_duration_since(started);
            (elapsed.as_secs_f32() / FADE_DURATION.as_secs_f32()).min(1.0)
        });

        Some(SlideView::Slide(SlideViewModel {
            memory: memory.clone(),
            position: store.current_index() + 1,
            total: store.len(),
            progress_percent: progress_percent(store.current_index(), store.len()),
            opacity,
            autoplay: self.autoplay,
            has_music: !store.music_url().is_empty(),
            is_music_playing: store.is_music_playing(),
            is_muted: self.is_muted,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, memory};

    #[derive(Default)]
    struct RecordingAudio {
        block: bool,
        played: Vec<(String, bool)>,
        paused: usize,
        muted: Option<bool>,
    }

    impl AudioOutput for RecordingAudio {
        fn play(&mut self, url: &str, looping: bool) -> Result<(), AudioError> {
            if self.block {
                return Err(AudioError::Blocked("NotAllowedError".to_owned()));
            }
            self.played.push((url.to_owned(), looping));
            Ok(())
        }

        fn pause(&mut self) {
            self.paused += 1;
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = Some(muted);
        }
    }

    async fn store_with(ids: &[&str], music_url: &str) -> MemoriesStore {
        let api = FakeApi::default()
            .with_memories(ids.iter().map(|id| memory(id)).collect())
            .with_music_url(music_url);
        let mut store = MemoriesStore::new();
        store.hydrate(&api).await;
        store
    }

    #[tokio::test]
    async fn next_and_previous_wrap_and_stop_autoplay() {
        let mut store = store_with(&["a", "b", "c"], "").await;
        let mut slideshow = Slideshow::new(RecordingAudio::default());
        let now = Instant::now();

        slideshow.previous(&mut store, now);
        assert_eq!(store.current_index(), 2);
        assert!(!slideshow.autoplay());
        assert!(slideshow.deadline().is_none());

        slideshow.next(&mut store, now);
        assert_eq!(store.current_index(), 0);
        slideshow.next(&mut store, now);
        assert_eq!(store.current_index(), 1);
    }

    #[tokio::test]
    async fn single_slide_navigation_is_a_no_op() {
        let mut store = store_with(&["a"], "").await;
        let mut slideshow = Slideshow::new(RecordingAudio::default());
        let now = Instant::now();

        slideshow.next(&mut store, now);
        assert_eq!(store.current_index(), 0);
        slideshow.previous(&mut store, now);
        assert_eq!(store.current_index(), 0);
    }

    #[tokio::test]
    async fn autoplay_advances_every_five_seconds() {
        let mut store = store_with(&["a", "b"], "").await;
        let mut slideshow = Slideshow::new(RecordingAudio::default());
        let start = Instant::now();

        assert!(!slideshow.tick(&mut store, start));
        assert_eq!(slideshow.deadline(), Some(start + SLIDE_DURATION));
        assert!(!slideshow.tick(&mut store, start + Duration::from_millis(4_999)));
        assert!(slideshow.tick(&mut store, start + SLIDE_DURATION));
        assert_eq!(store.current_index(), 1);
        assert_eq!(
            slideshow.deadline(),
            Some(start + SLIDE_DURATION + SLIDE_DURATION)
        );
        assert!(slideshow.tick(&mut store, start + SLIDE_DURATION * 2));
        assert_eq!(store.current_index(), 0);
    }

    #[tokio::test]
    async fn deadline_resets_when_index_changes() {
        let mut store = store_with(&["a", "b", "c"], "").await;
        let mut slideshow = Slideshow::new(RecordingAudio::default());
        let start = Instant::now();
        slideshow.tick(&mut store, start);

        store.set_current_index(2).unwrap();
        let later = start + Duration::from_secs(3);
        assert!(!slideshow.tick(&mut store, later));
        assert_eq!(slideshow.deadline(), Some(later + SLIDE_DURATION));

        slideshow.toggle_autoplay(&store, later);
        assert!(slideshow.deadline().is_none());
        let resumed = later + Duration::from_secs(1);
        slideshow.toggle_autoplay(&store, resumed);
        assert_eq!(slideshow.deadline(), Some(resumed + SLIDE_DURATION));
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_step_sleeps_until_deadline() {
        let mut store = store_with(&["a", "b"], "").await;
        let mut slideshow = Slideshow::new(RecordingAudio::default());
        let start = Instant::now();

        assert!(slideshow.run_autoplay_step(&mut store).await);

        assert_eq!(store.current_index(), 1);
        assert!(Instant::now() >= start + SLIDE_DURATION);
    }

    #[tokio::test]
    async fn empty_list_renders_call_to_action_without_deadline() {
        let mut store = store_with(&[], "").await;
        let mut slideshow = Slideshow::new(RecordingAudio::default());
        let now = Instant::now();

        let view = slideshow.view(&store, now);
        assert!(matches!(view, Some(SlideView::Empty(ref empty)) if empty.action == Route::Login));
        assert!(!slideshow.tick(&mut store, now + SLIDE_DURATION));
        assert!(slideshow.deadline().is_none());
        assert!(!slideshow.run_autoplay_step(&mut store).await);
    }

    #[test]
    fn nothing_renders_before_hydration() {
        let store = MemoriesStore::new();
        let mut slideshow = Slideshow::new(RecordingAudio::default());
        assert!(slideshow.view(&store, Instant::now()).is_none());
    }

    #[tokio::test]
    async fn view_model_reports_position_progress_and_fade() {
        let mut store = store_with(&["a", "b", "c"], "https://music/a.mp3").await;
        let mut slideshow = Slideshow::new(RecordingAudio::default());
        let start = Instant::now();
        slideshow.view(&store, start);

        slideshow.next(&mut store, start);
        let Some(SlideView::Slide(model)) =
            slideshow.view(&store, start + Duration::from_millis(500))
        else {
            panic!("expected a slide");
        };
        assert_eq!(model.memory.id, "b");
        assert_eq!(model.position, 2);
        assert_eq!(model.total, 3);
        assert!((model.progress_percent - 50.0).abs() < f64::EPSILON);
        assert!((model.opacity - 0.5).abs() < 0.01);
        assert!(model.has_music);
        assert!(!model.autoplay);

        assert!((progress_percent(0, 1) - 0.0).abs() < f64::EPSILON);
        assert!((progress_percent(1, 2) - 100.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn music_toggle_requires_a_track() {
        let mut store = store_with(&["a"], "").await;
        let mut slideshow = Slideshow::new(RecordingAudio::default());

        assert_eq!(slideshow.toggle_music(&mut store), MusicToggle::NoMusic);
        assert!(!store.is_music_playing());
        assert!(slideshow.audio().played.is_empty());
    }

    #[tokio::test]
    async fn music_plays_looped_and_pauses() {
        let mut store = store_with(&["a"], "https://music/a.mp3").await;
        let mut slideshow = Slideshow::new(RecordingAudio::default());

        assert_eq!(slideshow.toggle_music(&mut store), MusicToggle::Playing);
        assert!(store.is_music_playing());
        assert_eq!(
            slideshow.audio().played,
            [("https://music/a.mp3".to_owned(), true)]
        );

        assert_eq!(slideshow.toggle_music(&mut store), MusicToggle::Paused);
        assert!(!store.is_music_playing());
        assert_eq!(slideshow.audio().paused, 1);
    }

    #[tokio::test]
    async fn blocked_playback_falls_back_to_paused() {
        let mut store = store_with(&["a"], "https://music/a.mp3").await;
        let mut slideshow = Slideshow::new(RecordingAudio {
            block: true,
            ..RecordingAudio::default()
        });

        let outcome = slideshow.toggle_music(&mut store);

        assert!(matches!(outcome, MusicToggle::Blocked(AudioError::Blocked(_))));
        assert!(!store.is_music_playing());
    }

    #[tokio::test]
    async fn mute_is_independent_of_playback() {
        let mut store = store_with(&["a"], "https://music/a.mp3").await;
        let mut slideshow = Slideshow::new(RecordingAudio::default());

        assert!(slideshow.toggle_mute());
        assert_eq!(slideshow.audio().muted, Some(true));
        assert!(!store.is_music_playing());
        slideshow.toggle_music(&mut store);
        assert!(slideshow.is_muted());
        assert!(!slideshow.toggle_mute());
    }
}
