use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::audio::pipeline::{encode_batch, encode_speaker_track};
use crate::audio::store::{AudioFrame, PacketStore};
use crate::audio::wav::{silent_wav, write_wav, TARGET_SAMPLE_RATE};
use crate::capture::checkpoint;
use crate::capture::segments::{SegmentTracker, SpeakingSegment};
use crate::engines::Transcriber;
use crate::error::CaptureError;

const IDLE: u8 = 0;
const RECORDING: u8 = 1;
const STOPPED: u8 = 2;

/// Lifecycle of a capture session. Transitions are one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Idle,
    Recording,
    Stopped,
}

fn state_from(raw: u8) -> SessionState {
    match raw {
        RECORDING => SessionState::Recording,
        STOPPED => SessionState::Stopped,
        _ => SessionState::Idle,
    }
}

/// Configuration for one capture session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Unique session identifier, used for container filenames
    pub session_id: String,

    /// Directory containers are written to; created on session construction
    pub output_dir: PathBuf,

    /// Sample rate of persisted containers (transcription engines expect 16kHz)
    pub sample_rate: u32,

    /// Interval between checkpoint drain-and-encode cycles
    pub checkpoint_interval: Duration,

    /// Also write one isolated track container per speaker at stop
    pub per_speaker_tracks: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            output_dir: PathBuf::from("recordings"),
            sample_rate: TARGET_SAMPLE_RATE,
            checkpoint_interval: Duration::from_secs(30 * 60),
            per_speaker_tracks: false,
        }
    }
}

/// Point-in-time snapshot of a session's progress
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    pub session_id: String,
    pub state: SessionState,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub buffered_frames: usize,
    pub checkpoints: u64,
}

/// Owns the lifecycle of one recording session: fans in per-speaker frame
/// streams, tracks speaking segments, drives periodic checkpoints, and
/// produces the final full-session container at stop.
pub struct CaptureSession {
    config: SessionConfig,

    /// Per-speaker compressed frame buckets
    store: PacketStore,

    /// Speaking interval tracker, cleared on checkpoint drains
    tracker: Mutex<SegmentTracker>,

    /// Checkpoint containers are handed to this engine fire-and-forget
    transcriber: Arc<dyn Transcriber>,

    state: AtomicU8,

    /// Sole critical section of the session: drain-and-encode, shared by
    /// `stop()` and checkpoints so the two can never run concurrently.
    encode_lock: Mutex<()>,

    /// Strictly increasing per session; consumed even when a cycle fails
    checkpoint_index: AtomicU64,

    started_at: DateTime<Utc>,

    scheduler: Mutex<Option<JoinHandle<()>>>,

    /// Self-handle for spawning the checkpoint scheduler from `start()`
    weak: Weak<CaptureSession>,
}

impl CaptureSession {
    /// Create a session and ensure its output directory exists.
    pub fn new(
        config: SessionConfig,
        transcriber: Arc<dyn Transcriber>,
    ) -> Result<Arc<Self>, CaptureError> {
        std::fs::create_dir_all(&config.output_dir).map_err(|source| {
            CaptureError::OutputDir {
                path: config.output_dir.clone(),
                source,
            }
        })?;

        info!("Created capture session: {}", config.session_id);

        Ok(Arc::new_cyclic(|weak| Self {
            config,
            store: PacketStore::new(),
            tracker: Mutex::new(SegmentTracker::new()),
            transcriber,
            state: AtomicU8::new(IDLE),
            encode_lock: Mutex::new(()),
            checkpoint_index: AtomicU64::new(0),
            started_at: Utc::now(),
            scheduler: Mutex::new(None),
            weak: weak.clone(),
        }))
    }

    pub fn state(&self) -> SessionState {
        state_from(self.state.load(Ordering::SeqCst))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Begin accepting frames and start the checkpoint scheduler.
    pub async fn start(&self) -> Result<(), CaptureError> {
        if self
            .state
            .compare_exchange(IDLE, RECORDING, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Capture session {} already started", self.config.session_id);
            return Ok(());
        }

        // The weak self-handle always upgrades here: callers hold the Arc.
        if let Some(session) = self.weak.upgrade() {
            let handle = checkpoint::spawn_scheduler(session);
            *self.scheduler.lock().await = Some(handle);
        }

        info!(
            "Capture session recording: {} (checkpoint every {:?})",
            self.config.session_id, self.config.checkpoint_interval
        );
        Ok(())
    }

    /// A speaker's stream opened: register its bucket and open a segment.
    pub async fn speaker_joined(&self, speaker_id: u64, at_ms: u64) {
        if self.state() != SessionState::Recording {
            return;
        }
        self.store.register(speaker_id);
        self.tracker.lock().await.mark_start(speaker_id, at_ms);
        debug!(speaker = speaker_id, at_ms, "speaker stream opened");
    }

    /// A speaker's stream closed: fix the segment end. Buffered frames stay
    /// in the store until the next drain.
    pub async fn speaker_left(&self, speaker_id: u64, at_ms: u64) {
        self.tracker.lock().await.mark_end(speaker_id, at_ms);
        debug!(speaker = speaker_id, at_ms, "speaker stream closed");
    }

    /// Accept a live frame. Frames arriving outside `Recording` are ignored.
    pub fn push_frame(&self, frame: AudioFrame) {
        if self.state() != SessionState::Recording {
            debug!(
                speaker = frame.speaker_id,
                "ignoring frame outside recording state"
            );
            return;
        }
        self.store.append(frame);
    }

    /// Closed speaking segments collected so far, in close order.
    pub async fn segments(&self) -> Vec<SpeakingSegment> {
        self.tracker.lock().await.segments().to_vec()
    }

    pub fn stats(&self) -> SessionStats {
        let duration = Utc::now().signed_duration_since(self.started_at);
        SessionStats {
            session_id: self.config.session_id.clone(),
            state: self.state(),
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            buffered_frames: self.store.count(),
            checkpoints: self.checkpoint_index.load(Ordering::SeqCst),
        }
    }

    /// Stop the session: halt frame acceptance, drain every bucket, encode
    /// off-thread, and write the full-session container. Succeeds exactly
    /// once; zero collected or decodable audio still yields a valid 1 s
    /// silent container.
    pub async fn stop(&self) -> Result<PathBuf, CaptureError> {
        if self
            .state
            .compare_exchange(RECORDING, STOPPED, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CaptureError::AlreadyStopped);
        }

        info!("Stopping capture session: {}", self.config.session_id);

        // Serialize behind any in-flight checkpoint before touching buffers.
        let _encode_guard = self.encode_lock.lock().await;
        if let Some(handle) = self.scheduler.lock().await.take() {
            handle.abort();
        }

        let buckets = self.store.drain_all();
        let per_speaker = self.config.per_speaker_tracks.then(|| buckets.clone());

        let rate = self.config.sample_rate;
        let encoded = tokio::task::spawn_blocking(move || encode_batch(buckets, rate)).await?;
        let bytes = match encoded {
            Ok(bytes) => bytes,
            Err(error) if error.is_empty_batch() => {
                warn!("{error}; substituting 1s silent container");
                silent_wav(rate)?
            }
            Err(error) => return Err(error),
        };

        let path = self
            .config
            .output_dir
            .join(format!("{}.wav", self.config.session_id));
        write_wav(&path, &bytes)?;

        if let Some(buckets) = per_speaker {
            self.write_speaker_tracks(buckets).await;
        }

        info!("Capture session stopped: {}", path.display());
        Ok(path)
    }

    /// Run one checkpoint cycle: drain, encode, persist a numbered container,
    /// reset segment state, and hand the container to the transcription
    /// engine on a detached task. Skipped when nothing is buffered. Shares
    /// the drain-and-encode lock with `stop()`.
    pub async fn checkpoint(&self) -> Result<(), CaptureError> {
        let _encode_guard = self.encode_lock.lock().await;

        // Lost the race with stop(): its drain owns the remaining frames.
        if self.state() != SessionState::Recording {
            return Ok(());
        }
        if self.store.count() == 0 {
            debug!("checkpoint skipped: no buffered audio");
            return Ok(());
        }

        let index = self.checkpoint_index.fetch_add(1, Ordering::SeqCst) + 1;
        self.checkpoint_cycle(index)
            .await
            .map_err(|source| CaptureError::Checkpoint {
                index,
                source: Box::new(source),
            })
    }

    async fn checkpoint_cycle(&self, index: u64) -> Result<(), CaptureError> {
        let buckets = self.store.drain_all();
        let frame_count: usize = buckets.values().map(Vec::len).sum();
        self.tracker.lock().await.clear();

        let rate = self.config.sample_rate;
        let encoded = tokio::task::spawn_blocking(move || encode_batch(buckets, rate)).await?;
        let bytes = match encoded {
            Ok(bytes) => bytes,
            Err(error) if error.is_empty_batch() => {
                warn!("checkpoint {index}: {error}; substituting 1s silent container");
                silent_wav(rate)?
            }
            Err(error) => return Err(error),
        };

        let path = self
            .config
            .output_dir
            .join(format!("{}-checkpoint-{index:03}.wav", self.config.session_id));
        write_wav(&path, &bytes)?;

        info!(
            "Checkpoint {index} saved: {} ({frame_count} frames encoded)",
            path.display()
        );

        // Fire-and-forget: transcription failures are logged, never raised
        // to the capture path.
        let transcriber = Arc::clone(&self.transcriber);
        tokio::spawn(async move {
            if let Err(error) = transcriber.transcribe(&path).await {
                warn!("checkpoint {index} transcription failed: {error:#}");
            }
        });

        Ok(())
    }

    async fn write_speaker_tracks(&self, buckets: HashMap<u64, Vec<AudioFrame>>) {
        let rate = self.config.sample_rate;
        let encoded = tokio::task::spawn_blocking(move || {
            buckets
                .into_iter()
                .map(|(speaker, frames)| (speaker, encode_speaker_track(&frames, rate)))
                .collect::<Vec<_>>()
        })
        .await;

        let encoded = match encoded {
            Ok(tracks) => tracks,
            Err(error) => {
                warn!("speaker track encode task failed: {error}");
                return;
            }
        };

        // A failed track is skipped; the full-session container already exists.
        for (speaker, result) in encoded {
            match result {
                Ok(bytes) => {
                    let path = self.config.output_dir.join(format!(
                        "{}-speaker-{speaker}.wav",
                        self.config.session_id
                    ));
                    if let Err(error) = write_wav(&path, &bytes) {
                        warn!("{error}");
                    }
                }
                Err(error) => warn!("speaker {speaker} track skipped: {error}"),
            }
        }
    }
}
