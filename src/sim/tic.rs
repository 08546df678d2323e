use log::{info, warn};
use std::time::{Duration, Instant};

pub const DEFAULT_FPS: u32 = 60;

/// Longest `dt` handed to the simulation; anything longer was a stall.
pub const MAX_DT: f32 = 0.25;

/// Paces the frame loop to a fixed target interval and measures `dt`.
pub struct FrameClock {
    interval: Duration,
    last: Instant,
    stats: FrameStats,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_micros(1_000_000 / fps.max(1) as u64),
            last: Instant::now(),
            stats: FrameStats::new(),
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start the current frame now, e.g. after slow start-up work.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Sleep out the rest of the current frame, then return the seconds
    /// since the previous call (clamped to [`MAX_DT`]).
    pub fn tick(&mut self) -> f32 {
        let spent = self.last.elapsed();
        if let Some(wait) = self.interval.checked_sub(spent) {
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        self.stats.record(dt);
        clamp_dt(dt)
    }
}

/// Seconds in `dt`, capped at [`MAX_DT`].
pub fn clamp_dt(dt: Duration) -> f32 {
    let secs = dt.as_secs_f32();
    if secs > MAX_DT {
        warn!("frame took {:.1} ms, clamping dt", secs * 1000.0);
        MAX_DT
    } else {
        secs
    }
}

/* ---------------------------------------------------------------- */
/* average frame time, reported every few seconds                    */
/* ---------------------------------------------------------------- */
const REPORT_EVERY: Duration = Duration::from_secs(3);

struct FrameStats {
    acc_time: Duration, // cumulated frame time
    acc_frames: usize,  // frames in the current window
    last_print: Instant,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            acc_time: Duration::ZERO,
            acc_frames: 0,
            last_print: Instant::now(),
        }
    }

    fn record(&mut self, dt: Duration) {
        self.acc_time += dt;
        self.acc_frames += 1;

        if self.last_print.elapsed() >= REPORT_EVERY {
            let avg_ms = self.acc_time.as_secs_f64() * 1000.0 / self.acc_frames as f64;
            info!("avg frame: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            self.acc_time = Duration::ZERO;
            self.acc_frames = 0;
            self.last_print = Instant::now();
        }
    }
}
