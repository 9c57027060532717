//! The game window's handler: input to intents, idle frames to snapshots.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use codec::{capture, restore, CodecLimits, SnapshotBuffer, DEFAULT_CAPACITY};
use demo_arena::{arena_schema, ArenaState, MAX_BOMBERS};
use dispatch::{EventHandler, Flow, KeyCode, WindowId};
use schema::Schema;

use crate::input::{JOYSTICKS, KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_SPACE, KEY_UP};
use crate::rng::Rng;
use crate::sim::{self, Intent, MatchStats};

/// Results shared with `main` once the loop stops.
#[derive(Debug, Default)]
pub struct SessionReport {
    pub snapshots: u32,
    pub snapshot_bytes: usize,
    pub total_bytes: u64,
    pub stats: MatchStats,
    pub alive_at_end: usize,
    pub error: Option<anyhow::Error>,
}

pub struct ArenaSession {
    ticks: u32,
    out_dir: PathBuf,
    schema: Schema,
    limits: CodecLimits,
    state: ArenaState,
    intents: [Intent; MAX_BOMBERS],
    rng: Rng,
    stats: MatchStats,
    capture_buf: SnapshotBuffer<DEFAULT_CAPACITY>,
    peer_buf: SnapshotBuffer<DEFAULT_CAPACITY>,
    active: bool,
    report: Rc<RefCell<SessionReport>>,
}

impl ArenaSession {
    pub fn new(ticks: u32, seed: u64, out_dir: PathBuf, report: Rc<RefCell<SessionReport>>) -> Self {
        Self {
            ticks,
            out_dir,
            schema: arena_schema(),
            limits: CodecLimits::default(),
            state: ArenaState::new(),
            intents: [Intent::default(); MAX_BOMBERS],
            rng: Rng::new(seed ^ 0x9e37_79b9_7f4a_7c15),
            stats: MatchStats::default(),
            capture_buf: SnapshotBuffer::new(),
            peer_buf: SnapshotBuffer::new(),
            active: false,
            report,
        }
    }

    fn frame(&mut self) -> Result<()> {
        sim::step(&mut self.state, &mut self.intents, &mut self.rng, &mut self.stats);

        let bytes = capture(&self.state, &mut self.capture_buf).context("capture snapshot")?;
        let blob = self.capture_buf.written();
        let path = self
            .out_dir
            .join(format!("snapshot_{:06}.bin", self.state.tick));
        fs::write(&path, blob).with_context(|| format!("write {}", path.display()))?;

        self.peer_buf.load(blob).context("load snapshot into peer")?;
        let mirrored: ArenaState = restore(&mut self.peer_buf).context("restore snapshot")?;
        if mirrored != self.state {
            bail!("peer mirror diverged at tick {}", self.state.tick);
        }
        let decoded = tools::decode_snapshot_json(blob, &self.schema, &self.limits)
            .context("tools decode")?;
        if decoded.bytes != bytes {
            bail!("tools decoded {} bytes, captured {bytes}", decoded.bytes);
        }

        let mut report = self.report.borrow_mut();
        report.snapshots += 1;
        report.snapshot_bytes = bytes;
        report.total_bytes += bytes as u64;
        Ok(())
    }

    fn finish(&self, error: Option<anyhow::Error>) -> Flow {
        let mut report = self.report.borrow_mut();
        report.stats = self.stats;
        report.alive_at_end = self.state.alive_count();
        if let Some(err) = error {
            tracing::error!(tick = self.state.tick, error = ?err, "frame failed");
            report.error = Some(err);
        }
        Flow::Quit
    }

    fn steer(&mut self, slot: usize, key: KeyCode, pressed: bool) {
        let intent = &mut self.intents[slot];
        let amount = i32::from(pressed);
        match key {
            KEY_LEFT => intent.dx = -amount,
            KEY_RIGHT => intent.dx = amount,
            KEY_UP => intent.dy = -amount,
            KEY_DOWN => intent.dy = amount,
            KEY_SPACE => intent.drop_bomb |= pressed,
            _ => {}
        }
    }
}

impl EventHandler for ArenaSession {
    fn on_create(&mut self, window: WindowId) -> Flow {
        tracing::info!(%window, ticks = self.ticks, "arena window created");
        Flow::Continue
    }

    fn on_activate(&mut self, active: bool) -> Flow {
        self.active = active;
        Flow::Continue
    }

    fn on_resize(&mut self, width: u32, height: u32) -> Flow {
        tracing::debug!(width, height, "arena resized");
        Flow::Continue
    }

    fn on_key_down(&mut self, key: KeyCode) -> Flow {
        if self.active {
            self.steer(0, key, true);
        }
        Flow::Continue
    }

    fn on_key_up(&mut self, key: KeyCode) -> Flow {
        if key != KEY_SPACE {
            self.steer(0, key, false);
        }
        Flow::Continue
    }

    fn on_joystick_axis(&mut self, joystick: u8, axis: u8, value: i16) -> Flow {
        if joystick < JOYSTICKS {
            let intent = &mut self.intents[usize::from(joystick) + 1];
            let direction = i32::from(value).signum();
            match axis {
                0 => intent.dx = direction,
                1 => intent.dy = direction,
                _ => {}
            }
        }
        Flow::Continue
    }

    fn on_joystick_button(&mut self, joystick: u8, _button: u8, pressed: bool) -> Flow {
        if joystick < JOYSTICKS && pressed {
            self.intents[usize::from(joystick) + 1].drop_bomb = true;
        }
        Flow::Continue
    }

    fn on_idle(&mut self) -> Flow {
        if i64::from(self.state.tick) >= i64::from(self.ticks) {
            return self.finish(None);
        }
        match self.frame() {
            Ok(()) => Flow::Continue,
            Err(err) => self.finish(Some(err)),
        }
    }
}
