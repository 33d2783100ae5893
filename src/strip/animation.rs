use crate::config::{AnimationConfig, ConfigError};
use std::str::FromStr;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum AnimationKind {
    /// Each cell fades in after the one before it has finished
    Sequence,
    /// All cells fade in together
    Parallel,
}

impl FromStr for AnimationKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<AnimationKind, ConfigError> {
        if s.eq_ignore_ascii_case("sequence") {
            Ok(AnimationKind::Sequence)
        } else if s.eq_ignore_ascii_case("parallel") {
            Ok(AnimationKind::Parallel)
        } else {
            Err(ConfigError::UnknownAnimation(s.to_owned()))
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    Idle,
    Animating {
        kind: AnimationKind,
        started: Instant,
    },
}

/// Per-cell fade-in progress plus the two-state machine driving it.
///
/// Progress values run from 0 (invisible) to 1 (fully shown).  Without an
/// animation configured, every cell is always fully shown.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct EntranceAnimation {
    config: Option<AnimationConfig>,
    progress: Vec<f32>,
    phase: Phase,
}

impl EntranceAnimation {
    pub(super) fn new(config: Option<AnimationConfig>, positions: usize) -> EntranceAnimation {
        EntranceAnimation {
            config,
            progress: vec![0.0; positions],
            phase: Phase::Idle,
        }
    }

    pub(super) fn phase(&self) -> Phase {
        self.phase
    }

    pub(super) fn is_animating(&self) -> bool {
        matches!(self.phase(), Phase::Animating { .. })
    }

    /// Checks the configured animation type without touching any state.
    /// Returns `None` if no animation is configured.
    pub(super) fn kind(&self) -> Result<Option<AnimationKind>, ConfigError> {
        self.config
            .as_ref()
            .map(|cfg| cfg.kind.parse::<AnimationKind>())
            .transpose()
    }

    pub(super) fn reset(&mut self, positions: usize) {
        self.progress.clear();
        self.progress.resize(positions, 0.0);
        self.phase = Phase::Idle;
    }

    pub(super) fn start(&mut self, now: Instant) -> Result<(), ConfigError> {
        let Some(kind) = self.kind()? else {
            return Ok(());
        };
        tracing::debug!(?kind, cells = self.progress.len(), "starting entrance animation");
        self.phase = Phase::Animating { kind, started: now };
        self.advance(now);
        Ok(())
    }

    pub(super) fn advance(&mut self, now: Instant) {
        let Phase::Animating { kind, started } = self.phase else {
            return;
        };
        let elapsed = now.saturating_duration_since(started);
        let per_cell = self.per_cell();
        for (i, p) in std::iter::zip(0u32.., self.progress.iter_mut()) {
            let delay = match kind {
                AnimationKind::Sequence => per_cell.saturating_mul(i),
                AnimationKind::Parallel => Duration::ZERO,
            };
            *p = linear(elapsed.saturating_sub(delay), per_cell);
        }
        if self.progress.iter().all(|&p| p >= 1.0) {
            tracing::debug!("entrance animation finished");
            self.phase = Phase::Idle;
        }
    }

    pub(super) fn opacity(&self, index: usize) -> f32 {
        if self.config.is_some() {
            self.progress.get(index).copied().unwrap_or(1.0)
        } else {
            1.0
        }
    }

    fn per_cell(&self) -> Duration {
        self.config
            .as_ref()
            .map_or(Duration::ZERO, |cfg| Duration::from_millis(cfg.duration))
    }
}

fn linear(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f32() / total.as_secs_f32()).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animation(kind: &str, millis: u64, positions: usize) -> EntranceAnimation {
        EntranceAnimation::new(
            Some(AnimationConfig {
                kind: kind.to_owned(),
                duration: millis,
            }),
            positions,
        )
    }

    fn assert_near(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("sequence".parse(), Ok(AnimationKind::Sequence));
        assert_eq!("PARALLEL".parse(), Ok(AnimationKind::Parallel));
        assert_eq!(
            "bogus".parse::<AnimationKind>(),
            Err(ConfigError::UnknownAnimation(String::from("bogus")))
        );
    }

    #[test]
    fn test_unconfigured_is_opaque() {
        let mut anim = EntranceAnimation::new(None, 3);
        anim.start(Instant::now()).unwrap();
        assert_eq!(anim.phase(), Phase::Idle);
        assert_near(anim.opacity(0), 1.0);
        assert_near(anim.opacity(2), 1.0);
    }

    #[test]
    fn test_parallel() {
        let t0 = Instant::now();
        let mut anim = animation("parallel", 100, 3);
        anim.start(t0).unwrap();
        assert!(anim.is_animating(), "animation should be running");
        anim.advance(t0 + Duration::from_millis(50));
        for i in 0..3 {
            assert_near(anim.opacity(i), 0.5);
        }
        anim.advance(t0 + Duration::from_millis(100));
        for i in 0..3 {
            assert_near(anim.opacity(i), 1.0);
        }
        assert_eq!(anim.phase(), Phase::Idle);
    }

    #[test]
    fn test_sequence() {
        let t0 = Instant::now();
        let mut anim = animation("Sequence", 100, 3);
        anim.start(t0).unwrap();
        anim.advance(t0 + Duration::from_millis(150));
        assert_near(anim.opacity(0), 1.0);
        assert_near(anim.opacity(1), 0.5);
        assert_near(anim.opacity(2), 0.0);
        assert!(anim.is_animating(), "third cell has not started yet");
        anim.advance(t0 + Duration::from_millis(300));
        assert_near(anim.opacity(2), 1.0);
        assert_eq!(anim.phase(), Phase::Idle);
    }

    #[test]
    fn test_zero_duration_finishes_at_once() {
        let mut anim = animation("parallel", 0, 4);
        anim.start(Instant::now()).unwrap();
        assert_eq!(anim.phase(), Phase::Idle);
        assert_near(anim.opacity(3), 1.0);
    }

    #[test]
    fn test_bogus_kind_leaves_state_alone() {
        let t0 = Instant::now();
        let mut anim = animation("bogus", 100, 2);
        let before = anim.clone();
        assert_eq!(
            anim.start(t0),
            Err(ConfigError::UnknownAnimation(String::from("bogus")))
        );
        assert_eq!(anim, before);
    }

    #[test]
    fn test_reset() {
        let t0 = Instant::now();
        let mut anim = animation("parallel", 10, 2);
        anim.start(t0).unwrap();
        anim.advance(t0 + Duration::from_millis(10));
        anim.reset(5);
        assert_eq!(anim.phase(), Phase::Idle);
        for i in 0..5 {
            assert_near(anim.opacity(i), 0.0);
        }
    }
}
