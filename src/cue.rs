use crate::error::ConfigError;
use tracing::info;

/// One-shot latched cue ("flip now") raised when doneness first reaches a
/// fraction during a run.
#[derive(Clone, Debug)]
pub struct ThresholdCue {
    fraction: f32,
    fired: bool,
    showing: bool,
}

impl ThresholdCue {
    pub fn new(fraction: f32) -> Result<Self, ConfigError> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(ConfigError::CueFraction(fraction));
        }
        Ok(Self {
            fraction,
            fired: false,
            showing: false,
        })
    }

    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Feed the current doneness. Returns true on the frame the cue fires.
    pub fn observe(&mut self, doneness: f32) -> bool {
        if self.fired || doneness < self.fraction {
            return false;
        }
        self.fired = true;
        self.showing = true;
        info!(fraction = self.fraction, "threshold cue raised");
        true
    }

    pub fn is_showing(&self) -> bool {
        self.showing
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn is_acknowledged(&self) -> bool {
        self.fired && !self.showing
    }

    /// Clear the latch. Ignored until the cue has actually fired.
    pub fn acknowledge(&mut self) -> bool {
        if !self.showing {
            return false;
        }
        self.showing = false;
        true
    }

    pub fn reset(&mut self) {
        self.fired = false;
        self.showing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::CookTimer;
    use std::time::Duration;

    #[test]
    fn rejects_fractions_outside_unit_interval() {
        assert!(ThresholdCue::new(0.0).is_err());
        assert!(ThresholdCue::new(1.5).is_err());
        assert!(ThresholdCue::new(f32::NAN).is_err());
        assert!(ThresholdCue::new(1.0).is_ok());
    }

    #[test]
    fn fires_once_and_stays_quiet_after_acknowledgement() {
        let mut timer = CookTimer::new(100.0).unwrap();
        let mut cue = ThresholdCue::new(0.5).unwrap();
        timer.start(Duration::ZERO);

        let r = timer.tick(Duration::from_secs(49));
        cue.observe(r.doneness);
        assert!(!cue.is_showing());

        let r = timer.tick(Duration::from_secs(51));
        assert!(cue.observe(r.doneness));
        assert!(cue.is_showing());

        // latched while unacknowledged
        let r = timer.tick(Duration::from_secs(60));
        assert!(!cue.observe(r.doneness));
        assert!(cue.is_showing());

        assert!(cue.acknowledge());
        assert!(cue.is_acknowledged());
        let r = timer.tick(Duration::from_secs(80));
        assert!(!cue.observe(r.doneness));
        assert!(!cue.is_showing());
    }

    #[test]
    fn acknowledge_before_firing_is_ignored() {
        let mut cue = ThresholdCue::new(0.5).unwrap();
        assert!(!cue.acknowledge());
        assert!(!cue.is_acknowledged());
        assert!(cue.observe(0.7));
    }

    #[test]
    fn reset_rearms_the_cue() {
        let mut cue = ThresholdCue::new(0.5).unwrap();
        cue.observe(0.6);
        cue.acknowledge();
        cue.reset();
        assert!(!cue.has_fired());
        assert!(!cue.is_showing());
        assert!(cue.observe(0.5));
    }
}
