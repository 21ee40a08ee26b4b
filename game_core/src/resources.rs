use rand::Rng;

use crate::components::Side;
use crate::events::{EffectEvent, RoundSummary, SoundEvent};

/// Simulation clock, counted in fixed ticks since match start
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub tick: u64,
    pub dt: f32, // seconds per tick
}

impl Time {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            tick: 0,
            dt: 1.0 / tick_rate as f32,
        }
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.tick as f32 * self.dt
    }

    pub fn ticks_to_secs(&self, ticks: u64) -> u32 {
        (ticks as f32 * self.dt).floor() as u32
    }
}

/// Host frame pacing: one tick per host callback once a full frame interval
/// has elapsed. Late frames are skipped, never replayed.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    frame_ms: f64,
    last_ms: f64,
}

impl FrameClock {
    pub fn new(frame_ms: f64) -> Self {
        Self {
            frame_ms,
            last_ms: 0.0,
        }
    }

    /// Returns true when the host timestamp `now_ms` is due for a tick
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_ms >= self.frame_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player: u32,
    pub ai: u32,
    pub winner: Option<Side>,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Ai => self.ai += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Ai => self.ai,
        }
    }

    /// Points `side` is ahead by (negative when behind)
    pub fn lead(&self, side: Side) -> i32 {
        self.get(side) as i32 - self.get(side.opponent()) as i32
    }

    pub fn has_winner(&self, win_score: u32) -> Option<Side> {
        if self.player >= win_score {
            Some(Side::Player)
        } else if self.ai >= win_score {
            Some(Side::Ai)
        } else {
            None
        }
    }
}

/// Rally bookkeeping for the current point and the match
#[derive(Debug, Clone, Copy, Default)]
pub struct RallyStats {
    pub length: u32,
    pub longest: u32,
    pub in_zone: bool,
    pub zone_ticks: u64,
}

impl RallyStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a paddle hit. Returns true when this hit enters the zone.
    pub fn record_hit(&mut self, zone_rally: u32) -> bool {
        self.length += 1;
        self.longest = self.longest.max(self.length);
        if self.length >= zone_rally && !self.in_zone {
            self.in_zone = true;
            return true;
        }
        false
    }

    pub fn end_point(&mut self) {
        self.in_zone = false;
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Uniform in [0, 1)
    pub fn unit(&mut self) -> f32 {
        self.0.gen::<f32>()
    }

    /// Uniform in [-span/2, span/2)
    pub fn centered(&mut self, span: f32) -> f32 {
        (self.unit() - 0.5) * span
    }

    pub fn chance(&mut self, probability: f32) -> bool {
        self.unit() < probability
    }

    pub fn sign(&mut self) -> f32 {
        if self.0.gen_bool(0.5) {
            1.0
        } else {
            -1.0
        }
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub sounds: Vec<SoundEvent>,
    pub effects: Vec<EffectEvent>,
    pub summary: Option<RoundSummary>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.sounds.clear();
        self.effects.clear();
        self.summary = None;
    }

    pub fn sound(&mut self, sound: SoundEvent) {
        self.sounds.push(sound);
    }

    pub fn effect(&mut self, effect: EffectEvent) {
        self.effects.push(effect);
    }
}

/// Held keys plus the one-shot fire trigger for a human paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// Input queue for human paddles, drained once per tick
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pub inputs: Vec<(Side, PaddleInput)>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.inputs.clear();
    }

    pub fn push_input(&mut self, side: Side, input: PaddleInput) {
        self.inputs.push((side, input));
    }

    pub fn pop_inputs(&mut self) -> Vec<(Side, PaddleInput)> {
        std::mem::take(&mut self.inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_increment_and_lead() {
        let mut score = Score::new();
        score.increment(Side::Player);
        score.increment(Side::Ai);
        score.increment(Side::Ai);
        assert_eq!(score.player, 1);
        assert_eq!(score.ai, 2);
        assert_eq!(score.lead(Side::Ai), 1);
        assert_eq!(score.lead(Side::Player), -1);
    }

    #[test]
    fn test_score_has_winner() {
        let mut score = Score::new();
        for _ in 0..6 {
            score.increment(Side::Ai);
        }
        assert_eq!(score.has_winner(7), None, "No winner below threshold");
        score.increment(Side::Ai);
        assert_eq!(score.has_winner(7), Some(Side::Ai), "AI should win at 7");
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.sound(SoundEvent::Wall);
        events.effect(EffectEvent::ZoneActivate);

        events.clear();

        assert!(events.sounds.is_empty());
        assert!(events.effects.is_empty());
        assert!(events.summary.is_none());
    }

    #[test]
    fn test_input_queue_pop_drains() {
        let mut queue = InputQueue::new();
        let input = PaddleInput {
            up: true,
            ..PaddleInput::default()
        };
        queue.push_input(Side::Player, input);

        let inputs = queue.pop_inputs();
        assert_eq!(inputs, vec![(Side::Player, input)]);
        assert!(queue.inputs.is_empty());
    }

    #[test]
    fn test_frame_clock_skips_until_full_frame() {
        let mut clock = FrameClock::new(1000.0 / 60.0);
        assert!(!clock.poll(10.0), "Less than a frame since start");
        assert!(clock.poll(17.0));
        assert!(!clock.poll(20.0));
        assert!(clock.poll(60.0), "A late frame ticks once");
        assert!(!clock.poll(61.0), "Missed frames are not replayed");
    }

    #[test]
    fn test_rally_stats_zone_entry() {
        let mut rally = RallyStats::new();
        for _ in 0..4 {
            assert!(!rally.record_hit(5));
        }
        assert!(rally.record_hit(5), "Fifth hit enters the zone");
        assert!(!rally.record_hit(5), "Zone entry reported once");
        assert_eq!(rally.longest, 6);
        rally.end_point();
        assert!(!rally.in_zone);
    }

    #[test]
    fn test_rng_is_deterministic() {
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);
        for _ in 0..10 {
            assert_eq!(a.unit(), b.unit());
        }
        let c = a.centered(20.0);
        assert!((-10.0..10.0).contains(&c));
    }
}
