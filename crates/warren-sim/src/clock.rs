/// Fixed-timestep simulation clock: accumulates real elapsed time and runs
/// a bounded number of discrete ticks per frame. Tick callbacks receive
/// the 1-based tick number; subscription wiring stays with the caller.
pub struct SimClock {
    tick_count: u64,
    paused: bool,
    target_tps: u32,
    speed_multiplier: f32,
    max_ticks_per_frame: u32,
    accumulator: f64,
    // Smoothed ticks-actually-executed per real second.
    measured_ups: f32,
    ups_timer: f64,
    ups_ticks: u32,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            tick_count: 0,
            paused: false,
            target_tps: 60,
            speed_multiplier: 1.0,
            max_ticks_per_frame: 8,
            accumulator: 0.0,
            measured_ups: 0.0,
            ups_timer: 0.0,
            ups_ticks: 0,
        }
    }
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconfigures rate, speed, and the catch-up cap. Values outside the
    /// valid range are clamped, not rejected.
    pub fn configure(&mut self, ticks_per_second: u32, speed_multiplier: f32, max_ticks_per_frame: u32) {
        self.target_tps = ticks_per_second.max(1);
        self.speed_multiplier = speed_multiplier.max(0.0);
        self.max_ticks_per_frame = max_ticks_per_frame.max(1);
    }

    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
    }

    /// Simulated seconds per tick.
    #[inline]
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.target_tps.max(1) as f32
    }

    #[inline]
    pub fn measured_ups(&self) -> f32 {
        self.measured_ups
    }

    #[inline]
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Runs exactly one tick, even while paused (step-while-paused).
    pub fn step_one_tick(&mut self, mut on_tick: impl FnMut(u64)) {
        self.do_one_tick(&mut on_tick);
    }

    /// Advances by real delta seconds and executes up to the per-frame
    /// cap of ticks. Returns ticks executed. The cap bounds catch-up
    /// after a stall; leftover time stays in the accumulator.
    pub fn advance(&mut self, real_dt: f64, mut on_tick: impl FnMut(u64)) -> u32 {
        let real_dt = real_dt.max(0.0);
        self.ups_timer += real_dt;

        if self.paused || self.speed_multiplier <= 0.0 {
            self.update_ups();
            return 0;
        }

        self.accumulator += real_dt * self.speed_multiplier as f64;
        let tick_dt = 1.0 / self.target_tps as f64;
        let mut executed = 0u32;
        while self.accumulator >= tick_dt && executed < self.max_ticks_per_frame {
            self.accumulator -= tick_dt;
            self.do_one_tick(&mut on_tick);
            executed += 1;
        }
        self.update_ups();
        executed
    }

    fn do_one_tick(&mut self, on_tick: &mut impl FnMut(u64)) {
        self.tick_count += 1;
        self.ups_ticks += 1;
        on_tick(self.tick_count);
    }

    fn update_ups(&mut self) {
        if self.ups_timer >= 1.0 {
            self.measured_ups = (self.ups_ticks as f64 / self.ups_timer) as f32;
            self.ups_ticks = 0;
            self.ups_timer = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_executes_whole_ticks_only() {
        let mut clock = SimClock::new();
        clock.configure(10, 1.0, 8);
        let mut seen = Vec::new();
        assert_eq!(clock.advance(0.05, |t| seen.push(t)), 0);
        assert_eq!(clock.advance(0.06, |t| seen.push(t)), 1);
        assert_eq!(seen, vec![1]);
    }

    #[test]
    fn catch_up_is_capped_per_frame() {
        let mut clock = SimClock::new();
        clock.configure(60, 1.0, 4);
        // A full stalled second owes 60 ticks; only the cap runs.
        assert_eq!(clock.advance(1.0, |_| {}), 4);
        // The remainder stays owed and drains on later frames.
        assert_eq!(clock.advance(0.0, |_| {}), 4);
    }

    #[test]
    fn paused_clock_runs_nothing_but_step_works() {
        let mut clock = SimClock::new();
        clock.set_paused(true);
        assert_eq!(clock.advance(10.0, |_| {}), 0);
        let mut seen = Vec::new();
        clock.step_one_tick(|t| seen.push(t));
        assert_eq!(seen, vec![1]);
        assert_eq!(clock.tick_count(), 1);
    }

    #[test]
    fn tick_numbers_are_monotonic_across_frames() {
        let mut clock = SimClock::new();
        clock.configure(100, 2.0, 8);
        let mut seen = Vec::new();
        for _ in 0..5 {
            clock.advance(0.02, |t| seen.push(t));
        }
        let expect: Vec<u64> = (1..=seen.len() as u64).collect();
        assert_eq!(seen, expect);
    }

    #[test]
    fn configure_clamps_degenerate_values() {
        let mut clock = SimClock::new();
        clock.configure(0, -3.0, 0);
        assert_eq!(clock.tick_dt(), 1.0);
        // Negative speed clamps to zero, which behaves like paused.
        assert_eq!(clock.advance(5.0, |_| {}), 0);
    }
}
