use crate::mover::{GridDir, GridMover};

/// Behavior drives a mover by queueing intents; it never edits the grid
/// directly. Transitions run through [`Actor::set_behavior`], so the
/// controller owns the enter/exit ordering.
pub trait Behavior {
    fn on_enter(&mut self, _mover: &mut GridMover) {}
    fn on_exit(&mut self, _mover: &mut GridMover) {}
    fn tick(&mut self, mover: &mut GridMover, dt: f32);
}

/// A mover paired with an optional behavior.
pub struct Actor {
    pub mover: GridMover,
    behavior: Option<Box<dyn Behavior>>,
}

impl Actor {
    pub fn new(mover: GridMover) -> Self {
        Self {
            mover,
            behavior: None,
        }
    }

    /// Swaps the active behavior: exit on the old, enter on the new.
    pub fn set_behavior(&mut self, behavior: Option<Box<dyn Behavior>>) {
        if let Some(mut old) = self.behavior.take() {
            old.on_exit(&mut self.mover);
        }
        self.behavior = behavior;
        if let Some(b) = self.behavior.as_mut() {
            b.on_enter(&mut self.mover);
        }
    }

    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }

    /// Ticks the behavior, if any. Movement resolution happens
    /// separately via the mover itself.
    pub fn tick_behavior(&mut self, dt: f32) {
        if let Some(mut b) = self.behavior.take() {
            b.tick(&mut self.mover, dt);
            self.behavior = Some(b);
        }
    }
}

/// Cycles a fixed list of directions, queueing the next one whenever the
/// mover's intent queue drains.
pub struct PatrolBehavior {
    route: Vec<GridDir>,
    next: usize,
}

impl PatrolBehavior {
    pub fn new(route: Vec<GridDir>) -> Self {
        Self { route, next: 0 }
    }
}

impl Behavior for PatrolBehavior {
    fn on_exit(&mut self, mover: &mut GridMover) {
        mover.clear_intents();
    }

    fn tick(&mut self, mover: &mut GridMover, _dt: f32) {
        if self.route.is_empty() || mover.has_queued_move() {
            return;
        }
        mover.queue_move(self.route[self.next]);
        self.next = (self.next + 1) % self.route.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mover::MoverRules;
    use warren_world::GridPos;

    use std::cell::RefCell;
    use std::rc::Rc;

    struct Tracing {
        tag: &'static str,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl Behavior for Tracing {
        fn on_enter(&mut self, _m: &mut GridMover) {
            self.events.borrow_mut().push(format!("enter {}", self.tag));
        }
        fn on_exit(&mut self, _m: &mut GridMover) {
            self.events.borrow_mut().push(format!("exit {}", self.tag));
        }
        fn tick(&mut self, _m: &mut GridMover, _dt: f32) {
            self.events.borrow_mut().push(format!("tick {}", self.tag));
        }
    }

    fn actor() -> Actor {
        Actor::new(GridMover::new(GridPos::ZERO, MoverRules::default()))
    }

    #[test]
    fn patrol_queues_one_intent_when_queue_is_empty() {
        let mut a = actor();
        a.set_behavior(Some(Box::new(PatrolBehavior::new(vec![
            GridDir::East,
            GridDir::West,
        ]))));
        a.tick_behavior(0.1);
        assert!(a.mover.has_queued_move());
        // Queue still holds the first intent, so nothing new is added.
        a.tick_behavior(0.1);
        let mut drained = 0;
        while a.mover.has_queued_move() {
            a.mover.clear_intents();
            drained += 1;
        }
        assert_eq!(drained, 1);
    }

    #[test]
    fn transition_runs_exit_before_enter() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut a = actor();
        a.set_behavior(Some(Box::new(Tracing {
            tag: "idle",
            events: Rc::clone(&events),
        })));
        a.tick_behavior(0.1);
        a.set_behavior(Some(Box::new(Tracing {
            tag: "walk",
            events: Rc::clone(&events),
        })));
        a.set_behavior(None);
        assert_eq!(
            *events.borrow(),
            vec!["enter idle", "tick idle", "exit idle", "enter walk", "exit walk"]
        );
        assert!(!a.has_behavior());
    }

    #[test]
    fn swapping_out_a_patrol_clears_its_intents() {
        let mut a = actor();
        a.set_behavior(Some(Box::new(PatrolBehavior::new(vec![GridDir::East]))));
        a.tick_behavior(0.1);
        assert!(a.mover.has_queued_move());
        a.set_behavior(None);
        assert!(!a.mover.has_queued_move());
    }
}
