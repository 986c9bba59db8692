use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::error::{GameError, Result};

/// What a state asks the machine to do after `execute` or `on_event`.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition<K, A = ()> {
    Stay,
    Go(K),
    /// Transition and hand `A` to the target's `enter`.
    GoWith(K, A),
}

/// One behaviour unit of a [`StateMachine`].
///
/// Instances are allocated once and reused across every activation, so
/// `enter` must re-initialise any transient fields the state keeps.
/// `exit` runs on the outgoing state before the incoming state's `enter`;
/// anything a state changes on `enter` (hitbox, drag) it undoes there.
pub trait State<K, C: ?Sized, A = (), E = ()> {
    fn enter(&mut self, _ctx: &mut C, _args: A) -> Result<()> {
        Ok(())
    }

    fn execute(&mut self, ctx: &mut C) -> Result<Transition<K, A>>;

    fn exit(&mut self, _ctx: &mut C) -> Result<()> {
        Ok(())
    }

    /// Queued events are delivered here, inside [`StateMachine::step`].
    fn on_event(&mut self, _ctx: &mut C, _event: &E) -> Result<Transition<K, A>> {
        Ok(Transition::Stay)
    }
}

/// Table-driven finite-state machine.
///
/// `K` names states, `C` is the context every state call receives (world,
/// actor, input), `A` carries extra arguments into `enter`, and `E` is the
/// event type queued with [`post`](Self::post). The context is borrowed per
/// call rather than stored so the machine never outlives a frame's borrows.
///
/// # Usage
/// ```ignore
/// let mut fsm = StateMachine::new(Key::Idle)
///     .with_state(Key::Idle, Idle::default())
///     .with_state(Key::Walk, Walk::default());
/// // Each frame:
/// fsm.step(&mut ctx)?;
/// ```
pub struct StateMachine<K, C: ?Sized, A = (), E = ()> {
    initial: K,
    states: HashMap<K, Box<dyn State<K, C, A, E>>>,
    current: Option<K>,
    previous: Option<K>,
    pending: VecDeque<E>,
    /// Completed `execute` calls in the current state. Reset on each transition.
    frames_in_state: u32,
}

impl<K, C, A, E> StateMachine<K, C, A, E>
where
    K: Copy + Eq + Hash + Debug,
    C: ?Sized,
    A: Default,
{
    /// Create an empty machine that will start in `initial` on the first step.
    pub fn new(initial: K) -> Self {
        Self {
            initial,
            states: HashMap::new(),
            current: None,
            previous: None,
            pending: VecDeque::new(),
            frames_in_state: 0,
        }
    }

    pub fn with_state(mut self, key: K, state: impl State<K, C, A, E> + 'static) -> Self {
        self.insert(key, Box::new(state));
        self
    }

    /// Register `state` under `key`, replacing any earlier registration.
    pub fn insert(&mut self, key: K, state: Box<dyn State<K, C, A, E>>) {
        if self.states.insert(key, state).is_some() {
            debug!(state = ?key, "replaced state registration");
        }
    }

    pub fn contains(&self, key: K) -> bool {
        self.states.contains_key(&key)
    }

    /// `None` until the first [`step`](Self::step).
    pub fn current(&self) -> Option<K> {
        self.current
    }

    pub fn previous(&self) -> Option<K> {
        self.previous
    }

    pub fn frames_in_state(&self) -> u32 {
        self.frames_in_state
    }

    /// True until the active state has executed once.
    pub fn just_entered(&self) -> bool {
        self.current.is_some() && self.frames_in_state == 0
    }

    /// Queue an event for delivery at the start of the next step.
    pub fn post(&mut self, event: E) {
        self.pending.push_back(event);
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Advance one frame.
    ///
    /// On the very first call the initial state is entered. Queued events are
    /// then drained into the active state, and finally the active state
    /// executes. Any transition requested along the way happens immediately.
    pub fn step(&mut self, ctx: &mut C) -> Result<()> {
        let current = match self.current {
            Some(key) => key,
            None => {
                if self.states.is_empty() {
                    return Err(GameError::Configuration(
                        "state machine stepped with no states registered".into(),
                    ));
                }
                if !self.states.contains_key(&self.initial) {
                    return Err(GameError::Configuration(format!(
                        "initial state {:?} is not registered",
                        self.initial
                    )));
                }
                let initial = self.initial;
                self.current = Some(initial);
                self.frames_in_state = 0;
                debug!(to = ?initial, "state machine started");
                self.state_mut(initial)?.enter(ctx, A::default())?;
                initial
            }
        };

        let mut active = current;
        while let Some(event) = self.pending.pop_front() {
            let requested = self.state_mut(active)?.on_event(ctx, &event)?;
            self.apply(requested, ctx)?;
            active = self.current.unwrap_or(active);
        }

        let requested = self.state_mut(active)?.execute(ctx)?;
        if matches!(requested, Transition::Stay) {
            self.frames_in_state += 1;
        } else {
            self.apply(requested, ctx)?;
        }
        Ok(())
    }

    /// Switch to `next` with default enter arguments.
    pub fn transition(&mut self, next: K, ctx: &mut C) -> Result<()> {
        self.transition_with(next, ctx, A::default())
    }

    /// Exit the active state (if any), then enter `next` with `args`.
    pub fn transition_with(&mut self, next: K, ctx: &mut C, args: A) -> Result<()> {
        if !self.states.contains_key(&next) {
            return Err(GameError::UnknownState(format!("{next:?}")));
        }

        if let Some(old) = self.current {
            self.state_mut(old)?.exit(ctx)?;
        }

        debug!(from = ?self.current, to = ?next, "state transition");
        self.previous = self.current;
        self.current = Some(next);
        self.frames_in_state = 0;
        self.state_mut(next)?.enter(ctx, args)
    }

    fn apply(&mut self, requested: Transition<K, A>, ctx: &mut C) -> Result<()> {
        match requested {
            Transition::Stay => Ok(()),
            Transition::Go(next) => self.transition(next, ctx),
            Transition::GoWith(next, args) => self.transition_with(next, ctx, args),
        }
    }

    fn state_mut(&mut self, key: K) -> Result<&mut Box<dyn State<K, C, A, E>>> {
        self.states
            .get_mut(&key)
            .ok_or_else(|| GameError::UnknownState(format!("{key:?}")))
    }
}
