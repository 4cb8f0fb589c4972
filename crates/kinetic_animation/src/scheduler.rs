//! Animation scheduler
//!
//! Owns controllers, chains and staggered animations and ticks them each
//! frame. This is the host's single tick source; everything it owns is
//! advanced on the calling thread.

use crate::chain::AnimationChain;
use crate::controller::{AnimationController, ControllerId};
use crate::stagger::StaggeredAnimation;
use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

new_key_type! {
    /// Handle to a registered chain
    pub struct ChainId;
    /// Handle to a registered staggered animation
    pub struct StaggerId;
}

/// The animation scheduler that ticks all registered animations
pub struct AnimationScheduler {
    controllers: SlotMap<ControllerId, AnimationController>,
    chains: SlotMap<ChainId, AnimationChain>,
    staggers: SlotMap<StaggerId, StaggeredAnimation>,
    last_frame: Instant,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            controllers: SlotMap::with_key(),
            chains: SlotMap::with_key(),
            staggers: SlotMap::with_key(),
            last_frame: Instant::now(),
        }
    }

    pub fn add_controller(&mut self, controller: AnimationController) -> ControllerId {
        self.controllers.insert(controller)
    }

    pub fn controller(&self, id: ControllerId) -> Option<&AnimationController> {
        self.controllers.get(id)
    }

    pub fn controller_mut(&mut self, id: ControllerId) -> Option<&mut AnimationController> {
        self.controllers.get_mut(id)
    }

    /// Remove a controller, dropping its listeners
    pub fn remove_controller(&mut self, id: ControllerId) -> Option<AnimationController> {
        let mut controller = self.controllers.remove(id)?;
        controller.dispose();
        Some(controller)
    }

    pub fn add_chain(&mut self, chain: AnimationChain) -> ChainId {
        self.chains.insert(chain)
    }

    pub fn chain(&self, id: ChainId) -> Option<&AnimationChain> {
        self.chains.get(id)
    }

    pub fn chain_mut(&mut self, id: ChainId) -> Option<&mut AnimationChain> {
        self.chains.get_mut(id)
    }

    /// Remove a chain, disposing it
    pub fn remove_chain(&mut self, id: ChainId) -> Option<AnimationChain> {
        let mut chain = self.chains.remove(id)?;
        chain.dispose();
        Some(chain)
    }

    pub fn add_stagger(&mut self, stagger: StaggeredAnimation) -> StaggerId {
        self.staggers.insert(stagger)
    }

    pub fn stagger(&self, id: StaggerId) -> Option<&StaggeredAnimation> {
        self.staggers.get(id)
    }

    pub fn stagger_mut(&mut self, id: StaggerId) -> Option<&mut StaggeredAnimation> {
        self.staggers.get_mut(id)
    }

    pub fn remove_stagger(&mut self, id: StaggerId) -> Option<StaggeredAnimation> {
        self.staggers.remove(id)
    }

    /// Tick all animations by the wall-clock time since the last frame
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt_ms = (now - self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;
        self.tick_by(dt_ms);
    }

    /// Tick all animations by a fixed delta (in milliseconds)
    pub fn tick_by(&mut self, dt_ms: f32) {
        for (_, controller) in self.controllers.iter_mut() {
            controller.tick(dt_ms);
        }
        for (_, chain) in self.chains.iter_mut() {
            chain.tick(dt_ms);
        }
        for (_, stagger) in self.staggers.iter_mut() {
            stagger.tick(dt_ms);
        }
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.controllers.iter().any(|(_, c)| c.is_animating())
            || self.chains.iter().any(|(_, c)| c.is_playing())
            || self.staggers.iter().any(|(_, s)| s.is_animating())
    }

    /// Total number of registered animations
    pub fn len(&self) -> usize {
        self.controllers.len() + self.chains.len() + self.staggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    #[test]
    fn test_tick_by_advances_everything() {
        let mut scheduler = AnimationScheduler::new();

        let mut controller = AnimationController::new(100);
        controller.forward();
        let controller_id = scheduler.add_controller(controller);

        let mut chain = AnimationChain::new();
        chain.add_delay(100).unwrap();
        chain.play().unwrap();
        let chain_id = scheduler.add_chain(chain);

        let mut stagger = StaggeredAnimation::new(2, 100, 10, Easing::Linear);
        stagger.forward();
        let stagger_id = scheduler.add_stagger(stagger);

        assert!(scheduler.has_active_animations());
        scheduler.tick_by(50.0);
        assert!((scheduler.controller(controller_id).unwrap().value() - 0.5).abs() < 1e-5);

        scheduler.tick_by(60.0);
        assert!(!scheduler.has_active_animations());
        assert!(scheduler.chain(chain_id).unwrap().is_completed());
        assert_eq!(
            scheduler.stagger(stagger_id).unwrap().item_values(),
            vec![1.0, 1.0]
        );
    }

    #[test]
    fn test_remove_chain_disposes_it() {
        let mut scheduler = AnimationScheduler::new();
        let mut chain = AnimationChain::new();
        chain.add_fade(100, Easing::Linear, |_| {}).unwrap();
        let id = scheduler.add_chain(chain);

        let removed = scheduler.remove_chain(id).unwrap();
        assert!(removed.is_disposed());
        assert!(scheduler.chain(id).is_none());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_remove_controller_drops_listeners() {
        let mut scheduler = AnimationScheduler::new();
        let mut controller = AnimationController::new(100);
        controller.add_listener(|_| {});
        let id = scheduler.add_controller(controller);

        let removed = scheduler.remove_controller(id).unwrap();
        assert_eq!(removed.listener_count(), 0);
    }
}
