//! Ability interception chain.
//!
//! An ability's entry point is a base [`AbilityBehavior`] wrapped by zero or more
//! [`Interceptor`] layers. The last installed layer is outermost; each layer
//! hands control to the layers below it through [`Next`], so a layer always
//! delegates to whatever sat beneath it rather than to a fixed original.
//!
//! Layers are identified by the [`LayerId`] issued at install time. Removing a
//! layer splices out exactly that layer; the remaining layers keep delegating
//! to what is now below them, so removal order does not matter.
//!
//! ```text
//! use_ability ─▶ layer 3 ─▶ layer 2 ─▶ layer 1 ─▶ base behavior
//!                (newest)                          (pristine)
//! ```

use std::fmt;
use std::rc::Rc;

use super::AbilityCall;
use crate::context::BattleContext;
use crate::ids::LayerId;

/// The innermost behavior of an ability entry point.
pub trait AbilityBehavior {
    /// Runs the behavior. Returns whether the use succeeded.
    fn execute(&self, cx: &mut BattleContext<'_>, call: &AbilityCall) -> bool;
}

/// A layer wrapped around an ability entry point.
///
/// The provided [`Interceptor::intercept`] runs the rest of the chain first,
/// returns its result unchanged and calls [`Interceptor::on_success`] only when
/// that result was a success. Most interceptors only implement `on_success`.
pub trait Interceptor {
    /// Short label used in diagnostics.
    fn label(&self) -> &'static str {
        "interceptor"
    }

    fn intercept(&self, cx: &mut BattleContext<'_>, call: &AbilityCall, next: Next<'_>) -> bool {
        let succeeded = next.run(cx, call);
        if succeeded {
            self.on_success(cx, call);
        }
        succeeded
    }

    /// Side effect after a successful use.
    fn on_success(&self, _cx: &mut BattleContext<'_>, _call: &AbilityCall) {}
}

#[derive(Clone)]
struct Layer {
    id: LayerId,
    interceptor: Rc<dyn Interceptor>,
}

/// The part of a chain below the currently running layer.
pub struct Next<'a> {
    layers: &'a [Layer],
    base: &'a dyn AbilityBehavior,
}

impl Next<'_> {
    /// Runs the next layer, or the base behavior when no layers remain.
    pub fn run(self, cx: &mut BattleContext<'_>, call: &AbilityCall) -> bool {
        match self.layers.split_last() {
            Some((top, rest)) => top.interceptor.intercept(
                cx,
                call,
                Next {
                    layers: rest,
                    base: self.base,
                },
            ),
            None => self.base.execute(cx, call),
        }
    }
}

/// Base behavior plus installed layers for one entry point.
///
/// Cloning is cheap (reference-counted layers); the battle runs a cloned
/// snapshot so layers may be installed or removed while a use is in flight.
#[derive(Clone)]
pub struct InterceptorChain {
    base: Rc<dyn AbilityBehavior>,
    layers: Vec<Layer>,
}

impl InterceptorChain {
    pub fn new(base: Rc<dyn AbilityBehavior>) -> Self {
        Self {
            base,
            layers: Vec::new(),
        }
    }

    /// Installs `interceptor` as the new outermost layer.
    pub(crate) fn push(&mut self, id: LayerId, interceptor: Rc<dyn Interceptor>) {
        self.layers.push(Layer { id, interceptor });
    }

    /// Splices out the layer with `id`. Returns whether it was present.
    pub(crate) fn remove(&mut self, id: LayerId) -> bool {
        match self.layers.iter().position(|layer| layer.id == id) {
            Some(index) => {
                self.layers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drops every layer, returning how many were removed.
    pub(crate) fn clear(&mut self) -> usize {
        let count = self.layers.len();
        self.layers.clear();
        count
    }

    /// Number of installed layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    pub fn is_pristine(&self) -> bool {
        self.layers.is_empty()
    }

    /// Labels of installed layers, innermost first.
    pub fn labels(&self) -> Vec<&'static str> {
        self.layers.iter().map(|l| l.interceptor.label()).collect()
    }

    pub fn run(&self, cx: &mut BattleContext<'_>, call: &AbilityCall) -> bool {
        Next {
            layers: &self.layers,
            base: self.base.as_ref(),
        }
        .run(cx, call)
    }
}

impl fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("layers", &self.labels())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::ability::{Ability, AbilityEffect, EntryPoint};
    use crate::battle::{Battle, Team};
    use crate::character::Character;
    use crate::context::{MemoryBattleLog, NullEffects};
    use crate::ids::{AbilityId, CharacterId};
    use crate::stage::Stage;
    use crate::stats::CharacterStats;

    /// Records its label into a shared trace on success.
    struct Tracer {
        label: &'static str,
        trace: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Interceptor for Tracer {
        fn label(&self) -> &'static str {
            self.label
        }

        fn on_success(&self, _cx: &mut BattleContext<'_>, _call: &AbilityCall) {
            self.trace.borrow_mut().push(self.label);
        }
    }

    fn tracer(label: &'static str, trace: &Rc<RefCell<Vec<&'static str>>>) -> Rc<dyn Interceptor> {
        Rc::new(Tracer {
            label,
            trace: Rc::clone(trace),
        })
    }

    fn setup() -> (Battle, CharacterId, CharacterId, AbilityId, AbilityId) {
        let mut battle = Battle::new(3);
        let hero = battle.add_character(Character::new(
            "Hero",
            Team::Party,
            CharacterStats::new(100, 10, 0),
        ));
        let ogre = battle.add_character(Character::new(
            "Ogre",
            Team::Enemy,
            CharacterStats::new(500, 0, 0),
        ));
        let bash = battle
            .add_ability(hero, Ability::strike("Bash", vec![AbilityEffect::physical(10)]))
            .unwrap();
        let flurry = battle
            .add_ability(
                hero,
                Ability::multi_hit("Flurry", 3, vec![AbilityEffect::physical(2)]),
            )
            .unwrap();
        (battle, hero, ogre, bash, flurry)
    }

    fn use_once(
        battle: &mut Battle,
        ability: AbilityId,
        caster: CharacterId,
        target: CharacterId,
    ) -> bool {
        let mut log = MemoryBattleLog::new();
        let mut effects = NullEffects;
        let mut cx = BattleContext::new(battle, &mut log, &mut effects, Stage::FIRST);
        cx.use_ability(ability, caster, vec![target])
    }

    #[test]
    fn newest_layer_runs_its_side_effect_last() {
        let (mut battle, hero, ogre, bash, _) = setup();
        let trace = Rc::new(RefCell::new(Vec::new()));
        battle.intercept(bash, EntryPoint::Use, tracer("a", &trace)).unwrap();
        battle.intercept(bash, EntryPoint::Use, tracer("b", &trace)).unwrap();

        assert!(use_once(&mut battle, bash, hero, ogre));
        // Inner layers finish first, so the outermost side effect comes last.
        assert_eq!(*trace.borrow(), vec!["a", "b"]);
        assert_eq!(battle.character(ogre).unwrap().stats.hp, 490);
    }

    #[test]
    fn failed_use_skips_side_effects_and_keeps_result() {
        let (mut battle, hero, ogre, bash, _) = setup();
        let trace = Rc::new(RefCell::new(Vec::new()));
        battle.intercept(bash, EntryPoint::Use, tracer("a", &trace)).unwrap();
        battle.ability_mut(bash).unwrap().mana_cost = 99;

        assert!(!use_once(&mut battle, bash, hero, ogre));
        assert!(trace.borrow().is_empty());
    }

    #[test]
    fn removing_a_middle_layer_keeps_the_others_wired() {
        let (mut battle, hero, ogre, bash, _) = setup();
        let trace = Rc::new(RefCell::new(Vec::new()));
        let a = battle.intercept(bash, EntryPoint::Use, tracer("a", &trace)).unwrap();
        let b = battle.intercept(bash, EntryPoint::Use, tracer("b", &trace)).unwrap();
        let c = battle.intercept(bash, EntryPoint::Use, tracer("c", &trace)).unwrap();

        assert!(battle.remove_interceptor(bash, EntryPoint::Use, b));
        assert!(!battle.remove_interceptor(bash, EntryPoint::Use, b));
        assert!(use_once(&mut battle, bash, hero, ogre));
        assert_eq!(*trace.borrow(), vec!["a", "c"]);

        battle.remove_interceptor(bash, EntryPoint::Use, c);
        battle.remove_interceptor(bash, EntryPoint::Use, a);
        assert!(battle.ability(bash).unwrap().chain(EntryPoint::Use).unwrap().is_pristine());
    }

    #[test]
    fn hit_entry_point_is_wrapped_independently() {
        let (mut battle, hero, ogre, bash, flurry) = setup();
        let trace = Rc::new(RefCell::new(Vec::new()));
        battle.intercept(flurry, EntryPoint::Hit, tracer("hit", &trace)).unwrap();
        assert!(battle.intercept(bash, EntryPoint::Hit, tracer("x", &trace)).is_none());

        assert!(use_once(&mut battle, flurry, hero, ogre));
        assert_eq!(trace.borrow().len(), 3);
        assert_eq!(battle.character(ogre).unwrap().stats.hp, 494);
        assert_eq!(battle.interceptor_count(), 1);
        assert_eq!(battle.strip_interceptors(), 1);
        assert_eq!(battle.interceptor_count(), 0);
    }
}
