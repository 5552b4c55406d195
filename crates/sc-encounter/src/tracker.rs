//! Initiative order and the current-turn marker.

use std::collections::HashMap;

use uuid::Uuid;

use crate::actor::{Actor, Injury};

/// An actor as listed: with its position and a name unique within the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listed<'a> {
    /// The underlying actor.
    pub actor: &'a Actor,
    /// `Name #n` when the name repeats, the plain name otherwise.
    pub display_name: &'a str,
}

/// Actors in an encounter plus whose turn it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncounterTracker {
    actors: Vec<Actor>,
    display_names: Vec<String>,
    current: Option<Uuid>,
}

impl EncounterTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a tracker from stored actors and current id.
    ///
    /// A current id that matches no actor is dropped.
    pub fn from_parts(actors: Vec<Actor>, current: Option<Uuid>) -> Self {
        let mut tracker = Self {
            actors,
            display_names: Vec::new(),
            current: None,
        };
        for actor in &mut tracker.actors {
            actor.normalize();
        }
        tracker.current = current.filter(|id| tracker.get(*id).is_some());
        tracker.reindex();
        tracker
    }

    /// Actors in insertion order.
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Number of actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether there are no actors.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Look up an actor by id.
    pub fn get(&self, id: Uuid) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// Add an actor and return its id.
    pub fn add(&mut self, actor: Actor) -> Uuid {
        let id = actor.id;
        tracing::debug!("adding {} at initiative {}", actor.name, actor.initiative);
        self.actors.push(actor);
        self.reindex();
        id
    }

    /// Apply `f` to the actor with `id`. Returns false if there is none.
    ///
    /// The id can't be changed and hit points are re-clamped afterwards.
    pub fn edit(&mut self, id: Uuid, f: impl FnOnce(&mut Actor)) -> bool {
        let Some(actor) = self.actors.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        f(actor);
        actor.id = id;
        actor.normalize();
        self.reindex();
        true
    }

    /// Remove an actor. If it held the turn, the turn passes to the actor
    /// after it in initiative order.
    pub fn remove(&mut self, id: Uuid) -> Option<Actor> {
        let order = self.order();
        let position = order.iter().position(|&i| self.actors[i].id == id)?;

        if self.current_id() == Some(id) {
            self.current = (order.len() > 1)
                .then(|| order[(position + 1) % order.len()])
                .map(|i| self.actors[i].id);
        }

        let removed = self.actors.remove(order[position]);
        self.reindex();
        tracing::debug!("removed {}", removed.name);
        Some(removed)
    }

    /// Remove every actor and clear the turn marker.
    pub fn reset(&mut self) {
        self.actors.clear();
        self.display_names.clear();
        self.current = None;
    }

    /// Replace an actor's note.
    pub fn set_note(&mut self, id: Uuid, note: impl Into<String>) -> bool {
        let note = note.into();
        self.edit(id, |a| a.note = note)
    }

    /// Set an actor's hit points, clamped to its maximum.
    ///
    /// Returns `None` if the actor is unknown or doesn't track hit points.
    pub fn set_hp(&mut self, id: Uuid, hp: u32) -> Option<u32> {
        self.actors.iter_mut().find(|a| a.id == id)?.set_hp(hp)
    }

    /// Change an actor's hit points by `delta`, clamped to `0..=max_hp`.
    pub fn adjust_hp(&mut self, id: Uuid, delta: i64) -> Option<u32> {
        self.actors.iter_mut().find(|a| a.id == id)?.adjust_hp(delta)
    }

    /// Flip an injury and return its new state.
    ///
    /// Returns `None` if the actor is unknown or doesn't track injuries.
    pub fn toggle_injury(&mut self, id: Uuid, injury: Injury) -> Option<bool> {
        let actor = self.actors.iter_mut().find(|a| a.id == id)?;
        actor.injuries.as_mut().map(|inj| inj.toggle(injury))
    }

    /// Indices into `actors` sorted by initiative, highest first. Ties keep
    /// insertion order.
    fn order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.actors.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(self.actors[i].initiative));
        order
    }

    fn reindex(&mut self) {
        let mut totals: HashMap<&str, usize> = HashMap::new();
        for actor in &self.actors {
            *totals.entry(actor.name.as_str()).or_default() += 1;
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        let names: Vec<String> = self
            .actors
            .iter()
            .map(|actor| {
                let name = actor.name.as_str();
                if totals.get(name).copied().unwrap_or(0) > 1 {
                    let n = seen.entry(name).or_default();
                    *n += 1;
                    format!("{name} #{n}")
                } else {
                    actor.name.clone()
                }
            })
            .collect();
        self.display_names = names;
    }

    /// Actors in initiative order with their display names.
    pub fn ordered(&self) -> Vec<Listed<'_>> {
        self.order()
            .into_iter()
            .map(|i| Listed {
                actor: &self.actors[i],
                display_name: &self.display_names[i],
            })
            .collect()
    }

    /// The display name of an actor.
    pub fn display_name(&self, id: Uuid) -> Option<&str> {
        let index = self.actors.iter().position(|a| a.id == id)?;
        self.display_names.get(index).map(String::as_str)
    }

    /// Whose turn it is: the marked actor, or the first in order when
    /// nothing is marked.
    pub fn current_id(&self) -> Option<Uuid> {
        self.current
            .or_else(|| self.order().first().map(|&i| self.actors[i].id))
    }

    /// The actor whose turn it is.
    pub fn current(&self) -> Option<&Actor> {
        self.current_id().and_then(|id| self.get(id))
    }

    /// Whether the turn marker has been set explicitly.
    pub fn has_marker(&self) -> bool {
        self.current.is_some()
    }

    /// Pass the turn to the next actor, wrapping to the top.
    pub fn next_turn(&mut self) -> Option<&Actor> {
        self.step(1)
    }

    /// Pass the turn back to the previous actor, wrapping to the bottom.
    pub fn previous_turn(&mut self) -> Option<&Actor> {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> Option<&Actor> {
        let order = self.order();
        let len = order.len();
        if len == 0 {
            return None;
        }
        let current = self.current_id();
        let position = order
            .iter()
            .position(|&i| Some(self.actors[i].id) == current)
            .unwrap_or(0);
        let len = len as isize;
        let next = (position as isize + delta).rem_euclid(len) as usize;
        let id = self.actors[order[next]].id;
        self.current = Some(id);
        self.get(id)
    }

    /// Find an actor by its 1-based position in initiative order, or by
    /// display name ignoring case and spaces.
    pub fn resolve(&self, who: &str) -> Option<Uuid> {
        let who = who.trim();
        let listed = self.ordered();
        if let Ok(n) = who.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| listed.get(i))
                .map(|l| l.actor.id);
        }
        let key = squash(who);
        listed
            .iter()
            .find(|l| squash(l.display_name) == key)
            .map(|l| l.actor.id)
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(t: &EncounterTracker) -> Vec<String> {
        t.ordered()
            .iter()
            .map(|l| l.display_name.to_string())
            .collect()
    }

    fn current_name(t: &EncounterTracker) -> Option<String> {
        t.current_id()
            .and_then(|id| t.display_name(id))
            .map(str::to_string)
    }

    #[test]
    fn orders_by_initiative_descending() {
        let mut t = EncounterTracker::new();
        t.add(Actor::new("Slow", 3));
        t.add(Actor::new("Fast", 15));
        t.add(Actor::new("Middle", 9));
        assert_eq!(names(&t), vec!["Fast", "Middle", "Slow"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut t = EncounterTracker::new();
        t.add(Actor::new("First", 10));
        t.add(Actor::new("Second", 10));
        t.add(Actor::new("Third", 10));
        assert_eq!(names(&t), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn repeated_names_are_numbered_in_insertion_order() {
        let mut t = EncounterTracker::new();
        t.add(Actor::new("Raider", 5));
        t.add(Actor::new("Sole Survivor", 12));
        t.add(Actor::new("Raider", 14));
        assert_eq!(names(&t), vec!["Raider #2", "Sole Survivor", "Raider #1"]);
    }

    #[test]
    fn numbering_updates_after_removal() {
        let mut t = EncounterTracker::new();
        let a = t.add(Actor::new("Raider", 5));
        t.add(Actor::new("Raider", 4));
        t.remove(a);
        assert_eq!(names(&t), vec!["Raider"]);
    }

    #[test]
    fn current_defaults_to_top() {
        let mut t = EncounterTracker::new();
        assert!(t.current().is_none());
        t.add(Actor::new("B", 2));
        t.add(Actor::new("A", 8));
        assert_eq!(current_name(&t).as_deref(), Some("A"));
        assert!(!t.has_marker());
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut t = EncounterTracker::new();
        t.add(Actor::new("A", 3));
        t.add(Actor::new("B", 2));
        t.add(Actor::new("C", 1));

        assert_eq!(t.next_turn().map(|a| a.name.as_str()), Some("B"));
        assert_eq!(t.next_turn().map(|a| a.name.as_str()), Some("C"));
        assert_eq!(t.next_turn().map(|a| a.name.as_str()), Some("A"));
        assert_eq!(t.previous_turn().map(|a| a.name.as_str()), Some("C"));
        assert!(t.has_marker());
    }

    #[test]
    fn next_on_empty() {
        let mut t = EncounterTracker::new();
        assert!(t.next_turn().is_none());
        assert!(t.previous_turn().is_none());
    }

    #[test]
    fn removing_current_passes_turn_on() {
        let mut t = EncounterTracker::new();
        t.add(Actor::new("A", 3));
        let b = t.add(Actor::new("B", 2));
        t.add(Actor::new("C", 1));
        t.next_turn();
        assert_eq!(t.current_id(), Some(b));

        t.remove(b);
        assert_eq!(current_name(&t).as_deref(), Some("C"));

        // Removing the last in order wraps to the top.
        let c = t.current_id();
        t.remove(c.unwrap());
        assert_eq!(current_name(&t).as_deref(), Some("A"));
    }

    #[test]
    fn removing_other_keeps_turn() {
        let mut t = EncounterTracker::new();
        let a = t.add(Actor::new("A", 3));
        let b = t.add(Actor::new("B", 2));
        t.next_turn();
        t.remove(a);
        assert_eq!(t.current_id(), Some(b));
    }

    #[test]
    fn removing_only_actor_clears_turn() {
        let mut t = EncounterTracker::new();
        let a = t.add(Actor::new("A", 3));
        t.next_turn();
        assert!(t.remove(a).is_some());
        assert!(t.current_id().is_none());
        assert!(!t.has_marker());
        assert!(t.remove(a).is_none());
    }

    #[test]
    fn edit_keeps_id_and_clamps_hp() {
        let mut t = EncounterTracker::new();
        let id = t.add(Actor::new("Ghoul", 5).with_hp(8));
        assert!(t.edit(id, |a| {
            a.initiative = 11;
            a.hp = Some(99);
            a.id = Uuid::nil();
        }));
        let a = t.get(id).unwrap();
        assert_eq!(a.initiative, 11);
        assert_eq!(a.hp, Some(8));
        assert!(!t.edit(Uuid::nil(), |_| {}));
    }

    #[test]
    fn notes_hp_and_injuries() {
        let mut t = EncounterTracker::new();
        let ghoul = t.add(Actor::new("Ghoul", 5).with_hp(8).with_injuries());
        let dog = t.add(Actor::new("Dog", 7));

        assert!(t.set_note(ghoul, "feral"));
        assert_eq!(t.get(ghoul).unwrap().note, "feral");
        assert_eq!(t.set_hp(ghoul, 3), Some(3));
        assert_eq!(t.adjust_hp(ghoul, -10), Some(0));
        assert_eq!(t.set_hp(dog, 3), None);

        assert_eq!(t.toggle_injury(ghoul, Injury::Head), Some(true));
        assert_eq!(t.toggle_injury(dog, Injury::Head), None);
    }

    #[test]
    fn reset_clears_everything() {
        let mut t = EncounterTracker::new();
        t.add(Actor::new("A", 1));
        t.next_turn();
        t.reset();
        assert!(t.is_empty());
        assert!(t.current_id().is_none());
    }

    #[test]
    fn from_parts_drops_unknown_current() {
        let a = Actor::new("A", 1);
        let t = EncounterTracker::from_parts(vec![a.clone()], Some(Uuid::nil()));
        assert!(!t.has_marker());
        assert_eq!(t.current_id(), Some(a.id));

        let t = EncounterTracker::from_parts(vec![a.clone()], Some(a.id));
        assert!(t.has_marker());
    }

    #[test]
    fn resolve_by_position_and_name() {
        let mut t = EncounterTracker::new();
        let r1 = t.add(Actor::new("Raider", 5));
        let r2 = t.add(Actor::new("Raider", 9));
        let ss = t.add(Actor::new("Sole Survivor", 1));

        assert_eq!(t.resolve("1"), Some(r2));
        assert_eq!(t.resolve("3"), Some(ss));
        assert_eq!(t.resolve("0"), None);
        assert_eq!(t.resolve("raider#1"), Some(r1));
        assert_eq!(t.resolve("SoleSurvivor"), Some(ss));
        assert_eq!(t.resolve("Raider"), None);
    }
}
