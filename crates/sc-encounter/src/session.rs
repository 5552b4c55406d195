//! Persisted encounter session.
//!
//! Actors are stored as a JSON array under `et-actors` and the id of the
//! actor whose turn it is under `et-current-initiative`. Unreadable entries
//! are discarded on open.

use uuid::Uuid;

use sc_core::KeyValueStore;

use crate::actor::{Actor, Injury, Special};
use crate::error::{EncounterError, EncounterResult};
use crate::tracker::EncounterTracker;

/// Store key for the actor list.
pub const ACTORS_KEY: &str = "et-actors";
/// Store key for the current actor's id.
pub const CURRENT_KEY: &str = "et-current-initiative";
/// Every key an encounter session writes.
pub const KEYS: [&str; 2] = [ACTORS_KEY, CURRENT_KEY];

/// An encounter tracker kept in sync with a key-value store.
pub struct EncounterSession<S: KeyValueStore> {
    store: S,
    tracker: EncounterTracker,
}

impl<S: KeyValueStore> EncounterSession<S> {
    /// Open a session, restoring actors and the turn marker from `store`.
    pub fn open(store: S) -> Self {
        let actors = match store.get(ACTORS_KEY) {
            Some(raw) => match serde_json::from_str::<Option<Vec<Actor>>>(&raw) {
                Ok(actors) => actors.unwrap_or_default(),
                Err(e) => {
                    tracing::warn!("discarding malformed {ACTORS_KEY}: {e}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let current = store.get(CURRENT_KEY).and_then(|raw| {
            let parsed = Uuid::parse_str(raw.trim().trim_matches('"')).ok();
            if parsed.is_none() && raw.trim() != "null" {
                tracing::warn!("discarding unreadable {CURRENT_KEY}: {raw:?}");
            }
            parsed
        });

        let tracker = EncounterTracker::from_parts(actors, current);
        tracing::debug!("opened encounter with {} actors", tracker.len());
        Self { store, tracker }
    }

    /// The tracker.
    pub fn tracker(&self) -> &EncounterTracker {
        &self.tracker
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the session, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Change the tracker and write it back.
    fn update<T>(&mut self, f: impl FnOnce(&mut EncounterTracker) -> T) -> EncounterResult<T> {
        let out = f(&mut self.tracker);
        self.save()?;
        Ok(out)
    }

    fn save(&mut self) -> EncounterResult<()> {
        let json = serde_json::to_string(self.tracker.actors()).map_err(sc_core::StoreError::from)?;
        self.store.set(ACTORS_KEY, &json)?;
        let marked = self.tracker.current_id().filter(|_| self.tracker.has_marker());
        match marked {
            Some(id) => self.store.set(CURRENT_KEY, &id.to_string())?,
            None => self.store.remove(CURRENT_KEY)?,
        }
        Ok(())
    }

    /// Add an actor.
    pub fn add_actor(&mut self, actor: Actor) -> EncounterResult<Uuid> {
        self.update(|t| t.add(actor))
    }

    /// Remove an actor.
    pub fn remove_actor(&mut self, id: Uuid) -> EncounterResult<Option<Actor>> {
        self.update(|t| t.remove(id))
    }

    /// Edit an actor in place.
    pub fn edit_actor(&mut self, id: Uuid, f: impl FnOnce(&mut Actor)) -> EncounterResult<bool> {
        self.update(|t| t.edit(id, f))
    }

    /// Pass the turn on.
    pub fn next_turn(&mut self) -> EncounterResult<Option<Uuid>> {
        self.update(|t| t.next_turn().map(|a| a.id))
    }

    /// Pass the turn back.
    pub fn previous_turn(&mut self) -> EncounterResult<Option<Uuid>> {
        self.update(|t| t.previous_turn().map(|a| a.id))
    }

    /// Remove every actor and both stored keys.
    pub fn reset(&mut self) -> EncounterResult<()> {
        self.tracker.reset();
        for key in KEYS {
            self.store.remove(key)?;
        }
        tracing::debug!("encounter reset");
        Ok(())
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> EncounterResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "add" => self.do_add(rest),
            "list" | "ls" => Ok(self.list()),
            "next" | "n" => self.do_turn(true),
            "prev" | "previous" | "p" => self.do_turn(false),
            "remove" | "rm" => self.do_remove(rest),
            "note" => self.do_note(rest),
            "hp" => self.do_hp(rest),
            "injure" | "injury" => self.do_injure(rest),
            "init" => self.do_init(rest),
            "reset" => {
                self.reset()?;
                Ok("Encounter reset.".to_string())
            }
            "help" => Ok(help_text()),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            _ => Err(EncounterError::UnknownCommand(cmd)),
        }
    }

    /// Actors in initiative order, one per line, with the current one marked.
    pub fn list(&self) -> String {
        let listed = self.tracker.ordered();
        if listed.is_empty() {
            return "No actors.".to_string();
        }
        let current = self.tracker.current_id();
        let lines: Vec<String> = listed
            .iter()
            .enumerate()
            .map(|(i, l)| {
                let marker = if Some(l.actor.id) == current { ">" } else { " " };
                let mut line = format!(
                    "{marker} {}. {} [{}]",
                    i + 1,
                    l.display_name,
                    l.actor.initiative
                );
                if let (Some(hp), Some(max)) = (l.actor.hp, l.actor.max_hp) {
                    line.push_str(&format!(" HP {hp}/{max}"));
                }
                if let Some(injuries) = &l.actor.injuries {
                    let marked: Vec<&str> = injuries.marked().iter().map(|i| i.label()).collect();
                    if !marked.is_empty() {
                        line.push_str(&format!(" | Injuries: {}", marked.join(", ")));
                    }
                }
                if let Some(special) = &l.actor.special {
                    line.push_str(&format!(" | {special}"));
                }
                if !l.actor.note.is_empty() {
                    line.push_str(&format!(" | {}", l.actor.note));
                }
                line
            })
            .collect();
        lines.join("\n")
    }

    fn resolve(&self, who: &str) -> EncounterResult<Uuid> {
        self.tracker
            .resolve(who)
            .ok_or_else(|| EncounterError::UnknownActor(who.to_string()))
    }

    fn name_of(&self, id: Uuid) -> String {
        self.tracker.display_name(id).unwrap_or_default().to_string()
    }

    fn do_add(&mut self, rest: &str) -> EncounterResult<String> {
        let mut words = Vec::new();
        let mut max_hp = None;
        let mut injuries = false;
        let mut special = None;

        for token in rest.split_whitespace() {
            if let Some(v) = token.strip_prefix("hp=") {
                max_hp = Some(
                    v.parse::<u32>()
                        .map_err(|_| EncounterError::InvalidHp(v.to_string()))?,
                );
            } else if let Some(v) = token.strip_prefix("special=") {
                special = Some(parse_special(v)?);
            } else if token.eq_ignore_ascii_case("injuries") {
                injuries = true;
            } else {
                words.push(token);
            }
        }

        let Some(last) = words.pop() else {
            return Err(EncounterError::InvalidChoice(
                "usage: add <name> <initiative> [hp=N] [injuries] [special=S,P,E,C,I,A,L]"
                    .to_string(),
            ));
        };
        let initiative = last
            .parse::<i32>()
            .map_err(|_| EncounterError::InvalidInitiative(last.to_string()))?;
        if words.is_empty() {
            return Err(EncounterError::InvalidChoice("an actor needs a name".to_string()));
        }

        let mut actor = Actor::new(words.join(" "), initiative);
        if let Some(max) = max_hp {
            actor = actor.with_hp(max);
        }
        if injuries {
            actor = actor.with_injuries();
        }
        if let Some(special) = special {
            actor = actor.with_special(special);
        }

        let id = self.add_actor(actor)?;
        Ok(format!("Added {} at initiative {initiative}.", self.name_of(id)))
    }

    fn do_turn(&mut self, forward: bool) -> EncounterResult<String> {
        let id = if forward { self.next_turn()? } else { self.previous_turn()? };
        match id {
            Some(id) => Ok(format!("Current turn: {}", self.name_of(id))),
            None => Ok("No actors.".to_string()),
        }
    }

    fn do_remove(&mut self, rest: &str) -> EncounterResult<String> {
        let id = self.resolve(rest)?;
        let name = self.name_of(id);
        self.remove_actor(id)?;
        Ok(format!("Removed {name}."))
    }

    fn do_note(&mut self, rest: &str) -> EncounterResult<String> {
        let (who, note) = rest.split_once(' ').unwrap_or((rest, ""));
        let id = self.resolve(who)?;
        let note = note.trim().to_string();
        let cleared = note.is_empty();
        self.update(|t| t.set_note(id, note))?;
        let name = self.name_of(id);
        Ok(if cleared {
            format!("Cleared note for {name}.")
        } else {
            format!("Noted {name}.")
        })
    }

    fn do_hp(&mut self, rest: &str) -> EncounterResult<String> {
        let (who, amount) = rest
            .split_once(' ')
            .ok_or_else(|| EncounterError::InvalidChoice("usage: hp <who> <n|+n|-n>".to_string()))?;
        let id = self.resolve(who)?;
        let amount = amount.trim();

        let hp = if amount.starts_with('+') || amount.starts_with('-') {
            let delta = amount
                .parse::<i64>()
                .map_err(|_| EncounterError::InvalidHp(amount.to_string()))?;
            self.update(|t| t.adjust_hp(id, delta))?
        } else {
            let value = amount
                .parse::<u32>()
                .map_err(|_| EncounterError::InvalidHp(amount.to_string()))?;
            self.update(|t| t.set_hp(id, value))?
        };

        let name = self.name_of(id);
        let hp = hp.ok_or_else(|| EncounterError::NoHitPoints(name.clone()))?;
        let max = self.tracker.get(id).and_then(|a| a.max_hp).unwrap_or(hp);
        Ok(format!("{name} HP {hp}/{max}"))
    }

    fn do_injure(&mut self, rest: &str) -> EncounterResult<String> {
        let (who, location) = rest.split_once(' ').ok_or_else(|| {
            EncounterError::InvalidChoice("usage: injure <who> <location>".to_string())
        })?;
        let id = self.resolve(who)?;
        let injury =
            Injury::parse(location).ok_or_else(|| EncounterError::UnknownInjury(location.to_string()))?;

        let state = self.update(|t| t.toggle_injury(id, injury))?;
        let name = self.name_of(id);
        match state {
            Some(true) => Ok(format!("{name}: {injury} injured.")),
            Some(false) => Ok(format!("{name}: {injury} healed.")),
            None => Err(EncounterError::NoInjuries(name)),
        }
    }

    fn do_init(&mut self, rest: &str) -> EncounterResult<String> {
        let (who, value) = rest.split_once(' ').ok_or_else(|| {
            EncounterError::InvalidChoice("usage: init <who> <initiative>".to_string())
        })?;
        let id = self.resolve(who)?;
        let value = value.trim();
        let initiative = value
            .parse::<i32>()
            .map_err(|_| EncounterError::InvalidInitiative(value.to_string()))?;
        self.edit_actor(id, |a| a.initiative = initiative)?;
        Ok(format!("{} now at initiative {initiative}.", self.name_of(id)))
    }
}

fn parse_special(s: &str) -> EncounterResult<Special> {
    let invalid = || EncounterError::InvalidChoice(format!("special needs seven numbers: {s}"));
    let values: Vec<u8> = s
        .split(',')
        .map(|v| v.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|_| invalid())?;
    let values: [u8; 7] = values.try_into().map_err(|_| invalid())?;
    Ok(Special::from_array(values))
}

fn help_text() -> String {
    "\
Encounter Commands:
  add <name> <initiative> [hp=N] [injuries] [special=S,P,E,C,I,A,L]
  list                          Show actors in initiative order
  next / prev                   Pass the turn
  remove <who>                  Remove an actor
  note <who> [text]             Set or clear a note
  hp <who> <n|+n|-n>            Set or change hit points
  injure <who> <location>       Toggle an injury (head, left arm, ...)
  init <who> <n>                Change initiative
  reset                         Clear the encounter
  help                          Show this help
  quit                          Exit

<who> is a list position or a name without spaces, e.g. raider#2."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_core::MemoryStore;

    fn session() -> EncounterSession<MemoryStore> {
        EncounterSession::open(MemoryStore::new())
    }

    #[test]
    fn add_persists_actors() {
        let mut s = session();
        s.process("add Sole Survivor 12 hp=10 injuries").unwrap();
        s.process("add Raider 9").unwrap();

        let raw = s.store().get(ACTORS_KEY).unwrap();
        let actors: Vec<Actor> = serde_json::from_str(&raw).unwrap();
        assert_eq!(actors.len(), 2);
        assert_eq!(actors[0].name, "Sole Survivor");
        assert_eq!(actors[0].max_hp, Some(10));
        assert!(actors[0].injuries.is_some());
        assert!(s.store().get(CURRENT_KEY).is_none());
    }

    #[test]
    fn reopen_restores_order_and_turn() {
        let mut s = session();
        s.process("add A 3").unwrap();
        s.process("add B 2").unwrap();
        s.process("next").unwrap();

        let reopened = EncounterSession::open(s.into_store());
        let current = reopened.tracker().current().map(|a| a.name.clone());
        assert_eq!(current.as_deref(), Some("B"));
        assert_eq!(reopened.tracker().len(), 2);
    }

    #[test]
    fn malformed_state_is_discarded() {
        let mut store = MemoryStore::new();
        store.set(ACTORS_KEY, "[{\"nope\":").unwrap();
        store.set(CURRENT_KEY, "not-a-uuid").unwrap();
        let s = EncounterSession::open(store);
        assert!(s.tracker().is_empty());
        assert!(s.tracker().current().is_none());
    }

    #[test]
    fn null_actors_read_as_empty() {
        let mut store = MemoryStore::new();
        store.set(ACTORS_KEY, "null").unwrap();
        assert!(EncounterSession::open(store).tracker().is_empty());
    }

    #[test]
    fn list_marks_current_and_numbers_names() {
        let mut s = session();
        s.process("add Raider 5 hp=8 injuries").unwrap();
        s.process("add Raider 14").unwrap();
        s.process("add Dogmeat 9").unwrap();
        s.process("hp 3 -3").unwrap();
        s.process("injure 3 left arm").unwrap();
        s.process("note 2 good boy").unwrap();

        assert_eq!(
            s.process("list").unwrap(),
            "> 1. Raider #2 [14]\n  2. Dogmeat [9] | good boy\n  3. Raider #1 [5] HP 5/8 | Injuries: Left Arm"
        );
    }

    #[test]
    fn turns_wrap() {
        let mut s = session();
        s.process("add A 3").unwrap();
        s.process("add B 2").unwrap();
        assert_eq!(s.process("next").unwrap(), "Current turn: B");
        assert_eq!(s.process("next").unwrap(), "Current turn: A");
        assert_eq!(s.process("prev").unwrap(), "Current turn: B");
    }

    #[test]
    fn remove_by_name() {
        let mut s = session();
        s.process("add Raider 5").unwrap();
        s.process("add Raider 14").unwrap();
        assert_eq!(s.process("remove raider#1").unwrap(), "Removed Raider #1.");
        assert_eq!(s.process("list").unwrap(), "> 1. Raider [14]");
    }

    #[test]
    fn hp_and_injury_errors() {
        let mut s = session();
        s.process("add Dog 5").unwrap();
        assert!(matches!(
            s.process("hp 1 4"),
            Err(EncounterError::NoHitPoints(_))
        ));
        assert!(matches!(
            s.process("injure 1 head"),
            Err(EncounterError::NoInjuries(_))
        ));
        assert!(matches!(
            s.process("injure 1 tail"),
            Err(EncounterError::UnknownInjury(_))
        ));
        assert!(matches!(
            s.process("hp 9 4"),
            Err(EncounterError::UnknownActor(_))
        ));
    }

    #[test]
    fn hp_is_clamped() {
        let mut s = session();
        s.process("add Ghoul 5 hp=6").unwrap();
        assert_eq!(s.process("hp 1 20").unwrap(), "Ghoul HP 6/6");
        assert_eq!(s.process("hp 1 -10").unwrap(), "Ghoul HP 0/6");
        assert_eq!(s.process("hp 1 +2").unwrap(), "Ghoul HP 2/6");
        assert_eq!(
            s.process("hp 1 +9223372036854775807").unwrap(),
            "Ghoul HP 6/6"
        );
        assert_eq!(
            s.process("hp 1 -9223372036854775808").unwrap(),
            "Ghoul HP 0/6"
        );
    }

    #[test]
    fn add_validation() {
        let mut s = session();
        assert!(matches!(
            s.process("add Raider fast"),
            Err(EncounterError::InvalidInitiative(_))
        ));
        assert!(matches!(
            s.process("add 12"),
            Err(EncounterError::InvalidChoice(_))
        ));
        assert!(matches!(
            s.process("add"),
            Err(EncounterError::InvalidChoice(_))
        ));
        assert!(matches!(
            s.process("add Brute 4 special=1,2,3"),
            Err(EncounterError::InvalidChoice(_))
        ));
    }

    #[test]
    fn special_is_listed() {
        let mut s = session();
        s.process("add Super Mutant 7 special=9,5,8,3,4,5,4").unwrap();
        assert_eq!(
            s.process("list").unwrap(),
            "> 1. Super Mutant [7] | S 9 P 5 E 8 C 3 I 4 A 5 L 4"
        );
    }

    #[test]
    fn init_reorders() {
        let mut s = session();
        s.process("add A 3").unwrap();
        s.process("add B 2").unwrap();
        s.process("init b 10").unwrap();
        assert_eq!(s.process("list").unwrap(), "> 1. B [10]\n  2. A [3]");
    }

    #[test]
    fn reset_removes_keys() {
        let mut s = session();
        s.process("add A 3").unwrap();
        s.process("next").unwrap();
        assert_eq!(s.process("reset").unwrap(), "Encounter reset.");
        assert!(s.store().is_empty());
        assert_eq!(s.process("list").unwrap(), "No actors.");
    }

    #[test]
    fn unknown_command() {
        let mut s = session();
        assert!(matches!(
            s.process("fight"),
            Err(EncounterError::UnknownCommand(_))
        ));
        assert!(s.process("help").unwrap().contains("Encounter Commands"));
    }
}
