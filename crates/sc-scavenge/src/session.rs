//! Scavenging wizard session.
//!
//! `ScavengeSession` walks a location through four steps: choose and
//! calculate the location, spend the item reduction budget, roll the
//! location level, and review the results. Every change is written to the
//! injected key-value store, and a session reopened on the same store picks
//! up where the last one stopped.

use serde::Serialize;
use serde::de::DeserializeOwned;

use sc_core::{KeyValueStore, sentence_case};
use sc_mechanics::Roller;

use crate::config::ScavengeConfig;
use crate::error::{ScavengeError, ScavengeResult};
use crate::items::{Adjustment, ItemTracker};
use crate::keys::StorageKey;
use crate::level::{MAX_PC_LEVEL, calculate_location_level};
use crate::location::{CalculatedLocation, ItemCategory, Items, calculate_location};
use crate::markdown::render_items_table;
use crate::tables::{DegreeOfSearch, LocationCategory, LocationScale};

/// A step of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    /// Choose and calculate the location.
    Location,
    /// Spend the item reduction budget.
    Items,
    /// Roll the location level.
    Level,
    /// Review the finished location.
    Results,
}

impl WizardStep {
    /// All steps in order.
    pub fn all() -> &'static [Self] {
        &[Self::Location, Self::Items, Self::Level, Self::Results]
    }

    /// Parse a step from its stored name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "location" => Some(Self::Location),
            "items" => Some(Self::Items),
            "level" => Some(Self::Level),
            "results" => Some(Self::Results),
            _ => None,
        }
    }

    /// The stored name of this step.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Items => "items",
            Self::Level => "level",
            Self::Results => "results",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An interactive scavenging wizard over a key-value store.
pub struct ScavengeSession<S: KeyValueStore> {
    store: S,
    roller: Box<dyn Roller>,
    step: WizardStep,
    scale: Option<LocationScale>,
    category: Option<LocationCategory>,
    degree: Option<DegreeOfSearch>,
    location: Option<CalculatedLocation>,
    tracker: Option<ItemTracker>,
    pc_level: Option<u32>,
    has_problem: bool,
    level: Option<u32>,
}

impl<S: KeyValueStore> ScavengeSession<S> {
    /// Open a session, restoring whatever `store` already holds.
    ///
    /// Missing or malformed entries are treated as not yet computed.
    pub fn open(store: S, config: ScavengeConfig) -> Self {
        let scale = read_parsed(&store, StorageKey::Scale, LocationScale::parse);
        let category = read_parsed(&store, StorageKey::Category, LocationCategory::parse);
        let degree = read_parsed(&store, StorageKey::Degree, DegreeOfSearch::parse);
        let location: Option<CalculatedLocation> = read_json(&store, StorageKey::Location);
        let tracker = location.as_ref().map(|loc| restore_tracker(&store, loc));
        let pc_level = read_parsed(&store, StorageKey::PcLevel, parse_pc_level);
        let has_problem = store
            .get(StorageKey::Problem.as_str())
            .is_some_and(|v| parse_flag(&v).unwrap_or(false));
        let level = read_parsed(&store, StorageKey::Level, |v| v.trim().parse::<u32>().ok());

        let mut session = Self {
            store,
            roller: Box::new(config.rng()),
            step: WizardStep::Location,
            scale,
            category,
            degree,
            location,
            tracker,
            pc_level,
            has_problem,
            level,
        };

        let stored = read_parsed(&session.store, StorageKey::Step, WizardStep::parse);
        session.step = match stored {
            Some(step) if session.can_enter(step) => step,
            _ => session.derived_step(),
        };
        tracing::debug!("opened scavenging session at the {} step", session.step);
        session
    }

    /// Replace the dice source, e.g. with a scripted roller.
    pub fn with_roller(mut self, roller: impl Roller + 'static) -> Self {
        self.roller = Box::new(roller);
        self
    }

    /// The step the session is on.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// The selected scale.
    pub fn scale(&self) -> Option<LocationScale> {
        self.scale
    }

    /// The selected category.
    pub fn category(&self) -> Option<LocationCategory> {
        self.category
    }

    /// The selected degree of search.
    pub fn degree(&self) -> Option<DegreeOfSearch> {
        self.degree
    }

    /// The calculated location.
    pub fn location(&self) -> Option<&CalculatedLocation> {
        self.location.as_ref()
    }

    /// The item tracker for the calculated location.
    pub fn tracker(&self) -> Option<&ItemTracker> {
        self.tracker.as_ref()
    }

    /// The entered player-character level.
    pub fn pc_level(&self) -> Option<u32> {
        self.pc_level
    }

    /// Whether the location has a problem.
    pub fn has_problem(&self) -> bool {
        self.has_problem
    }

    /// The calculated location level.
    pub fn level(&self) -> Option<u32> {
        self.level
    }

    /// The markdown table of the current adjusted items.
    pub fn markdown(&self) -> Option<String> {
        self.tracker.as_ref().map(|t| render_items_table(t.items()))
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the session, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Whether `step` can be entered with the current state.
    pub fn can_enter(&self, step: WizardStep) -> bool {
        let complete = self.tracker.as_ref().is_some_and(ItemTracker::is_complete);
        match step {
            WizardStep::Location => true,
            WizardStep::Items => self.location.is_some(),
            WizardStep::Level => complete,
            WizardStep::Results => complete && self.level.is_some(),
        }
    }

    fn derived_step(&self) -> WizardStep {
        match (&self.tracker, self.level) {
            (None, _) => WizardStep::Location,
            (Some(t), _) if !t.is_complete() => WizardStep::Items,
            (Some(_), None) => WizardStep::Level,
            (Some(_), Some(_)) => WizardStep::Results,
        }
    }

    /// Move to `step` if it is reachable.
    pub fn goto(&mut self, step: WizardStep) -> ScavengeResult<()> {
        if !self.can_enter(step) {
            return Err(ScavengeError::StepLocked(step));
        }
        self.set_step(step)
    }

    fn set_step(&mut self, step: WizardStep) -> ScavengeResult<()> {
        self.step = step;
        self.put(StorageKey::Step, step.as_str())
    }

    /// Choose the location scale.
    pub fn select_scale(&mut self, scale: LocationScale) -> ScavengeResult<()> {
        self.scale = Some(scale);
        self.put(StorageKey::Scale, scale.key())
    }

    /// Choose the location category.
    pub fn select_category(&mut self, category: LocationCategory) -> ScavengeResult<()> {
        self.category = Some(category);
        self.put(StorageKey::Category, category.key())
    }

    /// Choose the degree of search.
    pub fn select_degree(&mut self, degree: DegreeOfSearch) -> ScavengeResult<()> {
        self.degree = Some(degree);
        self.put(StorageKey::Degree, degree.key())
    }

    /// Calculate a new location from the current selections.
    ///
    /// Replaces any previous location, adjustments and level, and moves to
    /// the items step.
    pub fn calculate_location(&mut self) -> ScavengeResult<&CalculatedLocation> {
        let scale = self.scale.ok_or(ScavengeError::MissingSelection("scale"))?;
        let category = self
            .category
            .ok_or(ScavengeError::MissingSelection("category"))?;
        let degree = self.degree.ok_or(ScavengeError::MissingSelection("degree"))?;

        let location = calculate_location(scale, category, degree, &mut self.roller);
        let tracker = ItemTracker::new(&location);

        self.put_json(StorageKey::Location, &location)?;
        self.location = Some(location);
        self.tracker = Some(tracker);
        self.level = None;
        self.step = WizardStep::Items;

        self.persist_all()?;
        self.location.as_ref().ok_or(ScavengeError::NoLocation)
    }

    /// Write the tracker, level and step as currently held in memory.
    fn persist_all(&mut self) -> ScavengeResult<()> {
        if let Some(tracker) = self.tracker.take() {
            let persisted = self.persist_tracker(&tracker);
            self.tracker = Some(tracker);
            persisted?;
        }
        match self.level {
            Some(level) => self.put(StorageKey::Level, &level.to_string())?,
            None => self.store.remove(StorageKey::Level.as_str())?,
        }
        self.put(StorageKey::Step, self.step.as_str())
    }

    /// Spend one reduction on `category`.
    pub fn reduce_item(&mut self, category: &ItemCategory) -> ScavengeResult<Adjustment> {
        self.adjust(category, ItemTracker::reduce)
    }

    /// Give back one reduction on `category`.
    pub fn increase_item(&mut self, category: &ItemCategory) -> ScavengeResult<Adjustment> {
        self.adjust(category, ItemTracker::increase)
    }

    fn adjust(
        &mut self,
        category: &ItemCategory,
        op: fn(&mut ItemTracker, &ItemCategory) -> Adjustment,
    ) -> ScavengeResult<Adjustment> {
        let tracker = self.tracker.as_mut().ok_or(ScavengeError::NoLocation)?;
        let outcome = op(tracker, category);
        if !outcome.is_applied() {
            return Ok(outcome);
        }

        self.step = WizardStep::Items;
        self.persist_all()?;
        Ok(outcome)
    }

    /// Leave the items step once the budget is spent.
    pub fn proceed_to_level(&mut self) -> ScavengeResult<()> {
        let tracker = self.tracker.as_ref().ok_or(ScavengeError::NoLocation)?;
        if !tracker.is_complete() {
            return Err(ScavengeError::ItemsRemaining(tracker.remaining()));
        }
        self.set_step(WizardStep::Level)
    }

    /// Enter the player characters' level.
    pub fn set_pc_level(&mut self, pc_level: u32) -> ScavengeResult<()> {
        if !(1..=MAX_PC_LEVEL).contains(&pc_level) {
            return Err(ScavengeError::InvalidPcLevel(pc_level.to_string()));
        }
        self.pc_level = Some(pc_level);
        self.put(StorageKey::PcLevel, &pc_level.to_string())
    }

    /// Mark whether the location has a problem.
    pub fn set_has_problem(&mut self, has_problem: bool) -> ScavengeResult<()> {
        self.has_problem = has_problem;
        self.put(StorageKey::Problem, if has_problem { "true" } else { "false" })
    }

    /// Roll the location level and move to the results step.
    pub fn calculate_level(&mut self) -> ScavengeResult<u32> {
        let tracker = self.tracker.as_ref().ok_or(ScavengeError::NoLocation)?;
        if !tracker.is_complete() {
            return Err(ScavengeError::ItemsRemaining(tracker.remaining()));
        }
        let pc_level = self.pc_level.ok_or(ScavengeError::NoPcLevel)?;

        let level = calculate_location_level(pc_level, self.has_problem, &mut self.roller);
        self.level = Some(level);
        self.put(StorageKey::Level, &level.to_string())?;
        self.set_step(WizardStep::Results)?;
        Ok(level)
    }

    /// Forget everything and return to the location step.
    pub fn reset(&mut self) -> ScavengeResult<()> {
        for key in StorageKey::ALL {
            self.store.remove(key.as_str())?;
        }
        self.step = WizardStep::Location;
        self.scale = None;
        self.category = None;
        self.degree = None;
        self.location = None;
        self.tracker = None;
        self.pc_level = None;
        self.has_problem = false;
        self.level = None;
        tracing::debug!("scavenging session reset");
        Ok(())
    }

    fn persist_tracker(&mut self, tracker: &ItemTracker) -> ScavengeResult<()> {
        self.put_json(StorageKey::Items, tracker.items())?;
        self.put(StorageKey::Reductions, &tracker.remaining().to_string())?;
        self.put(StorageKey::ItemsMarkdown, &render_items_table(tracker.items()))
    }

    fn put(&mut self, key: StorageKey, value: &str) -> ScavengeResult<()> {
        self.store.set(key.as_str(), value)?;
        Ok(())
    }

    fn put_json<T: Serialize + ?Sized>(&mut self, key: StorageKey, value: &T) -> ScavengeResult<()> {
        let json = serde_json::to_string(value).map_err(sc_core::StoreError::from)?;
        self.put(key, &json)
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> ScavengeResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "scale" => self.do_scale(rest),
            "category" => self.do_category(rest),
            "degree" => self.do_degree(rest),
            "calculate" | "calc" => self.do_calculate(),
            "items" => self.do_items(),
            "reduce" | "-" => self.do_adjust(rest, true),
            "increase" | "+" => self.do_adjust(rest, false),
            "next" | "continue" => self.do_next(),
            "pc" => self.do_pc(rest),
            "problem" => self.do_problem(rest),
            "level" => self.do_level(rest),
            "results" => self.do_results(),
            "markdown" | "md" => self.do_markdown(),
            "goto" => self.do_goto(rest),
            "status" => Ok(self.status()),
            "reset" => {
                self.reset()?;
                Ok("Session reset.".to_string())
            }
            "help" => Ok(help_text(rest)),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            _ => Err(ScavengeError::UnknownCommand(cmd)),
        }
    }

    fn do_scale(&mut self, rest: &str) -> ScavengeResult<String> {
        let scale =
            LocationScale::parse(rest).ok_or_else(|| ScavengeError::InvalidScale(rest.to_string()))?;
        self.select_scale(scale)?;
        Ok(format!("Location scale: {}", scale.label()))
    }

    fn do_category(&mut self, rest: &str) -> ScavengeResult<String> {
        let category = LocationCategory::parse(rest)
            .ok_or_else(|| ScavengeError::InvalidCategory(rest.to_string()))?;
        self.select_category(category)?;
        Ok(format!("Location category: {}", category.label()))
    }

    fn do_degree(&mut self, rest: &str) -> ScavengeResult<String> {
        let degree =
            DegreeOfSearch::parse(rest).ok_or_else(|| ScavengeError::InvalidDegree(rest.to_string()))?;
        self.select_degree(degree)?;
        Ok(format!("Degree of search: {}", sentence_case(degree.key())))
    }

    fn do_calculate(&mut self) -> ScavengeResult<String> {
        let location = self.calculate_location()?;
        let mut out = format!(
            "{} {} location, {} (difficulty {})\nItems to reduce: {}\n\n",
            sentence_case(location.scale.key()),
            location.category.key(),
            sentence_case(location.degree_of_search.key()).to_lowercase(),
            location.difficulty(),
            location.reduction_budget(),
        );
        out.push_str(&render_items_table(&location.items));
        Ok(out.trim_end().to_string())
    }

    fn do_items(&self) -> ScavengeResult<String> {
        let tracker = self.tracker.as_ref().ok_or(ScavengeError::NoLocation)?;
        let mut out = format!("Items to reduce: {}\n\n", tracker.remaining());
        out.push_str(&render_items_table(tracker.items()));
        Ok(out.trim_end().to_string())
    }

    fn do_adjust(&mut self, rest: &str, reduce: bool) -> ScavengeResult<String> {
        if rest.is_empty() {
            let usage = if reduce {
                "usage: reduce <item category>"
            } else {
                "usage: increase <item category>"
            };
            return Err(ScavengeError::InvalidChoice(usage.to_string()));
        }
        let category = self.resolve_category(rest);
        let outcome = if reduce {
            self.reduce_item(&category)?
        } else {
            self.increase_item(&category)?
        };
        let remaining = self.tracker.as_ref().map_or(0, ItemTracker::remaining);
        let verb = if reduce { "reduce" } else { "increase" };
        Ok(match outcome {
            Adjustment::Applied(bound) => {
                let range = self
                    .tracker
                    .as_ref()
                    .and_then(|t| t.item(&category))
                    .unwrap_or_default();
                format!(
                    "{} {bound} {}d: {}-{} ({remaining} left to reduce)",
                    category.display_name(),
                    verb.trim_end_matches('e'),
                    range.min,
                    range.max,
                )
            }
            Adjustment::Declined(why) => {
                format!("Cannot {verb} {}: {why}", category.display_name())
            }
        })
    }

    /// Match user input against known category names, case-insensitively.
    fn resolve_category(&self, input: &str) -> ItemCategory {
        let wanted = input.trim().to_lowercase().replace(' ', "");
        self.tracker
            .as_ref()
            .and_then(|t| {
                t.items()
                    .keys()
                    .find(|k| k.as_str().to_lowercase() == wanted)
                    .cloned()
            })
            .unwrap_or_else(|| ItemCategory::new(wanted))
    }

    fn do_next(&mut self) -> ScavengeResult<String> {
        self.proceed_to_level()?;
        Ok("All items reduced. Enter the player characters' level and roll the location level."
            .to_string())
    }

    fn do_pc(&mut self, rest: &str) -> ScavengeResult<String> {
        let pc_level =
            parse_pc_level(rest).ok_or_else(|| ScavengeError::InvalidPcLevel(rest.to_string()))?;
        self.set_pc_level(pc_level)?;
        Ok(format!("Player characters' level: {pc_level}"))
    }

    fn do_problem(&mut self, rest: &str) -> ScavengeResult<String> {
        let has_problem = if rest.is_empty() {
            true
        } else {
            parse_flag(rest).ok_or_else(|| {
                ScavengeError::InvalidChoice("usage: problem [yes|no]".to_string())
            })?
        };
        self.set_has_problem(has_problem)?;
        Ok(if has_problem {
            "The location has a problem (obstacle, hazard, or inhabitants).".to_string()
        } else {
            "The location has no problems.".to_string()
        })
    }

    fn do_level(&mut self, rest: &str) -> ScavengeResult<String> {
        if !rest.is_empty() {
            self.do_pc(rest)?;
        }
        let level = self.calculate_level()?;
        Ok(format!("Location level: {level}"))
    }

    fn do_results(&self) -> ScavengeResult<String> {
        if !self.can_enter(WizardStep::Results) {
            return Err(ScavengeError::StepLocked(WizardStep::Results));
        }
        Ok(self.results_summary().unwrap_or_default())
    }

    /// The finished location summary, once the results step is reachable.
    pub fn results_summary(&self) -> Option<String> {
        if !self.can_enter(WizardStep::Results) {
            return None;
        }
        let location = self.location.as_ref()?;
        let tracker = self.tracker.as_ref()?;
        let level = self.level?;

        let mut out = format!(
            "Location Scale: {}\nLocation Category: {}\nDegree of Search: {} (difficulty {})\nLocation Level: {level}\n\n",
            sentence_case(location.scale.key()),
            sentence_case(location.category.key()),
            sentence_case(location.degree_of_search.key()),
            location.difficulty(),
        );
        out.push_str(&render_items_table(tracker.items()));
        Some(out.trim_end().to_string())
    }

    fn do_markdown(&self) -> ScavengeResult<String> {
        self.markdown()
            .map(|md| md.trim_end().to_string())
            .ok_or(ScavengeError::NoLocation)
    }

    fn do_goto(&mut self, rest: &str) -> ScavengeResult<String> {
        let step = WizardStep::parse(rest).ok_or_else(|| ScavengeError::UnknownStep(rest.to_string()))?;
        self.goto(step)?;
        Ok(format!("Step: {}", step.as_str().to_uppercase()))
    }

    /// One-line-per-field overview of the session.
    pub fn status(&self) -> String {
        let selection = |v: Option<&'static str>| v.map(sentence_case).unwrap_or_else(|| "-".to_string());

        let mut out = format!("Step: {}\n", self.step.as_str().to_uppercase());
        let tabs: Vec<String> = WizardStep::all()
            .iter()
            .map(|&s| {
                let name = s.as_str().to_uppercase();
                if s == self.step {
                    format!("[{name}]")
                } else if self.can_enter(s) {
                    name
                } else {
                    format!("({name})")
                }
            })
            .collect();
        out.push_str(&format!("Steps: {}\n", tabs.join(" ")));
        out.push_str(&format!(
            "Selection: {} / {} / {}\n",
            selection(self.scale.map(LocationScale::key)),
            selection(self.category.map(LocationCategory::key)),
            selection(self.degree.map(DegreeOfSearch::key)),
        ));
        match &self.tracker {
            Some(t) => out.push_str(&format!(
                "Items to reduce: {} of {} ({} made)\n",
                t.remaining(),
                t.budget(),
                t.spent()
            )),
            None => out.push_str("No location calculated.\n"),
        }
        out.push_str(&format!(
            "Player level: {} | Problem: {}\n",
            self.pc_level.map_or_else(|| "-".to_string(), |l| l.to_string()),
            if self.has_problem { "yes" } else { "no" },
        ));
        out.push_str(&format!(
            "Location level: {}",
            self.level.map_or_else(|| "-".to_string(), |l| l.to_string())
        ));
        out
    }
}

fn help_text(topic: &str) -> String {
    match topic.to_lowercase().as_str() {
        "location" => "\
Location Commands:
  scale <tiny|small|average|large>
  category <residential|commercial|industry|medical|agriculture|military>
  degree <untouched|partlySearched|mostlySearched|heavilySearched>
  calculate                     Roll the location's items"
            .to_string(),
        "items" => "\
Item Commands:
  items                         Show items and the reduction budget
  reduce <category>             Lower a minimum (or a maximum once the minimum is 0)
  increase <category>           Undo a reduction
  next                          Continue once every reduction is made"
            .to_string(),
        "level" => "\
Level Commands:
  pc <n>                        Player characters' level
  problem [yes|no]              Obstacle, hazard, or inhabitants present
  level [n]                     Roll the location level"
            .to_string(),
        _ => "\
Scavenging Commands:
  scale|category|degree <value> Choose the location
  calculate                     Calculate the location
  items                         Show item ranges
  reduce|increase <category>    Adjust item ranges
  next                          Continue to the level step
  pc <n>                        Set player characters' level
  problem [yes|no]              Set whether the location has a problem
  level [n]                     Roll the location level
  results                       Show the finished location
  markdown                      Show the items as a markdown table
  goto <step>                   Switch step (location, items, level, results)
  status                        Show session status
  reset                         Start over
  help [topic]                  Show help (location, items, level)
  quit                          Exit"
            .to_string(),
    }
}

fn parse_pc_level(s: &str) -> Option<u32> {
    s.trim()
        .parse::<u32>()
        .ok()
        .filter(|l| (1..=MAX_PC_LEVEL).contains(l))
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Read and parse a stored value, discarding it if it doesn't parse.
fn read_parsed<S, T>(store: &S, key: StorageKey, parse: impl Fn(&str) -> Option<T>) -> Option<T>
where
    S: KeyValueStore + ?Sized,
{
    let raw = store.get(key.as_str())?;
    if raw.trim() == "null" {
        return None;
    }
    let parsed = parse(&raw);
    if parsed.is_none() {
        tracing::warn!("discarding unreadable {key}: {raw:?}");
    }
    parsed
}

/// Read a stored JSON value. `null` and malformed JSON read as absent.
fn read_json<S, T>(store: &S, key: StorageKey) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = store.get(key.as_str())?;
    match serde_json::from_str::<Option<T>>(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("discarding malformed {key}: {e}");
            None
        }
    }
}

fn restore_tracker<S: KeyValueStore + ?Sized>(store: &S, location: &CalculatedLocation) -> ItemTracker {
    let items: Option<Items> = read_json(store, StorageKey::Items);
    let remaining = read_parsed(store, StorageKey::Reductions, |v| v.trim().parse::<u32>().ok());

    match items.zip(remaining) {
        Some((items, remaining)) => ItemTracker::restore(location, items, remaining).unwrap_or_else(|| {
            tracing::warn!("stored item adjustments don't match the location, starting over");
            ItemTracker::new(location)
        }),
        None => ItemTracker::new(location),
    }
}
