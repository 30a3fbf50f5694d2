use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Stable identifier for a class of hostile actor (its discovered type name).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorCategory(Arc<str>);

impl ActorCategory {
    pub fn new(type_name: &str) -> Self {
        Self(Arc::from(type_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorCategory {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Well-known actors whose in-game name differs from their type name.
const NAME_OVERRIDES: &[(&str, &str)] = &[
    ("BaboonBirdAI", "Baboon Hawk"),
    ("ClaySurgeonAI", "Barber"),
    ("FlowermanAI", "Bracken"),
    ("SandSpiderAI", "Bunker Spider"),
    ("ButlerEnemyAI", "Butler"),
    ("ButlerBeesEnemyAI", "Butler Bees"),
    ("SpringManAI", "Coil-Head"),
    ("RedLocustBees", "Circuit Bees"),
    ("SandWormAI", "Earth Leviathan"),
    ("MouthDogAI", "Eyeless Dog"),
    ("ForestGiantAI", "Forest Keeper"),
    ("DressGirlAI", "Ghost Girl"),
    ("HoarderBugAI", "Hoarding Bug"),
    ("BlobAI", "Hydrogere"),
    ("JesterAI", "Jester"),
    ("BushWolfEnemy", "Kidnapper Fox"),
    ("DoublewingAI", "Manticoil"),
    ("MaskedPlayerEnemy", "Masked"),
    ("NutcrackerEnemyAI", "Nutcracker"),
    ("RadMechAI", "Old Bird"),
    ("DocileLocustBeesAI", "Roaming Locusts"),
    ("CentipedeAI", "Snare Flea"),
    ("PufferAI", "Spore Lizard"),
    ("CrawlerAI", "Thumper"),
    ("FlowerSnakeEnemy", "Tulip Snake"),
];

/// Categories that stay silent unless explicitly enabled.
const DISABLED_BY_DEFAULT: &[&str] = &["DoublewingAI", "DocileLocustBeesAI"];

/// Human-readable name used as the configuration key for a type name.
///
/// Known actors use a fixed table; anything else has its `AI` and `Enemy`
/// fragments stripped and camel case split into words.
pub fn display_name(type_name: &str) -> String {
    if let Some((_, name)) = NAME_OVERRIDES.iter().find(|(t, _)| *t == type_name) {
        return (*name).to_string();
    }

    let cleaned = type_name.replace("AI", "").replace("Enemy", "");
    if cleaned.is_empty() {
        return type_name.to_string();
    }

    let mut out = String::with_capacity(cleaned.len() + 4);
    for (i, c) in cleaned.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

pub fn default_enabled(type_name: &str) -> bool {
    !DISABLED_BY_DEFAULT.contains(&type_name)
}

#[derive(Clone, Debug, PartialEq)]
pub struct RosterEntry {
    pub category: ActorCategory,
    pub display_name: String,
    pub default_enabled: bool,
}

/// The set of actor categories known for this process. Built once at
/// startup and never modified afterwards.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    index: HashMap<ActorCategory, usize>,
}

impl Roster {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a roster from discovered type names. Blank names and duplicates
    /// are dropped; discovery order is kept.
    pub fn from_type_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Self::default();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let category = ActorCategory::new(name);
            if roster.index.contains_key(&category) {
                continue;
            }
            roster.index.insert(category.clone(), roster.entries.len());
            roster.entries.push(RosterEntry {
                display_name: display_name(name),
                default_enabled: default_enabled(name),
                category,
            });
        }
        roster
    }

    pub fn get(&self, category: &ActorCategory) -> Option<&RosterEntry> {
        self.index.get(category).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, category: &ActorCategory) -> bool {
        self.index.contains_key(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
