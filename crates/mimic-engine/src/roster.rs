use std::io;
use std::path::PathBuf;

use mimic_core::Roster;

/// Actor type names shipped with the base game.
pub const BUILTIN_ROSTER: &[&str] = &[
    "BaboonBirdAI",
    "BlobAI",
    "BushWolfEnemy",
    "ButlerBeesEnemyAI",
    "ButlerEnemyAI",
    "CentipedeAI",
    "ClaySurgeonAI",
    "CrawlerAI",
    "DocileLocustBeesAI",
    "DoublewingAI",
    "DressGirlAI",
    "FlowermanAI",
    "FlowerSnakeEnemy",
    "ForestGiantAI",
    "HoarderBugAI",
    "JesterAI",
    "MaskedPlayerEnemy",
    "MouthDogAI",
    "NutcrackerEnemyAI",
    "PufferAI",
    "RadMechAI",
    "RedLocustBees",
    "SandSpiderAI",
    "SandWormAI",
    "SpringManAI",
];

/// Where the set of actor type names comes from.
pub trait RosterSource {
    fn discover(&self) -> io::Result<Vec<String>>;
}

/// One type name per line. Blank lines and `#` comments are ignored.
#[derive(Clone, Debug)]
pub struct FileRoster {
    path: PathBuf,
}

impl FileRoster {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RosterSource for FileRoster {
    fn discover(&self) -> io::Result<Vec<String>> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(parse_roster(&content))
    }
}

#[derive(Clone, Debug, Default)]
pub struct StaticRoster(pub Vec<String>);

impl StaticRoster {
    pub fn builtin() -> Self {
        Self(BUILTIN_ROSTER.iter().map(|s| (*s).to_string()).collect())
    }
}

impl RosterSource for StaticRoster {
    fn discover(&self) -> io::Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

fn parse_roster(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the roster once at startup. A failing source leaves an empty
/// roster, so every actor falls through to the modded gates.
pub fn discover_roster(source: &dyn RosterSource) -> Roster {
    match source.discover() {
        Ok(names) => {
            let roster = Roster::from_type_names(names);
            tracing::info!(categories = roster.len(), "actor roster discovered");
            roster
        }
        Err(e) => {
            tracing::warn!("roster discovery failed, using empty roster: {e}");
            Roster::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let names = parse_roster("# vanilla\nJesterAI\n\n  BlobAI  # slime\n#CrawlerAI\n");
        assert_eq!(names, ["JesterAI", "BlobAI"]);
    }

    #[test]
    fn test_file_roster() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roster.txt");
        std::fs::write(&path, "FlowermanAI\nGiantKiwiAI\n").unwrap();

        let roster = discover_roster(&FileRoster::new(&path));
        let names: Vec<_> = roster.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, ["Bracken", "Giant Kiwi"]);
    }

    #[test]
    fn test_missing_file_gives_empty_roster() {
        let dir = tempdir().unwrap();
        let roster = discover_roster(&FileRoster::new(dir.path().join("nope.txt")));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_builtin_roster() {
        let roster = discover_roster(&StaticRoster::builtin());
        assert_eq!(roster.len(), BUILTIN_ROSTER.len());
        assert!(roster.iter().all(|e| !e.display_name.contains("AI")));
    }
}
