use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// A single navigable unit of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub body: String,
}

/// Fixed, ordered collection of panels presented one at a time
#[derive(Debug, Clone, Serialize)]
pub struct Deck {
    pub title: String,
    panels: Vec<Panel>,
}

/// On-disk shape of a TOML deck
#[derive(Debug, Deserialize)]
struct DeckFile {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    panels: Vec<PanelEntry>,
}

#[derive(Debug, Deserialize)]
struct PanelEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: String,
}

impl Deck {
    /// Build a deck; fails when there are no panels or ids repeat
    pub fn new(title: impl Into<String>, panels: Vec<Panel>) -> Result<Self> {
        if panels.is_empty() {
            return Err(Error::EmptyDeck);
        }

        let mut seen = HashSet::new();
        for panel in &panels {
            if !seen.insert(panel.id.as_str()) {
                return Err(Error::DeckParse(format!("duplicate panel id '{}'", panel.id)));
            }
        }

        Ok(Self {
            title: title.into(),
            panels,
        })
    }

    /// Load a deck file: `.toml` decks are structured, anything else is plain
    /// text split on `delimiter` lines
    pub fn load(path: &Path, delimiter: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let fallback_title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("deck")
            .to_string();

        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        debug!(path = %path.display(), is_toml, "loading deck");
        if is_toml {
            Self::from_toml(&content, &fallback_title)
        } else {
            Self::from_text(&content, delimiter, &fallback_title)
        }
    }

    pub fn from_toml(content: &str, fallback_title: &str) -> Result<Self> {
        let file: DeckFile =
            toml::from_str(content).map_err(|e| Error::DeckParse(e.to_string()))?;

        // Author-written ids are reserved first so generated ones step around them
        let mut taken: HashSet<String> = file
            .panels
            .iter()
            .filter_map(|entry| entry.id.clone())
            .collect();

        let panels = file
            .panels
            .into_iter()
            .enumerate()
            .map(|(i, entry)| Panel {
                id: match entry.id {
                    Some(id) => id,
                    None => unique_id(generated_id(i, entry.title.as_deref()), &mut taken),
                },
                title: entry.title,
                body: entry.body,
            })
            .collect();

        Self::new(file.title.unwrap_or_else(|| fallback_title.to_string()), panels)
    }

    pub fn from_text(content: &str, delimiter: &str, title: &str) -> Result<Self> {
        let delimiter = delimiter.trim();
        let mut chunks: Vec<Vec<&str>> = vec![Vec::new()];

        for line in content.lines() {
            if line.trim() == delimiter {
                chunks.push(Vec::new());
            } else if let Some(chunk) = chunks.last_mut() {
                chunk.push(line);
            }
        }

        let mut taken = HashSet::new();
        let panels = chunks
            .into_iter()
            .filter(|lines| lines.iter().any(|l| !l.trim().is_empty()))
            .enumerate()
            .map(|(i, lines)| {
                let mut panel = text_panel(i, &lines);
                panel.id = unique_id(panel.id, &mut taken);
                panel
            })
            .collect();

        Self::new(title, panels)
    }

    /// Deck shown when no file is given
    pub fn welcome() -> Self {
        let panels = vec![
            Panel {
                id: "welcome".to_string(),
                title: Some("pagedeck".to_string()),
                body: "A deck of full-screen panels.\n\nScroll the mouse wheel to move between panels."
                    .to_string(),
            },
            Panel {
                id: "navigate".to_string(),
                title: Some("Navigating".to_string()),
                body: "Wheel up goes back, wheel down goes forward.\n\
                       Click a pagination marker to jump to its panel.\n\
                       Run with --keyboard to use the arrow keys and j/k."
                    .to_string(),
            },
            Panel {
                id: "decks".to_string(),
                title: Some("Your own decks".to_string()),
                body: "Pass .toml decks with [[panels]] tables,\n\
                       or plain text files with panels separated by ---."
                    .to_string(),
            },
        ];
        Self {
            title: "Welcome".to_string(),
            panels,
        }
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn get(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Panel count, never zero by construction
    pub fn size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.panels.len()).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

fn text_panel(index: usize, lines: &[&str]) -> Panel {
    let first = lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(0);
    let heading = lines
        .get(first)
        .and_then(|l| l.trim().strip_prefix("# "))
        .map(|h| h.trim().to_string());

    let body_start = if heading.is_some() { first + 1 } else { first };
    let body = lines[body_start..].join("\n").trim_matches('\n').to_string();

    Panel {
        id: generated_id(index, heading.as_deref()),
        title: heading,
        body,
    }
}

/// Slug of the title, or `section-<n>` (1-based) when there is none
fn generated_id(index: usize, title: Option<&str>) -> String {
    let slug = title.map(slugify).unwrap_or_default();
    if slug.is_empty() {
        format!("section-{}", index + 1)
    } else {
        slug
    }
}

/// `base`, or `base-2`, `base-3`, ... when already taken. Records the result.
fn unique_id(base: String, taken: &mut HashSet<String>) -> String {
    let mut id = base.clone();
    let mut n = 2;
    while taken.contains(&id) {
        id = format!("{}-{}", base, n);
        n += 1;
    }
    taken.insert(id.clone());
    id
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_deck_rejected() {
        assert!(matches!(Deck::new("x", Vec::new()), Err(Error::EmptyDeck)));
        assert!(matches!(
            Deck::from_text("\n---\n  \n", "---", "x"),
            Err(Error::EmptyDeck)
        ));
    }

    #[test]
    fn test_from_text_splits_on_delimiter() {
        let deck = Deck::from_text(
            "# Intro\nhello\n---\nplain body\n---\n# Last One!\nbye\n",
            "---",
            "talk",
        )
        .unwrap();

        assert_eq!(deck.title, "talk");
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.panels()[0].id, "intro");
        assert_eq!(deck.panels()[0].title.as_deref(), Some("Intro"));
        assert_eq!(deck.panels()[0].body, "hello");
        assert_eq!(deck.panels()[1].id, "section-2");
        assert_eq!(deck.panels()[1].title, None);
        assert_eq!(deck.panels()[2].id, "last-one");
    }

    #[test]
    fn test_from_toml() {
        let deck = Deck::from_toml(
            r#"
            title = "Demo"

            [[panels]]
            id = "a"
            body = "first"

            [[panels]]
            title = "Second Panel"
            body = "second"
            "#,
            "fallback",
        )
        .unwrap();

        assert_eq!(deck.title, "Demo");
        assert_eq!(deck.size().get(), 2);
        assert_eq!(deck.get(0).map(|p| p.id.as_str()), Some("a"));
        assert_eq!(deck.get(1).map(|p| p.id.as_str()), Some("second-panel"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Deck::from_toml(
            "[[panels]]\nid = \"a\"\n[[panels]]\nid = \"a\"\n",
            "dup",
        );
        assert!(matches!(result, Err(Error::DeckParse(_))));
    }

    #[test]
    fn test_welcome_deck_is_valid() {
        let deck = Deck::welcome();
        assert!(Deck::new(deck.title.clone(), deck.panels().to_vec()).is_ok());
    }

    #[test]
    fn test_repeated_headings_get_distinct_ids() {
        let deck = Deck::from_text("# Demo\none\n---\n# Demo\ntwo\n---\n# Demo\nthree\n", "---", "talk")
            .unwrap();
        let ids: Vec<_> = deck.panels().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["demo", "demo-2", "demo-3"]);
        assert_eq!(deck.get(1).and_then(|p| p.title.as_deref()), Some("Demo"));
    }

    #[test]
    fn test_heading_matching_section_number_does_not_clash() {
        let deck = Deck::from_text("# Section 2\none\n---\nuntitled\n", "---", "talk").unwrap();
        let ids: Vec<_> = deck.panels().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["section-2", "section-2-2"]);
    }

    #[test]
    fn test_toml_generated_ids_avoid_explicit_ones() {
        let content = r#"
[[panels]]
title = "Intro"
body = "a"

[[panels]]
id = "intro"
body = "b"

[[panels]]
title = "Intro"
body = "c"
"#;
        let deck = Deck::from_toml(content, "talk").unwrap();
        let ids: Vec<_> = deck.panels().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["intro-2", "intro", "intro-3"]);
    }
}
