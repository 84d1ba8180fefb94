//! Narration items and the built-in Beacon demo script.

use std::collections::HashSet;

use crate::error::{Error, Result};

/// One unit of work: a filesystem-safe key and the text to speak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationItem {
    key: String,
    text: String,
}

impl NarrationItem {
    /// Create an item without validating the key.
    ///
    /// Keys are checked by [`validate_batch`] before a run starts.
    #[must_use]
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }

    /// Create an item, rejecting keys that are unsafe as file names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidItem`] if the key is empty or contains
    /// anything other than ASCII letters, digits, `_` or `-`.
    pub fn try_new(key: impl Into<String>, text: impl Into<String>) -> Result<Self> {
        let item = Self::new(key, text);
        check_key(&item.key)?;
        Ok(item)
    }

    /// The artifact key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The transcript.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::invalid_item(key, "key is empty"));
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(Error::invalid_item(
            key,
            format!("character {bad:?} is not allowed in a key"),
        ));
    }
    Ok(())
}

/// Check that every key is safe and unique.
///
/// # Errors
///
/// Returns [`Error::InvalidItem`] for the first bad or repeated key.
pub fn validate_batch(items: &[NarrationItem]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        check_key(&item.key)?;
        if !seen.insert(item.key.as_str()) {
            return Err(Error::invalid_item(&item.key, "duplicate key"));
        }
    }
    Ok(())
}

const BEACON_SCRIPT: &[(&str, &str)] = &[
    (
        "welcome",
        "Every year, 300 million people worldwide are affected by rare diseases. Most have no approved treatment. When a family gets this diagnosis, they're on their own — navigating science, regulation, and funding with no expertise. Beacon changes that. Built almost entirely with Claude Code and Opus 4.6, Beacon is a team of AI agents that works continuously on a family's behalf.",
    ),
    (
        "intake",
        "The journey starts with a simple intake — disease name, patient context, location. Behind the scenes, this seeds every agent's system prompt with structured context, so Opus 4.6 can reason about jurisdiction-specific regulatory paths and personalized research strategies from the first query.",
    ),
    (
        "agents_activating",
        "When the family clicks Launch, Beacon's orchestrator spins up eight Claude Code sub-agents in parallel — each powered by Opus 4.6 with a specialized system prompt. Scout searches bioRxiv, PubMed, and ClinicalTrials.gov through Anthropic's healthcare MCP connectors. Navigator queries the CMS Coverage database and maps FDA orphan drug pathways. Connector cross-references the NPI Registry to verify physician credentials. Each agent writes structured JSON that the dashboard polls in real time.",
    ),
    (
        "progress",
        "What you're watching is live agent output streaming into the UI. Each progress bar, each status update, each achievement — those are real structured outputs from Opus 4.6 sub-agents writing to shared state files. The orchestrator coordinates task dependencies so agents can hand off findings to each other.",
    ),
    (
        "insights",
        "These insights are the cross-agent synthesis — Scout found a clinical trial, Navigator checked the regulatory precedent, Mobilizer identified matching grant funding. This research-to-action chain is what sets Beacon apart. Other tools stop at search results. Beacon executes the full pipeline.",
    ),
    (
        "approvals",
        "Human-in-the-loop for consequential actions. The agent drafts an outreach email to a researcher it identified through PubMed and verified through the NPI Registry. The family reviews and approves. Progressive trust — the AI proposes, the human decides.",
    ),
    (
        "lab_overview",
        "The Drug Discovery Lab pushes Opus 4.6 further. Three specialized agents — Biologist, Chemist, Preclinician — use the ChEMBL MCP connector to search bioactive compounds, retrieve IC50 values, and evaluate ADMET properties. This is real drug discovery reasoning, not keyword search.",
    ),
    (
        "lab_candidates",
        "The candidate pipeline ranks compounds by predicted efficacy, safety profile, and clinical precedent — all extracted from ChEMBL's curated database of bioactive molecules. Each agent's reasoning chain is fully traceable.",
    ),
    (
        "community_network",
        "Beacon's Connector agent builds a family network — matching by geography, disease variant, and treatment stage. Every connection requires family approval. Privacy by design.",
    ),
    (
        "community_data",
        "When families opt in to share outcomes, Beacon's agents analyze the pooled data — identifying treatment patterns, adverse events, and response rates. For ultra-rare diseases, this community evidence may be the only data that exists.",
    ),
    (
        "closing",
        "Beacon is a team of AI agents that never stops working — researching, connecting, strategizing, funding — all orchestrated by Claude Code and powered by Opus 4.6. No family should have to fight alone.",
    ),
];

/// The Beacon demo narration, in playback order.
#[must_use]
pub fn beacon_narrations() -> Vec<NarrationItem> {
    BEACON_SCRIPT
        .iter()
        .map(|(key, text)| NarrationItem::new(*key, *text))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod keys {
        use super::*;

        #[test]
        fn accepts_snake_and_kebab_keys() {
            assert!(NarrationItem::try_new("agents_activating", "x").is_ok());
            assert!(NarrationItem::try_new("lab-overview-2", "x").is_ok());
        }

        #[test]
        fn rejects_path_like_keys() {
            for key in ["", "../etc", "a/b", "a\\b", "clip.mp3", "with space"] {
                let err = NarrationItem::try_new(key, "x").unwrap_err();
                assert!(matches!(err, Error::InvalidItem { .. }), "accepted {key:?}");
            }
        }

        #[test]
        fn batch_rejects_duplicates() {
            let items = vec![
                NarrationItem::new("a", "one"),
                NarrationItem::new("b", "two"),
                NarrationItem::new("a", "three"),
            ];
            let err = validate_batch(&items).unwrap_err();
            assert!(err.to_string().contains("duplicate"));
        }
    }

    mod beacon {
        use super::*;

        #[test]
        fn script_is_a_valid_batch() {
            let items = beacon_narrations();
            assert_eq!(items.len(), 11);
            validate_batch(&items).unwrap();
        }

        #[test]
        fn script_order_is_playback_order() {
            let keys: Vec<_> = beacon_narrations()
                .iter()
                .map(|item| item.key().to_owned())
                .collect();
            assert_eq!(keys.first().map(String::as_str), Some("welcome"));
            assert_eq!(keys.last().map(String::as_str), Some("closing"));
        }

        #[test]
        fn every_clip_has_text() {
            assert!(beacon_narrations().iter().all(|item| !item.text().is_empty()));
        }
    }
}
