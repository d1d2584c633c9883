//! Authored verses and their lifecycle status.

use tracing::debug;
use utagaki_types::{
    Gender, Participant, ParticipantId, Timestamp, Verse, VerseId, VerseStatus, VerseVariant,
};

use crate::error::Result;
use crate::validation::require_content;

/// Ledger of posted verses, newest first.
#[derive(Clone, Debug, Default)]
pub struct VerseLedger {
    verses: Vec<Verse>,
}

impl VerseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted verses, kept in stored order.
    pub fn restore(verses: Vec<Verse>) -> Self {
        Self { verses }
    }

    /// Post a verse.
    ///
    /// `variant` is normalized through the legacy alias table; unknown or
    /// missing values become [`VerseVariant::Matsu`]. The author is copied
    /// into the verse as it is right now.
    pub fn add_verse(
        &mut self,
        content: &str,
        author: &Participant,
        variant: Option<&str>,
    ) -> Result<Verse> {
        let content = require_content("content", content)?;
        let verse = Verse {
            id: VerseId::new(),
            content,
            author: author.clone(),
            created_at: Timestamp::now(),
            variant: VerseVariant::normalize(variant),
            status: VerseStatus::Open,
        };
        self.verses.insert(0, verse.clone());
        debug!(verse = %verse.id, author = %author.id, variant = %verse.variant, "verse posted");
        Ok(verse)
    }

    /// Verses written by `author_id`, newest first.
    pub fn verses_by_author(&self, author_id: &ParticipantId) -> Vec<Verse> {
        self.verses
            .iter()
            .filter(|v| &v.author.id == author_id)
            .cloned()
            .collect()
    }

    /// Flip a verse to [`VerseStatus::Matched`].
    ///
    /// Returns `true` if the status changed. Unknown ids and verses that are
    /// already matched are left alone.
    pub(crate) fn mark_matched(&mut self, verse_id: &VerseId) -> bool {
        match self.verses.iter_mut().find(|v| &v.id == verse_id) {
            Some(verse) if verse.status != VerseStatus::Matched => {
                verse.status = VerseStatus::Matched;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: &VerseId) -> Option<&Verse> {
        self.verses.iter().find(|v| &v.id == id)
    }

    pub fn contains(&self, id: &VerseId) -> bool {
        self.get(id).is_some()
    }

    /// Every verse, newest first.
    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

/// Starter verses for an empty river.
///
/// The authors are poets, not roster members, so nobody can log in as them.
/// Each verse is stamped ten seconds before the previous one. Ids derive from
/// the strings `v1`..`v5` and `u1`..`u5`, the same ids older clients seeded.
pub fn sample_verses(now: Timestamp) -> Vec<Verse> {
    const SAMPLES: [(u8, &str, &str, VerseVariant); 5] = [
        (1, "持統天皇", "春過ぎて 夏来にけらし 白妙の", VerseVariant::Matsu),
        (2, "紀友則", "久方の 光のどけき 春の日に", VerseVariant::Ume),
        (3, "在原業平", "ちはやぶる 神代も聞かず 竜田川", VerseVariant::Take),
        (4, "阿倍仲麻呂", "天の原 ふりさけ見れば 春日なる", VerseVariant::Tsuki),
        (5, "崇徳院", "瀬を早み 岩にせかるる 滝川の", VerseVariant::Mizu),
    ];

    SAMPLES
        .iter()
        .enumerate()
        .map(|(i, (seed, poet, content, variant))| Verse {
            id: VerseId::from_legacy(&format!("v{seed}")),
            content: (*content).to_string(),
            author: Participant {
                id: ParticipantId::from_legacy(&format!("u{seed}")),
                display_name: (*poet).to_string(),
                gender: Gender::Female,
                created_at: now,
            },
            created_at: now.earlier_by(i as u64 * 10_000),
            variant: *variant,
            status: VerseStatus::Open,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Participant {
        Participant::new("Alice", Gender::Female)
    }

    #[test]
    fn add_verse_prepends() {
        let mut ledger = VerseLedger::new();
        let author = alice();
        let first = ledger.add_verse("first", &author, Some("matsu")).unwrap();
        let second = ledger.add_verse("second", &author, Some("take")).unwrap();

        let ids: Vec<_> = ledger.verses().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn add_verse_starts_open() {
        let mut ledger = VerseLedger::new();
        let verse = ledger.add_verse("haru", &alice(), None).unwrap();
        assert_eq!(verse.status, VerseStatus::Open);
    }

    #[test]
    fn add_verse_normalizes_variant() {
        let mut ledger = VerseLedger::new();
        let author = alice();
        let sakura = ledger.add_verse("a", &author, Some("sakura")).unwrap();
        let unknown = ledger.add_verse("b", &author, Some("unknown-value")).unwrap();
        let missing = ledger.add_verse("c", &author, None).unwrap();

        assert_eq!(sakura.variant, VerseVariant::Ume);
        assert_eq!(unknown.variant, VerseVariant::Matsu);
        assert_eq!(missing.variant, VerseVariant::Matsu);
    }

    #[test]
    fn add_verse_rejects_blank_content() {
        let mut ledger = VerseLedger::new();
        let err = ledger.add_verse("  ", &alice(), None).unwrap_err();
        assert!(err.is_validation());
        assert!(ledger.is_empty());
    }

    #[test]
    fn verses_by_author_filters_newest_first() {
        let mut ledger = VerseLedger::new();
        let a = alice();
        let b = Participant::new("Bob", Gender::Male);
        let a1 = ledger.add_verse("a1", &a, None).unwrap();
        ledger.add_verse("b1", &b, None).unwrap();
        let a2 = ledger.add_verse("a2", &a, None).unwrap();

        let mine: Vec<_> = ledger.verses_by_author(&a.id).into_iter().map(|v| v.id).collect();
        assert_eq!(mine, vec![a2.id, a1.id]);
    }

    #[test]
    fn mark_matched_is_idempotent() {
        let mut ledger = VerseLedger::new();
        let verse = ledger.add_verse("haru", &alice(), None).unwrap();

        assert!(ledger.mark_matched(&verse.id));
        assert!(!ledger.mark_matched(&verse.id));
        assert_eq!(ledger.get(&verse.id).unwrap().status, VerseStatus::Matched);
    }

    #[test]
    fn mark_matched_ignores_unknown_verse() {
        let mut ledger = VerseLedger::new();
        assert!(!ledger.mark_matched(&VerseId::new()));
    }

    #[test]
    fn author_is_a_frozen_copy() {
        let mut ledger = VerseLedger::new();
        let mut author = alice();
        let verse = ledger.add_verse("haru", &author, None).unwrap();
        author.display_name = "Renamed".into();
        assert_eq!(ledger.get(&verse.id).unwrap().author.display_name, "Alice");
    }

    #[test]
    fn samples_cover_every_variant() {
        let now = Timestamp::from_millis(100_000);
        let samples = sample_verses(now);
        assert_eq!(samples.len(), 5);

        let variants: Vec<_> = samples.iter().map(|v| v.variant).collect();
        assert_eq!(variants, VerseVariant::ALL.to_vec());

        assert_eq!(samples[0].created_at, now);
        assert_eq!(samples[4].created_at, Timestamp::from_millis(60_000));
        assert!(samples.iter().all(|v| v.status == VerseStatus::Open));
    }

    #[test]
    fn content_is_stored_as_written() {
        let mut ledger = VerseLedger::new();
        let verse = ledger.add_verse("  haru sugite\n", &alice(), None).unwrap();
        assert_eq!(verse.content, "  haru sugite\n");
    }

    #[test]
    fn samples_use_legacy_seed_ids() {
        let samples = sample_verses(Timestamp::from_millis(1));
        assert_eq!(samples[0].id, VerseId::from_legacy("v1"));
        assert_eq!(samples[4].author.id, ParticipantId::from_legacy("u5"));
    }

    #[test]
    fn samples_are_stable() {
        let a = sample_verses(Timestamp::from_millis(1));
        let b = sample_verses(Timestamp::from_millis(2));
        let ids_a: Vec<_> = a.iter().map(|v| v.id).collect();
        let ids_b: Vec<_> = b.iter().map(|v| v.id).collect();
        assert_eq!(ids_a, ids_b);
    }
}
