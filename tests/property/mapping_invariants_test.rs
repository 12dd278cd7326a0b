//! Property-based tests for the event mapper.
//!
//! These tests verify that the range, monotonicity and determinism
//! guarantees of the mapping hold for arbitrary record sequences, including
//! adversarial visit counts, long paths and unsorted timestamps.

use historymidi::services::event_mapper::{EventMapper, EventMapperTrait};
use historymidi::services::stable_hash::stable_hash;
use historymidi::types::config::MappingConfig;
use historymidi::types::history::HistoryRecord;
use proptest::prelude::*;

/// Strategy for URL strings: mostly well-formed, sometimes junk.
fn arb_url() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => (
            prop_oneof![Just("https"), Just("http"), Just("ftp")],
            "[a-z][a-z0-9]{0,12}",
            prop_oneof![Just(".com"), Just(".org"), Just(".net")],
            "(/[a-zA-Z0-9_-]{0,40}){0,4}",
        )
            .prop_map(|(scheme, host, tld, path)| format!("{}://{}{}{}", scheme, host, tld, path)),
        1 => ".{0,60}",
    ]
}

fn arb_record(timestamp: i64) -> impl Strategy<Value = HistoryRecord> {
    (arb_url(), any::<u64>()).prop_map(move |(url, visit_count)| HistoryRecord {
        timestamp,
        url,
        visit_count,
    })
}

/// Sorted records starting at an arbitrary epoch with arbitrary gaps.
fn arb_sorted_records() -> impl Strategy<Value = Vec<HistoryRecord>> {
    (0i64..2_000_000_000, prop::collection::vec(0i64..100_000, 0..40)).prop_flat_map(
        |(start, gaps)| {
            let mut t = start;
            let stamps: Vec<i64> = gaps
                .into_iter()
                .map(|g| {
                    t += g;
                    t
                })
                .collect();
            stamps.into_iter().map(arb_record).collect::<Vec<_>>()
        },
    )
}

fn arb_config() -> impl Strategy<Value = MappingConfig> {
    (0u8..120, 1u8..8, any::<u8>(), any::<u8>(), 1usize..=16, 1u32..400).prop_map(
        |(low, width, velocity_base, velocity_modulation, voice_count, bpm)| MappingConfig {
            pitch_range: (low, (low + width).min(127)),
            velocity_base,
            velocity_modulation,
            voice_count,
            bpm,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn notes_stay_in_range(records in arb_sorted_records(), config in arb_config()) {
        let mapper = EventMapper::new(config.clone()).unwrap();
        let arrangement = mapper.map_records(&records);
        let (low, high) = config.pitch_range;

        prop_assert_eq!(arrangement.voice_count(), config.voice_count);
        prop_assert!(arrangement.event_count() <= records.len());
        for (voice, notes) in arrangement.voices.iter().enumerate() {
            for note in notes {
                prop_assert_eq!(note.voice, voice);
                prop_assert!(note.voice < config.voice_count);
                prop_assert!(note.pitch >= low && note.pitch <= high);
                prop_assert!(note.velocity <= 127);
                prop_assert!(note.duration >= 0.25 && note.duration <= 4.0);
                prop_assert!(note.start_time >= 0.0);
            }
        }
    }

    #[test]
    fn start_times_never_decrease_within_a_voice(records in arb_sorted_records()) {
        let arrangement = EventMapper::new(MappingConfig::default())
            .unwrap()
            .map_records(&records);
        for notes in &arrangement.voices {
            for pair in notes.windows(2) {
                prop_assert!(pair[0].start_time <= pair[1].start_time);
            }
        }
    }

    #[test]
    fn voice_depends_only_on_domain(host in "[a-z]{1,12}\\.com", paths in prop::collection::vec("/[a-z]{0,20}", 1..10)) {
        let records: Vec<HistoryRecord> = paths
            .iter()
            .enumerate()
            .map(|(i, p)| HistoryRecord::new(i as i64, format!("https://{}{}", host, p), 1))
            .collect();
        let arrangement = EventMapper::new(MappingConfig::default())
            .unwrap()
            .map_records(&records);

        let expected = (stable_hash(&host) % 4) as usize;
        prop_assert_eq!(arrangement.voices[expected].len(), records.len());
    }

    #[test]
    fn mapping_is_deterministic(records in arb_sorted_records(), config in arb_config()) {
        let mapper = EventMapper::new(config).unwrap();
        prop_assert_eq!(mapper.map_records(&records), mapper.map_records(&records));
    }

    #[test]
    fn unsorted_input_still_clamps(
        stamps in prop::collection::vec(any::<i64>(), 1..30),
        url in arb_url(),
    ) {
        let records: Vec<HistoryRecord> = stamps
            .iter()
            .map(|&t| HistoryRecord::new(t, url.clone(), 3))
            .collect();
        let arrangement = EventMapper::new(MappingConfig::default())
            .unwrap()
            .map_records(&records);
        for note in arrangement.iter_events() {
            prop_assert!(note.duration >= 0.25 && note.duration <= 4.0);
            prop_assert!((48..=84).contains(&note.pitch));
        }
    }
}
