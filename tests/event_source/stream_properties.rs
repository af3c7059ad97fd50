//! Property tests for stream revisions

use crate::common::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn revisions_are_dense_across_commits(
        batches in proptest::collection::vec(proptest::collection::vec(any::<u32>(), 0..5), 1..10),
    ) {
        let source = MemoryEventSource::new();
        let id = ObjectId::new();
        let mut expected = Vec::new();

        for batch in &batches {
            let mut stream = if source.has(id) {
                source.get(id).unwrap()
            } else {
                source.create_stream(id)
            };
            let before = stream.version();
            let events: Vec<Event> = batch.iter().copied().map(Event::new).collect();
            stream.save(&events).unwrap();
            let commit = stream.persist().unwrap();
            source.put(&mut stream).unwrap();

            prop_assert_eq!(commit.version(), before);
            prop_assert_eq!(commit.next_version(), before + batch.len() as Revision);
            expected.extend_from_slice(batch);
        }

        let stream = source.get(id).unwrap();
        prop_assert_eq!(stream.version(), expected.len() as Revision);
        let history: Vec<u32> = stream
            .load(0, MAX_REVISION)
            .unwrap()
            .iter()
            .map(|e| *e.downcast_ref::<u32>().unwrap())
            .collect();
        prop_assert_eq!(history, expected);
    }

    #[test]
    fn sequence_numbers_increase_with_non_empty_commits(
        sizes in proptest::collection::vec(0usize..4, 1..15),
    ) {
        let source = MemoryEventSource::new();
        let mut last = 0;
        for size in sizes {
            let mut stream = source.create_stream(ObjectId::new());
            let events: Vec<Event> = (0..size).map(Event::new).collect();
            stream.save(&events).unwrap();
            let commit = stream.persist().unwrap();
            if size == 0 {
                prop_assert_eq!(commit.sequence_number(), last);
            } else {
                prop_assert_eq!(commit.sequence_number(), last + 1);
                last = commit.sequence_number();
            }
        }
        prop_assert_eq!(source.last_sequence_number(), last);
    }
}
