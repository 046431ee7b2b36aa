use blockdiff::{Block, create_report};
use proptest::prelude::*;

// Few distinct lines so that duplicates, anchors and moves all show up.
fn lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec!["alpha", "beta", "gamma", "delta", "Alpha", "be ta", ""]),
        0..24,
    )
    .prop_map(|lines| lines.into_iter().map(str::to_owned).collect())
}

proptest! {
    #[test]
    fn identity(old in lines()) {
        let report = create_report(&old, &old).unwrap();
        prop_assert!(report.is_identical());
        prop_assert_eq!(report.to_string(), ">>>> Diff: Files are identical.\n");
    }

    #[test]
    fn detection_is_symmetric(old in lines(), new in lines()) {
        let forward = create_report(&old, &new).unwrap();
        let backward = create_report(&new, &old).unwrap();
        prop_assert_eq!(forward.has_differences(), backward.has_differences());
    }

    #[test]
    fn moves_are_reported_once(old in lines(), new in lines()) {
        let report = create_report(&old, &new).unwrap();
        let mut moved: Vec<usize> = report
            .blocks()
            .iter()
            .filter_map(|block| match block {
                Block::Move { first, .. } => Some(*first),
                _ => None,
            })
            .collect();
        let count = moved.len();
        moved.sort_unstable();
        moved.dedup();
        prop_assert_eq!(moved.len(), count);
    }

    #[test]
    fn every_old_line_number_is_in_range(old in lines(), new in lines()) {
        let retained = old.iter().filter(|line| !blockdiff::is_blank(line)).count();
        let report = create_report(&old, &new).unwrap();
        for block in report.blocks() {
            let line = match block {
                Block::Delete { at, .. } | Block::Change { at, .. } => *at,
                Block::Insert { before, .. } | Block::Move { before, .. } => *before,
            };
            prop_assert!(line >= 1 && line <= retained + 1);
        }
    }
}
