use agentready_edit::{ApplyOptions, apply_fixes};
use agentready_types::fix::{ExistingFilePolicy, Fix};
use camino::Utf8PathBuf;
use fs_err as fs;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Failing fixes are file creations onto an existing path with the `fail` policy.
    #[test]
    fn every_fix_is_attempted(outcomes in prop::collection::vec(any::<bool>(), 0..12)) {
        let td = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8");
        fs::write(root.join("taken"), "x").expect("write");

        let fixes: Vec<Fix> = outcomes
            .iter()
            .enumerate()
            .map(|(i, ok)| {
                let file = if *ok { format!("out_{i}.txt") } else { "taken".to_string() };
                Fix::file_creation("a", format!("fix {i}"), 1.0, root.clone(), file, "y")
                    .with_existing_policy(ExistingFilePolicy::Fail)
            })
            .collect();

        let report = apply_fixes(&fixes, &ApplyOptions::default());
        let expected_ok = outcomes.iter().filter(|ok| **ok).count() as u64;

        prop_assert_eq!(report.attempted(), outcomes.len() as u64);
        prop_assert_eq!(report.succeeded, expected_ok);
        prop_assert_eq!(report.failed, outcomes.len() as u64 - expected_ok);
        prop_assert_eq!(report.failures.len() as u64, report.failed);
        prop_assert_eq!(report.results.len(), outcomes.len());
    }
}
