use crate::domain::test_case::SuiteTagged;
use indexmap::IndexMap;

/// Suite name to cases, in first-seen order.
pub type SuiteGrouping<T> = IndexMap<String, Vec<T>>;

pub(crate) const FALLBACK_SUITE: &str = "All";

/// Buckets cases by trimmed suite label, then adds an empty bucket for every requested
/// category the model did not use. Order within a bucket follows the input order.
pub(crate) fn group_by_suite<T, I>(cases: I, requested: &[String]) -> SuiteGrouping<T>
where
    T: SuiteTagged,
    I: IntoIterator<Item = T>,
{
    let mut grouping: SuiteGrouping<T> = IndexMap::new();
    for case in cases {
        grouping.entry(case.suite_key()).or_default().push(case);
    }
    for category in requested {
        grouping.entry(category.clone()).or_default();
    }
    grouping
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_case::{TestCase, UNCATEGORIZED};
    use serde_json::json;

    fn case(id: &str, suite: Option<&str>) -> TestCase {
        TestCase {
            id: id.to_string(),
            title: format!("Case {}", id),
            steps: vec!["Open the page".to_string()],
            test_data: None,
            expected_result: "Page opens".to_string(),
            category: Some("Positive".to_string()),
            suite_category: suite.map(str::to_string),
        }
    }

    fn requested(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_login_scenario_buckets() {
        let cases = vec![case("TC-001", Some("Security")), case("TC-002", None)];
        let grouping = group_by_suite(cases.clone(), &requested(&["Security", "Unit"]));

        assert_eq!(
            grouping.keys().collect::<Vec<_>>(),
            vec!["Security", "Uncategorized", "Unit"]
        );
        assert_eq!(grouping["Security"], vec![cases[0].clone()]);
        assert!(grouping["Unit"].is_empty());
        assert_eq!(grouping[UNCATEGORIZED], vec![cases[1].clone()]);
    }

    #[test]
    fn test_trimmed_label_merges_with_existing_key() {
        let cases = vec![
            case("TC-001", Some("Integration")),
            case("TC-002", Some("  Integration  ")),
        ];
        let grouping = group_by_suite(cases, &[]);
        assert_eq!(grouping.len(), 1);
        let ids: Vec<_> = grouping["Integration"].iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["TC-001", "TC-002"]);
    }

    #[test]
    fn test_case_sensitive_keys() {
        let cases = vec![case("TC-001", Some("unit")), case("TC-002", Some("Unit"))];
        let grouping = group_by_suite(cases, &[]);
        assert_eq!(grouping.len(), 2);
    }

    #[test]
    fn test_no_forced_keys_without_request() {
        let grouping: SuiteGrouping<TestCase> = group_by_suite(Vec::new(), &[]);
        assert!(grouping.is_empty());
    }

    #[test]
    fn test_every_requested_category_present() {
        let names = requested(&["Unit", "Integration", "Performance"]);
        let grouping = group_by_suite(vec![case("TC-001", Some("Smoke"))], &names);
        for name in &names {
            assert!(grouping.contains_key(name), "{}", name);
        }
        assert_eq!(grouping["Smoke"].len(), 1);
    }

    #[test]
    fn test_regrouping_flattened_result_is_stable() {
        let names = requested(&["Security", "Unit"]);
        let cases = vec![
            case("TC-001", Some("Security")),
            case("TC-002", None),
            case("TC-003", Some(" Security")),
            case("TC-004", Some("E2E")),
            case("TC-004", Some("")),
        ];
        let first = group_by_suite(cases, &names);
        let flattened: Vec<TestCase> = first.values().flatten().cloned().collect();
        let second = group_by_suite(flattened, &names);

        assert_eq!(
            first.keys().collect::<std::collections::BTreeSet<_>>(),
            second.keys().collect::<std::collections::BTreeSet<_>>()
        );
        for (key, bucket) in &first {
            assert_eq!(&second[key], bucket, "{}", key);
        }
    }

    #[test]
    fn test_groups_raw_values() {
        let values = vec![
            json!({"id": "TC-001", "suiteCategory": "Unit"}),
            json!({"id": "TC-002"}),
            json!("stray string"),
        ];
        let grouping = group_by_suite(values, &requested(&["Unit"]));
        assert_eq!(grouping["Unit"].len(), 1);
        assert_eq!(grouping[UNCATEGORIZED].len(), 2);
    }
}
