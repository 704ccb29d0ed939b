use regex::Regex;

use google_cloud_resourcemanager::http::projects::Project;

/// Include/exclude matching on project ids. Exclusion wins over inclusion.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

/// Projects split by [`ProjectFilter::partition`], each side in input order.
#[derive(Debug, Default)]
pub struct Partition {
    pub kept: Vec<Project>,
    pub excluded: Vec<Project>,
}

impl ProjectFilter {
    pub fn new(include: Option<Regex>, exclude: Option<Regex>) -> Self {
        Self { include, exclude }
    }

    pub fn keeps(&self, project_id: &str) -> bool {
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(project_id) {
                return false;
            }
        }
        match &self.include {
            Some(include) => include.is_match(project_id),
            None => true,
        }
    }

    pub fn partition(&self, projects: Vec<Project>) -> Partition {
        let (kept, excluded) = projects.into_iter().partition(|p| self.keeps(&p.project_id));
        Partition { kept, excluded }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::args::parse_pattern;

    fn projects(ids: &[&str]) -> Vec<Project> {
        ids.iter()
            .map(|id| Project {
                project_id: id.to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn ids(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.project_id.as_str()).collect()
    }

    fn filter(include: Option<&str>, exclude: Option<&str>) -> ProjectFilter {
        ProjectFilter::new(
            include.map(|p| parse_pattern(p).unwrap()),
            exclude.map(|p| parse_pattern(p).unwrap()),
        )
    }

    #[test]
    fn test_exclude_pattern() {
        let partition = filter(None, Some("test|dev")).partition(projects(&["prod-api", "test-api", "dev-db"]));
        assert_eq!(ids(&partition.kept), vec!["prod-api"]);
        assert_eq!(ids(&partition.excluded), vec!["test-api", "dev-db"]);
    }

    #[test]
    fn test_include_pattern() {
        let partition = filter(Some("prod"), None).partition(projects(&["prod-api", "test-api", "PROD-db"]));
        assert_eq!(ids(&partition.kept), vec!["prod-api", "PROD-db"]);
        assert_eq!(ids(&partition.excluded), vec!["test-api"]);
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let partition = filter(Some("api"), Some("test")).partition(projects(&["prod-api", "test-api", "dev-db"]));
        assert_eq!(ids(&partition.kept), vec!["prod-api"]);
        assert_eq!(ids(&partition.excluded), vec!["test-api", "dev-db"]);
    }

    fn project_ids() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z][a-z0-9-]{0,12}", 0..40)
    }

    proptest! {
        #[test]
        fn no_patterns_keep_everything(input in project_ids()) {
            let refs: Vec<&str> = input.iter().map(String::as_str).collect();
            let partition = ProjectFilter::default().partition(projects(&refs));
            prop_assert_eq!(ids(&partition.kept), refs);
            prop_assert!(partition.excluded.is_empty());
        }

        #[test]
        fn excluded_match_is_never_kept(input in project_ids(), needle in "[a-z]{1,2}") {
            let refs: Vec<&str> = input.iter().map(String::as_str).collect();
            let partition = filter(Some(needle.as_str()), Some(needle.as_str())).partition(projects(&refs));
            prop_assert!(partition.kept.is_empty());
            prop_assert_eq!(partition.excluded.len(), refs.len());
        }

        #[test]
        fn partition_preserves_order_and_size(input in project_ids(), needle in "[a-z]{1,2}") {
            let refs: Vec<&str> = input.iter().map(String::as_str).collect();
            let partition = filter(None, Some(needle.as_str())).partition(projects(&refs));
            prop_assert_eq!(partition.kept.len() + partition.excluded.len(), refs.len());
            let expected: Vec<&str> = refs.iter().copied().filter(|id| !id.contains(needle.as_str())).collect();
            prop_assert_eq!(ids(&partition.kept), expected);
        }
    }
}
