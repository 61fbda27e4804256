/// Project gallery category filter.

use std::fmt;

use serde::Deserialize;

use super::content::Project;

/// A filter chip. `All` is the universal sentinel; anything else matches a
/// project category by exact string.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum FilterLabel {
    All,
    Category(String),
}

impl From<String> for FilterLabel {
    fn from(s: String) -> Self {
        if s == "All" {
            FilterLabel::All
        } else {
            FilterLabel::Category(s)
        }
    }
}

impl From<&str> for FilterLabel {
    fn from(s: &str) -> Self {
        FilterLabel::from(s.to_string())
    }
}

impl FilterLabel {
    pub fn label(&self) -> &str {
        match self {
            FilterLabel::All => "All",
            FilterLabel::Category(c) => c,
        }
    }
}

impl fmt::Display for FilterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Projects shown under `filter`, in their original order.
pub fn visible_projects<'a>(filter: &FilterLabel, projects: &'a [Project]) -> Vec<&'a Project> {
    match filter {
        FilterLabel::All => projects.iter().collect(),
        FilterLabel::Category(c) => projects.iter().filter(|p| &p.category == c).collect(),
    }
}

/// Holds the active filter. The visible list is always recomputed from it,
/// never cached.
pub struct ProjectFilter {
    active: FilterLabel,
    labels: Vec<FilterLabel>,
}

impl ProjectFilter {
    pub fn new(labels: Vec<FilterLabel>) -> Self {
        Self {
            active: FilterLabel::All,
            labels,
        }
    }

    pub fn active(&self) -> &FilterLabel {
        &self.active
    }

    /// Configured labels, in display order.
    pub fn labels(&self) -> &[FilterLabel] {
        &self.labels
    }

    /// Replace the active filter. Labels outside the configured set are
    /// accepted and simply match nothing.
    pub fn set_filter(&mut self, label: FilterLabel) {
        self.active = label;
    }

    /// Step through the configured labels, wrapping at either end.
    pub fn cycle(&mut self, step: i32) {
        if self.labels.is_empty() {
            return;
        }
        let n = self.labels.len() as i32;
        let current = self
            .labels
            .iter()
            .position(|l| *l == self.active)
            .map(|i| i as i32)
            .unwrap_or(0);
        let next = (current + step).rem_euclid(n) as usize;
        self.active = self.labels[next].clone();
    }

    pub fn visible_projects<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        visible_projects(&self.active, projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(title: &str, category: &str) -> Project {
        Project {
            title: title.to_string(),
            description: String::new(),
            image: String::new(),
            tags: Vec::new(),
            category: category.to_string(),
            demo_link: "#".to_string(),
            github_link: "#".to_string(),
        }
    }

    fn gallery() -> Vec<Project> {
        vec![
            project("E-Commerce Platform", "Web"),
            project("Task Management App", "Mobile"),
            project("API Gateway Service", "Backend"),
            project("Content Management System", "Web"),
        ]
    }

    fn labels() -> Vec<FilterLabel> {
        ["All", "Web", "Mobile", "Backend"].into_iter().map(FilterLabel::from).collect()
    }

    fn titles(ps: &[&Project]) -> Vec<String> {
        ps.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn defaults_to_all() {
        let f = ProjectFilter::new(labels());
        assert_eq!(f.active(), &FilterLabel::All);
        assert_eq!(f.visible_projects(&gallery()).len(), 4);
    }

    #[test]
    fn category_keeps_original_order() {
        let mut f = ProjectFilter::new(labels());
        f.set_filter("Web".into());
        let projects = gallery();
        assert_eq!(
            titles(&f.visible_projects(&projects)),
            ["E-Commerce Platform", "Content Management System"]
        );
    }

    #[test]
    fn switching_filters_recomputes() {
        let mut f = ProjectFilter::new(labels());
        let projects = gallery();
        f.set_filter("Mobile".into());
        assert_eq!(titles(&f.visible_projects(&projects)), ["Task Management App"]);
        f.set_filter(FilterLabel::All);
        assert_eq!(f.visible_projects(&projects).len(), 4);
        f.set_filter("Backend".into());
        assert_eq!(titles(&f.visible_projects(&projects)), ["API Gateway Service"]);
    }

    #[test]
    fn unknown_label_yields_empty() {
        let mut f = ProjectFilter::new(labels());
        f.set_filter("Desktop".into());
        assert_eq!(f.active().label(), "Desktop");
        assert!(f.visible_projects(&gallery()).is_empty());
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let mut f = ProjectFilter::new(labels());
        f.cycle(1);
        assert_eq!(f.active().label(), "Web");
        f.cycle(-2);
        assert_eq!(f.active().label(), "Backend");
        f.cycle(1);
        assert_eq!(f.active(), &FilterLabel::All);
    }

    #[test]
    fn cycle_from_unknown_restarts_at_first() {
        let mut f = ProjectFilter::new(labels());
        f.set_filter("Desktop".into());
        f.cycle(1);
        assert_eq!(f.active().label(), "Web");
    }

    #[test]
    fn all_string_parses_to_sentinel() {
        let parsed: Vec<FilterLabel> = serde_json::from_str(r#"["All","Web"]"#).unwrap();
        assert_eq!(parsed, vec![FilterLabel::All, FilterLabel::Category("Web".into())]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_category() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Web".to_string()),
            Just("Mobile".to_string()),
            Just("Backend".to_string()),
        ]
    }

    fn arb_projects() -> impl Strategy<Value = Vec<Project>> {
        prop::collection::vec(arb_category(), 0..12).prop_map(|cats| {
            cats.into_iter()
                .enumerate()
                .map(|(i, category)| Project {
                    title: format!("p{i}"),
                    description: String::new(),
                    image: String::new(),
                    tags: Vec::new(),
                    category,
                    demo_link: "#".into(),
                    github_link: "#".into(),
                })
                .collect()
        })
    }

    fn arb_label() -> impl Strategy<Value = FilterLabel> {
        prop_oneof![
            Just(FilterLabel::All),
            arb_category().prop_map(FilterLabel::Category),
            Just(FilterLabel::Category("Desktop".into())),
        ]
    }

    proptest! {
        #[test]
        fn prop_visible_matches_definition(projects in arb_projects(), label in arb_label()) {
            let visible = visible_projects(&label, &projects);
            match &label {
                FilterLabel::All => {
                    prop_assert_eq!(visible.len(), projects.len());
                    for (v, p) in visible.iter().zip(projects.iter()) {
                        prop_assert_eq!(*v, p);
                    }
                }
                FilterLabel::Category(c) => {
                    let expected: Vec<&Project> =
                        projects.iter().filter(|p| &p.category == c).collect();
                    prop_assert_eq!(visible, expected);
                }
            }
        }

        #[test]
        fn prop_filter_is_stateless(projects in arb_projects(), a in arb_label(), b in arb_label()) {
            let mut f = ProjectFilter::new(Vec::new());
            f.set_filter(a);
            let _ = f.visible_projects(&projects);
            f.set_filter(b.clone());
            prop_assert_eq!(f.visible_projects(&projects), visible_projects(&b, &projects));
        }
    }
}
