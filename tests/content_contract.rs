//! Contract checks on `content/portfolio.json`, independent of the loader.
//!
//! In-page navigation only works if every section anchor exists exactly once
//! and every menu link points at one of them. The loader enforces this at
//! startup; this test catches a bad edit before it ships.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde_json::Value;

const ANCHORS: [&str; 5] = ["home", "about", "experience", "projects", "contact"];

fn content() -> Value {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("content/portfolio.json");
    let raw = fs::read_to_string(&path).expect("content file readable");
    serde_json::from_str(&raw).expect("content is valid JSON")
}

fn strings(v: &Value) -> Vec<&str> {
    v.as_array()
        .expect("array")
        .iter()
        .map(|s| s.as_str().expect("string"))
        .collect()
}

#[test]
fn every_anchor_exists_exactly_once() {
    let c = content();
    let sections = strings(&c["sections"]);
    for anchor in ANCHORS {
        let count = sections.iter().filter(|s| **s == anchor).count();
        assert_eq!(count, 1, "anchor {anchor:?} appears {count} times");
    }
    assert_eq!(sections.len(), ANCHORS.len());
}

#[test]
fn menu_links_resolve() {
    let c = content();
    let sections: HashSet<&str> = strings(&c["sections"]).into_iter().collect();
    let menu = c["menu"].as_array().expect("menu array");
    assert_eq!(menu.len(), 5);
    for item in menu {
        let href = item["href"].as_str().expect("href");
        let anchor = href.strip_prefix('#').expect("in-page link");
        assert!(sections.contains(anchor), "menu link {href:?} has no section");
    }
}

#[test]
fn project_categories_have_filters() {
    let c = content();
    let filters: HashSet<&str> = strings(&c["filters"]).into_iter().collect();
    assert!(filters.contains("All"));
    for project in c["projects"].as_array().expect("projects array") {
        let category = project["category"].as_str().expect("category");
        assert!(filters.contains(category), "no filter for {category:?}");
    }
}

#[test]
fn projects_carry_links_and_tags() {
    let c = content();
    for project in c["projects"].as_array().expect("projects array") {
        for key in ["demoLink", "githubLink"] {
            let url = project[key].as_str().expect("link string");
            assert!(url.starts_with("https://"), "{key} {url:?} is not an absolute link");
        }
        assert!(!project["tags"].as_array().expect("tags").is_empty());
    }
}

#[test]
fn social_links_are_absolute() {
    let c = content();
    let socials = c["socials"].as_array().expect("socials array");
    assert!(!socials.is_empty());
    for social in socials {
        let url = social["url"].as_str().expect("url");
        assert!(url.starts_with("https://"), "social {url:?} is not an absolute link");
    }
}
