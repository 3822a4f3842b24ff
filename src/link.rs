//! `Link` response header parsing.
//!
//! Pagination endpoints describe related pages as comma-separated
//! `<url>; rel="name"` entries. The parsed form maps each relation name to
//! the query parameters of its URL, which is what a caller needs to
//! request that page.

use std::collections::HashMap;

use serde::Serialize;

/// Query parameters of a single pagination link.
pub type LinkParams = HashMap<String, String>;

/// Parsed `Link` header: relation name to the query parameters of that
/// link's URL.
///
/// The mapping is open: any relation string present in the header is kept,
/// not just the conventional `first`/`prev`/`current`/`next`/`last`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLinks {
    links: HashMap<String, LinkParams>,
}

impl PageLinks {
    /// Query parameters for an arbitrary relation name.
    pub fn get(&self, rel: &str) -> Option<&LinkParams> {
        self.links.get(rel)
    }

    pub fn first(&self) -> Option<&LinkParams> {
        self.get("first")
    }

    pub fn prev(&self) -> Option<&LinkParams> {
        self.get("prev")
    }

    pub fn current(&self) -> Option<&LinkParams> {
        self.get("current")
    }

    pub fn next(&self) -> Option<&LinkParams> {
        self.get("next")
    }

    pub fn last(&self) -> Option<&LinkParams> {
        self.get("last")
    }

    /// Relation names present in the header, in no particular order.
    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Parse a `Link` header value.
///
/// Each comma-separated entry contributes one mapping entry per relation
/// token it names (an entry may carry several, e.g. `rel="next last"`).
/// Relative URLs are resolved against a placeholder origin so their query
/// strings still parse; entries that still fail to parse are skipped.
pub fn parse_link_header(value: &str) -> PageLinks {
    let mut links = PageLinks::default();
    for entry in value.split(',') {
        let entry = entry.trim();
        let Some(target) = extract_target(entry) else {
            continue;
        };
        let Some(url) = parse_target(target) else {
            continue;
        };
        let params: LinkParams = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        for rel in rel_tokens(entry) {
            links.links.insert(rel.to_string(), params.clone());
        }
    }
    links
}

/// The URL between `<` and `>`, if the entry has one.
fn extract_target(entry: &str) -> Option<&str> {
    let start = entry.find('<')? + 1;
    let end = entry.find('>')?;
    entry.get(start..end)
}

fn parse_target(target: &str) -> Option<reqwest::Url> {
    reqwest::Url::parse(target)
        .or_else(|_| reqwest::Url::parse("http://relative.invalid/")?.join(target))
        .ok()
}

/// All relation tokens named by an entry's `rel` parameters.
fn rel_tokens(entry: &str) -> impl Iterator<Item = &str> {
    entry
        .split(';')
        .skip(1)
        .filter_map(|param| {
            let (name, value) = param.split_once('=')?;
            (name.trim() == "rel").then(|| value.trim().trim_matches('"'))
        })
        .flat_map(str::split_whitespace)
}
