use common::{CountyDto, CountyFips};
use tracing::{instrument, trace};

use crate::dataset::CountyList;

/// Queries shorter than this produce no suggestions.
pub const MIN_QUERY_LEN: usize = 2;

/// Number of suggestions the search box shows.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// County list with precomputed lowercase search keys.
#[derive(Debug, Clone, Default)]
pub struct CountyIndex {
    list: CountyList,
    /// `"{name}, {state}"`, lowercased
    search_keys: Vec<String>,
    /// `name`, lowercased
    names: Vec<String>,
}

impl CountyIndex {
    pub fn new(list: CountyList) -> Self {
        let search_keys = list
            .entries()
            .iter()
            .map(|c| format!("{}, {}", c.name, c.state).to_lowercase())
            .collect();
        let names = list.entries().iter().map(|c| c.name.to_lowercase()).collect();
        Self {
            list,
            search_keys,
            names,
        }
    }

    /// Case-insensitive substring match against `"{name}, {state}"`, in list
    /// order, returning at most `limit` counties.
    #[instrument(skip(self))]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&CountyDto> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        let matches: Vec<&CountyDto> = self
            .search_keys
            .iter()
            .zip(self.list.entries())
            .filter(|(key, _)| key.contains(&needle))
            .map(|(_, county)| county)
            .take(limit)
            .collect();
        trace!(matches = matches.len(), "county search");
        matches
    }

    /// County whose display name equals `text`, ignoring case and
    /// surrounding whitespace. The first match wins.
    pub fn resolve_exact(&self, text: &str) -> Option<&CountyDto> {
        let wanted = text.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.names
            .iter()
            .position(|name| *name == wanted)
            .map(|i| &self.list.entries()[i])
    }

    pub fn find(&self, fips: &CountyFips) -> Option<&CountyDto> {
        self.list.find_by_fips(fips)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn county(fips: &str, name: &str, state: &str) -> CountyDto {
        CountyDto {
            fips: CountyFips::parse(fips).unwrap(),
            name: name.to_string(),
            state: state.to_string(),
        }
    }

    fn index() -> CountyIndex {
        CountyIndex::new(CountyList::new(vec![
            county("42101", "Philadelphia County, PA", "Pennsylvania"),
            county("17031", "Cook County, IL", "Illinois"),
            county("13075", "Cook County, GA", "Georgia"),
            county("06037", "Los Angeles County, CA", "California"),
        ]))
    }

    #[test]
    fn test_short_queries_return_nothing() {
        let index = index();
        assert!(index.search("", 10).is_empty());
        assert!(index.search(" c ", 10).is_empty());
    }

    #[test]
    fn test_case_insensitive_substring_in_list_order() {
        let index = index();
        let names: Vec<&str> = index.search("COOK", 10).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Cook County, IL", "Cook County, GA"]);
    }

    #[test]
    fn test_matches_state_suffix() {
        let index = index();
        let hits = index.search("georgia", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].fips.as_str(), "13075");
    }

    #[test]
    fn test_limit_caps_results() {
        let index = index();
        assert_eq!(index.search("county", 2).len(), 2);
        assert_eq!(index.search("county", DEFAULT_SUGGESTION_LIMIT).len(), 4);
    }

    #[test]
    fn test_resolve_exact_name() {
        let index = index();
        let hit = index.resolve_exact("  cook county, ga ").unwrap();
        assert_eq!(hit.fips.as_str(), "13075");
        assert!(index.resolve_exact("Cook County").is_none());
        assert!(index.resolve_exact("").is_none());
    }

    #[test]
    fn test_find_by_fips() {
        let index = index();
        let fips = CountyFips::parse("06037").unwrap();
        assert_eq!(index.find(&fips).unwrap().name, "Los Angeles County, CA");
        assert_eq!(index.len(), 4);
    }
}
