// src/query.rs

//! Translation of filter state into backend query parameters.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::models::FilterState;

/// Wire keys, as the backend's search form names them.
pub mod keys {
    pub const SEARCH_TERM: &str = "q";
    pub const QUERY_TYPE: &str = "query_type";
    pub const SCHEDULE: &str = "schedule";
    pub const EDUCATION: &str = "education";
    pub const MIN_EXPERIENCE: &str = "min_experience";
    pub const MAX_EXPERIENCE: &str = "max_experience";
    pub const MIN_PRICE: &str = "price__gte";
    pub const MAX_PRICE: &str = "price__lte";
    pub const SITE: &str = "site";
    pub const BUSINESS_SIZE: &str = "business_size";
    pub const CONTRACT_YEAR: &str = "contract-year";
    pub const SORT: &str = "sort";
    pub const PAGE: &str = "page";
}

/// Flat key/value mapping sent to the backend.
///
/// Built only by [`compose_query`]. Keys are kept sorted so the same
/// state always encodes to the same string, though the backend treats
/// the parameters as an unordered map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams(BTreeMap<&'static str, String>);

impl QueryParams {
    fn insert(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// Form-encoded representation, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

/// Derive the backend query for a filter state.
///
/// Facets at their "no filter" value are left out entirely. The query
/// type, sort and contract year are always present. Excluded rows are
/// a client-side concern and never appear here.
pub fn compose_query(state: &FilterState) -> QueryParams {
    let mut params = QueryParams::default();

    params.insert(keys::QUERY_TYPE, state.query_type.as_str());
    params.insert(keys::SORT, state.sort.to_wire());
    params.insert(keys::CONTRACT_YEAR, state.contract_year.as_str());

    if !state.search_term.is_empty() {
        params.insert(keys::SEARCH_TERM, state.search_term.as_str());
    }
    if !state.schedule.is_empty() {
        params.insert(keys::SCHEDULE, state.schedule.as_str());
    }
    if !state.education.is_empty() {
        let levels: Vec<&str> = state.education.iter().map(|level| level.as_str()).collect();
        params.insert(keys::EDUCATION, levels.join(","));
    }
    if let Some(years) = state.min_experience {
        params.insert(keys::MIN_EXPERIENCE, years.to_string());
    }
    if let Some(years) = state.max_experience {
        params.insert(keys::MAX_EXPERIENCE, years.to_string());
    }
    if let Some(price) = state.min_price {
        params.insert(keys::MIN_PRICE, price.to_string());
    }
    if let Some(price) = state.max_price {
        params.insert(keys::MAX_PRICE, price.to_string());
    }
    if !state.site.as_str().is_empty() {
        params.insert(keys::SITE, state.site.as_str());
    }
    if !state.business_size.as_str().is_empty() {
        params.insert(keys::BUSINESS_SIZE, state.business_size.as_str());
    }
    if state.page > 0 {
        // Backend pages start at 1
        params.insert(keys::PAGE, (state.page + 1).to_string());
    }

    params
}

/// Query for `/search` autocomplete: only the term and the match mode.
pub fn compose_search_query(state: &FilterState) -> QueryParams {
    let mut params = QueryParams::default();
    params.insert(keys::QUERY_TYPE, state.query_type.as_str());
    if !state.search_term.is_empty() {
        params.insert(keys::SEARCH_TERM, state.search_term.as_str());
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BusinessSize, EducationLevel, QueryType, RowId, Site};

    #[test]
    fn test_empty_schedule_is_omitted() {
        let state = FilterState {
            query_type: QueryType::MatchExact,
            ..FilterState::default()
        };
        let params = compose_query(&state);

        assert!(!params.contains_key(keys::SCHEDULE));
        assert!(!params.contains_key(keys::SEARCH_TERM));
        assert_eq!(params.get(keys::QUERY_TYPE), Some("match_exact"));
    }

    #[test]
    fn test_defaults_only_send_always_present_keys() {
        let params = compose_query(&FilterState::default());
        let sent: Vec<_> = params.iter().map(|(key, _)| key).collect();
        assert_eq!(sent, vec![keys::CONTRACT_YEAR, keys::QUERY_TYPE, keys::SORT]);
    }

    #[test]
    fn test_all_facets() {
        let mut state = FilterState {
            schedule: "GS-35F".to_string(),
            query_type: QueryType::MatchPhrase,
            search_term: "software engineer".to_string(),
            education: vec![EducationLevel::Bachelors, EducationLevel::Masters],
            min_experience: Some(2),
            max_experience: Some(10),
            min_price: Some(50.0),
            max_price: Some(150.5),
            site: Site::Customer,
            business_size: BusinessSize::Small,
            page: 2,
            ..FilterState::default()
        };
        state.excluded_ids.insert(RowId(7));

        let params = compose_query(&state);
        assert_eq!(params.get(keys::SCHEDULE), Some("GS-35F"));
        assert_eq!(params.get(keys::SEARCH_TERM), Some("software engineer"));
        assert_eq!(params.get(keys::EDUCATION), Some("BA,MA"));
        assert_eq!(params.get(keys::MIN_EXPERIENCE), Some("2"));
        assert_eq!(params.get(keys::MAX_EXPERIENCE), Some("10"));
        assert_eq!(params.get(keys::MIN_PRICE), Some("50"));
        assert_eq!(params.get(keys::MAX_PRICE), Some("150.5"));
        assert_eq!(params.get(keys::SITE), Some("customer"));
        assert_eq!(params.get(keys::BUSINESS_SIZE), Some("s"));
        assert_eq!(params.get(keys::PAGE), Some("3"));
        assert!(params.iter().all(|(key, _)| !key.contains("exclude")));
    }

    #[test]
    fn test_excluded_ids_never_change_the_query() {
        let state = FilterState::default();
        let mut excluded = state.clone();
        excluded.excluded_ids.extend([RowId(1), RowId(2)]);
        assert_eq!(compose_query(&state), compose_query(&excluded));
    }

    #[test]
    fn test_query_string_is_form_encoded() {
        let state = FilterState {
            search_term: "r&d lead".to_string(),
            ..FilterState::default()
        };
        assert_eq!(
            compose_query(&state).to_query_string(),
            "contract-year=current&q=r%26d+lead&query_type=match_all&sort=current_price"
        );
    }

    #[test]
    fn test_search_query_only_carries_term_and_mode() {
        let state = FilterState {
            schedule: "MOBIS".to_string(),
            search_term: "analyst".to_string(),
            ..FilterState::default()
        };
        let params = compose_search_query(&state);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get(keys::SEARCH_TERM), Some("analyst"));
        assert!(compose_search_query(&FilterState::default()).get(keys::SEARCH_TERM).is_none());
    }
}
