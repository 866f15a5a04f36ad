//! Named actions and the reducer that applies them.
//!
//! Reducers take the state by value and return the next state. They never
//! fail: every action carries already-validated values.

use crate::models::{
    BusinessSize, ContractYear, EducationLevel, FilterState, QueryType, RatesResponse, RowId,
    Site, SortColumn, normalize_education,
};
use crate::store::exclusion;

/// A state transition requested by the presentation layer or the fetch loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetSchedule(String),
    SetQueryType(QueryType),
    SetSearchTerm(String),
    SetEducation(Vec<EducationLevel>),
    SetExperienceRange {
        min: Option<u32>,
        max: Option<u32>,
    },
    SetPriceRange {
        min: Option<f64>,
        max: Option<f64>,
    },
    SetSite(Site),
    SetBusinessSize(BusinessSize),
    SetContractYear(ContractYear),
    /// Sort by a column, flipping direction if it is already sorted
    ToggleSort(SortColumn),
    SetPage(u32),
    /// Every facet back to its default; exclusions and results kept
    ResetFilters,

    /// Hide a row from view
    ExcludeRow(RowId),
    /// Bring every hidden row back
    RestoreExcluded,

    /// Replace the raw result set wholesale
    ReceiveResults(RatesResponse),
    /// Record a fetch failure; existing results stay
    ReceiveError(String),
}

impl Action {
    /// Whether applying this action can change the composed query.
    pub fn affects_query(&self) -> bool {
        !matches!(
            self,
            Action::ExcludeRow(_)
                | Action::RestoreExcluded
                | Action::ReceiveResults(_)
                | Action::ReceiveError(_)
        )
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetSchedule(_) => "setSchedule",
            Action::SetQueryType(_) => "setQueryType",
            Action::SetSearchTerm(_) => "setSearchTerm",
            Action::SetEducation(_) => "setEducation",
            Action::SetExperienceRange { .. } => "setExperienceRange",
            Action::SetPriceRange { .. } => "setPriceRange",
            Action::SetSite(_) => "setSite",
            Action::SetBusinessSize(_) => "setBusinessSize",
            Action::SetContractYear(_) => "setContractYear",
            Action::ToggleSort(_) => "toggleSort",
            Action::SetPage(_) => "setPage",
            Action::ResetFilters => "resetFilters",
            Action::ExcludeRow(_) => "excludeRow",
            Action::RestoreExcluded => "restoreExcluded",
            Action::ReceiveResults(_) => "receiveResults",
            Action::ReceiveError(_) => "receiveError",
        }
    }
}

/// Filter state plus whatever the last fetch produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreState {
    pub filters: FilterState,

    /// Last successfully fetched response
    pub results: RatesResponse,

    /// Message of the last failed fetch, cleared by the next success
    pub error: Option<String>,

    /// A request is outstanding
    pub loading: bool,
}

impl StoreState {
    pub fn new(filters: FilterState) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }
}

/// Apply one action.
pub fn reduce(mut state: StoreState, action: Action) -> StoreState {
    let filters = &mut state.filters;

    // Any facet change other than paging starts over on the first page
    if action.affects_query() && !matches!(action, Action::SetPage(_)) {
        filters.page = 0;
    }

    match action {
        Action::SetSchedule(schedule) => filters.schedule = schedule,
        Action::SetQueryType(query_type) => filters.query_type = query_type,
        Action::SetSearchTerm(term) => filters.search_term = term,
        Action::SetEducation(levels) => filters.education = normalize_education(levels),
        Action::SetExperienceRange { min, max } => {
            filters.min_experience = min;
            filters.max_experience = max;
        }
        Action::SetPriceRange { min, max } => {
            filters.min_price = min;
            filters.max_price = max;
        }
        Action::SetSite(site) => filters.site = site,
        Action::SetBusinessSize(size) => filters.business_size = size,
        Action::SetContractYear(year) => filters.contract_year = year,
        Action::ToggleSort(column) => filters.sort = filters.sort.toggled(column),
        Action::SetPage(page) => filters.page = page,
        Action::ResetFilters => {
            let excluded = std::mem::take(&mut filters.excluded_ids);
            *filters = FilterState {
                query_type: filters.query_type,
                sort: filters.sort,
                excluded_ids: excluded,
                ..FilterState::default()
            };
        }
        Action::ExcludeRow(id) => {
            exclusion::exclude(&mut filters.excluded_ids, id);
        }
        Action::RestoreExcluded => {
            exclusion::restore_all(&mut filters.excluded_ids);
        }
        Action::ReceiveResults(response) => {
            state.results = response;
            state.error = None;
            state.loading = false;
        }
        Action::ReceiveError(message) => {
            state.error = Some(message);
            state.loading = false;
        }
    }

    state
}
