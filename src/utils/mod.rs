//! Utility functions and helpers.

pub mod http;

use url::Url;

use crate::error::Result;
use crate::query::QueryParams;

/// Join an API base and a path, appending form-encoded parameters.
///
/// The path is appended verbatim so a base with its own path prefix
/// (e.g. `/api`) keeps it.
pub fn api_url(base: &str, path: &str, params: Option<&QueryParams>) -> Result<Url> {
    let mut url = Url::parse(&format!("{}{}", base.trim_end_matches('/'), path))?;
    if let Some(params) = params.filter(|params| !params.is_empty()) {
        url.set_query(Some(&params.to_query_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilterState;
    use crate::query::compose_query;

    #[test]
    fn test_api_url_keeps_base_path() {
        let url = api_url("https://calc.example.gov/api/", "/schedules", None).unwrap();
        assert_eq!(url.as_str(), "https://calc.example.gov/api/schedules");
    }

    #[test]
    fn test_api_url_with_params() {
        let mut state = FilterState::default();
        state.schedule = "GS-35F".to_string();
        let params = compose_query(&state);

        let url = api_url("http://localhost:8000/api", "/rates", Some(&params)).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/rates?contract-year=current&query_type=match_all&schedule=GS-35F&sort=current_price"
        );
    }

    #[test]
    fn test_api_url_rejects_garbage_base() {
        assert!(api_url("::nope", "/rates", None).is_err());
    }
}
