//! Configuration validation.
//!
//! # Responsibilities
//! - Reject route patterns the router cannot honor
//! - Detect duplicate routes (after trailing slash normalization)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<PatternError>>
//! - Runs before config is accepted into the system

use std::collections::HashMap;

use crate::config::schema::RouterConfig;
use crate::routing::path::normalize_trailing_slash;
use crate::routing::pattern::{validate_pattern, PatternError};

/// Validate every route in the configuration.
pub fn validate_config<T>(config: &RouterConfig<T>) -> Result<(), Vec<PatternError>> {
    let mut errors = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (index, route) in config.routes.iter().enumerate() {
        if let Err(e) = validate_pattern(&route.path) {
            errors.push(e);
            continue;
        }

        let key = normalize_trailing_slash(&route.path, config.strict_trailing_slash).to_string();
        if let Some(first) = seen.get(&key) {
            errors.push(PatternError::Duplicate {
                pattern: key,
                first: format!("routes[{first}]"),
                second: format!("routes[{index}]"),
            });
        } else {
            seen.insert(key, index);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteEntry;

    fn config(paths: &[&str], strict: bool) -> RouterConfig<()> {
        RouterConfig {
            strict_trailing_slash: strict,
            routes: paths.iter().map(|p| RouteEntry::new(*p, ())).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&config(&["/", "/a/:id", "/files/**:rest"], false)).is_ok());
    }

    #[test]
    fn test_duplicate_after_normalization() {
        let errors = validate_config(&config(&["/a", "/b", "/a/"], false)).unwrap_err();
        assert_eq!(
            errors,
            vec![PatternError::Duplicate {
                pattern: "/a".into(),
                first: "routes[0]".into(),
                second: "routes[2]".into(),
            }]
        );
    }

    #[test]
    fn test_strict_slash_keeps_routes_distinct() {
        assert!(validate_config(&config(&["/a", "/a/"], true)).is_ok());
    }
}
