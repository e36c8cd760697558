//! Structured logging helpers
//!
//! Filter construction for the tracing subscriber and correlation IDs for
//! analysis requests.

pub mod middleware;

pub use middleware::{generate_request_id, http_trace_layer};

/// Build filter directives string from LoggingConfig
///
/// # Returns
///
/// A filter string in the format: "base_level,higgs::component1=level1,higgs::component2=level2"
///
/// # Examples
///
/// ```
/// use higgs::config::{LogFormat, LoggingConfig};
/// use higgs::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("session".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,higgs::session=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",higgs::{}={}", component, level));
        }
    }

    filter_str
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogFormat, LoggingConfig};
    use std::collections::HashMap;

    #[test]
    fn test_filter_without_components() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            format: LogFormat::Json,
            component_levels: None,
        };
        assert_eq!(build_filter_directives(&config), "warn");
    }

    #[test]
    fn test_filter_components_in_stable_order() {
        let mut levels = HashMap::new();
        levels.insert("session".to_string(), "trace".to_string());
        levels.insert("analysis".to_string(), "debug".to_string());

        let config = LoggingConfig {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: Some(levels),
        };
        assert_eq!(
            build_filter_directives(&config),
            "info,higgs::analysis=debug,higgs::session=trace"
        );
    }
}
