/// Navigation targets. These are the same paths the web console exposed, so a
/// route can be handed in from the command line or printed in the header.
use crate::exceptions::GenericError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    WorkerDetail(String),
    TaskHistory(String),
    Screenshots(String),
    Profile,
}

impl Route {
    /// Worker the page is scoped to, if any
    pub fn worker_id(&self) -> Option<&str> {
        match self {
            Self::WorkerDetail(id) | Self::TaskHistory(id) | Self::Screenshots(id) => Some(id),
            Self::Dashboard | Self::Profile => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::WorkerDetail(_) => "Worker",
            Self::TaskHistory(_) => "Task History",
            Self::Screenshots(_) => "Screenshots",
            Self::Profile => "Profile",
        }
    }
}

impl FromStr for Route {
    type Err = GenericError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Ok(Self::Dashboard),
            ["profile"] => Ok(Self::Profile),
            ["workers", id] => Ok(Self::WorkerDetail(id.to_string())),
            ["workers", id, "tasks"] => Ok(Self::TaskHistory(id.to_string())),
            ["workers", id, "screenshots"] => Ok(Self::Screenshots(id.to_string())),
            _ => Err(GenericError::UnknownRoute(path.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dashboard => write!(f, "/"),
            Self::WorkerDetail(id) => write!(f, "/workers/{id}"),
            Self::TaskHistory(id) => write!(f, "/workers/{id}/tasks"),
            Self::Screenshots(id) => write!(f, "/workers/{id}/screenshots"),
            Self::Profile => write!(f, "/profile"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_routes() {
        assert_eq!("/".parse::<Route>().unwrap(), Route::Dashboard);
        assert_eq!("/profile".parse::<Route>().unwrap(), Route::Profile);
        assert_eq!(
            "/workers/wk_01".parse::<Route>().unwrap(),
            Route::WorkerDetail("wk_01".to_string())
        );
        assert_eq!(
            "/workers/wk_01/tasks/".parse::<Route>().unwrap(),
            Route::TaskHistory("wk_01".to_string())
        );
        assert_eq!(
            "/workers/wk_01/screenshots".parse::<Route>().unwrap(),
            Route::Screenshots("wk_01".to_string())
        );
    }

    #[test]
    fn test_display_matches_parse() {
        let routes = [
            Route::Dashboard,
            Route::Profile,
            Route::WorkerDetail("wk_02".to_string()),
            Route::TaskHistory("wk_02".to_string()),
            Route::Screenshots("wk_02".to_string()),
        ];
        for route in routes {
            assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
        }
    }

    #[test]
    fn test_unknown_route() {
        assert_eq!(
            "/workers".parse::<Route>(),
            Err(GenericError::UnknownRoute("/workers".to_string()))
        );
        assert!("/workers/wk_01/logs".parse::<Route>().is_err());
    }
}
