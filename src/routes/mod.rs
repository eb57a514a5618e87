//! Dashboard routes and the guard deciding which shell may render them.

mod guard;

pub use guard::{guard, RouteDecision, Shell};

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    Leads,
    LeadBoard,
    Lead(String),
    Students,
    Student(String),
    Batches,
    Batch(String),
    Courses,
    Attendance,
}

impl Route {
    /// Match a location path. Unknown paths fall through to `Home`.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["leads"] => Route::Leads,
            ["leads", "board"] => Route::LeadBoard,
            ["leads", id] => Route::Lead(id.to_string()),
            ["students"] => Route::Students,
            ["students", id] => Route::Student(id.to_string()),
            ["batches"] => Route::Batches,
            ["batches", id] => Route::Batch(id.to_string()),
            ["courses"] => Route::Courses,
            ["attendance"] => Route::Attendance,
            _ => Route::Home,
        }
    }

    /// Login and registration render in the unauthenticated shell
    pub fn is_auth_route(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    pub fn is_protected(&self) -> bool {
        !self.is_auth_route()
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Home => "/".to_string(),
            Route::Leads => "/leads".to_string(),
            Route::LeadBoard => "/leads/board".to_string(),
            Route::Lead(id) => format!("/leads/{}", id),
            Route::Students => "/students".to_string(),
            Route::Student(id) => format!("/students/{}", id),
            Route::Batches => "/batches".to_string(),
            Route::Batch(id) => format!("/batches/{}", id),
            Route::Courses => "/courses".to_string(),
            Route::Attendance => "/attendance".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
