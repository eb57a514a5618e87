use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use url::form_urlencoded;

use super::{format, ApiClient};
use crate::error::{ClientError, ClientResult};

/// Backend collections the dashboard pages read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Leads,
    Students,
    Batches,
    Courses,
    Users,
    AttendanceSessions,
    Exams,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Leads,
        Resource::Students,
        Resource::Batches,
        Resource::Courses,
        Resource::Users,
        Resource::AttendanceSessions,
        Resource::Exams,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Resource::Leads => "/api/v1/leads",
            Resource::Students => "/api/v1/students",
            Resource::Batches => "/api/v1/batches",
            Resource::Courses => "/api/v1/courses",
            Resource::Users => "/api/v1/users",
            Resource::AttendanceSessions => "/api/v1/attendance/sessions",
            Resource::Exams => "/api/v1/exams",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Leads => "leads",
            Resource::Students => "students",
            Resource::Batches => "batches",
            Resource::Courses => "courses",
            Resource::Users => "users",
            Resource::AttendanceSessions => "attendance",
            Resource::Exams => "exams",
        }
    }

    /// Path of one record; the id is encoded as a single path segment
    pub fn item_path(&self, id: &str) -> ClientResult<String> {
        if id.is_empty() || id == "." || id == ".." {
            return Err(ClientError::validation(format!("Invalid record id '{}'", id)));
        }
        let encoded: String = form_urlencoded::byte_serialize(id.as_bytes()).collect();
        Ok(format!("{}/{}", self.path(), encoded.replace('+', "%20")))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "attendance-sessions" | "attendance_sessions" => Ok(Resource::AttendanceSessions),
            name => Resource::ALL
                .into_iter()
                .find(|r| r.name() == name)
                .ok_or_else(|| ClientError::validation(format!("Unknown resource '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub page_size: u32,
}

impl Page {
    pub fn query(&self) -> String {
        format!("page={}&pageSize={}", self.page, self.page_size)
    }
}

pub fn list_target(resource: Resource, page: Option<Page>) -> String {
    match page {
        Some(page) => format!("{}?{}", resource.path(), page.query()),
        None => resource.path().to_string(),
    }
}

pub async fn list(client: &ApiClient, resource: Resource, page: Option<Page>) -> ClientResult<Value> {
    let response = client.get(&list_target(resource, page)).await?;
    format::expect_success_or_reason(response).await
}

pub async fn get(client: &ApiClient, resource: Resource, id: &str) -> ClientResult<Value> {
    let response = client.get(&resource.item_path(id)?).await?;
    format::expect_success_or_reason(response).await
}
