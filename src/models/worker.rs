use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use rocket_okapi::okapi::schemars::JsonSchema;
use std::str::FromStr;

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkerStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl WorkerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerStatus::Active => "active",
            WorkerStatus::Inactive => "inactive",
            WorkerStatus::Suspended => "suspended",
        }
    }
}

impl FromStr for WorkerStatus {
    type Err = String;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(WorkerStatus::Active),
            "inactive" => Ok(WorkerStatus::Inactive),
            "suspended" => Ok(WorkerStatus::Suspended),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

impl std::fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single service worker as held by the directory.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub status: WorkerStatus,
    pub rating: f64, // 0-5
    pub completed_jobs: u32,
    pub join_date: NaiveDate,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Keeps an explicit `null` apart from a missing field: `Some(None)` vs `None`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Everything a worker needs except the id, which the directory assigns.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewWorker {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    #[serde(default)]
    pub status: WorkerStatus,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub completed_jobs: u32,
    #[serde(default = "today")]
    pub join_date: NaiveDate,
    pub location: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl NewWorker {
    pub fn into_record(self, id: String) -> WorkerRecord {
        WorkerRecord {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            specialization: self.specialization,
            status: self.status,
            rating: self.rating,
            completed_jobs: self.completed_jobs,
            join_date: self.join_date,
            location: self.location,
            avatar: self.avatar,
        }
    }
}

/// Partial update. `id` and `joinDate` are immutable and have no slot here.
#[derive(Debug, Default, Deserialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub status: Option<WorkerStatus>,
    pub rating: Option<f64>,
    pub completed_jobs: Option<u32>,
    pub location: Option<String>,
    /// `null` clears the avatar; leaving the field out keeps it.
    #[serde(default, deserialize_with = "nullable")]
    #[schemars(with = "Option<String>")]
    pub avatar: Option<Option<String>>,
}

impl WorkerUpdate {
    pub fn status(status: WorkerStatus) -> Self {
        WorkerUpdate {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn apply_to(self, worker: &mut WorkerRecord) {
        if let Some(name) = self.name {
            worker.name = name;
        }
        if let Some(email) = self.email {
            worker.email = email;
        }
        if let Some(phone) = self.phone {
            worker.phone = phone;
        }
        if let Some(specialization) = self.specialization {
            worker.specialization = specialization;
        }
        if let Some(status) = self.status {
            worker.status = status;
        }
        if let Some(rating) = self.rating {
            worker.rating = rating;
        }
        if let Some(jobs) = self.completed_jobs {
            worker.completed_jobs = jobs;
        }
        if let Some(location) = self.location {
            worker.location = location;
        }
        if let Some(avatar) = self.avatar {
            worker.avatar = avatar;
        }
    }
}

/// Structured criteria. An omitted criterion always matches.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkerFilter {
    pub status: Option<WorkerStatus>,
    pub specialization: Option<String>,
    pub min_rating: Option<f64>,
}

/// Raw list/export query. `status` and `min_rating` stay strings so a value
/// that does not parse is rejected instead of being read as "not supplied".
#[derive(Debug, Default, FromForm, Deserialize, JsonSchema)]
pub struct WorkerListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub specialization: Option<String>,
    pub min_rating: Option<String>,
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl WorkerListQuery {
    pub fn search_text(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }

    /// Blank values count as omitted; anything else must parse.
    pub fn criteria(&self) -> Result<WorkerFilter, String> {
        let status = supplied(&self.status)
            .map(WorkerStatus::from_str)
            .transpose()?;

        let min_rating = supplied(&self.min_rating)
            .map(|raw| match raw.parse::<f64>() {
                Ok(rating) if !rating.is_nan() => Ok(rating),
                _ => Err(format!("min_rating must be a number, got {}", raw)),
            })
            .transpose()?;

        Ok(WorkerFilter {
            status,
            specialization: self.specialization.clone(),
            min_rating,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateStatusDto {
    pub status: WorkerStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerStats {
    pub total_workers: usize,
    pub active_workers: usize,
    pub inactive_workers: usize,
    pub suspended_workers: usize,
    pub average_rating: f64,
    pub total_completed_jobs: u64,
}

/// Downloadable report: dashboard figures plus the ranked and recent lists.
#[derive(Debug, Serialize, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerReport {
    pub generated_on: NaiveDate,
    pub stats: WorkerStats,
    pub top_performers: Vec<WorkerRecord>,
    pub recent_workers: Vec<WorkerRecord>,
}
