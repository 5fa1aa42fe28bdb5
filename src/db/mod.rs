use chrono::NaiveDate;
use log::{error, info};
use rocket::fairing::AdHoc;
use tokio::sync::RwLock;

use crate::models::{WorkerRecord, WorkerStatus};
use crate::services::{AdminSessions, WorkerDirectory};

/// Shared handle to the directory. Writers take the write lock, so
/// mutations are serialized across requests.
pub type DirectoryState = RwLock<WorkerDirectory>;

pub fn init() -> AdHoc {
    AdHoc::try_on_ignite("Worker directory", |rocket| async {
        let directory = if crate::config::Config::seed_mock_workers() {
            WorkerDirectory::with_workers(mock_workers())
        } else {
            WorkerDirectory::new()
        };
        info!("✓ Worker directory ready with {} workers", directory.len());

        let email = crate::config::Config::admin_email();
        let password = crate::config::Config::admin_password();
        match AdminSessions::new(&email, &password, crate::config::Config::bcrypt_cost()) {
            Ok(sessions) => Ok(rocket
                .manage::<DirectoryState>(RwLock::new(directory))
                .manage(sessions)),
            Err(e) => {
                error!("✗ Failed to set up admin account: {}", e);
                Err(rocket)
            }
        }
    })
}

fn worker(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    specialization: &str,
    status: WorkerStatus,
    rating: f64,
    completed_jobs: u32,
    join_date: (i32, u32, u32),
    location: &str,
) -> WorkerRecord {
    let (y, m, d) = join_date;
    WorkerRecord {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        specialization: specialization.to_string(),
        status,
        rating,
        completed_jobs,
        join_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        location: location.to_string(),
        avatar: None,
    }
}

/// The four demo workers the dashboard starts with.
pub fn mock_workers() -> Vec<WorkerRecord> {
    vec![
        worker("1", "John Smith", "john.smith@email.com", "+1234567890", "Plumbing",
            WorkerStatus::Active, 4.8, 156, (2023, 1, 15), "New York, NY"),
        worker("2", "Sarah Johnson", "sarah.johnson@email.com", "+1234567891", "Electrical",
            WorkerStatus::Active, 4.9, 203, (2022, 11, 20), "Los Angeles, CA"),
        worker("3", "Mike Davis", "mike.davis@email.com", "+1234567892", "Carpentry",
            WorkerStatus::Inactive, 4.6, 89, (2023, 3, 10), "Chicago, IL"),
        worker("4", "Emily Brown", "emily.brown@email.com", "+1234567893", "Cleaning",
            WorkerStatus::Active, 4.7, 312, (2022, 8, 5), "Houston, TX"),
    ]
}
