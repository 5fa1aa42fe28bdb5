use regex::Regex;

use crate::models::{NewWorker, WorkerUpdate};
use crate::utils::ApiError;

pub fn validate_email(email: &str) -> bool {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .map(|re| re.is_match(email))
        .unwrap_or(false)
}

pub fn validate_rating(rating: f64) -> bool {
    (0.0..=5.0).contains(&rating)
}

fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{} is required", field)));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), ApiError> {
    if !validate_email(email.trim()) {
        return Err(ApiError::bad_request("Invalid email"));
    }
    Ok(())
}

fn check_rating(rating: f64) -> Result<(), ApiError> {
    if !validate_rating(rating) {
        return Err(ApiError::bad_request("Rating must be between 0 and 5"));
    }
    Ok(())
}

pub fn validate_new_worker(dto: &NewWorker) -> Result<(), ApiError> {
    require_text("Name", &dto.name)?;
    require_text("Specialization", &dto.specialization)?;
    check_email(&dto.email)?;
    check_rating(dto.rating)
}

pub fn validate_worker_update(dto: &WorkerUpdate) -> Result<(), ApiError> {
    if let Some(ref name) = dto.name {
        require_text("Name", name)?;
    }
    if let Some(ref specialization) = dto.specialization {
        require_text("Specialization", specialization)?;
    }
    if let Some(ref email) = dto.email {
        check_email(email)?;
    }
    if let Some(rating) = dto.rating {
        check_rating(rating)?;
    }
    Ok(())
}
