use chrono::NaiveDate;
use log::{info, warn};
use std::collections::HashSet;
use thiserror::Error;

use crate::models::{
    NewWorker, WorkerFilter, WorkerRecord, WorkerReport, WorkerStats, WorkerStatus, WorkerUpdate,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Worker {0} not found")]
    NotFound(String),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// In-memory worker collection. Records keep insertion order and every
/// query returns them in that order.
#[derive(Debug, Default)]
pub struct WorkerDirectory {
    workers: Vec<WorkerRecord>,
    last_id: u64,
}

impl WorkerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from existing records. Later duplicates of an id
    /// are dropped; fresh ids start after the highest numeric id present.
    pub fn with_workers(workers: Vec<WorkerRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(workers.len());

        for worker in workers {
            if seen.insert(worker.id.clone()) {
                kept.push(worker);
            } else {
                warn!("Dropping duplicate worker id {}", worker.id);
            }
        }

        let last_id = kept
            .iter()
            .filter_map(|w| w.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        WorkerDirectory { workers: kept, last_id }
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn all(&self) -> &[WorkerRecord] {
        &self.workers
    }

    fn next_id(&mut self) -> String {
        loop {
            self.last_id = self.last_id.wrapping_add(1);
            let candidate = self.last_id.to_string();
            if !self.workers.iter().any(|w| w.id == candidate) {
                return candidate;
            }
        }
    }

    fn position(&self, id: &str) -> DirectoryResult<usize> {
        self.workers
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| {
                warn!("Worker {} not found", id);
                DirectoryError::NotFound(id.to_string())
            })
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    pub fn add(&mut self, worker: NewWorker) -> WorkerRecord {
        let id = self.next_id();
        let record = worker.into_record(id);
        info!("Worker {} added ({})", record.id, record.name);
        self.workers.push(record.clone());
        record
    }

    pub fn update(&mut self, id: &str, update: WorkerUpdate) -> DirectoryResult<WorkerRecord> {
        let index = self.position(id)?;
        let worker = &mut self.workers[index];
        update.apply_to(worker);
        info!("Worker {} updated", id);
        Ok(worker.clone())
    }

    pub fn set_status(&mut self, id: &str, status: WorkerStatus) -> DirectoryResult<WorkerRecord> {
        self.update(id, WorkerUpdate::status(status))
    }

    pub fn remove(&mut self, id: &str) -> DirectoryResult<WorkerRecord> {
        let index = self.position(id)?;
        let removed = self.workers.remove(index);
        info!("Worker {} removed", id);
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn get_by_id(&self, id: &str) -> Option<&WorkerRecord> {
        self.workers.iter().find(|w| w.id == id)
    }

    /// Case-insensitive substring search over name, email, specialization
    /// and location. A blank query returns every record.
    pub fn search(&self, query: &str) -> Vec<&WorkerRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.all().iter().collect();
        }

        self.workers
            .iter()
            .filter(|w| matches_text(w, &needle))
            .collect()
    }

    pub fn filter(&self, criteria: &WorkerFilter) -> Vec<&WorkerRecord> {
        self.workers
            .iter()
            .filter(|w| matches_criteria(w, criteria))
            .collect()
    }

    /// Search first, then narrow the hits with the structured criteria.
    pub fn composed_query(&self, query: &str, criteria: &WorkerFilter) -> Vec<&WorkerRecord> {
        if query.trim().is_empty() {
            return self.filter(criteria);
        }

        self.search(query)
            .into_iter()
            .filter(|w| matches_criteria(w, criteria))
            .collect()
    }

    // ------------------------------------------------------------------
    // Reporting
    // ------------------------------------------------------------------

    pub fn stats(&self) -> WorkerStats {
        let count = |status: WorkerStatus| self.workers.iter().filter(|w| w.status == status).count();
        let total = self.workers.len();

        let average_rating = if total > 0 {
            self.workers.iter().map(|w| w.rating).sum::<f64>() / total as f64
        } else {
            0.0
        };

        WorkerStats {
            total_workers: total,
            active_workers: count(WorkerStatus::Active),
            inactive_workers: count(WorkerStatus::Inactive),
            suspended_workers: count(WorkerStatus::Suspended),
            average_rating,
            total_completed_jobs: self.workers.iter().map(|w| u64::from(w.completed_jobs)).sum(),
        }
    }

    /// Distinct specializations in first-seen order.
    pub fn specializations(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.workers
            .iter()
            .filter(|w| seen.insert(w.specialization.as_str()))
            .map(|w| w.specialization.clone())
            .collect()
    }

    pub fn recent(&self, limit: usize) -> Vec<&WorkerRecord> {
        self.workers.iter().take(limit).collect()
    }

    /// Highest rated first; equal ratings keep stored order.
    pub fn top_performers(&self, limit: usize) -> Vec<&WorkerRecord> {
        let mut ranked: Vec<&WorkerRecord> = self.workers.iter().collect();
        ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        ranked.truncate(limit);
        ranked
    }

    pub fn report(&self, limit: usize, generated_on: NaiveDate) -> WorkerReport {
        WorkerReport {
            generated_on,
            stats: self.stats(),
            top_performers: self.top_performers(limit).into_iter().cloned().collect(),
            recent_workers: self.recent(limit).into_iter().cloned().collect(),
        }
    }
}

fn matches_text(worker: &WorkerRecord, needle: &str) -> bool {
    [
        &worker.name,
        &worker.email,
        &worker.specialization,
        &worker.location,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

fn matches_criteria(worker: &WorkerRecord, criteria: &WorkerFilter) -> bool {
    let status_match = criteria.status.is_none_or(|status| worker.status == status);

    let specialization_match = match criteria.specialization.as_deref().map(str::trim) {
        Some(spec) if !spec.is_empty() => worker.specialization == spec,
        _ => true,
    };

    let rating_match = match criteria.min_rating {
        Some(min) if !min.is_nan() => worker.rating >= min,
        _ => true,
    };

    status_match && specialization_match && rating_match
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::mock_workers;
    use chrono::NaiveDate;

    fn seeded() -> WorkerDirectory {
        WorkerDirectory::with_workers(mock_workers())
    }

    fn names(workers: &[&WorkerRecord]) -> Vec<String> {
        workers.iter().map(|w| w.name.clone()).collect()
    }

    fn ann_lee() -> NewWorker {
        NewWorker {
            name: "Ann Lee".to_string(),
            email: "ann.lee@email.com".to_string(),
            phone: "+1234567894".to_string(),
            specialization: "Painting".to_string(),
            status: WorkerStatus::Active,
            rating: 4.2,
            completed_jobs: 12,
            join_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            location: "Seattle, WA".to_string(),
            avatar: None,
        }
    }

    #[test]
    fn add_assigns_unique_ids() {
        let mut dir = seeded();
        let mut ids: HashSet<String> = dir.all().iter().map(|w| w.id.clone()).collect();

        for _ in 0..20 {
            let added = dir.add(ann_lee());
            assert!(ids.insert(added.id), "duplicate id issued");
        }
        assert_eq!(dir.len(), 24);
    }

    #[test]
    fn seeded_max_id_does_not_overflow_the_counter() {
        let mut workers = mock_workers();
        workers[0].id = u64::MAX.to_string();
        let mut dir = WorkerDirectory::with_workers(workers);

        let first = dir.add(ann_lee());
        let second = dir.add(ann_lee());
        let ids: HashSet<&str> = dir.all().iter().map(|w| w.id.as_str()).collect();

        assert_ne!(first.id, second.id);
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn fresh_ids_start_after_highest_numeric_id() {
        let mut workers = mock_workers();
        workers[3].id = "5".to_string();
        let mut dir = WorkerDirectory::with_workers(workers);

        let added = dir.add(ann_lee());
        assert_eq!(added.id, "6");
    }

    #[test]
    fn with_workers_drops_duplicate_ids() {
        let mut workers = mock_workers();
        workers[1].id = "1".to_string();
        let dir = WorkerDirectory::with_workers(workers);

        assert_eq!(dir.len(), 3);
        assert_eq!(dir.get_by_id("1").map(|w| w.name.as_str()), Some("John Smith"));
    }

    #[test]
    fn added_record_round_trips_through_lookup() {
        let mut dir = seeded();
        let input = ann_lee();
        let added = dir.add(input.clone());

        let found = dir.get_by_id(&added.id).cloned();
        assert_eq!(found, Some(input.into_record(added.id.clone())));
        assert_eq!(dir.all().last().map(|w| w.id.as_str()), Some(added.id.as_str()));
    }

    #[test]
    fn blank_search_returns_everything_in_order() {
        let dir = seeded();
        let all: Vec<&WorkerRecord> = dir.all().iter().collect();

        assert_eq!(dir.search(""), all);
        assert_eq!(dir.search("   "), all);
    }

    #[test]
    fn search_is_case_insensitive() {
        let dir = seeded();
        assert_eq!(dir.search("john"), dir.search("JOHN"));
        assert_eq!(names(&dir.search("john")), vec!["John Smith", "Sarah Johnson"]);
    }

    #[test]
    fn search_covers_each_searchable_field() {
        let dir = seeded();
        assert_eq!(names(&dir.search("carpentry")), vec!["Mike Davis"]);
        assert_eq!(names(&dir.search("houston")), vec!["Emily Brown"]);
        assert_eq!(names(&dir.search("sarah.johnson@")), vec!["Sarah Johnson"]);
        // phone is not searchable
        assert!(dir.search("+1234567890").is_empty());
    }

    #[test]
    fn filter_by_status() {
        let dir = seeded();
        let active = dir.filter(&WorkerFilter {
            status: Some(WorkerStatus::Active),
            ..Default::default()
        });

        assert_eq!(active.len(), 3);
        assert!(active.iter().all(|w| w.status == WorkerStatus::Active));
        assert_eq!(dir.filter(&WorkerFilter::default()).len(), 4);
    }

    #[test]
    fn filter_by_min_rating_is_inclusive() {
        let dir = seeded();
        let top = dir.filter(&WorkerFilter {
            min_rating: Some(4.8),
            ..Default::default()
        });

        assert_eq!(names(&top), vec!["John Smith", "Sarah Johnson"]);
    }

    #[test]
    fn filter_specialization_is_exact_and_blank_is_ignored() {
        let dir = seeded();
        let exact = |spec: &str| {
            dir.filter(&WorkerFilter {
                specialization: Some(spec.to_string()),
                ..Default::default()
            })
            .len()
        };

        assert_eq!(exact("Plumbing"), 1);
        assert_eq!(exact(" Plumbing "), 1);
        assert_eq!(exact("plumbing"), 0);
        assert_eq!(exact("Plumb"), 0);
        assert_eq!(exact("  "), 4);
    }

    #[test]
    fn filter_combines_criteria_with_and() {
        let dir = seeded();
        let hits = dir.filter(&WorkerFilter {
            status: Some(WorkerStatus::Active),
            specialization: Some("Carpentry".to_string()),
            min_rating: None,
        });
        assert!(hits.is_empty());
    }

    #[test]
    fn composed_query_narrows_search_results() {
        let dir = seeded();
        let criteria = WorkerFilter {
            status: Some(WorkerStatus::Active),
            ..Default::default()
        };

        let hits = dir.composed_query("a", &criteria);
        assert_eq!(names(&hits), vec!["John Smith", "Sarah Johnson", "Emily Brown"]);

        let searched = dir.search("a");
        assert!(searched.iter().any(|w| w.name == "Mike Davis"));
        assert!(hits.iter().all(|w| searched.contains(w)));
    }

    #[test]
    fn composed_query_is_subset_of_search() {
        let dir = seeded();
        let criteria = WorkerFilter {
            min_rating: Some(4.7),
            ..Default::default()
        };

        for query in ["", "e", "SMITH", "ny", "zzz"] {
            let searched = dir.search(query);
            for hit in dir.composed_query(query, &criteria) {
                assert!(searched.contains(&hit));
            }
        }
    }

    #[test]
    fn update_merges_only_supplied_fields() {
        let mut dir = seeded();
        let before = dir.get_by_id("3").cloned().unwrap();

        dir.update(
            "3",
            WorkerUpdate {
                rating: Some(5.0),
                ..Default::default()
            },
        )
        .unwrap();

        let after = dir.get_by_id("3").cloned().unwrap();
        assert_eq!(after.rating, 5.0);
        assert_eq!(WorkerRecord { rating: before.rating, ..after }, before);
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let mut dir = seeded();
        let err = dir.update("99", WorkerUpdate::default()).unwrap_err();
        assert_eq!(err, DirectoryError::NotFound("99".to_string()));
    }

    #[test]
    fn any_status_can_move_to_any_other() {
        let mut dir = seeded();
        for status in [WorkerStatus::Suspended, WorkerStatus::Inactive, WorkerStatus::Active] {
            let updated = dir.set_status("2", status).unwrap();
            assert_eq!(updated.status, status);
        }
    }

    #[test]
    fn remove_then_lookup_is_absent_and_second_remove_fails() {
        let mut dir = seeded();
        let removed = dir.remove("2").unwrap();

        assert_eq!(removed.name, "Sarah Johnson");
        assert!(dir.get_by_id("2").is_none());
        assert_eq!(dir.remove("2"), Err(DirectoryError::NotFound("2".to_string())));
        assert_eq!(dir.len(), 3);
    }

    #[test]
    fn removed_ids_are_not_reissued() {
        let mut dir = seeded();
        dir.remove("4").unwrap();
        let added = dir.add(ann_lee());
        assert_eq!(added.id, "5");
    }

    #[test]
    fn stats_over_seed() {
        let stats = seeded().stats();

        assert_eq!(stats.total_workers, 4);
        assert_eq!(stats.active_workers, 3);
        assert_eq!(stats.inactive_workers, 1);
        assert_eq!(stats.suspended_workers, 0);
        assert!((stats.average_rating - 4.75).abs() < 1e-9);
        assert_eq!(stats.total_completed_jobs, 760);
    }

    #[test]
    fn stats_on_empty_directory() {
        let stats = WorkerDirectory::new().stats();
        assert_eq!(stats.total_workers, 0);
        assert_eq!(stats.average_rating, 0.0);
    }

    #[test]
    fn specializations_are_distinct() {
        let mut dir = seeded();
        let mut extra = ann_lee();
        extra.specialization = "Plumbing".to_string();
        dir.add(extra);

        assert_eq!(
            dir.specializations(),
            vec!["Plumbing", "Electrical", "Carpentry", "Cleaning"]
        );
    }

    #[test]
    fn top_performers_rank_by_rating() {
        let dir = seeded();
        assert_eq!(
            names(&dir.top_performers(3)),
            vec!["Sarah Johnson", "John Smith", "Emily Brown"]
        );
        assert_eq!(names(&dir.recent(2)), vec!["John Smith", "Sarah Johnson"]);
    }

    #[test]
    fn report_bundles_stats_with_ranked_and_recent_lists() {
        let dir = seeded();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let report = dir.report(2, date);

        assert_eq!(report.generated_on, date);
        assert_eq!(report.stats, dir.stats());
        assert_eq!(report.top_performers[0].name, "Sarah Johnson");
        assert_eq!(report.top_performers.len(), 2);
        assert_eq!(report.recent_workers[0].name, "John Smith");
    }
}
