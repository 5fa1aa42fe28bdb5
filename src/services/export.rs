use crate::models::{WorkerRecord, WorkerReport};

pub const CSV_HEADER: [&str; 9] = [
    "Name",
    "Email",
    "Phone",
    "Specialization",
    "Status",
    "Rating",
    "Completed Jobs",
    "Location",
    "Join Date",
];

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|f| csv_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders workers as CSV, one header row then one row per worker.
pub fn to_csv(workers: &[&WorkerRecord]) -> String {
    let mut lines = vec![csv_row(CSV_HEADER)];

    for w in workers {
        lines.push(csv_row([
            w.name.clone(),
            w.email.clone(),
            w.phone.clone(),
            w.specialization.clone(),
            w.status.to_string(),
            w.rating.to_string(),
            w.completed_jobs.to_string(),
            w.location.clone(),
            w.join_date.format("%Y-%m-%d").to_string(),
        ]));
    }

    lines.join("\n")
}

pub fn to_json(workers: &[&WorkerRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(workers)
}

pub fn report_to_json(report: &WorkerReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Download name for a report, e.g. `workers-report-2024-05-01.json`.
pub fn report_file_name(report: &WorkerReport) -> String {
    format!("workers-report-{}.json", report.generated_on.format("%Y-%m-%d"))
}
