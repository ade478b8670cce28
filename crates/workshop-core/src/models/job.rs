//! Service Job
//!
//! The only scheduled resource: it has a calendar view, and its date and
//! time inputs are submitted as one `scheduledAt` timestamp.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{seed, seed_optional};
use crate::calendar::Scheduled;
use crate::display::{Cell, Tabular};
use crate::entity::{Entity, Listable};
use crate::form::{DateTimeJoin, Editable, FieldKind, FieldSpec, FormSchema};
use crate::format;
use crate::line_item::LineItem;
use crate::status::Status;

pub const STATUS_CHOICES: &[&str] = &["SCHEDULED", "IN_PROGRESS", "ON_HOLD", "COMPLETED", "CANCELLED"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: u32,
    pub job_number: String,
    pub customer_id: u32,
    pub vehicle_id: u32,
    pub description: String,
    pub status: Status,
    pub scheduled_at: NaiveDateTime,
    pub technician: Option<String>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub total: Decimal,
    pub notes: Option<String>,
}

impl Entity for Job {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn title(&self) -> String {
        format!("Job {}", self.job_number)
    }
}

impl Listable for Job {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.job_number.as_str(), self.description.as_str()];
        if let Some(tech) = &self.technician {
            fields.push(tech);
        }
        fields
    }

    fn status(&self) -> Option<Status> {
        Some(self.status)
    }
}

impl Scheduled for Job {
    fn scheduled_at(&self) -> Option<NaiveDateTime> {
        Some(self.scheduled_at)
    }
}

static SCHEMA: FormSchema = FormSchema {
    resource: "job",
    fields: &[
        FieldSpec::new("jobNumber", "Job Number", FieldKind::Text),
        FieldSpec::new("customerId", "Customer", FieldKind::Reference).required(),
        FieldSpec::new("vehicleId", "Vehicle", FieldKind::Reference).required(),
        FieldSpec::new("description", "Description", FieldKind::Text).required(),
        FieldSpec::new("status", "Status", FieldKind::Choice(STATUS_CHOICES)).required(),
        FieldSpec::new("scheduledDate", "Scheduled Date", FieldKind::Date).required(),
        FieldSpec::new("scheduledTime", "Scheduled Time", FieldKind::Time).required(),
        FieldSpec::new("technician", "Technician", FieldKind::Text),
        FieldSpec::new("notes", "Notes", FieldKind::Text),
    ],
    record_locks: &[Status::Completed, Status::Cancelled],
    joins: &[DateTimeJoin {
        date: "scheduledDate",
        time: "scheduledTime",
        target: "scheduledAt",
    }],
    line_items: true,
    min_line_items: 0,
};

impl Editable for Job {
    fn schema() -> &'static FormSchema {
        &SCHEMA
    }

    fn seed_fields(&self) -> BTreeMap<&'static str, String> {
        seed([
            ("jobNumber", self.job_number.clone()),
            ("customerId", self.customer_id.to_string()),
            ("vehicleId", self.vehicle_id.to_string()),
            ("description", self.description.clone()),
            ("status", self.status.key().to_uppercase()),
            ("scheduledDate", format::date_input_value(self.scheduled_at.date())),
            ("scheduledTime", format::time_input_value(self.scheduled_at.time())),
            ("technician", seed_optional(&self.technician)),
            ("notes", seed_optional(&self.notes)),
        ])
    }

    fn seed_line_items(&self) -> Vec<LineItem> {
        self.line_items.clone()
    }

    fn lock_status(&self) -> Option<Status> {
        Some(self.status)
    }

    fn defaults() -> BTreeMap<&'static str, String> {
        seed([
            ("status", "SCHEDULED".to_string()),
            ("scheduledTime", "09:00".to_string()),
        ])
    }
}

impl Tabular for Job {
    fn columns() -> &'static [&'static str] {
        &["Job #", "Description", "Scheduled", "Technician", "Total", "Status"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(&self.job_number),
            Cell::text(format::truncate(&self.description, 40)),
            Cell::datetime(self.scheduled_at),
            Cell::optional(self.technician.as_deref()),
            Cell::money(self.total),
            Cell::Badge(self.status),
        ]
    }

    fn details(&self) -> Vec<(&'static str, Cell)> {
        vec![
            ("Job Number", Cell::text(&self.job_number)),
            ("Status", Cell::Badge(self.status)),
            ("Description", Cell::text(&self.description)),
            ("Scheduled", Cell::datetime(self.scheduled_at)),
            ("Technician", Cell::optional(self.technician.as_deref())),
            ("Customer", Cell::text(format!("Customer #{}", self.customer_id))),
            ("Vehicle", Cell::text(format!("Vehicle #{}", self.vehicle_id))),
            ("Total", Cell::money(self.total)),
            ("Notes", Cell::optional(self.notes.as_deref())),
        ]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::form::FormController;
    use crate::line_item::LineItemKind;
    use crate::testing::RecordingNotifier;
    use chrono::NaiveDate;

    pub(crate) fn sample_job(status: Status) -> Job {
        let line_items = vec![
            LineItem {
                kind: LineItemKind::Part,
                reference_id: Some(7),
                description: "Brake pad set".into(),
                quantity: 1,
                unit_rate: "49.99".parse().unwrap(),
            },
            LineItem {
                kind: LineItemKind::Labor,
                reference_id: None,
                description: "Fit front pads".into(),
                quantity: 2,
                unit_rate: "65.00".parse().unwrap(),
            },
        ];
        Job {
            id: 42,
            job_number: "J-0042".into(),
            customer_id: 1,
            vehicle_id: 2,
            description: "Brake inspection".into(),
            status,
            scheduled_at: NaiveDate::from_ymd_opt(2024, 6, 3)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            technician: Some("Sam".into()),
            total: crate::line_item::total(&line_items).unwrap(),
            line_items,
            notes: None,
        }
    }

    #[test]
    fn test_sample_total_matches_lines() {
        assert_eq!(sample_job(Status::Scheduled).total, "179.99".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_seed_splits_timestamp() {
        let form = FormController::<Job>::edit(&sample_job(Status::Scheduled)).unwrap();
        assert_eq!(form.field("scheduledDate"), "2024-06-03");
        assert_eq!(form.field("scheduledTime"), "09:30");
        assert_eq!(form.field("status"), "SCHEDULED");
    }

    #[test]
    fn test_status_choice_accepts_any_casing() {
        let n = RecordingNotifier::default();
        let mut form = FormController::<Job>::edit(&sample_job(Status::Scheduled)).unwrap();
        form.set_field("status", "in-progress", &n).unwrap();
        let payload = form.compose().unwrap();
        assert_eq!(payload.text("status"), Some("IN_PROGRESS"));

        form.set_field("status", "finished", &n).unwrap();
        assert_eq!(form.validate().get("status").map(String::as_str), Some("Choose a valid status"));
    }

    #[test]
    fn test_cancelled_job_is_locked() {
        assert_eq!(sample_job(Status::Cancelled).edit_block(), Some(Status::Cancelled));
        assert_eq!(sample_job(Status::OnHold).edit_block(), None);
    }

    #[test]
    fn test_reads_api_json() {
        let json = r#"{"id":5,"jobNumber":"J-5","customerId":1,"vehicleId":2,"description":"Oil change",
            "status":"in-progress","scheduledAt":"2024-06-04T08:00:00","technician":null,"notes":null}"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.status, Status::InProgress);
        assert!(job.line_items.is_empty());
        assert_eq!(job.total, Decimal::ZERO);
    }
}
