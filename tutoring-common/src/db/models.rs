//! Database models
//!
//! Stored records carry the store-assigned `id`; the `New*` types are the
//! create-request payloads validated before they reach the store.

use serde::{Deserialize, Serialize};

use crate::validation::{require_date, require_finite, require_id, require_non_negative, require_text};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    /// Delivery mode label, e.g. "online" or "offline"
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeacherSubjectRate {
    pub id: i64,
    pub teacher_id: i64,
    pub subject: String,
    pub salary_per_hour: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub total_hours: f64,
    /// Unconsumed balance; may be negative
    pub remaining_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClassRecord {
    pub id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub subject: String,
    /// Calendar date token (`YYYY-MM-DD`), stored verbatim
    pub date: String,
    pub hours: f64,
}

/// Rate joined to a class record sharing teacher and subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeacherRateDetail {
    pub teacher_name: String,
    pub subject: String,
    pub student_name: String,
    pub salary_per_hour: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeacher {
    pub name: String,
    pub mode: String,
}

impl NewTeacher {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("mode", &self.mode)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeacherSubjectRate {
    pub teacher_id: i64,
    pub subject: String,
    #[serde(alias = "rate")]
    pub salary_per_hour: f64,
}

impl NewTeacherSubjectRate {
    pub fn validate(&self) -> Result<()> {
        require_id("teacher_id", self.teacher_id)?;
        require_text("subject", &self.subject)?;
        require_non_negative("salary_per_hour", self.salary_per_hour)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub subject: String,
    pub total_hours: f64,
    pub remaining_hours: f64,
}

impl NewStudent {
    /// `remaining_hours` may be negative or exceed `total_hours`
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("subject", &self.subject)?;
        require_non_negative("total_hours", self.total_hours)?;
        require_finite("remaining_hours", self.remaining_hours)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewClassRecord {
    pub teacher_id: i64,
    pub student_id: i64,
    pub subject: String,
    pub date: String,
    pub hours: f64,
}

impl NewClassRecord {
    /// Sign of `hours` is deliberately unchecked; only non-finite values are rejected.
    pub fn validate(&self) -> Result<()> {
        require_id("teacher_id", self.teacher_id)?;
        require_id("student_id", self.student_id)?;
        require_text("subject", &self.subject)?;
        require_date("date", &self.date)?;
        require_finite("hours", self.hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn field_of(result: Result<()>) -> String {
        match result {
            Err(Error::InvalidInput { field, .. }) => field,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    fn class_record() -> NewClassRecord {
        NewClassRecord {
            teacher_id: 1,
            student_id: 1,
            subject: "Math".to_string(),
            date: "2024-07-01".to_string(),
            hours: 2.0,
        }
    }

    #[test]
    fn test_teacher_blank_fields_rejected() {
        let t = NewTeacher { name: "  ".into(), mode: "online".into() };
        assert_eq!(field_of(t.validate()), "name");

        let t = NewTeacher { name: "Alice".into(), mode: "".into() };
        assert_eq!(field_of(t.validate()), "mode");

        let t = NewTeacher { name: "Alice".into(), mode: "online".into() };
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_rate_accepts_rate_alias() {
        let rate: NewTeacherSubjectRate =
            serde_json::from_str(r#"{"teacher_id": 3, "subject": "Math", "rate": 150.0}"#).unwrap();
        assert_eq!(rate.salary_per_hour, 150.0);
        assert!(rate.validate().is_ok());
    }

    #[test]
    fn test_rate_negative_rejected() {
        let rate = NewTeacherSubjectRate {
            teacher_id: 1,
            subject: "Math".into(),
            salary_per_hour: -1.0,
        };
        assert_eq!(field_of(rate.validate()), "salary_per_hour");

        let rate = NewTeacherSubjectRate {
            teacher_id: 0,
            subject: "Math".into(),
            salary_per_hour: 10.0,
        };
        assert_eq!(field_of(rate.validate()), "teacher_id");
    }

    #[test]
    fn test_student_negative_remaining_allowed() {
        let s = NewStudent {
            name: "Charlie".into(),
            subject: "Math".into(),
            total_hours: 100.0,
            remaining_hours: -4.0,
        };
        assert!(s.validate().is_ok());

        let s = NewStudent { total_hours: -1.0, ..s };
        assert_eq!(field_of(s.validate()), "total_hours");
    }

    #[test]
    fn test_student_non_finite_rejected() {
        let s = NewStudent {
            name: "Charlie".into(),
            subject: "Math".into(),
            total_hours: 100.0,
            remaining_hours: f64::NAN,
        };
        assert_eq!(field_of(s.validate()), "remaining_hours");
    }

    #[test]
    fn test_class_record_date_shape() {
        assert!(class_record().validate().is_ok());

        let bad = NewClassRecord { date: "01/07/2024".into(), ..class_record() };
        assert_eq!(field_of(bad.validate()), "date");

        let bad = NewClassRecord { date: "2024-02-30".into(), ..class_record() };
        assert_eq!(field_of(bad.validate()), "date");
    }

    #[test]
    fn test_class_record_hours_sign_unchecked() {
        let zero = NewClassRecord { hours: 0.0, ..class_record() };
        assert!(zero.validate().is_ok());

        let inf = NewClassRecord { hours: f64::INFINITY, ..class_record() };
        assert_eq!(field_of(inf.validate()), "hours");
    }

    #[test]
    fn test_class_record_ids_checked() {
        let bad = NewClassRecord { student_id: -5, ..class_record() };
        assert_eq!(field_of(bad.validate()), "student_id");
    }
}
