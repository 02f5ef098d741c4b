//! Legacy data import
//!
//! Copies teachers, rates, students and class records from a legacy SQLite
//! database into the ledger store. Used once, when moving an existing
//! deployment onto this service.
//!
//! - Parents are inserted before children; legacy ids are remapped to the new
//!   store ids through per-kind maps.
//! - A child pointing at an unknown legacy parent aborts the import with
//!   `NotFound`. The import runs in one transaction, so nothing is kept.
//! - Class records are copied verbatim and do **not** touch student balances:
//!   legacy balances already account for them.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};
use tutoring_common::db::{
    ClassRecord, NewClassRecord, NewStudent, NewTeacher, NewTeacherSubjectRate, Student, Teacher,
    TeacherSubjectRate,
};
use tutoring_common::{Error, Result};

use crate::db::class_records::insert_class_record;
use crate::db::rates::insert_rate;
use crate::db::students::insert_student;
use crate::db::teachers::insert_teacher;

/// Rows imported per record kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub teachers: usize,
    pub rates: usize,
    pub students: usize,
    pub class_records: usize,
}

/// Import every row of the legacy `source` database into `target`
pub async fn import_legacy(source: &SqlitePool, target: &SqlitePool) -> Result<SeedReport> {
    let teachers = sqlx::query_as::<_, Teacher>("SELECT id, name, mode FROM teachers ORDER BY id")
        .fetch_all(source)
        .await?;
    let rates = sqlx::query_as::<_, TeacherSubjectRate>(
        "SELECT id, teacher_id, subject, salary_per_hour FROM teacher_subject_salaries ORDER BY id",
    )
    .fetch_all(source)
    .await?;
    let students = sqlx::query_as::<_, Student>(
        "SELECT id, name, subject, total_hours, remaining_hours FROM students ORDER BY id",
    )
    .fetch_all(source)
    .await?;
    let class_records = sqlx::query_as::<_, ClassRecord>(
        "SELECT id, teacher_id, student_id, subject, date, hours FROM class_records ORDER BY id",
    )
    .fetch_all(source)
    .await?;

    debug!(
        teachers = teachers.len(),
        rates = rates.len(),
        students = students.len(),
        class_records = class_records.len(),
        "Read legacy rows"
    );

    let mut tx = target.begin().await?;
    let mut report = SeedReport::default();

    let mut teacher_ids = HashMap::with_capacity(teachers.len());
    for legacy in teachers {
        let new = NewTeacher {
            name: legacy.name,
            mode: legacy.mode,
        };
        let created = insert_teacher(&mut *tx, &new).await?;
        teacher_ids.insert(legacy.id, created.id);
        report.teachers += 1;
    }

    for legacy in rates {
        let new = NewTeacherSubjectRate {
            teacher_id: remap(&teacher_ids, "Teacher", legacy.teacher_id)?,
            subject: legacy.subject,
            salary_per_hour: legacy.salary_per_hour,
        };
        insert_rate(&mut *tx, &new).await?;
        report.rates += 1;
    }

    let mut student_ids = HashMap::with_capacity(students.len());
    for legacy in students {
        let new = NewStudent {
            name: legacy.name,
            subject: legacy.subject,
            total_hours: legacy.total_hours,
            remaining_hours: legacy.remaining_hours,
        };
        let created = insert_student(&mut *tx, &new).await?;
        student_ids.insert(legacy.id, created.id);
        report.students += 1;
    }

    for legacy in class_records {
        let new = NewClassRecord {
            teacher_id: remap(&teacher_ids, "Teacher", legacy.teacher_id)?,
            student_id: remap(&student_ids, "Student", legacy.student_id)?,
            subject: legacy.subject,
            date: legacy.date,
            hours: legacy.hours,
        };
        insert_class_record(&mut *tx, &new).await?;
        report.class_records += 1;
    }

    tx.commit().await?;

    info!(
        teachers = report.teachers,
        rates = report.rates,
        students = report.students,
        class_records = report.class_records,
        "Legacy import complete"
    );

    Ok(report)
}

fn remap(ids: &HashMap<i64, i64>, entity: &'static str, legacy_id: i64) -> Result<i64> {
    ids.get(&legacy_id)
        .copied()
        .ok_or_else(|| Error::not_found(entity, legacy_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_unknown_id() {
        let ids = HashMap::from([(10, 1), (11, 2)]);
        assert_eq!(remap(&ids, "Teacher", 11).unwrap(), 2);
        assert!(matches!(
            remap(&ids, "Teacher", 12),
            Err(Error::NotFound { entity: "Teacher", id: 12 })
        ));
    }
}
