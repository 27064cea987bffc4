//! Saved evaluation reports.
//!
//! One row per `submission_id`. Saving under an existing id overwrites every
//! column. The stored totals and grade are always derived from the breakdown
//! before writing.

use chrono::{DateTime, Utc};
use marker::reconcile;
use marker::scorer::summarise;
use marker::types::{EvaluationItem, EvaluationResult, PlagiarismReport, SubmissionRecord};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use sea_orm::sea_query::OnConflict;
use serde::Serialize;

use super::teacher;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub submission_id: String,
    pub teacher_id: i64,
    pub teacher_name: String,
    pub student_name: String,
    pub roll_no: String,
    pub subject: String,
    /// RFC 3339 time the sheet was graded.
    pub submission_date: String,
    pub extracted_text: String,
    /// JSON-encoded [`EvaluationItem`] list.
    pub breakdown: String,
    /// JSON-encoded [`PlagiarismReport`].
    pub plagiarism: String,
    pub total_marks_awarded: f64,
    pub total_max_marks: f64,
    pub final_grade: String,
    pub overall_feedback: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teacher::Entity",
        from = "Column::TeacherId",
        to = "super::teacher::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Teacher,
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn encode<T: Serialize>(value: &T, what: &str) -> Result<String, DbErr> {
    serde_json::to_string(value).map_err(|e| DbErr::Custom(format!("failed to encode {what}: {e}")))
}

/// Result of [`Model::upsert`].
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// No report had this id; a new row was written.
    Created(Model),
    /// The owner's existing report under this id was replaced.
    Overwritten(Model),
    /// The id belongs to another teacher's report; nothing was written.
    OwnedByOther,
}

impl SaveOutcome {
    pub fn into_model(self) -> Option<Model> {
        match self {
            SaveOutcome::Created(model) | SaveOutcome::Overwritten(model) => Some(model),
            SaveOutcome::OwnedByOther => None,
        }
    }
}

impl Model {
    /// Saves `result` for `owner`, overwriting the owner's report with the same id.
    ///
    /// The summary is recomputed from the items first, so whatever totals the
    /// caller sent are ignored. Both writes are single statements: an insert
    /// that does nothing on a duplicate id, then an update guarded by the
    /// owner's id. Concurrent saves of one id therefore never hit the unique
    /// constraint, and a report owned by someone else is never touched.
    pub async fn upsert(
        db: &DatabaseConnection,
        owner: &teacher::Model,
        mut result: EvaluationResult,
    ) -> Result<SaveOutcome, DbErr> {
        reconcile::recompute(&mut result);

        let breakdown = encode(&result.evaluation, "breakdown")?;
        let plagiarism = encode(&result.plagiarism_report, "plagiarism report")?;
        let now = Utc::now();
        let submission_id = result.submission_id.clone();

        let changes = ActiveModel {
            teacher_name: Set(owner.display_name.clone()),
            student_name: Set(result.student_name),
            roll_no: Set(result.roll_no),
            subject: Set(result.subject),
            submission_date: Set(result.submission_date),
            extracted_text: Set(result.extracted_text),
            breakdown: Set(breakdown),
            plagiarism: Set(plagiarism),
            total_marks_awarded: Set(result.summary.total_marks_awarded),
            total_max_marks: Set(result.summary.total_max_marks),
            final_grade: Set(result.summary.final_grade.to_string()),
            overall_feedback: Set(result.summary.overall_feedback),
            updated_at: Set(now),
            ..Default::default()
        };
        let row = ActiveModel {
            submission_id: Set(submission_id.clone()),
            teacher_id: Set(owner.id),
            created_at: Set(now),
            ..changes.clone()
        };

        // A delete landing between the two statements sends us round again.
        for _ in 0..3 {
            let inserted = match Entity::insert(row.clone())
                .on_conflict(OnConflict::column(Column::SubmissionId).do_nothing().to_owned())
                .exec_without_returning(db)
                .await
            {
                Ok(rows) => rows,
                Err(DbErr::RecordNotInserted) => 0,
                Err(e) => return Err(e),
            };
            if inserted > 0 {
                let saved = Self::reload(db, &submission_id).await?;
                tracing::info!(
                    submission_id = %saved.submission_id,
                    teacher_id = saved.teacher_id,
                    grade = %saved.final_grade,
                    "Saved new report"
                );
                return Ok(SaveOutcome::Created(saved));
            }

            let updated = Entity::update_many()
                .set(changes.clone())
                .filter(Column::SubmissionId.eq(submission_id.as_str()))
                .filter(Column::TeacherId.eq(owner.id))
                .exec(db)
                .await?;
            if updated.rows_affected > 0 {
                let saved = Self::reload(db, &submission_id).await?;
                tracing::info!(
                    submission_id = %saved.submission_id,
                    teacher_id = saved.teacher_id,
                    grade = %saved.final_grade,
                    "Overwrote report"
                );
                return Ok(SaveOutcome::Overwritten(saved));
            }

            if Self::find_by_submission_id(db, &submission_id).await?.is_some() {
                tracing::warn!(
                    submission_id = %submission_id,
                    teacher_id = owner.id,
                    "Submission id belongs to another teacher"
                );
                return Ok(SaveOutcome::OwnedByOther);
            }
        }

        Err(DbErr::Custom(format!("report {submission_id} kept disappearing while saving")))
    }

    async fn reload(db: &DatabaseConnection, submission_id: &str) -> Result<Self, DbErr> {
        Self::find_by_submission_id(db, submission_id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("report {submission_id}")))
    }

    pub async fn find_by_submission_id(
        db: &DatabaseConnection,
        submission_id: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(submission_id.to_string()).one(db).await
    }

    /// All reports saved by one teacher, most recently saved first.
    pub async fn list_for_teacher(
        db: &DatabaseConnection,
        teacher_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::UpdatedAt)
            .order_by_asc(Column::SubmissionId)
            .all(db)
            .await
    }

    /// Reports for one student, matched exactly on trimmed name and roll number.
    pub async fn find_for_student(
        db: &DatabaseConnection,
        student_name: &str,
        roll_no: &str,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::StudentName.eq(student_name.trim()))
            .filter(Column::RollNo.eq(roll_no.trim()))
            .order_by_desc(Column::SubmissionDate)
            .all(db)
            .await
    }

    /// Deletes a report. Returns `false` when nothing matched.
    pub async fn delete_by_submission_id(db: &DatabaseConnection, submission_id: &str) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(submission_id.to_string()).exec(db).await?;
        Ok(res.rows_affected > 0)
    }

    /// Rebuilds the full result, re-deriving the summary from the stored items.
    pub fn to_result(&self) -> Result<EvaluationResult, DbErr> {
        let evaluation: Vec<EvaluationItem> = serde_json::from_str(&self.breakdown)
            .map_err(|e| DbErr::Custom(format!("corrupt breakdown for {}: {e}", self.submission_id)))?;
        let plagiarism_report: PlagiarismReport = serde_json::from_str(&self.plagiarism)
            .map_err(|e| DbErr::Custom(format!("corrupt plagiarism report for {}: {e}", self.submission_id)))?;
        let summary = summarise(&evaluation, self.overall_feedback.clone());

        Ok(EvaluationResult {
            submission_id: self.submission_id.clone(),
            student_name: self.student_name.clone(),
            roll_no: self.roll_no.clone(),
            subject: self.subject.clone(),
            submission_date: self.submission_date.clone(),
            extracted_text: self.extracted_text.clone(),
            plagiarism_report,
            evaluation,
            summary,
        })
    }
}

impl SubmissionRecord for Model {
    fn submission_id(&self) -> &str {
        &self.submission_id
    }

    fn student_name(&self) -> &str {
        &self.student_name
    }

    fn roll_no(&self) -> &str {
        &self.roll_no
    }

    fn subject(&self) -> &str {
        &self.subject
    }
}
