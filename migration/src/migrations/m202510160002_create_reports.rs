use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510160002_create_reports"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("reports"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("submission_id"))
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("teacher_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("teacher_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("student_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("roll_no")).string().not_null())
                    .col(ColumnDef::new(Alias::new("subject")).string().not_null())
                    .col(ColumnDef::new(Alias::new("submission_date")).string().not_null())
                    .col(ColumnDef::new(Alias::new("extracted_text")).text().not_null())
                    .col(ColumnDef::new(Alias::new("breakdown")).text().not_null())
                    .col(ColumnDef::new(Alias::new("plagiarism")).text().not_null())
                    .col(ColumnDef::new(Alias::new("total_marks_awarded")).double().not_null())
                    .col(ColumnDef::new(Alias::new("total_max_marks")).double().not_null())
                    .col(ColumnDef::new(Alias::new("final_grade")).string().not_null())
                    .col(ColumnDef::new(Alias::new("overall_feedback")).text().not_null())
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(
                        ColumnDef::new(Alias::new("updated_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("reports"), Alias::new("teacher_id"))
                            .to(Alias::new("teachers"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reports_student_lookup")
                    .table(Alias::new("reports"))
                    .col(Alias::new("student_name"))
                    .col(Alias::new("roll_no"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("reports")).to_owned())
            .await
    }
}
