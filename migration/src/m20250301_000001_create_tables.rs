use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建实验作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text().not_null())
                    .col(ColumnDef::new(Assignments::Deadline).big_integer().null())
                    .col(
                        ColumnDef::new(Assignments::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建提交表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Submissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::FileReference)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::FileName).string().not_null())
                    .col(ColumnDef::new(Submissions::Status).string().not_null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建验证结果表（每个提交至多一条）
        manager
            .create_table(
                Table::create()
                    .table(VerificationResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VerificationResults::SubmissionId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VerificationResults::SyntaxCheckPassed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(VerificationResults::SyntaxErrors)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationResults::PlagiarismScore)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationResults::PlagiarismDetails)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationResults::VerifiedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VerificationResults::Table, VerificationResults::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建教师评审表（每个提交至多一条）
        manager
            .create_table(
                Table::create()
                    .table(TeacherReviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherReviews::SubmissionId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeacherReviews::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TeacherReviews::Grade).integer().null())
                    .col(ColumnDef::new(TeacherReviews::Comments).text().not_null())
                    .col(
                        ColumnDef::new(TeacherReviews::ReviewedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherReviews::Table, TeacherReviews::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建代码批注表
        manager
            .create_table(
                Table::create()
                    .table(CodeComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CodeComments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CodeComments::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CodeComments::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CodeComments::LineNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CodeComments::Comment).text().not_null())
                    .col(
                        ColumnDef::new(CodeComments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CodeComments::Table, CodeComments::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 每个学生每个作业只允许一份提交
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_assignment_student")
                    .table(Submissions::Table)
                    .col(Submissions::AssignmentId)
                    .col(Submissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_status")
                    .table(Submissions::Table)
                    .col(Submissions::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_code_comments_submission")
                    .table(CodeComments::Table)
                    .col(CodeComments::SubmissionId)
                    .col(CodeComments::LineNumber)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(CodeComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeacherReviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VerificationResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    Title,
    Description,
    Deadline,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    AssignmentId,
    StudentId,
    FileReference,
    FileName,
    Status,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum VerificationResults {
    #[sea_orm(iden = "verification_results")]
    Table,
    SubmissionId,
    SyntaxCheckPassed,
    SyntaxErrors,
    PlagiarismScore,
    PlagiarismDetails,
    VerifiedAt,
}

#[derive(DeriveIden)]
enum TeacherReviews {
    #[sea_orm(iden = "teacher_reviews")]
    Table,
    SubmissionId,
    TeacherId,
    Grade,
    Comments,
    ReviewedAt,
}

#[derive(DeriveIden)]
enum CodeComments {
    #[sea_orm(iden = "code_comments")]
    Table,
    Id,
    SubmissionId,
    TeacherId,
    LineNumber,
    Comment,
    CreatedAt,
}
