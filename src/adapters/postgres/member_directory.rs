//! PostgreSQL implementation of MemberDirectory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, Timestamp, UserId};
use crate::domain::member::{
    BoardMembership, Certification, CertificationType, Member, MemberStatus,
};
use crate::ports::MemberDirectory;

/// PostgreSQL implementation of the MemberDirectory port.
pub struct PostgresMemberDirectory {
    pool: PgPool,
}

impl PostgresMemberDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    user_id: String,
    display_name: String,
    status: String,
}

impl TryFrom<MemberRow> for Member {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let status = MemberStatus::parse(&row.status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid member status value: {}", row.status),
            )
        })?;
        let user_id = UserId::new(row.user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        })?;

        Ok(Member::new(
            MemberId::from_uuid(row.id),
            user_id,
            row.display_name,
            status,
        ))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CertificationRow {
    member_id: Uuid,
    certification_type: String,
    earned_date: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl From<CertificationRow> for Certification {
    fn from(row: CertificationRow) -> Self {
        Certification {
            member_id: MemberId::from_uuid(row.member_id),
            certification_type: CertificationType::new(row.certification_type),
            earned_date: Timestamp::from_datetime(row.earned_date),
            expires_at: row.expires_at.map(Timestamp::from_datetime),
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

#[async_trait]
impl MemberDirectory for PostgresMemberDirectory {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, display_name, status
            FROM members
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find member", e))?;

        row.map(Member::try_from).transpose()
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, display_name, status
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find member", e))?;

        row.map(Member::try_from).transpose()
    }

    async fn certifications_for(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<Certification>, DomainError> {
        let rows: Vec<CertificationRow> = sqlx::query_as(
            r#"
            SELECT member_id, certification_type, earned_date, expires_at
            FROM certifications
            WHERE member_id = $1
            ORDER BY earned_date ASC
            "#,
        )
        .bind(member_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load certifications", e))?;

        Ok(rows.into_iter().map(Certification::from).collect())
    }

    async fn current_board_seat(
        &self,
        member_id: &MemberId,
    ) -> Result<Option<BoardMembership>, DomainError> {
        let is_current: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT is_current
            FROM board_memberships
            WHERE member_id = $1 AND is_current = TRUE
            LIMIT 1
            "#,
        )
        .bind(member_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load board membership", e))?;

        Ok(is_current.map(|is_current| BoardMembership {
            member_id: *member_id,
            is_current,
        }))
    }
}
