//! ListMyRegistrationsHandler - Query handler for the caller's registrations.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::registration::{Registration, RegistrationError};
use crate::ports::{MemberDirectory, RegistrationRepository};

/// Query for the caller's registration history.
#[derive(Debug, Clone)]
pub struct ListMyRegistrationsQuery {
    pub user_id: UserId,
}

/// Handler for listing a member's registrations, newest first.
///
/// Users without a member profile have no registrations.
pub struct ListMyRegistrationsHandler {
    members: Arc<dyn MemberDirectory>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl ListMyRegistrationsHandler {
    pub fn new(
        members: Arc<dyn MemberDirectory>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            members,
            registrations,
        }
    }

    pub async fn handle(
        &self,
        query: ListMyRegistrationsQuery,
    ) -> Result<Vec<Registration>, RegistrationError> {
        let Some(member) = self.members.find_by_user_id(&query.user_id).await? else {
            return Ok(Vec::new());
        };
        Ok(self.registrations.list_for_member(&member.id).await?)
    }
}
