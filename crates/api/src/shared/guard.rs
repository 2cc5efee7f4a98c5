use crate::error::AgendaError;
use agenda_domain::{User, ID};
use agenda_infra::AgendaContext;

pub struct Guard {}

impl Guard {
    /// Every event route is scoped to an owner, so the owner has to exist
    pub async fn against_missing_user(
        user_id: &ID,
        ctx: &AgendaContext,
    ) -> Result<User, AgendaError> {
        ctx.repos.users.find(user_id).await.ok_or_else(|| {
            AgendaError::NotFound(format!("A user with id: {}, was not found.", user_id))
        })
    }
}
