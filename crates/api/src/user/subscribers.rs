use super::delete_user::{DeleteUserUseCase, UseCaseRes};
use crate::shared::usecase::Subscriber;
use agenda_infra::AgendaContext;
use tracing::{error, info};

pub struct DeleteEventsOnUserDeleted;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteUserUseCase> for DeleteEventsOnUserDeleted {
    async fn notify(&self, res: &UseCaseRes, ctx: &AgendaContext) {
        match ctx.repos.events.delete_by_user(&res.user.id).await {
            Ok(deleted) => info!(
                "Deleted {} events of the deleted user: {}",
                deleted.deleted_count, res.user.id
            ),
            Err(e) => error!(
                "Unable to delete the events of the deleted user: {}. Error: {:?}",
                res.user.id, e
            ),
        }
    }
}
