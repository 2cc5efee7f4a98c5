use crate::{
    error::AgendaError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use agenda_api_structs::delete_event::*;
use agenda_domain::{CalendarEvent, User, ID};
use agenda_infra::AgendaContext;

fn handle_error(e: UseCaseError) -> AgendaError {
    match e {
        UseCaseError::NotFound(event_id) => AgendaError::NotFound(format!(
            "The calendar event with id: {}, was not found.",
            event_id
        )),
    }
}

pub async fn delete_event_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let usecase = DeleteEventUseCase {
        event_id: path_params.event_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.event, &res.owner.timezone)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct DeleteEventUseCase {
    pub event_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub event: CalendarEvent,
    pub owner: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteEventUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteEvent";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let event = ctx
            .repos
            .events
            .find(&self.event_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))?;
        let owner = ctx
            .repos
            .users
            .find(&event.user_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))?;

        match ctx.repos.events.delete(&event.id).await {
            Some(event) => Ok(UseCaseRes { event, owner }),
            None => Err(UseCaseError::NotFound(self.event_id.clone())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::test]
    async fn deletes_event() {
        let ctx = AgendaContext::create_inmemory();
        let user = User::new("Jane".into(), "jane@example.com".into(), None, 0);
        ctx.repos.users.insert(&user).await.unwrap();
        let event = CalendarEvent::new(user.id.clone(), "Dentist".into(), 0, 0);
        ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = DeleteEventUseCase {
            event_id: event.id.clone(),
        };
        assert!(usecase.execute(&ctx).await.is_ok());
        assert!(ctx.repos.events.find(&event.id).await.is_none());
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(event.id)
        );
    }
}
