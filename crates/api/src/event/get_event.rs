use crate::{
    error::AgendaError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use agenda_api_structs::get_event::*;
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

pub async fn get_event_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let usecase = GetEventUseCase {
        event_id: path_params.event_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.event, &res.owner.timezone)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct GetEventUseCase {
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
impl UseCase for GetEventUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvent";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };
        // An event without an owner is unreachable through the api
        let owner = match ctx.repos.users.find(&event.user_id).await {
            Some(owner) => owner,
            None => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };
        Ok(UseCaseRes { event, owner })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::test]
    async fn finds_event_with_owner() {
        let ctx = AgendaContext::create_inmemory();
        let user = User::new("Jane".into(), "jane@example.com".into(), None, 0);
        ctx.repos.users.insert(&user).await.unwrap();
        let event = CalendarEvent::new(user.id.clone(), "Dentist".into(), 0, 0);
        ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = GetEventUseCase {
            event_id: event.id.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.event.title, "Dentist");
        assert_eq!(res.owner.name, "Jane");
    }

    #[actix_web::test]
    async fn rejects_unknown_event() {
        let ctx = AgendaContext::create_inmemory();
        let event_id = ID::default();
        let mut usecase = GetEventUseCase {
            event_id: event_id.clone(),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(event_id)
        );
    }
}
