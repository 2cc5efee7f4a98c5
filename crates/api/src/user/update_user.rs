use super::validate_user;
use crate::error::AgendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use agenda_api_structs::update_user::*;
use agenda_domain::{User, ID};
use agenda_infra::AgendaContext;
use chrono_tz::Tz;

pub async fn update_user_controller(
    body: web::Json<RequestBody>,
    path: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let body = body.0;
    let usecase = UpdateUserUseCase {
        user_id: path.into_inner().user_id,
        name: body.name,
        email: body.email,
        timezone: body.timezone,
    };

    execute(usecase, &ctx)
        .await
        .map(|usecase_res| HttpResponse::Ok().json(APIResponse::new(usecase_res.user)))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct UpdateUserUseCase {
    pub user_id: ID,
    pub name: Option<String>,
    pub email: Option<String>,
    pub timezone: Option<Tz>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidUser(String),
    StorageError,
    UserNotFound(ID),
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidUser(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateUser";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let mut user = match ctx.repos.users.find(&self.user_id).await {
            Some(user) => user,
            None => return Err(UseCaseError::UserNotFound(self.user_id.clone())),
        };

        if let Some(name) = &self.name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = &self.email {
            user.email = email.trim().to_string();
        }
        if let Some(timezone) = self.timezone {
            user.timezone = timezone;
        }
        validate_user(&user).map_err(UseCaseError::InvalidUser)?;

        let res = ctx.repos.users.save(&user).await;
        match res {
            Ok(_) => Ok(UseCaseRes { user }),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono_tz::America::New_York;

    #[actix_web::test]
    async fn updates_user() {
        let ctx = AgendaContext::create_inmemory();
        let user = User::new("Jane".into(), "jane@example.com".into(), None, 0);
        ctx.repos.users.insert(&user).await.unwrap();

        let mut usecase = UpdateUserUseCase {
            user_id: user.id.clone(),
            name: None,
            email: Some("jane.doe@example.com".into()),
            timezone: Some(New_York),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.user.name, "Jane");
        assert_eq!(res.user.email, "jane.doe@example.com");

        let stored = ctx.repos.users.find(&user.id).await.unwrap();
        assert_eq!(stored.timezone, New_York);
    }

    #[actix_web::test]
    async fn rejects_unknown_user() {
        let ctx = AgendaContext::create_inmemory();
        let user_id = ID::default();
        let mut usecase = UpdateUserUseCase {
            user_id: user_id.clone(),
            name: Some("Jane".into()),
            email: None,
            timezone: None,
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::UserNotFound(user_id)
        );
    }
}
