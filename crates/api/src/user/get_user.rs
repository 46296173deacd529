use crate::error::AppError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use eventease_api_structs::get_user::*;
use eventease_domain::{User, UserId};
use eventease_infra::AppContext;

pub async fn get_user_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let usecase = GetUserUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct GetUserUseCase {
    pub user_id: UserId,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(UserId),
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(user_id) => {
                Self::NotFound(format!("A user with id {} was not found", user_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUser";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .user_repo
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.user_id.clone()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn unknown_user_is_not_found() {
        let ctx = AppContext::create_inmemory();

        let mut usecase = GetUserUseCase {
            user_id: UserId::new("auth0|nobody"),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}
