use crate::error::AppError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::update_me::*;
use eventease_domain::User;
use eventease_infra::AppContext;

pub async fn update_me_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateMeUseCase {
        user,
        name: body.name,
        surname: body.surname,
        picture: body.picture,
        description: body.description,
        wants_notifications: body.wants_notifications,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(AppError::from)
}

/// Partial profile update: absent fields keep their stored value.
#[derive(Debug)]
pub struct UpdateMeUseCase {
    pub user: User,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub picture: Option<String>,
    pub description: Option<String>,
    pub wants_notifications: Option<bool>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateMeUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateMe";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let mut user = self.user.clone();
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(surname) = &self.surname {
            user.surname = Some(surname.clone());
        }
        if let Some(picture) = &self.picture {
            user.picture = Some(picture.clone());
        }
        if let Some(description) = &self.description {
            user.description = Some(description.clone());
        }
        if let Some(wants_notifications) = self.wants_notifications {
            user.wants_notifications = wants_notifications;
        }

        ctx.repos
            .user_repo
            .save(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(user)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use eventease_domain::UserId;

    #[actix_web::main]
    #[test]
    async fn updates_only_the_provided_fields() {
        let ctx = AppContext::create_inmemory();
        let mut user = User::new(UserId::new("auth0|ana"));
        user.name = "Ana".into();
        user.description = Some("Hiker".into());
        ctx.repos.user_repo.insert(&user).await.unwrap();

        let mut usecase = UpdateMeUseCase {
            user: user.clone(),
            name: None,
            surname: Some("Novak".into()),
            picture: None,
            description: None,
            wants_notifications: Some(false),
        };
        let updated = usecase.execute(&ctx).await.unwrap();

        assert_eq!(updated.name, "Ana");
        assert_eq!(updated.surname.as_deref(), Some("Novak"));
        assert_eq!(updated.description.as_deref(), Some("Hiker"));
        assert!(!updated.wants_notifications);

        let stored = ctx.repos.user_repo.find(&user.id).await.unwrap();
        assert!(!stored.wants_notifications);
    }
}
