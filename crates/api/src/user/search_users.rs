use crate::error::AppError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::search_users::*;
use eventease_domain::User;
use eventease_infra::AppContext;

pub async fn search_users_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    protect_route(&http_req, &ctx).await?;

    let usecase = SearchUsersUseCase {
        query: query_params.0.query,
    };

    execute(usecase, &ctx)
        .await
        .map(|users| HttpResponse::Ok().json(APIResponse::new(users)))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct SearchUsersUseCase {
    pub query: String,
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
impl UseCase for SearchUsersUseCase {
    type Response = Vec<User>;

    type Error = UseCaseError;

    const NAME: &'static str = "SearchUsers";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let query = self.query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        ctx.repos
            .user_repo
            .search(query)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use eventease_domain::UserId;

    #[actix_web::main]
    #[test]
    async fn matches_on_name_and_surname() {
        let ctx = AppContext::create_inmemory();
        let mut ana = User::new(UserId::new("auth0|ana"));
        ana.name = "Ana".into();
        ana.surname = Some("Kovač".into());
        ctx.repos.user_repo.insert(&ana).await.unwrap();
        let mut bor = User::new(UserId::new("auth0|bor"));
        bor.name = "Bor".into();
        ctx.repos.user_repo.insert(&bor).await.unwrap();

        let mut usecase = SearchUsersUseCase {
            query: "kova".into(),
        };
        let found = usecase.execute(&ctx).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ana.id);

        let mut usecase = SearchUsersUseCase { query: "  ".into() };
        assert!(usecase.execute(&ctx).await.unwrap().is_empty());
    }
}
