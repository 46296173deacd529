use crate::error::AppError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use eventease_api_structs::add_date_options::*;
use eventease_domain::{EventDateOption, UserId, ID};
use eventease_infra::AppContext;

pub async fn add_date_options_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = AddDateOptionsUseCase {
        event_id: path_params.event_id.clone(),
        caller_id: user.id,
        dates: body.0.dates,
    };

    execute(usecase, &ctx)
        .await
        .map(|options| HttpResponse::Created().json(APIResponse::new(options)))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct AddDateOptionsUseCase {
    pub event_id: ID,
    pub caller_id: UserId,
    pub dates: Vec<DateTime<Utc>>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    NotOwner,
    NoDates,
    StorageError,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => {
                Self::NotFound(format!("The event with id: {}, was not found.", event_id))
            }
            UseCaseError::NotOwner => {
                Self::Forbidden("Only the event owner can add date options".into())
            }
            UseCaseError::NoDates => {
                Self::BadClientData("At least one candidate date is required".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for AddDateOptionsUseCase {
    type Response = Vec<EventDateOption>;

    type Error = UseCaseError;

    const NAME: &'static str = "AddDateOptions";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.event_repo.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };
        if !event.is_owner(&self.caller_id) {
            return Err(UseCaseError::NotOwner);
        }
        if self.dates.is_empty() {
            return Err(UseCaseError::NoDates);
        }

        let options: Vec<EventDateOption> = self
            .dates
            .iter()
            .map(|date| EventDateOption::new(event.id.clone(), *date))
            .collect();
        ctx.repos
            .date_option_repo
            .insert_many(&options)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(options)
    }
}
