use crate::error::AppError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::vote_date_option::*;
use eventease_domain::{DateVote, EventDateOption, UserId, ID};
use eventease_infra::AppContext;

pub async fn vote_date_option_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = VoteDateOptionUseCase {
        date_option_id: path_params.date_option_id.clone(),
        voter_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.option, &res.votes)))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct VoteDateOptionUseCase {
    pub date_option_id: ID,
    pub voter_id: UserId,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub option: EventDateOption,
    pub votes: Vec<DateVote>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    VotingClosed,
    DuplicateVote,
    StorageError,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(date_option_id) => Self::NotFound(format!(
                "The date option with id: {}, was not found.",
                date_option_id
            )),
            UseCaseError::VotingClosed => {
                Self::Conflict("The event already has a final date".into())
            }
            UseCaseError::DuplicateVote => {
                Self::Conflict("You have already voted for this date".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for VoteDateOptionUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "VoteDateOption";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let option = match ctx.repos.date_option_repo.find(&self.date_option_id).await {
            Some(option) => option,
            None => return Err(UseCaseError::NotFound(self.date_option_id.clone())),
        };

        // The event behind the option must exist and be visible to the
        // voter, otherwise the option does not exist for them either.
        let visible = ctx
            .repos
            .event_repo
            .find(&option.event_id)
            .await
            .map(|event| event.is_visible_to(Some(&self.voter_id)))
            .unwrap_or(false);
        if !visible {
            return Err(UseCaseError::NotFound(self.date_option_id.clone()));
        }

        // Voting ends once any sibling has been finalized
        let siblings = ctx
            .repos
            .date_option_repo
            .find_by_event(&option.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if siblings.iter().any(|o| o.is_final) {
            return Err(UseCaseError::VotingClosed);
        }

        let vote = DateVote::new(option.id.clone(), self.voter_id.clone());
        let inserted = ctx
            .repos
            .date_vote_repo
            .try_insert(&vote)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !inserted {
            return Err(UseCaseError::DuplicateVote);
        }

        let votes = ctx
            .repos
            .date_vote_repo
            .find_by_options(&[option.id.clone()])
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { option, votes })
    }
}
