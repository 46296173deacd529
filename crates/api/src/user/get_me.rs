use crate::error::AppError;
use crate::shared::auth::protect_route;
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::get_me::*;
use eventease_infra::AppContext;

pub async fn get_me_controller(
    http_req: HttpRequest,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    // protect_route already resolves (and lazily creates) the account
    let (user, _) = protect_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(user)))
}
