use crate::error::AppError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::upload_image::*;
use eventease_domain::ID;
use eventease_infra::AppContext;

/// 5 MiB, matches what the frontend allows for picking an image
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub async fn upload_image_controller(
    http_req: HttpRequest,
    bytes: web::Bytes,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    protect_route(&http_req, &ctx).await?;

    let content_type = http_req
        .headers()
        .get("Content-Type")
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let usecase = UploadImageUseCase {
        content_type,
        bytes: bytes.to_vec(),
    };

    execute(usecase, &ctx)
        .await
        .map(|url| HttpResponse::Ok().json(APIResponse { url }))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct UploadImageUseCase {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    UnsupportedImageType(String),
    ImageTooLarge,
    StorageError,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UnsupportedImageType(content_type) => Self::BadClientData(format!(
                "Unsupported image content type: {}. Supported types are image/jpeg, image/png, image/gif and image/webp",
                content_type
            )),
            UseCaseError::ImageTooLarge => Self::BadClientData(format!(
                "The image exceeds the maximum size of {} bytes",
                MAX_IMAGE_BYTES
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UploadImageUseCase {
    type Response = String;

    type Error = UseCaseError;

    const NAME: &'static str = "UploadImage";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let extension = extension_for(&self.content_type)
            .ok_or_else(|| UseCaseError::UnsupportedImageType(self.content_type.clone()))?;
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(UseCaseError::ImageTooLarge);
        }

        let filename = format!("{}.{}", ID::default(), extension);
        ctx.services
            .image_store
            .upload(&filename, &self.content_type, std::mem::take(&mut self.bytes))
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn rejects_unsupported_content_types() {
        let ctx = AppContext::create_inmemory();

        let mut usecase = UploadImageUseCase {
            content_type: "application/pdf".into(),
            bytes: vec![1, 2, 3],
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::UnsupportedImageType(_))
        ));
    }

    #[actix_web::main]
    #[test]
    async fn stores_the_image_under_a_fresh_filename() {
        let mut ctx = AppContext::create_inmemory();
        let store = std::sync::Arc::new(eventease_infra::InMemoryImageStore::new());
        ctx.services.image_store = store.clone();

        let mut usecase = UploadImageUseCase {
            content_type: "image/png".into(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        };
        let url = usecase.execute(&ctx).await.unwrap();

        assert!(url.ends_with(".png"));
        let filenames = store.uploaded_filenames();
        assert_eq!(filenames.len(), 1);
        assert!(filenames[0].ends_with(".png"));
    }
}
