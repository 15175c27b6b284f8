//! 菜品图片上传
//!
//! 图片不落本地盘，直接转存外部图床，回传公开 URL 给后台填进菜品。

use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::post,
};
use serde_json::{Value, json};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

// imgbb 免费方案上限 32MB，这里收紧到 8MB 就够菜品图用了
const MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/admin/upload", post(upload_image))
}

async fn upload_image(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<Value>> {
    let host = state
        .image_host
        .as_ref()
        .ok_or_else(|| AppError::unavailable("圖片上傳服務未啟用。"))?;

    let mut image: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("無法解析上傳內容：{e}")))?
    {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("讀取圖片失敗：{e}")))?;
            image = Some(bytes.to_vec());
            break;
        }
    }

    let bytes = image.ok_or_else(|| AppError::validation("缺少 image 欄位。"))?;
    if bytes.is_empty() {
        return Err(AppError::validation("圖片內容為空。"));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::validation("圖片過大，上限 8MB。"));
    }

    let url = host.upload(&bytes).await?;
    tracing::info!(size = bytes.len(), %url, "图片已上传");
    Ok(Json(json!({ "url": url })))
}
